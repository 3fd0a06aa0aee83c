use crate::error::Error;
use crate::{parse, Literal};

const DESIGN: &str = r#"
{
    'chips': {'chip0': {'name': 'chip0', 'type': 'RecChip', 'start_pos': (0.0, 0.0), 'end_pos': (1000.0, 1000.0)}},
    "qubits": {},
    'flags': [True, False, None],
    'count': -3,
    'scale': 1e-3,
}
"#;

#[test]
fn test_parse_design_dict() {
    let parsed = parse(DESIGN).unwrap();
    let Literal::Dict(pairs) = parsed else {
        panic!("expected a dict");
    };
    assert_eq!(pairs.len(), 5);
    assert_eq!(pairs[0].0, Literal::Str("chips".to_string()));
    assert_eq!(pairs[1].1, Literal::Dict(Vec::new()));
    assert_eq!(
        pairs[2].1,
        Literal::List(vec![
            Literal::Bool(true),
            Literal::Bool(false),
            Literal::None
        ])
    );
    assert_eq!(pairs[3].1, Literal::Int(-3));
    assert_eq!(pairs[4].1, Literal::Float(1e-3));

    let Literal::Dict(chips) = &pairs[0].1 else {
        panic!("expected chips to be a dict");
    };
    let Literal::Dict(chip0) = &chips[0].1 else {
        panic!("expected chip0 to be a dict");
    };
    assert_eq!(
        chip0[2].1,
        Literal::Tuple(vec![Literal::Float(0.0), Literal::Float(0.0)])
    );
}

#[test]
fn test_tuples() {
    assert_eq!(parse("()").unwrap(), Literal::Tuple(Vec::new()));
    assert_eq!(parse("(1,)").unwrap(), Literal::Tuple(vec![Literal::Int(1)]));
    assert_eq!(parse("(1)").unwrap(), Literal::Int(1));
    assert_eq!(
        parse("( 1 , 2.5 )").unwrap(),
        Literal::Tuple(vec![Literal::Int(1), Literal::Float(2.5)])
    );
}

#[test]
fn test_strings() {
    assert_eq!(parse("''").unwrap(), Literal::Str(String::new()));
    assert_eq!(
        parse(r#"'it\'s a \\ test\n'"#).unwrap(),
        Literal::Str("it's a \\ test\n".to_string())
    );
    assert_eq!(
        parse(r#""double""#).unwrap(),
        Literal::Str("double".to_string())
    );
}

#[test]
fn test_display_reparses() {
    let value = Literal::Dict(vec![
        (
            Literal::Str("pos".to_string()),
            Literal::Tuple(vec![Literal::Float(1.0), Literal::Float(-2.5)]),
        ),
        (
            Literal::Str("name".to_string()),
            Literal::Str("q'0".to_string()),
        ),
        (
            Literal::Str("single".to_string()),
            Literal::Tuple(vec![Literal::Int(7)]),
        ),
        (Literal::Str("big".to_string()), Literal::Float(1e21)),
    ]);
    let text = value.to_string();
    assert_eq!(parse(&text).unwrap(), value);
    assert!(text.starts_with("{'pos': (1.0, -2.5)"));
}

#[test]
fn test_errors_report_location() {
    assert_eq!(
        parse("[1, 2,\n  @]").unwrap_err(),
        Error::Parse { line: 1, column: 1 }
    );
    assert_eq!(
        parse("\n  @").unwrap_err(),
        Error::Parse { line: 2, column: 3 }
    );
    assert!(matches!(
        parse("{'a': 1} extra").unwrap_err(),
        Error::TrailingInput { line: 1, column: 10 }
    ));
}
