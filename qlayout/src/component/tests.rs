use arcstr::ArcStr;
use qgeom::Point;

use super::*;
use crate::bag;
use crate::error::ErrorSource;

fn cfg() -> LayoutConfig {
    LayoutConfig::default()
}

fn sample_bags() -> Vec<(Category, OptionBag)> {
    vec![
        (
            Category::Chips,
            bag! {
                "name" => "chip0",
                "type" => "RecChip",
                "start_pos" => Point::new(-1000., -1000.),
                "end_pos" => Point::new(1000., 1000.),
            },
        ),
        (
            Category::Qubits,
            bag! { "name" => "q0", "type" => "Transmon", "gds_pos" => Point::new(100., 50.) },
        ),
        (
            Category::Qubits,
            bag! { "name" => "q1", "type" => "Xmon", "rotation" => 90. },
        ),
        (
            Category::CouplingLines,
            bag! {
                "name" => "c0",
                "type" => "CouplingCavity",
                "start_pos" => Point::zero(),
                "end_pos" => Point::new(400., 0.),
                "length" => 900.,
            },
        ),
        (
            Category::ReadoutLines,
            bag! {
                "name" => "r0",
                "type" => "ReadoutCavity",
                "start_pos" => Point::zero(),
                "end_pos" => Point::new(0., 300.),
            },
        ),
        (
            Category::ControlLines,
            bag! {
                "name" => "z0",
                "type" => "FluxLine",
                "start_pos" => Point::zero(),
                "end_pos" => Point::new(200., 200.),
            },
        ),
        (
            Category::TransmissionLines,
            bag! {
                "name" => "t0",
                "type" => "TransmissionPath",
                "path" => vec![Point::zero(), Point::zero(), Point::new(0., 500.)],
            },
        ),
        (
            Category::Crossovers,
            bag! {
                "name" => "x0",
                "type" => "InsulatingSheet",
                "chip" => "chip1",
                "position" => Point::new(200., 0.),
                "rotation" => 30.,
            },
        ),
        (
            Category::AirBridges,
            bag! { "name" => "ab0", "type" => "AirBridge", "position" => Point::new(0., 250.) },
        ),
        (
            Category::IndiumBumps,
            bag! {
                "name" => "ib0",
                "type" => "IndiumBump",
                "position" => Point::new(-500., 500.),
                "radius" => 15.,
            },
        ),
        (
            Category::Pins,
            bag! { "name" => "p0", "type" => "LaunchPad", "position" => Point::new(-800., 0.) },
        ),
        (
            Category::Others,
            bag! {
                "name" => "o0",
                "type" => "Polygons",
                "polygons" => vec![vec![Point::zero(), Point::new(1., 0.), Point::new(0., 1.)]],
            },
        ),
    ]
}

#[test]
fn test_complete_is_idempotent() {
    for (category, partial) in sample_bags() {
        let once = complete(category, &partial, &cfg()).unwrap();
        let twice = complete(category, &once, &cfg()).unwrap();
        assert_eq!(once, twice, "{category} entry is not stable under completion");
    }
}

#[test]
fn test_complete_does_not_touch_input() {
    let partial = bag! { "name" => "q0", "type" => "Transmon" };
    let copy = partial.clone();
    let done = complete(Category::Qubits, &partial, &cfg()).unwrap();
    assert_eq!(partial, copy);
    assert!(done.contains_key("coupling_pins"));
}

#[test]
fn test_supplied_values_win() {
    let partial = bag! { "name" => "q0", "type" => "Transmon", "width" => 123. };
    let q: Qubit = complete_typed(&partial, &cfg()).unwrap();
    assert_eq!(q.width, 123.);
    assert_eq!(q.height, 300.);
    assert_eq!(q.chip, DEFAULT_CHIP);
}

#[test]
fn test_unknown_keys_survive() {
    let partial = bag! { "name" => "q0", "type" => "Transmon", "frequency" => 5.2 };
    let done = complete(Category::Qubits, &partial, &cfg()).unwrap();
    assert_eq!(done.get("frequency"), Some(&OptionValue::Float(5.2)));
}

#[test]
fn test_transmon_pins() {
    let partial = bag! { "name" => "q0", "type" => "Transmon", "gds_pos" => Point::new(1000., 0.) };
    let q: Qubit = complete_typed(&partial, &cfg()).unwrap();
    // Half extents of the gap ring are (230, 180).
    assert_eq!(
        q.coupling_pins,
        vec![
            Point::new(770., 0.),
            Point::new(1230., 0.),
            Point::new(1000., 180.),
            Point::new(1000., -180.),
        ]
    );
    assert_eq!(q.readout_pins, vec![Point::new(1230., 180.)]);
}

#[test]
fn test_missing_field() {
    let partial = bag! { "name" => "c0", "type" => "CouplingCavity", "start_pos" => Point::zero(), "end_pos" => Point::new(1., 0.) };
    let err = complete(Category::CouplingLines, &partial, &cfg()).unwrap_err();
    match err.source() {
        ErrorSource::MissingField { component, field } => {
            assert_eq!(component, "c0");
            assert_eq!(field, "length");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(
        err.context(),
        &[ErrorContext::CompleteComponent {
            category: Category::CouplingLines,
            name: ArcStr::from("c0"),
        }]
    );

    let partial = bag! { "name" => "q0" };
    let err = complete(Category::Qubits, &partial, &cfg()).unwrap_err();
    assert!(matches!(err.source(), ErrorSource::MissingField { .. }));

    let partial = bag! { "name" => "q0", "type" => "Fluxonium" };
    let err = complete(Category::Qubits, &partial, &cfg()).unwrap_err();
    assert!(matches!(err.source(), ErrorSource::InvalidOption(_)));
}

#[test]
fn test_collection_names_and_duplicates() {
    let collection = bag! {
        "q0" => bag! { "type" => "Transmon" },
        "q1" => bag! { "type" => "Transmon", "name" => "qa" },
    };
    let done: Collection<Qubit> = complete_collection(&collection, &cfg()).unwrap();
    let names: Vec<_> = done.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, ["q0", "qa"]);

    let collection = bag! {
        "a" => bag! { "type" => "Transmon", "name" => "q" },
        "b" => bag! { "type" => "Transmon", "name" => "q" },
    };
    let err = complete_collection::<Qubit>(&collection, &cfg()).unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::DuplicateName { category: Category::Qubits, .. }
    ));
}

#[test]
fn test_chip_layer_derived() {
    let partial = bag! {
        "name" => "chip7",
        "type" => "RecChip",
        "start_pos" => Point::zero(),
        "end_pos" => Point::new(10., 10.),
    };
    let a: Chip = complete_typed(&partial, &cfg()).unwrap();
    let b: Chip = complete_typed(&partial, &cfg()).unwrap();
    assert_eq!(a.layer, b.layer);
    assert!((1..=255).contains(&a.layer));
}

#[test]
fn test_draw_component() {
    let partial = bag! { "name" => "b0", "type" => "AirBridge", "position" => Point::new(5., 5.), "rotation" => 90. };
    let bridge: AirBridge = complete_typed(&partial, &cfg()).unwrap();
    let cell = draw_component(&bridge, &cfg()).unwrap();
    assert_eq!(cell.name(), "b0");
    assert_eq!(cell.elems().count(), 3);
}

#[test]
fn test_category_names() {
    for category in Category::ALL {
        assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
    }
    assert!("bridges".parse::<Category>().is_err());
}

#[test]
fn test_complete_many() {
    let collection = bag! {
        "q0" => bag! { "type" => "Transmon", "gds_pos" => Point::new(0., 0.) },
        "q1" => bag! { "type" => "Xmon", "gds_pos" => Point::new(2000., 0.) },
    };
    let done = complete_many(Category::Qubits, &collection, &cfg()).unwrap();
    assert_eq!(done.len(), 2);
    for (key, entry) in done.iter() {
        let entry = entry.as_bag().unwrap();
        assert_eq!(entry.require_str("name").unwrap(), key.as_str());
        assert!(entry.contains_key("coupling_pins"));
    }
    let again = complete_many(Category::Qubits, &done, &cfg()).unwrap();
    assert_eq!(again, done);
}
