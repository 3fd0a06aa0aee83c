use qlayout::config::LayoutConfig;
use qlayout::error::ErrorSource;
use qlayout::layout::layers::chip_layer;
use qlayout::topology::direction;

#[test]
fn test_direction_is_anti_symmetric() {
    for x in -3..=3 {
        for y in -3..=3 {
            let a = (x, y);
            for b in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                let ab = direction(a, b).unwrap();
                let ba = direction(b, a).unwrap();
                assert_eq!(ab.other(), ba, "{a:?} vs {b:?}");
            }
        }
    }
}

#[test]
fn test_two_qubit_directions() {
    assert_eq!(direction((0, 0), (1, 0)).unwrap().as_str(), "left");
    assert_eq!(direction((1, 0), (0, 0)).unwrap().as_str(), "right");
}

#[test]
fn test_non_adjacent_rejected() {
    let err = direction((0, 0), (1, 1)).unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::NotAdjacent { a: (0, 0), b: (1, 1) }
    ));
}

#[test]
fn test_chip_layer_is_deterministic() {
    let cfg = LayoutConfig::default();
    let names = ["chip0", "chip1", "top_chip", "bottom_chip", ""];
    let first: Vec<i16> = names.iter().map(|n| chip_layer(n, &cfg)).collect();
    for _ in 0..10 {
        let again: Vec<i16> = names.iter().map(|n| chip_layer(n, &cfg)).collect();
        assert_eq!(again, first);
    }
    for layer in first {
        assert!((cfg.layer_min..=cfg.layer_max).contains(&layer));
    }
}
