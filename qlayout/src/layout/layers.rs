//! Layer assignment.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;

/// A GDS layer and datatype pair.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LayerSpec {
    pub layer: i16,
    pub datatype: i16,
}

impl LayerSpec {
    #[inline]
    pub const fn new(layer: i16, datatype: i16) -> Self {
        Self { layer, datatype }
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
///
/// Chosen over [`std::hash::DefaultHasher`], whose output may change between releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

/// The layer number of the chip named `name`.
///
/// A pure function of the name and the configured layer range,
/// stable across runs and platforms.
pub fn chip_layer(name: &str, cfg: &LayoutConfig) -> i16 {
    let lo = cfg.layer_min.min(cfg.layer_max);
    let hi = cfg.layer_min.max(cfg.layer_max);
    let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
    let offset = fnv1a(name.as_bytes()) % span;
    (i64::from(lo) + offset as i64) as i16
}

/// The layer spec that every shape of chip `name` is flattened onto.
#[inline]
pub fn chip_layer_spec(name: &str, cfg: &LayoutConfig) -> LayerSpec {
    LayerSpec::new(chip_layer(name, cfg), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_chip_layer_in_range() {
        let cfg = LayoutConfig::default();
        for name in ["chip0", "chip1", "main", "", "a very long chip name"] {
            let layer = chip_layer(name, &cfg);
            assert!((1..=255).contains(&layer), "layer {layer} for {name}");
            assert_eq!(layer, chip_layer(name, &cfg));
        }
        let narrow = LayoutConfig::builder()
            .layer_min(7)
            .layer_max(7)
            .build()
            .unwrap();
        assert_eq!(chip_layer("anything", &narrow), 7);
    }
}
