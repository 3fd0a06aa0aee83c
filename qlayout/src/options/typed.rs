//! Conversion between Option Bags and strongly-typed option structs.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::OptionBag;
use crate::error::Result;

impl OptionBag {
    /// Decodes the bag into a typed struct.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Encodes a typed struct as a bag.
    ///
    /// The struct must serialize as a map.
    pub fn from_typed<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(serde_json::from_value(value)?)
    }
}
