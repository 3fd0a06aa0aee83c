//! Conversion between Option Bags and the persisted literal text format.

use arcstr::ArcStr;
use optlit::Literal;

use super::{OptionBag, OptionValue};
use crate::error::{ErrorSource, QlayoutError, Result};

impl From<&OptionValue> for Literal {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::None => Literal::None,
            OptionValue::Bool(b) => Literal::Bool(*b),
            OptionValue::Int(i) => Literal::Int(*i),
            OptionValue::Float(x) => Literal::Float(*x),
            OptionValue::Str(s) => Literal::Str(s.to_string()),
            OptionValue::List(items) => Literal::List(items.iter().map(Literal::from).collect()),
            OptionValue::Tuple(items) => Literal::Tuple(items.iter().map(Literal::from).collect()),
            OptionValue::Dict(bag) => Literal::from(bag),
        }
    }
}

impl From<&OptionBag> for Literal {
    fn from(value: &OptionBag) -> Self {
        Literal::Dict(
            value
                .iter()
                .map(|(k, v)| (Literal::Str(k.to_string()), Literal::from(v)))
                .collect(),
        )
    }
}

impl TryFrom<Literal> for OptionValue {
    type Error = QlayoutError;

    fn try_from(value: Literal) -> Result<Self> {
        Ok(match value {
            Literal::None => OptionValue::None,
            Literal::Bool(b) => OptionValue::Bool(b),
            Literal::Int(i) => OptionValue::Int(i),
            Literal::Float(x) => OptionValue::Float(x),
            Literal::Str(s) => OptionValue::Str(ArcStr::from(s)),
            Literal::List(items) => OptionValue::List(
                items
                    .into_iter()
                    .map(OptionValue::try_from)
                    .collect::<Result<_>>()?,
            ),
            Literal::Tuple(items) => OptionValue::Tuple(
                items
                    .into_iter()
                    .map(OptionValue::try_from)
                    .collect::<Result<_>>()?,
            ),
            dict @ Literal::Dict(_) => OptionValue::Dict(OptionBag::try_from(dict)?),
        })
    }
}

impl TryFrom<Literal> for OptionBag {
    type Error = QlayoutError;

    fn try_from(value: Literal) -> Result<Self> {
        let Literal::Dict(pairs) = value else {
            return Err(
                ErrorSource::InvalidOption("expected a dict at the top level".to_string()).into(),
            );
        };
        let mut bag = OptionBag::with_capacity(pairs.len());
        for (k, v) in pairs {
            let Literal::Str(k) = k else {
                return Err(ErrorSource::InvalidOption(format!(
                    "option keys must be strings, found {k}"
                ))
                .into());
            };
            bag.insert(k, OptionValue::try_from(v)?);
        }
        Ok(bag)
    }
}

impl OptionBag {
    /// Parses a bag from its literal text form.
    pub fn parse(input: &str) -> Result<Self> {
        let lit = optlit::parse(input)?;
        OptionBag::try_from(lit)
    }
}
