//! Option Bags: nested, insertion-ordered parameter maps.
//!
//! Every component is described by an [`OptionBag`]. Bags are plain values:
//! cloning one is a deep copy, so no two components ever alias the same options.

use std::fmt::Display;

use arcstr::ArcStr;
use indexmap::IndexMap;
use itertools::Itertools;
use qgeom::Point;

use crate::error::{ErrorSource, Result};

pub mod literal;
pub mod serde_impls;
pub mod typed;


/// A single option value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(ArcStr),
    List(Vec<OptionValue>),
    Tuple(Vec<OptionValue>),
    Dict(OptionBag),
}

/// An insertion-ordered mapping from option names to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionBag(IndexMap<ArcStr, OptionValue>);

/// The dispatch key of an [`OptionBag`]: its sorted top-level keys joined by `__`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Signature(ArcStr);

impl Signature {
    pub fn of(bag: &OptionBag) -> Self {
        Self(ArcStr::from(bag.keys().map(|k| k.as_str()).sorted().join("__")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> ArcStr {
        self.0
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&ArcStr> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Int(i) => Some(*i as f64),
            OptionValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bag(&self) -> Option<&OptionBag> {
        match self {
            OptionValue::Dict(bag) => Some(bag),
            _ => None,
        }
    }

    /// Returns the items of a list or tuple.
    pub fn as_seq(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) | OptionValue::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value as a 2D point, accepting any two-number sequence.
    pub fn as_point(&self) -> Option<Point> {
        match self.as_seq()? {
            [x, y] => Some(Point::new(x.as_f64()?, y.as_f64()?)),
            _ => None,
        }
    }

    /// Returns `true` if the value carries no information.
    ///
    /// `None`, empty strings, and empty sequences or bags are all considered empty.
    pub fn is_empty(&self) -> bool {
        match self {
            OptionValue::None => true,
            OptionValue::Str(s) => s.is_empty(),
            OptionValue::List(items) | OptionValue::Tuple(items) => items.is_empty(),
            OptionValue::Dict(bag) => bag.is_empty(),
            _ => false,
        }
    }
}

impl OptionBag {
    #[inline]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self(IndexMap::with_capacity(n))
    }

    /// Inserts a value, keeping the position of an existing key.
    pub fn insert(
        &mut self,
        key: impl Into<ArcStr>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.0.insert(key.into(), value.into())
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.0.get_mut(key)
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.0.shift_remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArcStr> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &OptionValue)> {
        self.0.iter()
    }

    pub fn signature(&self) -> Signature {
        Signature::of(self)
    }

    pub fn get_str(&self, key: &str) -> Option<&ArcStr> {
        self.get(key).and_then(OptionValue::as_str)
    }

    pub fn get_bag(&self, key: &str) -> Option<&OptionBag> {
        self.get(key).and_then(OptionValue::as_bag)
    }

    /// Returns the nested bag under `key`, or an error naming the key.
    pub fn require_bag(&self, key: &str) -> Result<&OptionBag> {
        self.get_bag(key).ok_or_else(|| {
            ErrorSource::InvalidOption(format!("expected `{key}` to be a dict of options")).into()
        })
    }

    /// Returns the number under `key`, or an error naming the key.
    pub fn require_f64(&self, key: &str) -> Result<f64> {
        self.get(key).and_then(OptionValue::as_f64).ok_or_else(|| {
            ErrorSource::InvalidOption(format!("expected `{key}` to be a number")).into()
        })
    }

    /// Returns the string under `key`, or an error naming the key.
    pub fn require_str(&self, key: &str) -> Result<&ArcStr> {
        self.get_str(key).ok_or_else(|| {
            ErrorSource::InvalidOption(format!("expected `{key}` to be a string")).into()
        })
    }

    /// Returns the point under `key`, or an error naming the key.
    pub fn require_point(&self, key: &str) -> Result<Point> {
        self.get(key).and_then(OptionValue::as_point).ok_or_else(|| {
            ErrorSource::InvalidOption(format!("expected `{key}` to be an (x, y) pair")).into()
        })
    }

    /// Returns a copy of `defaults` with every entry of `self` laid over it.
    ///
    /// Keys from `self` win. Keys only present in `self` are appended after the defaults.
    pub fn merged_over(&self, defaults: &OptionBag) -> OptionBag {
        let mut out = defaults.clone();
        for (k, v) in self.iter() {
            out.0.insert(k.clone(), v.clone());
        }
        out
    }
}

impl<'a> IntoIterator for &'a OptionBag {
    type Item = (&'a ArcStr, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, ArcStr, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for OptionBag {
    type Item = (ArcStr, OptionValue);
    type IntoIter = indexmap::map::IntoIter<ArcStr, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<ArcStr>, V: Into<OptionValue>> FromIterator<(K, V)> for OptionBag {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(ArcStr::from(value))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(ArcStr::from(value))
    }
}

impl From<ArcStr> for OptionValue {
    fn from(value: ArcStr) -> Self {
        Self::Str(value)
    }
}

impl From<&ArcStr> for OptionValue {
    fn from(value: &ArcStr) -> Self {
        Self::Str(value.clone())
    }
}

impl From<Point> for OptionValue {
    fn from(value: Point) -> Self {
        Self::Tuple(vec![Self::Float(value.x), Self::Float(value.y)])
    }
}

impl From<(i64, i64)> for OptionValue {
    fn from(value: (i64, i64)) -> Self {
        Self::Tuple(vec![Self::Int(value.0), Self::Int(value.1)])
    }
}

impl From<OptionBag> for OptionValue {
    fn from(value: OptionBag) -> Self {
        Self::Dict(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::None,
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", optlit::Literal::from(self))
    }
}

impl Display for OptionBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", optlit::Literal::from(self))
    }
}
