//! Ownership of live designs.

use slotmap::{new_key_type, SlotMap};

use super::Design;

new_key_type! {
    /// A unique identifier for a [`Design`] in a [`DesignStore`].
    pub struct DesignKey;
}

/// Owns every live design of a session.
///
/// Designs are created and destroyed explicitly; operations on a design
/// borrow it from the store for their duration.
#[derive(Debug)]
pub struct DesignStore {
    designs: SlotMap<DesignKey, Design>,
}

impl Default for DesignStore {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DesignStore {
    pub fn new() -> Self {
        Self {
            designs: SlotMap::with_key(),
        }
    }

    #[inline]
    pub fn create(&mut self, design: Design) -> DesignKey {
        self.designs.insert(design)
    }

    #[inline]
    pub fn get(&self, key: DesignKey) -> Option<&Design> {
        self.designs.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: DesignKey) -> Option<&mut Design> {
        self.designs.get_mut(key)
    }

    /// Removes a design, returning it if it was live.
    #[inline]
    pub fn destroy(&mut self, key: DesignKey) -> Option<Design> {
        self.designs.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = DesignKey> + '_ {
        self.designs.keys()
    }
}
