//! Identities of mesh elements and the registry that maps them to handles.
//!
//! Handles are positions in storage; ids are the *identity* of an element.
//! When an element is deleted and later reconstructed by undo or redo, it
//! gets its old id back, so everything that remembered the id (selections,
//! tools, ...) finds it again.

use derive_more::{Display, From};
use fxhash::FxHashMap;

use crate::handle::Handle;


/// An opaque, session-unique identifier.
#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display(fmt = "#{}", _0)]
pub struct Id(u64);

impl Id {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Source of fresh [`Id`]s.
///
/// There is no global counter: a generator lives as long as the editing
/// session and is handed to every operation that creates elements.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an id that this generator has never returned before.
    pub fn next_id(&mut self) -> Id {
        let out = Id(self.next);
        self.next += 1;
        out
    }
}

/// Maps ids to the handles of the elements carrying them.
#[derive(Debug, Clone)]
pub struct IdMap<H: Handle> {
    map: FxHashMap<Id, H>,
}

impl<H: Handle> IdMap<H> {
    pub fn new() -> Self {
        Self { map: FxHashMap::default() }
    }

    /// Registers `handle` under `id`. Panics if `id` is already registered.
    pub fn insert(&mut self, id: Id, handle: H) {
        let old = self.map.insert(id, handle);
        assert!(old.is_none(), "bug: id {} registered twice ({:?} and {:?})", id, old, handle);
    }

    /// Unregisters `id`. Panics if it wasn't registered.
    pub fn remove(&mut self, id: Id) -> H {
        match self.map.remove(&id) {
            Some(h) => h,
            None => panic!("bug: id {} is not registered", id),
        }
    }

    pub fn get(&self, id: Id) -> Option<H> {
        self.map.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<H: Handle> Default for IdMap<H> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::FaceHandle;

    #[test]
    fn generator_is_unique() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(format!("{}", b), "#1");
    }

    #[test]
    fn lookup() {
        let mut ids = IdGenerator::new();
        let mut map = IdMap::new();
        let id = ids.next_id();

        assert_eq!(map.get(id), None);
        map.insert(id, FaceHandle::new(3));
        assert_eq!(map.get(id), Some(FaceHandle::new(3)));
        assert_eq!(map.remove(id), FaceHandle::new(3));
        assert!(map.is_empty());
    }

    #[test]
    #[should_panic]
    fn double_insert() {
        let mut map = IdMap::new();
        map.insert(Id::from(0), FaceHandle::new(0));
        map.insert(Id::from(0), FaceHandle::new(1));
    }
}
