//! Typed element storage with stable indices.

use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::StableVec;

use crate::{
    hsize,
    handle::Handle,
};


/// An arena that maps handles to elements, backed by a [`StableVec`].
///
/// Removing an element leaves a hole instead of shifting the following
/// elements, so the handles of all other elements stay valid. An element can
/// be put back into its old slot with [`DenseMap::insert_at`], which is what
/// undo and redo rely on to reconstruct elements under their original handle.
#[derive(Clone)]
pub struct DenseMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> DenseMap<H, T> {
    /// Creates an empty `DenseMap`.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    /// Appends an element and returns its handle.
    pub fn push(&mut self, elem: T) -> H {
        H::from_usize(self.vec.push(elem))
    }

    /// Puts `elem` into the slot of `handle`, which must be empty.
    pub fn insert_at(&mut self, handle: H, elem: T) {
        let idx = handle.to_usize();
        assert!(
            !self.vec.has_element_at(idx),
            "bug: slot of {:?} is already occupied",
            handle,
        );
        self.vec.reserve_for(idx);
        self.vec.insert(idx, elem);
    }

    /// Removes and returns the element of `handle`, if it exists.
    pub fn remove(&mut self, handle: H) -> Option<T> {
        self.vec.remove(handle.to_usize())
    }

    /// The handle the next call to `push` will return.
    pub fn next_push_handle(&self) -> H {
        H::from_usize(self.vec.next_push_index())
    }

    pub fn last_handle(&self) -> Option<H> {
        self.vec.find_last_index().map(H::from_usize)
    }

    pub fn num_elements(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn is_empty(&self) -> bool {
        self.vec.num_elements() == 0
    }

    pub fn contains_handle(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    /// Iterates over all `(handle, element)` pairs with increasing handle.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.vec.iter().map(|(idx, elem)| (H::from_usize(idx), elem))
    }

    pub fn handles(&self) -> impl Iterator<Item = H> + '_ {
        self.vec.indices().map(H::from_usize)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.vec.values()
    }

    /// Removes all elements. Handle indices start at 0 again afterwards.
    pub fn clear(&mut self) {
        self.vec.clear();
    }
}

impl<H: Handle, T> Default for DenseMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for DenseMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("bug (broken reference): {:?} does not exist", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for DenseMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("bug (broken reference): {:?} does not exist", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for DenseMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
