//! Handles: copyable, typed indices that refer to elements of a mesh or to
//! nodes of the octree.
//!
//! Elements never hold references to each other. Instead, every cross-link
//! (edge → face, face → octree node, ...) is stored as a handle, which is just
//! an index into the arena that owns the element. Handles stay valid as long
//! as the element lives, even if the underlying storage reallocates.

use std::{fmt, hash::Hash};

use optional::{Noned, OptEq, Optioned};
use static_assertions::assert_eq_size;

use crate::hsize;


/// Compact optional handle. Uses `hsize::max_value()` as "none" marker so that
/// an `Opt<H>` has exactly the size of `H`.
pub(crate) type Opt<H> = Optioned<H>;

/// Converts a std `Option` into the compact [`Opt`].
#[inline(always)]
pub(crate) fn opt<H: Handle>(o: Option<H>) -> Opt<H> {
    match o {
        Some(h) => Opt::some(h),
        None => Opt::none(),
    }
}


/// Types that can be used as handles.
///
/// A handle is a thin wrapper around an [`hsize`] index. The index is used to
/// look up the element in the storage of whatever owns it. The maximum index
/// is reserved as the "none" marker of [`Opt`].
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + Hash + Noned {
    /// Creates a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of this handle.
    fn idx(&self) -> hsize;

    /// Helper to create a handle directly from an `usize`.
    ///
    /// Panics if the value does not fit into `hsize`.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(
            raw < hsize::max_value() as usize,
            "handle index {} does not fit into `hsize` (enable `large-handle`?)",
            raw,
        );
        Self::new(raw as hsize)
    }

    /// Helper to get the index as `usize`.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl Noned for $name {
            #[inline(always)]
            fn is_none(&self) -> bool {
                self.0 == hsize::max_value()
            }

            #[inline(always)]
            fn get_none() -> Self {
                $name(hsize::max_value())
            }
        }

        impl OptEq for $name {
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.0)
            }
        }
    }
}

make_handle_type! {
    /// Refers to a vertex. Its index is also the vertex's index in the
    /// flattened vertex buffer.
    VertexHandle = "V";
}
make_handle_type! {
    /// Refers to an edge of a winged-edge mesh.
    EdgeHandle = "E";
}
make_handle_type! {
    /// Refers to a triangular face.
    FaceHandle = "F";
}
make_handle_type! {
    /// Refers to a node of the octree.
    NodeHandle = "N";
}

assert_eq_size!(VertexHandle, hsize);
assert_eq_size!(EdgeHandle, hsize);
assert_eq_size!(Opt<EdgeHandle>, EdgeHandle);
assert_eq_size!(Opt<FaceHandle>, FaceHandle);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_roundtrip() {
        let e = EdgeHandle::new(3);
        assert_eq!(opt(Some(e)).into_option(), Some(e));
        assert_eq!(opt::<EdgeHandle>(None).into_option(), None);
        assert!(Opt::<FaceHandle>::none().is_none());
    }

    #[test]
    fn opt_in_generic_code() {
        fn link<H: Handle>(idx: Option<hsize>) -> Opt<H> {
            opt(idx.map(H::new))
        }

        assert_eq!(link::<VertexHandle>(Some(2)).into_option(), Some(VertexHandle::new(2)));
        assert!(link::<NodeHandle>(None).is_none());
        assert!(NodeHandle::get_none().is_none());
    }

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", VertexHandle::new(7)), "V7");
        assert_eq!(format!("{:?}", NodeHandle::new(0)), "N0");
    }

    #[test]
    #[should_panic]
    fn from_usize_overflow() {
        let _ = FaceHandle::from_usize(hsize::max_value() as usize);
    }
}
