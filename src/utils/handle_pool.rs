use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{Handle, HandleIndex};

#[derive(PartialEq, Eq)]
struct InverseHandleIndex(HandleIndex);

impl PartialOrd for InverseHandleIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InverseHandleIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

/// `HandlePool` manages the manipulations of a typed `Handle` collection, which
/// are created with a continuous `index` field. It also have the ability to find
/// out the current status of a specified `Handle`.
///
/// Versions are odd while a handle is alive and even once it has been freed, so a
/// recycled index never compares equal to a stale handle.
pub struct HandlePool<H> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<InverseHandleIndex>,
    _phantom: PhantomData<H>,
}

impl<H> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }
}

impl<H> HandlePool<H>
where
    H: Borrow<Handle> + From<Handle> + Copy,
{
    /// Constructs a new, empty `HandlePool`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a unused `Handle`.
    pub fn create(&mut self) -> H {
        if let Some(InverseHandleIndex(index)) = self.frees.pop() {
            let index = index as usize;
            self.versions[index] += 1;
            Handle::new(index as HandleIndex, self.versions[index]).into()
        } else {
            self.versions.push(1);
            Handle::new(self.versions.len() as HandleIndex - 1, 1).into()
        }
    }

    /// Returns true if this `Handle` was created by `HandlePool`, and has not been
    /// freed yet.
    pub fn contains(&self, handle: H) -> bool {
        let handle: Handle = *Borrow::<Handle>::borrow(&handle);
        let index = handle.index() as usize;
        index < self.versions.len()
            && (self.versions[index] & 0x1) == 1
            && self.versions[index] == handle.version()
    }

    /// Recycles the `Handle` index, and mark its version as dead.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.contains(handle) {
            return false;
        }

        let index = Borrow::<Handle>::borrow(&handle).index();
        self.versions[index as usize] += 1;
        self.frees.push(InverseHandleIndex(index));
        true
    }

    /// Returns the total number of alive handle in this `HandlePool`.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    /// Returns true if there is no alive handle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    impl_handle!(PoolHandle);

    #[test]
    fn recycle() {
        let mut pool: HandlePool<PoolHandle> = HandlePool::new();
        let h1 = pool.create();
        let h2 = pool.create();
        assert_eq!(h1.index(), 0);
        assert_eq!(h2.index(), 1);
        assert_eq!(pool.len(), 2);

        assert!(pool.free(h1));
        assert!(!pool.contains(h1));
        assert!(!pool.free(h1));

        let h3 = pool.create();
        assert_eq!(h3.index(), 0);
        assert_eq!(h3.version(), 3);
        assert!(pool.contains(h3));
        assert!(!pool.contains(h1));
        assert_eq!(pool.len(), 2);
    }
}
