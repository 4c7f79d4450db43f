use std::borrow::Borrow;

use super::handle::Handle;

/// Sparse storage indexed by `Handle`, used by backends to keep per-object data.
#[derive(Debug)]
pub struct DataVec<T>
where
    T: Sized + Clone,
{
    pub buf: Vec<Option<T>>,
    pub versions: Vec<u32>,
}

impl<T> Default for DataVec<T>
where
    T: Sized + Clone,
{
    fn default() -> Self {
        DataVec {
            buf: Vec::new(),
            versions: Vec::new(),
        }
    }
}

impl<T> DataVec<T>
where
    T: Sized + Clone,
{
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get<H>(&self, handle: H) -> Option<&T>
    where
        H: Borrow<Handle>,
    {
        let index = handle.borrow().index() as usize;
        if let Some(&v) = self.versions.get(index) {
            if v == handle.borrow().version() {
                return self.buf[index].as_ref();
            }
        }

        None
    }

    pub fn create<H>(&mut self, handle: H, value: T)
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;

        if self.buf.len() <= index {
            self.buf.resize(index + 1, None);
            self.versions.resize(index + 1, 1);
        }

        self.buf[index] = Some(value);
        self.versions[index] = handle.version();
    }

    pub fn free<H>(&mut self, handle: H) -> Option<T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        if self.versions.get(index) != Some(&handle.version()) {
            return None;
        }

        self.buf[index].take()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.buf.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stale_handles() {
        let mut vec = DataVec::new();
        let h1 = Handle::new(2, 1);
        vec.create(h1, "a");
        assert_eq!(vec.get(h1), Some(&"a"));
        assert_eq!(vec.get(Handle::new(2, 3)), None);
        assert_eq!(vec.free(Handle::new(2, 3)), None);
        assert_eq!(vec.len(), 1);

        assert_eq!(vec.free(h1), Some("a"));
        assert_eq!(vec.get(h1), None);
        assert!(vec.is_empty());
    }
}
