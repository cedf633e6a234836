//! Growable storage with a fixed-increment growth policy.

use crate::error::ShellError;

/// A vector that grows by a fixed number of slots instead of doubling.
///
/// The logical capacity is tracked separately from the allocator's, so the
/// growth points are deterministic: a push at index `capacity - 1` fits, a push
/// at index `capacity` reserves exactly `increment` more slots before writing.
#[derive(Debug)]
pub(crate) struct GrowableBuffer<T> {
    items: Vec<T>,
    capacity: usize,
    increment: usize,
    growths: usize,
    what: &'static str,
}

impl<T> GrowableBuffer<T> {
    /// Allocate `capacity` slots up front. `what` names the buffer in diagnostics.
    pub(crate) fn with_capacity(
        capacity: usize,
        increment: usize,
        what: &'static str,
    ) -> Result<Self, ShellError> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| ShellError::OutOfMemory { what })?;
        Ok(Self {
            items,
            capacity,
            increment: increment.max(1),
            growths: 0,
            what,
        })
    }

    pub(crate) fn push(&mut self, item: T) -> Result<(), ShellError> {
        if self.items.len() == self.capacity {
            self.grow()?;
        }
        self.items.push(item);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), ShellError> {
        self.items
            .try_reserve_exact(self.increment)
            .map_err(|_| ShellError::OutOfMemory { what: self.what })?;
        self.capacity += self.increment;
        self.growths += 1;
        tracing::trace!(
            buffer = self.what,
            capacity = self.capacity,
            "grew buffer"
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn growths(&self) -> usize {
        self.growths
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_slot_does_not_grow() {
        let mut buf = GrowableBuffer::with_capacity(4, 2, "test").unwrap();
        for i in 0..4 {
            buf.push(i).unwrap();
        }
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.growths(), 0);
    }

    #[test]
    fn test_push_past_capacity_grows_by_increment() {
        let mut buf = GrowableBuffer::with_capacity(4, 2, "test").unwrap();
        for i in 0..5 {
            buf.push(i).unwrap();
        }
        assert_eq!(buf.capacity(), 6);
        assert_eq!(buf.growths(), 1);

        buf.push(5).unwrap();
        assert_eq!(buf.growths(), 1);
        buf.push(6).unwrap();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.growths(), 2);
        assert_eq!(buf.as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_zero_capacity_grows_on_first_push() {
        let mut buf = GrowableBuffer::with_capacity(0, 3, "test").unwrap();
        buf.push('a').unwrap();
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.growths(), 1);
        assert_eq!(buf.into_vec(), vec!['a']);
    }
}
