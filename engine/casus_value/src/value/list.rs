//! Shared list storage with O(1) tails.

use std::fmt;

use super::{Heap, Value};

/// An ordered sequence value.
///
/// A `ListValue` is a view (`start..`) into shared storage. Taking the tail
/// moves the start offset and shares the backing vector, so peeling a list
/// apart with cons patterns allocates nothing.
#[derive(Clone)]
pub struct ListValue {
    items: Heap<Vec<Value>>,
    start: usize,
}

impl ListValue {
    pub(crate) fn new(items: Vec<Value>) -> Self {
        ListValue {
            items: Heap::new(items),
            start: 0,
        }
    }

    /// The visible elements.
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        self.items.get(self.start..).unwrap_or(&[])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// First element, if any.
    #[inline]
    pub fn first(&self) -> Option<&Value> {
        self.as_slice().first()
    }

    /// Everything after the first element, sharing storage.
    ///
    /// Returns `None` for an empty list.
    pub fn tail(&self) -> Option<ListValue> {
        if self.is_empty() {
            return None;
        }
        Some(ListValue {
            items: self.items.clone(),
            start: self.start.saturating_add(1),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.as_slice().iter()
    }

    /// Copy the visible elements into a fresh vector.
    pub fn to_vec(&self) -> Vec<Value> {
        self.as_slice().to_vec()
    }
}

impl PartialEq for ListValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl fmt::Debug for ListValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a ListValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
