//! Depth-annotated items produced by flattening a tree.

use crate::domain::error::{DomainError, DomainResult};

/// Validates an externally supplied depth.
pub fn checked_depth(value: i64) -> DomainResult<usize> {
    usize::try_from(value).map_err(|_| DomainError::NegativeDepth(value))
}

/// Immutable `(payload, depth)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeListItem<T> {
    data: T,
    depth: usize,
}

impl<T> TreeListItem<T> {
    /// Fails with [`DomainError::NegativeDepth`] if `depth < 0`.
    pub fn new(data: T, depth: i64) -> DomainResult<Self> {
        Ok(Self::at(data, checked_depth(depth)?))
    }

    pub(crate) fn at(data: T, depth: usize) -> Self {
        Self { data, depth }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_negative_depth_then_construction_fails() {
        assert_eq!(
            TreeListItem::new("x", -1),
            Err(DomainError::NegativeDepth(-1))
        );
    }

    #[test]
    fn given_zero_depth_then_construction_succeeds() {
        let item = TreeListItem::new("x", 0).unwrap();
        assert_eq!(item.depth(), 0);
        assert_eq!(*item.data(), "x");
    }
}
