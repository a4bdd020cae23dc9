use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic ordering key for consumer versions.
///
/// Assigned at version-creation time, independent of wall-clock time, and
/// strictly increasing per pacticipant. All "previous"/"next" history
/// comparisons use this key — never timestamps, never semantic parsing of
/// version numbers.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VersionOrder(u64);

impl VersionOrder {
    /// The ordering key for the first version of a pacticipant.
    pub const FIRST: Self = Self(0);

    /// Create from a raw ordering value.
    pub const fn new(order: u64) -> Self {
        Self(order)
    }

    /// The raw ordering value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The ordering key that follows this one.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for VersionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_is_strictly_greater() {
        let order = VersionOrder::FIRST;
        assert!(order.next() > order);
        assert_eq!(order.next().value(), 1);
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        assert!(VersionOrder::new(2) < VersionOrder::new(10));
    }
}
