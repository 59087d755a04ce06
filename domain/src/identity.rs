//! Identity generation for records created without a caller-supplied id.

/// Produces the identity for the `sequence`-th record appended to a store.
///
/// Sequences start at 1 and are handed out by the store, which guarantees
/// they are never repeated within a process lifetime.
pub trait IdentityAssigner<Id>: Send + Sync {
    fn assign(&self, sequence: u64) -> Id;
}

/// Formats sequences as `prefix` followed by a zero-padded counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedCounter {
    prefix: String,
    width: usize,
}

impl PrefixedCounter {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }

    /// Counters wider than `width` are written in full, never truncated.
    pub fn format(&self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }
}

impl<Id: From<String>> IdentityAssigner<Id> for PrefixedCounter {
    fn assign(&self, sequence: u64) -> Id {
        Id::from(self.format(sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PROFILE_ID_PREFIX, PROFILE_ID_WIDTH};
    use crate::ProfileId;

    #[test]
    fn pads_to_width() {
        let counter = PrefixedCounter::new(PROFILE_ID_PREFIX, PROFILE_ID_WIDTH);
        assert_eq!(counter.format(1), "u001");
        assert_eq!(counter.format(42), "u042");
        assert_eq!(counter.format(999), "u999");
    }

    #[test]
    fn overflowing_width_keeps_all_digits() {
        let counter = PrefixedCounter::new("u", 3);
        assert_eq!(counter.format(1000), "u1000");
    }

    #[test]
    fn assigns_typed_ids() {
        let counter = PrefixedCounter::new("u", 3);
        let id: ProfileId = counter.assign(2);
        assert_eq!(id, ProfileId::new("u002"));
    }
}
