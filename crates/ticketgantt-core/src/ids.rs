//! Sequential ticket id allocation
//!
//! Ids are `prefix + zero-padded number` with a minimum width of three digits
//! (`T-001`, `T-999`, `T-1000`). Allocation reads one snapshot of the ids in
//! use and hands out `count` consecutive numbers after the highest one.
//! Two sessions allocating from the same store at the same time can still
//! collide; the store is expected to have a single writer.

use crate::{TicketError, TicketId};

/// Prefix of every ticket id
pub const ID_PREFIX: &str = "T-";

/// Minimum digit count of the numeric suffix
pub const MIN_DIGITS: usize = 3;

/// Positive numeric suffix of `id`, or `None` when the id is not `prefix + digits`
pub fn parse_number(prefix: &str, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().filter(|n| *n > 0)
}

/// Allocator for `T-###` ids
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdAllocator {
    prefix: String,
    min_digits: usize,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            prefix: ID_PREFIX.into(),
            min_digits: MIN_DIGITS,
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different prefix (ids with other prefixes are ignored)
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Format a number with the prefix and minimum padding
    pub fn format(&self, number: u64) -> TicketId {
        TicketId::new(format!(
            "{}{:0width$}",
            self.prefix,
            number,
            width = self.min_digits
        ))
    }

    /// Highest valid number among `existing` (0 when none is valid)
    pub fn max_number<S: AsRef<str>>(&self, existing: &[S]) -> u64 {
        existing
            .iter()
            .filter_map(|id| parse_number(&self.prefix, id.as_ref()))
            .max()
            .unwrap_or(0)
    }

    /// Next `count` ids after the highest valid id in `existing`
    ///
    /// Invalid ids are ignored. The result is a pure function of the input.
    /// Fails when the numbers after the highest id no longer fit in a `u64`.
    pub fn next_ids<S: AsRef<str>>(
        &self,
        existing: &[S],
        count: usize,
    ) -> Result<Vec<TicketId>, TicketError> {
        let max = self.max_number(existing);
        (1..=count as u64)
            .map(|i| max.checked_add(i).map(|n| self.format(n)).ok_or_else(exhausted))
            .collect()
    }

    /// The single next id
    pub fn next_id<S: AsRef<str>>(&self, existing: &[S]) -> Result<TicketId, TicketError> {
        self.max_number(existing)
            .checked_add(1)
            .map(|n| self.format(n))
            .ok_or_else(exhausted)
    }
}

fn exhausted() -> TicketError {
    TicketError::InvalidInput("id space exhausted".into())
}
