//! Card identities and the allocator that hands them out

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for a card
///
/// Keeps IDs small and contiguous for human readability. An ID is never
/// reused within a session, even after the card it named is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        CardId(id)
    }
}

/// Monotonic identity allocator
///
/// Starts at 0 and only moves forward until `reset` is called at session
/// (re)start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next_id: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next_id: 0 }
    }

    /// Generate a new unique CardId
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next call to `next_id` will return
    pub fn peek(&self) -> CardId {
        CardId::new(self.next_id)
    }

    /// Has this allocator ever produced `id`?
    pub fn has_issued(&self, id: CardId) -> bool {
        id.as_u32() < self.next_id
    }

    pub fn reset(&mut self) {
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let id1 = ids.next_id();
        let id2 = ids.next_id();

        assert_eq!(id1.as_u32(), 0);
        assert_eq!(id2.as_u32(), 1);
        assert_eq!(ids.peek(), CardId::new(2));
        assert!(ids.has_issued(id2));
        assert!(!ids.has_issued(CardId::new(2)));
    }

    #[test]
    fn test_reset_starts_over() {
        let mut ids = IdAllocator::new();
        ids.next_id();
        ids.next_id();
        ids.reset();
        assert_eq!(ids.next_id(), CardId::new(0));
    }
}
