use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, human-readable actor identifier, unique within one scene.
///
/// Unlike [`ActorKey`](crate::scene::ActorKey) this never gets recycled and is
/// what hosts use to correlate actors with their own resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Monotonic id source owned by a scene.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ActorId {
        let id = ActorId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(a < b);
        assert_eq!(ids.issued(), 2);
        assert_eq!(b.to_string(), "actor#1");
    }
}
