//! Build identifier allocation

use std::fmt;
use uuid::Uuid;

/// Identifier tying a solution project entry to its configuration lines
///
/// Displays as an uppercase hyphenated GUID without braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildId(Uuid);

impl From<Uuid> for BuildId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        f.write_str(self.0.hyphenated().encode_upper(&mut buf))
    }
}

/// Source of build identifiers for one composition pass
pub trait IdAllocator {
    fn allocate(&mut self) -> BuildId;
}

/// Fresh random (v4) identifiers on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAllocator;

impl IdAllocator for RandomAllocator {
    fn allocate(&mut self) -> BuildId {
        BuildId(Uuid::new_v4())
    }
}

/// Reproducible identifiers derived from a seed
///
/// Each call hashes an incrementing counter into a seed-specific v5
/// namespace, so the same seed always yields the same distinct sequence.
#[derive(Debug, Clone)]
pub struct SeededAllocator {
    namespace: Uuid,
    counter: u64,
}

impl SeededAllocator {
    pub fn new(seed: u64) -> Self {
        Self {
            namespace: Uuid::new_v5(&Uuid::NAMESPACE_OID, &seed.to_be_bytes()),
            counter: 0,
        }
    }
}

impl IdAllocator for SeededAllocator {
    fn allocate(&mut self) -> BuildId {
        let id = Uuid::new_v5(&self.namespace, &self.counter.to_be_bytes());
        self.counter += 1;
        BuildId(id)
    }
}
