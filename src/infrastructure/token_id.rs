//! `jti` sources

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Produces a unique identifier per issued token
pub trait TokenIdGenerator: Send + Sync + Debug {
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenIds;

impl TokenIdGenerator for UuidTokenIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter starting at 1
#[derive(Debug, Default)]
pub struct SequentialTokenIds {
    last: AtomicU64,
}

impl SequentialTokenIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenIdGenerator for SequentialTokenIds {
    fn next_id(&self) -> String {
        (self.last.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}
