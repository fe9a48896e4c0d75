//! Pluggable id generation.
//!
//! Generators only need to be collision-free in practice; the repository
//! still rejects any id already present in its collection.

use crate::clock::{Clock, SystemClock};
use crate::model::content::ContentId;
use uuid::Uuid;

pub trait IdGenerator {
    fn next_id(&mut self) -> ContentId;
}

/// Random v4 UUIDs. Default generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> ContentId {
        Uuid::new_v4().to_string()
    }
}

/// Epoch-millisecond ids.
///
/// Two calls inside the same millisecond (or after the clock steps back)
/// yield `last + 1`, so ids stay strictly increasing within one generator.
pub struct TimestampIdGenerator {
    clock: Box<dyn Clock>,
    last: Option<i64>,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: None,
        }
    }
}

impl Default for TimestampIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> ContentId {
        let now = self.clock.now().epoch_millis();
        let next = match self.last {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last = Some(next);
        next.to_string()
    }
}

/// `<prefix>-<n>` counter starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> ContentId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
