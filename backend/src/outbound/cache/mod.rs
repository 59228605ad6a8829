//! In-process view revalidation.
//!
//! [`PathRevalidator`] keeps a generation counter per path and publishes a
//! [`RevalidationEvent`] on a broadcast channel whenever a path is flushed.
//! HTTP handlers expose the generation as an `ETag` and relay the events to
//! connected views.

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::ports::{RevalidationEvent, ViewRevalidator};

const EVENT_CAPACITY: usize = 64;

/// Process-wide, path-keyed revalidation signal.
#[derive(Debug)]
pub struct PathRevalidator {
    generations: RwLock<HashMap<String, u64>>,
    events: broadcast::Sender<RevalidationEvent>,
}

impl Default for PathRevalidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PathRevalidator {
    /// Create a revalidator with every path at generation zero.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            generations: RwLock::new(HashMap::new()),
            events,
        }
    }
}

impl ViewRevalidator for PathRevalidator {
    fn revalidate(&self, path: &str) {
        let generation = {
            let mut generations = self
                .generations
                .write()
                .unwrap_or_else(|err| err.into_inner());
            let entry = generations.entry(path.to_owned()).or_insert(0);
            *entry += 1;
            *entry
        };
        debug!(path, generation, "view revalidated");
        // No subscribers is not an error.
        let _ = self.events.send(RevalidationEvent {
            path: path.to_owned(),
            generation,
        });
    }

    fn generation(&self, path: &str) -> u64 {
        self.generations
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    fn subscribe(&self) -> broadcast::Receiver<RevalidationEvent> {
        self.events.subscribe()
    }
}
