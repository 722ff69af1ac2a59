use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Counts events emitted by this crate, per level.
#[derive(Clone, Default)]
pub struct LevelCounter {
    counts: Arc<Mutex<HashMap<Level, usize>>>,
}

impl LevelCounter {
    pub fn count(&self, level: Level) -> usize {
        self.counts
            .lock()
            .unwrap()
            .get(&level)
            .copied()
            .unwrap_or_default()
    }
}

impl<S: Subscriber> Layer<S> for LevelCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(env!("CARGO_CRATE_NAME")) {
            *self
                .counts
                .lock()
                .unwrap()
                .entry(*metadata.level())
                .or_default() += 1;
        }
    }
}

/// A scoped subscriber plus a handle to read its counts back.
pub fn counting_subscriber() -> (impl Subscriber + Send + Sync + 'static, LevelCounter) {
    let counter = LevelCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    (subscriber, counter)
}
