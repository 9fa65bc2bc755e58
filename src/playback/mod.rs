mod queue;

pub use queue::{PlaybackQueue, QueueError, TrackEnd};
