use chrono::{DateTime, Utc};

/// Wall-clock timer that also works in the browser, where `std::time::Instant` is unavailable.
#[derive(Debug, Clone, Copy)]
pub struct PerfTimer {
    started_at: DateTime<Utc>,
}

impl PerfTimer {
    pub fn now() -> Self {
        Self {
            started_at: Utc::now(),
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds().max(0)
    }
}

#[inline]
pub fn log_perf(scope: &str, timer: PerfTimer, details: &str) {
    let elapsed_ms = timer.elapsed_ms();
    if details.trim().is_empty() {
        tracing::info!(target: "podcastr::perf", "{scope} took {elapsed_ms}ms");
    } else {
        tracing::info!(target: "podcastr::perf", "{scope} took {elapsed_ms}ms | {details}");
    }
}
