use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;

static ENABLED: OnceCell<bool> = OnceCell::new();

fn enabled() -> bool {
    *ENABLED.get_or_init(|| {
        std::env::var_os("HEAPKIT_TIME_REPORT").is_some() || cfg!(debug_assertions)
    })
}

pub struct TimeReport {
    title: String,
    started_at: Instant,
}

impl TimeReport {
    pub fn new(title: &str) -> TimeReport {
        TimeReport {
            title: title.to_owned(),
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Logs the elapsed time (in debug builds or if `HEAPKIT_TIME_REPORT`
    /// is set) and returns it.
    pub fn report(self) -> Duration {
        let elapsed = self.elapsed();
        if enabled() {
            info!("time_report: {} took {:?}", self.title, elapsed);
        }
        elapsed
    }
}
