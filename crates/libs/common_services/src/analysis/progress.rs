use common_types::Track;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// One snapshot of the simulated progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub session_id: u64,
    pub analyzed: usize,
    pub total: usize,
    pub elapsed: Duration,
    /// The candidate at `analyzed - 1`.
    pub current: Option<Track>,
    /// Omitted while nothing has been analyzed.
    pub remaining: Option<Duration>,
}

impl ProgressReport {
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.analyzed as f64 / self.total as f64 * 100.0
    }

    /// `"1m 5s"`, or `"42s"` under a minute.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        let secs = self.elapsed.as_secs();
        let minutes = secs / 60;
        if minutes > 0 {
            format!("{minutes}m {}s", secs % 60)
        } else {
            format!("{secs}s")
        }
    }

    /// Remaining time in whole minutes, rounded up.
    #[must_use]
    pub fn remaining_minutes(&self) -> Option<u64> {
        self.remaining
            .map(|remaining| (remaining.as_secs_f64() / 60.0).ceil() as u64)
    }
}

/// `(total - analyzed) / (analyzed / elapsed)`, undefined while `analyzed == 0`.
#[must_use]
pub fn remaining_time(analyzed: usize, total: usize, elapsed: Duration) -> Option<Duration> {
    if analyzed == 0 {
        return None;
    }
    let rate = analyzed as f64 / elapsed.as_secs_f64();
    if !rate.is_finite() {
        return Some(Duration::ZERO);
    }
    let left = total.saturating_sub(analyzed) as f64;
    Some(Duration::from_secs_f64(left / rate))
}

/// Receives progress for one build.
pub trait ProgressView: Send {
    fn status(&mut self, _message: &str) {}
    fn show(&mut self, total: usize);
    fn update(&mut self, report: &ProgressReport);
    fn hide(&mut self);
}

/// Walks the candidate list at a fixed cadence while the analysis call is in flight.
/// The counter never passes the candidate count.
#[derive(Debug)]
pub struct ProgressSimulator {
    session_id: u64,
    candidates: Vec<Track>,
    started_at: Instant,
    analyzed: usize,
    reported_total: bool,
    ticker: Option<Interval>,
}

impl ProgressSimulator {
    /// The first tick fires one `period` after `started_at`.
    #[must_use]
    pub fn start(session_id: u64, candidates: Vec<Track>, period: Duration) -> Self {
        let started_at = Instant::now();
        let mut ticker = interval_at(started_at + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            session_id,
            candidates,
            started_at,
            analyzed: 0,
            reported_total: false,
            ticker: Some(ticker),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub const fn analyzed(&self) -> usize {
        self.analyzed
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Waits for the next tick and advances by one. Pending forever once stopped
    /// or once every candidate has been walked.
    pub async fn tick(&mut self) -> ProgressReport {
        let total = self.candidates.len();
        match self.ticker.as_mut() {
            Some(ticker) if self.analyzed < total => {
                ticker.tick().await;
            }
            _ => return std::future::pending().await,
        }

        self.analyzed += 1;
        if self.analyzed == total {
            self.reported_total = true;
            self.ticker = None;
        }
        self.report()
    }

    /// Force the counter to the total and stop. Returns the final report unless
    /// the total was already reported.
    pub fn complete(&mut self) -> Option<ProgressReport> {
        self.ticker = None;
        self.analyzed = self.candidates.len();
        if self.reported_total {
            return None;
        }
        self.reported_total = true;
        Some(self.report())
    }

    /// Stop without advancing.
    pub fn stop(&mut self) {
        self.ticker = None;
    }

    #[must_use]
    pub fn report(&self) -> ProgressReport {
        let elapsed = self.started_at.elapsed();
        ProgressReport {
            session_id: self.session_id,
            analyzed: self.analyzed,
            total: self.candidates.len(),
            elapsed,
            current: self
                .analyzed
                .checked_sub(1)
                .and_then(|i| self.candidates.get(i))
                .cloned(),
            remaining: remaining_time(self.analyzed, self.candidates.len(), elapsed),
        }
    }
}
