use common_services::analysis::{ProgressReport, ProgressView};
use common_services::result_set::ResultSet;
use tracing::{debug, info};

/// Renders progress to the log.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    total: usize,
}

impl ProgressView for TerminalProgress {
    fn status(&mut self, message: &str) {
        if !message.is_empty() {
            info!("{message}");
        }
    }

    fn show(&mut self, total: usize) {
        self.total = total;
        debug!("Progress shown for {total} tracks");
    }

    fn update(&mut self, report: &ProgressReport) {
        let remaining = report
            .remaining_minutes()
            .map_or_else(|| "-".to_string(), |m| format!("{m} min"));
        let current = report
            .current
            .as_ref()
            .map(|t| format!("{} - {}", t.name, t.artists))
            .unwrap_or_default();
        info!(
            "Analyzing {}/{} tracks ({:.0}%, {} elapsed, {remaining} remaining) {current}",
            report.analyzed,
            report.total,
            report.percent(),
            report.elapsed_display(),
        );
    }

    fn hide(&mut self) {
        debug!("Progress hidden after {} tracks", self.total);
    }
}

/// One line per ranked entry, included entries marked with `*`.
#[must_use]
pub fn format_results(results: &ResultSet) -> Vec<String> {
    results
        .entries()
        .map(|entry| {
            let marker = if entry.included { '*' } else { ' ' };
            let track = &entry.result.track;
            let dominant = entry
                .result
                .dominant
                .map(|[r, g, b]| format!(" #{r:02x}{g:02x}{b:02x}"))
                .unwrap_or_default();
            format!(
                "{marker} {:>3}. {} - {} (Similarity: {:.1}%){dominant}",
                entry.rank, track.name, track.artists, entry.similarity
            )
        })
        .collect()
}
