// file: src/index/progress.rs
// description: progress tracking and statistics for page text extraction
// reference: uses indicatif for progress bars and tracks extraction counts

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    pub pages: u32,
    pub failed: u32,
    pub blank: u32,
    /// Pages carrying at least one course code, usually subject headers
    pub header_pages: u32,
    pub duration_ms: u64,
}

impl IndexStats {
    pub fn pages_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.pages as f64 / (self.duration_ms as f64 / 1000.0)
    }

    pub fn success_rate(&self) -> f64 {
        if self.pages == 0 {
            return 0.0;
        }
        ((self.pages - self.failed) as f64 / self.pages as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    pages_extracted: AtomicU32,
    pages_failed: AtomicU32,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_pages: u32, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();
        Self::build(multi_progress, total_pages, colored)
    }

    /// Counts pages without drawing anything.
    pub fn hidden(total_pages: u32) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        Self::build(multi_progress, total_pages, false)
    }

    fn build(multi_progress: MultiProgress, total_pages: u32, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_pages as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            pages_extracted: AtomicU32::new(0),
            pages_failed: AtomicU32::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_extracted(&self) {
        self.pages_extracted.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn failed(&self) -> u32 {
        self.pages_failed.load(Ordering::SeqCst)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Extraction complete");
        self.detail_bar.finish_and_clear();
    }

    fn update_detail_bar(&self) {
        let message = format!(
            "Pages: {} | Failed: {}",
            self.pages_extracted.load(Ordering::SeqCst),
            self.pages_failed.load(Ordering::SeqCst)
        );
        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} pages ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_stats_rates() {
        let stats = IndexStats {
            pages: 100,
            failed: 10,
            blank: 4,
            header_pages: 12,
            duration_ms: 2000,
        };

        assert_eq!(stats.pages_per_second(), 50.0);
        assert_eq!(stats.success_rate(), 90.0);
    }

    #[test]
    fn test_index_stats_empty() {
        let stats = IndexStats::default();
        assert_eq!(stats.pages_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_hidden_tracker_counts() {
        let tracker = ProgressTracker::hidden(3);

        tracker.inc_extracted();
        tracker.inc_extracted();
        tracker.inc_failed();

        assert_eq!(tracker.failed(), 1);
        assert_eq!(tracker.main_bar.position(), 3);
    }
}
