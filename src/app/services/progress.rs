//! Progress reporting for ESO file processing
//!
//! This module defines the sink interface through which the parser
//! reports progress, and two implementations: a silent sink for
//! library use and an indicatif-backed reporter for the CLI. The sink
//! is advisory and never on the correctness path; its only influence
//! on parsing is the cooperative cancellation flag, observed at chunk
//! boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Sink receiving progress events from the parser
///
/// `set_maximum` is called once before parsing with the expected
/// number of ticks; `tick` fires at every chunk boundary plus once for
/// a partial final chunk; `log_section` announces parser phases.
pub trait ProgressSink {
    /// Set the expected total number of ticks
    fn set_maximum(&mut self, max_ticks: u64);

    /// Advance progress by one chunk
    fn tick(&mut self);

    /// Announce a processing phase (e.g. "reading file body")
    fn log_section(&mut self, section: &str);

    /// Check whether cancellation has been requested
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Silent sink for library callers that do not track progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl ProgressSink for NoOpSink {
    fn set_maximum(&mut self, _max_ticks: u64) {}

    fn tick(&mut self) {}

    fn log_section(&mut self, _section: &str) {}
}

/// Progress reporter rendering a terminal progress bar
///
/// Wraps an optional [`ProgressBar`] so quiet mode can reuse the same
/// type with rendering disabled, and carries a shared cancellation
/// flag that external controllers may set (e.g. from a Ctrl-C
/// handler).
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    cancel_flag: Arc<AtomicBool>,
}

impl ProgressReporter {
    /// Create a reporter that renders a progress bar
    pub fn new() -> Self {
        Self {
            progress_bar: Some(ProgressBar::new(0)),
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a reporter with rendering disabled
    pub fn hidden() -> Self {
        Self {
            progress_bar: None,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that requests cancellation when set
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Finish the bar with a completion message
    pub fn finish(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressReporter {
    fn set_maximum(&mut self, max_ticks: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(max_ticks);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) | {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
        }
        debug!("progress maximum set to {} chunks", max_ticks);
    }

    fn tick(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
    }

    fn log_section(&mut self, section: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(section.to_string());
        }
        debug!("section: {}", section);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Leave a clean terminal if parsing bailed out early
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_never_cancels() {
        let mut sink = NoOpSink;
        sink.set_maximum(10);
        sink.tick();
        sink.log_section("anything");
        assert!(!sink.is_cancelled());
    }

    #[test]
    fn test_reporter_cancel_flag() {
        let mut reporter = ProgressReporter::hidden();
        assert!(!reporter.is_cancelled());

        let flag = reporter.cancel_flag();
        flag.store(true, Ordering::Relaxed);
        assert!(reporter.is_cancelled());

        // Ticks after cancellation must not panic
        reporter.tick();
    }

    #[test]
    fn test_hidden_reporter_operations() {
        let mut reporter = ProgressReporter::hidden();
        reporter.set_maximum(100);
        reporter.tick();
        reporter.log_section("reading file body");
        reporter.finish("done");
    }
}
