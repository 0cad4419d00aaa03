//! Progress display for long-running file hashes

use crate::terminal;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Byte progress bar for one input; inert when progress is disabled
pub struct FileProgress {
    bar: Option<ProgressBar>,
}

impl FileProgress {
    /// Show a bar only when enabled, on a terminal, and for inputs larger
    /// than one read
    pub fn new(name: &str, total_bytes: Option<u64>, chunk_size: usize, enabled: bool) -> Self {
        let bar = match total_bytes {
            Some(total)
                if enabled && total > chunk_size as u64 && terminal::should_show_progress() =>
            {
                Some(Self::create_bar(name, total))
            }
            _ => None,
        };
        Self { bar }
    }

    /// Progress that never draws anything
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    fn create_bar(name: &str, total: u64) -> ProgressBar {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(format!("{} {}", "Hashing".bold(), name.cyan()));
        bar
    }

    pub fn advance(&self, bytes: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(bytes);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_is_hidden() {
        let progress = FileProgress::new("file", Some(u64::MAX), 1024, false);
        assert!(!progress.is_visible());
        progress.advance(10);
        progress.finish();
    }

    #[test]
    fn test_small_or_unknown_inputs_are_hidden() {
        assert!(!FileProgress::new("small", Some(100), 1024, true).is_visible());
        assert!(!FileProgress::new("stdin", None, 1024, true).is_visible());
        assert!(!FileProgress::hidden().is_visible());
    }
}
