//! Builder-style methods for the console cleaner.

use super::ConsoleCleaner;
use crate::dialect::Transformer;
use crate::policy::{IgnorePolicy, MatchPolicy};

impl ConsoleCleaner {
    /// Creates a cleaner with the given transformer and default policies.
    #[must_use]
    pub fn new(transformer: Transformer) -> Self {
        Self {
            transformer,
            ..Self::default()
        }
    }

    /// Builder-style method to set the ignore policy.
    #[must_use]
    pub fn with_ignore(mut self, ignore: IgnorePolicy) -> Self {
        self.ignore = ignore;
        self
    }

    /// Builder-style method to set the match policy.
    #[must_use]
    pub fn with_matcher(mut self, matcher: MatchPolicy) -> Self {
        self.matcher = matcher;
        self
    }

    /// Builder-style method to honour `.gitignore` and friends.
    #[must_use]
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Builder-style method to enable dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builder-style method to bound the worker pool.
    #[must_use]
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    /// Builder-style method to attach a progress bar.
    #[must_use]
    pub fn with_progress_bar(mut self, bar: std::sync::Arc<indicatif::ProgressBar>) -> Self {
        self.progress_bar = Some(bar);
        self
    }
}
