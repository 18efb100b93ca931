use serde::Serialize;

use super::Phase;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub phase: Phase,
    /// Answers recorded in the current test run; 0 in practice.
    pub answered: usize,
    /// Questions drawn so far in the current mode-session.
    pub presented: usize,
    /// Questions not yet drawn.
    pub remaining: usize,
    /// Test question cap; `None` outside test mode.
    pub limit: Option<usize>,
}
