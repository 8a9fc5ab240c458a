use rust_i18n::t;
use serde::{Deserialize, Serialize};

use crate::engine::driver::Step;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Ready,
    Running,
    Done,
}

impl RunStatus {
    pub fn label(self) -> String {
        match self {
            RunStatus::Ready => t!("status.ready").to_string(),
            RunStatus::Running => t!("status.running").to_string(),
            RunStatus::Done => t!("status.done").to_string(),
        }
    }
}

/// The published state of one sorting session. This is what gets rendered;
/// the driver works on a private copy inside the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRun {
    pub array: Vec<u32>,
    pub comparisons: u64,
    pub swaps: u64,
    pub highlighted: Vec<usize>,
    pub status: RunStatus,
}

impl SortRun {
    pub fn new(array: Vec<u32>) -> Self {
        Self {
            array,
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }

    /// Denominator for bar heights; never zero.
    pub fn max_value(&self) -> u32 {
        self.array.iter().copied().max().unwrap_or(0).max(1)
    }

    pub fn bar_ratio(&self, index: usize) -> f64 {
        self.array
            .get(index)
            .map_or(0.0, |&v| v as f64 / self.max_value() as f64)
    }

    /// Worst-case comparison count for bubble and selection sort on this array.
    pub fn max_comparisons(&self) -> u64 {
        let n = self.array.len() as u64;
        n * n.saturating_sub(1) / 2
    }

    pub fn progress(&self) -> f64 {
        if self.status == RunStatus::Done {
            return 1.0;
        }
        let max = self.max_comparisons();
        if max == 0 {
            return 0.0;
        }
        (self.comparisons as f64 / max as f64).clamp(0.0, 1.0)
    }
}

/// One emitted state, in the order the algorithm produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunUpdate {
    pub seq: u64,
    pub step: Step,
    pub array: Vec<u32>,
    pub comparisons: u64,
    pub swaps: u64,
    pub highlighted: Vec<usize>,
    pub status: RunStatus,
}

impl RunUpdate {
    pub fn snapshot(seq: u64, step: Step, run: &SortRun) -> Self {
        Self {
            seq,
            step,
            array: run.array.clone(),
            comparisons: run.comparisons,
            swaps: run.swaps,
            highlighted: run.highlighted.clone(),
            status: run.status,
        }
    }
}
