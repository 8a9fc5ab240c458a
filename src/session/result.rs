use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::algorithm::Algorithm;
use crate::engine::controller::RunController;

/// Number of finished or cancelled runs kept for the sidebar.
pub const HISTORY_LIMIT: usize = 8;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunResult {
    pub algorithm: Algorithm,
    pub size: usize,
    pub comparisons: u64,
    pub swaps: u64,
    pub speed_ms: u64,
    pub elapsed_secs: f64,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

impl RunResult {
    pub fn from_controller(controller: &RunController, completed: bool) -> Self {
        let run = controller.run();
        Self {
            algorithm: controller.algorithm(),
            size: run.array.len(),
            comparisons: run.comparisons,
            swaps: run.swaps,
            speed_ms: controller.speed_ms(),
            elapsed_secs: controller.elapsed_secs(),
            completed,
            timestamp: Utc::now(),
        }
    }

    /// Swaps per comparison; 0 when nothing was compared.
    pub fn swap_ratio(&self) -> f64 {
        if self.comparisons == 0 {
            return 0.0;
        }
        self.swaps as f64 / self.comparisons as f64
    }
}

/// Push `result` to the front, dropping the oldest beyond [`HISTORY_LIMIT`].
pub fn record(history: &mut Vec<RunResult>, result: RunResult) {
    history.insert(0, result);
    history.truncate(HISTORY_LIMIT);
}
