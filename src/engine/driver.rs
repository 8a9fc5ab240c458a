use rust_i18n::t;
use serde::{Deserialize, Serialize};

use crate::engine::algorithm::Algorithm;
use crate::engine::bubble::BubbleDriver;
use crate::engine::cancel::CancelToken;
use crate::engine::insertion::InsertionDriver;
use crate::engine::selection::SelectionDriver;

/// One observable event produced by a driver. Every step maps to exactly one
/// published update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A pair was inspected and `comparisons` incremented. The caller waits
    /// `speed` before asking for the next step.
    Compare { left: usize, right: usize },
    /// Two elements exchanged positions.
    Swap { left: usize, right: usize },
    /// Insertion sort moved `array[from]` into `array[to]`.
    Shift { from: usize, to: usize },
    /// Insertion sort dropped the held key into its slot.
    Place { index: usize },
    Finished,
    Cancelled,
}

impl Step {
    pub fn is_terminal(self) -> bool {
        matches!(self, Step::Finished | Step::Cancelled)
    }

    /// Only comparisons are followed by the speed delay; mutations are
    /// published back-to-back with the comparison that decided them.
    pub fn waits_after(self) -> bool {
        matches!(self, Step::Compare { .. })
    }

    pub fn highlight(self) -> Option<[usize; 2]> {
        match self {
            Step::Compare { left, right } => Some([left, right]),
            _ => None,
        }
    }

    /// Short localized caption shown above the bars while a run is live.
    pub fn label(self) -> String {
        match self {
            Step::Compare { left, right } => {
                t!("step.compare", left = left, right = right).to_string()
            }
            Step::Swap { left, right } => t!("step.swap", left = left, right = right).to_string(),
            Step::Shift { from, to } => t!("step.shift", from = from, to = to).to_string(),
            Step::Place { index } => t!("step.place", index = index).to_string(),
            Step::Finished => t!("step.finished").to_string(),
            Step::Cancelled => t!("step.cancelled").to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub comparisons: u64,
    pub swaps: u64,
}

/// A sorting algorithm written as a resumable state machine.
///
/// Each call performs work up to and including the next observable step.
/// Drivers check `cancel` at the top of their innermost loop body, before
/// counting a comparison; once they return a terminal step they keep
/// returning it.
pub trait SortDriver {
    fn next_step(
        &mut self,
        array: &mut [u32],
        counters: &mut Counters,
        cancel: &CancelToken,
    ) -> Step;
}

pub fn driver_for(algorithm: Algorithm) -> Box<dyn SortDriver> {
    match algorithm {
        Algorithm::Bubble => Box::new(BubbleDriver::new()),
        Algorithm::Selection => Box::new(SelectionDriver::new()),
        Algorithm::Insertion => Box::new(InsertionDriver::new()),
    }
}

/// Drive `algorithm` over `array` to completion without any delay, returning
/// the final counters. Used by benchmarks and the headless checks.
pub fn sort_to_end(algorithm: Algorithm, array: &mut [u32]) -> Counters {
    let mut driver = driver_for(algorithm);
    let mut counters = Counters::default();
    let cancel = CancelToken::new();
    while !driver.next_step(array, &mut counters, &cancel).is_terminal() {}
    counters
}

/// Collect every step emitted for `array`. Test helper.
#[cfg(test)]
pub(crate) fn collect_steps(
    algorithm: Algorithm,
    array: &mut [u32],
) -> (Vec<Step>, Counters) {
    let mut driver = driver_for(algorithm);
    let mut counters = Counters::default();
    let cancel = CancelToken::new();
    let mut steps = Vec::new();
    loop {
        let step = driver.next_step(array, &mut counters, &cancel);
        steps.push(step);
        if step.is_terminal() {
            return (steps, counters);
        }
    }
}
