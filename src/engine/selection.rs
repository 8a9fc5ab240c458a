use crate::engine::cancel::CancelToken;
use crate::engine::driver::{Counters, SortDriver, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Compare,
    Resolve,
    EndOfPass,
    Done(Step),
}

/// Scans for the minimum of the unsorted tail; at most one swap per pass.
pub struct SelectionDriver {
    i: usize,
    j: usize,
    min_idx: usize,
    phase: Phase,
}

impl SelectionDriver {
    pub fn new() -> Self {
        Self {
            i: 0,
            j: 1,
            min_idx: 0,
            phase: Phase::Compare,
        }
    }
}

impl SortDriver for SelectionDriver {
    fn next_step(
        &mut self,
        array: &mut [u32],
        counters: &mut Counters,
        cancel: &CancelToken,
    ) -> Step {
        let n = array.len();
        loop {
            match self.phase {
                Phase::Done(step) => return step,
                Phase::Compare => {
                    if self.i + 1 >= n {
                        self.phase = Phase::Done(Step::Finished);
                        continue;
                    }
                    if self.j >= n {
                        self.phase = Phase::EndOfPass;
                        continue;
                    }
                    if cancel.is_cancelled() {
                        self.phase = Phase::Done(Step::Cancelled);
                        continue;
                    }
                    counters.comparisons += 1;
                    self.phase = Phase::Resolve;
                    return Step::Compare {
                        left: self.min_idx,
                        right: self.j,
                    };
                }
                Phase::Resolve => {
                    if array[self.j] < array[self.min_idx] {
                        self.min_idx = self.j;
                    }
                    self.j += 1;
                    self.phase = Phase::Compare;
                }
                Phase::EndOfPass => {
                    let (i, min_idx) = (self.i, self.min_idx);
                    self.i += 1;
                    self.min_idx = self.i;
                    self.j = self.i + 1;
                    self.phase = Phase::Compare;
                    if min_idx != i {
                        array.swap(i, min_idx);
                        counters.swaps += 1;
                        return Step::Swap {
                            left: i,
                            right: min_idx,
                        };
                    }
                }
            }
        }
    }
}
