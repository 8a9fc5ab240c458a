use crate::engine::cancel::CancelToken;
use crate::engine::driver::{Counters, SortDriver, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Compare,
    Resolve,
    Done(Step),
}

/// Adjacent-pair bubbling: pass `i` walks `j` over `0..n-1-i`.
pub struct BubbleDriver {
    i: usize,
    j: usize,
    phase: Phase,
}

impl BubbleDriver {
    pub fn new() -> Self {
        Self {
            i: 0,
            j: 0,
            phase: Phase::Compare,
        }
    }
}

impl SortDriver for BubbleDriver {
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
                    if self.j + self.i + 1 >= n {
                        self.i += 1;
                        self.j = 0;
                        continue;
                    }
                    if cancel.is_cancelled() {
                        self.phase = Phase::Done(Step::Cancelled);
                        continue;
                    }
                    counters.comparisons += 1;
                    self.phase = Phase::Resolve;
                    return Step::Compare {
                        left: self.j,
                        right: self.j + 1,
                    };
                }
                Phase::Resolve => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = Phase::Compare;
                    if array[j] > array[j + 1] {
                        array.swap(j, j + 1);
                        counters.swaps += 1;
                        return Step::Swap {
                            left: j,
                            right: j + 1,
                        };
                    }
                }
            }
        }
    }
}
