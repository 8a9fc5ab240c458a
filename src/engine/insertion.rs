use crate::engine::cancel::CancelToken;
use crate::engine::driver::{Counters, SortDriver, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    TakeKey,
    Probe,
    Shift,
    Done(Step),
}

/// Card-style insertion. `hole` is the slot the held key would occupy
/// (`j + 1` in the textbook loop), so it never goes negative.
///
/// Every shift counts as one swap; dropping the key into place counts as
/// neither a comparison nor a swap.
pub struct InsertionDriver {
    i: usize,
    hole: usize,
    key: u32,
    phase: Phase,
}

impl InsertionDriver {
    pub fn new() -> Self {
        Self {
            i: 1,
            hole: 0,
            key: 0,
            phase: Phase::TakeKey,
        }
    }
}

impl SortDriver for InsertionDriver {
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
                Phase::TakeKey => {
                    if self.i >= n {
                        self.phase = Phase::Done(Step::Finished);
                        continue;
                    }
                    self.key = array[self.i];
                    self.hole = self.i;
                    self.phase = Phase::Probe;
                }
                Phase::Probe => {
                    if self.hole > 0 && array[self.hole - 1] > self.key {
                        if cancel.is_cancelled() {
                            self.phase = Phase::Done(Step::Cancelled);
                            continue;
                        }
                        counters.comparisons += 1;
                        self.phase = Phase::Shift;
                        return Step::Compare {
                            left: self.hole - 1,
                            right: self.hole,
                        };
                    }
                    array[self.hole] = self.key;
                    let index = self.hole;
                    self.i += 1;
                    self.phase = Phase::TakeKey;
                    return Step::Place { index };
                }
                Phase::Shift => {
                    let (from, to) = (self.hole - 1, self.hole);
                    array[to] = array[from];
                    counters.swaps += 1;
                    self.hole -= 1;
                    self.phase = Phase::Probe;
                    return Step::Shift { from, to };
                }
            }
        }
    }
}
