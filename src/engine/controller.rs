use std::time::{Duration, Instant};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::engine::algorithm::Algorithm;
use crate::engine::cancel::CancelToken;
use crate::engine::driver::{Counters, SortDriver, Step, driver_for};
use crate::engine::run::{RunStatus, RunUpdate, SortRun};

/// Generated values are `floor(random * max_value) + VALUE_FLOOR`.
pub const VALUE_FLOOR: u32 = 10;

pub const SPEED_PRESETS: [u64; 5] = [10, 30, 50, 100, 200];

/// Step to the neighbouring speed preset. Values between presets snap to the
/// nearest preset in the requested direction.
pub fn adjacent_speed(current_ms: u64, slower: bool) -> u64 {
    if slower {
        SPEED_PRESETS
            .iter()
            .copied()
            .find(|&p| p > current_ms)
            .unwrap_or(SPEED_PRESETS[SPEED_PRESETS.len() - 1])
    } else {
        SPEED_PRESETS
            .iter()
            .rev()
            .copied()
            .find(|&p| p < current_ms)
            .unwrap_or(SPEED_PRESETS[0])
    }
}

/// Owns the single [`SortRun`] and is its only mutator.
///
/// The controller never sleeps. Callers drive it with [`poll`](Self::poll)
/// from whatever clock they have (the UI tick, or the headless runner's sleep
/// loop); each poll applies every step that has come due and returns the
/// emitted updates in order.
pub struct RunController {
    run: SortRun,
    algorithm: Algorithm,
    speed_ms: u64,
    working: Vec<u32>,
    counters: Counters,
    driver: Option<Box<dyn SortDriver>>,
    cancel: CancelToken,
    next_due: Option<Instant>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    seq: u64,
    rng: SmallRng,
}

impl RunController {
    pub fn new(algorithm: Algorithm, speed_ms: u64) -> Self {
        Self::with_rng(algorithm, speed_ms, SmallRng::from_entropy())
    }

    pub fn with_seed(algorithm: Algorithm, speed_ms: u64, seed: u64) -> Self {
        Self::with_rng(algorithm, speed_ms, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(algorithm: Algorithm, speed_ms: u64, rng: SmallRng) -> Self {
        Self {
            run: SortRun::default(),
            algorithm,
            speed_ms,
            working: Vec::new(),
            counters: Counters::default(),
            driver: None,
            cancel: CancelToken::new(),
            next_due: None,
            started_at: None,
            finished_at: None,
            seq: 0,
            rng,
        }
    }

    pub fn run(&self) -> &SortRun {
        &self.run
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    /// When the next step is due, or `None` if nothing is scheduled.
    pub fn next_due(&self) -> Option<Instant> {
        self.driver.as_ref()?;
        self.next_due
    }

    pub fn elapsed_secs(&self) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => start.elapsed().as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Fill the run with `size` random values in `[10, max_value + 10)`.
    pub fn new_run(&mut self, size: usize, max_value: u32) {
        if self.is_running() {
            debug!("new_run ignored: a run is in progress");
            return;
        }
        let max_value = max_value.max(1);
        let values: Vec<u32> = (0..size)
            .map(|_| self.rng.gen_range(0..max_value) + VALUE_FLOOR)
            .collect();
        self.replace_array(values);
        info!(size, max_value, "generated new array");
    }

    /// Like [`new_run`](Self::new_run) with caller-supplied values.
    pub fn load_values(&mut self, values: Vec<u32>) {
        if self.is_running() {
            debug!("load_values ignored: a run is in progress");
            return;
        }
        info!(size = values.len(), "loaded array");
        self.replace_array(values);
    }

    fn replace_array(&mut self, values: Vec<u32>) {
        self.discard_driver();
        self.run = SortRun::new(values);
        self.counters = Counters::default();
        self.started_at = None;
        self.finished_at = None;
    }

    fn discard_driver(&mut self) {
        self.cancel.cancel();
        self.driver = None;
        self.next_due = None;
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Begin sorting with the first step due at `at`. Later steps are chained
    /// from this instant, so a late poll catches up on everything missed.
    pub fn start_at(&mut self, at: Instant) {
        if self.is_running() {
            debug!("start ignored: already running");
            return;
        }
        if self.run.array.is_empty() {
            debug!("start ignored: empty array");
            return;
        }
        self.discard_driver();
        self.cancel = CancelToken::new();
        self.working = self.run.array.clone();
        self.counters = Counters::default();
        self.run.comparisons = 0;
        self.run.swaps = 0;
        self.run.highlighted.clear();
        self.run.status = RunStatus::Running;
        self.driver = Some(driver_for(self.algorithm));
        self.next_due = Some(at);
        self.started_at = Some(at);
        self.finished_at = None;
        info!(
            algorithm = self.algorithm.as_str(),
            size = self.working.len(),
            speed_ms = self.speed_ms,
            "sort started"
        );
    }

    /// Stop the active run. Status flips to `Ready` immediately; a mutation
    /// already decided by the last comparison may still be published by the
    /// next poll before the driver notices the flag.
    pub fn cancel(&mut self) {
        if !self.is_running() {
            return;
        }
        self.cancel.cancel();
        self.run.status = RunStatus::Ready;
        self.run.highlighted.clear();
        self.finished_at = Some(Instant::now());
        info!(
            comparisons = self.run.comparisons,
            swaps = self.run.swaps,
            "sort cancelled"
        );
    }

    /// Cancel whatever is running and generate a fresh array.
    pub fn reset(&mut self, size: usize, max_value: u32) {
        self.cancel();
        self.new_run(size, max_value);
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.is_running() {
            debug!("set_algorithm ignored while running");
            return;
        }
        self.algorithm = algorithm;
    }

    pub fn set_speed(&mut self, speed_ms: u64) {
        if self.is_running() {
            debug!("set_speed ignored while running");
            return;
        }
        self.speed_ms = speed_ms;
    }

    /// Apply every step due at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<RunUpdate> {
        let mut updates = Vec::new();
        while let Some(driver) = self.driver.as_mut() {
            let Some(step_time) = self.next_due.filter(|&due| due <= now) else {
                break;
            };
            let step = driver.next_step(&mut self.working, &mut self.counters, &self.cancel);
            self.publish(step, step_time, &mut updates);
        }
        updates
    }

    fn publish(&mut self, step: Step, step_time: Instant, updates: &mut Vec<RunUpdate>) {
        let live = self.run.status == RunStatus::Running;

        self.run.array.clone_from(&self.working);
        self.run.comparisons = self.counters.comparisons;
        self.run.swaps = self.counters.swaps;
        if live {
            if let Some(pair) = step.highlight() {
                self.run.highlighted = pair.to_vec();
            }
        }

        if step.is_terminal() {
            self.driver = None;
            self.next_due = None;
            if live && step == Step::Finished {
                self.run.status = RunStatus::Done;
                self.run.highlighted.clear();
                self.finished_at = Some(step_time);
                info!(
                    algorithm = self.algorithm.as_str(),
                    comparisons = self.run.comparisons,
                    swaps = self.run.swaps,
                    "sort finished"
                );
            } else {
                debug!(?step, "cancelled driver drained");
            }
        } else if step.waits_after() {
            self.next_due = Some(step_time + Duration::from_millis(self.speed_ms));
        } else {
            self.next_due = Some(step_time);
        }

        self.seq += 1;
        updates.push(RunUpdate::snapshot(self.seq, step, &self.run));
    }
}
