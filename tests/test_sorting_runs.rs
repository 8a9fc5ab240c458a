use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sortviz::engine::driver::{Step, sort_to_end};
use sortviz::engine::{Algorithm, RunController, RunStatus, RunUpdate};

fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(24 * 3600)
}

fn run_all(algorithm: Algorithm, values: Vec<u32>) -> (RunController, Vec<RunUpdate>) {
    let mut controller = RunController::with_seed(algorithm, 5, 0);
    controller.load_values(values);
    controller.start();
    let updates = controller.poll(far_future());
    (controller, updates)
}

fn is_sorted(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn random_arrays_sort_to_a_permutation() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for algorithm in Algorithm::ALL {
        for len in [0usize, 1, 2, 3, 7, 20, 41] {
            let input: Vec<u32> = (0..len).map(|_| rng.gen_range(10..110)).collect();
            let (controller, _) = run_all(algorithm, input.clone());
            let run = controller.run();

            let mut expected = input.clone();
            expected.sort_unstable();
            assert_eq!(run.array, expected, "{algorithm} on {input:?}");
            assert!(is_sorted(&run.array));
            if len > 0 {
                assert_eq!(run.status, RunStatus::Done);
            } else {
                assert_eq!(run.status, RunStatus::Ready);
            }
        }
    }
}

#[test]
fn controller_counts_match_direct_driver() {
    let input = vec![64, 25, 12, 22, 11, 90, 25];
    for algorithm in Algorithm::ALL {
        let mut direct = input.clone();
        let counters = sort_to_end(algorithm, &mut direct);
        let (controller, _) = run_all(algorithm, input.clone());
        assert_eq!(controller.run().comparisons, counters.comparisons);
        assert_eq!(controller.run().swaps, counters.swaps);
        assert_eq!(controller.run().array, direct);
    }
}

#[test]
fn reference_counts() {
    let (bubble, _) = run_all(Algorithm::Bubble, vec![5, 4, 3, 2, 1]);
    assert_eq!((bubble.run().comparisons, bubble.run().swaps), (10, 10));

    let (selection, _) = run_all(Algorithm::Selection, vec![5, 4, 3, 2, 1]);
    assert_eq!((selection.run().comparisons, selection.run().swaps), (10, 2));

    let (insertion, _) = run_all(Algorithm::Insertion, vec![2, 1]);
    assert_eq!((insertion.run().comparisons, insertion.run().swaps), (1, 1));
    assert_eq!(insertion.run().array, vec![1, 2]);
}

#[test]
fn updates_are_ordered_and_highlight_only_while_running() {
    for algorithm in Algorithm::ALL {
        let (_, updates) = run_all(algorithm, vec![8, 6, 7, 5, 3, 0, 9]);
        let (last, body) = updates.split_last().unwrap();

        assert_eq!(last.step, Step::Finished);
        assert_eq!(last.status, RunStatus::Done);
        assert!(last.highlighted.is_empty());

        for update in body {
            assert_eq!(update.status, RunStatus::Running);
            assert!(update.highlighted.len() <= 2);
            if let Step::Compare { left, right } = update.step {
                assert_eq!(update.highlighted, vec![left, right]);
            }
        }
        for pair in updates.windows(2) {
            assert!(pair[0].seq < pair[1].seq);
            assert!(pair[0].comparisons <= pair[1].comparisons);
            assert!(pair[0].swaps <= pair[1].swaps);
        }
    }
}

#[test]
fn every_comparison_is_published() {
    let (controller, updates) = run_all(Algorithm::Bubble, vec![4, 1, 3, 2]);
    let compares = updates
        .iter()
        .filter(|u| matches!(u.step, Step::Compare { .. }))
        .count() as u64;
    assert_eq!(compares, controller.run().comparisons);
    let swaps = updates
        .iter()
        .filter(|u| matches!(u.step, Step::Swap { .. }))
        .count() as u64;
    assert_eq!(swaps, controller.run().swaps);
}

#[test]
fn speed_paces_comparisons() {
    let mut controller = RunController::with_seed(Algorithm::Selection, 100, 0);
    controller.load_values(vec![3, 2, 1]);
    let t0 = Instant::now();
    controller.start_at(t0);

    let compares_by = |at: Instant, controller: &mut RunController| {
        controller
            .poll(at)
            .iter()
            .filter(|u| matches!(u.step, Step::Compare { .. }))
            .count()
    };

    assert_eq!(compares_by(t0, &mut controller), 1);
    assert_eq!(compares_by(t0 + Duration::from_millis(99), &mut controller), 0);
    assert_eq!(compares_by(t0 + Duration::from_millis(100), &mut controller), 1);
    assert_eq!(compares_by(t0 + Duration::from_millis(250), &mut controller), 1);
    assert!(controller.is_running());
    assert!(controller.next_due().is_some());
}

#[test]
fn late_first_poll_catches_up_on_every_due_step() {
    let mut controller = RunController::with_seed(Algorithm::Bubble, 50, 0);
    controller.load_values(vec![5, 4, 3, 2, 1]);
    let t0 = Instant::now();
    controller.start_at(t0);

    let updates = controller.poll(t0 + Duration::from_secs(1));
    let compares = updates
        .iter()
        .filter(|u| matches!(u.step, Step::Compare { .. }))
        .count();
    assert_eq!(compares, 10);
    assert_eq!(controller.run().status, RunStatus::Done);
    assert!(controller.next_due().is_none());
}

#[test]
fn cancel_then_new_run_starts_clean() {
    let mut controller = RunController::with_seed(Algorithm::Insertion, 20, 9);
    controller.new_run(20, 100);
    let t0 = Instant::now();
    controller.start_at(t0);
    controller.poll(t0 + Duration::from_millis(200));
    assert!(controller.is_running());

    controller.cancel();
    assert_eq!(controller.run().status, RunStatus::Ready);
    assert!(controller.run().highlighted.is_empty());

    controller.new_run(20, 100);
    let run = controller.run();
    assert_eq!(run.comparisons, 0);
    assert_eq!(run.swaps, 0);
    assert!(run.highlighted.is_empty());
    assert!(run.array.iter().all(|&v| (10..110).contains(&v)));
    assert!(controller.poll(far_future()).is_empty());
}
