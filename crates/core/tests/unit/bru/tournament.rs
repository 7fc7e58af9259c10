//! Tournament Predictor Tests.
//!
//! Verifies selector polarity, the selector update rule and the local/global
//! table geometry.

use bpsim_core::bru::counter::SaturatingCounter as C;
use bpsim_core::bru::tournament::TournamentPredictor;
use bpsim_core::{BranchPredictor, Outcome};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{N, T, tournament_config};

#[test]
fn geometry_follows_widths() {
    let bp = TournamentPredictor::new(&tournament_config(3, 2, 4));
    assert_eq!(bp.global_counters().len(), 8);
    assert_eq!(bp.selectors().len(), 8);
    assert_eq!(bp.local_counters().len(), 4);
}

/// Every table starts zeroed: counters strongly not-taken, selector strongly local.
#[test]
fn tables_start_strongly_not_taken() {
    let bp = TournamentPredictor::new(&tournament_config(3, 2, 4));
    assert!(bp.global_counters().iter().all(|&c| c == C::SN));
    assert!(bp.local_counters().iter().all(|&c| c == C::SN));
    assert!(bp.selectors().iter().all(|&c| c == C::SN));
    assert_eq!(bp.global_history(), 0);
}

/// Selector at SN picks the local predictor, which starts not-taken.
#[test]
fn initial_prediction_comes_from_local() {
    let bp = TournamentPredictor::new(&tournament_config(2, 2, 2));
    assert_eq!(bp.predict(0x10).outcome(), N);
}

/// One taken outcome only lifts a counter to WN, so the branch is still
/// predicted not-taken.
#[test]
fn single_taken_step_stays_not_taken() {
    let mut bp = TournamentPredictor::new(&tournament_config(2, 2, 2));
    assert_eq!(bp.step(0, T), N);
    assert_eq!(bp.local_counters(), &[C::WN, C::SN, C::SN, C::SN]);
    assert_eq!(bp.global_counters(), &[C::WN, C::SN, C::SN, C::SN]);
    assert_eq!(bp.predict(0).outcome(), N);
}

/// Local history is kept per PC index, global history across all branches.
#[test]
fn histories_track_their_scope() {
    let mut bp = TournamentPredictor::new(&tournament_config(4, 4, 2));
    let _ = bp.step(0b01, T);
    let _ = bp.step(0b10, N);
    let _ = bp.step(0b01, T);

    assert_eq!(bp.global_history(), 0b101);
    assert_eq!(bp.local_history(0b01), 0b11);
    assert_eq!(bp.local_history(0b10), 0b0);
    assert_eq!(bp.local_history(0b101), 0b11, "PC bits above P alias");
}

#[test]
fn local_history_is_masked() {
    let mut bp = TournamentPredictor::new(&tournament_config(4, 2, 2));
    for _ in 0..5 {
        let _ = bp.step(0, T);
    }
    assert_eq!(bp.local_history(0), 0b11);
}

/// When only global is right the selector moves toward global; while it
/// stays below WT the local prediction is still used.
#[test]
fn selector_moves_toward_correct_global() {
    let mut bp = TournamentPredictor::new(&tournament_config(1, 1, 1));
    for (pc, actual) in [(0, T), (0, T), (0, T)] {
        let _ = bp.step(pc, actual);
    }
    assert_eq!(bp.selectors(), &[C::SN, C::SN]);

    // ghr=1: global[1] is WT, pc 1's local history 0 reads local[0] at WN.
    assert_eq!(bp.step(1, T), N);
    assert_eq!(bp.selectors(), &[C::SN, C::WN]);

    let _ = bp.step(0, N);
    let _ = bp.step(0, T);

    // ghr=1 again: global says taken, local[1] (now WN) says not-taken.
    let p = bp.predict(0);
    assert_eq!(p.outcome(), N, "selector still favors local");
    bp.train(p, T);
    assert_eq!(bp.selectors(), &[C::SN, C::WT]);
    assert_eq!(bp.predict(0).outcome(), T, "selector now favors global");
}

/// A lone branch with `L == H` sees the same history in both halves, so the
/// sub-predictors always agree and the selector never moves.
#[test]
fn lone_branch_never_moves_selector() {
    let mut bp = TournamentPredictor::new(&tournament_config(3, 3, 2));
    let initial = bp.selectors().to_vec();
    for i in 0..100u32 {
        let _ = bp.step(0x40, Outcome::from(i % 3 != 0));
        assert_eq!(bp.selectors(), initial.as_slice());
    }
}

proptest! {
    /// A step on which the sub-predictors agree leaves the selector untouched.
    #[test]
    fn agreeing_step_leaves_selector(
        branches in prop::collection::vec((any::<u32>(), any::<bool>()), 1..200)
    ) {
        let mut bp = TournamentPredictor::new(&tournament_config(3, 3, 3));
        for (pc, taken) in branches {
            let before = bp.selectors().to_vec();
            let agreed = bp.global_counters()[bp.global_history() as usize].prediction()
                == bp.local_counters()[bp.local_history(pc) as usize].prediction();
            let _ = bp.step(pc, Outcome::from(taken));
            if agreed {
                prop_assert_eq!(bp.selectors(), before.as_slice());
            }
        }
    }
}

#[test]
fn reset_restores_initial_tables() {
    let fresh = TournamentPredictor::new(&tournament_config(3, 3, 2));
    let mut bp = fresh.clone();
    for pc in 0..32u32 {
        let _ = bp.step(pc * 3, Outcome::from(pc % 3 == 0));
    }
    bp.reset();
    assert_eq!(bp, fresh);
}
