//! Predictor Engine Tests.
//!
//! Verifies that initialization selects exactly one scheme, rejects bad
//! geometry, and that the engine is deterministic and resettable.

use bpsim_core::bru::counter::SaturatingCounter;
use bpsim_core::{BranchPredictor, Config, ConfigError, Outcome, PredictorEngine, Scheme};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{
    N, T, capture_logs, engine, gshare_config, perceptron_config, replay, tournament_config,
};

#[rstest]
#[case(Scheme::Static, "Static")]
#[case(Scheme::GShare, "Gshare")]
#[case(Scheme::Tournament, "Tournament")]
#[case(Scheme::Perceptron, "Perceptron")]
#[case(Scheme::Custom, "Custom")]
fn initialize_selects_scheme(#[case] scheme: Scheme, #[case] name: &str) {
    let e = engine(&Config::with_scheme(scheme));
    assert_eq!(e.scheme(), scheme);
    assert_eq!(e.name(), name);
}

#[test]
fn gshare_engine_owns_sized_table() {
    let PredictorEngine::GShare(bp) = engine(&gshare_config(5)) else {
        panic!("expected a gshare engine");
    };
    assert_eq!(bp.counters().len(), 32);
    assert!(bp.counters().iter().all(|&c| c == SaturatingCounter::WN));
}

#[test]
fn custom_scheme_predicts_not_taken() {
    let mut e = engine(&Config::with_scheme(Scheme::Custom));
    let branches: Vec<_> = (0..8).map(|pc| (pc, T)).collect();
    assert_eq!(replay(&mut e, &branches), [N; 8]);
}

#[test]
fn custom_scheme_warns_once_at_initialize() {
    let (mut e, logs) = capture_logs(tracing::Level::WARN, || {
        engine(&Config::with_scheme(Scheme::Custom))
    });
    assert_eq!(logs.matches("WARN").count(), 1, "{logs}");
    assert!(logs.contains("Custom"), "{logs}");

    let ((), logs) = capture_logs(tracing::Level::WARN, || {
        let _ = e.step(0x40, T);
    });
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn real_schemes_do_not_warn() {
    let ((), logs) = capture_logs(tracing::Level::WARN, || {
        for config in [gshare_config(4), tournament_config(4, 4, 4), perceptron_config(8, 4)] {
            let _ = engine(&config);
        }
    });
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn initialize_logs_geometry_at_debug() {
    let (_, logs) = capture_logs(tracing::Level::DEBUG, || engine(&gshare_config(6)));
    assert!(logs.contains("initialized branch predictor"), "{logs}");
    assert!(logs.contains("ghistory=6"), "{logs}");
}

#[rstest]
#[case(perceptron_config(63, 30))]
#[case(tournament_config(30, 30, 30))]
fn oversized_tables_rejected(#[case] config: Config) {
    match PredictorEngine::initialize(&config) {
        Err(ConfigError::TableTooLarge { scheme, bytes, max }) => {
            assert_eq!(scheme, config.scheme);
            assert!(bytes > max);
        }
        other => panic!("expected TableTooLarge, got {other:?}"),
    }
}

#[rstest]
#[case(gshare_config(0), "global_history_bits")]
#[case(tournament_config(4, 0, 4), "local_history_bits")]
#[case(tournament_config(4, 4, 0), "pc_index_bits")]
#[case(perceptron_config(0, 4), "global_history_bits")]
fn zero_width_rejected(#[case] config: Config, #[case] expected: &str) {
    match PredictorEngine::initialize(&config) {
        Err(ConfigError::ZeroWidth { field }) => assert_eq!(field, expected),
        other => panic!("expected ZeroWidth, got {other:?}"),
    }
}

#[test]
fn oversized_width_rejected() {
    assert!(matches!(
        PredictorEngine::initialize(&gshare_config(31)),
        Err(ConfigError::WidthTooLarge { bits: 31, max: 30, .. })
    ));
    assert!(matches!(
        PredictorEngine::initialize(&perceptron_config(64, 4)),
        Err(ConfigError::WidthTooLarge { bits: 64, max: 63, .. })
    ));
}

/// Widths the static scheme never reads are not validated.
#[test]
fn unused_widths_ignored() {
    let config = Config {
        global_history_bits: 0,
        local_history_bits: 99,
        ..Config::with_scheme(Scheme::Static)
    };
    assert!(PredictorEngine::initialize(&config).is_ok());
}

#[test]
fn reset_equals_fresh_engine() {
    for config in [
        gshare_config(6),
        tournament_config(5, 4, 3),
        perceptron_config(12, 5),
    ] {
        let fresh = engine(&config);
        let mut e = engine(&config);
        let branches: Vec<_> = (0..200u32)
            .map(|i| (i.wrapping_mul(0x0101_0004), Outcome::from(i % 7 < 4)))
            .collect();
        let _ = replay(&mut e, &branches);
        e.reset();
        assert_eq!(e, fresh);
        assert_eq!(engine(&config), fresh, "initialize is idempotent");
    }
}

fn scheme_configs() -> impl Strategy<Value = Config> {
    prop_oneof![
        (1u32..=10).prop_map(gshare_config),
        (1u32..=8, 1u32..=8, 1u32..=6).prop_map(|(h, l, p)| tournament_config(h, l, p)),
        (1u32..=24, 1u32..=6).prop_map(|(h, p)| perceptron_config(h, p)),
    ]
}

proptest! {
    /// The same branch sequence into two fresh engines gives identical
    /// predictions and identical tables.
    #[test]
    fn deterministic(
        config in scheme_configs(),
        branches in prop::collection::vec((any::<u32>(), any::<bool>()), 0..300),
    ) {
        let branches: Vec<_> = branches
            .into_iter()
            .map(|(pc, taken)| (pc, Outcome::from(taken)))
            .collect();
        let mut a = engine(&config);
        let mut b = engine(&config);
        prop_assert_eq!(replay(&mut a, &branches), replay(&mut b, &branches));
        prop_assert_eq!(a, b);
    }
}
