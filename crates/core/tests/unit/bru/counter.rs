//! Saturating Counter Tests.
//!
//! Verifies the tier walk `SN → WN → WT → ST`, clamping at both ends, and the
//! taken/not-taken split.

use bpsim_core::Outcome;
use bpsim_core::bru::counter::SaturatingCounter;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(SaturatingCounter::SN, false)]
#[case(SaturatingCounter::WN, false)]
#[case(SaturatingCounter::WT, true)]
#[case(SaturatingCounter::ST, true)]
fn upper_half_predicts_taken(#[case] counter: SaturatingCounter, #[case] taken: bool) {
    assert_eq!(counter.is_taken(), taken);
    assert_eq!(counter.prediction(), Outcome::from(taken));
}

#[test]
fn default_is_strongly_not_taken() {
    assert_eq!(SaturatingCounter::default(), SaturatingCounter::SN);
}

#[test]
fn new_clamps_to_strongly_taken() {
    assert_eq!(SaturatingCounter::new(2), SaturatingCounter::WT);
    assert_eq!(SaturatingCounter::new(7), SaturatingCounter::ST);
}

#[test]
fn saturates_at_both_ends() {
    let mut c = SaturatingCounter::ST;
    c.increment();
    assert_eq!(c, SaturatingCounter::ST);

    let mut c = SaturatingCounter::SN;
    c.decrement();
    assert_eq!(c, SaturatingCounter::SN);
}

#[test]
fn update_walks_tiers() {
    let mut c = SaturatingCounter::SN;
    let mut seen = Vec::new();
    for _ in 0..4 {
        c.update(Outcome::Taken);
        seen.push(c);
    }
    assert_eq!(
        seen,
        [
            SaturatingCounter::WN,
            SaturatingCounter::WT,
            SaturatingCounter::ST,
            SaturatingCounter::ST
        ]
    );
}

proptest! {
    /// The counter equals `clamp(start + Σ steps)` evaluated step by step.
    #[test]
    fn saturation_law(start in 0u8..4, steps in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut c = SaturatingCounter::new(start);
        let mut model = i32::from(start);
        for taken in steps {
            c.update(Outcome::from(taken));
            model = (model + if taken { 1 } else { -1 }).clamp(0, 3);
            prop_assert_eq!(i32::from(c.value()), model);
        }
    }
}
