//! Property-based invariant tests for the autoplay timer and manual clock.
//!
//! ## Invariants
//!
//! 1. Fires summed over any poll schedule equal `floor(elapsed / interval)`
//! 2. A restart discards the partial interval: no fire before a full interval
//! 3. A cancelled timer never fires and every earlier handle is stale
//! 4. Manual clock clones observe the same time
//!
//! Run:
//!   cargo test -p folio-runtime --test proptest_timer_invariants

use folio_runtime::{AutoplayTimer, Clock, ManualClock};
use proptest::prelude::*;
use web_time::Duration;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_interval_ms() -> impl Strategy<Value = u64> {
    1u64..5_000
}

fn arb_steps() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..10_000, 1..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // ── 1. Fire accounting ───────────────────────────────────────────────

    #[test]
    fn fires_match_elapsed_intervals(interval in arb_interval_ms(), steps in arb_steps()) {
        let clock = ManualClock::new();
        let mut timer = AutoplayTimer::new(Duration::from_millis(interval));
        timer.start(clock.now());

        let mut total = 0u64;
        for step in &steps {
            clock.advance_ms(*step);
            total += u64::from(timer.poll(clock.now()));
        }
        let elapsed: u64 = steps.iter().sum();
        prop_assert_eq!(total, elapsed / interval);
    }

    // ── 2. Restart ───────────────────────────────────────────────────────

    #[test]
    fn restart_waits_a_full_interval(interval in arb_interval_ms(), before in 0u64..10_000) {
        let clock = ManualClock::new();
        let mut timer = AutoplayTimer::new(Duration::from_millis(interval));
        timer.start(clock.now());
        clock.advance_ms(before);
        timer.start(clock.now());

        clock.advance_ms(interval - 1);
        prop_assert_eq!(timer.poll(clock.now()), 0);
        clock.advance_ms(1);
        prop_assert_eq!(timer.poll(clock.now()), 1);
    }

    // ── 3. Cancellation ──────────────────────────────────────────────────

    #[test]
    fn cancelled_never_fires(interval in arb_interval_ms(), steps in arb_steps()) {
        let clock = ManualClock::new();
        let mut timer = AutoplayTimer::new(Duration::from_millis(interval));
        let handle = timer.start(clock.now());
        prop_assert!(timer.cancel());
        for step in steps {
            clock.advance_ms(step);
            prop_assert_eq!(timer.poll(clock.now()), 0);
        }
        prop_assert!(!timer.is_current(handle));
        prop_assert!(timer.time_until_due(clock.now()).is_none());
    }

    // ── 4. Shared clock ──────────────────────────────────────────────────

    #[test]
    fn clones_share_time(steps in arb_steps()) {
        let clock = ManualClock::new();
        let other = clock.clone();
        for step in steps {
            other.advance_ms(step);
            prop_assert_eq!(clock.now(), other.now());
        }
    }
}
