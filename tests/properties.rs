//! Property-based tests for smoothing, time units and run labels.

use proptest::prelude::*;
use scalarplot::label::{normalize_dir, summarize};
use scalarplot::smooth::exponential_moving_average;
use scalarplot::timeunit::{shared_unit, TimeUnit};

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1e6f64..1e6, 1..200)
}

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}([_-][a-z0-9]{1,6}){0,3}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn smoothing_keeps_length_and_first_value(values in arb_values(), alpha in 0.0f64..0.999) {
        let out = exponential_moving_average(&values, alpha);
        prop_assert_eq!(out.len(), values.len());
        prop_assert_eq!(out[0], values[0]);
    }

    #[test]
    fn unsmoothed_series_is_unchanged(values in arb_values()) {
        prop_assert_eq!(exponential_moving_average(&values, 0.0), values);
    }

    #[test]
    fn smoothed_values_stay_within_the_input_range(values in arb_values(), alpha in 0.0f64..0.999) {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let slack = 1e-6 * (hi - lo).abs().max(1.0);
        for v in exponential_moving_average(&values, alpha) {
            prop_assert!(v >= lo - slack && v <= hi + slack);
        }
    }

    #[test]
    fn unit_choice_is_monotonic(a in 0.0f64..1e6, b in 0.0f64..1e6) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(TimeUnit::for_duration(short) <= TimeUnit::for_duration(long));
    }

    #[test]
    fn shared_unit_is_the_coarsest(maxima in proptest::collection::vec(0.0f64..1e5, 1..10)) {
        let shared = shared_unit(maxima.iter().copied()).unwrap();
        for m in &maxima {
            prop_assert!(TimeUnit::for_duration(*m) <= shared);
        }
        prop_assert!(maxima.iter().any(|m| TimeUnit::for_duration(*m) == shared));
    }

    #[test]
    fn identical_names_summarize_to_themselves(name in arb_name(), copies in 1usize..5) {
        let names = vec![name.clone(); copies];
        prop_assert_eq!(summarize(&names), name);
    }

    #[test]
    fn distinct_names_get_a_wildcard(a in arb_name(), b in arb_name()) {
        prop_assume!(a != b);
        let label = summarize(&[a.as_str(), b.as_str()]);
        prop_assert!(label.contains('*'));
    }

    #[test]
    fn text_before_the_first_wildcard_prefixes_every_name(
        names in proptest::collection::vec(arb_name(), 1..6)
    ) {
        let label = summarize(&names);
        let literal = label.split('*').next().unwrap_or("");
        for name in &names {
            prop_assert!(name.starts_with(literal), "{name} does not start with {literal}");
        }
    }

    #[test]
    fn normalizing_is_idempotent(dir in "[a-z/]{0,12}") {
        let once = normalize_dir(&dir);
        prop_assert_eq!(normalize_dir(&once), once.clone());
        prop_assert!(once == "/" || !once.ends_with('/'));
    }
}
