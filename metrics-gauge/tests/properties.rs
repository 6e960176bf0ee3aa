use std::{sync::Arc, time::SystemTime};

use metrics_gauge::{GaugeError, GaugePoint, LabelKey, LabelValues, LongGauge};
use proptest::{collection::vec as arb_vec, prelude::*};

fn gauge_with_keys(n: usize) -> LongGauge {
    let keys = (0..n).map(|i| LabelKey::from(format!("key{i}"))).collect();
    LongGauge::new("prop_gauge", "", "1", keys)
}

fn arb_label_tuple(arity: usize) -> impl Strategy<Value = Vec<String>> {
    arb_vec("[a-z]{1,4}", arity)
}

proptest! {
    #[test]
    fn test_equal_tuples_share_a_point(arity in 0usize..4, raw in arb_vec(arb_vec("[a-c]{1,2}", 3), 1..20)) {
        let gauge = gauge_with_keys(arity);
        let tuples = raw
            .into_iter()
            .map(|mut t| { t.resize(arity, String::from("x")); t })
            .collect::<Vec<_>>();

        let points = tuples
            .iter()
            .map(|t| gauge.get_or_create_time_series(t.clone()).unwrap())
            .collect::<Vec<_>>();

        for (i, a) in tuples.iter().enumerate() {
            for (j, b) in tuples.iter().enumerate() {
                prop_assert_eq!(a == b, Arc::ptr_eq(&points[i], &points[j]));
            }
        }

        let mut distinct = tuples.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(gauge.len(), distinct.len());
    }

    #[test]
    fn test_wrong_arity_is_rejected_without_side_effects(
        arity in 1usize..4,
        existing in arb_label_tuple(3),
        given in 0usize..6,
    ) {
        prop_assume!(given != arity);

        let gauge = gauge_with_keys(arity);
        let existing = existing.into_iter().take(arity).collect::<Vec<_>>();
        gauge.get_or_create_time_series(existing.clone()).unwrap().set(9).unwrap();

        let bad = vec!["v"; given];
        let expected = GaugeError::LabelArity { expected: arity, actual: given };
        prop_assert_eq!(gauge.remove_time_series(bad.clone()), Err(expected.clone()));
        prop_assert_eq!(gauge.get_or_create_time_series(bad).unwrap_err(), expected);

        prop_assert_eq!(gauge.len(), 1);
        let point = gauge.get_or_create_time_series(existing).unwrap();
        prop_assert_eq!(point.get_value(), 9);
    }

    #[test]
    fn test_removed_tuples_are_never_exported(tuples in arb_vec(arb_label_tuple(2), 1..16), remove in any::<prop::sample::Index>()) {
        let gauge = gauge_with_keys(2);
        for t in &tuples {
            gauge.get_or_create_time_series(t.clone()).unwrap();
        }

        let removed = LabelValues::from(remove.get(&tuples).clone());
        gauge.remove_time_series(removed.clone()).unwrap();

        match gauge.get_metric(SystemTime::now()) {
            Some(metric) => {
                prop_assert!(metric.time_series().iter().all(|ts| ts.label_values() != &removed));
            }
            None => prop_assert!(gauge.is_empty()),
        }
    }
}
