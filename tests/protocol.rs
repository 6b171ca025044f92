/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stream_est::est::definitions::{Definition, DynamicEstimator};
use stream_est::{Estimator, RingBuffer, SlidingExtremum};

const DEFINITIONS: &[&str] = &[
    "sum(4)",
    "sma(5)",
    "ema(6)",
    "variance(4, population)",
    "stddev(7)",
    "min_max(1)",
    "min_max(5, 3).min",
    "momentum(3)",
    "bollinger_bands(6, 2.0).upper_band",
    "bollinger_bands(6, 1.5).lower_band",
    "stochastic(5, 3)",
    "stochastic(4, 2).d",
    "stochastic(3, 1).d",
    "macd(3, 7, 4)",
    "macd(3, 7, 4).histogram",
    "macd(2, 3, 1).signal",
];

fn build(definition: &str) -> DynamicEstimator {
    definition.parse::<Definition>().unwrap().build()
}

fn lanes(estimator: &DynamicEstimator) -> Vec<u64> {
    estimator.outputs().iter().map(|v| v.to_bits()).collect()
}

fn random_value(rng: &mut StdRng) -> f64 {
    (rng.gen_range(-50..50) as f64) * 0.25
}

#[test]
fn should_leave_no_trace_of_previews() {
    let mut rng = StdRng::seed_from_u64(7);

    for definition in DEFINITIONS {
        //given
        let mut previewed = build(definition);
        let mut committed_only = build(definition);

        for _ in 0..300 {
            //when
            for _ in 0..rng.gen_range(0..4) {
                previewed.preview(random_value(&mut rng));
            }
            let value = random_value(&mut rng);
            let status = previewed.commit(value);

            //then
            assert_eq!(committed_only.commit(value), status, "{definition}");
            assert_eq!(lanes(&committed_only), lanes(&previewed), "{definition}");
            assert_eq!(committed_only.is_ready(), previewed.is_ready());
        }
    }
}

#[test]
fn should_preview_as_if_committed() {
    let mut rng = StdRng::seed_from_u64(11);

    for definition in DEFINITIONS {
        let mut estimator = build(definition);
        estimator.commit(random_value(&mut rng));

        for _ in 0..300 {
            //given
            let value = random_value(&mut rng);
            let mut reference = estimator.clone();

            //when
            let previewed_status = estimator.preview(value);
            let reference_status = reference.commit(value);

            //then
            assert_eq!(reference_status, previewed_status, "{definition}");
            assert_eq!(lanes(&reference), lanes(&estimator), "{definition}");

            estimator.commit(random_value(&mut rng));
        }
    }
}

#[test]
fn should_reset_to_fresh_state() {
    let mut rng = StdRng::seed_from_u64(13);

    for definition in DEFINITIONS {
        //given
        let mut reused = build(definition);
        for _ in 0..rng.gen_range(1..50) {
            reused.commit(random_value(&mut rng));
        }
        reused.preview(random_value(&mut rng));

        //when
        reused.reset();
        reused.reset();
        let mut fresh = build(definition);

        //then
        assert!(!reused.is_ready());
        for _ in 0..100 {
            let value = random_value(&mut rng);
            assert_eq!(fresh.commit(value), reused.commit(value), "{definition}");
            assert_eq!(lanes(&fresh), lanes(&reused), "{definition}");
        }
    }
}

#[test]
fn should_ignore_preview_before_first_commit() {
    for definition in DEFINITIONS {
        let mut estimator = build(definition);

        estimator.preview(1.0);

        assert!(!estimator.is_ready());
        assert!(estimator.outputs().iter().all(|v| v.is_nan()), "{definition}");
    }
}

#[test]
fn should_keep_collections_consistent_under_previews() {
    //given
    let mut rng = StdRng::seed_from_u64(17);
    let mut buffer = RingBuffer::<i64>::new(5);
    let mut extremum = SlidingExtremum::<i64>::new(5);
    let mut history = Vec::new();

    for _ in 0..1000 {
        //when
        let candidate = rng.gen_range(-100..100);
        buffer.preview(candidate);
        extremum.preview(candidate);
        let value = rng.gen_range(-100..100);
        buffer.commit(value);
        extremum.commit(value);
        history.push(value);

        //then
        let tail = &history[history.len().saturating_sub(5)..];
        assert_eq!(tail, buffer.to_sequence().as_slice());
        assert!(buffer.len() <= buffer.capacity());
        if let Some(extrema) = extremum.get() {
            assert_eq!(*tail.iter().max().unwrap(), extrema.max);
            assert_eq!(*tail.iter().min().unwrap(), extrema.min);
        }
    }
}
