//! Monte Carlo behaviour through the public API
//!
//! A tiny complexity ceiling forces sampling on cases small enough to know
//! the exact answer.

use enumerator::{ConditionSpec, EngineConfig, Enumerator, Mode, Request};

fn sampling_config(runs: u64, seed: u64) -> EngineConfig {
    EngineConfig {
        complexity_ceiling: 1.0,
        sample_runs: runs,
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

/// {1,2,3} with repetition, length 2: 9 arrangements, 6 of them distinct
fn small_request() -> Request {
    Request::new("1, 2, 3", Mode::Permutation, 2)
        .with_repetition()
        .with_condition(ConditionSpec::new("distinct"))
}

#[test]
fn test_every_arrangement_passing_gives_the_space() {
    let request = Request::new("1, 2, 3", Mode::Permutation, 2)
        .with_repetition()
        .with_condition(ConditionSpec::new("excludes").with_arg("9"));
    let result = Enumerator::new(sampling_config(1 << 12, 1)).run(&request).unwrap();
    assert!(result.is_approximation);
    assert_eq!(result.count, Some(9));
    assert_eq!(result.description, "via approximation");
}

#[test]
fn test_estimate_converges() {
    let runs = [1u64 << 12, 1 << 16, 1 << 20];
    let mut errors = Vec::new();
    for runs in runs {
        let mut total_error = 0.0;
        for seed in 0..8 {
            let result = Enumerator::new(sampling_config(runs, seed))
                .run(&small_request())
                .unwrap();
            assert!(result.is_approximation);
            let count = result.count.unwrap() as f64;
            total_error += (count - 6.0).abs();
        }
        errors.push(total_error / 8.0);
    }
    // counts are rounded, so a converged estimate is exact
    assert_eq!(errors[2], 0.0);
    assert!(errors[0] <= 1.0, "{:?}", errors);
}

#[test]
fn test_rejection_sampling_on_multiset() {
    // 1 followed by two of {1, 2, 3, 3}: 7 arrangements
    let request = Request::new("1, 1, 2, 3, 3", Mode::Permutation, 3)
        .with_condition(ConditionSpec::new("startsWith").with_arg("1"));
    let exact = Enumerator::default().run(&request).unwrap();
    assert!(!exact.is_approximation);
    assert_eq!(exact.count, Some(7));

    let sampled = Enumerator::new(sampling_config(1 << 18, 3)).run(&request).unwrap();
    assert!(sampled.is_approximation);
    let (e, s) = (exact.count.unwrap() as f64, sampled.count.unwrap() as f64);
    assert!((e - s).abs() <= 1.0, "exact {} sampled {}", e, s);
}

#[test]
fn test_too_few_valid_samples_is_not_an_error() {
    let config = EngineConfig {
        min_valid_samples: 1 << 12,
        ..sampling_config(1 << 12, 5)
    };
    let request = Request::new("1, 1, 2, 3, 4, 5, 6, 7", Mode::Permutation, 6)
        .with_condition(ConditionSpec::new("distinct"));
    let result = Enumerator::new(config).run(&request).unwrap();
    assert_eq!(result.count, None);
    assert!(!result.is_approximation);
    assert!(result.to_string().contains("too large to estimate"));
}

#[test]
fn test_large_search_space_is_sampled_by_default() {
    let input: Vec<String> = (1..=20).map(|i| i.to_string()).collect();
    let request = Request::new(&input.join(", "), Mode::Permutation, 20)
        .with_condition(ConditionSpec::new("startsWith").with_arg("1"));
    let config = EngineConfig {
        sample_runs: 1 << 16,
        seed: Some(11),
        ..EngineConfig::default()
    };
    let result = Enumerator::new(config).run(&request).unwrap();
    assert!(result.is_approximation);
    // 19! = 121645100408832000
    let estimate = result.count.unwrap() as f64;
    assert!((estimate / 121_645_100_408_832_000.0 - 1.0).abs() < 0.2);
}
