#![cfg(feature = "dev")]
use approx::assert_abs_diff_eq;
use fastPsis::prelude::*;
use ndarray::Array3;

/// Minimal deterministic LCG for reproducible continuous test data.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 32) as f64 / (u64::MAX >> 32) as f64
    }
}

fn test_log_ratios(n_data: usize, n_draw: usize, n_chain: usize, seed: u64) -> Array3<f64> {
    let mut rng = SimpleRng::new(seed);
    Array3::from_shape_fn((n_data, n_draw, n_chain), |_| {
        -rng.next_f64().max(1e-12).ln() * 0.7
    })
}

#[test]
fn test_tail_pass_consistency() {
    let log_ratios = test_log_ratios(30, 100, 4, 13);

    // Sequential smoothing
    let seq_res = Psis::new()
        .adapter(Array)
        .parallel(false)
        .build()
        .unwrap()
        .smooth(&log_ratios)
        .unwrap();

    // Parallel smoothing
    let par_res = Psis::new()
        .adapter(Array)
        .parallel(true)
        .build()
        .unwrap()
        .smooth(&log_ratios)
        .unwrap();

    for i in 0..30 {
        assert_abs_diff_eq!(par_res.pareto_k[i], seq_res.pareto_k[i], epsilon = 1e-12);
        assert_eq!(par_res.tail_len[i], seq_res.tail_len[i]);
    }
    assert_eq!(par_res.weights, seq_res.weights);
    println!("Tail pass consistency (30 points): OK");
}

#[test]
fn test_loo_consistency() {
    let log_lik = test_log_ratios(20, 150, 2, 47).mapv(|v| -v);

    let seq_res = Psis::new()
        .cv_method(Loo)
        .adapter(Array)
        .parallel(false)
        .build()
        .unwrap()
        .estimate(&log_lik)
        .unwrap();

    let par_res = Psis::new()
        .cv_method(Loo)
        .adapter(Array)
        .parallel(true)
        .build()
        .unwrap()
        .estimate(&log_lik)
        .unwrap();

    assert_abs_diff_eq!(par_res.elpd(), seq_res.elpd(), epsilon = 1e-12);
    assert_abs_diff_eq!(
        par_res.summary.overfit.total,
        seq_res.summary.overfit.total,
        epsilon = 1e-12
    );
    for i in 0..20 {
        assert_abs_diff_eq!(
            par_res.pointwise.loo_est[i],
            seq_res.pointwise.loo_est[i],
            epsilon = 1e-12
        );
    }
    println!("LOO consistency (20 points): OK");
}
