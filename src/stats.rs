//! Aggregation of per-trial results into means.

/// Online mean/standard-deviation accumulator (Welford's algorithm).
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    pub fn mean(&self) -> f64 {
        if self.n_vals == 0 {
            return f64::NAN;
        }
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        if self.n_vals < 2 {
            return f64::NAN;
        }
        (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-time-step accumulators for values recorded across independent trials.
///
/// Every trial records one value per time index; [`TrialSeries::means`] then
/// yields the cross-trial mean at each index, ready for an external renderer.
pub struct TrialSeries {
    acc_vec: Vec<Accumulator>,
}

impl TrialSeries {
    pub fn new(n_steps: usize) -> Self {
        let mut acc_vec = Vec::new();
        acc_vec.resize_with(n_steps, Accumulator::new);
        Self { acc_vec }
    }

    pub fn len(&self) -> usize {
        self.acc_vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acc_vec.is_empty()
    }

    pub fn record(&mut self, i_step: usize, val: f64) {
        self.acc_vec[i_step].add(val);
    }

    pub fn means(&self) -> Vec<f64> {
        self.acc_vec.iter().map(|acc| acc.mean()).collect()
    }
}
