//! FILENAME: core/stats-engine/src/accumulator.rs
//! Running moments of a numeric column.
//!
//! Uses Welford's algorithm so variance stays accurate on columns with a
//! large mean and a small spread.

/// Single-pass accumulator for count, mean, sample variance, min and max.
#[derive(Debug, Clone, Default)]
pub struct MomentAccumulator {
    pub count: usize,
    pub mean: f64,
    /// Sum of squared differences from the running mean.
    pub m2: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MomentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[f64]) -> Self {
        let mut acc = Self::new();
        for &value in values {
            acc.add(value);
        }
        acc
    }

    /// Adds a numeric value to the accumulator.
    pub fn add(&mut self, value: f64) {
        self.count += 1;

        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));

        let delta = value - self.mean;
        self.mean += delta / (self.count as f64);
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Arithmetic mean, NaN when empty.
    pub fn mean(&self) -> f64 {
        if self.count > 0 {
            self.mean
        } else {
            f64::NAN
        }
    }

    /// Sample variance (n - 1 denominator), NaN below two values.
    pub fn sample_variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / ((self.count - 1) as f64)
        } else {
            f64::NAN
        }
    }

    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}
