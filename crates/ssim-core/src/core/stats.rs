//! Descriptive statistics, Gaussian kernel density estimation and
//! through-origin regression over plain `f64` samples.
//!
//! Conventions follow the usual data-frame semantics: the standard deviation
//! is the sample one (n − 1), quantiles interpolate linearly between order
//! statistics, and an empty sample has no mean, median or quantile.

use std::f64::consts::PI;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Sample standard deviation; needs at least two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile `q` in `[0, 1]` with linear interpolation.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let sorted = sorted(values);
    quantile_sorted(&sorted, q)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Summary of one sample, in the order of a `describe()` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Description {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Description {
    pub const ROW_NAMES: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Values in [`Self::ROW_NAMES`] order.
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            Some(self.mean),
            self.std,
            Some(self.min),
            Some(self.q25),
            Some(self.median),
            Some(self.q75),
            Some(self.max),
        ]
    }
}

pub fn describe(values: &[f64]) -> Option<Description> {
    let sorted = sorted(values);
    Some(Description {
        count: sorted.len(),
        mean: mean(&sorted)?,
        std: std_dev(&sorted),
        min: *sorted.first()?,
        q25: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q75: quantile_sorted(&sorted, 0.75)?,
        max: *sorted.last()?,
    })
}

/// `n` evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Gaussian kernel density estimate whose kernel width is a multiple of the
/// sample standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Returns `None` for samples with fewer than two distinct values or a
    /// non-positive bandwidth factor, where no density can be estimated.
    pub fn new(samples: &[f64], bandwidth_factor: f64) -> Option<Self> {
        if bandwidth_factor <= 0.0 {
            return None;
        }
        let std = std_dev(samples)?;
        if std <= f64::EPSILON {
            return None;
        }
        Some(Self {
            samples: samples.to_vec(),
            bandwidth: bandwidth_factor * std,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.samples.len() as f64 * self.bandwidth * (2.0 * PI).sqrt());
        self.samples
            .iter()
            .map(|s| {
                let z = (x - s) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            * norm
    }

    /// Range covering the samples extended by `cut` bandwidths on each side.
    pub fn support(&self, cut: f64) -> (f64, f64) {
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        (min - cut * self.bandwidth, max + cut * self.bandwidth)
    }

    /// Density evaluated at `n` points over `[start, end]`.
    pub fn curve(&self, start: f64, end: f64, n: usize) -> Vec<(f64, f64)> {
        linspace(start, end, n)
            .into_iter()
            .map(|x| (x, self.density(x)))
            .collect()
    }
}

/// Least-squares line `y = slope * x` forced through the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    /// Coefficient of determination against the mean of `y`.
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x
    }
}

pub fn fit_through_origin(points: &[(f64, f64)]) -> Option<LinearFit> {
    let sxx: f64 = points.iter().map(|(x, _)| x * x).sum();
    if points.is_empty() || sxx <= f64::EPSILON {
        return None;
    }
    let sxy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let slope = sxy / sxx;

    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / points.len() as f64;
    let ss_res: f64 = points.iter().map(|(x, y)| (y - slope * x).powi(2)).sum();
    let ss_tot: f64 = points.iter().map(|(_, y)| (y - y_mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else if ss_res == 0.0 {
        1.0
    } else {
        0.0
    };

    Some(LinearFit { slope, r_squared })
}

/// Equal-width histogram over `[start, end]`; values outside are ignored.
/// Returns `(bin_start, bin_end, count)` per bin.
pub fn histogram(values: &[f64], start: f64, end: f64, bins: usize) -> Vec<(f64, f64, usize)> {
    if bins == 0 || end <= start {
        return Vec::new();
    }
    let width = (end - start) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values.iter().filter(|v| (start..=end).contains(*v)) {
        let index = (((v - start) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = start + width * i as f64;
            (lo, lo + width, count)
        })
        .collect()
}
