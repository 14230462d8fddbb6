//! Histogram and smoothed density of one movie's ratings.
//!
//! The density is a Gaussian kernel estimate with Scott's bandwidth, scaled
//! so it sits on the same axis as the histogram counts.

/// Default histogram bin width: one half-star rating step
pub const DEFAULT_BIN_WIDTH: f64 = 0.5;

/// Number of points the density curve is sampled at
const DENSITY_POINTS: usize = 200;

/// One histogram bar covering `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Histogram plus density curve of a set of ratings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingDistribution {
    pub bins: Vec<HistogramBin>,
    /// `(rating, expected count)` samples of the density; empty when the
    /// sample has no spread
    pub density: Vec<(f64, f64)>,
    pub sample_size: usize,
}

impl RatingDistribution {
    pub fn is_empty(&self) -> bool {
        self.sample_size == 0
    }

    /// Tallest bar, or 0 for an empty distribution
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Left edge of the first bar and right edge of the last
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.lower, self.bins.last()?.upper))
    }
}

/// Build the histogram and density of `values`.
///
/// Bins are `bin_width` wide and centred on `min + k * bin_width`, so with
/// the default width each half-star rating gets its own bar. Non-finite
/// values are ignored.
pub fn rating_distribution(values: &[f32], bin_width: f64) -> RatingDistribution {
    let values: Vec<f64> = values
        .iter()
        .map(|&v| v as f64)
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() || bin_width <= 0.0 {
        return RatingDistribution::default();
    }

    let (min, max) = bounds(&values);
    let lower = min - bin_width / 2.0;
    let bin_count = ((max - min) / bin_width).round() as usize + 1;

    let mut counts = vec![0usize; bin_count];
    for value in &values {
        let slot = ((value - lower) / bin_width).floor() as usize;
        counts[slot.min(bin_count - 1)] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lower + i as f64 * bin_width,
            upper: lower + (i + 1) as f64 * bin_width,
            count,
        })
        .collect();

    RatingDistribution {
        bins,
        density: kernel_density(&values, bin_width),
        sample_size: values.len(),
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Gaussian KDE sampled over `[min, max]`, in expected counts per bin.
fn kernel_density(values: &[f64], bin_width: f64) -> Vec<(f64, f64)> {
    let n = values.len() as f64;
    if values.len() < 2 {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();
    if std_dev <= 0.0 {
        return Vec::new();
    }

    let bandwidth = std_dev * n.powf(-0.2);
    let scale = bin_width / (bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let (min, max) = bounds(values);
    let step = (max - min) / (DENSITY_POINTS - 1) as f64;

    (0..DENSITY_POINTS)
        .map(|i| {
            let x = min + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum();
            (x, scale * sum)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bins() {
        let dist = rating_distribution(&[4.0, 5.0, 5.0], DEFAULT_BIN_WIDTH);

        let counts: Vec<usize> = dist.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 2]);
        assert_eq!(dist.x_range(), Some((3.75, 5.25)));
        assert_eq!(dist.max_count(), 2);
        assert_eq!(dist.sample_size, 3);
    }

    #[test]
    fn test_counts_cover_every_value() {
        let values = [0.5, 1.0, 3.5, 4.0, 4.0, 4.5, 5.0, 5.0, 5.0, 2.5];
        let dist = rating_distribution(&values, DEFAULT_BIN_WIDTH);

        assert_eq!(dist.bins.len(), 10);
        assert_eq!(dist.bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }

    #[test]
    fn test_empty_input_is_degenerate() {
        let dist = rating_distribution(&[], DEFAULT_BIN_WIDTH);

        assert!(dist.is_empty());
        assert!(dist.bins.is_empty());
        assert!(dist.density.is_empty());
        assert_eq!(dist.x_range(), None);
        assert_eq!(dist.max_count(), 0);
    }

    #[test]
    fn test_no_density_without_spread() {
        let dist = rating_distribution(&[4.0, 4.0, 4.0], DEFAULT_BIN_WIDTH);

        assert_eq!(dist.bins.len(), 1);
        assert_eq!(dist.bins[0].count, 3);
        assert!(dist.density.is_empty());
    }

    #[test]
    fn test_density_peaks_near_mode() {
        let mut values = vec![5.0f32; 40];
        values.extend([3.0, 3.5, 4.0, 4.5]);
        let dist = rating_distribution(&values, DEFAULT_BIN_WIDTH);

        assert_eq!(dist.density.len(), DENSITY_POINTS);
        assert!(dist.density.iter().all(|&(_, y)| y >= 0.0));

        let (peak_x, _) = dist
            .density
            .iter()
            .copied()
            .fold((0.0, f64::MIN), |best, p| if p.1 > best.1 { p } else { best });
        assert!(peak_x > 4.5);
    }
}
