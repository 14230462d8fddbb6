//! SVG rendering of a rating distribution.

use std::path::Path;

use analysis::RatingDistribution;
use anyhow::{Context, Result};
use plotters::prelude::*;
use tracing::info;

const CHART_SIZE: (u32, u32) = (800, 600);

/// Draw the histogram bars and density curve of `distribution` to an SVG
/// file at `path`.
///
/// An empty distribution still produces a chart, with axes and no bars.
pub fn render_distribution_chart(
    distribution: &RatingDistribution,
    title: &str,
    path: &Path,
) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = distribution.x_range().unwrap_or((0.0, 5.5));
    let density_peak = distribution
        .density
        .iter()
        .map(|&(_, y)| y)
        .fold(0.0f64, f64::max);
    let y_max = (distribution.max_count() as f64).max(density_peak).max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Distribution of Ratings for {}", title),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Rating")
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(distribution.bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
            BLUE.mix(0.5).filled(),
        )
    }))?;

    if !distribution.density.is_empty() {
        chart.draw_series(LineSeries::new(
            distribution.density.iter().copied(),
            RED.stroke_width(2),
        ))?;
    }

    root.present()
        .with_context(|| format!("Writing chart to {}", path.display()))?;
    info!(
        "Wrote rating distribution of {} ({} ratings) to {}",
        title,
        distribution.sample_size,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis::{DEFAULT_BIN_WIDTH, rating_distribution};
    use tempfile::TempDir;

    #[test]
    fn test_chart_has_bars_and_caption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fight_club.svg");
        let dist = rating_distribution(&[5.0, 4.5, 4.0, 5.0, 3.0, 5.0, 4.0], DEFAULT_BIN_WIDTH);

        render_distribution_chart(&dist, "Fight Club (1999)", &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Distribution of Ratings for Fight Club (1999)"));
        assert!(svg.contains("Rating"));
        assert!(svg.contains("Frequency"));
        assert!(svg.matches("<rect").count() > dist.bins.len());
    }

    #[test]
    fn test_empty_distribution_draws_axes_only() {
        let dir = TempDir::new().unwrap();
        let empty_path = dir.path().join("empty.svg");
        let full_path = dir.path().join("full.svg");

        let empty = rating_distribution(&[], DEFAULT_BIN_WIDTH);
        let full = rating_distribution(&[1.0, 2.0, 3.0, 4.0, 5.0], DEFAULT_BIN_WIDTH);
        render_distribution_chart(&empty, "Nothing (2000)", &empty_path).unwrap();
        render_distribution_chart(&full, "Something (2000)", &full_path).unwrap();

        let empty_svg = std::fs::read_to_string(&empty_path).unwrap();
        let full_svg = std::fs::read_to_string(&full_path).unwrap();
        assert!(empty_svg.contains("Distribution of Ratings for Nothing (2000)"));
        assert!(empty_svg.matches("<rect").count() < full_svg.matches("<rect").count());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("chart.svg");
        let dist = rating_distribution(&[4.0, 5.0], DEFAULT_BIN_WIDTH);

        assert!(render_distribution_chart(&dist, "Fight Club (1999)", &path).is_err());
    }
}
