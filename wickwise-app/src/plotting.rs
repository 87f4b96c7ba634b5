//! PNG charts for environment sweeps.

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;
use wickwise_core::sweep::SweepPoint;

/// Padded axis range; a degenerate range is widened so plotters can draw it.
fn padded_range(values: impl Iterator<Item = f64>, pad_fraction: f64) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if max > min {
        let span = max - min;
        (min - span * pad_fraction, max + span * pad_fraction)
    } else {
        (min - 1.0, max + 1.0)
    }
}

/// Flow time and the three scores against the swept variable.
pub fn plot_sweep(output_dir: &Path, x_label: &str, xs: &[f64], points: &[SweepPoint]) -> Result<()> {
    if points.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }
    plot_flow_time(output_dir, x_label, xs, points)?;
    plot_scores(output_dir, x_label, xs, points)?;
    println!("[Plotting] Sweep graphs have been saved to '{}'.", output_dir.display());
    Ok(())
}

fn plot_flow_time(output_dir: &Path, x_label: &str, xs: &[f64], points: &[SweepPoint]) -> Result<()> {
    let path = output_dir.join("1_flow_time.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_range(xs.iter().copied(), 0.0);
    let (_, y_max) = padded_range(points.iter().map(|p| p.output.results.flow_time), 0.1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Flow Time", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart.configure_mesh().x_desc(x_label).y_desc("Flow time (min)").draw()?;

    chart
        .draw_series(LineSeries::new(
            xs.iter().zip(points).map(|(x, p)| (*x, p.output.results.flow_time)),
            BLUE.stroke_width(3),
        ))?
        .label("Flow time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));
    chart.draw_series(
        xs.iter()
            .zip(points)
            .map(|(x, p)| Circle::new((*x, p.output.results.flow_time), 4, BLUE.filled())),
    )?;

    // Readable window for a visual test strip.
    for bound in [5.0, 15.0] {
        chart.draw_series(DashedLineSeries::new(
            vec![(x_min, bound), (x_max, bound)],
            5,
            5,
            (&BLACK).into(),
        ))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn plot_scores(output_dir: &Path, x_label: &str, xs: &[f64], points: &[SweepPoint]) -> Result<()> {
    let path = output_dir.join("2_scores.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_range(xs.iter().copied(), 0.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Predicted Performance", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 40f64..100f64)?;

    chart.configure_mesh().x_desc(x_label).y_desc("Score (%)").draw()?;

    let series: [(&str, RGBColor, fn(&SweepPoint) -> f64); 3] = [
        ("Sensitivity", RED, |p| p.output.results.sensitivity),
        ("Specificity", GREEN, |p| p.output.results.specificity),
        ("Stability", BLUE, |p| p.output.results.stability),
    ];
    for (name, color, metric) in series {
        chart
            .draw_series(LineSeries::new(
                xs.iter().zip(points).map(|(x, p)| (*x, metric(p) * 100.0)),
                color.stroke_width(2),
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Grouped bars of the three scores for each named environment preset.
pub fn plot_preset_comparison(output_dir: &Path, points: &[SweepPoint]) -> Result<()> {
    if points.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }
    let path = output_dir.join("1_presets.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
    let mut chart = ChartBuilder::on(&root)
        .caption("Performance by Environment", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..points.len() as f64, 0f64..100f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(points.len() * 2 + 1)
        .x_label_formatter(&|x| {
            let centre = x - 0.5;
            if centre >= 0.0 && (centre - centre.round()).abs() < 1e-6 {
                labels.get(centre.round() as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_desc("Score (%)")
        .draw()?;

    let bar_width = 0.26;
    let series: [(&str, RGBColor, fn(&SweepPoint) -> f64); 3] = [
        ("Sensitivity", RED, |p| p.output.results.sensitivity),
        ("Specificity", GREEN, |p| p.output.results.specificity),
        ("Stability", BLUE, |p| p.output.results.stability),
    ];
    for (j, (name, color, metric)) in series.into_iter().enumerate() {
        chart
            .draw_series(points.iter().enumerate().map(|(i, p)| {
                let left = i as f64 + 0.1 + j as f64 * bar_width;
                Rectangle::new([(left, 0.0), (left + bar_width * 0.9, metric(p) * 100.0)], color.filled())
            }))?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    println!("[Plotting] Preset comparison saved to '{}'.", path.display());
    Ok(())
}
