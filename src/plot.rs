use crate::table::NumericSeries;
use crate::{min_and_max, Error, Result};
use plotters::prelude::*;
use std::path::Path;

/// widens the range by span/divisor on each side, or by 1 when the span is zero
fn padded(min: f64, max: f64, divisor: f64) -> (f64, f64) {
    let span = max - min;
    let margin = if span > 0. { span / divisor } else { 1. };
    (min - margin, max + margin)
}

/// plots the series as a line against the row index to svg
pub fn plot_series(series: &NumericSeries, fout: &Path) -> Result<()> {
    draw_line(series, fout).map_err(|e| Error::Plot(format!("{}: {}", fout.display(), e)))
}

fn draw_line(series: &NumericSeries, fout: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let xs: Vec<f64> = series.points.iter().map(|&(i, _)| i as f64).collect();
    let ys = series.values();
    let (xmin, xmax) = min_and_max(&xs[..]).ok_or("no numeric values to plot")?;
    let (ymin, ymax) = min_and_max(&ys[..]).ok_or("no numeric values to plot")?;
    let (xmin, xmax) = padded(xmin, xmax, 20.);
    let (ymin, ymax) = padded(ymin, ymax, 10.);
    if ![xmin, xmax, ymin, ymax].iter().all(|v| v.is_finite()) {
        return Err("plot range is not finite".into());
    }
    let root = SVGBackend::new(fout, (1600, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 24))
        .y_desc(series.name.clone())
        .x_desc("row")
        .x_label_formatter(&|x: &f64| format!("{:.0}", x))
        .y_label_formatter(&|y: &f64| format!("{:5}", y))
        .draw()?;
    let line = LineSeries::new(
        series.points.iter().map(|&(i, v)| (i as f64, v)),
        RGBColor(180, 10, 180).stroke_width(3),
    );
    chart.draw_series(line)?;
    root.present()?;
    Ok(())
}

/// hands the plot to the platform viewer without waiting for it
pub fn show(fout: &Path) -> Result<()> {
    open::that_detached(fout)?;
    Ok(())
}
