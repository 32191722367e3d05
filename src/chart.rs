// Reporter, rendering half: draws the two stacked bar charts (views on
// top, likes below) into a PNG and hands the image to the platform
// viewer. The two charts share the title axis; only the bottom one
// prints the titles, the top one keeps its x-axis bare.

use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use std::process::Command;

use crate::report::ReportRow;

const CHART_WIDTH: u32 = 1200;
const CHART_HEIGHT: u32 = 1000;

/// Render the report rows into `path` as a two-subplot figure: view
/// counts as blue bars on top, like counts as red bars below, each bar
/// annotated with its exact value. Rows are drawn in slice order, so
/// sort before calling.
pub fn render<P: AsRef<Path>>(rows: &[ReportRow], path: P) -> Result<()> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Clearing chart background: {}", e))?;
    let (views_area, likes_area) = root.split_vertically((CHART_HEIGHT / 2) as i32);

    draw_bar_chart(&views_area, rows, |r| r.view_count, "View Count", "Views", BLUE, false)?;
    draw_bar_chart(&likes_area, rows, |r| r.like_count, "Like Count", "Likes", RED, true)?;

    root.present()
        .map_err(|e| anyhow!("Writing chart image to {}: {}", path.display(), e))?;
    Ok(())
}

/// Open the rendered figure in the platform image viewer. The viewer is
/// spawned detached; the report run does not wait for it to close.
pub fn open_viewer<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    viewer_command(path)
        .spawn()
        .with_context(|| format!("Failed to open image viewer for {}", path.display()))?;
    Ok(())
}

fn draw_bar_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    rows: &[ReportRow],
    value: fn(&ReportRow) -> u64,
    caption: &str,
    y_desc: &str,
    color: RGBColor,
    show_titles: bool,
) -> Result<()> {
    let y_max = y_axis_max(rows, value);
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(if show_titles { 180 } else { 10 })
        .y_label_area_size(90)
        .build_cartesian_2d((0..rows.len().max(1)).into_segmented(), 0u64..y_max)
        .map_err(|e| anyhow!("Building {} chart: {}", caption, e))?;

    // Plotters only rotates text by quarter turns, so the title labels
    // are drawn at 90 degrees instead of matplotlib's usual 45.
    let label_font = ("sans-serif", 13).into_font().transform(FontTransform::Rotate90);
    let formatter = |pos: &SegmentValue<usize>| match pos {
        SegmentValue::CenterOf(i) => rows.get(*i).map(|r| r.title.clone()).unwrap_or_default(),
        _ => String::new(),
    };
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh().disable_y_mesh().y_desc(y_desc);
    if show_titles {
        mesh.x_labels(rows.len().max(1))
            .x_label_style(label_font)
            .x_label_formatter(&formatter);
    } else {
        mesh.disable_x_axis();
    }
    mesh.draw()
        .map_err(|e| anyhow!("Drawing {} axes: {}", caption, e))?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0u64),
                    (SegmentValue::Exact(i + 1), value(row)),
                ],
                color.filled(),
            )
        }))
        .map_err(|e| anyhow!("Drawing {} bars: {}", caption, e))?;

    let annotation_style = ("sans-serif", 15)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            Text::new(
                value(row).to_string(),
                (SegmentValue::CenterOf(i), value(row)),
                annotation_style.clone(),
            )
        }))
        .map_err(|e| anyhow!("Annotating {} bars: {}", caption, e))?;

    Ok(())
}

/// Upper bound for the y axis: the tallest bar plus ten percent of
/// headroom so the value annotation above it stays inside the plot.
fn y_axis_max(rows: &[ReportRow], value: fn(&ReportRow) -> u64) -> u64 {
    let max = rows.iter().map(value).max().unwrap_or(0);
    max + max / 10 + 1
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(views: u64, likes: u64) -> ReportRow {
        ReportRow {
            title: "t".to_string(),
            view_count: views,
            like_count: likes,
        }
    }

    #[test]
    fn y_axis_leaves_headroom_above_tallest_bar() {
        let rows = vec![row(100, 3), row(40, 9)];
        assert_eq!(y_axis_max(&rows, |r| r.view_count), 111);
        assert_eq!(y_axis_max(&rows, |r| r.like_count), 9 + 1);
    }

    #[test]
    fn empty_report_still_gets_a_non_degenerate_axis() {
        assert_eq!(y_axis_max(&[], |r| r.view_count), 1);
    }
}
