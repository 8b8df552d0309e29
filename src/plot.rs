//! Rendering of electrode traces and experimenter statistics into PNG figures.
//!
//! The figures only consume the results of the store operations, so the layout logic
//! ([`electrode_grid_cell`], [`bar_range`]) is kept separate from the drawing.
use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;

use crate::electrode::ElectrodeTrace;
use crate::error::StimError;
use crate::store::{ExperimenterBias, LabeledRecordingStore};

/// Number of rows of the electrode figure.
pub const GRID_ROWS: usize = 2;
/// Number of columns of the electrode figure.
pub const GRID_COLS: usize = 5;
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
const FONT_SIZE_MAIN_TITLE: i32 = 24;
const FONT_SIZE_CHART_TITLE: i32 = 18;
/// Titles of the three panels of the experimenter figure.
pub const BIAS_TITLES: [&str; 3] = ["Mean", "Standard deviation", "Median"];

fn plot_error<E: Display>(e: E) -> StimError {
    StimError::PlotError(e.to_string())
}

/// Returns the (row, column) of the `index`-th panel of the electrode figure.
/// Panels fill the grid row by row, wrapping every `GRID_COLS` panels.
pub fn electrode_grid_cell(index: usize) -> Result<(usize, usize), StimError> {
    if index >= GRID_ROWS * GRID_COLS {
        return Err(StimError::OutOfRange(format!(
            "panel {} does not fit in a {}x{} grid",
            index, GRID_ROWS, GRID_COLS
        )));
    }
    Ok((index / GRID_COLS, index % GRID_COLS))
}

/// Returns the lowest and highest finite values, or `None` if there is none.
pub fn finite_bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Returns the vertical range of a trace: its finite bounds widened by 15% on both sides
/// (0.5 for a flat trace), or [0, 1] when no value is finite.
pub fn line_range(values: &[f64]) -> (f64, f64) {
    let Some((lo, hi)) = finite_bounds(values) else {
        return (0.0, 1.0);
    };
    let padding = if hi - lo < 1e-6 { 0.5 } else { (hi - lo) * 0.15 };
    (lo - padding, hi + padding)
}

/// Returns the vertical range of a bar chart: from zero (or the lowest negative bar) to the highest bar.
/// Undefined (NaN) values are ignored.
pub fn bar_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = finite_bounds(values).map_or((0.0, 0.0), |(lo, hi)| (lo.min(0.0), hi.max(0.0)));
    if hi - lo < 1e-12 {
        return (lo, lo + 1.0);
    }
    (lo, hi + (hi - lo) * 0.15)
}

/// Render the traces of the given electrodes for one subject and repetition into a 2x5 grid.
pub fn plot_electrode(
    store: &LabeledRecordingStore,
    subject_id: usize,
    repetition_number: usize,
    electrode_numbers: &[usize],
    output_file: &Path,
) -> Result<(), StimError> {
    if electrode_numbers.len() > GRID_ROWS * GRID_COLS {
        return Err(StimError::OutOfRange(format!(
            "{} electrodes requested, at most {} panels available",
            electrode_numbers.len(),
            GRID_ROWS * GRID_COLS
        )));
    }
    let traces = store.select_electrode_trace(subject_id, repetition_number, electrode_numbers)?;
    let title = format!("Rat {} - repetition {}", subject_id, repetition_number);
    draw_electrode_grid(&traces, &title, output_file)?;
    log::info!("Electrode plot saved as '{}'", output_file.display());
    Ok(())
}

fn draw_electrode_grid(
    traces: &[ElectrodeTrace],
    title: &str,
    output_file: &Path,
) -> Result<(), StimError> {
    let root_area = BitMapBackend::new(output_file, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_error)?;
    let root_area = root_area
        .titled(title, ("sans-serif", FONT_SIZE_MAIN_TITLE))
        .map_err(plot_error)?;
    let sub_plot_areas = root_area.split_evenly((GRID_ROWS, GRID_COLS));

    for (index, trace) in traces.iter().enumerate() {
        let (row, col) = electrode_grid_cell(index)?;
        let area = &sub_plot_areas[row * GRID_COLS + col];

        let (y_min, y_max) = line_range(&trace.y);

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("electrode {}", trace.electrode),
                ("sans-serif", FONT_SIZE_CHART_TITLE),
            )
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(1.0..trace.len().max(2) as f64, y_min..y_max)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_labels(5)
            .y_labels(5)
            .draw()
            .map_err(plot_error)?;

        chart
            .draw_series(LineSeries::new(
                trace.points().into_iter().filter(|(_, y)| y.is_finite()),
                &BLUE,
            ))
            .map_err(plot_error)?;
    }

    root_area.present().map_err(plot_error)?;
    Ok(())
}

/// Render the mean, standard deviation and median of each experimenter as three bar charts.
/// Experimenters without any subject are left without a bar.
pub fn plot_experimenter_bias(bias: &ExperimenterBias, output_file: &Path) -> Result<(), StimError> {
    let names = bias.names();
    let panels = [bias.means(), bias.stds(), bias.medians()];

    let root_area = BitMapBackend::new(output_file, (PLOT_WIDTH, PLOT_HEIGHT / 2)).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_error)?;
    let sub_plot_areas = root_area.split_evenly((1, BIAS_TITLES.len()));

    for ((area, title), values) in sub_plot_areas.iter().zip(BIAS_TITLES).zip(panels.iter()) {
        let (y_min, y_max) = bar_range(values);

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d((0..names.len()).into_segmented(), y_min..y_max)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(names.len().max(1))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => names.get(*i).map(|n| n.to_string()).unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(plot_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.mix(0.7).filled())
                    .margin(20)
                    .data(
                        values
                            .iter()
                            .enumerate()
                            .filter(|(_, v)| v.is_finite())
                            .map(|(i, v)| (i, *v)),
                    ),
            )
            .map_err(plot_error)?;
    }

    root_area.present().map_err(plot_error)?;
    log::info!("Experimenter bias plot saved as '{}'", output_file.display());
    Ok(())
}
