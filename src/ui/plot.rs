use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{ChartSpec, PieChart, ScatterChart};
use crate::color::HEADING;
use crate::dashboard::graph::OutputId;

/// Segments per full turn used to approximate pie arcs.
const ARC_SEGMENTS: f64 = 180.0;

// ---------------------------------------------------------------------------
// Output placeholder
// ---------------------------------------------------------------------------

/// Draw whatever chart is currently stored for `id`.
pub fn chart_output(ui: &mut Ui, id: OutputId, spec: Option<&ChartSpec>) {
    let Some(spec) = spec else {
        ui.label("Waiting for data…");
        return;
    };
    let background = match spec {
        ChartSpec::Pie(p) => p.background,
        ChartSpec::Scatter(s) => s.background,
    };

    egui::Frame::default()
        .fill(background.to_color32())
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(spec.title())
                        .strong()
                        .size(18.0)
                        .color(HEADING.to_color32()),
                );
            });
            if spec.is_empty() {
                ui.label("No launches match the current filters.");
            }
            match spec {
                ChartSpec::Pie(pie) => pie_chart(ui, id, pie),
                ChartSpec::Scatter(scatter) => scatter_chart(ui, id, scatter),
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Pie drawn as filled wedges on a unit circle, clockwise from 12 o'clock.
fn pie_chart(ui: &mut Ui, id: OutputId, pie: &PieChart) {
    Plot::new(id.as_str())
        .legend(Legend::default())
        .data_aspect(1.0)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .height(360.0)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for slice in &pie.slices {
                let fraction = pie.fraction(slice);
                let sweep = fraction * TAU;
                let color = slice.color.to_color32();

                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(wedge(start, sweep)))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = start - sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        RichText::new(format!("{:.1}%", fraction * 100.0)).strong(),
                    )
                    .color(Color32::BLACK),
                );
                start -= sweep;
            }
        });
}

/// Polygon outline of a wedge from angle `start` sweeping clockwise.
fn wedge(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start - sweep * (i as f64 / steps as f64);
        points.push([a.cos(), a.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, id: OutputId, scatter: &ScatterChart) {
    // Owned copy for the hover formatter.
    let hovers: Vec<(String, f64, f64, String)> = scatter
        .points()
        .map(|(s, p)| (s.name.clone(), p.x, p.y, p.hover.clone()))
        .collect();

    Plot::new(id.as_str())
        .legend(Legend::default())
        .x_axis_label(scatter.x_label.clone())
        .y_axis_label(scatter.y_label.clone())
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .height(380.0)
        .label_formatter(move |name, value| nearest_hover(&hovers, name, value))
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(series.color.to_color32())
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(6.0),
                );
            }
        });
}

/// Hover text of the point in series `name` closest to the cursor.
fn nearest_hover(hovers: &[(String, f64, f64, String)], name: &str, value: &PlotPoint) -> String {
    hovers
        .iter()
        .filter(|(series, ..)| series == name)
        .min_by(|a, b| {
            let da = (a.1 - value.x).abs() + (a.2 - value.y).abs();
            let db = (b.1 - value.x).abs() + (b.2 - value.y).abs();
            da.total_cmp(&db)
        })
        .map(|(.., hover)| hover.clone())
        .unwrap_or_else(|| format!("{:.0} kg\nclass {:.2}", value.x, value.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_at_centre_and_ends_on_arc() {
        let pts = wedge(FRAC_PI_2, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        let first = pts[1];
        let last = *pts.last().unwrap();
        assert!((first[0] - 0.0).abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn hover_picks_closest_point_in_series() {
        let hovers = vec![
            ("F9 v1.1".to_string(), 500.0, 0.0, "a".to_string()),
            ("F9 v1.1".to_string(), 3000.0, 1.0, "b".to_string()),
            ("F9 FT".to_string(), 2900.0, 1.0, "c".to_string()),
        ];
        assert_eq!(nearest_hover(&hovers, "F9 v1.1", &PlotPoint::new(2800.0, 1.0)), "b");
        assert!(nearest_hover(&hovers, "other", &PlotPoint::new(10.0, 0.0)).contains("10 kg"));
    }
}
