use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use eframe::egui::{self, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::charts::{PieFigure, ScatterFigure, wedge_polygons};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Paint the success pie with a legend on the right. Slices run clockwise
/// from twelve o'clock.
pub fn success_pie(ui: &mut Ui, figure: &PieFigure, height: f32) {
    ui.strong(figure.title.as_str());

    let size = Vec2::new(ui.available_width(), height);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    if figure.is_empty() {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No launches for this selection",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let radius = (rect.height() * 0.45).min(rect.width() * 0.3);
    let center = Pos2::new(rect.left() + radius + 16.0, rect.center().y);
    let to_screen = |[x, y]: [f64; 2], r: f32| {
        Pos2::new(center.x + x as f32 * r, center.y - y as f32 * r)
    };

    let mut done = 0.0;
    for slice in &figure.slices {
        let sweep = slice.fraction * TAU;
        let start = FRAC_PI_2 - (done + sweep);
        for piece in wedge_polygons(start, sweep, FRAC_PI_4) {
            let points = piece.into_iter().map(|p| to_screen(p, radius)).collect();
            painter.add(Shape::convex_polygon(points, slice.color, Stroke::NONE));
        }

        // Percentage label inside the slice.
        let mid = start + sweep / 2.0;
        if slice.fraction >= 0.04 {
            painter.text(
                to_screen([mid.cos(), mid.sin()], radius * 0.65),
                egui::Align2::CENTER_CENTER,
                format!("{:.1}%", slice.fraction * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }
        done += sweep;
    }

    // Slice separators.
    if figure.slices.len() > 1 {
        let mut angle = FRAC_PI_2;
        for slice in &figure.slices {
            painter.line_segment(
                [center, to_screen([angle.cos(), angle.sin()], radius)],
                Stroke::new(1.5, Color32::WHITE),
            );
            angle -= slice.fraction * TAU;
        }
    }

    // Legend.
    let legend_x = center.x + radius + 32.0;
    let line_height = 20.0;
    let top = center.y - line_height * figure.slices.len() as f32 / 2.0;
    for (i, slice) in figure.slices.iter().enumerate() {
        let y = top + line_height * (i as f32 + 0.5);
        painter.circle_filled(Pos2::new(legend_x, y), 6.0, slice.color);
        painter.text(
            Pos2::new(legend_x + 14.0, y),
            egui::Align2::LEFT_CENTER,
            format!("{} ({})", slice.label, slice.count),
            FontId::proportional(14.0),
            ui.visuals().text_color(),
        );
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Plot payload mass against outcome, one coloured series per booster
/// category.
pub fn payload_scatter(ui: &mut Ui, figure: &ScatterFigure, height: f32) {
    ui.strong(figure.title.as_str());

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(figure.x_label)
        .y_axis_label(figure.y_label)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(series.color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
