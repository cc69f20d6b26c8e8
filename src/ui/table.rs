use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::binding::Session;
use crate::color::{FAILURE_COLOR, SUCCESS_COLOR};
use crate::data::query::{FAILURE_LABEL, SUCCESS_LABEL};

// ---------------------------------------------------------------------------
// Launch table – rows behind the scatter chart
// ---------------------------------------------------------------------------

/// Render the launches currently shown in the scatter chart, in dataset
/// order, with every descriptive column.
pub fn launch_table(ui: &mut Ui, session: &Session) {
    let dataset = session.dataset();
    let points = session.visible_points();
    let extra = dataset.metadata_columns();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .columns(Column::auto().at_least(80.0), extra.len())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Outcome", "Booster"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
            for col in extra {
                header.col(|ui: &mut Ui| {
                    ui.strong(col.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let point = &points[row.index()];
                let Some(rec) = dataset.records().get(point.row) else {
                    return;
                };

                row.col(|ui: &mut Ui| {
                    ui.label(rec.site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    let (text, color) = if rec.success {
                        (SUCCESS_LABEL, SUCCESS_COLOR)
                    } else {
                        (FAILURE_LABEL, FAILURE_COLOR)
                    };
                    ui.label(RichText::new(text).color(color));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.booster_category.as_str());
                });
                for col in extra {
                    row.col(|ui: &mut Ui| {
                        let value = rec
                            .metadata
                            .get(col)
                            .map(|v| v.to_string())
                            .unwrap_or_default();
                        ui.label(value);
                    });
                }
            });
        });
}
