use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(state.layout.title)
                .size(32.0)
                .strong()
                .color(TITLE_COLOR),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        let session = &state.session;
        ui.label(format!(
            "{} launches loaded, {} shown",
            session.dataset().len(),
            session.visible_points().len()
        ));
        ui.separator();
        ui.checkbox(&mut state.show_table, "Launch table");
    });
}

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    site_dropdown(ui, state);
    ui.add_space(12.0);
    payload_slider(ui, state);
    ui.add_space(12.0);

    if ui.button("Reset").clicked() {
        state.reset();
    }
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");

    let dropdown = &state.layout.site_dropdown;
    let current = state.session.selection().site.value().to_string();
    let mut chosen: Option<String> = None;

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(dropdown.label_for(&current))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if dropdown.searchable {
                ui.add(
                    egui::TextEdit::singleline(&mut state.site_search)
                        .hint_text(dropdown.placeholder),
                );
                ui.separator();
            }
            let matches = dropdown.matching(&state.site_search);
            if matches.is_empty() {
                ui.weak("No matching site");
            }
            for option in matches {
                if ui
                    .selectable_label(option.value == current, option.label.as_str())
                    .clicked()
                {
                    chosen = Some(option.value.clone());
                }
            }
        });

    if let Some(value) = chosen {
        state.select_site(&value);
    }
}

fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (kg)");

    let slider = state.layout.payload_slider;
    let range = state.session.selection().payload_range;
    let (mut low, mut high) = (range.low, range.high);

    let low_changed = ui
        .add(egui::Slider::new(&mut low, slider.min..=slider.max).text("from"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, slider.min..=slider.max).text("to"))
        .changed();

    // Dragging one handle past the other pushes it along.
    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }
    if low_changed || high_changed {
        state.set_payload_range(low, high);
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in slider.marks() {
            ui.small(format!("{mark:.0}"));
        }
    });
    ui.small(format!("step {:.0} kg", slider.step));
}
