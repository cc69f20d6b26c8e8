use std::sync::Arc;

use eframe::egui;

use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpacexDashApp {
    pub state: AppState,
}

impl SpacexDashApp {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for SpacexDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: launches behind the scatter ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("launch_table")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    table::launch_table(ui, &self.state.session);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let chart_height = (ui.available_height() / 2.0 - 24.0).max(160.0);
            let session = &self.state.session;
            plot::success_pie(ui, session.pie(), chart_height);
            ui.separator();
            plot::payload_scatter(ui, session.scatter(), chart_height);
        });
    }
}
