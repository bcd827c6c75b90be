//! Bottom status bar: record count, active day, load/error state.

use eframe::egui::{self, Color32, Context};

use crate::core::timeline::TimelineModel;

#[derive(Default)]
pub struct StatusBar;

impl StatusBar {
    pub fn render(
        &self,
        ctx: &Context,
        timeline: &TimelineModel,
        loading: bool,
        error: Option<&str>,
    ) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} memories", timeline.len()));
                if let Some(record) = timeline.active() {
                    ui.separator();
                    ui.label(&record.iso);
                }
                if loading {
                    ui.separator();
                    ui.spinner();
                    ui.label("Loading…");
                }
                if let Some(message) = error {
                    ui.separator();
                    ui.colored_label(Color32::LIGHT_RED, message);
                }
            });
        });
    }
}
