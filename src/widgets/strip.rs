//! Horizontal calendar strip: one tick per day between the configured
//! bounds, month labels at group boundaries, clickable dots on days that
//! have a memory.

use eframe::egui::{self, Align2, Color32, CursorIcon, FontId, Rect, Sense, Stroke, pos2, vec2};

use crate::core::dates::{DateTick, starts_month};
use crate::core::timeline::TimelineModel;

/// Horizontal space per day tick.
const TICK_W: f32 = 56.0;
const STRIP_H: f32 = 76.0;

const DOT_COLOR: Color32 = Color32::from_rgb(0x3A, 0x7B, 0xD5);
const DOT_ACTIVE_COLOR: Color32 = Color32::from_rgb(0xE0, 0x5A, 0x47);

/// What the strip asks the app to do.
pub enum StripAction {
    None,
    /// A memory dot was clicked; make that record active.
    JumpTo(String),
}

pub fn render(ui: &mut egui::Ui, ticks: &[DateTick], timeline: &TimelineModel) -> StripAction {
    let mut action = StripAction::None;
    let active_iso = timeline.active().map(|r| r.iso.clone());

    egui::ScrollArea::horizontal()
        .id_salt("date_strip")
        .show(ui, |ui| {
            let total = vec2(TICK_W * ticks.len() as f32, STRIP_H);
            let (rect, _) = ui.allocate_exact_size(total, Sense::hover());
            let painter = ui.painter_at(rect);
            let baseline = rect.top() + 44.0;

            for (idx, tick) in ticks.iter().enumerate() {
                let x = rect.left() + TICK_W * idx as f32 + TICK_W / 2.0;
                let month_start = starts_month(ticks, idx);

                if month_start {
                    painter.text(
                        pos2(x, rect.top() + 4.0),
                        Align2::CENTER_TOP,
                        &tick.month_name,
                        FontId::proportional(13.0),
                        ui.visuals().strong_text_color(),
                    );
                }

                // Month boundaries get the taller tick mark.
                let tick_top = if month_start { baseline - 16.0 } else { baseline - 8.0 };
                painter.line_segment(
                    [pos2(x, tick_top), pos2(x, baseline)],
                    Stroke::new(1.0, ui.visuals().weak_text_color()),
                );
                painter.text(
                    pos2(x, baseline + 4.0),
                    Align2::CENTER_TOP,
                    &tick.label,
                    FontId::proportional(10.0),
                    ui.visuals().text_color(),
                );

                if let Some(record) = timeline.record_for_iso(&tick.iso) {
                    let center = pos2(x, baseline - 24.0);
                    let hit = Rect::from_center_size(center, vec2(16.0, 16.0));
                    let response = ui
                        .interact(hit, ui.id().with(("memory_dot", idx)), Sense::click())
                        .on_hover_cursor(CursorIcon::PointingHand)
                        .on_hover_text(format!("{} ({})", record.title, record.iso));
                    let active = active_iso.as_deref() == Some(record.iso.as_str());
                    let radius = if active || response.hovered() { 6.0 } else { 4.5 };
                    let fill = if active { DOT_ACTIVE_COLOR } else { DOT_COLOR };
                    painter.circle_filled(center, radius, fill);
                    if response.clicked() {
                        action = StripAction::JumpTo(record.id.clone());
                    }
                }
            }
        });

    action
}
