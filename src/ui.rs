//! Timeline view: calendar strip, active memory detail, navigation.

use eframe::egui::{RichText, Ui};
use reqwest::blocking::Client;
use std::sync::Arc;

use crate::core::carousel::CarouselState;
use crate::core::dates::DateTick;
use crate::core::jobs::Jobs;
use crate::core::textures::TextureCache;
use crate::core::timeline::{Direction, TimelineModel};
use crate::widgets::strip::{self, StripAction};
use crate::widgets::carousel;

/// What the timeline view asks the app to do.
#[derive(Debug)]
pub enum TimelineAction {
    None,
    /// Step the active memory forward or back (wraps at both ends).
    Advance(Direction),
    /// Make the record with this id active.
    JumpTo(String),
    /// Open the editor prefilled with this record.
    Edit(String),
    /// Open the editor empty.
    Create,
}

#[allow(clippy::too_many_arguments)]
pub fn render_timeline(
    ui: &mut Ui,
    timeline: &TimelineModel,
    carousel_state: &mut CarouselState,
    ticks: &[DateTick],
    textures: &mut TextureCache,
    jobs: &Jobs,
    http: &Arc<Client>,
    loading: bool,
) -> TimelineAction {
    let mut action = TimelineAction::None;

    ui.horizontal(|ui| {
        ui.heading("Memories");
        if ui.button("New memory").clicked() {
            action = TimelineAction::Create;
        }
    });
    ui.separator();

    // Zero records: no strip, just the invitation to create one.
    if timeline.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            if loading {
                ui.spinner();
                ui.label("Loading memories…");
            } else {
                ui.label(RichText::new("No memories yet").size(18.0));
                if ui.link("Create your first memory").clicked() {
                    action = TimelineAction::Create;
                }
            }
        });
        return action;
    }

    if let StripAction::JumpTo(id) = strip::render(ui, ticks, timeline) {
        action = TimelineAction::JumpTo(id);
    }
    ui.separator();
    let Some(record) = timeline.active() else {
        return action;
    };

    ui.horizontal(|ui| {
        if ui.button("◀ Previous").clicked() {
            action = TimelineAction::Advance(Direction::Prev);
        }
        ui.label(RichText::new(&record.iso).strong());
        if ui.button("Next ▶").clicked() {
            action = TimelineAction::Advance(Direction::Next);
        }
        ui.separator();
        if ui.button("Edit").clicked() {
            action = TimelineAction::Edit(record.id.clone());
        }
    });

    ui.add_space(8.0);
    carousel::render(ui, carousel_state, &record.images, textures, jobs, http);
    ui.add_space(8.0);
    ui.heading(&record.title);
    if !record.description.is_empty() {
        ui.label(&record.description);
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::generate_date_range;
    use crate::entities::Record;
    use chrono::NaiveDate;
    use eframe::egui;
    use eframe::egui::epaint::{ClippedShape, Shape};

    /// All text painted during one headless frame.
    fn run_frame(mut draw: impl FnMut(&mut Ui)) -> Vec<String> {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.screen_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(1200.0, 800.0),
        ));
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| draw(ui));
        });
        collect_texts(&output.shapes)
    }

    fn collect_texts(shapes: &[ClippedShape]) -> Vec<String> {
        fn walk(shape: &Shape, out: &mut Vec<String>) {
            match shape {
                Shape::Text(text) => out.push(text.galley.text().to_string()),
                Shape::Vec(children) => {
                    for child in children {
                        walk(child, out);
                    }
                }
                _ => {}
            }
        }
        let mut out = Vec::new();
        for clipped in shapes {
            walk(&clipped.shape, &mut out);
        }
        out
    }

    fn september_ticks() -> Vec<DateTick> {
        generate_date_range(
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(),
        )
    }

    #[test]
    fn test_empty_set_renders_invitation_without_strip() {
        let timeline = TimelineModel::new();
        let mut carousel_state = CarouselState::new(0);
        let mut textures = TextureCache::new();
        let jobs = Jobs::new();
        let http = Arc::new(Client::new());
        let ticks = september_ticks();

        let texts = run_frame(|ui| {
            render_timeline(
                ui,
                &timeline,
                &mut carousel_state,
                &ticks,
                &mut textures,
                &jobs,
                &http,
                false,
            );
        });
        assert!(texts.iter().any(|t| t.contains("No memories yet")));
        assert!(texts.iter().any(|t| t.contains("Create your first memory")));
        assert!(
            !texts
                .iter()
                .any(|t| t.contains("September") || t.contains("SEP.")),
            "strip must not be drawn for an empty record set: {texts:?}"
        );
    }

    #[test]
    fn test_strip_renders_with_records() {
        let mut timeline = TimelineModel::new();
        timeline.set_records(vec![Record {
            id: "r1".into(),
            title: "Picnic".into(),
            description: "In the park".into(),
            images: vec!["https://img/r1.jpg".into()],
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            iso: "2024-09-02".into(),
        }]);
        let mut carousel_state = CarouselState::new(0);
        let mut textures = TextureCache::new();
        let jobs = Jobs::new();
        let http = Arc::new(Client::new());
        let ticks = september_ticks();

        let texts = run_frame(|ui| {
            // Mark the image failed up front so no fetch thread is spawned.
            textures.insert(ui.ctx(), "https://img/r1.jpg".into(), Err("offline".into()));
            render_timeline(
                ui,
                &timeline,
                &mut carousel_state,
                &ticks,
                &mut textures,
                &jobs,
                &http,
                false,
            );
        });
        assert!(texts.iter().any(|t| t.contains("September")));
        assert!(texts.iter().any(|t| t.contains("SEP. 1")));
        assert!(texts.iter().any(|t| t.contains("Picnic")));
        assert!(!texts.iter().any(|t| t.contains("No memories yet")));
    }
}
