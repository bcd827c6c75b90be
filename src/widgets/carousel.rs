//! Image pager for the active memory.
//!
//! One image visible at a time. Drag horizontally past the threshold to
//! page (commits on release), or use the chevron buttons. Remote images
//! come from the texture cache and show a placeholder until fetched.

use eframe::egui::{self, Align2, FontId, Rect, Sense, Ui, vec2};
use reqwest::blocking::Client;
use std::sync::Arc;

use crate::core::carousel::CarouselState;
use crate::core::jobs::Jobs;
use crate::core::textures::TextureCache;

/// Paint `texture` centered in `rect`, preserving aspect ratio.
pub fn paint_fitted(ui: &Ui, rect: Rect, texture: &egui::TextureHandle) {
    let size = texture.size_vec2();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let scale = (rect.width() / size.x).min(rect.height() / size.y);
    let fitted = Rect::from_center_size(rect.center(), size * scale);
    egui::Image::new(texture).paint_at(ui, fitted);
}

pub fn render(
    ui: &mut Ui,
    state: &mut CarouselState,
    images: &[String],
    textures: &mut TextureCache,
    jobs: &Jobs,
    http: &Arc<Client>,
) {
    state.set_count(images.len());
    if state.is_empty() {
        return;
    }

    let size = vec2(ui.available_width().min(560.0), 360.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

    let url = &images[state.index()];
    if let Some(texture) = textures.get(url, jobs, http).cloned() {
        paint_fitted(ui, rect, &texture);
    } else {
        ui.painter().rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
        let message = match textures.failure(url) {
            Some(failure) => format!("Image unavailable ({failure})"),
            None => "Loading…".to_string(),
        };
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            message,
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
    }

    // Swipe paging: track while dragging, commit or cancel on release.
    if response.drag_started()
        && let Some(pos) = response.interact_pointer_pos()
    {
        state.swipe.begin(pos.x);
    }
    if response.dragged()
        && let Some(pos) = response.interact_pointer_pos()
    {
        state.swipe.update(pos.x);
    }
    if response.drag_stopped()
        && let Some(swipe) = state.swipe.finish()
    {
        state.apply(swipe);
    }

    // Indicator always; paging buttons only when there is somewhere to go.
    ui.horizontal(|ui| {
        if state.count() > 1 && ui.button("◀").clicked() {
            state.prev();
        }
        ui.label(state.position_label());
        if state.count() > 1 && ui.button("▶").clicked() {
            state.next();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::epaint::{ClippedShape, Shape};

    /// All text painted during one headless frame.
    fn run_frame(mut draw: impl FnMut(&mut Ui)) -> Vec<String> {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.screen_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(800.0, 600.0),
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

    /// Render `images` for one frame with every URL pre-marked failed, so
    /// no fetch threads are spawned.
    fn frame_texts(state: &mut CarouselState, images: &[String]) -> Vec<String> {
        let mut textures = TextureCache::new();
        let jobs = Jobs::new();
        let http = Arc::new(Client::new());
        run_frame(|ui| {
            for url in images {
                textures.insert(ui.ctx(), url.clone(), Err("offline".into()));
            }
            render(ui, state, images, &mut textures, &jobs, &http);
        })
    }

    #[test]
    fn test_single_image_shows_position_indicator() {
        let mut state = CarouselState::new(1);
        let texts = frame_texts(&mut state, &["https://img/only.jpg".to_string()]);
        assert!(texts.iter().any(|t| t == "1 / 1"), "painted: {texts:?}");
        // A single image has nowhere to page to.
        assert!(!texts.iter().any(|t| t.contains('◀') || t.contains('▶')));
    }

    #[test]
    fn test_multi_image_shows_indicator_and_chevrons() {
        let mut state = CarouselState::new(2);
        let texts = frame_texts(
            &mut state,
            &["https://img/a.jpg".to_string(), "https://img/b.jpg".to_string()],
        );
        assert!(texts.iter().any(|t| t == "1 / 2"));
        assert!(texts.iter().any(|t| t.contains('◀')));
        assert!(texts.iter().any(|t| t.contains('▶')));
    }

    #[test]
    fn test_empty_image_list_paints_nothing() {
        let mut state = CarouselState::new(0);
        let texts = frame_texts(&mut state, &[]);
        assert!(texts.is_empty(), "painted: {texts:?}");
    }
}
