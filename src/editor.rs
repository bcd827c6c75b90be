//! Create/edit form: title, caption, date and the photo set.
//!
//! Validation runs synchronously before any network call. Submission
//! (upload batch, then persist) happens on a background job; the save
//! control is disabled while it is in flight and re-enabled on failure.

use chrono::NaiveDate;
use eframe::egui::{self, Color32, ColorImage, RichText, TextureHandle, TextureOptions, Ui, vec2};
use log::warn;
use reqwest::blocking::Client;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::carousel::CarouselState;
use crate::core::jobs::Jobs;
use crate::core::textures::{TextureCache, decode_color_image};
use crate::entities::{Record, RecordPayload};
use crate::remote::{ImageUploader, RecordStore};
use crate::widgets::carousel::paint_fitted;

/// Accepted picture extensions for the picker and drag-and-drop.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// A newly picked local file, decoded for preview.
struct LocalImage {
    path: PathBuf,
    /// Decoded pixels, held until the first frame uploads them to the GPU.
    pixels: Option<ColorImage>,
    texture: Option<TextureHandle>,
}

impl LocalImage {
    fn texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        if self.texture.is_none()
            && let Some(pixels) = self.pixels.take()
        {
            let name = self.path.display().to_string();
            self.texture = Some(ctx.load_texture(name, pixels, TextureOptions::LINEAR));
        }
        self.texture.as_ref()
    }
}

/// One entry of the editor's image list, in display order.
enum ImageSlot {
    /// Already-hosted image (edit flow).
    Url(String),
    /// Newly picked local file awaiting upload.
    File(LocalImage),
}

/// Where a finished submission goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(String),
}

/// Image reference carried by a submission, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitImage {
    Url(String),
    File(PathBuf),
}

/// Everything a background submission needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitRequest {
    pub target: SubmitTarget,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub images: Vec<SubmitImage>,
}

/// What the editor asks the app to do after a frame.
#[derive(Debug)]
pub enum EditorAction {
    None,
    /// Navigate back to the timeline without saving.
    Close,
    /// Validated submission, ready for the background job.
    Submit(SubmitRequest),
}

/// Run a submission end to end: upload new files, then persist.
///
/// Uploads complete before any persistence call; an upload failure aborts
/// the whole submission and no record is written. Already-uploaded
/// siblings are not rolled back.
pub fn perform_submit(
    store: &RecordStore,
    uploader: &ImageUploader,
    request: SubmitRequest,
) -> Result<(), String> {
    let paths: Vec<PathBuf> = request
        .images
        .iter()
        .filter_map(|slot| match slot {
            SubmitImage::File(path) => Some(path.clone()),
            SubmitImage::Url(_) => None,
        })
        .collect();
    let uploaded = uploader.upload_batch(&paths).map_err(|e| e.to_string())?;
    let image_urls = merge_image_urls(&request.images, uploaded)?;

    let payload = RecordPayload {
        title: request.title,
        description: request.description,
        image_urls,
        memory_date: request.date,
    };
    match &request.target {
        SubmitTarget::Create => store.create(&payload),
        SubmitTarget::Update(id) => store.update(id, &payload),
    }
    .map_err(|e| e.to_string())
}

/// Zip freshly uploaded URLs back into display order: URL slots pass
/// through, each file slot consumes the next uploaded URL.
fn merge_image_urls(slots: &[SubmitImage], uploaded: Vec<String>) -> Result<Vec<String>, String> {
    let mut fresh = uploaded.into_iter();
    let mut urls = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            SubmitImage::Url(url) => urls.push(url.clone()),
            SubmitImage::File(_) => urls.push(
                fresh
                    .next()
                    .ok_or_else(|| "upload produced fewer URLs than files".to_string())?,
            ),
        }
    }
    Ok(urls)
}

pub struct Editor {
    target: SubmitTarget,
    title: String,
    description: String,
    /// Raw `YYYY-MM-DD` input, parsed on submit.
    date_input: String,
    images: Vec<ImageSlot>,
    carousel: CarouselState,
    busy: bool,
    /// Validation or save error shown inline.
    notice: Option<String>,
}

impl Editor {
    pub fn create() -> Self {
        Self {
            target: SubmitTarget::Create,
            title: String::new(),
            description: String::new(),
            date_input: String::new(),
            images: Vec::new(),
            carousel: CarouselState::new(0),
            busy: false,
            notice: None,
        }
    }

    /// Prefill the form from an existing record.
    pub fn edit(record: &Record) -> Self {
        Self {
            target: SubmitTarget::Update(record.id.clone()),
            title: record.title.clone(),
            description: record.description.clone(),
            date_input: record.iso.clone(),
            images: record.images.iter().cloned().map(ImageSlot::Url).collect(),
            carousel: CarouselState::new(record.images.len()),
            busy: false,
            notice: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Background submission failed: re-enable the form with a notice.
    pub fn submit_failed(&mut self, message: String) {
        self.busy = false;
        self.notice = Some(message);
    }

    /// Append picked or dropped files. Non-images and duplicates are
    /// skipped; unreadable files leave a notice.
    pub fn add_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            if !is_image_path(path) {
                continue;
            }
            let already_added = self.images.iter().any(
                |slot| matches!(slot, ImageSlot::File(local) if local.path == *path),
            );
            if already_added {
                continue;
            }
            let decoded = std::fs::read(path)
                .map_err(|e| e.to_string())
                .and_then(|bytes| decode_color_image(&bytes));
            match decoded {
                Ok(pixels) => self.images.push(ImageSlot::File(LocalImage {
                    path: path.clone(),
                    pixels: Some(pixels),
                    texture: None,
                })),
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    self.notice = Some(format!("Could not read {}: {e}", path.display()));
                }
            }
        }
        self.carousel.set_count(self.images.len());
    }

    fn remove_image(&mut self, idx: usize) {
        if idx < self.images.len() {
            self.images.remove(idx);
            self.carousel.set_count(self.images.len());
        }
    }

    fn pick_files(&mut self) {
        if let Some(paths) = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files()
        {
            self.add_files(&paths);
        }
    }

    /// Validate and assemble a submission. Pure: no network here, so a
    /// validation failure provably makes no remote call.
    fn build_request(&self) -> Result<SubmitRequest, String> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        // Caption is required at creation, optional when editing.
        if self.target == SubmitTarget::Create && self.description.trim().is_empty() {
            missing.push("caption");
        }
        let date_input = self.date_input.trim();
        if date_input.is_empty() {
            missing.push("date");
        }
        if self.images.is_empty() {
            missing.push("at least one photo");
        }
        if !missing.is_empty() {
            return Err(format!("Required fields: {}", missing.join(", ")));
        }

        let date = NaiveDate::parse_from_str(date_input, "%Y-%m-%d")
            .map_err(|_| "Date must be in YYYY-MM-DD form".to_string())?;
        let images = self
            .images
            .iter()
            .map(|slot| match slot {
                ImageSlot::Url(url) => SubmitImage::Url(url.clone()),
                ImageSlot::File(local) => SubmitImage::File(local.path.clone()),
            })
            .collect();
        Ok(SubmitRequest {
            target: self.target.clone(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date,
            images,
        })
    }

    pub fn render(
        &mut self,
        ui: &mut Ui,
        textures: &mut TextureCache,
        jobs: &Jobs,
        http: &Arc<Client>,
    ) -> EditorAction {
        let mut action = EditorAction::None;

        ui.horizontal(|ui| {
            if ui.add_enabled(!self.busy, egui::Button::new("⬅ Back")).clicked() {
                action = EditorAction::Close;
            }
            let heading = match &self.target {
                SubmitTarget::Create => "Create new memory",
                SubmitTarget::Update(_) => "Edit memory",
            };
            ui.heading(heading);
        });
        ui.separator();

        if self.images.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(RichText::new("Drag and drop photos here or select from computer").size(16.0));
                ui.add_space(8.0);
                if ui.button("Select from computer").clicked() {
                    self.pick_files();
                }
                ui.add_space(48.0);
            });
        } else {
            self.render_preview_carousel(ui, textures, jobs, http);
        }

        ui.add_space(12.0);
        ui.add(
            egui::TextEdit::singleline(&mut self.title)
                .hint_text("Title")
                .desired_width(420.0),
        );
        ui.add(
            egui::TextEdit::multiline(&mut self.description)
                .hint_text("Write a caption...")
                .desired_rows(5)
                .desired_width(420.0),
        );
        ui.horizontal(|ui| {
            ui.label("Date of memory");
            ui.add(
                egui::TextEdit::singleline(&mut self.date_input)
                    .hint_text("YYYY-MM-DD")
                    .desired_width(120.0),
            );
        });

        if let Some(notice) = &self.notice {
            ui.colored_label(Color32::from_rgb(0xC0, 0x3A, 0x2B), notice);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.add_enabled(!self.busy, egui::Button::new("Save memory")).clicked() {
                match self.build_request() {
                    Ok(request) => {
                        self.busy = true;
                        self.notice = None;
                        action = EditorAction::Submit(request);
                    }
                    Err(message) => self.notice = Some(message),
                }
            }
            if self.busy {
                ui.spinner();
                ui.label("Uploading…");
            }
        });

        action
    }

    fn render_preview_carousel(
        &mut self,
        ui: &mut Ui,
        textures: &mut TextureCache,
        jobs: &Jobs,
        http: &Arc<Client>,
    ) {
        self.carousel.set_count(self.images.len());
        let idx = self.carousel.index();

        let size = vec2(ui.available_width().min(480.0), 320.0);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let texture = match &mut self.images[idx] {
            ImageSlot::File(local) => local.texture(ui.ctx()).cloned(),
            ImageSlot::Url(url) => textures.get(url, jobs, http).cloned(),
        };
        if let Some(texture) = texture {
            paint_fitted(ui, rect, &texture);
        } else {
            ui.painter().rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Loading…",
                egui::FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
        }

        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.carousel.prev();
            }
            ui.label(self.carousel.position_label());
            if ui.button("▶").clicked() {
                self.carousel.next();
            }
            ui.separator();
            if ui.add_enabled(!self.busy, egui::Button::new("Remove photo")).clicked() {
                self.remove_image(idx);
            }
            if ui.add_enabled(!self.busy, egui::Button::new("Add photo")).clicked() {
                self.pick_files();
            }
        });
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
