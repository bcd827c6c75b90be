//! Remote image cache: URL → decoded GPU texture.
//!
//! Download and decode happen off the UI thread; the texture upload runs
//! on the main thread when the job result is drained. Failed fetches are
//! remembered so a bad URL is not re-requested every frame.

use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use log::warn;
use reqwest::blocking::Client;

use crate::core::jobs::{JobUpdate, Jobs};

enum Slot {
    Pending,
    Ready(TextureHandle),
    Failed(String),
}

#[derive(Default)]
pub struct TextureCache {
    slots: HashMap<String, Slot>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `url` if available; kicks off a background fetch the
    /// first time a URL is seen.
    pub fn get(&mut self, url: &str, jobs: &Jobs, http: &Arc<Client>) -> Option<&TextureHandle> {
        if !self.slots.contains_key(url) {
            self.slots.insert(url.to_string(), Slot::Pending);
            let url = url.to_string();
            let http = Arc::clone(http);
            jobs.run("fetch", move || {
                let result = download_and_decode(&http, &url);
                JobUpdate::ImageFetched { url, result }
            });
        }
        match self.slots.get(url) {
            Some(Slot::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    /// Whether any fetch is still in flight.
    pub fn pending(&self) -> bool {
        self.slots.values().any(|slot| matches!(slot, Slot::Pending))
    }

    /// Error text for `url` if its fetch failed.
    pub fn failure(&self, url: &str) -> Option<&str> {
        match self.slots.get(url) {
            Some(Slot::Failed(message)) => Some(message),
            _ => None,
        }
    }

    /// Store a finished fetch (called while draining job results).
    pub fn insert(&mut self, ctx: &egui::Context, url: String, result: Result<ColorImage, String>) {
        let slot = match result {
            Ok(image) => Slot::Ready(ctx.load_texture(url.clone(), image, TextureOptions::LINEAR)),
            Err(message) => {
                warn!("Image fetch failed for {url}: {message}");
                Slot::Failed(message)
            }
        };
        self.slots.insert(url, slot);
    }
}

fn download_and_decode(http: &Client, url: &str) -> Result<ColorImage, String> {
    let response = http
        .get(url)
        .send()
        .map_err(|e| format!("request failed: {e}"))?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }
    let bytes = response
        .bytes()
        .map_err(|e| format!("failed to read body: {e}"))?;
    decode_color_image(&bytes)
}

/// Decode raw image bytes into an egui color image.
pub fn decode_color_image(bytes: &[u8]) -> Result<ColorImage, String> {
    let image = image::load_from_memory(bytes).map_err(|e| format!("decode failed: {e}"))?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        buffer
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_roundtrip_size() {
        let bytes = sample_png(4, 3);
        let image = decode_color_image(&bytes).unwrap();
        assert_eq!(image.size, [4, 3]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_color_image(b"not an image").is_err());
    }
}
