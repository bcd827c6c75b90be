//! Memoria: a personal photo-memories timeline.
//!
//! A dense calendar strip spans a fixed date range; sparse memory records
//! (title, caption, photos, date) are joined to it by calendar day. The
//! active memory shows its photos in a swipeable carousel. Records live in
//! a hosted REST collection, photos on an unsigned-upload asset host.

pub mod cli;
pub mod config;
pub mod core;
pub mod editor;
pub mod entities;
pub mod remote;
pub mod ui;
pub mod widgets;

pub use crate::core::carousel::CarouselState;
pub use crate::core::dates::{DateTick, generate_date_range, iso_key};
pub use crate::core::jobs::{JobUpdate, Jobs};
pub use crate::core::swipe::{SWIPE_THRESHOLD, Swipe, SwipeTracker};
pub use crate::core::textures::TextureCache;
pub use crate::core::timeline::{Direction, TimelineModel};
pub use crate::entities::{Record, RecordPayload};
pub use crate::remote::{ImageUploader, RecordStore, RemoteError};
