//! Core engine: date bucketing, view-model state, gestures, background jobs.

pub mod carousel;
pub mod dates;
pub mod jobs;
pub mod swipe;
pub mod textures;
pub mod timeline;
