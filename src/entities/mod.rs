pub mod record;

pub use record::{Record, RecordPayload, RecordRow};
