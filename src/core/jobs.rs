//! Background jobs for network calls.
//!
//! Every remote operation runs off the UI thread; finished results come
//! back over a channel and are drained once per frame from `update()`.
//! The UI stays interactive while a job is in flight, with the triggering
//! control showing a busy state. No cancellation, no automatic retry.

use crossbeam_channel::{Receiver, Sender, unbounded};
use eframe::egui::ColorImage;
use log::error;
use std::thread;

use crate::entities::Record;

/// Result of a finished background job.
#[derive(Debug)]
pub enum JobUpdate {
    /// `list_all` finished. Errors leave the view in its loading/empty state.
    RecordsLoaded(Result<Vec<Record>, String>),
    /// A create or update submission finished.
    RecordSaved(Result<(), String>),
    /// A remote image finished downloading and decoding.
    ImageFetched {
        url: String,
        result: Result<ColorImage, String>,
    },
}

/// Channel-backed job runner owned by the app.
pub struct Jobs {
    tx: Sender<JobUpdate>,
    rx: Receiver<JobUpdate>,
}

impl Default for Jobs {
    fn default() -> Self {
        Self::new()
    }
}

impl Jobs {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Run `f` on a background thread; its result is delivered to the next
    /// `drain()` on the UI thread.
    pub fn run<F>(&self, name: &str, f: F)
    where
        F: FnOnce() -> JobUpdate + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("memoria-{name}"))
            .spawn(move || {
                // Receiver only drops on app shutdown; a lost send is fine then.
                let _ = tx.send(f());
            });
        if let Err(e) = spawned {
            error!("Failed to spawn job thread '{name}': {e}");
        }
    }

    /// Drain all finished jobs without blocking.
    pub fn drain(&self) -> Vec<JobUpdate> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_job_result_arrives_via_drain() {
        let jobs = Jobs::new();
        jobs.run("test", || JobUpdate::RecordSaved(Ok(())));

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let updates = jobs.drain();
            if !updates.is_empty() {
                assert!(matches!(updates[0], JobUpdate::RecordSaved(Ok(()))));
                break;
            }
            assert!(Instant::now() < deadline, "job result never arrived");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_drain_is_nonblocking_when_empty() {
        let jobs = Jobs::new();
        assert!(jobs.drain().is_empty());
    }
}
