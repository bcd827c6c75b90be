//! Timeline view-model: active-record selection over a sparse record set.

use std::collections::HashMap;

use crate::entities::Record;

/// Navigation direction for [`TimelineModel::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Owns the fetched record list and the active selection.
///
/// Records are kept sorted ascending by date. The ISO index maps each
/// calendar day to at most one record: on duplicate dates the last-seen
/// record wins, so one of the colliding records is unreachable from the
/// strip. Known lossy join, not a multi-record-per-day feature.
#[derive(Debug, Default)]
pub struct TimelineModel {
    records: Vec<Record>,
    by_iso: HashMap<String, usize>,
    active: usize,
}

impl TimelineModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the record set: sort ascending by date, rebuild the ISO
    /// index, clamp the active selection back into range.
    pub fn set_records(&mut self, mut records: Vec<Record>) {
        records.sort_by(|a, b| a.date.cmp(&b.date));
        let mut by_iso = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            // Last write wins on duplicate dates.
            by_iso.insert(record.iso.clone(), idx);
        }
        self.records = records;
        self.by_iso = by_iso;
        if self.active >= self.records.len() {
            self.active = 0;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Currently displayed record, if any.
    pub fn active(&self) -> Option<&Record> {
        self.records.get(self.active)
    }

    /// Record shown on the strip for a given calendar day, if any.
    pub fn record_for_iso(&self, iso: &str) -> Option<&Record> {
        self.by_iso.get(iso).and_then(|idx| self.records.get(*idx))
    }

    /// Look up a record by id (used by the edit view).
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Move the active selection one step, wrapping at both ends.
    /// No-op on an empty set.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.records.len();
        if len == 0 {
            return;
        }
        self.active = match direction {
            Direction::Next => (self.active + 1) % len,
            Direction::Prev => {
                if self.active == 0 {
                    len - 1
                } else {
                    self.active - 1
                }
            }
        };
    }

    /// Jump straight to the record with `id`. No-op if unknown.
    pub fn jump_to(&mut self, id: &str) {
        if let Some(idx) = self.records.iter().position(|r| r.id == id) {
            self.active = idx;
        }
    }
}
