use chrono::NaiveDate;

use crate::models::{BulkWriteIntent, WriteMode};

use super::{reconcile_bulk_edit, EditError, EditRow};

/// Lifecycle of a per-day edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Viewing,
    Editing,
    Saving,
}

/// Explicit state machine for editing one day's line items.
///
/// Leaving `Editing` always goes through a replace-day save attempt; there is
/// no silent discard path. The rows are kept through `Saving` so a failed
/// save returns to `Editing` with nothing lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    date: NaiveDate,
    rows: Vec<EditRow>,
    state: SessionState,
}

impl EditSession {
    /// A fresh session in `Viewing`, before the user touches anything.
    pub fn viewing(date: NaiveDate) -> Self {
        Self {
            date,
            rows: Vec::new(),
            state: SessionState::Viewing,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn rows(&self) -> &[EditRow] {
        &self.rows
    }

    /// Enters `Editing`, seeding the form with the day's current items.
    /// Re-entering while already editing replaces the working rows.
    pub fn begin_edit(&mut self, rows: Vec<EditRow>) -> Result<(), EditError> {
        if self.state == SessionState::Saving {
            return Err(EditError::SaveInFlight);
        }
        self.rows = rows;
        self.state = SessionState::Editing;
        Ok(())
    }

    pub fn add_row(&mut self, row: EditRow) {
        if self.state == SessionState::Editing {
            self.rows.push(row);
        }
    }

    pub fn remove_row(&mut self, index: usize) {
        if self.state == SessionState::Editing && index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn update_row(&mut self, index: usize, row: EditRow) {
        if self.state == SessionState::Editing {
            if let Some(slot) = self.rows.get_mut(index) {
                *slot = row;
            }
        }
    }

    /// Toggling out of `Editing`: builds the replace-day intent and moves to
    /// `Saving`.
    ///
    /// At most one save is in flight per session; a second call while
    /// `Saving` is rejected with [`EditError::SaveInFlight`] rather than
    /// queued. `EmptySubmission` leaves the session in `Editing` so the
    /// caller can warn instead of issuing a no-op write.
    pub fn begin_save(&mut self) -> Result<BulkWriteIntent, EditError> {
        match self.state {
            SessionState::Saving => return Err(EditError::SaveInFlight),
            // Nothing is being edited, so there is nothing to save.
            SessionState::Viewing => return Err(EditError::EmptySubmission),
            SessionState::Editing => {}
        }
        let intent = reconcile_bulk_edit(&self.rows, WriteMode::ReplaceDay, self.date)?;
        self.state = SessionState::Saving;
        Ok(intent)
    }

    /// The in-flight write was acknowledged; the session returns to
    /// `Viewing`. Any aggregates computed over this date range are stale and
    /// must be recomputed from a fresh query, not patched.
    pub fn save_succeeded(&mut self) {
        self.rows.clear();
        self.state = SessionState::Viewing;
    }

    /// The in-flight write failed; the session returns to `Editing` with the
    /// user's unsaved rows intact so the save can be retried.
    pub fn save_failed(&mut self) {
        self.state = SessionState::Editing;
    }
}
