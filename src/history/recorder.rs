//! Append-only history of committed steps.
//!
//! Each commit stores an immutable clone of the engine's working state
//! together with the step's transcript. Snapshots are never touched again;
//! `im::Vector` keeps the append and any later clone of the whole history
//! cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::notes::NoteBuffer;
use crate::core::GameState;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    snapshots: Vector<GameState>,
    notes: Vector<String>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `state` as a completed step and flush `notes` alongside it.
    pub fn commit(&mut self, state: &GameState, notes: &mut NoteBuffer) {
        self.snapshots.push_back(state.clone());
        self.notes.push_back(notes.flush());
    }

    /// Number of committed steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn get(&self, step: usize) -> Option<(&GameState, &str)> {
        let state = self.snapshots.get(step)?;
        let note = self.notes.get(step)?;
        Some((state, note.as_str()))
    }

    #[must_use]
    pub fn last(&self) -> Option<(&GameState, &str)> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate over (snapshot, note) pairs in commit order.
    pub fn iter(&self) -> impl Iterator<Item = (&GameState, &str)> {
        self.snapshots
            .iter()
            .zip(self.notes.iter().map(String::as_str))
    }
}
