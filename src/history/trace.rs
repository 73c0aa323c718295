//! Row-oriented export of a history.
//!
//! A `Trace` is the sole contract with downstream analysis: a header of
//! named columns, one integer row per committed step and a parallel notes
//! column. Column order:
//!
//! `Round`, `Round Player`, `Dice Value`, `Bank Money`, `Player i Money`
//! (×N), `Player i Pos` (×N), `Street <id> Owner` / `Street <id> Level`
//! (×22), `Railroad r1..r4`, `Utility u1..u2`, `CC Jail Free Card Owner`,
//! `CH Jail Free Card Owner`.
//!
//! Owners are encoded as player numbers with 0 for the bank, positions as
//! -1 for jail, street levels with the legacy -1..6 scale.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recorder::History;
use crate::board::{PropertyId, PropertyKind};
use crate::cards::DeckKind;
use crate::core::{GameError, GameState, PlayerId};

pub const ROUND: &str = "Round";
pub const ROUND_PLAYER: &str = "Round Player";
pub const DICE_VALUE: &str = "Dice Value";
pub const BANK_MONEY: &str = "Bank Money";
pub const NOTES: &str = "Notes";

#[must_use]
pub fn player_money_label(player: PlayerId) -> String {
    format!("Player {} Money", player.0)
}

#[must_use]
pub fn player_pos_label(player: PlayerId) -> String {
    format!("Player {} Pos", player.0)
}

/// Owner column of a property.
#[must_use]
pub fn owner_label(property: PropertyId) -> String {
    match property.kind() {
        PropertyKind::Street { .. } => format!("Street {} Owner", property),
        PropertyKind::Railroad(n) => format!("Railroad r{}", n),
        PropertyKind::Utility(n) => format!("Utility u{}", n),
    }
}

/// Level column of a street.
#[must_use]
pub fn level_label(property: PropertyId) -> Option<String> {
    property
        .is_street()
        .then(|| format!("Street {} Level", property))
}

#[must_use]
pub fn jail_free_label(kind: DeckKind) -> String {
    match kind {
        DeckKind::CommunityChest => "CC Jail Free Card Owner".to_string(),
        DeckKind::Chance => "CH Jail Free Card Owner".to_string(),
    }
}

/// Column labels for a game with `player_count` players.
#[must_use]
pub fn columns(player_count: usize) -> Vec<String> {
    let mut cols: Vec<String> = [ROUND, ROUND_PLAYER, DICE_VALUE, BANK_MONEY]
        .iter()
        .map(|s| s.to_string())
        .collect();
    cols.extend(PlayerId::all(player_count).map(player_money_label));
    cols.extend(PlayerId::all(player_count).map(player_pos_label));
    for property in PropertyId::all() {
        cols.push(owner_label(property));
        cols.extend(level_label(property));
    }
    cols.extend(DeckKind::ALL.into_iter().map(jail_free_label));
    cols
}

/// Encode one snapshot in column order.
#[must_use]
pub fn encode_row(state: &GameState) -> Vec<i64> {
    let owner_code = |p: Option<PlayerId>| p.map_or(0, PlayerId::code);

    let mut row = vec![
        i64::from(state.round),
        state.active_player.code(),
        i64::from(state.dice_total),
        state.bank,
    ];
    row.extend(state.players.iter().map(|(_, s)| s.money));
    row.extend(state.players.iter().map(|(_, s)| s.location.code()));
    for (property, deed) in state.deeds.iter() {
        row.push(owner_code(deed.owner));
        if property.is_street() {
            row.push(state.deeds.legacy_level(property));
        }
    }
    row.extend(DeckKind::ALL.into_iter().map(|kind| owner_code(state.deck(kind).holder())));
    row
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trace {
    columns: Vec<String>,
    rows: Vec<Vec<i64>>,
    notes: Vec<String>,
    seed: u64,
    start_player: PlayerId,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl Trace {
    /// Export every committed step of `history`.
    #[must_use]
    pub fn from_history(history: &History, player_count: usize, seed: u64) -> Self {
        let start_player = history
            .get(0)
            .map_or(PlayerId::new(1), |(state, _)| state.active_player);
        let (rows, notes): (Vec<Vec<i64>>, Vec<String>) = history
            .iter()
            .map(|(state, note)| (encode_row(state), note.to_string()))
            .unzip();
        Self::assemble(columns(player_count), rows, notes, seed, start_player)
    }

    fn assemble(
        columns: Vec<String>,
        rows: Vec<Vec<i64>>,
        notes: Vec<String>,
        seed: u64,
        start_player: PlayerId,
    ) -> Self {
        let mut trace = Self {
            columns,
            rows,
            notes,
            seed,
            start_player,
            index: FxHashMap::default(),
        };
        trace.rebuild_index();
        trace
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
    }

    /// Column labels, excluding the notes column.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// All values of one named column, in step order.
    pub fn column(&self, label: &str) -> Result<Vec<i64>, GameError> {
        let i = self
            .column_index(label)
            .ok_or_else(|| GameError::UnknownColumn(label.to_string()))?;
        Ok(self.rows.iter().map(|row| row[i]).collect())
    }

    /// Value of `label` in row `step`.
    #[must_use]
    pub fn value(&self, step: usize, label: &str) -> Option<i64> {
        let i = self.column_index(label)?;
        self.rows.get(step).map(|row| row[i])
    }

    /// Bank money over time, the series the analysis collaborator plots.
    pub fn bank_money(&self) -> Result<Vec<i64>, GameError> {
        self.column(BANK_MONEY)
    }

    /// File name derived from the seed and starting player.
    #[must_use]
    pub fn suggested_file_name(&self) -> String {
        format!("data_ranseed{}_strtplyr{}.csv", self.seed, self.start_player.0)
    }

    /// Write the trace as a table: a header of the columns plus `Notes`,
    /// then one record per committed step.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), GameError> {
        let export = |e: csv::Error| GameError::Export(e.to_string());
        let mut out = csv::Writer::from_writer(writer);

        out.write_record(self.columns.iter().map(String::as_str).chain([NOTES]))
            .map_err(export)?;
        for (row, note) in self.rows.iter().zip(&self.notes) {
            let mut record: Vec<String> = row.iter().map(i64::to_string).collect();
            record.push(note.clone());
            out.write_record(&record).map_err(export)?;
        }
        out.flush().map_err(|e| GameError::Export(e.to_string()))
    }

    /// Write the table to [`suggested_file_name`](Self::suggested_file_name)
    /// inside `dir` and return the path written.
    pub fn save_csv(&self, dir: impl AsRef<Path>) -> Result<PathBuf, GameError> {
        let path = dir.as_ref().join(self.suggested_file_name());
        let file = File::create(&path).map_err(|e| GameError::Export(e.to_string()))?;
        self.write_csv(io::BufWriter::new(file))?;
        debug!(target: "monopoly.engine", path = %path.display(), rows = self.len(), "trace saved");
        Ok(path)
    }

    /// Binary checkpoint of the trace.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        bincode::serialize(self).map_err(|e| GameError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        let mut trace: Trace =
            bincode::deserialize(bytes).map_err(|e| GameError::Serialization(e.to_string()))?;
        trace.rebuild_index();
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Location;
    use crate::cards::{Deck, CardId};
    use crate::core::{GameConfig, GameRng};
    use crate::history::NoteBuffer;

    fn state(players: usize) -> GameState {
        let config = GameConfig::new(players);
        let mut rng = GameRng::new(0);
        let chance = Deck::shuffled(DeckKind::Chance, &mut rng);
        let community = Deck::shuffled(DeckKind::CommunityChest, &mut rng);
        GameState::new(&config, chance, community)
    }

    #[test]
    fn test_column_layout() {
        let cols = columns(2);
        assert_eq!(cols.len(), 4 + 2 + 2 + 44 + 4 + 2 + 2);
        assert_eq!(cols[0], "Round");
        assert_eq!(cols[3], "Bank Money");
        assert_eq!(cols[4], "Player 1 Money");
        assert_eq!(cols[7], "Player 2 Pos");
        assert_eq!(cols[8], "Street b1 Owner");
        assert_eq!(cols[9], "Street b1 Level");
        assert!(cols.contains(&"Railroad r4".to_string()));
        assert!(cols.contains(&"Utility u2".to_string()));
        assert_eq!(cols[cols.len() - 2], "CC Jail Free Card Owner");
        assert_eq!(cols[cols.len() - 1], "CH Jail Free Card Owner");
    }

    #[test]
    fn test_row_matches_columns() {
        for players in 2..=8 {
            let s = state(players);
            assert_eq!(encode_row(&s).len(), columns(players).len());
        }
    }

    #[test]
    fn test_row_encoding() {
        let mut s = state(2);
        let p2 = PlayerId::new(2);
        s.player_mut(p2).location = Location::Jail;
        s.deeds.get_mut(PropertyId::railroad(2).unwrap()).owner = Some(p2);
        let card = s.chance.draw().unwrap();
        if card == CardId::JAIL_FREE {
            s.chance.hold(card, p2).unwrap();
        }

        let mut history = History::new();
        history.commit(&s, &mut NoteBuffer::new());
        let trace = Trace::from_history(&history, 2, 0);

        assert_eq!(trace.value(0, "Player 2 Pos"), Some(-1));
        assert_eq!(trace.value(0, "Railroad r2"), Some(2));
        assert_eq!(trace.value(0, "Street b1 Owner"), Some(0));
        assert_eq!(trace.value(0, "Bank Money"), Some(17580));
        let expected_holder = if card == CardId::JAIL_FREE { 2 } else { 0 };
        assert_eq!(trace.value(0, "CH Jail Free Card Owner"), Some(expected_holder));
    }

    #[test]
    fn test_bytes_roundtrip_keeps_lookup() {
        let mut history = History::new();
        history.commit(&state(3), &mut NoteBuffer::new());
        let trace = Trace::from_history(&history, 3, 17);

        let restored = Trace::from_bytes(&trace.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.rows(), trace.rows());
        assert_eq!(restored.bank_money().unwrap(), vec![20580 - 4500]);
        assert_eq!(restored.suggested_file_name(), "data_ranseed17_strtplyr1.csv");
    }

    #[test]
    fn test_csv_table_layout() {
        let mut history = History::new();
        let mut notes = NoteBuffer::new();
        notes.push("p(r).p1>p2.$14");
        notes.push("b.p1.c5(R1)");
        history.commit(&state(2), &mut notes);
        history.commit(&state(2), &mut NoteBuffer::new());
        let trace = Trace::from_history(&history, 2, 3);

        let mut buf = Vec::new();
        trace.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Round,Round Player,Dice Value,Bank Money,"));
        assert!(lines[0].ends_with(",CH Jail Free Card Owner,Notes"));
        let first: Vec<String> = trace.rows()[0].iter().map(i64::to_string).collect();
        assert!(lines[1].starts_with(&first.join(",")));
        assert!(lines[1].ends_with(",p(r).p1>p2.$14;b.p1.c5(R1);"));
        assert!(lines[2].ends_with(",0,0,"));
    }

    #[test]
    fn test_unknown_column() {
        let trace = Trace::from_history(&History::new(), 2, 0);
        assert!(trace.is_empty());
        assert!(trace.column("Nope").is_err());
        assert_eq!(trace.bank_money().unwrap(), Vec::<i64>::new());
    }
}
