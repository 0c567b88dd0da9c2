//! High score leaderboard
//!
//! Ranked top-10 table of (player name, score), persisted as JSON.
//! The engine never touches this mid-session; the application layer
//! submits the final score after the loop exits.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the ranking
pub const MAX_HIGH_SCORES: usize = 10;

/// Leaderboard persistence failures
#[derive(Debug, thiserror::Error)]
pub enum ScoreStoreError {
    #[error("leaderboard I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("leaderboard file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Ranked leaderboard, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the table
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed), None if it wouldn't make it
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score if it qualifies; returns the achieved rank (1-indexed)
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_owned(),
            score,
        };
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard, starting fresh when the file is missing
    pub fn load(path: &Path) -> Result<Self, ScoreStoreError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let scores: HighScores = serde_json::from_str(&json)?;
                log::info!("loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoreStoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("high scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_scores_kept_sorted_descending() {
        let mut scores = HighScores::new();
        scores.add_score("ada", 100);
        scores.add_score("ben", 300);
        scores.add_score("cleo", 200);

        let values: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![300, 200, 100]);
    }

    #[test]
    fn test_add_score_returns_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("ada", 100), Some(1));
        assert_eq!(scores.add_score("ben", 300), Some(1));
        assert_eq!(scores.add_score("cleo", 200), Some(2));
        assert_eq!(scores.add_score("dee", 50), Some(4));
    }

    #[test]
    fn test_table_truncates_at_capacity() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES as u64 {
            scores.add_score("player", 100 + i);
        }
        // Below the lowest entry of a full table: rejected
        assert_eq!(scores.add_score("late", 50), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);

        // Beats the lowest: accepted, table stays at capacity
        assert!(scores.add_score("champ", 500).is_some());
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(500));
    }

    #[test]
    fn test_potential_rank_matches_insertion() {
        let mut scores = HighScores::new();
        scores.add_score("ada", 300);
        scores.add_score("ben", 100);
        assert_eq!(scores.potential_rank(200), Some(2));
        assert_eq!(scores.add_score("cleo", 200), Some(2));
    }

    #[test]
    fn test_load_missing_file_starts_fresh() {
        let path = std::env::temp_dir().join("sky_pop_scores_missing.json");
        let _ = fs::remove_file(&path);
        let scores = HighScores::load(&path).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = std::env::temp_dir().join("sky_pop_scores_roundtrip.json");
        let mut scores = HighScores::new();
        scores.add_score("ada", 4200);
        scores.save(&path).unwrap();

        let loaded = HighScores::load(&path).unwrap();
        assert_eq!(loaded.entries, scores.entries);
        let _ = fs::remove_file(&path);
    }
}
