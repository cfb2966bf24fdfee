//! Session leaderboard
//!
//! The best finished runs of this process, best first. Serializable so a host
//! can persist it however it likes.

use serde::{Deserialize, Serialize};

/// Runs kept on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Actors destroyed
    pub score: u64,
    /// Wave reached
    pub wave: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board contents, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Put a finished run on the board.
    ///
    /// Returns its 1-based rank, or `None` for a scoreless run or one that
    /// doesn't make the cut. Equal scores rank below the earlier run.
    pub fn record(&mut self, score: u64, wave: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        if slot >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(slot, HighScoreEntry { score, wave });
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("High score #{}: {} (wave {})", slot + 1, score, wave);
        Some(slot + 1)
    }
}
