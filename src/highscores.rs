//! Best score
//!
//! A single integer, stored as its decimal text under a fixed key. Missing or
//! unreadable data counts as zero rather than failing startup.

use crate::error::PersistenceError;
use crate::persistence::Storage;

/// The best score seen by this install
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neonBreakoutHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Raise the best score if `score` beats it. Returns true when it did.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn load(storage: &impl Storage) -> Self {
        let raw = match storage.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No high score stored, starting from 0");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read high score ({e}), starting from 0");
                return Self::default();
            }
        };

        match raw.trim().parse::<u64>() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(_) => {
                log::warn!("Stored high score {:?} is not a number, starting from 0", raw);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<(), PersistenceError> {
        storage.set(Self::STORAGE_KEY, &self.best.to_string())
    }
}
