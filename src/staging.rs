//! Bounded store of generated programs awaiting operator confirmation.
//!
//! Holds the most recent `capacity` entries in staging order. Staging a new
//! program when the store is full evicts the oldest one; confirming an entry
//! removes it. Entries are never modified once staged.
use crate::gcode::MotionProgram;
use crate::planner::Prediction;
use chrono::{DateTime, Local};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub const DEFAULT_CAPACITY: usize = 10;

/// Opaque identifier of a staged program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagingId(Uuid);

impl StagingId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(text: &str) -> Option<Self> {
        Uuid::parse_str(text.trim()).ok().map(Self)
    }
}

impl fmt::Display for StagingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct StagingEntry {
    pub id: StagingId,
    pub timestamp: DateTime<Local>,
    /// Suggested file name, `laser_bending_<YYYYmmdd_HHMMSS>.gcode`.
    pub filename: String,
    pub program: MotionProgram,
    pub predictions: Vec<Prediction>,
}

pub fn program_filename(timestamp: &DateTime<Local>) -> String {
    format!("laser_bending_{}.gcode", timestamp.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug)]
pub struct ProgramStore {
    entries: Mutex<VecDeque<StagingEntry>>,
    capacity: usize,
}

impl Default for ProgramStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store keeping at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // the queue stays consistent across a panicking holder
    fn lock(&self) -> MutexGuard<'_, VecDeque<StagingEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Stage a program; returns its new id.
    pub fn stage(&self, program: MotionProgram, predictions: Vec<Prediction>) -> StagingId {
        let timestamp = Local::now();
        let entry = StagingEntry {
            id: StagingId::generate(),
            filename: program_filename(&timestamp),
            timestamp,
            program,
            predictions,
        };
        let id = entry.id;
        let filename = entry.filename.clone();

        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            if let Some(evicted) = entries.pop_front() {
                warn!("staging: evicted unconfirmed {} ({})", evicted.filename, evicted.id);
            }
        }
        entries.push_back(entry);
        let staged = entries.len();
        drop(entries);

        info!("staging: stored {filename} ({id}), {staged} staged");
        id
    }

    /// Most recently staged entry, left in place.
    pub fn latest(&self) -> Option<StagingEntry> {
        self.lock().back().cloned()
    }

    /// Remove the entry with `id`; `false` when it is unknown or already gone.
    pub fn confirm(&self, id: &StagingId) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|e| e.id == *id) {
            Some(pos) => {
                if let Some(entry) = entries.remove(pos) {
                    info!("staging: confirmed {} ({id})", entry.filename);
                }
                true
            }
            None => {
                warn!("staging: {id} not found");
                false
            }
        }
    }
}
