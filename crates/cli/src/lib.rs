//! Command-line caller for the settlement engine.
//!
//! Loads one trip snapshot as JSON, settles it, and renders the result as
//! JSON. Persistence and transport stay outside; the binary only wires I/O.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use tripsplit_balances::{TripSettlement, compute_and_settle};
use tripsplit_expenses::{Expense, Participant, Split};

/// Argument value that selects stdin instead of a file.
pub const STDIN_ARG: &str = "-";

/// A consistent read of one trip, as handed over by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub splits: Vec<Split>,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("failed to decode trip snapshot")
    }

    /// Reads the snapshot from `source`, or from stdin when it is `-`.
    pub fn load(source: &str) -> anyhow::Result<Self> {
        let raw = if source == STDIN_ARG {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read trip snapshot from stdin")?;
            buf
        } else {
            let path = Path::new(source);
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read trip snapshot from {}", path.display()))?
        };

        let snapshot = Self::from_json(&raw)?;
        tracing::debug!(
            participants = snapshot.participants.len(),
            expenses = snapshot.expenses.len(),
            splits = snapshot.splits.len(),
            "loaded trip snapshot"
        );
        Ok(snapshot)
    }

    pub fn settle(&self) -> anyhow::Result<TripSettlement> {
        compute_and_settle(&self.participants, &self.expenses, &self.splits)
            .context("failed to settle trip")
    }
}

/// Settles a snapshot and renders the settlement as pretty JSON.
pub fn run(snapshot: &Snapshot) -> anyhow::Result<String> {
    let settlement = snapshot.settle()?;
    serde_json::to_string_pretty(&settlement).context("failed to encode settlement")
}
