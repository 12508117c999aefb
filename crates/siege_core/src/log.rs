//! Per-day causality log: every discrete stat change and its attributed cause.
//!
//! Entries are append-only and ordered by emission time within a day; the
//! driver clears the log at the start of each simulated day.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CausalityCategory {
    Food,
    Water,
    Fuel,
    Medicine,
    Materials,
    Morale,
    Unrest,
    Sickness,
    Integrity,
    SiegeDamage,
    Population,
    Death,
    Event,
    Mission,
    Law,
    EmergencyOrder,
    Production,
    Consumption,
    Overcrowding,
    General,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalityEntry {
    pub category: CausalityCategory,
    pub source: String,
    /// Flat change (+5, -10, …); 0 when not applicable.
    pub value: i32,
    /// Production/consumption modifier (0.75, 1.25, …); 0 means "not a multiplier entry".
    pub multiplier: f32,
    pub description: String,
}

impl CausalityEntry {
    pub fn flat(
        category: CausalityCategory,
        source: impl Into<String>,
        value: i32,
        description: impl Into<String>,
    ) -> Self {
        CausalityEntry {
            category,
            source: source.into(),
            value,
            multiplier: 0.0,
            description: description.into(),
        }
    }

    pub fn mult(
        category: CausalityCategory,
        source: impl Into<String>,
        multiplier: f32,
        description: impl Into<String>,
    ) -> Self {
        CausalityEntry {
            category,
            source: source.into(),
            value: 0,
            multiplier,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CausalityLog {
    entries: Vec<CausalityEntry>,
}

impl CausalityLog {
    pub fn new() -> Self {
        CausalityLog::default()
    }

    pub fn entries(&self) -> &[CausalityEntry] {
        &self.entries
    }

    pub fn add(&mut self, entry: CausalityEntry) {
        self.entries.push(entry);
    }

    pub fn add_flat(
        &mut self,
        category: CausalityCategory,
        source: impl Into<String>,
        value: i32,
        description: impl Into<String>,
    ) {
        self.entries
            .push(CausalityEntry::flat(category, source, value, description));
    }

    pub fn add_mult(
        &mut self,
        category: CausalityCategory,
        source: impl Into<String>,
        multiplier: f32,
        description: impl Into<String>,
    ) {
        self.entries.push(CausalityEntry::mult(
            category,
            source,
            multiplier,
            description,
        ));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn by_category(&self, category: CausalityCategory) -> Vec<&CausalityEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }
}
