//! Roster availability list.
//!
//! A flat list of names with an availability flag per entry, loaded from
//! pasted text and exported as plain text.

use tracing::debug;

use crate::names::parse_names;

/// A single name and whether it is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityEntry {
    pub name: String,
    pub available: bool,
}

/// Availability errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("no available players to export")]
    NothingAvailable,

    #[error("unknown name: {0}")]
    UnknownName(String),
}

/// Ordered list of names with availability flags.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityList {
    entries: Vec<AvailabilityEntry>,
}

impl AvailabilityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with names parsed from text, all unavailable.
    pub fn load(&mut self, input: &str) -> usize {
        self.entries = parse_names(input)
            .into_iter()
            .map(|name| AvailabilityEntry {
                name,
                available: false,
            })
            .collect();
        debug!(count = self.entries.len(), "loaded availability list");
        self.entries.len()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Set availability for one name.
    pub fn set_available(&mut self, name: &str, available: bool) -> Result<(), AvailabilityError> {
        let entry = self.entry_mut(name)?;
        entry.available = available;
        Ok(())
    }

    /// Flip availability for one name, returning the new value.
    pub fn toggle(&mut self, name: &str) -> Result<bool, AvailabilityError> {
        let entry = self.entry_mut(name)?;
        entry.available = !entry.available;
        Ok(entry.available)
    }

    pub fn mark_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.available = true);
    }

    pub fn unmark_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.available = false);
    }

    /// Entries to display, optionally only the available ones.
    pub fn visible(&self, available_only: bool) -> impl Iterator<Item = &AvailabilityEntry> {
        self.entries
            .iter()
            .filter(move |e| !available_only || e.available)
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn available_count(&self) -> usize {
        self.entries.iter().filter(|e| e.available).count()
    }

    /// Available names, one per line, in list order.
    pub fn export_text(&self) -> Result<String, AvailabilityError> {
        let names: Vec<&str> = self
            .visible(true)
            .map(|e| e.name.as_str())
            .collect();
        if names.is_empty() {
            return Err(AvailabilityError::NothingAvailable);
        }
        Ok(names.join("\n"))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut AvailabilityEntry, AvailabilityError> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| AvailabilityError::UnknownName(name.to_string()))
    }
}
