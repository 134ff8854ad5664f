use std::collections::HashMap;

use thiserror::Error;

use crate::Cents;
use crate::matcher::SearchResult;
use crate::model::{Combination, EntryId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("entry {0} is not among the search candidates")]
    UnknownEntry(EntryId),
    #[error("no combination at rank {0}")]
    NoSuchCombination(usize),
}

/// The working set of chosen entry ids.
///
/// Seeded with the best-ranked combination; afterwards it is just a set of
/// ids the user edits, independent of the combination that produced it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ranked: Vec<Combination>,
    amounts: HashMap<EntryId, Cents>,
    /// Insertion order.
    chosen: Vec<EntryId>,
}

impl Selection {
    pub fn from_result(result: &SearchResult) -> Self {
        let amounts = result
            .candidates
            .iter()
            .map(|c| (c.entry.id.clone(), c.cents))
            .collect();
        let mut selection = Self {
            ranked: result.combinations.clone(),
            amounts,
            chosen: Vec::new(),
        };
        if !selection.ranked.is_empty() {
            selection.fill_from(0);
        }
        selection
    }

    /// Replace the working set with exactly the entries of the combination at `index`.
    pub fn select_combination(&mut self, index: usize) -> Result<(), SelectionError> {
        if index >= self.ranked.len() {
            return Err(SelectionError::NoSuchCombination(index));
        }
        self.fill_from(index);
        Ok(())
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_entry(&mut self, id: &str) -> Result<bool, SelectionError> {
        if !self.amounts.contains_key(id) {
            return Err(SelectionError::UnknownEntry(id.to_string()));
        }
        match self.chosen.iter().position(|chosen| chosen == id) {
            Some(pos) => {
                self.chosen.remove(pos);
                Ok(false)
            }
            None => {
                self.chosen.push(id.to_string());
                Ok(true)
            }
        }
    }

    pub fn running_total(&self) -> Cents {
        self.chosen
            .iter()
            .filter_map(|id| self.amounts.get(id).copied())
            .sum()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.chosen.iter().any(|chosen| chosen == id)
    }

    pub fn selected_ids(&self) -> &[EntryId] {
        &self.chosen
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    fn fill_from(&mut self, index: usize) {
        self.chosen = self.ranked[index]
            .ids()
            .map(str::to_string)
            .collect();
    }
}
