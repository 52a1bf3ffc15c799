//! Undo/redo history.
//!
//! `HistoryManager` owns two stacks of executed commands. The undo stack is
//! bounded; when it overflows the oldest entry is evicted. Every new
//! execution clears the redo stack.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::commands::Command;
use crate::model::VenueStore;
use seatplan_core::{constants, Result};

/// An executed command and when it entered the history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub command: Command,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(command: Command) -> Self {
        Self {
            command,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.command.id
    }

    pub fn description(&self) -> &str {
        self.command.name()
    }
}

/// Executes commands and records them for undo/redo.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryManager {
    /// Creates a history retaining at most `capacity` undo entries
    /// (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting the entries farthest from the present
    /// on both stacks if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.evict();
    }

    fn evict(&mut self) {
        while self.undo_stack.len() > self.capacity {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::debug!("Evicted '{}' from undo history", evicted.description());
            }
        }
        // The redo stack's far end is its front.
        let excess = self.redo_stack.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.redo_stack.drain(..excess);
            tracing::debug!("Evicted {} entries from redo history", excess);
        }
    }

    /// Executes a command and pushes it onto the undo stack.
    ///
    /// The redo stack is cleared. A command that fails to apply leaves the
    /// model and both stacks untouched.
    pub fn execute(&mut self, mut command: Command, store: &mut VenueStore) -> Result<()> {
        command.execute(store)?;
        tracing::info!("Executed '{}'", command.name());
        self.undo_stack.push_back(HistoryEntry::new(command));
        self.redo_stack.clear();
        self.evict();
        Ok(())
    }

    /// Executes several commands as one undoable entry.
    ///
    /// An empty batch is a no-op.
    pub fn execute_batch(&mut self, commands: Vec<Command>, label: impl Into<String>, store: &mut VenueStore) -> Result<()> {
        if commands.is_empty() {
            return Ok(());
        }
        self.execute(Command::batch(label, commands), store)
    }

    /// Reverts the most recent command.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. If the command fails
    /// to revert it stays on the undo stack.
    pub fn undo(&mut self, store: &mut VenueStore) -> Result<bool> {
        let Some(mut entry) = self.undo_stack.pop_back() else {
            return Ok(false);
        };
        if let Err(err) = entry.command.undo(store) {
            self.undo_stack.push_back(entry);
            return Err(err);
        }
        tracing::info!("Undid '{}'", entry.description());
        self.redo_stack.push(entry);
        Ok(true)
    }

    /// Re-applies the most recently undone command.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, store: &mut VenueStore) -> Result<bool> {
        let Some(mut entry) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = entry.command.execute(store) {
            self.redo_stack.push(entry);
            return Err(err);
        }
        tracing::info!("Redid '{}'", entry.description());
        self.undo_stack.push_back(entry);
        self.evict();
        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the command `undo` would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(HistoryEntry::description)
    }

    /// Description of the command `redo` would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(HistoryEntry::description)
    }

    /// Undo entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    /// Clear history stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(constants::HISTORY_CAPACITY)
    }
}
