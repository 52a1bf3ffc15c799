//! An open venue document: model, selection and history.

use crate::history::HistoryManager;
use crate::model::VenueStore;
use crate::selection_manager::SelectionManager;

/// Everything that belongs to one open document.
///
/// Selection and history are the only state shared across tool activations;
/// both are reset when a new document is loaded.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub store: VenueStore,
    pub selection: SelectionManager,
    pub history: HistoryManager,
}

impl Document {
    pub fn new(store: VenueStore, history_capacity: usize) -> Self {
        Self {
            store,
            selection: SelectionManager::new(),
            history: HistoryManager::new(history_capacity),
        }
    }

    /// Drops selected ids whose entity no longer exists.
    pub fn prune_selection(&mut self) -> bool {
        self.selection.prune(&self.store)
    }
}
