//! In-memory, append-only todo list.
//!
//! The list lives for as long as the server process and is never persisted.
//! Every todo's identifier is its index in the list, assigned under the write
//! lock so concurrent creates still produce dense, unique ids.

use parking_lot::RwLock;
use todo_tonic_core::{Result, proto::TodoItem, types::next_todo_id};

#[derive(Debug, Default)]
pub struct TodoStore {
    items: RwLock<Vec<TodoItem>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a todo with the next identifier and returns the stored item.
    ///
    /// # Errors
    ///
    /// Returns [`todo_tonic_core::Error::IdSpaceExhausted`] once the list
    /// holds more items than a todo id can address.
    pub fn create(&self, text: String) -> Result<TodoItem> {
        let mut items = self.items.write();
        let item = TodoItem {
            id: next_todo_id(items.len())?,
            text,
        };
        items.push(item.clone());
        Ok(item)
    }

    /// Returns a snapshot of every todo in creation order.
    pub fn list(&self) -> Vec<TodoItem> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
