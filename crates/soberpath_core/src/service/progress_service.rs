//! Client progress notes.
//!
//! # Invariants
//! - Comments are stored trimmed; blank comments are rejected.
//! - Notes are only added for clients on the stored roster.
//! - A client's history keeps insertion order.

use crate::model::progress::ProgressEntry;
use crate::model::roster::Client;
use crate::repo::collection_repo::{load_collection, save_collection, Collection};
use crate::repo::collection_store::CollectionStore;
use chrono::NaiveDate;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    EmptyComment,
    UnknownClient(u32),
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyComment => f.write_str("progress comment cannot be empty"),
            Self::UnknownClient(id) => write!(f, "client not found: {id}"),
        }
    }
}

impl Error for ProgressError {}

/// Progress log over a collection store.
pub struct ProgressService<S: CollectionStore> {
    store: S,
    entries: Vec<ProgressEntry>,
}

impl<S: CollectionStore> ProgressService<S> {
    pub fn open(store: S) -> Self {
        let entries = load_collection::<ProgressEntry>(&store);
        Self { store, entries }
    }

    /// Appends a note for `client_id`, which must be on the stored roster.
    pub fn add_progress(
        &mut self,
        client_id: u32,
        comment: &str,
        date: NaiveDate,
    ) -> Result<ProgressEntry, ProgressError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ProgressError::EmptyComment);
        }
        let clients = load_collection::<Client>(&self.store);
        if !clients.iter().any(|client| client.id == client_id) {
            return Err(ProgressError::UnknownClient(client_id));
        }
        let entry = ProgressEntry {
            client_id,
            date,
            comment: comment.to_string(),
        };
        self.entries.push(entry.clone());
        if let Err(err) = save_collection(&self.store, &self.entries) {
            warn!(
                "event=collection_save module=service status=error key={} error={err}",
                ProgressEntry::STORAGE_KEY
            );
        }
        Ok(entry)
    }

    pub fn history(&self, client_id: u32) -> Vec<&ProgressEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.client_id == client_id)
            .collect()
    }
}

/// Clients whose name contains `term`, ignoring case. A blank term matches
/// everyone.
pub fn search_clients<'c>(clients: &'c [Client], term: &str) -> Vec<&'c Client> {
    let needle = term.trim().to_lowercase();
    clients
        .iter()
        .filter(|client| client.client_name.to_lowercase().contains(&needle))
        .collect()
}
