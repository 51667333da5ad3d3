//! Flashcard collections persisted as a JSON array
//!
//! A flashcard is a named list of words copied out of the graph document at
//! the time it was created or edited, so later rebuilds do not change it.

use crate::graph::document::write_atomically;
use crate::graph::{GraphDocument, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Name used when a flashcard is created without one
pub const DEFAULT_FLASHCARD_NAME: &str = "new flashcard";

/// Flashcard store errors
#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Flashcard {0} not found")]
    NotFound(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type FlashcardResult<T> = Result<T, FlashcardError>;

/// A word as stored on a flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardWord {
    pub id: NodeId,
    pub label: String,
    pub details: String,
}

impl From<&Node> for FlashcardWord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            label: node.label.clone(),
            details: node.details.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: u64,
    pub name: String,
    pub words: Vec<FlashcardWord>,
}

/// File-backed flashcard collection.
///
/// Every mutation rewrites the whole file, and the in-memory collection only
/// changes once that write has succeeded.
#[derive(Debug)]
pub struct FlashcardStore {
    path: PathBuf,
    cards: Vec<Flashcard>,
}

impl FlashcardStore {
    /// Open the collection at `path`.
    ///
    /// A missing or unreadable file is treated as an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cards = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed flashcard file {:?}: {}", path, e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        info!("Opened flashcard store {:?} ({} flashcards)", path, cards.len());
        Self { path, cards }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn get(&self, id: u64) -> Option<&Flashcard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Create a flashcard from the graph nodes named by `ids`
    pub fn create(
        &mut self,
        name: Option<String>,
        ids: &[NodeId],
        graph: &GraphDocument,
    ) -> FlashcardResult<Flashcard> {
        let id = self.cards.iter().map(|c| c.id).max().map_or(1, |max| max + 1);
        let card = Flashcard {
            id,
            name: name.unwrap_or_else(|| DEFAULT_FLASHCARD_NAME.to_string()),
            words: words_for(ids, graph),
        };

        let mut cards = self.cards.clone();
        cards.push(card.clone());
        self.commit(cards)?;
        info!("Created flashcard {} with {} words", card.id, card.words.len());
        Ok(card)
    }

    /// Replace the words (and optionally the name) of an existing flashcard
    pub fn update_content(
        &mut self,
        id: u64,
        name: Option<String>,
        ids: &[NodeId],
        graph: &GraphDocument,
    ) -> FlashcardResult<Flashcard> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(FlashcardError::NotFound(id))?;

        let mut cards = self.cards.clone();
        let card = &mut cards[pos];
        if let Some(name) = name {
            card.name = name;
        }
        card.words = words_for(ids, graph);
        let updated = card.clone();

        self.commit(cards)?;
        Ok(updated)
    }

    pub fn delete(&mut self, id: u64) -> FlashcardResult<Flashcard> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(FlashcardError::NotFound(id))?;
        let mut cards = self.cards.clone();
        let removed = cards.remove(pos);

        self.commit(cards)?;
        info!("Deleted flashcard {}", id);
        Ok(removed)
    }

    /// Write `cards` to disk, then adopt them as the current collection
    fn commit(&mut self, cards: Vec<Flashcard>) -> FlashcardResult<()> {
        let json = serde_json::to_string_pretty(&cards)?;
        write_atomically(&self.path, json.as_bytes())?;
        self.cards = cards;
        Ok(())
    }
}

fn words_for(ids: &[NodeId], graph: &GraphDocument) -> Vec<FlashcardWord> {
    graph.nodes_by_ids(ids).into_iter().map(FlashcardWord::from).collect()
}
