//! # Command Layer
//!
//! This module contains the core business logic of cardz. Each command
//! lives in its own submodule and implements pure Rust functions that
//! operate on the domain types.
//!
//! Commands are completely UI-agnostic: no stdout, no prompts, no exit
//! codes. They return a structured [`CmdResult`] carrying the affected and
//! listed cards plus leveled messages, and the UI layer decides how to
//! render it. This is also where the lion's share of testing lives, on the
//! in-memory backend.
//!
//! ## Command Modules
//!
//! - [`add`]: Create a new card
//! - [`update`]: Edit an existing card's fields
//! - [`delete`]: Remove a card
//! - [`list`]: Compute the visible, ordered card list
//! - [`view`]: Raise a card to the focused state
//! - [`favorite`]: Flip a card's favorite flag
//! - [`export`]: Write the backup envelope to a file
//! - [`import`]: Merge a backup file into the store
//! - [`config`]: Show or change the persisted settings

use serde::Serialize;

use crate::model::{BarcodeFormat, Card, CardLocation};

pub mod add;
pub mod config;
pub mod delete;
pub mod export;
pub mod favorite;
pub mod import;
pub mod list;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_cards: Vec<Card>,
    pub listed_cards: Vec<Card>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_cards(mut self, cards: Vec<Card>) -> Self {
        self.affected_cards = cards;
        self
    }

    pub fn with_listed_cards(mut self, cards: Vec<Card>) -> Self {
        self.listed_cards = cards;
        self
    }
}

/// How an edit treats the card's stored location.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LocationEdit {
    #[default]
    Keep,
    Clear,
    Set(CardLocation),
}

/// A partial edit of a card. Unset fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub card_number: Option<String>,
    pub barcode_format: Option<BarcodeFormat>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub notes: Option<String>,
    pub favorite: Option<bool>,
    pub location: LocationEdit,
}
