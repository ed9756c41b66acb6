//! # Domain Model: Cards, Formats and Settings
//!
//! This module defines the core data structures for cardz: [`Card`],
//! [`BarcodeFormat`], [`CardLocation`] and [`Settings`].
//!
//! ## Identity
//!
//! Every card carries an opaque string id of the form
//! `card_<unix-millis>_<random>`: a time component for rough monotonicity
//! plus a uuid-derived random token so that ids minted on different devices
//! do not collide when backups are merged. Ids are assigned once at creation
//! and never change.
//!
//! ## Locations Are All-or-Nothing
//!
//! A card either has a full location (latitude, longitude and an optional
//! human-readable label) or none at all. The coordinate pair is modeled as a
//! single [`Option<CardLocation>`] rather than two independently-nullable
//! numbers, so a half-set location cannot be represented.
//!
//! ## Wire Format
//!
//! Cards are persisted and exported as flat camelCase JSON with `lat`,
//! `lng` and `locationName` as sibling fields and timestamps as Unix
//! milliseconds. Records written by older versions (or by other wallets)
//! may be missing `notes`, `favorite` or `lastUsed`; those fields default.
//! A record carrying only one of `lat`/`lng` deserializes with no location
//! at all rather than failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinates;

/// The fixed set of barcode symbologies a card can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[serde(rename = "EAN13")]
    Ean13,
    #[serde(rename = "EAN8")]
    Ean8,
    #[serde(rename = "UPC")]
    Upc,
    #[serde(rename = "CODE39")]
    Code39,
    #[serde(rename = "ITF")]
    Itf,
    #[serde(rename = "CODE128")]
    Code128,
    #[serde(rename = "QR")]
    Qr,
}

impl Default for BarcodeFormat {
    fn default() -> Self {
        Self::Code128
    }
}

impl BarcodeFormat {
    /// Checks a raw payload against this format's validity rule.
    ///
    /// | Format | Rule |
    /// |--------|------|
    /// | EAN13 | exactly 13 digits |
    /// | EAN8 | exactly 8 digits |
    /// | UPC | exactly 12 digits |
    /// | CODE39 | one or more of `A-Z 0-9 - . $ / + %` and space, case-insensitive |
    /// | ITF | digits only, even length |
    /// | QR, CODE128 | any non-empty string |
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            BarcodeFormat::Ean13 => is_digits_of_len(value, 13),
            BarcodeFormat::Ean8 => is_digits_of_len(value, 8),
            BarcodeFormat::Upc => is_digits_of_len(value, 12),
            BarcodeFormat::Code39 => {
                !value.is_empty() && value.chars().all(is_code39_char)
            }
            BarcodeFormat::Itf => {
                !value.is_empty()
                    && value.len() % 2 == 0
                    && value.bytes().all(|b| b.is_ascii_digit())
            }
            BarcodeFormat::Qr | BarcodeFormat::Code128 => !value.is_empty(),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            BarcodeFormat::Ean13 => "EAN13",
            BarcodeFormat::Ean8 => "EAN8",
            BarcodeFormat::Upc => "UPC",
            BarcodeFormat::Code39 => "CODE39",
            BarcodeFormat::Itf => "ITF",
            BarcodeFormat::Code128 => "CODE128",
            BarcodeFormat::Qr => "QR",
        }
    }
}

fn is_digits_of_len(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_code39_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '.' | '$' | '/' | '+' | '%')
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl std::str::FromStr for BarcodeFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EAN13" => Ok(BarcodeFormat::Ean13),
            "EAN8" => Ok(BarcodeFormat::Ean8),
            "UPC" => Ok(BarcodeFormat::Upc),
            "CODE39" => Ok(BarcodeFormat::Code39),
            "ITF" => Ok(BarcodeFormat::Itf),
            "CODE128" => Ok(BarcodeFormat::Code128),
            "QR" => Ok(BarcodeFormat::Qr),
            other => Err(format!("Unknown barcode format: {}", other)),
        }
    }
}

/// A card's stored location: a coordinate pair plus an optional label
/// (typically the first components of a geocoder's display name).
#[derive(Debug, Clone, PartialEq)]
pub struct CardLocation {
    pub lat: f64,
    pub lng: f64,
    pub name: Option<String>,
}

impl CardLocation {
    pub fn new(lat: f64, lng: f64, name: Option<String>) -> Self {
        Self { lat, lng, name }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// One loyalty card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub card_number: String,
    pub barcode_format: BarcodeFormat,
    pub category: String,
    pub color: String,
    pub notes: String,
    pub location: Option<CardLocation>,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
}

// Flat camelCase wire shape shared by persistence and backup envelopes.
// Legacy records may lack notes/favorite/lastUsed; those default.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardWire {
    id: String,
    name: String,
    card_number: String,
    barcode_format: BarcodeFormat,
    #[serde(default)]
    category: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location_name: Option<String>,
    #[serde(default)]
    favorite: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    last_used: Option<DateTime<Utc>>,
}

impl From<&Card> for CardWire {
    fn from(card: &Card) -> Self {
        CardWire {
            id: card.id.clone(),
            name: card.name.clone(),
            card_number: card.card_number.clone(),
            barcode_format: card.barcode_format,
            category: card.category.clone(),
            color: card.color.clone(),
            notes: card.notes.clone(),
            lat: card.location.as_ref().map(|l| l.lat),
            lng: card.location.as_ref().map(|l| l.lng),
            location_name: card.location.as_ref().and_then(|l| l.name.clone()),
            favorite: card.favorite,
            created_at: card.created_at,
            last_used: card.last_used,
        }
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        CardWire::from(self).serialize(serializer)
    }
}

// Custom deserializer rebuilding the structural location from the flat
// lat/lng/locationName triple. A record with only one coordinate set is
// treated as having no location.
impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = CardWire::deserialize(deserializer)?;

        let location = match (wire.lat, wire.lng) {
            (Some(lat), Some(lng)) => Some(CardLocation::new(lat, lng, wire.location_name)),
            _ => None,
        };

        Ok(Card {
            id: wire.id,
            name: wire.name,
            card_number: wire.card_number,
            barcode_format: wire.barcode_format,
            category: wire.category,
            color: wire.color,
            notes: wire.notes,
            location,
            favorite: wire.favorite,
            created_at: wire.created_at,
            last_used: wire.last_used,
        })
    }
}

/// Input to [`CardStore::upsert`](crate::store::CardStore::upsert): the
/// user-editable card fields, with `id` absent for new cards.
#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub id: Option<String>,
    pub name: String,
    pub card_number: String,
    pub barcode_format: BarcodeFormat,
    pub category: String,
    pub color: String,
    pub notes: String,
    pub location: Option<CardLocation>,
    pub favorite: bool,
}

impl CardDraft {
    /// Draft pre-filled from an existing card, for edits.
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: Some(card.id.clone()),
            name: card.name.clone(),
            card_number: card.card_number.clone(),
            barcode_format: card.barcode_format,
            category: card.category.clone(),
            color: card.color.clone(),
            notes: card.notes.clone(),
            location: card.location.clone(),
            favorite: card.favorite,
        }
    }
}

/// Generates a fresh card id: time component + random token.
pub fn generate_card_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let token = Uuid::new_v4().simple().to_string();
    format!("card_{}_{}", millis, &token[..9])
}

/// Spaces a card number into groups of four for readability.
pub fn format_card_number(number: &str) -> String {
    number
        .chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Theme::Auto),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Recent,
    Category,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "recent" => Ok(SortBy::Recent),
            "category" => Ok(SortBy::Category),
            other => Err(format!("Unknown sort mode: {}", other)),
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortBy::Name => "name",
            SortBy::Recent => "recent",
            SortBy::Category => "category",
        };
        write!(f, "{}", s)
    }
}

/// The process-wide settings record.
///
/// Deserialization is container-defaulted so fields introduced by later
/// versions degrade gracefully to their defaults when loading older data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub sort_by: SortBy,
}

impl Settings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
    }
}

/// A shallow partial update of [`Settings`]. Unset fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        Self {
            theme: Some(settings.theme),
            sort_by: Some(settings.sort_by),
        }
    }
}
