//! # Query Engine
//!
//! [`visible_cards`] turns the full card list plus the current view inputs
//! (free-text term, category/proximity filter, sort mode, reference
//! location) into the ordered visible subset. It is pure with respect to
//! its inputs and is recomputed on every change to any of them.
//!
//! ## Filtering
//!
//! 1. Text: case-insensitive substring match of the term against the card
//!    name OR the card number. An empty term matches everything.
//! 2. Category: [`CategoryFilter::All`] passes every card;
//!    [`CategoryFilter::Nearby`] passes only cards that have a stored
//!    location AND a reference location is available AND the great-circle
//!    distance is within [`NEARBY_RADIUS_KM`] (cards without coordinates
//!    simply never appear under Nearby); [`CategoryFilter::Named`] requires
//!    exact category equality.
//!
//! ## Ordering
//!
//! Nearby views sort ascending by distance from the reference; everything
//! else follows the sort mode (name / recent / category). All sorts are
//! stable so that equal keys keep their relative input order and lists do
//! not jitter between renders.

use std::cmp::Ordering;

use crate::geo::{distance_km, Coordinates};
use crate::model::{Card, SortBy};

/// Proximity radius for the Nearby filter. A configuration constant, not a
/// protocol constraint.
pub const NEARBY_RADIUS_KM: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Nearby,
    Named(String),
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        match s {
            "all" => CategoryFilter::All,
            "nearby" => CategoryFilter::Nearby,
            other => CategoryFilter::Named(other.to_string()),
        }
    }
}

/// The full set of view inputs. Changing any field invalidates the current
/// selection (see [`Selection`](crate::selection::Selection)).
#[derive(Debug, Clone, PartialEq)]
pub struct CardQuery {
    pub search_term: String,
    pub category: CategoryFilter,
    pub sort_by: SortBy,
    pub reference: Option<Coordinates>,
}

impl Default for CardQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            sort_by: SortBy::default(),
            reference: None,
        }
    }
}

impl CardQuery {
    pub fn sorted_by(sort_by: SortBy) -> Self {
        Self {
            sort_by,
            ..Self::default()
        }
    }
}

/// Computes the ordered visible subset for the given view inputs.
pub fn visible_cards(cards: &[Card], query: &CardQuery) -> Vec<Card> {
    let term = query.search_term.to_lowercase();

    let visible: Vec<Card> = cards
        .iter()
        .filter(|card| matches_term(card, &term) && matches_category(card, query))
        .cloned()
        .collect();

    match &query.category {
        CategoryFilter::Nearby => {
            // matches_category already guaranteed a reference and coordinates
            let Some(reference) = query.reference else {
                return Vec::new();
            };
            sort_by_distance(visible, reference)
        }
        _ => sort_by_mode(visible, query.sort_by),
    }
}

fn matches_term(card: &Card, term_lower: &str) -> bool {
    if term_lower.is_empty() {
        return true;
    }
    card.name.to_lowercase().contains(term_lower)
        || card.card_number.to_lowercase().contains(term_lower)
}

fn matches_category(card: &Card, query: &CardQuery) -> bool {
    match &query.category {
        CategoryFilter::All => true,
        CategoryFilter::Named(category) => card.category == *category,
        CategoryFilter::Nearby => {
            let (Some(location), Some(reference)) = (&card.location, query.reference) else {
                return false;
            };
            distance_km(reference, location.coordinates()) <= NEARBY_RADIUS_KM
        }
    }
}

fn sort_by_distance(cards: Vec<Card>, reference: Coordinates) -> Vec<Card> {
    let mut keyed: Vec<(f64, Card)> = cards
        .into_iter()
        .filter_map(|card| {
            let coordinates = card.location.as_ref()?.coordinates();
            Some((distance_km(reference, coordinates), card))
        })
        .collect();

    // Vec::sort_by is stable, so equal distances keep input order
    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, card)| card).collect()
}

fn sort_by_mode(mut cards: Vec<Card>, sort_by: SortBy) -> Vec<Card> {
    match sort_by {
        SortBy::Name => cards.sort_by(|a, b| collate(&a.name, &b.name)),
        SortBy::Recent => cards.sort_by(|a, b| last_used_millis(b).cmp(&last_used_millis(a))),
        SortBy::Category => cards.sort_by(|a, b| collate(&a.category, &b.category)),
    }
    cards
}

// Case-insensitive Unicode comparison as the locale-aware collation
// stand-in. Ties fall back to input order via the stable sort.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn last_used_millis(card: &Card) -> i64 {
    card.last_used.map(|t| t.timestamp_millis()).unwrap_or(0)
}
