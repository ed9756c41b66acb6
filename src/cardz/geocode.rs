//! # Geocode Results
//!
//! Address search is delegated to a remote collaborator; the core only
//! consumes the candidate shape it returns and derives the labels the
//! wallet stores and displays.
//!
//! A candidate's `display_name` is a long comma-separated chain
//! (`"Cafe Nero, Newtown, Sydney, NSW, Australia"`). The stored location
//! label keeps only the first two components; list rendering shows just
//! the suburb, which is the second component when there is one.

use crate::geo::Coordinates;
use crate::model::CardLocation;

/// One candidate from the address-search collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

impl GeocodeCandidate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// The candidate taken verbatim as a card's location fields.
    pub fn into_location(self) -> CardLocation {
        let name = location_label(&self.display_name);
        CardLocation::new(self.lat, self.lng, Some(name))
    }
}

/// Stored location label: the first two comma-separated components of a
/// display name, trimmed and rejoined.
pub fn location_label(display_name: &str) -> String {
    display_name
        .split(',')
        .map(str::trim)
        .take(2)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The suburb shown in card lists: the second component of a stored
/// location name, falling back to the first when there is only one.
pub fn suburb(location_name: &str) -> String {
    let mut parts = location_name.split(',').map(str::trim);
    let first = parts.next().unwrap_or("");
    parts.next().unwrap_or(first).to_string()
}
