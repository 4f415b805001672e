//! Travel-time types: coordinates, matrix entries and the pairwise matrix

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Human-readable location string. Two addresses are the same location only
/// when byte-identical.
pub type Address = String;

/// Geographic point returned by geocoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build from the (longitude, latitude) order used by map APIs
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// `"lng,lat"` form expected by the directions endpoint
    pub fn to_lng_lat_param(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

/// How a matrix entry was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "minutes", rename_all = "camelCase")]
pub enum TravelEntry {
    /// Answered by the routing service (or the zero diagonal)
    Resolved(u32),
    /// Filled in by the locality heuristic after the routing service gave nothing
    Estimated(u32),
}

impl TravelEntry {
    pub fn minutes(&self) -> u32 {
        match self {
            TravelEntry::Resolved(m) | TravelEntry::Estimated(m) => *m,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, TravelEntry::Estimated(_))
    }
}

/// Directed travel times in minutes between every pair of known addresses.
///
/// `(a, b)` and `(b, a)` are stored independently and may differ: each direction
/// is routed (and, on failure, estimated) on its own.
#[derive(Debug, Clone, Default)]
pub struct TravelTimeMatrix {
    addresses: Vec<Address>,
    entries: HashMap<(Address, Address), TravelEntry>,
}

impl TravelTimeMatrix {
    /// Empty matrix over `addresses`, with every diagonal entry set to zero
    pub fn with_addresses(addresses: Vec<Address>) -> Self {
        let entries = addresses
            .iter()
            .map(|a| ((a.clone(), a.clone()), TravelEntry::Resolved(0)))
            .collect();
        Self { addresses, entries }
    }

    pub(crate) fn insert(&mut self, origin: Address, destination: Address, entry: TravelEntry) {
        self.entries.insert((origin, destination), entry);
    }

    /// Travel minutes from `origin` to `destination`, if both are in the matrix
    pub fn minutes(&self, origin: &str, destination: &str) -> Option<u32> {
        self.entry(origin, destination).map(|e| e.minutes())
    }

    pub fn entry(&self, origin: &str, destination: &str) -> Option<TravelEntry> {
        self.entries
            .get(&(origin.to_string(), destination.to_string()))
            .copied()
    }

    /// Addresses in the order they were supplied
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Number of entries, diagonal included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of off-diagonal entries that came from the fallback heuristic
    pub fn estimated_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_estimated()).count()
    }

    /// Plain-text listing handed to the external optimizer.
    ///
    /// Only one direction per unordered pair is listed (the first address in
    /// input order as origin), and zero entries are skipped.
    pub fn render_text(&self) -> String {
        let mut lines = vec!["이동 시간 (분):".to_string()];
        for (i, origin) in self.addresses.iter().enumerate() {
            for destination in &self.addresses[i + 1..] {
                let minutes = self.minutes(origin, destination).unwrap_or(0);
                if minutes > 0 {
                    lines.push(format!("- {} → {}: {}분", origin, destination, minutes));
                }
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_addresses_sets_zero_diagonal() {
        let matrix = TravelTimeMatrix::with_addresses(vec!["A".into(), "B".into()]);
        assert_eq!(matrix.minutes("A", "A"), Some(0));
        assert_eq!(matrix.minutes("B", "B"), Some(0));
        assert_eq!(matrix.minutes("A", "B"), None);
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn test_entries_are_directed() {
        let mut matrix = TravelTimeMatrix::with_addresses(vec!["A".into(), "B".into()]);
        matrix.insert("A".into(), "B".into(), TravelEntry::Resolved(12));
        matrix.insert("B".into(), "A".into(), TravelEntry::Estimated(45));

        assert_eq!(matrix.minutes("A", "B"), Some(12));
        assert_eq!(matrix.minutes("B", "A"), Some(45));
        assert_eq!(matrix.estimated_count(), 1);
    }

    #[test]
    fn test_render_text_lists_one_direction() {
        let mut matrix = TravelTimeMatrix::with_addresses(vec!["A".into(), "B".into(), "C".into()]);
        matrix.insert("A".into(), "B".into(), TravelEntry::Resolved(12));
        matrix.insert("B".into(), "A".into(), TravelEntry::Resolved(14));
        matrix.insert("A".into(), "C".into(), TravelEntry::Resolved(0));

        let text = matrix.render_text();
        assert!(text.contains("- A → B: 12분"));
        assert!(!text.contains("B → A"));
        assert!(!text.contains("A → C"));
    }

    #[test]
    fn test_coordinates_param_is_lng_first() {
        let c = Coordinates::from_lng_lat(127.0276, 37.4979);
        assert_eq!(c.to_lng_lat_param(), "127.0276,37.4979");
    }
}
