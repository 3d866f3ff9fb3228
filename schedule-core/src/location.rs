//! Delivery location parsing, region membership, and place search
//!
//! A "place" is the comma-joined serviceable address string from the
//! schedule document: "suburb, state, postcode, region-name". Membership
//! tests run against a flattened, lowercased form of it.

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::Region;

/// A parsed delivery location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryLocation {
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub region: String,
}

impl DeliveryLocation {
    /// Parse a "suburb, state, postcode, region" place string
    pub fn parse(raw: &str) -> ScheduleResult<Self> {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        if parts.len() < 4 || parts[..4].iter().any(|p| p.is_empty()) {
            return Err(ScheduleError::InvalidLocation(raw.to_string()));
        }
        Ok(Self {
            suburb: parts[0].to_string(),
            state: parts[1].to_string(),
            postcode: parts[2].to_string(),
            region: parts[3].to_string(),
        })
    }

    /// The comma-free form shown in the search box
    pub fn display(&self) -> String {
        format!(
            "{} {} {} {}",
            self.suburb, self.state, self.postcode, self.region
        )
    }
}

/// Flatten a place entry for matching: comma-split, trimmed, space-joined,
/// lowercased
fn flatten_place(place: &str) -> String {
    place
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// First serviceable place matching a customer address line
/// ("suburb state postcode"), by substring against the flattened place
pub fn matching_place<'a, I>(places: I, address_line: &str) -> Option<&'a String>
where
    I: IntoIterator<Item = &'a String>,
{
    let needle = address_line.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    places
        .into_iter()
        .find(|place| flatten_place(place).contains(&needle))
}

/// Region with the given name (the fourth segment of a place string)
pub fn region_by_name<'a>(regions: &'a [Region], name: &str) -> Option<&'a Region> {
    regions.iter().find(|region| region.name == name)
}

/// Resolve the region serving a raw customer address line, together with
/// the matching place string
pub fn region_for_address<'a>(
    regions: &'a [Region],
    address_line: &str,
) -> Option<(&'a Region, &'a String)> {
    for region in regions {
        if let Some(place) = matching_place(&region.places, address_line) {
            return Some((region, place));
        }
    }
    None
}

/// A place with its search score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPlace<'a> {
    pub place: &'a str,
    pub score: usize,
}

/// Rank places against a free-text query.
///
/// Every whitespace-separated term must appear somewhere in the
/// comma-stripped place; the score is the total length of the matched
/// terms. Queries of two characters or fewer return nothing.
pub fn search_places<'a>(places: &'a [String], term: &str) -> Vec<ScoredPlace<'a>> {
    let term = term.to_lowercase();
    if term.len() <= 2 {
        return Vec::new();
    }
    let parts: Vec<&str> = term.split_whitespace().collect();
    let mut results: Vec<ScoredPlace<'a>> = places
        .iter()
        .filter_map(|place| {
            let haystack = place.to_lowercase().replace(',', "");
            let mut score = 0usize;
            for part in &parts {
                if haystack.contains(part) {
                    score += part.len();
                } else {
                    return None;
                }
            }
            (score > 0).then_some(ScoredPlace {
                place: place.as_str(),
                score,
            })
        })
        .collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn places() -> Vec<String> {
        [
            "Newtown, NSW, 2042, SYDNEY",
            "Enmore, NSW, 2042, SYDNEY",
            "Carlton, VIC, 3053, MEL METRO",
            "Carlton North, VIC, 3054, MEL METRO",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn regions() -> Vec<Region> {
        serde_json::from_value(json!([
            {"name": "SYDNEY", "places": ["Newtown, NSW, 2042, SYDNEY", "Enmore, NSW, 2042, SYDNEY"]},
            {"name": "MEL METRO", "places": ["Carlton, VIC, 3053, MEL METRO"]}
        ]))
        .unwrap()
    }

    #[test]
    fn test_parse_location() {
        let location = DeliveryLocation::parse("Newtown, NSW, 2042, SYDNEY").unwrap();
        assert_eq!(location.suburb, "Newtown");
        assert_eq!(location.state, "NSW");
        assert_eq!(location.postcode, "2042");
        assert_eq!(location.region, "SYDNEY");
        assert_eq!(location.display(), "Newtown NSW 2042 SYDNEY");
    }

    #[test]
    fn test_parse_rejects_short_or_empty_segments() {
        assert!(DeliveryLocation::parse("Newtown, NSW, 2042").is_err());
        assert!(DeliveryLocation::parse("Newtown, , 2042, SYDNEY").is_err());
        assert!(DeliveryLocation::parse("").is_err());
    }

    #[test]
    fn test_matching_place_is_case_insensitive_substring() {
        let places = places();
        let hit = matching_place(&places, "newtown nsw 2042").unwrap();
        assert_eq!(hit, "Newtown, NSW, 2042, SYDNEY");
        assert!(matching_place(&places, "Hobart TAS 7000").is_none());
        assert!(matching_place(&places, "   ").is_none());
    }

    #[test]
    fn test_region_for_address() {
        let regions = regions();
        let (region, place) = region_for_address(&regions, "Carlton VIC 3053").unwrap();
        assert_eq!(region.name, "MEL METRO");
        assert_eq!(place, "Carlton, VIC, 3053, MEL METRO");
        assert!(region_for_address(&regions, "Perth WA 6000").is_none());
    }

    #[test]
    fn test_search_requires_three_characters() {
        assert!(search_places(&places(), "ca").is_empty());
        assert!(!search_places(&places(), "car").is_empty());
    }

    #[test]
    fn test_search_all_terms_must_match() {
        let places = places();
        let results = search_places(&places, "carlton north");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].place, "Carlton North, VIC, 3054, MEL METRO");
    }

    #[test]
    fn test_search_ranks_longer_matches_first() {
        let places = places();
        let results = search_places(&places, "carlton");
        assert_eq!(results.len(), 2);
        // Equal scores keep document order
        assert_eq!(results[0].place, "Carlton, VIC, 3053, MEL METRO");

        let ranked = search_places(&places, "2042 newtown");
        assert_eq!(ranked[0].place, "Newtown, NSW, 2042, SYDNEY");
        assert_eq!(ranked[0].score, "2042".len() + "newtown".len());
    }
}
