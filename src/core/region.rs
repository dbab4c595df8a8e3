//! Fixed state-to-region classification

use crate::core::error::CoreError;
use std::collections::HashMap;
use std::fmt::Display;

/// The six geographic regions states are grouped into for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
    NorthEast,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
        Region::NorthEast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
            Region::NorthEast => "North-East",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The fixed assignment of the 31 covered states and territories.
const STATE_REGIONS: [(&str, Region); 31] = [
    ("Andhra Pradesh", Region::South),
    ("Karnataka", Region::South),
    ("Kerala", Region::South),
    ("Tamil Nadu", Region::South),
    ("Telangana", Region::South),
    ("Gujarat", Region::West),
    ("Maharashtra", Region::West),
    ("Goa", Region::West),
    ("Delhi", Region::North),
    ("Haryana", Region::North),
    ("Himachal Pradesh", Region::North),
    ("Jammu & Kashmir", Region::North),
    ("Punjab", Region::North),
    ("Rajasthan", Region::North),
    ("Uttarakhand", Region::North),
    ("Ladakh", Region::North),
    ("Bihar", Region::East),
    ("Jharkhand", Region::East),
    ("Odisha", Region::East),
    ("West Bengal", Region::East),
    ("Chhattisgarh", Region::Central),
    ("Madhya Pradesh", Region::Central),
    ("Uttar Pradesh", Region::Central),
    ("Arunachal Pradesh", Region::NorthEast),
    ("Assam", Region::NorthEast),
    ("Manipur", Region::NorthEast),
    ("Meghalaya", Region::NorthEast),
    ("Mizoram", Region::NorthEast),
    ("Nagaland", Region::NorthEast),
    ("Sikkim", Region::NorthEast),
    ("Tripura", Region::NorthEast),
];

/// Looks states up in the fixed region table.
///
/// A state the table does not know fails with `UnknownState` instead of
/// landing in a default bucket.
#[derive(Debug, Clone)]
pub struct RegionMap {
    state_to_region: HashMap<String, Region>,
}

impl Default for RegionMap {
    fn default() -> Self {
        let state_to_region = STATE_REGIONS
            .iter()
            .map(|&(state, region)| (state.to_string(), region))
            .collect();
        Self { state_to_region }
    }
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty map, for datasets with their own classification.
    pub fn empty() -> Self {
        Self {
            state_to_region: HashMap::new(),
        }
    }

    pub fn insert(&mut self, state: impl Into<String>, region: Region) {
        self.state_to_region.insert(state.into(), region);
    }

    pub fn region_of(&self, state: &str) -> Result<Region, CoreError> {
        self.state_to_region
            .get(state)
            .copied()
            .ok_or_else(|| CoreError::UnknownState(state.to_string()))
    }

    pub fn contains(&self, state: &str) -> bool {
        self.state_to_region.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.state_to_region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state_to_region.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_states_resolve() {
        let map = RegionMap::new();
        assert_eq!(map.region_of("Karnataka").unwrap(), Region::South);
        assert_eq!(map.region_of("Maharashtra").unwrap(), Region::West);
        assert_eq!(map.region_of("Rajasthan").unwrap(), Region::North);
        assert_eq!(map.region_of("Uttar Pradesh").unwrap(), Region::Central);
        assert_eq!(map.region_of("West Bengal").unwrap(), Region::East);
        assert_eq!(map.region_of("Tripura").unwrap(), Region::NorthEast);
    }

    #[test]
    fn test_unknown_state_fails() {
        let map = RegionMap::new();
        assert_eq!(
            map.region_of("Atlantis").unwrap_err(),
            CoreError::UnknownState("Atlantis".to_string())
        );
    }

    #[test]
    fn test_default_map_covers_all_regions() {
        let map = RegionMap::new();
        assert_eq!(map.len(), 31);

        for region in Region::ALL {
            let covered = STATE_REGIONS.iter().any(|&(_, r)| r == region);
            assert!(covered, "no state mapped to {region}");
        }
    }

    #[test]
    fn test_insert_extends_map() {
        let mut map = RegionMap::empty();
        assert!(!map.contains("Puducherry"));

        map.insert("Puducherry", Region::South);
        assert_eq!(map.region_of("Puducherry").unwrap(), Region::South);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::NorthEast.to_string(), "North-East");
        assert_eq!(Region::Central.to_string(), "Central");
    }
}
