//! Deserializable representation of one published route file.
//!
//! One JSON file under `registry/data/v<N>/` holds exactly one [`City`] record
//! with its full route and waypoint tree. The types mirror the JSON Schema
//! shipped in `registry/schema/next.schema.json`; the loader relies on serde
//! alone, schema validation happens in the draft workflow before publishing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Full record for one city or municipality, as stored on disk.
pub struct City {
    pub country: String,
    pub country_code: String,
    pub island_group: IslandGroup,
    pub region: String,
    pub region_code: String,
    pub province: String,
    pub province_code: String,
    pub city: String,
    pub city_type: CityType,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub routes: Vec<Route>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One named PUV route with its ordered stops.
pub struct Route {
    pub route_code: String,
    pub name: String,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Ordered stop along a route.
///
/// `sequence` is a 1-based ordinal within the parent route. The registry does
/// not enforce contiguity or uniqueness; that is the schema's job.
pub struct Waypoint {
    pub sequence: u32,
    pub sub_locality: String,
    pub sub_locality_type: SubLocalityType,
    pub street: String,
    pub destination: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Major island group, serialized with the capitalised spelling used on disk.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum IslandGroup {
    Luzon,
    Visayas,
    Mindanao,
}

impl IslandGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            IslandGroup::Luzon => "Luzon",
            IslandGroup::Visayas => "Visayas",
            IslandGroup::Mindanao => "Mindanao",
        }
    }

    /// Case-insensitive parse for CLI arguments.
    pub fn from_arg(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "luzon" => Some(IslandGroup::Luzon),
            "visayas" => Some(IslandGroup::Visayas),
            "mindanao" => Some(IslandGroup::Mindanao),
            _ => None,
        }
    }
}

/// PSGC city classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityType {
    HighlyUrbanizedCity,
    ComponentCity,
    Municipality,
}

/// Kind of sub-locality a waypoint sits in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubLocalityType {
    District,
    Barangay,
}

/// Read and parse a single City record from disk.
pub fn read_city(path: &Path) -> Result<City> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let record: City =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn city_round_trips_through_json() {
        let raw = json!({
            "country": "Philippines",
            "country_code": "PH",
            "island_group": "Visayas",
            "region": "Region VI",
            "region_code": "06",
            "province": "Iloilo",
            "province_code": "ILO",
            "city": "Iloilo City",
            "city_type": "highly_urbanized_city",
            "postal_code": "5000",
            "latitude": 10.7202,
            "longitude": 122.5621,
            "routes": [{
                "route_code": "01A",
                "name": "Lapuz - City Proper",
                "waypoints": [{
                    "sequence": 1,
                    "sub_locality": "Lapuz Norte",
                    "sub_locality_type": "barangay",
                    "street": "Jalandoni Street",
                    "destination": ["City Proper", "Plaza Libertad"],
                    "latitude": 10.7061,
                    "longitude": 122.5828
                }]
            }]
        });

        let city: City = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(city.island_group, IslandGroup::Visayas);
        assert_eq!(city.city_type, CityType::HighlyUrbanizedCity);
        assert_eq!(city.routes[0].waypoints[0].sequence, 1);
        assert_eq!(
            city.routes[0].waypoints[0].sub_locality_type,
            SubLocalityType::Barangay
        );

        let back = serde_json::to_value(&city).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn unknown_island_group_is_a_parse_error() {
        let raw = json!({
            "country": "Philippines",
            "country_code": "PH",
            "island_group": "Palawan",
            "region": "Region IV-B",
            "region_code": "17",
            "province": "Palawan",
            "province_code": "PLW",
            "city": "Puerto Princesa",
            "city_type": "highly_urbanized_city",
            "postal_code": "5300",
            "latitude": 9.7392,
            "longitude": 118.7353,
            "routes": []
        });
        assert!(serde_json::from_value::<City>(raw).is_err());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let raw = json!({
            "country": "Philippines",
            "country_code": "PH",
            "island_group": "Luzon",
            "region": "NCR",
            "region_code": "13",
            "province": "Metro Manila",
            "province_code": "NCR",
            "city": "Manila",
            "city_type": "highly_urbanized_city",
            "postal_code": "1000",
            "latitude": 14.5995,
            "longitude": 120.9842,
            "routes": [],
            "remarks": "not part of the schema"
        });
        let city: City = serde_json::from_value(raw).unwrap();
        assert_eq!(city.city, "Manila");
    }

    #[test]
    fn island_group_arg_parse_is_case_insensitive() {
        assert_eq!(IslandGroup::from_arg("mindanao"), Some(IslandGroup::Mindanao));
        assert_eq!(IslandGroup::from_arg("LUZON"), Some(IslandGroup::Luzon));
        assert_eq!(IslandGroup::from_arg("Panay"), None);
    }
}
