// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity request and record models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::EmissionEstimate;

/// The three activity categories we can estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Commute,
    Electricity,
    Food,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 3] = [
        ActivityCategory::Commute,
        ActivityCategory::Electricity,
        ActivityCategory::Food,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityCategory::Commute => "commute",
            ActivityCategory::Electricity => "electricity",
            ActivityCategory::Food => "food",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commute" => Ok(ActivityCategory::Commute),
            "electricity" => Ok(ActivityCategory::Electricity),
            "food" => Ok(ActivityCategory::Food),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A category tag that is not one of commute/electricity/food.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown activity category: {0}")]
pub struct UnknownCategory(pub String);

/// Vehicle types with a known emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Car,
    Bus,
    Train,
    Plane,
    Motorcycle,
}

impl VehicleType {
    /// Resolve a free-form label. Anything unrecognized is treated as a car.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bus" => VehicleType::Bus,
            "train" => VehicleType::Train,
            "plane" => VehicleType::Plane,
            "motorcycle" => VehicleType::Motorcycle,
            _ => VehicleType::Car,
        }
    }
}

/// Food types with a known emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodType {
    Beef,
    Chicken,
    Pork,
    Fish,
    Dairy,
    Vegetables,
    Fruits,
}

impl FoodType {
    /// Resolve a free-form label. Anything unrecognized is treated as vegetables.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "beef" => FoodType::Beef,
            "chicken" => FoodType::Chicken,
            "pork" => FoodType::Pork,
            "fish" => FoodType::Fish,
            "dairy" => FoodType::Dairy,
            "fruits" => FoodType::Fruits,
            _ => FoodType::Vegetables,
        }
    }
}

/// A validated activity, ready for estimation.
///
/// Labels (`vehicle_type`, `food_type`) are kept as the user sent them so
/// they can be echoed back; the estimator resolves them to a factor.
/// The quantity is always finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ActivityRequest {
    Commute {
        #[serde(rename = "vehicleType")]
        vehicle_type: String,
        distance: f64,
        #[serde(rename = "unit")]
        distance_unit: String,
    },
    Electricity {
        energy: f64,
        #[serde(rename = "unit")]
        energy_unit: String,
    },
    Food {
        #[serde(rename = "foodType")]
        food_type: String,
        #[serde(rename = "quantity")]
        weight: f64,
        #[serde(rename = "unit")]
        weight_unit: String,
    },
}

impl ActivityRequest {
    pub fn category(&self) -> ActivityCategory {
        match self {
            ActivityRequest::Commute { .. } => ActivityCategory::Commute,
            ActivityRequest::Electricity { .. } => ActivityCategory::Electricity,
            ActivityRequest::Food { .. } => ActivityCategory::Food,
        }
    }

    /// Distance, energy or weight, depending on the category.
    pub fn quantity(&self) -> f64 {
        match self {
            ActivityRequest::Commute { distance, .. } => *distance,
            ActivityRequest::Electricity { energy, .. } => *energy,
            ActivityRequest::Food { weight, .. } => *weight,
        }
    }

    pub fn unit(&self) -> &str {
        match self {
            ActivityRequest::Commute { distance_unit, .. } => distance_unit,
            ActivityRequest::Electricity { energy_unit, .. } => energy_unit,
            ActivityRequest::Food { weight_unit, .. } => weight_unit,
        }
    }
}

/// A recorded activity with its emission estimate.
///
/// Records are immutable once created. The date is kept as the raw
/// `YYYY-MM-DD` string so records loaded from a store with a bad date can
/// still be counted by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Random hex identifier
    pub id: String,
    /// Calendar date ("YYYY-MM-DD")
    pub date: String,
    /// Estimated emissions
    pub co2e: f64,
    /// Unit of `co2e` (normally "kg")
    pub co2e_unit: String,
    /// Category tag and category-specific fields
    #[serde(flatten)]
    pub request: ActivityRequest,
}

impl ActivityRecord {
    /// Stamp an estimate into a new record with a fresh id.
    pub fn new(
        date: chrono::NaiveDate,
        request: ActivityRequest,
        estimate: &EmissionEstimate,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            id: generate_record_id()?,
            date: date.format("%Y-%m-%d").to_string(),
            co2e: estimate.co2e,
            co2e_unit: estimate.co2e_unit.clone(),
            request,
        })
    }

    pub fn category(&self) -> ActivityCategory {
        self.request.category()
    }
}

/// 128 random bits, hex encoded.
fn generate_record_id() -> anyhow::Result<String> {
    use ring::rand::{SecureRandom, SystemRandom};

    let mut bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| anyhow::anyhow!("Failed to generate record id"))?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EstimateSource;

    #[test]
    fn test_category_round_trip_from_str() {
        for category in ActivityCategory::ALL {
            assert_eq!(category.as_str().parse::<ActivityCategory>(), Ok(category));
        }
        assert!("transport".parse::<ActivityCategory>().is_err());
    }

    #[test]
    fn test_unrecognized_labels_use_defaults() {
        assert_eq!(VehicleType::from_label("Bus"), VehicleType::Bus);
        assert_eq!(VehicleType::from_label("hovercraft"), VehicleType::Car);
        assert_eq!(FoodType::from_label(" fish "), FoodType::Fish);
        assert_eq!(FoodType::from_label("tofu"), FoodType::Vegetables);
    }

    #[test]
    fn test_record_serializes_category_fields_flat() {
        let request = ActivityRequest::Food {
            food_type: "beef".to_string(),
            weight: 2.0,
            weight_unit: "kg".to_string(),
        };
        let estimate = EmissionEstimate {
            co2e: 54.0,
            co2e_unit: "kg".to_string(),
            source: EstimateSource::Fallback,
        };
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let record = ActivityRecord::new(date, request, &estimate).unwrap();

        assert_eq!(record.id.len(), 32);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "food");
        assert_eq!(json["foodType"], "beef");
        assert_eq!(json["quantity"], 2.0);
        assert_eq!(json["date"], "2024-01-15");

        let back: ActivityRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_ids_are_unique() {
        let request = ActivityRequest::Electricity {
            energy: 1.0,
            energy_unit: "kWh".to_string(),
        };
        let estimate = EmissionEstimate::fallback(0.5);
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let a = ActivityRecord::new(date, request.clone(), &estimate).unwrap();
        let b = ActivityRecord::new(date, request, &estimate).unwrap();
        assert_ne!(a.id, b.id);
    }
}
