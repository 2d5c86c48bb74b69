// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission factor table used for offline estimates.

use crate::models::{ActivityRequest, FoodType, VehicleType};

/// Canonical activity a factor applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorKey {
    Car,
    Bus,
    Train,
    Plane,
    Motorcycle,
    Electricity,
    Beef,
    Chicken,
    Pork,
    Fish,
    Dairy,
    Vegetables,
    Fruits,
}

impl From<VehicleType> for FactorKey {
    fn from(vehicle: VehicleType) -> Self {
        match vehicle {
            VehicleType::Car => FactorKey::Car,
            VehicleType::Bus => FactorKey::Bus,
            VehicleType::Train => FactorKey::Train,
            VehicleType::Plane => FactorKey::Plane,
            VehicleType::Motorcycle => FactorKey::Motorcycle,
        }
    }
}

impl From<FoodType> for FactorKey {
    fn from(food: FoodType) -> Self {
        match food {
            FoodType::Beef => FactorKey::Beef,
            FoodType::Chicken => FactorKey::Chicken,
            FoodType::Pork => FactorKey::Pork,
            FoodType::Fish => FactorKey::Fish,
            FoodType::Dairy => FactorKey::Dairy,
            FoodType::Vegetables => FactorKey::Vegetables,
            FoodType::Fruits => FactorKey::Fruits,
        }
    }
}

impl FactorKey {
    /// Resolve the factor for a request. Unknown labels fall back to
    /// `Car` / `Vegetables`.
    pub fn for_request(request: &ActivityRequest) -> Self {
        match request {
            ActivityRequest::Commute { vehicle_type, .. } => {
                VehicleType::from_label(vehicle_type).into()
            }
            ActivityRequest::Electricity { .. } => FactorKey::Electricity,
            ActivityRequest::Food { food_type, .. } => FoodType::from_label(food_type).into(),
        }
    }

    /// kg CO2e per km (transport), per kWh (electricity) or per kg (food).
    pub fn factor(self) -> f64 {
        match self {
            FactorKey::Car => 0.21,
            FactorKey::Bus => 0.089,
            FactorKey::Train => 0.041,
            FactorKey::Plane => 0.255,
            FactorKey::Motorcycle => 0.113,
            FactorKey::Electricity => 0.5,
            FactorKey::Beef => 27.0,
            FactorKey::Chicken => 6.9,
            FactorKey::Pork => 12.1,
            FactorKey::Fish => 3.0,
            FactorKey::Dairy => 3.2,
            FactorKey::Vegetables => 2.0,
            FactorKey::Fruits => 1.1,
        }
    }

    /// Climatiq emission factor ID.
    pub fn climatiq_activity_id(self) -> &'static str {
        match self {
            FactorKey::Car => {
                "passenger_vehicle-vehicle_type_car-fuel_source_na-distance_na-engine_size_na"
            }
            FactorKey::Bus => "passenger_vehicle-vehicle_type_bus-fuel_source_na-distance_na",
            FactorKey::Train => "passenger_vehicle-vehicle_type_train-fuel_source_na",
            FactorKey::Plane => "passenger_vehicle-vehicle_type_aircraft-fuel_source_na",
            FactorKey::Motorcycle => "passenger_vehicle-vehicle_type_motorcycle-fuel_source_na",
            FactorKey::Electricity => "electricity-energy_source_grid_mix-supplier_na-facility_na",
            FactorKey::Beef => "food-beef",
            FactorKey::Chicken => "food-chicken",
            FactorKey::Pork => "food-pork",
            FactorKey::Fish => "food-fish",
            FactorKey::Dairy => "food-dairy",
            FactorKey::Vegetables => "food-vegetables",
            FactorKey::Fruits => "food-fruits",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_vehicle_uses_car_factor() {
        let request = ActivityRequest::Commute {
            vehicle_type: "rocket".to_string(),
            distance: 1.0,
            distance_unit: "km".to_string(),
        };
        assert_eq!(FactorKey::for_request(&request), FactorKey::Car);
    }

    #[test]
    fn test_unknown_food_uses_vegetables_factor() {
        let request = ActivityRequest::Food {
            food_type: "tofu".to_string(),
            weight: 1.0,
            weight_unit: "kg".to_string(),
        };
        assert_eq!(FactorKey::for_request(&request), FactorKey::Vegetables);
        assert_eq!(FactorKey::Vegetables.factor(), 2.0);
    }

    #[test]
    fn test_plane_maps_to_aircraft_id() {
        assert!(FactorKey::Plane
            .climatiq_activity_id()
            .contains("vehicle_type_aircraft"));
    }
}
