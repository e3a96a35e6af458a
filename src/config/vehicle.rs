use super::error::{require_positive, ConfigError};
use crate::constants::FUEL_DENSITY;

/// Physical constants of a lander, fixed for the lifetime of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProperties {
    pub max_thrust: f64,   // N
    pub max_fuel: f64,     // fuel units
    pub drag_coeff: f64,   // dimensionless
    pub mass: f64,         // kg
    pub surface_area: f64, // m^2
}

impl VehicleProperties {
    pub fn new(
        max_thrust: f64,
        max_fuel: f64,
        drag_coeff: f64,
        mass: f64,
        surface_area: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            max_thrust: require_positive("max_thrust", max_thrust)?,
            max_fuel: require_positive("max_fuel", max_fuel)?,
            drag_coeff: require_positive("drag_coeff", drag_coeff)?,
            mass: require_positive("mass", mass)?,
            surface_area: require_positive("surface_area", surface_area)?,
        })
    }

    /// Training construction: mass follows from fuel load and engine size.
    pub fn with_derived_mass(
        max_thrust: f64,
        max_fuel: f64,
        drag_coeff: f64,
        surface_area: f64,
    ) -> Result<Self, ConfigError> {
        let mass = max_fuel * FUEL_DENSITY + max_thrust / 200.0;
        Self::new(max_thrust, max_fuel, drag_coeff, mass, surface_area)
    }
}
