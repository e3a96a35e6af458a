use super::terrain::Terrain;
use crate::config::error::{require_non_negative, require_positive};
use crate::config::ConfigError;
use crate::constants::PI;
use rand::Rng;

/// The world a descent happens on. Immutable after construction; the terrain
/// is generated once here and never mutated during an episode.
#[derive(Debug, Clone)]
pub struct Planet {
    pub radius: f64,               // m
    pub atmosphere_thickness: f64, // m
    pub air_ground_density: f64,   // kg/m^3 at altitude 0
    pub gravity_constant: f64,     // m/s^2
    /// Circumference, 2*pi*radius. Horizontal positions wrap modulo this.
    pub ground_length: f64,
    terrain: Terrain,
}

impl Planet {
    pub fn new<R: Rng>(
        radius: f64,
        atmosphere_thickness: f64,
        air_ground_density: f64,
        gravity_constant: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let radius = require_positive("radius", radius)?;
        let atmosphere_thickness = require_positive("atmosphere_thickness", atmosphere_thickness)?;
        let air_ground_density = require_non_negative("air_ground_density", air_ground_density)?;
        let gravity_constant = require_positive("gravity_constant", gravity_constant)?;

        let ground_length = 2.0 * PI * radius;
        let terrain = Terrain::generate_default(ground_length, rng);

        Ok(Planet {
            radius,
            atmosphere_thickness,
            air_ground_density,
            gravity_constant,
            ground_length,
            terrain,
        })
    }

    /// Relative air density at a given altitude: linear fade from the ground
    /// density at altitude 0 down to zero at the atmosphere thickness,
    /// clamped at both ends.
    pub fn atmosphere_density(&self, altitude: f64) -> f64 {
        if altitude >= self.atmosphere_thickness {
            0.0
        } else if altitude <= 0.0 {
            self.air_ground_density
        } else {
            (1.0 - altitude / self.atmosphere_thickness) * self.air_ground_density
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }
}
