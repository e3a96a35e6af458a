use super::observation::pad_offset;
use crate::constants::*;
use crate::environment::Planet;
use crate::models::{FlightStatus, Vehicle};

/// Previous-tick values the reward is shaped against. The caller feeds the
/// returned cache back in on the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardCache {
    pub horizontal_distance: f64,
    pub vertical_distance: f64,
    /// Fuel fraction at the end of the previous tick.
    pub fuel: f64,
}

impl RewardCache {
    pub fn for_vehicle(vehicle: &Vehicle, planet: &Planet) -> Self {
        let (horizontal, vertical) = pad_distances(vehicle, planet);
        RewardCache {
            horizontal_distance: horizontal,
            vertical_distance: vertical,
            fuel: vehicle.fuel,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RewardTerms {
    pub total: f64,
    pub distance: f64,
    pub vertical_speed_penalty: f64,
    pub horizontal_speed_penalty: f64,
    pub fuel_penalty: f64,
}

fn pad_distances(vehicle: &Vehicle, planet: &Planet) -> (f64, f64) {
    let zone = planet.terrain().landing_zone();
    let horizontal = pad_offset(vehicle.position.x, zone.center_x(), planet.ground_length).abs();
    let vertical = (vehicle.position.y - zone.height()).abs();
    (horizontal, vertical)
}

/// Shaped per-tick reward. Rewards net closing of the gap to the pad,
/// penalizes speed and fuel burn, pays a touchdown bonus scaled down by
/// impact speed and leftover fuel, and collapses to a flat penalty on a
/// crash. Returns the terms plus the refreshed caches.
pub fn compute_reward(
    vehicle: &Vehicle,
    planet: &Planet,
    previous: &RewardCache,
) -> (RewardTerms, RewardCache) {
    let (horizontal, vertical) = pad_distances(vehicle, planet);

    let distance = (previous.horizontal_distance - horizontal)
        + (previous.vertical_distance - vertical);
    let vertical_speed_penalty = -VERTICAL_SPEED_WEIGHT * vehicle.velocity.y.abs();
    let horizontal_speed_penalty = -HORIZONTAL_SPEED_WEIGHT * vehicle.velocity.x.abs();
    let burned_units = (previous.fuel - vehicle.fuel) * vehicle.properties.max_fuel;
    let fuel_penalty = -FUEL_BURN_WEIGHT * burned_units;

    let mut total = distance + vertical_speed_penalty + horizontal_speed_penalty + fuel_penalty;

    match vehicle.status {
        FlightStatus::Landed => {
            // Fuel efficiency at touchdown: leftover fuel is penalized, so
            // usage, not hoarding, is rewarded.
            let unused_units = vehicle.fuel * vehicle.properties.max_fuel;
            total += LANDING_BONUS
                - TOUCHDOWN_SPEED_WEIGHT * vehicle.velocity.y.abs()
                - UNUSED_FUEL_WEIGHT * unused_units;
        }
        FlightStatus::Crashed => {
            // Flat override: a crash wipes out every shaping term.
            total = CRASH_PENALTY;
        }
        FlightStatus::Flying => {
            total += TIME_PENALTY;
        }
    }

    if vehicle.status != FlightStatus::Crashed
        && horizontal < PROXIMITY_RADIUS
        && vertical < PROXIMITY_RADIUS
    {
        total += PROXIMITY_BONUS;
    }

    let terms = RewardTerms {
        total,
        distance,
        vertical_speed_penalty,
        horizontal_speed_penalty,
        fuel_penalty,
    };
    let cache = RewardCache {
        horizontal_distance: horizontal,
        vertical_distance: vertical,
        fuel: vehicle.fuel,
    };
    (terms, cache)
}
