use crate::constants::{PAD_LENGTH, TERRAIN_HEIGHT_RANGE, TERRAIN_SAMPLES};
use nalgebra as na;
use rand::Rng;

/// The flattened landing span, recorded as its two boundary points.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingZone {
    pub left: na::Vector2<f64>,
    pub right: na::Vector2<f64>,
}

impl LandingZone {
    pub fn center_x(&self) -> f64 {
        (self.left.x + self.right.x) / 2.0
    }

    pub fn height(&self) -> f64 {
        self.left.y
    }

    pub fn contains(&self, x: f64) -> bool {
        self.left.x <= x && x <= self.right.x
    }
}

/// A periodic 1-D height profile over [0, ground_length), sampled at evenly
/// spaced x positions, with a centered span flattened into the landing pad.
#[derive(Debug, Clone)]
pub struct Terrain {
    xs: Vec<f64>,
    heights: Vec<f64>,
    ground_length: f64,
    landing_zone: LandingZone,
}

impl Terrain {
    /// Samples TERRAIN_SAMPLES heights uniformly in +/-TERRAIN_HEIGHT_RANGE,
    /// forces the last sample equal to the first (periodicity), then
    /// overwrites the centered pad span with the mean height. A pad longer
    /// than the world flattens the whole profile.
    pub fn generate<R: Rng>(ground_length: f64, flat_length: f64, rng: &mut R) -> Self {
        let n = TERRAIN_SAMPLES;
        let dx = ground_length / (n - 1) as f64;
        let xs: Vec<f64> = (0..n).map(|i| i as f64 * dx).collect();

        let mut heights: Vec<f64> = (0..n)
            .map(|_| rng.gen_range(-TERRAIN_HEIGHT_RANGE..TERRAIN_HEIGHT_RANGE))
            .collect();
        heights[n - 1] = heights[0];

        let mean = heights.iter().sum::<f64>() / n as f64;

        let pad_samples = ((flat_length / ground_length * n as f64) as usize).clamp(2, n);
        let flat_start = (n - pad_samples) / 2;
        let flat_end = flat_start + pad_samples;
        for h in &mut heights[flat_start..flat_end] {
            *h = mean;
        }

        let landing_zone = LandingZone {
            left: na::Vector2::new(xs[flat_start], mean),
            right: na::Vector2::new(xs[flat_end - 1], mean),
        };

        Terrain {
            xs,
            heights,
            ground_length,
            landing_zone,
        }
    }

    /// Convenience constructor with the default pad length.
    pub fn generate_default<R: Rng>(ground_length: f64, rng: &mut R) -> Self {
        Self::generate(ground_length, PAD_LENGTH, rng)
    }

    pub fn landing_zone(&self) -> &LandingZone {
        &self.landing_zone
    }

    pub fn ground_length(&self) -> f64 {
        self.ground_length
    }

    pub fn sample_count(&self) -> usize {
        self.xs.len()
    }

    /// Sample points for read-only consumers (rendering, tests).
    pub fn points(&self) -> impl Iterator<Item = na::Vector2<f64>> + '_ {
        self.xs
            .iter()
            .zip(self.heights.iter())
            .map(|(&x, &h)| na::Vector2::new(x, h))
    }

    /// Interpolated height at x (wrapped into [0, ground_length)) together
    /// with the bracketing segment index. `hint` is the caller's cached
    /// segment: it is reused when it still brackets x, otherwise a binary
    /// search locates the fresh segment. A hint outside the sample range is
    /// an invariant violation.
    pub fn height_at(&self, x: f64, hint: usize) -> (f64, usize) {
        assert!(
            hint + 1 < self.xs.len(),
            "terrain segment cache out of bounds: {}",
            hint
        );

        let x = x.rem_euclid(self.ground_length);
        let seg = if self.xs[hint] <= x && x <= self.xs[hint + 1] {
            hint
        } else {
            self.locate(x)
        };

        let (x0, x1) = (self.xs[seg], self.xs[seg + 1]);
        let (h0, h1) = (self.heights[seg], self.heights[seg + 1]);
        let t = (x - x0) / (x1 - x0);
        (h0 + t * (h1 - h0), seg)
    }

    /// Binary search for the segment whose [x_i, x_{i+1}] brackets x.
    pub fn locate(&self, x: f64) -> usize {
        let idx = self.xs.partition_point(|&xi| xi <= x);
        idx.saturating_sub(1).min(self.xs.len() - 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_terrain(seed: u64) -> Terrain {
        let mut rng = StdRng::seed_from_u64(seed);
        Terrain::generate(2.0 * std::f64::consts::PI * 6000.0, 1000.0, &mut rng)
    }

    #[test]
    fn periodic_across_the_wrap_boundary() {
        let terrain = test_terrain(7);
        let length = terrain.ground_length();
        let (at_zero, _) = terrain.height_at(0.0, 0);
        let (at_length, _) = terrain.height_at(length, 0);
        assert_eq!(at_zero, at_length);
    }

    #[test]
    fn interpolation_is_continuous_at_sample_boundaries() {
        let terrain = test_terrain(11);
        for point in terrain.points().collect::<Vec<_>>() {
            if point.x >= terrain.ground_length() {
                continue;
            }
            let seg_left = terrain.locate((point.x - 1e-9).max(0.0));
            let seg_right = terrain.locate(point.x);
            let (from_left, _) = terrain.height_at(point.x, seg_left);
            let (from_right, _) = terrain.height_at(point.x, seg_right);
            assert_abs_diff_eq!(from_left, point.y, epsilon = 1e-6);
            assert_abs_diff_eq!(from_right, point.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn cached_lookup_matches_fresh_search_during_forward_flight() {
        let terrain = test_terrain(3);
        let length = terrain.ground_length();
        let mut hint = 0;
        // Sweep forward past the wrap boundary in strictly increasing steps.
        let mut x = 0.0;
        while x < 1.5 * length {
            let (cached, seg) = terrain.height_at(x, hint);
            hint = seg;
            let wrapped = x.rem_euclid(length);
            let (fresh, _) = terrain.height_at(wrapped, terrain.locate(wrapped));
            assert_eq!(cached, fresh, "divergence at x = {}", x);
            x += 37.3;
        }
    }

    #[test]
    fn pad_is_flat_at_the_mean_height() {
        let terrain = test_terrain(19);
        let zone = terrain.landing_zone().clone();
        assert_abs_diff_eq!(zone.left.y, zone.right.y);
        assert!(zone.right.x > zone.left.x);

        // Every queried point across the flattened span reports the pad height.
        let mut x = zone.left.x;
        while x <= zone.right.x {
            let (h, _) = terrain.height_at(x, terrain.locate(x));
            assert_abs_diff_eq!(h, zone.height(), epsilon = 1e-9);
            x += 25.0;
        }
    }

    #[test]
    fn pad_longer_than_the_world_flattens_everything() {
        let mut rng = StdRng::seed_from_u64(29);
        // A 100 m radius world is shorter around than the default pad.
        let terrain = Terrain::generate(2.0 * std::f64::consts::PI * 100.0, 1000.0, &mut rng);
        let zone = terrain.landing_zone().clone();
        assert_abs_diff_eq!(zone.left.x, 0.0);
        assert_abs_diff_eq!(zone.right.x, terrain.ground_length(), epsilon = 1e-9);
        for point in terrain.points().collect::<Vec<_>>() {
            assert_abs_diff_eq!(point.y, zone.height(), epsilon = 1e-9);
        }
    }

    #[test]
    #[should_panic(expected = "terrain segment cache out of bounds")]
    fn out_of_bounds_cache_is_fatal() {
        let terrain = test_terrain(23);
        terrain.height_at(10.0, terrain.sample_count());
    }
}
