// Math
pub const PI: f64 = std::f64::consts::PI;

// Landing gates
pub const MAX_HORIZONTAL_LANDING_SPEED: f64 = 5.0; // m/s
pub const MAX_VERTICAL_LANDING_SPEED: f64 = 5.0; // m/s

// Terrain generation
pub const TERRAIN_SAMPLES: usize = 100;
pub const TERRAIN_HEIGHT_RANGE: f64 = 200.0; // +/- m around the zero level
pub const PAD_LENGTH: f64 = 1000.0; // m of flattened landing pad

// Terrain sensing
pub const NUM_RAYS: usize = 5;
pub const RAY_MAX_RANGE: f64 = 500.0; // m
pub const RAY_STEP: f64 = 10.0; // m between samples along a ray

// Pilot command rate limits
pub const MAX_THRUST_RATE: f64 = 0.2; // thrust fraction per command
pub const MAX_ANGLE_DELTA: f64 = 15.0; // deg per command
pub const MAX_TILT: f64 = 90.0; // deg from vertical

// Action discretization
pub const NUM_THRUST_BINS: usize = 5;
pub const NUM_ANGLE_BINS: usize = 5;
pub const NUM_ACTIONS: usize = NUM_THRUST_BINS * NUM_ANGLE_BINS;

// Fuel model
pub const FUEL_DENSITY: f64 = 0.1; // kg per fuel unit

// Reward shaping
pub const LANDING_BONUS: f64 = 1000.0;
pub const CRASH_PENALTY: f64 = -1000.0;
pub const TIME_PENALTY: f64 = -1.0;
pub const PROXIMITY_BONUS: f64 = 50.0;
pub const PROXIMITY_RADIUS: f64 = 10.0; // m, both axes
pub const VERTICAL_SPEED_WEIGHT: f64 = 0.05;
pub const HORIZONTAL_SPEED_WEIGHT: f64 = 0.02;
pub const FUEL_BURN_WEIGHT: f64 = 0.01;
pub const TOUCHDOWN_SPEED_WEIGHT: f64 = 10.0;
pub const UNUSED_FUEL_WEIGHT: f64 = 0.5;

// Observation normalization ranges (min, max). These are a learned contract:
// changing any of them invalidates previously trained value functions.
pub const RADIUS_RANGE: (f64, f64) = (1000.0, 10000.0); // m
pub const ATMOSPHERE_RANGE: (f64, f64) = (100.0, 2000.0); // m
pub const DENSITY_RANGE: (f64, f64) = (0.0, 2.0); // kg/m^3
pub const GRAVITY_RANGE: (f64, f64) = (1.0, 25.0); // m/s^2
pub const MAX_THRUST_RANGE: (f64, f64) = (500.0, 5000.0); // N
pub const MAX_FUEL_RANGE: (f64, f64) = (500.0, 5000.0); // fuel units
pub const DRAG_COEFF_RANGE: (f64, f64) = (0.2, 0.8);
pub const SURFACE_AREA_RANGE: (f64, f64) = (1.0, 10.0); // m^2
pub const MASS_RANGE: (f64, f64) = (50.0, 600.0); // kg
pub const VELOCITY_SCALE: f64 = 100.0; // m/s
