//! Core ballistics math utilities
//!
//! Includes:
//! - Standard atmosphere calculations (virtual-temperature air density,
//!   speed of sound, ISA pressure-from-altitude)
//! - The `BallisticEnvironment` type and its `create_standard_environment`
//!   convenience constructor
//! - Angular conversions (cm → MOA, cm → MIL) at a given range
//! - The crate-wide error type shared with `ballistics-pointmass`

#![cfg_attr(not(test), warn(missing_docs))]

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Specific gas constant for dry air, J/(kg·K).
pub const R_DRY: f64 = 287.058;
/// Specific gas constant for water vapor, J/(kg·K).
pub const R_VAPOR: f64 = 461.495;
/// ISA sea-level pressure, hPa.
pub const ISA_SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;
/// ISA sea-level temperature, K.
const ISA_SEA_LEVEL_TEMP_K: f64 = 288.15;
/// ISA temperature lapse rate, K/m.
const ISA_LAPSE_RATE: f64 = 0.0065;

/// Errors raised for inputs that violate a documented precondition before
/// any physics runs. In-domain but physically degenerate inputs (zero
/// muzzle velocity, extreme temperature, high wind) are *not* errors — see
/// the module docs on `ballistics_pointmass::calculate_trajectory`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum BallisticsError {
    /// `target_distance_m` must be strictly positive.
    #[error("target distance must be > 0, got {0}")]
    NonPositiveTargetDistance(f64),
    /// `zero_distance_m` must be strictly positive.
    #[error("zero distance must be > 0, got {0}")]
    NonPositiveZeroDistance(f64),
    /// `sight_height_cm` must be strictly positive.
    #[error("sight height must be > 0, got {0}")]
    NonPositiveSightHeight(f64),
    /// A ballistic coefficient must be strictly positive.
    #[error("ballistic coefficient must be > 0, got {0}")]
    NonPositiveBallisticCoefficient(f64),
    /// `bullet_mass_grains` must be strictly positive.
    #[error("bullet mass must be > 0 grains, got {0}")]
    NonPositiveBulletMass(f64),
    /// `muzzle_velocity_mps` must be non-negative.
    #[error("muzzle velocity must be >= 0 m/s, got {0}")]
    NegativeMuzzleVelocity(f64),
    /// A velocity-band list must be non-empty and sorted by threshold
    /// descending.
    #[error("velocity bands must be non-empty and sorted by threshold descending")]
    InvalidVelocityBands,
}

/// Atmospheric conditions at the shooting position.
///
/// `wind_angle_deg` is taken modulo 360 by the trigonometric functions that
/// consume it and is therefore not validated to any particular range —
/// negative angles (left-crosswind) are accepted and produce the mirrored
/// drift sign. See the point-mass integrator's docs for the full-range
/// convention (0° = headwind, 90° = crosswind from the right, 180° =
/// tailwind).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub struct BallisticEnvironment {
    /// Air temperature, °C.
    pub temperature_c: f64,
    /// Barometric pressure, hPa.
    pub pressure_hpa: f64,
    /// Relative humidity, as a 0..1 fraction (not a percentage).
    pub relative_humidity: f64,
    /// Altitude, m. Informational only — it does not itself feed into the
    /// density calculation, which already takes pressure directly; callers
    /// wanting altitude-driven pressure should run it through
    /// `calculate_pressure_from_altitude` first.
    pub altitude_m: f64,
    /// Wind speed, m/s (≥ 0).
    pub wind_speed_mps: f64,
    /// Wind angle, degrees. 0 = pure headwind, 90 = crosswind from the
    /// right, 180 = pure tailwind.
    pub wind_angle_deg: f64,
}

/// Optional field overrides for `create_standard_environment`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub struct EnvironmentOverrides {
    /// Override for `temperature_c`.
    pub temperature_c: Option<f64>,
    /// Override for `pressure_hpa`.
    pub pressure_hpa: Option<f64>,
    /// Override for `relative_humidity`.
    pub relative_humidity: Option<f64>,
    /// Override for `altitude_m`.
    pub altitude_m: Option<f64>,
}

/// Build a `BallisticEnvironment` at ICAO standard-atmosphere defaults
/// (15 °C, 1013.25 hPa, 50% RH, sea level), with the given wind and any
/// scalar field overrides applied on top.
pub fn create_standard_environment(
    wind_speed_mps: f64,
    wind_angle_deg: f64,
    overrides: Option<EnvironmentOverrides>,
) -> BallisticEnvironment {
    let o = overrides.unwrap_or_default();
    BallisticEnvironment {
        temperature_c: o.temperature_c.unwrap_or(15.0),
        pressure_hpa: o.pressure_hpa.unwrap_or(ISA_SEA_LEVEL_PRESSURE_HPA),
        relative_humidity: o.relative_humidity.unwrap_or(0.5),
        altitude_m: o.altitude_m.unwrap_or(0.0),
        wind_speed_mps,
        wind_angle_deg,
    }
}

/// Speed of sound in dry-ish air at temperature `temp_c` (°C), in m/s.
///
/// `c = 331.3 * sqrt(1 + T_C / 273.15)`. At 15 °C this is ≈340.3 m/s.
pub fn speed_of_sound(temp_c: f64) -> f64 {
    331.3 * (1.0 + temp_c / 273.15).sqrt()
}

/// Saturation vapor pressure over water (Buck, 1981), in Pa, given
/// temperature in °C.
pub fn saturation_vapor_pressure(temp_c: f64) -> f64 {
    611.21 * ((18.678 - temp_c / 234.5) * (temp_c / (257.14 + temp_c))).exp()
}

/// Air density, kg/m³, from the virtual-temperature (humidity-aware)
/// ideal-gas formulation: dry partial pressure plus water-vapor partial
/// pressure, each divided by their own specific gas constant and the
/// (actual, not virtual) temperature in kelvin.
///
/// `relative_humidity` is a 0..1 fraction. At ICAO standard conditions
/// (15 °C, 1013.25 hPa, 50% RH) this returns ≈1.224 kg/m³.
pub fn air_density(temp_c: f64, pressure_hpa: f64, relative_humidity: f64) -> f64 {
    let t_kelvin = temp_c + 273.15;
    let p_pa = pressure_hpa * 100.0;
    let rh = relative_humidity.clamp(0.0, 1.0);

    let e = rh * saturation_vapor_pressure(temp_c);
    let p_dry = p_pa - e;

    p_dry / (R_DRY * t_kelvin) + e / (R_VAPOR * t_kelvin)
}

/// Air density, kg/m³, for a full `BallisticEnvironment`.
pub fn air_density_for(env: &BallisticEnvironment) -> f64 {
    air_density(env.temperature_c, env.pressure_hpa, env.relative_humidity)
}

/// ISA-standard barometric pressure at `altitude_m` meters above
/// `sea_level_p_hpa` (hPa), valid to roughly 11,000 m.
///
/// `P(h) = P0 * (1 - L*h/T0)^5.255`.
pub fn calculate_pressure_from_altitude(altitude_m: f64, sea_level_p_hpa: f64) -> f64 {
    sea_level_p_hpa * (1.0 - ISA_LAPSE_RATE * altitude_m / ISA_SEA_LEVEL_TEMP_K).powf(5.255)
}

/// `calculate_pressure_from_altitude` at the ICAO default sea-level
/// pressure (1013.25 hPa).
pub fn calculate_pressure_from_altitude_default(altitude_m: f64) -> f64 {
    calculate_pressure_from_altitude(altitude_m, ISA_SEA_LEVEL_PRESSURE_HPA)
}

/// Convert a drop/drift distance in cm at range `distance_m` into minutes
/// of angle. Undefined (divides by zero) at `distance_m = 0` — callers
/// must not invoke this at zero distance.
pub fn cm_to_moa(cm: f64, distance_m: f64) -> f64 {
    (cm / 2.908) * (100.0 / distance_m)
}

/// Convert a drop/drift distance in cm at range `distance_m` into
/// milliradians. Undefined at `distance_m = 0`.
pub fn cm_to_mil(cm: f64, distance_m: f64) -> f64 {
    (cm / 10.0) * (100.0 / distance_m)
}
