//! Exterior-ballistics core for a rifle trajectory calculator.
//!
//! This crate is a thin facade over the workspace's implementation
//! crates — `ballistics-core` (atmosphere, angular conversions),
//! `ballistics-models` (G1/G7 drag tables, ammunition, BC selection), and
//! `ballistics-pointmass` (zero-angle solver, 3-D integrator,
//! `calculate_trajectory`) — so that callers depend on one crate name
//! while the implementation stays split along those lines.
//!
//! Given a rifle/ammunition profile, a downrange target distance, and
//! atmospheric conditions, [`calculate_trajectory`] returns the bullet's
//! drop, drift, time of flight, remaining velocity, kinetic energy, and
//! Mach number at the target. It and [`calculate_pressure_from_altitude`]
//! are the two pure functions everything else in a trajectory calculator
//! (profile storage, UI, ammunition catalogs, share/export formatting)
//! consumes; none of that surrounding application is this crate's
//! concern.

pub use ballistics_core::{
    air_density, air_density_for, calculate_pressure_from_altitude,
    calculate_pressure_from_altitude_default, cm_to_mil, cm_to_moa, create_standard_environment,
    saturation_vapor_pressure, speed_of_sound, BallisticEnvironment, BallisticsError,
    EnvironmentOverrides,
};
pub use ballistics_models::{
    drag_deceleration, effective_bc, interpolate, Ammunition, DragModel, VelocityBand, DRAG_K,
    G1_TABLE, G7_TABLE, RHO_STD,
};
pub use ballistics_pointmass::{
    calculate_trajectory, calculate_trajectory_raw, BallisticResult, RawBallisticResult,
    RifleProfile, ZeroType,
};

/// Returns the crate version, for smoke-testing that the facade links
/// correctly against its three implementation crates.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
