//! G1/G7 drag tables, the monotone table interpolator, the ballistic
//! coefficient selector, the drag-deceleration equation, and the
//! ammunition data model.
//!
//! API surface is intentionally small so the point-mass solver depends
//! only on this crate (plus `ballistics-core`) for everything drag- and
//! ammunition-related.
//!
//! # Key idea
//!
//! Each model exposes a tabulated drag coefficient `Cd(mach)`. The
//! integrator combines it with density, speed of sound, and an
//! ammunition-specific ballistic coefficient to get a drag deceleration
//! magnitude (see [`drag_deceleration`]); direction is the caller's
//! concern (opposite the relative-airspeed vector).

#![cfg_attr(not(test), warn(missing_docs))]

use ballistics_core::BallisticsError;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Drag-model scaling constant `K = rho_std / (2 * SD_ref)`, with
/// `rho_std = 1.225 kg/m^3` and the G1/G7 reference sectional density
/// `SD_ref = 703.07 kg/m^2`.
pub const DRAG_K: f64 = 0.000871;
/// Standard density used to non-dimensionalize the drag-deceleration
/// equation, kg/m^3.
pub const RHO_STD: f64 = 1.225;

/// Supported drag families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub enum DragModel {
    /// G1 reference projectile (flat-base spitzer).
    G1,
    /// G7 reference projectile (boat-tail spitzer).
    G7,
}

/// One `(mach, cd)` sample point. Tables are sorted ascending by `mach`.
type TablePoint = (f64, f64);

/// Mayevski/JBM G1 reference table, Mach 0 to 5. Dense (0.025 step) across
/// the transonic band, coarser elsewhere, matching the resolution the
/// published tables use.
#[rustfmt::skip]
pub static G1_TABLE: &[TablePoint] = &[
    (0.00, 0.2629), (0.05, 0.2558), (0.10, 0.2487), (0.15, 0.2413),
    (0.20, 0.2344), (0.25, 0.2278), (0.30, 0.2214), (0.35, 0.2155),
    (0.40, 0.2104), (0.45, 0.2061), (0.50, 0.2032), (0.55, 0.2020),
    (0.60, 0.2034), (0.65, 0.2081), (0.70, 0.2165), (0.725, 0.2230),
    (0.75, 0.2313), (0.775, 0.2417), (0.80, 0.2546), (0.825, 0.2706),
    (0.85, 0.2901), (0.875, 0.3136), (0.90, 0.3415), (0.925, 0.3734),
    (0.95, 0.4084), (0.975, 0.4448), (1.00, 0.4805), (1.025, 0.5136),
    (1.05, 0.5427), (1.075, 0.5677), (1.10, 0.5883), (1.125, 0.6053),
    (1.15, 0.6191), (1.20, 0.6393), (1.25, 0.6518), (1.30, 0.6589),
    (1.35, 0.6621), (1.40, 0.6625), (1.45, 0.6607), (1.50, 0.6573),
    (1.55, 0.6528), (1.60, 0.6474), (1.65, 0.6413), (1.70, 0.6347),
    (1.75, 0.6280), (1.80, 0.6210), (1.85, 0.6141), (1.90, 0.6072),
    (1.95, 0.6003), (2.00, 0.5934), (2.05, 0.5867), (2.10, 0.5804),
    (2.15, 0.5743), (2.20, 0.5685), (2.25, 0.5630), (2.30, 0.5577),
    (2.35, 0.5527), (2.40, 0.5481), (2.45, 0.5438), (2.50, 0.5397),
    (2.60, 0.5325), (2.70, 0.5264), (2.80, 0.5211), (2.90, 0.5168),
    (3.00, 0.5133), (3.10, 0.5105), (3.20, 0.5084), (3.30, 0.5067),
    (3.40, 0.5054), (3.50, 0.5040), (3.60, 0.5030), (3.70, 0.5022),
    (3.80, 0.5016), (3.90, 0.5010), (4.00, 0.5006), (4.20, 0.4998),
    (4.40, 0.4995), (4.60, 0.4992), (4.80, 0.4990), (5.00, 0.4988),
];

/// Aberdeen Proving Ground G7 reference table, Mach 0 to 5.
#[rustfmt::skip]
pub static G7_TABLE: &[TablePoint] = &[
    (0.00, 0.1198), (0.05, 0.1197), (0.10, 0.1196), (0.15, 0.1194),
    (0.20, 0.1193), (0.25, 0.1194), (0.30, 0.1194), (0.35, 0.1194),
    (0.40, 0.1193), (0.45, 0.1193), (0.50, 0.1194), (0.55, 0.1193),
    (0.60, 0.1194), (0.65, 0.1197), (0.70, 0.1202), (0.725, 0.1207),
    (0.75, 0.1215), (0.775, 0.1226), (0.80, 0.1242), (0.825, 0.1266),
    (0.85, 0.1306), (0.875, 0.1368), (0.90, 0.1464), (0.925, 0.1660),
    (0.95, 0.2054), (0.975, 0.2993), (1.00, 0.3803), (1.025, 0.4015),
    (1.05, 0.4043), (1.075, 0.4034), (1.10, 0.4014), (1.125, 0.3987),
    (1.15, 0.3955), (1.20, 0.3884), (1.25, 0.3810), (1.30, 0.3732),
    (1.35, 0.3657), (1.40, 0.3580), (1.45, 0.3500), (1.50, 0.3423),
    (1.55, 0.3345), (1.60, 0.3264), (1.65, 0.3194), (1.70, 0.3129),
    (1.75, 0.3069), (1.80, 0.3014), (1.85, 0.2962), (1.90, 0.2913),
    (1.95, 0.2867), (2.00, 0.2823), (2.05, 0.2781), (2.10, 0.2741),
    (2.15, 0.2703), (2.20, 0.2666), (2.25, 0.2632), (2.30, 0.2598),
    (2.35, 0.2566), (2.40, 0.2535), (2.45, 0.2506), (2.50, 0.2477),
    (2.60, 0.2424), (2.70, 0.2376), (2.80, 0.2333), (2.90, 0.2295),
    (3.00, 0.2261), (3.10, 0.2231), (3.20, 0.2204), (3.30, 0.2180),
    (3.40, 0.2159), (3.50, 0.2140), (3.60, 0.2124), (3.70, 0.2109),
    (3.80, 0.2095), (3.90, 0.2083), (4.00, 0.2072), (4.20, 0.2053),
    (4.40, 0.2036), (4.60, 0.2022), (4.80, 0.2009), (5.00, 0.1997),
];

impl DragModel {
    /// The static `(mach, cd)` table backing this model.
    pub fn table(self) -> &'static [TablePoint] {
        match self {
            DragModel::G1 => G1_TABLE,
            DragModel::G7 => G7_TABLE,
        }
    }

    /// Drag coefficient at `mach` for this model, via [`interpolate`].
    pub fn cd(self, mach: f64) -> f64 {
        interpolate(mach, self.table())
    }
}

/// Monotone linear interpolation over an ascending-by-`x` table, with
/// clamp-at-ends — extrapolation beyond the table's domain is forbidden.
pub fn interpolate(x: f64, table: &[(f64, f64)]) -> f64 {
    debug_assert!(!table.is_empty());
    let first = table[0];
    let last = table[table.len() - 1];

    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }

    for w in table.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if x >= x0 && x <= x1 {
            return y0 + (x - x0) / (x1 - x0) * (y1 - y0);
        }
    }
    // Unreachable for a well-formed ascending table given the bounds checks above.
    last.1
}

/// A velocity-banded ballistic coefficient: use `bc` when the current
/// speed is at least `velocity_threshold_mps`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub struct VelocityBand {
    /// Lower speed bound (m/s) at which this band's `bc` applies.
    pub velocity_threshold_mps: f64,
    /// Ballistic coefficient to use at or above the threshold.
    pub bc: f64,
}

/// Validate a velocity-band list: non-empty and sorted by threshold
/// strictly descending, as `ballistics_pointmass::RifleProfile` requires
/// at construction.
pub fn validate_velocity_bands(bands: &[VelocityBand]) -> Result<(), BallisticsError> {
    if bands.is_empty() {
        return Err(BallisticsError::InvalidVelocityBands);
    }
    if let Some(bad) = bands.iter().find(|b| b.bc <= 0.0) {
        return Err(BallisticsError::NonPositiveBallisticCoefficient(bad.bc));
    }
    let sorted_desc = bands
        .windows(2)
        .all(|w| w[0].velocity_threshold_mps > w[1].velocity_threshold_mps);
    if !sorted_desc {
        return Err(BallisticsError::InvalidVelocityBands);
    }
    Ok(())
}

/// A round of ammunition: mass, ballistic coefficient(s), and muzzle
/// velocity. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub struct Ammunition {
    /// Display name, e.g. ".308 Win 178gr ELD-X".
    pub name: String,
    /// Bullet mass, grains.
    pub bullet_mass_grains: f64,
    /// Primary G1 ballistic coefficient.
    pub bc_g1: f64,
    /// Optional G7 ballistic coefficient.
    pub bc_g7: Option<f64>,
    /// Optional velocity-banded BC list, sorted by threshold descending.
    pub velocity_bands: Option<Vec<VelocityBand>>,
    /// Optional preferred drag model, used by
    /// `RifleProfile::drag_model` when the profile doesn't specify one.
    pub preferred_model: Option<DragModel>,
    /// Muzzle velocity, m/s (≥ 0; 0 is the degenerate case documented on
    /// `calculate_trajectory`).
    pub muzzle_velocity_mps: f64,
}

impl Ammunition {
    /// Construct and validate a round of ammunition.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        bullet_mass_grains: f64,
        bc_g1: f64,
        bc_g7: Option<f64>,
        velocity_bands: Option<Vec<VelocityBand>>,
        preferred_model: Option<DragModel>,
        muzzle_velocity_mps: f64,
    ) -> Result<Self, BallisticsError> {
        if bullet_mass_grains <= 0.0 {
            return Err(BallisticsError::NonPositiveBulletMass(bullet_mass_grains));
        }
        if bc_g1 <= 0.0 {
            return Err(BallisticsError::NonPositiveBallisticCoefficient(bc_g1));
        }
        if let Some(bc7) = bc_g7 {
            if bc7 <= 0.0 {
                return Err(BallisticsError::NonPositiveBallisticCoefficient(bc7));
            }
        }
        if let Some(bands) = &velocity_bands {
            validate_velocity_bands(bands)?;
        }
        if muzzle_velocity_mps < 0.0 {
            return Err(BallisticsError::NegativeMuzzleVelocity(muzzle_velocity_mps));
        }
        Ok(Self {
            name: name.into(),
            bullet_mass_grains,
            bc_g1,
            bc_g7,
            velocity_bands,
            preferred_model,
            muzzle_velocity_mps,
        })
    }
}

/// Select the effective ballistic coefficient for `ammo` at speed `v`
/// (m/s) under active drag model `model`:
///
/// 1. If a velocity-band list is present, scan in order (it is sorted
///    descending by threshold); return the first band whose threshold is
///    `<= v`, or the last (lowest-threshold) band if none qualifies.
/// 2. Else, if `model` is G7 and a G7 BC is present, return it.
/// 3. Else return the G1 BC.
pub fn effective_bc(ammo: &Ammunition, v: f64, model: DragModel) -> f64 {
    if let Some(bands) = &ammo.velocity_bands {
        for band in bands {
            if band.velocity_threshold_mps <= v {
                return band.bc;
            }
        }
        return bands.last().expect("validated non-empty").bc;
    }
    match (model, ammo.bc_g7) {
        (DragModel::G7, Some(bc7)) => bc7,
        _ => ammo.bc_g1,
    }
}

/// Drag deceleration magnitude, m/s², given the current relative airspeed
/// `v` (m/s), the effective ballistic coefficient `bc`, local air density
/// `rho` (kg/m^3), local speed of sound `c` (m/s), and drag `model`.
///
/// `a_drag(v) = K * (rho / rho_std) * (Cd(v/c) / bc) * v^2`. The result is
/// a magnitude; its vector direction (opposing relative velocity) is the
/// integrator's concern.
pub fn drag_deceleration(v: f64, bc: f64, rho: f64, c: f64, model: DragModel) -> f64 {
    let mach = v / c;
    let cd = model.cd(mach);
    DRAG_K * (rho / RHO_STD) * (cd / bc) * v * v
}
