//! # Flange Bolting
//!
//! Quick sizing relations for a circular bolted flange.
//!
//! ## Dimension C
//!
//! For `A` equally spaced bolts and a reference dimension `B`:
//!
//! ```text
//! theta = 180 - 360 / A        (degrees)
//! C     = sin(theta) * B
//! ```
//!
//! The relation has no guard for `A <= 2`: two bolts give `C = 0`, fewer
//! give a negative value. Callers log a warning for such bolt counts but
//! the number is still reported.
//!
//! ## PCD and thickness
//!
//! Both are rules of thumb: the pitch circle diameter is taken as 80% of
//! the flange outside diameter, and the thickness as `D/20 + P/10`.
//! The PCD relation does not depend on the bolt count.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::flange;
//!
//! let c = flange::dimension_c(4.0, 100.0);
//! assert!((c - 100.0).abs() < 1e-9);
//! assert_eq!(flange::thickness(100.0, 50.0), 10.0);
//! ```

/// Ratio of pitch circle diameter to flange outside diameter
pub const PCD_RATIO: f64 = 0.8;

/// Below this bolt count the dimension C relation degenerates
pub const MIN_BOLT_COUNT: f64 = 3.0;

/// Angle term `180 - 360 / A` in degrees.
pub fn bolt_angle_deg(bolts: f64) -> f64 {
    180.0 - 360.0 / bolts
}

/// Dimension C for `bolts` holes and reference dimension `dimension_b`.
pub fn dimension_c(bolts: f64, dimension_b: f64) -> f64 {
    bolt_angle_deg(bolts).to_radians().sin() * dimension_b
}

/// Pitch circle diameter estimate. `_bolts` is accepted for symmetry with
/// the form, which requires a bolt count, but does not enter the result.
pub fn pitch_circle_diameter(diameter_mm: f64, _bolts: f64) -> f64 {
    diameter_mm * PCD_RATIO
}

/// Flange thickness estimate (mm) from outside diameter (mm) and pressure.
pub fn thickness(diameter_mm: f64, pressure: f64) -> f64 {
    diameter_mm / 20.0 + pressure / 10.0
}
