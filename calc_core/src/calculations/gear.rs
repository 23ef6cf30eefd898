//! # Gear Geometry
//!
//! Spur gear sizing relations in the metric module system.
//!
//! - Pitch diameter `d = m * z`
//! - Module `m = d / z`
//! - Tooth count `z = d / m`, rounded to the nearest whole tooth
//! - Gear ratio `i = z_driven / z_driving`
//!
//! All lengths in millimetres. Inputs are assumed validated (finite, > 0);
//! see [`crate::validation`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::gear;
//!
//! assert_eq!(gear::teeth_count(100.0, 4.0), 25.0);
//! assert_eq!(gear::gear_ratio(20.0, 60.0), 3.0);
//! ```

/// Number of teeth for a pitch diameter and module, rounded to nearest.
pub fn teeth_count(diameter_mm: f64, module: f64) -> f64 {
    (diameter_mm / module).round()
}

/// Speed reduction ratio of a driving/driven pair.
pub fn gear_ratio(driving_teeth: f64, driven_teeth: f64) -> f64 {
    driven_teeth / driving_teeth
}

/// Pitch diameter (mm) from module and tooth count.
pub fn pitch_diameter(module: f64, teeth: f64) -> f64 {
    module * teeth
}

/// Module from pitch diameter (mm) and tooth count.
pub fn module(diameter_mm: f64, teeth: f64) -> f64 {
    diameter_mm / teeth
}
