//! Shared UI components reusable across sections
//!
//! Contains:
//! - `calc_card` - Input/result card for a single calculation

pub mod calc_card;
