//! UI module for the calculator GUI
//!
//! # Panel Structure
//! - `toolbar` - Header with section title and back button
//! - `main_menu` - Section picker shown on start
//! - `section_panel` - Gear or flange section: one card per calculation
//! - `status_bar` - Bottom status messages
//!
//! # Shared Components
//! - `shared/calc_card` - Two labeled inputs plus a copyable result

pub mod main_menu;
pub mod section_panel;
pub mod status_bar;
pub mod toolbar;

pub mod shared;
