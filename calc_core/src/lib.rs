//! # calc_core - Mechanical Engineering Calculation Engine
//!
//! `calc_core` is the computational heart of the mechanical calculator:
//! gear geometry and flange bolting formulas behind a small form model
//! that any front end (Iced GUI, terminal, web) can drive.
//!
//! ## Design Philosophy
//!
//! - **Pure formulas**: every calculation is a plain `f64` function
//! - **Model, not widgets**: calculations read a [`fields::FieldModel`],
//!   so everything is testable without a UI
//! - **Explicit time**: delayed effects go through a virtual-clock
//!   [`scheduler::Scheduler`]
//! - **JSON-First**: public data types implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::Calculation;
//! use calc_core::fields::FieldId;
//! use calc_core::session::Session;
//!
//! let mut session = Session::default();
//! session.set_field(FieldId::FlangeBolts, "4");
//! session.set_field(FieldId::FlangeDimension, "100");
//!
//! let result = session.run(Calculation::FlangeC).unwrap();
//! assert_eq!(result.text, "100.00");
//! ```
//!
//! ## Modules
//!
//! - [`validation`] - Positive-number predicate and result formatting
//! - [`calculations`] - The seven gear and flange calculations
//! - [`fields`] - Field identifiers and the field-value model
//! - [`navigation`] - Sections and the navigation controller
//! - [`scheduler`] - Virtual-clock one-shot tasks
//! - [`session`] - Form session tying everything together
//! - [`asset_cache`] - Versioned offline cache of static assets
//! - [`clipboard`] - Clipboard abstraction for copying results
//! - [`settings`] / [`file_io`] - Configuration and its JSON file
//! - [`errors`] - Structured error types

pub mod asset_cache;
pub mod calculations;
pub mod clipboard;
pub mod errors;
pub mod fields;
pub mod file_io;
pub mod logging;
pub mod navigation;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, Calculation, Evaluation};
pub use errors::{CalcError, CalcResult};
pub use fields::{FieldId, FieldModel};
pub use file_io::{load_settings, save_settings};
pub use navigation::{Navigator, Section};
pub use session::{ResultDisplay, Session};
pub use settings::CalculatorSettings;
