//! # Navigation
//!
//! The form is split into three sections and exactly one is visible at a
//! time. [`Navigator`] owns the current section; nothing else stores it.
//!
//! ```text
//!                 activate("gear-calculations")
//!   main-menu  ──────────────────────────────▶  gear-calculations
//!      ▲   │                                         │
//!      │   └──────────▶ flange-calculations ◀────────┘
//!      └────────────────────────┘   (entry: recompute flange C)
//! ```
//!
//! Every section is reachable from every other one. Unknown ids are
//! rejected and leave the current section in place.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::navigation::{Navigator, Section};
//!
//! let mut nav = Navigator::new();
//! assert_eq!(nav.current(), Section::MainMenu);
//!
//! nav.activate("gear-calculations").unwrap();
//! assert!(nav.is_visible(Section::GearCalculations));
//! assert!(!nav.is_visible(Section::MainMenu));
//!
//! assert!(nav.activate("settings").is_err());
//! assert_eq!(nav.current(), Section::GearCalculations);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::Calculation;
use crate::errors::{CalcError, CalcResult};

/// The sections of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    MainMenu,
    GearCalculations,
    FlangeCalculations,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::MainMenu,
        Section::GearCalculations,
        Section::FlangeCalculations,
    ];

    /// Stable element id
    pub fn id(&self) -> &'static str {
        match self {
            Section::MainMenu => "main-menu",
            Section::GearCalculations => "gear-calculations",
            Section::FlangeCalculations => "flange-calculations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::MainMenu => "Mechanical Engineering Calculator",
            Section::GearCalculations => "Gear Calculations",
            Section::FlangeCalculations => "Flange Calculations",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Calculation to refresh shortly after the section is shown, if any.
    ///
    /// Only the flange section has one: its inputs may already hold values
    /// that were entered before the section was last hidden.
    pub fn entry_recompute(&self) -> Option<Calculation> {
        match self {
            Section::FlangeCalculations => Some(Calculation::FlangeC),
            _ => None,
        }
    }

    /// Calculations hosted by this section, in display order
    pub fn calculations(&self) -> Vec<Calculation> {
        Calculation::ALL
            .into_iter()
            .filter(|c| c.section() == *self)
            .collect()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::from_id(s).ok_or_else(|| CalcError::unknown_section(s))
    }
}

/// A completed section change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Section,
    pub to: Section,
}

impl Transition {
    /// Entry side effect of the target section
    pub fn entry_recompute(&self) -> Option<Calculation> {
        self.to.entry_recompute()
    }
}

/// Owner of the "which section is visible" state.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Section,
}

impl Navigator {
    /// Start on the main menu
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// True for the current section only
    pub fn is_visible(&self, section: Section) -> bool {
        self.current == section
    }

    /// Show the section named by `id` and hide all others.
    ///
    /// Unknown ids are logged and rejected without changing visibility.
    pub fn activate(&mut self, id: &str) -> CalcResult<Transition> {
        match Section::from_id(id) {
            Some(section) => Ok(self.show(section)),
            None => {
                tracing::warn!(section = id, current = %self.current, "section not found");
                Err(CalcError::unknown_section(id))
            }
        }
    }

    /// Typed form of [`Navigator::activate`]; cannot fail.
    pub fn show(&mut self, section: Section) -> Transition {
        let transition = Transition {
            from: self.current,
            to: section,
        };
        self.current = section;
        tracing::info!(from = %transition.from, to = %transition.to, "navigated");
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Section::MainMenu);
        assert!(nav.is_visible(Section::MainMenu));
        assert!(!nav.is_visible(Section::FlangeCalculations));
    }

    #[test]
    fn test_exactly_one_visible() {
        let mut nav = Navigator::new();
        for section in Section::ALL {
            nav.show(section);
            let visible = Section::ALL.iter().filter(|s| nav.is_visible(**s)).count();
            assert_eq!(visible, 1);
        }
    }

    #[test]
    fn test_transition_records_both_ends() {
        let mut nav = Navigator::new();
        let t = nav.activate("flange-calculations").unwrap();
        assert_eq!(t.from, Section::MainMenu);
        assert_eq!(t.to, Section::FlangeCalculations);
        assert_eq!(t.entry_recompute(), Some(Calculation::FlangeC));
    }

    #[test]
    fn test_only_flange_has_entry_action() {
        assert_eq!(Section::MainMenu.entry_recompute(), None);
        assert_eq!(Section::GearCalculations.entry_recompute(), None);
    }

    #[test]
    fn test_unknown_section_keeps_current() {
        let mut nav = Navigator::new();
        nav.show(Section::GearCalculations);
        let err = nav.activate("pump-calculations").unwrap_err();
        assert_eq!(err, CalcError::unknown_section("pump-calculations"));
        assert!(nav.is_visible(Section::GearCalculations));
    }

    #[test]
    fn test_section_calculations() {
        assert_eq!(Section::GearCalculations.calculations().len(), 4);
        assert_eq!(Section::FlangeCalculations.calculations().len(), 3);
        assert!(Section::MainMenu.calculations().is_empty());
    }
}
