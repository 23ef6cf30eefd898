//! # Form Fields
//!
//! The calculator form is modelled as a mapping from logical field to the
//! raw string currently typed into it. UI layers copy widget values into a
//! [`FieldModel`]; calculations read from the model only, so they can be
//! exercised without any rendering environment.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::fields::{FieldId, FieldModel};
//!
//! let mut form = FieldModel::with_all_fields();
//! form.set(FieldId::TeethDiameter, "100");
//! assert_eq!(form.get(FieldId::TeethDiameter), Some("100"));
//! assert_eq!(form.get(FieldId::TeethModule), Some(""));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::Calculation;
use crate::errors::{CalcError, CalcResult};

/// Every input field on the form, identified by its kebab-case id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    TeethDiameter,
    TeethModule,
    DrivingTeeth,
    DrivenTeeth,
    PitchModule,
    PitchTeeth,
    ModuleDiameter,
    ModuleTeeth,
    FlangeBolts,
    FlangeDimension,
    PcdDiameter,
    PcdBolts,
    ThicknessDiameter,
    ThicknessPressure,
}

static FIELD_INDEX: Lazy<HashMap<&'static str, FieldId>> =
    Lazy::new(|| FieldId::ALL.iter().map(|f| (f.id(), *f)).collect());

impl FieldId {
    /// All fields in form order
    pub const ALL: [FieldId; 14] = [
        FieldId::TeethDiameter,
        FieldId::TeethModule,
        FieldId::DrivingTeeth,
        FieldId::DrivenTeeth,
        FieldId::PitchModule,
        FieldId::PitchTeeth,
        FieldId::ModuleDiameter,
        FieldId::ModuleTeeth,
        FieldId::FlangeBolts,
        FieldId::FlangeDimension,
        FieldId::PcdDiameter,
        FieldId::PcdBolts,
        FieldId::ThicknessDiameter,
        FieldId::ThicknessPressure,
    ];

    /// Stable element id
    pub fn id(&self) -> &'static str {
        match self {
            FieldId::TeethDiameter => "teeth-diameter",
            FieldId::TeethModule => "teeth-module",
            FieldId::DrivingTeeth => "driving-teeth",
            FieldId::DrivenTeeth => "driven-teeth",
            FieldId::PitchModule => "pitch-module",
            FieldId::PitchTeeth => "pitch-teeth",
            FieldId::ModuleDiameter => "module-diameter",
            FieldId::ModuleTeeth => "module-teeth",
            FieldId::FlangeBolts => "flange-bolts",
            FieldId::FlangeDimension => "flange-dimension",
            FieldId::PcdDiameter => "pcd-diameter",
            FieldId::PcdBolts => "pcd-bolts",
            FieldId::ThicknessDiameter => "thickness-diameter",
            FieldId::ThicknessPressure => "thickness-pressure",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::TeethDiameter | FieldId::ModuleDiameter => "Diameter (mm)",
            FieldId::TeethModule | FieldId::PitchModule => "Module",
            FieldId::DrivingTeeth => "Driving gear teeth",
            FieldId::DrivenTeeth => "Driven gear teeth",
            FieldId::PitchTeeth | FieldId::ModuleTeeth => "Number of teeth",
            FieldId::FlangeBolts | FieldId::PcdBolts => "Number of bolts",
            FieldId::FlangeDimension => "Dimension B (mm)",
            FieldId::PcdDiameter | FieldId::ThicknessDiameter => "Flange diameter (mm)",
            FieldId::ThicknessPressure => "Pressure (bar)",
        }
    }

    /// Look up a field by element id
    pub fn from_id(id: &str) -> Option<FieldId> {
        FIELD_INDEX.get(id).copied()
    }

    /// The calculation this field feeds
    pub fn calculation(&self) -> Calculation {
        match self {
            FieldId::TeethDiameter | FieldId::TeethModule => Calculation::TeethCount,
            FieldId::DrivingTeeth | FieldId::DrivenTeeth => Calculation::GearRatio,
            FieldId::PitchModule | FieldId::PitchTeeth => Calculation::PitchDiameter,
            FieldId::ModuleDiameter | FieldId::ModuleTeeth => Calculation::Module,
            FieldId::FlangeBolts | FieldId::FlangeDimension => Calculation::FlangeC,
            FieldId::PcdDiameter | FieldId::PcdBolts => Calculation::PitchCircleDiameter,
            FieldId::ThicknessDiameter | FieldId::ThicknessPressure => Calculation::FlangeThickness,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FieldId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::from_id(s).ok_or_else(|| CalcError::unknown_field(s))
    }
}

/// Raw string values of the fields present on the form.
///
/// A field that was never registered is "missing", which is different
/// from being present and empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldModel {
    values: BTreeMap<FieldId, String>,
}

impl FieldModel {
    /// A form with no fields at all
    pub fn new() -> Self {
        Self::default()
    }

    /// A form with every field present and empty
    pub fn with_all_fields() -> Self {
        FieldModel {
            values: FieldId::ALL.iter().map(|f| (*f, String::new())).collect(),
        }
    }

    /// Add a field (empty) if it is not already present
    pub fn register(&mut self, field: FieldId) {
        self.values.entry(field).or_default();
    }

    /// Remove a field from the form
    pub fn unregister(&mut self, field: FieldId) -> Option<String> {
        self.values.remove(&field)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.values.contains_key(&field)
    }

    /// Current raw value, or `None` if the field is missing
    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Current raw value, or `MissingField` if the field is missing
    pub fn require(&self, field: FieldId) -> CalcResult<&str> {
        self.get(field)
            .ok_or_else(|| CalcError::missing_field(field.id()))
    }

    /// Store a value, registering the field if needed
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Store a value by element id
    pub fn set_by_id(&mut self, id: &str, value: impl Into<String>) -> CalcResult<FieldId> {
        let field: FieldId = id.parse()?;
        self.set(field, value);
        Ok(field)
    }

    /// Iterate present fields in form order
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_id(field.id()), Some(field));
            assert_eq!(field.id().parse::<FieldId>().unwrap(), field);
        }
        assert_eq!(FieldId::from_id("teeth-count"), None);
    }

    #[test]
    fn test_serde_uses_element_ids() {
        let json = serde_json::to_string(&FieldId::PcdBolts).unwrap();
        assert_eq!(json, "\"pcd-bolts\"");
    }

    #[test]
    fn test_every_calculation_has_two_fields() {
        for calc in Calculation::ALL {
            let owned = FieldId::ALL.iter().filter(|f| f.calculation() == calc).count();
            assert_eq!(owned, 2, "{calc:?}");
        }
    }

    #[test]
    fn test_missing_versus_empty() {
        let mut form = FieldModel::new();
        assert!(form.require(FieldId::FlangeBolts).is_err());

        form.register(FieldId::FlangeBolts);
        assert_eq!(form.require(FieldId::FlangeBolts).unwrap(), "");

        form.set(FieldId::FlangeBolts, "6");
        form.register(FieldId::FlangeBolts);
        assert_eq!(form.get(FieldId::FlangeBolts), Some("6"));

        form.unregister(FieldId::FlangeBolts);
        assert!(!form.contains(FieldId::FlangeBolts));
    }

    #[test]
    fn test_set_by_unknown_id() {
        let mut form = FieldModel::with_all_fields();
        let err = form.set_by_id("bolt-torque", "5").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
        assert_eq!(form.set_by_id("pcd-diameter", "200").unwrap(), FieldId::PcdDiameter);
    }
}
