//! # Calculations
//!
//! Seven independent two-input calculations. Each one follows the same
//! pattern:
//!
//! - read its two raw field values from a [`FieldModel`]
//! - validate each independently with [`crate::validation::is_valid`]
//! - if both are valid, apply the formula and format the result
//! - otherwise report `--` and the list of fields that failed
//!
//! The formulas themselves live in [`gear`] and [`flange`] as plain `f64`
//! functions.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{evaluate, Calculation};
//! use calc_core::fields::{FieldId, FieldModel};
//!
//! let mut form = FieldModel::with_all_fields();
//! form.set(FieldId::DrivingTeeth, "20");
//! form.set(FieldId::DrivenTeeth, "60");
//!
//! let eval = evaluate(Calculation::GearRatio, &form).unwrap();
//! assert_eq!(eval.display, "3.000");
//! assert!(eval.success);
//! ```
//!
//! ## Available Calculations
//!
//! - [`gear`] - teeth count, gear ratio, pitch diameter, module
//! - [`flange`] - dimension C, pitch circle diameter, thickness

pub mod flange;
pub mod gear;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::fields::{FieldId, FieldModel};
use crate::navigation::Section;
use crate::validation::{format_result, parse_positive, SENTINEL};

/// The calculations offered by the form, addressable by logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Calculation {
    TeethCount,
    GearRatio,
    PitchDiameter,
    Module,
    #[serde(rename = "flange-c")]
    FlangeC,
    #[serde(rename = "pcd")]
    PitchCircleDiameter,
    #[serde(rename = "thickness")]
    FlangeThickness,
}

impl Calculation {
    pub const ALL: [Calculation; 7] = [
        Calculation::TeethCount,
        Calculation::GearRatio,
        Calculation::PitchDiameter,
        Calculation::Module,
        Calculation::FlangeC,
        Calculation::PitchCircleDiameter,
        Calculation::FlangeThickness,
    ];

    /// Logical name used by external callers
    pub fn name(&self) -> &'static str {
        match self {
            Calculation::TeethCount => "teeth-count",
            Calculation::GearRatio => "gear-ratio",
            Calculation::PitchDiameter => "pitch-diameter",
            Calculation::Module => "module",
            Calculation::FlangeC => "flange-c",
            Calculation::PitchCircleDiameter => "pcd",
            Calculation::FlangeThickness => "thickness",
        }
    }

    /// Human-readable title
    pub fn display_name(&self) -> &'static str {
        match self {
            Calculation::TeethCount => "Teeth Count",
            Calculation::GearRatio => "Gear Ratio",
            Calculation::PitchDiameter => "Pitch Diameter",
            Calculation::Module => "Module",
            Calculation::FlangeC => "Flange Dimension C",
            Calculation::PitchCircleDiameter => "Pitch Circle Diameter (PCD)",
            Calculation::FlangeThickness => "Flange Thickness",
        }
    }

    /// The (A, B) input fields, in formula order
    pub fn inputs(&self) -> [FieldId; 2] {
        match self {
            Calculation::TeethCount => [FieldId::TeethDiameter, FieldId::TeethModule],
            Calculation::GearRatio => [FieldId::DrivingTeeth, FieldId::DrivenTeeth],
            Calculation::PitchDiameter => [FieldId::PitchModule, FieldId::PitchTeeth],
            Calculation::Module => [FieldId::ModuleDiameter, FieldId::ModuleTeeth],
            Calculation::FlangeC => [FieldId::FlangeBolts, FieldId::FlangeDimension],
            Calculation::PitchCircleDiameter => [FieldId::PcdDiameter, FieldId::PcdBolts],
            Calculation::FlangeThickness => [FieldId::ThicknessDiameter, FieldId::ThicknessPressure],
        }
    }

    /// Fixed number of decimals in the formatted result
    pub fn decimals(&self) -> usize {
        match self {
            Calculation::TeethCount => 0,
            Calculation::GearRatio => 3,
            _ => 2,
        }
    }

    /// Section of the form that hosts this calculation
    pub fn section(&self) -> Section {
        match self {
            Calculation::TeethCount
            | Calculation::GearRatio
            | Calculation::PitchDiameter
            | Calculation::Module => Section::GearCalculations,
            Calculation::FlangeC
            | Calculation::PitchCircleDiameter
            | Calculation::FlangeThickness => Section::FlangeCalculations,
        }
    }

    /// Apply the formula to already-validated inputs
    pub fn compute(&self, a: f64, b: f64) -> f64 {
        match self {
            Calculation::TeethCount => gear::teeth_count(a, b),
            Calculation::GearRatio => gear::gear_ratio(a, b),
            Calculation::PitchDiameter => gear::pitch_diameter(a, b),
            Calculation::Module => gear::module(a, b),
            Calculation::FlangeC => flange::dimension_c(a, b),
            Calculation::PitchCircleDiameter => flange::pitch_circle_diameter(a, b),
            Calculation::FlangeThickness => flange::thickness(a, b),
        }
    }

    /// Look up a calculation by logical name
    pub fn from_name(name: &str) -> Option<Calculation> {
        Calculation::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Calculation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Calculation::from_name(s).ok_or_else(|| CalcError::unknown_calculation(s))
    }
}

/// Numeric inputs for a single calculation, independent of the form.
///
/// ## JSON Example
///
/// ```json
/// { "calculation": "flange-c", "a": 4.0, "b": 100.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalcInput {
    pub calculation: Calculation,
    pub a: f64,
    pub b: f64,
}

impl CalcInput {
    /// Validate both inputs: each must be finite and > 0.
    pub fn validate(&self) -> CalcResult<()> {
        let [field_a, field_b] = self.calculation.inputs();
        for (field, value) in [(field_a, self.a), (field_b, self.b)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field.id(),
                    value.to_string(),
                    "Value must be a finite number greater than zero",
                ));
            }
        }
        Ok(())
    }
}

/// Compute the raw (unformatted) value of a calculation.
pub fn calculate(input: &CalcInput) -> CalcResult<f64> {
    input.validate()?;
    Ok(input.calculation.compute(input.a, input.b))
}

/// Outcome of evaluating a calculation against the form.
///
/// ## JSON Example
///
/// ```json
/// {
///   "calculation": "pcd",
///   "display": "--",
///   "success": false,
///   "invalid_fields": ["pcd-bolts"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub calculation: Calculation,
    /// Formatted result or `--`
    pub display: String,
    /// True iff both inputs were valid. A formula that overflows on valid
    /// inputs still succeeds and displays `--`.
    pub success: bool,
    /// Inputs that failed validation, in formula order
    pub invalid_fields: Vec<FieldId>,
}

/// Evaluate a calculation against the current form values.
///
/// Invalid values are not an error; they produce a non-success
/// [`Evaluation`]. Only a field missing from the form is an error.
pub fn evaluate(calculation: Calculation, form: &FieldModel) -> CalcResult<Evaluation> {
    let [field_a, field_b] = calculation.inputs();
    let raw_a = form.require(field_a)?;
    let raw_b = form.require(field_b)?;

    match (parse_positive(field_a.id(), raw_a), parse_positive(field_b.id(), raw_b)) {
        (Ok(a), Ok(b)) => {
            if calculation == Calculation::FlangeC && a < flange::MIN_BOLT_COUNT {
                tracing::warn!(bolts = a, "flange dimension C is degenerate below 3 bolts");
            }
            let value = calculation.compute(a, b);
            let text = format_result(value, calculation.decimals());
            tracing::debug!(%calculation, a, b, %text, "calculated");
            Ok(Evaluation {
                calculation,
                display: text,
                success: true,
                invalid_fields: Vec::new(),
            })
        }
        (res_a, res_b) => {
            let invalid_fields: Vec<FieldId> = [(field_a, res_a.is_err()), (field_b, res_b.is_err())]
                .into_iter()
                .filter_map(|(field, failed)| failed.then_some(field))
                .collect();
            tracing::trace!(%calculation, ?invalid_fields, "inputs incomplete");
            Ok(Evaluation {
                calculation,
                display: SENTINEL.to_string(),
                success: false,
                invalid_fields,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(values: &[(FieldId, &str)]) -> FieldModel {
        let mut form = FieldModel::with_all_fields();
        for (field, value) in values {
            form.set(*field, *value);
        }
        form
    }

    #[test]
    fn test_teeth_count() {
        let form = form_with(&[(FieldId::TeethDiameter, "100"), (FieldId::TeethModule, "4")]);
        let eval = evaluate(Calculation::TeethCount, &form).unwrap();
        assert_eq!(eval.display, "25");
        assert!(eval.success);
        assert!(eval.invalid_fields.is_empty());
    }

    #[test]
    fn test_gear_ratio() {
        let form = form_with(&[(FieldId::DrivingTeeth, "20"), (FieldId::DrivenTeeth, "60")]);
        assert_eq!(evaluate(Calculation::GearRatio, &form).unwrap().display, "3.000");
    }

    #[test]
    fn test_pitch_diameter_and_module() {
        let form = form_with(&[
            (FieldId::PitchModule, "2.5"),
            (FieldId::PitchTeeth, "40"),
            (FieldId::ModuleDiameter, "100"),
            (FieldId::ModuleTeeth, "3"),
        ]);
        assert_eq!(evaluate(Calculation::PitchDiameter, &form).unwrap().display, "100.00");
        assert_eq!(evaluate(Calculation::Module, &form).unwrap().display, "33.33");
    }

    #[test]
    fn test_flange_c() {
        let form = form_with(&[(FieldId::FlangeBolts, "4"), (FieldId::FlangeDimension, "100")]);
        assert_eq!(evaluate(Calculation::FlangeC, &form).unwrap().display, "100.00");
    }

    #[test]
    fn test_flange_c_two_bolts_is_reported() {
        let form = form_with(&[(FieldId::FlangeBolts, "2"), (FieldId::FlangeDimension, "100")]);
        let eval = evaluate(Calculation::FlangeC, &form).unwrap();
        assert!(eval.success);
        assert_eq!(eval.display, "0.00");
    }

    #[test]
    fn test_pcd_ignores_bolt_value() {
        let mut form = form_with(&[(FieldId::PcdDiameter, "200"), (FieldId::PcdBolts, "8")]);
        assert_eq!(evaluate(Calculation::PitchCircleDiameter, &form).unwrap().display, "160.00");

        form.set(FieldId::PcdBolts, "12");
        assert_eq!(evaluate(Calculation::PitchCircleDiameter, &form).unwrap().display, "160.00");

        form.set(FieldId::PcdBolts, "0");
        let eval = evaluate(Calculation::PitchCircleDiameter, &form).unwrap();
        assert_eq!(eval.display, "--");
        assert_eq!(eval.invalid_fields, vec![FieldId::PcdBolts]);
    }

    #[test]
    fn test_thickness() {
        let form = form_with(&[(FieldId::ThicknessDiameter, "100"), (FieldId::ThicknessPressure, "50")]);
        assert_eq!(evaluate(Calculation::FlangeThickness, &form).unwrap().display, "10.00");
    }

    #[test]
    fn test_each_invalid_input_reported() {
        let form = form_with(&[(FieldId::TeethDiameter, "abc"), (FieldId::TeethModule, "-4")]);
        let eval = evaluate(Calculation::TeethCount, &form).unwrap();
        assert_eq!(eval.display, "--");
        assert!(!eval.success);
        assert_eq!(eval.invalid_fields, vec![FieldId::TeethDiameter, FieldId::TeethModule]);
    }

    #[test]
    fn test_missing_field_is_error() {
        let mut form = FieldModel::with_all_fields();
        form.unregister(FieldId::FlangeDimension);
        let err = evaluate(Calculation::FlangeC, &form).unwrap_err();
        assert_eq!(err, CalcError::missing_field("flange-dimension"));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let form = form_with(&[(FieldId::DrivingTeeth, "17"), (FieldId::DrivenTeeth, "51")]);
        let first = evaluate(Calculation::GearRatio, &form).unwrap();
        let second = evaluate(Calculation::GearRatio, &form).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_success_follows_input_validity() {
        let form = form_with(&[(FieldId::ModuleDiameter, "1e308"), (FieldId::ModuleTeeth, "1e-300")]);
        let eval = evaluate(Calculation::Module, &form).unwrap();
        assert_eq!(eval.display, "--");
        assert!(eval.success);
        assert!(eval.invalid_fields.is_empty());
    }

    #[test]
    fn test_tie_results_round_up() {
        let form = form_with(&[(FieldId::DrivingTeeth, "16"), (FieldId::DrivenTeeth, "17")]);
        assert_eq!(evaluate(Calculation::GearRatio, &form).unwrap().display, "1.063");

        let form = form_with(&[(FieldId::ModuleDiameter, "1"), (FieldId::ModuleTeeth, "8")]);
        assert_eq!(evaluate(Calculation::Module, &form).unwrap().display, "0.13");

        let form = form_with(&[(FieldId::PitchModule, "0.5"), (FieldId::PitchTeeth, "0.25")]);
        assert_eq!(evaluate(Calculation::PitchDiameter, &form).unwrap().display, "0.13");
    }

    #[test]
    fn test_names_roundtrip() {
        for calc in Calculation::ALL {
            assert_eq!(calc.name().parse::<Calculation>().unwrap(), calc);
            let json = serde_json::to_string(&calc).unwrap();
            assert_eq!(json, format!("\"{}\"", calc.name()));
        }
        assert!("flange".parse::<Calculation>().is_err());
    }

    #[test]
    fn test_calculate_typed_input() {
        let input = CalcInput { calculation: Calculation::FlangeThickness, a: 100.0, b: 50.0 };
        assert_eq!(calculate(&input).unwrap(), 10.0);

        let bad = CalcInput { calculation: Calculation::GearRatio, a: 0.0, b: 10.0 };
        match calculate(&bad) {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "driving-teeth"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
