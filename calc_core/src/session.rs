//! # Calculator Session
//!
//! [`Session`] is the single object a front end talks to. It owns:
//!
//! - the [`FieldModel`] mirroring the input widgets
//! - the [`Navigator`] holding the visible section
//! - a [`Scheduler`] for every delayed effect
//! - the displayed result of each calculation
//! - transient flags: errored fields and "copied" confirmations
//!
//! Front ends forward user events (`input_changed`, `commit`, `navigate`,
//! `handle_escape`, `copy_result`) and advance time with [`Session::advance`].
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use calc_core::calculations::Calculation;
//! use calc_core::fields::FieldId;
//! use calc_core::session::Session;
//!
//! let mut session = Session::default();
//! session.input_changed(FieldId::ThicknessDiameter, "100").unwrap();
//! assert!(session.is_field_errored(FieldId::ThicknessPressure));
//!
//! session.input_changed(FieldId::ThicknessPressure, "50").unwrap();
//! assert_eq!(session.result(Calculation::FlangeThickness).text, "10.00");
//!
//! session.advance(Duration::from_secs(3));
//! assert!(!session.is_field_errored(FieldId::ThicknessPressure));
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::clipboard::Clipboard;
use crate::errors::{CalcError, CalcResult};
use crate::fields::{FieldId, FieldModel};
use crate::navigation::{Navigator, Section};
use crate::scheduler::{Scheduler, TaskId};
use crate::settings::CalculatorSettings;
use crate::validation::{sanitize_input, SENTINEL};

/// Delayed effects owned by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    Recompute(Calculation),
    ClearError(FieldId),
    ClearCopied(Calculation),
}

/// What a result area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDisplay {
    pub text: String,
    pub success: bool,
}

impl Default for ResultDisplay {
    fn default() -> Self {
        ResultDisplay {
            text: SENTINEL.to_string(),
            success: false,
        }
    }
}

/// Outcome of a copy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyOutcome {
    /// Written through the clipboard API; confirmation shown
    Copied,
    /// Clipboard API rejected, legacy mechanism used; no confirmation
    CopiedWithFallback,
    /// Result is `--`; nothing done
    NothingToCopy,
    /// Both mechanisms failed
    Failed,
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub section: Section,
    pub elapsed_ms: u64,
    pub fields: FieldModel,
    pub results: BTreeMap<Calculation, ResultDisplay>,
    pub errored_fields: Vec<FieldId>,
}

/// Form state and behavior for one page lifetime.
#[derive(Debug, Clone)]
pub struct Session {
    settings: CalculatorSettings,
    fields: FieldModel,
    navigator: Navigator,
    timers: Scheduler<SessionTask>,
    /// Indexed by `Calculation as usize`
    results: [ResultDisplay; Calculation::ALL.len()],
    error_timers: BTreeMap<FieldId, TaskId>,
    copied_timers: BTreeMap<Calculation, TaskId>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(CalculatorSettings::default())
    }
}

impl Session {
    /// A session over a complete form, on the main menu
    pub fn new(settings: CalculatorSettings) -> Self {
        Session::with_fields(settings, FieldModel::with_all_fields())
    }

    /// A session over a form that may lack some fields
    pub fn with_fields(settings: CalculatorSettings, fields: FieldModel) -> Self {
        Session {
            settings,
            fields,
            navigator: Navigator::new(),
            timers: Scheduler::new(),
            results: Default::default(),
            error_timers: BTreeMap::new(),
            copied_timers: BTreeMap::new(),
        }
    }

    // ===== Queries =====

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    pub fn fields(&self) -> &FieldModel {
        &self.fields
    }

    pub fn field_value(&self, field: FieldId) -> Option<&str> {
        self.fields.get(field)
    }

    pub fn current_section(&self) -> Section {
        self.navigator.current()
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.navigator.is_visible(section)
    }

    pub fn result(&self, calculation: Calculation) -> &ResultDisplay {
        &self.results[calculation as usize]
    }

    pub fn is_field_errored(&self, field: FieldId) -> bool {
        self.error_timers.contains_key(&field)
    }

    /// True while the "copied" confirmation is shown on a result
    pub fn is_copied(&self, calculation: Calculation) -> bool {
        self.copied_timers.contains_key(&calculation)
    }

    /// Simulated time since the session started
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_idle()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            section: self.current_section(),
            elapsed_ms: self.now().as_millis() as u64,
            fields: self.fields.clone(),
            results: Calculation::ALL
                .into_iter()
                .map(|c| (c, self.result(c).clone()))
                .collect(),
            errored_fields: self.error_timers.keys().copied().collect(),
        }
    }

    // ===== Input events =====

    /// Store a value without any side effect (widget sync).
    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// The user edited `field`: sanitize and store the value, recompute
    /// the calculation it feeds, then clear the field's own error flag.
    ///
    /// Only the partner field can be left flagged; the field being typed
    /// in is flagged again on [`Session::commit`].
    pub fn input_changed(&mut self, field: FieldId, raw: &str) -> CalcResult<&ResultDisplay> {
        if !self.fields.contains(field) {
            let error = CalcError::missing_field(field.id());
            log_dropped(&error, "input event");
            return Err(error);
        }
        let calculation = field.calculation();
        self.fields.set(field, sanitize_input(raw));
        let ran = self.run(calculation).map(|_| ());
        self.clear_error(field);
        ran?;
        Ok(self.result(calculation))
    }

    /// [`Session::input_changed`] addressed by element id
    pub fn input_changed_by_id(&mut self, id: &str, raw: &str) -> CalcResult<&ResultDisplay> {
        let field = id
            .parse::<FieldId>()
            .inspect_err(|e| log_dropped(e, "input event"))?;
        self.input_changed(field, raw)
    }

    /// The user committed `field` (focus left, Enter): recompute its
    /// calculation with the stored value.
    pub fn commit(&mut self, field: FieldId) -> CalcResult<&ResultDisplay> {
        self.run(field.calculation())
    }

    // ===== Entry points =====

    /// Recompute one calculation from the current field values.
    ///
    /// Invalid inputs produce `--`, drop success styling, and flash an
    /// error on each offending field. A field missing from the form is
    /// logged and leaves the previous result untouched.
    pub fn run(&mut self, calculation: Calculation) -> CalcResult<&ResultDisplay> {
        let evaluation =
            evaluate(calculation, &self.fields).inspect_err(|e| log_dropped(e, calculation.name()))?;

        for field in &evaluation.invalid_fields {
            self.flash_error(*field);
        }

        self.results[calculation as usize] = ResultDisplay {
            text: evaluation.display,
            success: evaluation.success,
        };
        Ok(self.result(calculation))
    }

    /// [`Session::run`] addressed by logical name
    pub fn run_by_name(&mut self, name: &str) -> CalcResult<&ResultDisplay> {
        let calculation = name
            .parse::<Calculation>()
            .inspect_err(|e| log_dropped(e, "calculation request"))?;
        self.run(calculation)
    }

    /// Show the section named `id`. Unknown ids are logged and leave the
    /// current section visible.
    pub fn navigate(&mut self, id: &str) -> CalcResult<Section> {
        let transition = self.navigator.activate(id)?;
        if let Some(calculation) = transition.entry_recompute() {
            self.timers.schedule(
                self.settings.flange_recompute_delay(),
                SessionTask::Recompute(calculation),
            );
        }
        Ok(transition.to)
    }

    /// Typed form of [`Session::navigate`]
    pub fn show(&mut self, section: Section) -> Section {
        // Known ids cannot fail
        self.navigate(section.id()).unwrap_or(section)
    }

    /// Escape returns to the main menu from any other section.
    /// Returns whether a navigation happened.
    pub fn handle_escape(&mut self) -> bool {
        if self.current_section() == Section::MainMenu {
            return false;
        }
        self.show(Section::MainMenu);
        true
    }

    /// Copy a result's text to the clipboard.
    pub fn copy_result(&mut self, calculation: Calculation, clipboard: &mut dyn Clipboard) -> CopyOutcome {
        let text = self.result(calculation).text.clone();
        if text == SENTINEL {
            return CopyOutcome::NothingToCopy;
        }

        match clipboard.write_text(&text) {
            Ok(()) => {
                if let Some(previous) = self.copied_timers.remove(&calculation) {
                    self.timers.cancel(previous);
                }
                let id = self.timers.schedule(
                    self.settings.copied_overlay(),
                    SessionTask::ClearCopied(calculation),
                );
                self.copied_timers.insert(calculation, id);
                CopyOutcome::Copied
            }
            Err(primary) => {
                tracing::debug!(error = %primary, "clipboard API rejected, using fallback");
                match clipboard.write_text_fallback(&text) {
                    Ok(()) => CopyOutcome::CopiedWithFallback,
                    Err(fallback) => {
                        tracing::warn!(error = %fallback, "copy failed");
                        CopyOutcome::Failed
                    }
                }
            }
        }
    }

    // ===== Time =====

    /// Advance simulated time, firing every task that comes due (including
    /// tasks scheduled by tasks fired in the same window). Returns the
    /// number of tasks fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.timers.now() + by;
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(until) {
            self.fire(task);
            fired += 1;
        }
        self.timers.set_now(until);
        fired
    }

    fn fire(&mut self, task: SessionTask) {
        tracing::trace!(?task, "timer fired");
        match task {
            SessionTask::Recompute(calculation) => {
                // Failures are logged by run
                let _ = self.run(calculation);
            }
            SessionTask::ClearError(field) => {
                self.error_timers.remove(&field);
            }
            SessionTask::ClearCopied(calculation) => {
                self.copied_timers.remove(&calculation);
            }
        }
    }

    /// Flag `field` as errored until `error_flash` from now. A field that
    /// is already flagged gets its deadline pushed back.
    fn flash_error(&mut self, field: FieldId) {
        if let Some(previous) = self.error_timers.remove(&field) {
            self.timers.cancel(previous);
        }
        let id = self
            .timers
            .schedule(self.settings.error_flash(), SessionTask::ClearError(field));
        self.error_timers.insert(field, id);
    }

    fn clear_error(&mut self, field: FieldId) {
        if let Some(previous) = self.error_timers.remove(&field) {
            self.timers.cancel(previous);
        }
    }
}

/// Lookup failures mean the form and the calculator disagree about which
/// elements exist; anything else is routine.
fn log_dropped(error: &CalcError, what: &str) {
    if error.is_lookup_failure() {
        tracing::error!(error = %error, code = error.error_code(), "{} dropped", what);
    } else {
        tracing::debug!(error = %error, "{} dropped", what);
    }
}
