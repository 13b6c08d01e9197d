//! Calculator state and the input-driven state machine.
//!
//! [`Calculator`] owns a single [`CalculatorState`] and mutates it in
//! response to each [`Input`]. Arithmetic is folded strictly left to right:
//! pressing an operator applies the *previous* pending operator to the
//! stored operand and the display.

use std::fmt;

use tracing::{debug, trace, warn};

use super::display::DisplaySnapshot;
use super::evaluation::{
    self, BinaryOp, CalcError, ERROR_MARKER, EngineSettings, ScientificFn, format_number,
    parse_number,
};
use super::input::{Constant, Input, InputError};

/// The mutable state behind the display.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    /// What the display shows: a numeral or [`ERROR_MARKER`].
    pub display_value: String,
    /// Operator applied at the next fold.
    pub pending_operator: BinaryOp,
    /// Left-hand side of the next fold.
    pub first_operand: f64,
    /// When set, the next digit starts a new number.
    pub awaiting_new_operand: bool,
}

impl CalculatorState {
    /// Reset the fold context. The display is left alone.
    fn reset_operation(&mut self) {
        self.pending_operator = BinaryOp::Add;
        self.first_operand = 0.0;
        self.awaiting_new_operand = true;
    }

    fn has_default_operation(&self) -> bool {
        self.pending_operator == BinaryOp::Add && self.first_operand == 0.0
    }

    pub fn is_error(&self) -> bool {
        self.display_value == ERROR_MARKER
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display_value: "0".to_string(),
            pending_operator: BinaryOp::Add,
            first_operand: 0.0,
            awaiting_new_operand: true,
        }
    }
}

/// Coarse view of where the state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a number with no fold in progress.
    Idle,
    /// Digits are being typed.
    Entering,
    /// An operator was chosen; waiting for its right-hand operand.
    PendingOperator,
    /// The display shows the error marker.
    Error,
}

type DisplayListener = Box<dyn FnMut(&str)>;

/// A calculator session.
pub struct Calculator {
    state: CalculatorState,
    settings: EngineSettings,
    listeners: Vec<DisplayListener>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            state: CalculatorState::default(),
            settings,
            listeners: Vec::new(),
        }
    }

    pub fn display(&self) -> &str {
        &self.state.display_value
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        let state = &self.state;
        if state.is_error() {
            Phase::Error
        } else if !state.awaiting_new_operand {
            Phase::Entering
        } else if state.has_default_operation() {
            Phase::Idle
        } else {
            Phase::PendingOperator
        }
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot::capture(self)
    }

    /// Register a callback invoked with the display after every input.
    pub fn subscribe(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Parse `label` and handle it. Unknown labels leave the state untouched.
    pub fn handle_token(&mut self, label: &str) -> Result<&str, InputError> {
        let input = Input::from_label(label)?;
        Ok(self.handle_input(input))
    }

    /// Handle one button press and return the new display.
    pub fn handle_input(&mut self, input: Input) -> &str {
        debug!(input = %input, phase = ?self.phase(), "Handling input");

        if self.state.is_error() || input == Input::Clear {
            // Recovering from an error consumes the input that triggered it
            self.clear();
        } else {
            match input {
                Input::Digit(_) | Input::DecimalPoint => self.enter(input.label()),
                Input::Constant(constant) => self.enter_constant(constant),
                Input::BinaryOp(op) => self.press_operator(op),
                Input::Scientific(function) => self.press_scientific(function),
                Input::Equals => self.press_equals(),
                Input::Percent => self.press_percent(),
                Input::Negate => self.press_negate(),
                Input::Clear => self.clear(),
            }
        }

        self.notify();
        &self.state.display_value
    }

    fn clear(&mut self) {
        self.state.display_value = "0".to_string();
        self.state.reset_operation();
    }

    fn enter(&mut self, label: &str) {
        let state = &mut self.state;

        if state.display_value == "0" || state.awaiting_new_operand {
            state.display_value = label.to_string();
            state.awaiting_new_operand = false;
            return;
        }

        if label == "." && state.display_value.contains('.') {
            trace!("Ignoring second decimal point");
            return;
        }

        let typed = state.display_value.chars().filter(|c| *c != '.').count();
        if typed < self.settings.max_input_digits {
            state.display_value.push_str(label);
        } else {
            trace!(typed, "Input is at the digit limit, dropping");
        }
    }

    fn enter_constant(&mut self, constant: Constant) {
        self.state.display_value = format_number(constant.value());
        self.state.awaiting_new_operand = true;
    }

    /// Apply the pending operator to the stored operand and the display.
    fn fold_pending(&self) -> Result<f64, CalcError> {
        let rhs = parse_number(&self.state.display_value)?;
        let result = evaluation::fold(self.state.first_operand, rhs, self.state.pending_operator)?;
        debug!(
            lhs = self.state.first_operand,
            op = %self.state.pending_operator,
            rhs,
            result,
            "Folded"
        );
        Ok(result)
    }

    fn press_operator(&mut self, op: BinaryOp) {
        let folded = self.fold_pending().map(format_number);
        let state = &mut self.state;

        match folded {
            Ok(display) => {
                // Carry the value as displayed, not the unrounded result
                state.first_operand = parse_number(&display).unwrap_or(0.0);
                state.display_value = display;
            }
            Err(err) => {
                warn!(%err, "Fold failed");
                state.display_value = ERROR_MARKER.to_string();
                state.first_operand = 0.0;
            }
        }

        state.pending_operator = op;
        state.awaiting_new_operand = true;
    }

    fn press_equals(&mut self) {
        self.state.display_value = match self.fold_pending() {
            Ok(result) => format_number(result),
            Err(err) => {
                warn!(%err, "Fold failed");
                ERROR_MARKER.to_string()
            }
        };
        self.state.reset_operation();
    }

    fn press_scientific(&mut self, function: ScientificFn) {
        let angle_unit = self.settings.angle_unit;
        let result = parse_number(&self.state.display_value)
            .and_then(|value| evaluation::apply_scientific(value, function, angle_unit));
        self.show_result(result);
    }

    fn press_percent(&mut self) {
        let result = parse_number(&self.state.display_value).map(|value| value / 100.0);
        self.show_result(result);
    }

    fn press_negate(&mut self) {
        match parse_number(&self.state.display_value) {
            Ok(value) => self.state.display_value = format_number(-value),
            Err(err) => self.fail(err),
        }
    }

    /// Show a unary result and wait for a new operand, or fail.
    fn show_result(&mut self, result: Result<f64, CalcError>) {
        match result {
            Ok(value) => {
                self.state.display_value = format_number(value);
                self.state.awaiting_new_operand = true;
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: CalcError) {
        warn!(%err, "Computation failed");
        self.state.display_value = ERROR_MARKER.to_string();
        self.state.reset_operation();
    }

    fn notify(&mut self) {
        let display = &self.state.display_value;
        for listener in &mut self.listeners {
            listener(display);
        }
    }
}
