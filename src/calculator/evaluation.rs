//! Numeric evaluation for the calculator.
//!
//! Folds binary operations, applies scientific functions and formats
//! results for display. Every fallible operation returns a [`CalcError`];
//! turning that into the on-screen error marker is left to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The sentinel shown on the display when a computation is invalid.
pub const ERROR_MARKER: &str = "Error";

/// Values closer than this to an integer are displayed as that integer.
const INTEGER_TOLERANCE: f64 = 1e-9;

/// Magnitudes at or above this switch to scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e12;

/// Non-zero magnitudes below this switch to scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-6;

/// Digits after the decimal point in a scientific-notation mantissa.
const SCIENTIFIC_PRECISION: usize = 6;

/// Why a computation could not produce a displayable number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("{function} is undefined for {value}")]
    Domain { function: ScientificFn, value: f64 },

    #[error("result is not a finite number")]
    Overflow,

    #[error("cannot parse '{0}' as a number")]
    Parse(String),
}

/// The four arithmetic operators the calculator folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Internal ASCII symbol of the operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unary scientific functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScientificFn {
    Sin,
    Cos,
    Tan,
    Ln,
    TenPow,
    ExpE,
    Abs,
}

impl ScientificFn {
    pub const ALL: [ScientificFn; 7] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Ln,
        Self::TenPow,
        Self::ExpE,
        Self::Abs,
    ];

    /// Button label of the function.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::TenPow => "10ˣ",
            Self::ExpE => "eˣ",
            Self::Abs => "|x|",
        }
    }
}

impl std::fmt::Display for ScientificFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How trigonometric functions interpret their argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// Tunables for evaluation and entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub angle_unit: AngleUnit,
    /// Maximum number of typed characters, decimal point excluded.
    pub max_input_digits: usize,
}

impl EngineSettings {
    pub const DEFAULT_MAX_INPUT_DIGITS: usize = 15;
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Degrees,
            max_input_digits: Self::DEFAULT_MAX_INPUT_DIGITS,
        }
    }
}

/// Apply `op` to `lhs` and `rhs`.
///
/// Division by exactly zero and any non-finite result are errors.
pub fn fold(lhs: f64, rhs: f64, op: BinaryOp) -> Result<f64, CalcError> {
    let result = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Subtract => lhs - rhs,
        BinaryOp::Multiply => lhs * rhs,
        BinaryOp::Divide => {
            if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            lhs / rhs
        }
    };

    finite(result)
}

/// Apply a scientific function to `value`.
pub fn apply_scientific(
    value: f64,
    function: ScientificFn,
    angle_unit: AngleUnit,
) -> Result<f64, CalcError> {
    let angle = || match angle_unit {
        AngleUnit::Degrees => value.to_radians(),
        AngleUnit::Radians => value,
    };

    let result = match function {
        ScientificFn::Sin => angle().sin(),
        ScientificFn::Cos => angle().cos(),
        ScientificFn::Tan => angle().tan(),
        ScientificFn::Ln => {
            if value <= 0.0 {
                return Err(CalcError::Domain { function, value });
            }
            value.ln()
        }
        ScientificFn::TenPow => 10f64.powf(value),
        ScientificFn::ExpE => value.exp(),
        ScientificFn::Abs => value.abs(),
    };

    finite(result)
}

fn finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow)
    }
}

/// Format a number for the display.
///
/// Near-integers collapse to integers, very large or very small magnitudes
/// use scientific notation, everything else is the shortest decimal that
/// round-trips. Non-finite input renders as the error marker.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_MARKER.to_string();
    }

    let rounded = value.round();
    if (value - rounded).abs() < INTEGER_TOLERANCE {
        // `{:.0}` would print negative zero as "-0"
        if rounded == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", rounded);
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || (magnitude < SCIENTIFIC_LOWER && value != 0.0) {
        return format_scientific(value);
    }

    format!("{}", value)
}

/// Scientific notation with a signed, two-digit-minimum exponent (`1.500000e-07`).
fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.*e}", SCIENTIFIC_PRECISION, value);

    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return formatted;
    };

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
}

/// Parse a display string back into a number.
///
/// Only finite values are accepted; the error marker and partial entries
/// such as a lone `.` fail.
pub fn parse_number(display: &str) -> Result<f64, CalcError> {
    display
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CalcError::Parse(display.to_string()))
}
