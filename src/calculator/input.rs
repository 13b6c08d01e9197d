//! Button tokens accepted by the calculator.
//!
//! Maps button labels (and the ASCII spellings a keyboard user would type)
//! onto [`Input`] values, and splits free-form lines into a token stream.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::evaluation::{BinaryOp, ScientificFn};

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Named values that replace the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pi => "π",
        }
    }
}

/// A single button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// A decimal digit. Only 0 through 9 are valid; [`Input::from_label`]
    /// never produces anything else.
    Digit(u8),
    DecimalPoint,
    Constant(Constant),
    BinaryOp(BinaryOp),
    Scientific(ScientificFn),
    Equals,
    Percent,
    Negate,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown token '{0}'")]
    UnknownToken(String),
}

lazy_static! {
    /// Every accepted spelling, keyed in lowercase.
    static ref LABELS: HashMap<&'static str, Input> = {
        let mut labels = HashMap::new();

        for (digit, label) in DIGIT_LABELS.iter().enumerate() {
            labels.insert(*label, Input::Digit(digit as u8));
        }
        labels.insert(".", Input::DecimalPoint);

        labels.insert("π", Input::Constant(Constant::Pi));
        labels.insert("pi", Input::Constant(Constant::Pi));

        labels.insert("+", Input::BinaryOp(BinaryOp::Add));
        labels.insert("−", Input::BinaryOp(BinaryOp::Subtract));
        labels.insert("-", Input::BinaryOp(BinaryOp::Subtract));
        labels.insert("×", Input::BinaryOp(BinaryOp::Multiply));
        labels.insert("*", Input::BinaryOp(BinaryOp::Multiply));
        labels.insert("x", Input::BinaryOp(BinaryOp::Multiply));
        labels.insert("÷", Input::BinaryOp(BinaryOp::Divide));
        labels.insert("/", Input::BinaryOp(BinaryOp::Divide));

        for function in ScientificFn::ALL {
            labels.insert(function.label(), Input::Scientific(function));
        }
        labels.insert("10^x", Input::Scientific(ScientificFn::TenPow));
        labels.insert("e^x", Input::Scientific(ScientificFn::ExpE));
        labels.insert("exp", Input::Scientific(ScientificFn::ExpE));
        labels.insert("abs", Input::Scientific(ScientificFn::Abs));

        labels.insert("=", Input::Equals);
        labels.insert("%", Input::Percent);
        labels.insert("±", Input::Negate);
        labels.insert("+/-", Input::Negate);
        labels.insert("neg", Input::Negate);
        labels.insert("ac", Input::Clear);
        labels.insert("c", Input::Clear);
        labels.insert("clear", Input::Clear);

        labels
    };

    /// Splits a line into labels. Multi-character labels come first so that
    /// `10^x` is not read as `1`, `0`, ... and `cos` is not read as `c`.
    /// Any other non-blank character is captured so it can be reported.
    static ref TOKEN: Regex = Regex::new(
        r"(?i)sin|cos|tan|ln|abs|exp|pi|clear|neg|ac|10ˣ|10\^x|eˣ|e\^x|\|x\||\+/-|[0-9.+\-−*×x/÷=%±πc]|\S"
    ).unwrap();
}

impl Input {
    /// Parse a single button label.
    pub fn from_label(label: &str) -> Result<Self, InputError> {
        let key = label.trim().to_lowercase();
        LABELS
            .get(key.as_str())
            .copied()
            .ok_or_else(|| InputError::UnknownToken(label.to_string()))
    }

    /// The label printed on the button for this input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Digit(digit) => {
                debug_assert!(digit < 10, "digit input out of range: {digit}");
                DIGIT_LABELS[usize::from(digit % 10)]
            }
            Self::DecimalPoint => ".",
            Self::Constant(constant) => constant.label(),
            Self::BinaryOp(BinaryOp::Add) => "+",
            Self::BinaryOp(BinaryOp::Subtract) => "−",
            Self::BinaryOp(BinaryOp::Multiply) => "×",
            Self::BinaryOp(BinaryOp::Divide) => "÷",
            Self::Scientific(function) => function.label(),
            Self::Equals => "=",
            Self::Percent => "%",
            Self::Negate => "±",
            Self::Clear => "AC",
        }
    }
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Split a free-form line such as `12.5 × 3 =` into inputs.
///
/// Whitespace is ignored and numbers are split into one input per digit.
/// The first unrecognised label aborts the whole line.
pub fn tokenize_line(line: &str) -> Result<Vec<Input>, InputError> {
    TOKEN
        .find_iter(line)
        .map(|token| Input::from_label(token.as_str()))
        .collect()
}
