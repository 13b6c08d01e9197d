//! Desk-calculator core.
//!
//! This module provides:
//! - Button tokens and line tokenizing ([`Input`], [`tokenize_line`])
//! - The input-driven state machine ([`Calculator`])
//! - Numeric folding, scientific functions and display formatting
//! - Copying the display to the clipboard

mod clipboard;
mod display;
pub mod evaluation;
mod input;
mod state;

pub use clipboard::copy_display;
pub use display::DisplaySnapshot;
pub use evaluation::{
    AngleUnit, BinaryOp, CalcError, ERROR_MARKER, EngineSettings, ScientificFn, apply_scientific,
    fold, format_number, parse_number,
};
pub use input::{Constant, Input, InputError, tokenize_line};
pub use state::{Calculator, CalculatorState, Phase};
