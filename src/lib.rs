//! deskcalc: the evaluation core of a button-driven desk calculator.
//!
//! Feed button presses to a [`Calculator`] and read back the display:
//!
//! ```
//! use deskcalc::Calculator;
//!
//! let mut calc = Calculator::new();
//! for label in ["2", "+", "3", "×", "4", "="] {
//!     calc.handle_token(label).unwrap();
//! }
//! assert_eq!(calc.display(), "20");
//! ```

pub mod calculator;
pub mod config;

pub use calculator::{
    Calculator, CalculatorState, DisplaySnapshot, ERROR_MARKER, EngineSettings, Input, Phase,
};
pub use config::Config;
