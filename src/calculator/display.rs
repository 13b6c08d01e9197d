//! A point-in-time view of the calculator display.

use serde::Serialize;

use super::state::{Calculator, Phase};

/// What a rendering layer needs to draw the display after an input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    /// The display string, or the error marker.
    pub display: String,
    /// Whether the display shows the error marker.
    pub is_error: bool,
    pub phase: Phase,
    /// The pending operator, once one has been chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_operator: Option<char>,
}

impl DisplaySnapshot {
    pub fn capture(calc: &Calculator) -> Self {
        let phase = calc.phase();
        let pending_operator = match phase {
            Phase::PendingOperator => Some(calc.state().pending_operator.symbol()),
            _ => None,
        };

        Self {
            display: calc.display().to_string(),
            is_error: phase == Phase::Error,
            phase,
            pending_operator,
        }
    }

    /// Text to put on the clipboard. Errors yield nothing.
    pub fn clipboard(&self) -> Option<&str> {
        if self.is_error {
            None
        } else {
            Some(self.display.as_str())
        }
    }
}
