use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado de la máquina de flujo.
///
/// Transiciones válidas:
/// - `StepActive(i)` -> `StepActive(i+1)` | `Review` (next)
/// - `StepActive(i)` -> `StepActive(i-1)` | `Closed` (back)
/// - `Review` -> `EditingStep(i)` (jump) | `Closed` (add to order)
/// - `EditingStep(i)` -> `Review` (save o cancel)
/// - cualquiera -> `Closed` (close)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowPhase {
    StepActive { index: usize },
    Review,
    EditingStep { index: usize },
    Closed,
}

impl FlowPhase {
    /// Índice del paso en pantalla, si hay uno.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            FlowPhase::StepActive { index } | FlowPhase::EditingStep { index } => Some(*index),
            FlowPhase::Review | FlowPhase::Closed => None,
        }
    }

    pub fn editing_index(&self) -> Option<usize> {
        match self {
            FlowPhase::EditingStep { index } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowPhase::StepActive { index } => write!(f, "step {index} active"),
            FlowPhase::Review => f.write_str("in review"),
            FlowPhase::EditingStep { index } => write!(f, "editing step {index}"),
            FlowPhase::Closed => f.write_str("closed"),
        }
    }
}
