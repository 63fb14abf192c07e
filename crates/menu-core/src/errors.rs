//! Errores del motor de flujo.
//!
//! Sólo cubren usos inválidos de la API (sesión cerrada, transición no
//! permitida, índices fuera de rango, ids desconocidos). Las selecciones
//! inválidas y el avance sin selección requerida no son errores: se
//! reportan como resultados inertes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum FlowError {
    #[error("flow session already closed")] SessionClosed,
    #[error("invalid step index {0}")] InvalidStepIndex(usize),
    #[error("action '{action}' not allowed while {phase}")] InvalidTransition { action: String, phase: String },
    #[error("unknown menu item: {0}")] UnknownItem(String),
    #[error("option '{0}' is not offered at this step")] UnknownOption(String),
    #[error("group '{0}' is not a customization group of this item")] UnknownGroup(String),
    #[error("internal: {0}")] Internal(String),
}

impl FlowError {
    pub(crate) fn transition(action: &str, phase: impl std::fmt::Display) -> Self {
        FlowError::InvalidTransition { action: action.to_string(),
                                       phase: phase.to_string() }
    }
}
