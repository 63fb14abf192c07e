use serde::{Deserialize, Serialize};

use crate::materializer::FlowCompletion;

/// Resultado de `next` / `choose_variation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NextOutcome {
    /// Paso confirmado; ahora está activo `step_index`.
    Advanced { step_index: usize },
    /// Último paso confirmado; la sesión está en revisión.
    Review,
    /// Edición guardada; de vuelta en revisión.
    Saved { step_index: usize },
    /// Falta una selección requerida: no hubo cambios.
    Blocked,
    /// "Add to Order": la sesión quedó cerrada y entrega su selección.
    Completed(FlowCompletion),
}

/// Resultado de `back`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackOutcome {
    Step { step_index: usize },
    Review,
    Closed,
}
