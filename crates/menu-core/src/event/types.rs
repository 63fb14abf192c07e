//! Tipos de evento de una sesión de personalización.
//!
//! Cada transición de `FlowSession` emite un evento a un `EventStore`
//! append-only. Los eventos son sólo auditoría: el estado vive en la sesión
//! y nunca se reconstruye desde aquí.
use chrono::{DateTime, Utc};
use menu_domain::FlowMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::step::FlowStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// Primer evento de la sesión. Fija producto, modo inicial y lista de pasos.
    FlowOpened {
        item_id: String,
        mode: FlowMode,
        step_count: usize,
        sequence_hash: String,
    },
    /// Un paso quedó registrado en el historial (avance normal).
    StepCommitted { step_index: usize, step: FlowStep, selection_count: usize },
    /// La lista de pasos cambió tras un commit (cambio de modo o de producto).
    StepsRecomputed { step_count: usize, sequence_hash: String },
    /// El modo pasó a combo.
    ComboActivated { step_index: usize },
    /// Back: historial truncado a `to_index` entradas.
    StepRewound { to_index: usize },
    ReviewReached,
    EditStarted { step_index: usize },
    EditSaved { step_index: usize },
    EditCancelled { step_index: usize },
    CustomizationApplied { name: String, price: f64 },
    /// Cierre exitoso: la selección final se entregó al carrito.
    FlowCompleted { item_id: String, selection_count: usize, is_combo: bool },
    /// Cierre sin pedido (close o back desde el primer paso).
    FlowClosed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub session_id: Uuid,
    pub kind: SessionEventKind,
    pub ts: DateTime<Utc>, // metadato, no participa en la lógica
}
