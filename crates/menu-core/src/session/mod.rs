//! Sesión de personalización guiada.
//!
//! Una `FlowSession` nace al abrir un producto y muere al cerrarse o al
//! entregar su selección al carrito. Todo el estado derivado (modo, producto
//! activo, filtro de carne, lista de pasos) se recalcula desde el historial
//! en cada consulta.

mod flow_session;
mod outcome;
mod phase;
mod review;

pub use flow_session::{FlowEntry, FlowSession, OpenOptions};
pub use outcome::{BackOutcome, NextOutcome};
pub use phase::FlowPhase;
pub use review::ReviewLine;
