//! Historial de selecciones confirmadas.

mod store;

pub use store::{HistoryEntry, SelectionHistory};
