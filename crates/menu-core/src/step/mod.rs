//! Pasos del flujo guiado.
//!
//! Un paso se identifica por un token (`Meat`, `Variation`, `Addon` o el id de
//! un `OptionGroup`). La secuencia de tokens no es fija: se recalcula desde el
//! catálogo, el producto activo y el modo cada vez que se consulta.

mod sequencer;
mod token;

pub use sequencer::{compute_steps, merge_visited, sequence_hash, SequenceRequest};
pub use token::FlowStep;
