//! menu-core: motor de personalización guiada de productos.
pub mod constants;
pub mod customization;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod history;
pub mod materializer;
pub mod pricing;
pub mod selection;
pub mod session;
pub mod step;

pub use customization::CustomizationDraft;
pub use errors::FlowError;
pub use event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
pub use history::{HistoryEntry, SelectionHistory};
pub use materializer::{CartChange, CartChangeKind, CartMaterializer, FlowCompletion};
pub use pricing::PriceBreakdown;
pub use selection::SelectionOutcome;
pub use session::{BackOutcome, FlowEntry, FlowPhase, FlowSession, NextOutcome, OpenOptions, ReviewLine};
pub use step::{FlowStep, SequenceRequest};
