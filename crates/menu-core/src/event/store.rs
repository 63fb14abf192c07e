use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use super::{SessionEvent, SessionEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, session_id: Uuid, kind: SessionEventKind) -> SessionEvent;
    /// Lista eventos de una sesión (orden ascendente por seq).
    fn list(&self, session_id: Uuid) -> Vec<SessionEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<SessionEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: SessionEventKind) -> SessionEvent {
        let vec = self.inner.entry(session_id).or_default();
        let seq = vec.len() as u64;
        let ev = SessionEvent { seq,
                                session_id,
                                kind,
                                ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, session_id: Uuid) -> Vec<SessionEvent> {
        self.inner.get(&session_id).cloned().unwrap_or_default()
    }
}
