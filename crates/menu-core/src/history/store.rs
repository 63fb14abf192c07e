//! Registro ordenado de selecciones confirmadas, una entrada por índice de
//! paso.
//!
//! Invariantes:
//! - Las entradas se mantienen ordenadas por `step`.
//! - En avance normal sólo se agrega al final; en edición se reemplaza la
//!   entrada del paso (o se inserta y se reordena si no existía).
use menu_domain::MenuItemOption;
use serde::{Deserialize, Serialize};

use crate::step::FlowStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step: usize,
    /// Token del paso en el momento del commit; fija su posición aunque la
    /// secuencia se recalcule.
    pub token: FlowStep,
    pub selections: Vec<MenuItemOption>,
    /// Producto elegido en un paso `Variation`.
    pub variant: Option<String>,
}

impl HistoryEntry {
    pub fn new(step: usize, token: FlowStep, selections: Vec<MenuItemOption>) -> Self {
        Self { step,
               token,
               selections,
               variant: None }
    }

    pub fn with_variant(mut self, variant: Option<String>) -> Self {
        self.variant = variant;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionHistory {
    entries: Vec<HistoryEntry>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn entry(&self, step: usize) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.step == step)
    }

    /// Registra la selección de un paso. En edición reemplaza la entrada
    /// existente; si no existe se inserta y se reordena por `step`.
    pub fn commit(&mut self, entry: HistoryEntry, editing: bool) {
        if !editing {
            self.entries.push(entry);
            return;
        }
        match self.entries.iter_mut().find(|e| e.step == entry.step) {
            Some(existing) => *existing = entry,
            None => {
                self.entries.push(entry);
                self.entries.sort_by_key(|e| e.step);
            }
        }
    }

    /// Selecciones que cuentan para el precio: todas salvo la del paso en
    /// edición (ese paso se cuenta desde el buffer de trabajo).
    pub fn priceable(&self, editing: Option<usize>) -> impl Iterator<Item = &MenuItemOption> + '_ {
        self.entries
            .iter()
            .filter(move |e| Some(e.step) != editing)
            .flat_map(|e| e.selections.iter())
    }

    /// Todas las selecciones confirmadas, en orden de paso.
    pub fn flatten(&self) -> Vec<MenuItemOption> {
        self.entries.iter().flat_map(|e| e.selections.iter().cloned()).collect()
    }

    /// Trunca a `to_index` entradas.
    pub fn rewind(&mut self, to_index: usize) {
        self.entries.truncate(to_index);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn has_combo_trigger(&self) -> bool {
        self.entries.iter().flat_map(|e| e.selections.iter()).any(|o| o.is_combo_trigger)
    }

    /// Pares (índice, token) de los pasos ya visitados.
    pub fn visited(&self) -> Vec<(usize, FlowStep)> {
        self.entries.iter().map(|e| (e.step, e.token.clone())).collect()
    }

    pub fn position_of(&self, token: &FlowStep) -> Option<usize> {
        self.entries.iter().find(|e| &e.token == token).map(|e| e.step)
    }

    /// Último producto elegido en `Variation`.
    pub fn latest_variant(&self) -> Option<&str> {
        self.entries.iter().rev().find_map(|e| e.variant.as_deref())
    }

    /// Carne elegida en el paso `Meat`.
    pub fn meat_choice(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.token == FlowStep::Meat)
            .find_map(|e| e.selections.first().map(|o| o.name.as_str()))
    }
}
