//! Cálculo del total en curso.
//!
//! `total = base(modo, producto) + Σ historial cotizable + Σ buffer`.
//!
//! El precio combo se aplica si el modo ya es combo **o** si cualquier
//! selección (confirmada o en el buffer) es disparadora de combo, aunque el
//! modo todavía no se haya actualizado.
use menu_domain::{sum_prices, FlowMode, MenuItem, MenuItemOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base: f64,
    pub committed: f64,
    pub working: f64,
    /// Modo efectivo usado para el precio base.
    pub effective_mode: FlowMode,
}

impl PriceBreakdown {
    pub fn total(&self) -> f64 {
        self.base + self.committed + self.working
    }
}

pub fn calculate<'a, I>(item: &MenuItem, mode: FlowMode, committed: I, working: &[MenuItemOption]) -> PriceBreakdown
    where I: IntoIterator<Item = &'a MenuItemOption>
{
    let committed: Vec<&MenuItemOption> = committed.into_iter().collect();
    let has_trigger = committed.iter().any(|o| o.is_combo_trigger) || working.iter().any(|o| o.is_combo_trigger);
    let effective_mode = if mode == FlowMode::Combo || has_trigger { FlowMode::Combo } else { FlowMode::AlaCarte };
    PriceBreakdown { base: item.base_price(effective_mode),
                     committed: sum_prices(committed),
                     working: sum_prices(working),
                     effective_mode }
}
