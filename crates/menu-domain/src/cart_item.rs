use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{option::sum_prices, MenuItemOption};

/// Línea del carrito generada al completar un flujo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub uuid: Uuid,
    pub menu_item_id: String,
    pub name: String,
    /// Precio efectivo (combo o base) sin opciones.
    pub price: f64,
    pub selected_options: Vec<MenuItemOption>,
    pub qty: u32,
    #[serde(default)]
    pub is_combo: bool,
}

impl CartItem {
    /// Precio unitario incluyendo opciones.
    pub fn unit_total(&self) -> f64 {
        self.price + sum_prices(&self.selected_options)
    }

    pub fn line_total(&self) -> f64 {
        self.unit_total() * f64::from(self.qty)
    }

    /// Misma agrupación: mismo producto, mismas opciones (por valor y en el
    /// mismo orden) y mismo flag combo.
    pub fn same_grouping(&self, menu_item_id: &str, selections: &[MenuItemOption], is_combo: bool) -> bool {
        self.menu_item_id == menu_item_id && self.selected_options.as_slice() == selections && self.is_combo == is_combo
    }
}
