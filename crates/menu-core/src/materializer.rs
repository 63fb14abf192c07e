//! Frontera con el carrito.
//!
//! El motor no conoce la implementación del carrito: al completar un flujo
//! entrega un `FlowCompletion` que cualquier `CartMaterializer` convierte en
//! una línea (nueva, fusionada o editada en sitio).
use menu_domain::{CartItem, MenuItem, MenuItemOption};
use serde::{Deserialize, Serialize};

/// Resultado final de una sesión lista para el carrito.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCompletion {
    pub item: MenuItem,
    pub selections: Vec<MenuItemOption>,
    pub is_combo: bool,
}

impl FlowCompletion {
    pub fn new(item: MenuItem, selections: Vec<MenuItemOption>, is_combo: bool) -> Self {
        Self { item,
               selections,
               is_combo }
    }

    /// Entrega la selección al carrito.
    pub fn materialize_into<M: CartMaterializer>(self, cart: &mut M) -> Result<CartChange, M::Error> {
        cart.materialize(&self.item, self.selections, self.is_combo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartChangeKind {
    /// Nueva línea con cantidad 1.
    Added,
    /// Línea existente idéntica: cantidad incrementada.
    Merged,
    /// Línea en edición actualizada en sitio.
    Updated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartChange {
    pub kind: CartChangeKind,
    pub line: CartItem,
}

/// Contrato del componente carrito.
pub trait CartMaterializer {
    type Error: std::error::Error;

    fn materialize(&mut self, item: &MenuItem, selections: Vec<MenuItemOption>, is_combo: bool) -> Result<CartChange, Self::Error>;
}
