//! Carrito de la tienda.
//!
//! Dos altas con el mismo producto, las mismas selecciones (por valor y en
//! el mismo orden) y el mismo flag combo se fusionan incrementando la
//! cantidad. Con un contexto de edición activo, la siguiente materialización
//! reemplaza la línea editada en lugar de crear una nueva.
use log::{debug, info, warn};
use menu_core::{CartChange, CartChangeKind, CartMaterializer};
use menu_domain::{CartItem, Catalog, FlowMode, MenuItem, MenuItemOption};
use serde::Serialize;
use uuid::Uuid;

use crate::error::CartError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<CartItem>,
    editing: Option<Uuid>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn line(&self, uuid: Uuid) -> Option<&CartItem> {
        self.lines.iter().find(|l| l.uuid == uuid)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Línea en edición, si la hay.
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    /// Abre la edición de una línea y devuelve su producto de origen. Se
    /// rechaza si el producto ya no existe en el catálogo; la línea no cambia.
    pub fn begin_edit<'c>(&mut self, uuid: Uuid, catalog: &'c Catalog) -> Result<&'c MenuItem, CartError> {
        let line = self.line(uuid).ok_or(CartError::UnknownLine(uuid))?;
        let item = catalog.item(&line.menu_item_id).ok_or_else(|| {
                                                        warn!("edición rechazada: '{}' no está en el catálogo", line.menu_item_id);
                                                        CartError::StaleItem(line.menu_item_id.clone())
                                                    })?;
        self.editing = Some(uuid);
        debug!("editando línea {uuid} ({})", item.id);
        Ok(item)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Ajusta la cantidad; al llegar a 0 la línea se elimina (`Ok(None)`).
    pub fn update_quantity(&mut self, uuid: Uuid, delta: i32) -> Result<Option<&CartItem>, CartError> {
        let pos = self.position(uuid)?;
        let qty = (i64::from(self.lines[pos].qty) + i64::from(delta)).max(0);
        if qty == 0 {
            self.drop_line(pos);
            return Ok(None);
        }
        let line = &mut self.lines[pos];
        line.qty = u32::try_from(qty).unwrap_or(u32::MAX);
        Ok(Some(&*line))
    }

    pub fn remove_item(&mut self, uuid: Uuid) -> Result<CartItem, CartError> {
        let pos = self.position(uuid)?;
        Ok(self.drop_line(pos))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.editing = None;
    }

    /// Σ (precio + Σ opciones) × cantidad.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartItem::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    fn position(&self, uuid: Uuid) -> Result<usize, CartError> {
        self.lines
            .iter()
            .position(|l| l.uuid == uuid)
            .ok_or(CartError::UnknownLine(uuid))
    }

    fn drop_line(&mut self, pos: usize) -> CartItem {
        let line = self.lines.remove(pos);
        if self.editing == Some(line.uuid) {
            self.editing = None;
        }
        debug!("línea {} eliminada", line.uuid);
        line
    }
}

impl CartMaterializer for Cart {
    type Error = CartError;

    fn materialize(&mut self, item: &MenuItem, selections: Vec<MenuItemOption>, is_combo: bool) -> Result<CartChange, CartError> {
        let mode = if is_combo { FlowMode::Combo } else { FlowMode::AlaCarte };
        let price = item.base_price(mode);

        if let Some(uuid) = self.editing.take() {
            let pos = self.position(uuid)?;
            let line = &mut self.lines[pos];
            line.menu_item_id = item.id.clone();
            line.name = item.name.clone();
            line.price = price;
            line.selected_options = selections;
            line.is_combo = is_combo;
            info!("línea {uuid} actualizada ({})", item.id);
            return Ok(CartChange { kind: CartChangeKind::Updated,
                                   line: line.clone() });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.same_grouping(&item.id, &selections, is_combo)) {
            line.qty += 1;
            debug!("línea {} fusionada, qty={}", line.uuid, line.qty);
            return Ok(CartChange { kind: CartChangeKind::Merged,
                                   line: line.clone() });
        }

        let line = CartItem { uuid: Uuid::new_v4(),
                              menu_item_id: item.id.clone(),
                              name: item.name.clone(),
                              price,
                              selected_options: selections,
                              qty: 1,
                              is_combo };
        info!("línea {} agregada ({})", line.uuid, item.id);
        self.lines.push(line.clone());
        Ok(CartChange { kind: CartChangeKind::Added,
                        line })
    }
}

/// Colapsa nombres repetidos: `["Egg", "Egg", "Rye"]` -> `["Egg ×2", "Rye"]`.
/// Conserva el orden de primera aparición.
pub fn grouped_options(line: &CartItem) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for opt in &line.selected_options {
        match counts.iter_mut().find(|(name, _)| *name == opt.name) {
            Some((_, n)) => *n += 1,
            None => counts.push((opt.name.as_str(), 1)),
        }
    }
    counts.into_iter()
          .map(|(name, n)| if n > 1 { format!("{name} ×{n}") } else { name.to_string() })
          .collect()
}
