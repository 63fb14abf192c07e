//! Cola única de actualizaciones de la tienda.
//!
//! `Storefront` es dueño del carrito y de, a lo sumo, una `FlowSession`
//! activa. Toda mutación llega como un `Action` y se procesa completa antes
//! de aceptar la siguiente.
use log::{debug, info};
use menu_cart::{grouped_options, Cart};
use menu_core::step::{compute_steps, SequenceRequest};
use menu_core::{BackOutcome, CartChange, FlowEntry, FlowError, FlowSession, FlowStep, NextOutcome, OpenOptions, SelectionOutcome};
use menu_domain::{Catalog, FlowMode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Opción a marcar en el sub-editor de personalización.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationPick {
    pub group_id: String,
    pub option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Open {
        item_id: String,
        #[serde(default)]
        force_modal: bool,
    },
    Toggle { option: String },
    Increment { option: String },
    Decrement { option: String },
    ChooseVariation {
        #[serde(default)]
        item_id: Option<String>,
    },
    Next,
    Back,
    JumpToStep { index: usize },
    /// Arma una personalización con las opciones dadas y la aplica.
    Customize {
        #[serde(default)]
        picks: Vec<CustomizationPick>,
    },
    Close,
    EditCartLine { uuid: Uuid },
    UpdateQuantity { uuid: Uuid, delta: i32 },
    RemoveItem { uuid: Uuid },
}

/// Efecto de un `Action` ya procesado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Dispatched {
    Opened { item_id: String, step_count: usize },
    Selection(SelectionOutcome),
    Next(NextOutcome),
    Back(BackOutcome),
    EditStarted { step_index: usize },
    Customized { name: String, price: f64 },
    Closed,
    CartChanged(CartChange),
    QuantityChanged { uuid: Uuid, qty: u32 },
    Removed { uuid: Uuid },
}

#[derive(Debug)]
pub struct Storefront<'c> {
    catalog: &'c Catalog,
    cart: Cart,
    session: Option<FlowSession<'c>>,
}

impl<'c> Storefront<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog,
               cart: Cart::new(),
               session: None }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn session(&self) -> Option<&FlowSession<'c>> {
        self.session.as_ref()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Dispatched, AppError> {
        debug!("dispatch: {:?}", action);
        match action {
            Action::Open { item_id, force_modal } => {
                self.cart.cancel_edit();
                self.open_item(&item_id, force_modal)
            }
            Action::EditCartLine { uuid } => {
                let item = self.cart.begin_edit(uuid, self.catalog)?;
                let item_id = item.id.clone();
                let opened = self.open_item(&item_id, true);
                if opened.is_err() {
                    self.cart.cancel_edit();
                }
                opened
            }
            Action::Toggle { option } => Ok(Dispatched::Selection(self.active()?.toggle(&option)?)),
            Action::Increment { option } => Ok(Dispatched::Selection(self.active()?.increment(&option)?)),
            Action::Decrement { option } => Ok(Dispatched::Selection(self.active()?.decrement(&option)?)),
            Action::ChooseVariation { item_id } => {
                let outcome = self.active()?.choose_variation(item_id.as_deref())?;
                self.settle(outcome)
            }
            Action::Next => {
                let outcome = self.active()?.next()?;
                self.settle(outcome)
            }
            Action::Back => {
                let outcome = self.active()?.back()?;
                if outcome == BackOutcome::Closed {
                    self.drop_session();
                }
                Ok(Dispatched::Back(outcome))
            }
            Action::JumpToStep { index } => {
                self.active()?.jump_to_step(index)?;
                Ok(Dispatched::EditStarted { step_index: index })
            }
            Action::Customize { picks } => self.customize(&picks),
            Action::Close => {
                if let Some(session) = self.session.as_mut() {
                    session.close();
                }
                self.drop_session();
                Ok(Dispatched::Closed)
            }
            Action::UpdateQuantity { uuid, delta } => {
                let qty = self.cart.update_quantity(uuid, delta)?.map_or(0, |l| l.qty);
                Ok(Dispatched::QuantityChanged { uuid, qty })
            }
            Action::RemoveItem { uuid } => {
                self.cart.remove_item(uuid)?;
                Ok(Dispatched::Removed { uuid })
            }
        }
    }

    /// Procesa una lista de acciones en orden; se detiene en el primer error.
    pub fn run_script<I>(&mut self, actions: I) -> Result<Vec<Dispatched>, AppError>
        where I: IntoIterator<Item = Action>
    {
        actions.into_iter().map(|a| self.dispatch(a)).collect()
    }

    fn active(&mut self) -> Result<&mut FlowSession<'c>, AppError> {
        self.session.as_mut().ok_or(AppError::NoActiveFlow)
    }

    fn open_item(&mut self, item_id: &str, force_modal: bool) -> Result<Dispatched, AppError> {
        if let Some(mut previous) = self.session.take() {
            previous.close();
        }
        let opts = OpenOptions { force_modal,
                                 ..OpenOptions::default() };
        match FlowSession::open(self.catalog, item_id, opts)? {
            FlowEntry::DirectAdd(completion) => Ok(Dispatched::CartChanged(completion.materialize_into(&mut self.cart)?)),
            FlowEntry::Flow(session) => {
                let step_count = session.steps().len();
                self.session = Some(session);
                Ok(Dispatched::Opened { item_id: item_id.to_string(),
                                        step_count })
            }
        }
    }

    fn settle(&mut self, outcome: NextOutcome) -> Result<Dispatched, AppError> {
        match outcome {
            NextOutcome::Completed(completion) => {
                self.session = None;
                let change = completion.materialize_into(&mut self.cart)?;
                info!("carrito: {:?} {} (qty {})", change.kind, change.line.name, change.line.qty);
                Ok(Dispatched::CartChanged(change))
            }
            other => Ok(Dispatched::Next(other)),
        }
    }

    fn customize(&mut self, picks: &[CustomizationPick]) -> Result<Dispatched, AppError> {
        let session = self.active()?;
        let mut draft = session.customization_draft()?;
        for pick in picks {
            let by_quantity = draft.groups()
                                   .iter()
                                   .find(|g| g.id == pick.group_id)
                                   .is_some_and(|g| g.allow_quantity);
            if by_quantity {
                draft.increment(&pick.group_id, &pick.option)?;
            } else {
                draft.toggle(&pick.group_id, &pick.option)?;
            }
        }
        let addon = draft.finish();
        let (name, price) = (addon.name.clone(), addon.price);
        session.apply_customization(addon)?;
        Ok(Dispatched::Customized { name, price })
    }

    fn drop_session(&mut self) {
        self.session = None;
        self.cart.cancel_edit();
    }
}

/// Lista de pasos que vería un cliente al abrir `item_id` en `mode`.
pub fn preview_steps(catalog: &Catalog, item_id: &str, mode: FlowMode) -> Result<Vec<FlowStep>, AppError> {
    let item = catalog.item(item_id).ok_or_else(|| FlowError::UnknownItem(item_id.to_string()))?;
    let flow_group = catalog.flow_group_for(item);
    let req = SequenceRequest { item,
                                mode,
                                flow_group,
                                meat_preset: flow_group.is_some() && item.meat_filter().is_some() };
    Ok(compute_steps(catalog, &req))
}

/// Resumen legible del carrito.
pub fn render_cart(cart: &Cart, config: &AppConfig) -> String {
    let mut out = String::new();
    for line in cart.lines() {
        let combo = if line.is_combo { " [combo]" } else { "" };
        out.push_str(&format!("{} x {}{}  {}\n", line.qty, line.name, combo, config.format_price(line.line_total())));
        let options = grouped_options(line);
        if !options.is_empty() {
            out.push_str(&format!("    {}\n", options.join(", ")));
        }
    }
    out.push_str(&format!("Total: {}", config.format_price(cart.total())));
    out
}
