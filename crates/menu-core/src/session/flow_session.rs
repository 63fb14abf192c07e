use log::{debug, info, warn};
use menu_domain::{Catalog, FlowGroup, FlowMode, MenuItem, MenuItemOption};
use uuid::Uuid;

use super::{BackOutcome, FlowPhase, NextOutcome, ReviewLine};
use crate::constants::{SUMMARY_NONE, SUMMARY_REQUIRED};
use crate::customization::CustomizationDraft;
use crate::errors::FlowError;
use crate::event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
use crate::history::{HistoryEntry, SelectionHistory};
use crate::materializer::FlowCompletion;
use crate::pricing::{self, PriceBreakdown};
use crate::selection::{self, SelectionOutcome, SelectionRules};
use crate::step::{compute_steps, merge_visited, sequence_hash, FlowStep, SequenceRequest};

/// Parámetros de apertura.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOptions {
    /// Abre el modal aunque el producto no tenga nada que elegir.
    pub force_modal: bool,
    /// Modo inicial de la sesión.
    pub mode: FlowMode,
}

/// Resultado de seleccionar un producto.
#[derive(Debug)]
pub enum FlowEntry<'c, E: EventStore = InMemoryEventStore> {
    Flow(FlowSession<'c, E>),
    /// Sin pasos ni personalización: va directo al carrito.
    DirectAdd(FlowCompletion),
}

impl<'c, E: EventStore> FlowEntry<'c, E> {
    pub fn into_session(self) -> Option<FlowSession<'c, E>> {
        match self {
            FlowEntry::Flow(session) => Some(session),
            FlowEntry::DirectAdd(_) => None,
        }
    }
}

/// Máquina de estados de personalización de un producto.
///
/// Mantiene `history.len() == índice de paso` mientras hay un paso activo.
/// El modo, el producto activo, el filtro de carne y la lista de pasos se
/// derivan del historial en cada consulta, de modo que editar o retroceder
/// nunca deja estado residual.
#[derive(Debug)]
pub struct FlowSession<'c, E: EventStore = InMemoryEventStore> {
    id: Uuid,
    catalog: &'c Catalog,
    item: &'c MenuItem,
    flow_group: Option<&'c FlowGroup>,
    initial_mode: FlowMode,
    phase: FlowPhase,
    history: SelectionHistory,
    working: Vec<MenuItemOption>,
    customization: Option<MenuItemOption>,
    events: E,
}

impl<'c> FlowSession<'c, InMemoryEventStore> {
    pub fn open(catalog: &'c Catalog, item_id: &str, opts: OpenOptions) -> Result<FlowEntry<'c>, FlowError> {
        Self::open_with_store(catalog, item_id, opts, InMemoryEventStore::default())
    }
}

impl<'c, E: EventStore> FlowSession<'c, E> {
    pub fn open_with_store(catalog: &'c Catalog, item_id: &str, opts: OpenOptions, events: E) -> Result<FlowEntry<'c, E>, FlowError> {
        let item = catalog.item(item_id).ok_or_else(|| FlowError::UnknownItem(item_id.to_string()))?;
        let flow_group = catalog.flow_group_for(item);
        for gid in catalog.missing_groups(item) {
            warn!("open: grupo enlazado '{}' no existe (producto {}); se omite", gid, item.id);
        }
        let mut session = Self { id: Uuid::new_v4(),
                                 catalog,
                                 item,
                                 flow_group,
                                 initial_mode: opts.mode,
                                 phase: FlowPhase::StepActive { index: 0 },
                                 history: SelectionHistory::new(),
                                 working: Vec::new(),
                                 customization: None,
                                 events };

        if flow_group.is_none() && !opts.force_modal {
            let nothing_to_choose = session.computed_steps().is_empty() && catalog.customization_groups(item).next().is_none();
            if nothing_to_choose {
                debug!("open: '{}' sin opciones, alta directa", item.id);
                return Ok(FlowEntry::DirectAdd(FlowCompletion::new(item.clone(), Vec::new(), opts.mode == FlowMode::Combo)));
            }
        }

        let steps = session.steps();
        info!("open: flujo '{}' ({} pasos, flow group: {})",
              item.id,
              steps.len(),
              flow_group.map_or("-", |fg| fg.id.as_str()));
        session.record(SessionEventKind::FlowOpened { item_id: item.id.clone(),
                                                      mode: opts.mode,
                                                      step_count: steps.len(),
                                                      sequence_hash: sequence_hash(&steps) });
        session.preselect();
        Ok(FlowEntry::Flow(session))
    }

    // ---------------------------------------------------------------------
    // Consultas
    // ---------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == FlowPhase::Closed
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    pub fn working(&self) -> &[MenuItemOption] {
        &self.working
    }

    pub fn customization(&self) -> Option<&MenuItemOption> {
        self.customization.as_ref()
    }

    pub fn flow_group(&self) -> Option<&'c FlowGroup> {
        self.flow_group
    }

    /// Producto con el que se abrió la sesión.
    pub fn original_item(&self) -> &'c MenuItem {
        self.item
    }

    /// Producto activo: la última variación confirmada o el original.
    pub fn current_item(&self) -> &'c MenuItem {
        self.history
            .latest_variant()
            .and_then(|id| self.catalog.item(id))
            .unwrap_or(self.item)
    }

    pub fn mode(&self) -> FlowMode {
        self.derived_mode(None)
    }

    /// Modo según el historial, ignorando opcionalmente la entrada de un paso.
    fn derived_mode(&self, skip: Option<usize>) -> FlowMode {
        let triggered = self.history.priceable(skip).any(|o| o.is_combo_trigger);
        if self.initial_mode == FlowMode::Combo || triggered || self.variation_combo() {
            FlowMode::Combo
        } else {
            FlowMode::AlaCarte
        }
    }

    fn variation_combo(&self) -> bool {
        self.flow_group.is_some_and(|fg| fg.enable_combo_option) && self.history.position_of(&FlowStep::Variation).is_some()
    }

    /// Filtro de carne vigente: la elección del paso `Meat` o el preset del
    /// producto si la sesión la abrió un flow group.
    pub fn meat_filter(&self) -> Option<&str> {
        self.history
            .meat_choice()
            .or_else(|| self.flow_group.and_then(|_| self.item.meat_filter()))
    }

    fn computed_steps(&self) -> Vec<FlowStep> {
        let req = SequenceRequest { item: self.current_item(),
                                    mode: self.mode(),
                                    flow_group: self.flow_group,
                                    meat_preset: self.item.meat_filter().is_some() };
        compute_steps(self.catalog, &req)
    }

    /// Lista efectiva de pasos: visitados en su posición + secuencia recalculada.
    pub fn steps(&self) -> Vec<FlowStep> {
        let mut steps = merge_visited(&self.history.visited(), self.computed_steps());
        if self.variation_combo() {
            if let Some(pos) = self.history.position_of(&FlowStep::Variation) {
                if steps.len() == pos + 1 {
                    steps.push(FlowStep::Addon);
                }
            }
        }
        if steps.is_empty() {
            steps.push(FlowStep::Addon);
        }
        steps
    }

    pub fn step_index(&self) -> Option<usize> {
        self.phase.step_index()
    }

    pub fn current_step(&self) -> Option<FlowStep> {
        self.step_index().and_then(|i| self.steps().get(i).cloned())
    }

    fn rules_for(&self, step: &FlowStep) -> SelectionRules {
        match step {
            FlowStep::Group(id) => self.catalog.group(id).map(SelectionRules::for_group).unwrap_or_default(),
            FlowStep::Meat => SelectionRules::single_required(),
            FlowStep::Addon | FlowStep::Variation => SelectionRules::unlimited(),
        }
    }

    /// Opciones ofrecidas en el paso activo.
    pub fn candidates(&self) -> Vec<MenuItemOption> {
        match self.current_step() {
            Some(FlowStep::Group(id)) => self.catalog.group(&id).map(|g| g.options.clone()).unwrap_or_default(),
            Some(FlowStep::Addon) => {
                let item = self.current_item();
                item.options
                    .iter()
                    .chain(self.catalog
                               .linked_groups(item)
                               .filter(|g| !g.is_customization)
                               .flat_map(|g| g.options.iter()))
                    .filter(|o| o.is_addon())
                    .cloned()
                    .collect()
            }
            Some(FlowStep::Meat) => self.catalog.meat_options(),
            Some(FlowStep::Variation) | None => Vec::new(),
        }
    }

    /// Alternativas del paso `Variation`.
    pub fn variation_candidates(&self) -> Vec<&'c MenuItem> {
        self.catalog.variations(self.current_item(), self.meat_filter())
    }

    /// `false` si el paso activo es requerido y el buffer está vacío.
    pub fn can_advance(&self) -> bool {
        match self.current_step() {
            Some(step) => !(self.rules_for(&step).required && self.working.is_empty()),
            None => !self.is_closed(),
        }
    }

    /// Primer paso requerido sin selección confirmada.
    pub fn missing_required(&self) -> Option<usize> {
        self.steps().iter().enumerate().find_map(|(index, step)| {
                                          let empty = self.history.entry(index).map_or(true, |e| e.selections.is_empty());
                                          (self.rules_for(step).required && empty).then_some(index)
                                      })
    }

    pub fn pricing(&self) -> PriceBreakdown {
        let editing = self.phase.editing_index();
        let committed = self.history.priceable(editing).chain(self.customization.iter());
        pricing::calculate(self.current_item(), self.derived_mode(editing), committed, &self.working)
    }

    pub fn total(&self) -> f64 {
        self.pricing().total()
    }

    /// Selecciones confirmadas en orden de paso, más la personalización de
    /// revisión si la hay.
    pub fn flatten(&self) -> Vec<MenuItemOption> {
        let mut out = self.history.flatten();
        out.extend(self.customization.iter().cloned());
        out
    }

    pub fn review_lines(&self) -> Vec<ReviewLine> {
        self.steps()
            .iter()
            .enumerate()
            .filter_map(|(index, step)| {
                let group = self.catalog.group(step.group_id()?)?;
                if group.is_customization {
                    return None;
                }
                let selections = self.history.entry(index).map(|e| e.selections.clone()).unwrap_or_default();
                let summary = if !selections.is_empty() {
                    selections.iter().map(|o| o.name.as_str()).collect::<Vec<_>>().join(", ")
                } else if group.is_required {
                    SUMMARY_REQUIRED.to_string()
                } else {
                    SUMMARY_NONE.to_string()
                };
                Some(ReviewLine { step_index: index,
                                  group_id: group.id.clone(),
                                  group_name: group.name.clone(),
                                  selections,
                                  summary })
            })
            .collect()
    }

    pub fn count_of(&self, option: &str) -> usize {
        selection::count_of(&self.working, option)
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.list(self.id)
    }

    /// Códigos compactos de los eventos emitidos, en orden.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                SessionEventKind::FlowOpened { .. } => "O",
                SessionEventKind::StepCommitted { .. } => "S",
                SessionEventKind::StepsRecomputed { .. } => "R",
                SessionEventKind::ComboActivated { .. } => "K",
                SessionEventKind::StepRewound { .. } => "B",
                SessionEventKind::ReviewReached => "V",
                SessionEventKind::EditStarted { .. } => "E",
                SessionEventKind::EditSaved { .. } => "W",
                SessionEventKind::EditCancelled { .. } => "X",
                SessionEventKind::CustomizationApplied { .. } => "U",
                SessionEventKind::FlowCompleted { .. } => "C",
                SessionEventKind::FlowClosed => "Z",
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Selección
    // ---------------------------------------------------------------------

    /// Paso activo (o en edición) sobre el que opera el buffer.
    fn active_step(&self, action: &str) -> Result<(usize, FlowStep), FlowError> {
        let index = match self.phase {
            FlowPhase::Closed => return Err(FlowError::SessionClosed),
            FlowPhase::Review => return Err(FlowError::transition(action, self.phase)),
            FlowPhase::StepActive { index } | FlowPhase::EditingStep { index } => index,
        };
        let step = self.steps()
                       .get(index)
                       .cloned()
                       .ok_or_else(|| FlowError::Internal(format!("no step at index {index}")))?;
        Ok((index, step))
    }

    fn lookup(&self, action: &str, name: &str) -> Result<(MenuItemOption, SelectionRules), FlowError> {
        let (_, step) = self.active_step(action)?;
        let option = self.candidates()
                         .into_iter()
                         .find(|o| o.name == name)
                         .ok_or_else(|| FlowError::UnknownOption(name.to_string()))?;
        Ok((option, self.rules_for(&step)))
    }

    pub fn toggle(&mut self, option: &str) -> Result<SelectionOutcome, FlowError> {
        let (option, rules) = self.lookup("toggle", option)?;
        Ok(selection::toggle(&mut self.working, &option, &rules))
    }

    pub fn increment(&mut self, option: &str) -> Result<SelectionOutcome, FlowError> {
        let (option, rules) = self.lookup("increment", option)?;
        Ok(selection::increment(&mut self.working, &option, &rules))
    }

    pub fn decrement(&mut self, option: &str) -> Result<SelectionOutcome, FlowError> {
        let (option, _) = self.lookup("decrement", option)?;
        Ok(selection::decrement(&mut self.working, &option))
    }

    /// Sub-editor de personalización para el producto activo.
    pub fn customization_draft(&self) -> Result<CustomizationDraft<'c>, FlowError> {
        if self.is_closed() {
            return Err(FlowError::SessionClosed);
        }
        Ok(CustomizationDraft::open(self.catalog, self.current_item()))
    }

    /// Incorpora el addon sintético de un `CustomizationDraft`.
    ///
    /// En revisión ocupa su propio lugar y reemplaza al anterior. Con un paso
    /// activo se suma al buffer sin contar contra `max_selection`; no es un
    /// candidato del paso, así que `toggle`/`decrement` no lo quitan, y una
    /// elección única posterior reemplaza el buffer completo y lo descarta.
    pub fn apply_customization(&mut self, option: MenuItemOption) -> Result<(), FlowError> {
        let kind = SessionEventKind::CustomizationApplied { name: option.name.clone(),
                                                            price: option.price };
        match self.phase {
            FlowPhase::Closed => return Err(FlowError::SessionClosed),
            FlowPhase::Review => self.customization = Some(option),
            FlowPhase::StepActive { .. } | FlowPhase::EditingStep { .. } => self.working.push(option),
        }
        self.record(kind);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Transiciones
    // ---------------------------------------------------------------------

    pub fn next(&mut self) -> Result<NextOutcome, FlowError> {
        match self.phase {
            FlowPhase::Closed => Err(FlowError::SessionClosed),
            FlowPhase::Review => Ok(self.complete()),
            FlowPhase::StepActive { index } => self.advance(index, None),
            FlowPhase::EditingStep { index } => self.save_edit(index, None),
        }
    }

    /// Confirma el paso `Variation` con la alternativa elegida (`None`
    /// mantiene el producto activo) y avanza.
    pub fn choose_variation(&mut self, item_id: Option<&str>) -> Result<NextOutcome, FlowError> {
        let (index, step) = self.active_step("choose_variation")?;
        if step != FlowStep::Variation {
            return Err(FlowError::transition("choose_variation", format!("{} on {step}", self.phase)));
        }
        let variant = match item_id {
            None => None,
            Some(id) => {
                let known = id == self.item.id || id == self.current_item().id || self.variation_candidates().iter().any(|i| i.id == id);
                if !known {
                    return Err(FlowError::UnknownItem(id.to_string()));
                }
                Some(id.to_string())
            }
        };
        self.working.clear();
        match self.phase {
            FlowPhase::EditingStep { .. } => self.save_edit(index, variant),
            _ => self.advance(index, variant),
        }
    }

    fn advance(&mut self, index: usize, variant: Option<String>) -> Result<NextOutcome, FlowError> {
        let steps_before = self.steps();
        let token = steps_before.get(index)
                                .cloned()
                                .ok_or_else(|| FlowError::Internal(format!("no step at index {index}")))?;
        if !self.can_advance() {
            debug!("next: paso {index} ({token}) requiere una selección");
            return Ok(NextOutcome::Blocked);
        }
        let mode_before = self.mode();
        let selections = std::mem::take(&mut self.working);
        let selection_count = selections.len();
        self.history
            .commit(HistoryEntry::new(index, token.clone(), selections).with_variant(variant), false);
        self.record(SessionEventKind::StepCommitted { step_index: index,
                                                      step: token,
                                                      selection_count });
        let steps = self.after_commit(index, mode_before, &steps_before);

        if index + 1 < steps.len() {
            self.phase = FlowPhase::StepActive { index: index + 1 };
            self.preselect();
            Ok(NextOutcome::Advanced { step_index: index + 1 })
        } else {
            self.phase = FlowPhase::Review;
            self.record(SessionEventKind::ReviewReached);
            Ok(NextOutcome::Review)
        }
    }

    fn save_edit(&mut self, index: usize, variant: Option<String>) -> Result<NextOutcome, FlowError> {
        if !self.can_advance() {
            return Ok(NextOutcome::Blocked);
        }
        let steps_before = self.steps();
        let token = steps_before.get(index)
                                .cloned()
                                .ok_or(FlowError::InvalidStepIndex(index))?;
        let variant = variant.or_else(|| self.history.entry(index).and_then(|e| e.variant.clone()));
        let mode_before = self.mode();
        let selections = std::mem::take(&mut self.working);
        self.history
            .commit(HistoryEntry::new(index, token, selections).with_variant(variant), true);
        self.record(SessionEventKind::EditSaved { step_index: index });
        self.after_commit(index, mode_before, &steps_before);
        self.phase = FlowPhase::Review;
        Ok(NextOutcome::Saved { step_index: index })
    }

    /// Registra el cambio de modo y la recomputación de pasos tras un commit.
    fn after_commit(&mut self, index: usize, mode_before: FlowMode, steps_before: &[FlowStep]) -> Vec<FlowStep> {
        let mode = self.mode();
        if mode != mode_before {
            debug!("modo {:?} -> {:?} tras el paso {index}", mode_before, mode);
            if mode == FlowMode::Combo {
                self.record(SessionEventKind::ComboActivated { step_index: index });
            }
        }
        let steps = self.steps();
        if steps != steps_before {
            self.record(SessionEventKind::StepsRecomputed { step_count: steps.len(),
                                                            sequence_hash: sequence_hash(&steps) });
        }
        steps
    }

    fn complete(&mut self) -> NextOutcome {
        if let Some(index) = self.missing_required() {
            debug!("add to order bloqueado: paso {index} requerido sin selección");
            return NextOutcome::Blocked;
        }
        let completion = FlowCompletion::new(self.current_item().clone(), self.flatten(), self.mode() == FlowMode::Combo);
        info!("flujo '{}' completado: {} selecciones, combo={}",
              completion.item.id,
              completion.selections.len(),
              completion.is_combo);
        self.record(SessionEventKind::FlowCompleted { item_id: completion.item.id.clone(),
                                                      selection_count: completion.selections.len(),
                                                      is_combo: completion.is_combo });
        self.reset();
        NextOutcome::Completed(completion)
    }

    pub fn back(&mut self) -> Result<BackOutcome, FlowError> {
        match self.phase {
            FlowPhase::Closed => Err(FlowError::SessionClosed),
            FlowPhase::EditingStep { index } => {
                self.working.clear();
                self.phase = FlowPhase::Review;
                self.record(SessionEventKind::EditCancelled { step_index: index });
                Ok(BackOutcome::Review)
            }
            FlowPhase::Review => {
                let last = self.history.pop();
                let index = self.history.len();
                self.working = last.filter(|e| e.step == index)
                                   .map(|e| e.selections)
                                   .unwrap_or_default();
                self.phase = FlowPhase::StepActive { index };
                self.record(SessionEventKind::StepRewound { to_index: index });
                self.preselect();
                Ok(BackOutcome::Step { step_index: index })
            }
            FlowPhase::StepActive { index: 0 } => {
                self.close();
                Ok(BackOutcome::Closed)
            }
            FlowPhase::StepActive { index } => {
                let to = index - 1;
                self.history.rewind(to);
                self.working.clear();
                self.phase = FlowPhase::StepActive { index: to };
                self.record(SessionEventKind::StepRewound { to_index: to });
                self.preselect();
                Ok(BackOutcome::Step { step_index: to })
            }
        }
    }

    /// "Change" desde revisión: edita el paso `index` con su selección previa.
    ///
    /// Sólo se aceptan pasos ya visitados o el primero sin visitar: el
    /// historial no puede quedar con huecos.
    pub fn jump_to_step(&mut self, index: usize) -> Result<(), FlowError> {
        match self.phase {
            FlowPhase::Review => {}
            FlowPhase::Closed => return Err(FlowError::SessionClosed),
            phase => return Err(FlowError::transition("jump_to_step", phase)),
        }
        if index >= self.steps().len() || index > self.history.len() {
            return Err(FlowError::InvalidStepIndex(index));
        }
        self.working = self.history.entry(index).map(|e| e.selections.clone()).unwrap_or_default();
        self.phase = FlowPhase::EditingStep { index };
        self.record(SessionEventKind::EditStarted { step_index: index });
        self.preselect();
        Ok(())
    }

    /// Cierra sin pedido y descarta todo. Idempotente.
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        self.reset();
        self.record(SessionEventKind::FlowClosed);
    }

    fn reset(&mut self) {
        self.history.clear();
        self.working.clear();
        self.customization = None;
        self.phase = FlowPhase::Closed;
    }

    /// Grupo requerido de elección única con buffer vacío: se elige la
    /// primera opción.
    fn preselect(&mut self) {
        if !self.working.is_empty() {
            return;
        }
        let Some(FlowStep::Group(id)) = self.current_step() else {
            return;
        };
        if let Some(group) = self.catalog.group(&id) {
            if group.is_required && group.is_single_choice() {
                if let Some(first) = group.options.first() {
                    self.working.push(first.clone());
                }
            }
        }
    }

    fn record(&mut self, kind: SessionEventKind) {
        let ev = self.events.append_kind(self.id, kind);
        debug!("session {} evento #{}: {:?}", self.id, ev.seq, ev.kind);
    }
}
