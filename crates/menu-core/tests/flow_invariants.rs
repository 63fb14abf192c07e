use menu_core::{BackOutcome, FlowError, FlowPhase, FlowSession, FlowStep, NextOutcome, OpenOptions, SessionEventKind};
use menu_domain::{Catalog, DisplayMode, FlowMode, MenuItem, MenuItemOption, OptionGroup};

// size (requerido) -> meal (disparador) -> side (sólo à la carte) -> drink (sólo combo)
fn catalog() -> Catalog {
    let size = OptionGroup::new("size", "Size", vec![MenuItemOption::addon("Regular", 0.0), MenuItemOption::addon("Large", 2.0)]);
    let meal = OptionGroup::new("meal", "Meal", vec![MenuItemOption::addon("Make it a meal", 0.0).combo_trigger()]);
    let side = OptionGroup::new("side", "Side", vec![MenuItemOption::addon("Salad", 3.0)]);
    let drink = OptionGroup::new("drink", "Drink", vec![MenuItemOption::addon("Cola", 0.0), MenuItemOption::addon("Shake", 1.5)]);
    Catalog::new(vec![MenuItem::new("burger", "Burger", 10.0).with_combo_price(15.0)
                                                             .linked_to(["size", "meal", "side", "drink"])],
                 vec![size.required().max(1),
                      meal.max(1),
                      side.display(DisplayMode::AlaCarte),
                      drink.display(DisplayMode::Combo).max(1)])
}

fn open(catalog: &Catalog) -> FlowSession<'_> {
    FlowSession::open(catalog, "burger", OpenOptions::default()).unwrap()
                                                                .into_session()
                                                                .unwrap()
}

fn group(id: &str) -> FlowStep {
    FlowStep::Group(id.to_string())
}

fn assert_history_tracks_step(session: &FlowSession<'_>) {
    if let FlowPhase::StepActive { index } = session.phase() {
        assert_eq!(session.history().len(), index, "history out of sync at step {index}");
    }
}

#[test]
fn history_length_matches_step_index_through_a_walk() {
    let catalog = catalog();
    let mut session = open(&catalog);
    assert_history_tracks_step(&session);
    session.next().unwrap();
    assert_history_tracks_step(&session);
    session.next().unwrap();
    assert_history_tracks_step(&session);
    session.back().unwrap();
    assert_history_tracks_step(&session);
    session.back().unwrap();
    assert_history_tracks_step(&session);
    while session.phase() != FlowPhase::Review {
        session.next().unwrap();
        assert_history_tracks_step(&session);
    }
    session.back().unwrap();
    assert_history_tracks_step(&session);
}

#[test]
fn saving_an_unchanged_edit_is_a_no_op() {
    let catalog = catalog();
    let mut session = open(&catalog);
    session.toggle("Large").unwrap();
    session.next().unwrap();
    session.next().unwrap();
    session.toggle("Salad").unwrap();
    assert_eq!(session.next().unwrap(), NextOutcome::Advanced { step_index: 3 });
    assert_eq!(session.next().unwrap(), NextOutcome::Review);

    let before = session.history().clone();
    for index in 0..session.steps().len() {
        session.jump_to_step(index).unwrap();
        assert_eq!(session.next().unwrap(), NextOutcome::Saved { step_index: index });
        assert_eq!(session.history(), &before);
    }
}

#[test]
fn edited_step_is_not_counted_twice() {
    let catalog = catalog();
    let mut session = open(&catalog);
    session.toggle("Large").unwrap();
    session.next().unwrap();
    session.next().unwrap();
    session.toggle("Salad").unwrap();
    session.next().unwrap();
    session.next().unwrap();
    let at_review = session.total();
    assert_eq!(at_review, 15.0);

    session.jump_to_step(2).unwrap();
    assert_eq!(session.total(), at_review);
    session.jump_to_step(0).unwrap_err();
    session.back().unwrap();
    session.jump_to_step(0).unwrap();
    assert_eq!(session.total(), at_review);
}

#[test]
fn rewinding_drops_later_selections() {
    let catalog = catalog();
    let mut session = open(&catalog);
    session.toggle("Large").unwrap();
    session.next().unwrap();
    session.next().unwrap();
    session.toggle("Salad").unwrap();
    session.next().unwrap();
    session.back().unwrap();
    session.back().unwrap();
    assert_eq!(session.phase(), FlowPhase::StepActive { index: 1 });
    let flat: Vec<String> = session.flatten().into_iter().map(|o| o.name).collect();
    assert_eq!(flat, vec!["Large".to_string()]);
    assert_eq!(session.total(), 12.0);
}

fn names(session: &FlowSession<'_>) -> Vec<String> {
    session.flatten().into_iter().map(|o| o.name).collect()
}

#[test]
fn going_back_and_reselecting_matches_a_straight_walk() {
    let catalog = catalog();
    let mut straight = open(&catalog);
    straight.toggle("Large").unwrap();
    straight.next().unwrap();
    straight.next().unwrap();
    straight.toggle("Salad").unwrap();
    straight.next().unwrap();
    straight.toggle("Cola").unwrap();
    assert_eq!(straight.next().unwrap(), NextOutcome::Review);

    let mut session = open(&catalog);
    session.toggle("Large").unwrap();
    session.next().unwrap();
    session.next().unwrap();
    session.toggle("Salad").unwrap();
    session.next().unwrap();
    session.back().unwrap();
    assert_history_tracks_step(&session);
    session.toggle("Salad").unwrap();
    session.next().unwrap();
    session.toggle("Cola").unwrap();
    assert_eq!(session.next().unwrap(), NextOutcome::Review);

    assert_eq!(names(&session), names(&straight));
    assert_eq!(session.total(), straight.total());
}

#[test]
fn going_back_over_a_trigger_and_reselecting_matches_a_straight_walk() {
    let catalog = catalog();
    let mut straight = open(&catalog);
    straight.next().unwrap();
    straight.toggle("Make it a meal").unwrap();
    straight.next().unwrap();
    straight.toggle("Cola").unwrap();
    assert_eq!(straight.next().unwrap(), NextOutcome::Review);

    let mut session = open(&catalog);
    session.next().unwrap();
    session.toggle("Make it a meal").unwrap();
    session.next().unwrap();
    assert_eq!(session.mode(), FlowMode::Combo);
    session.back().unwrap();
    assert_eq!(session.phase(), FlowPhase::StepActive { index: 1 });
    assert_eq!(session.mode(), FlowMode::AlaCarte);
    session.toggle("Make it a meal").unwrap();
    session.next().unwrap();
    session.toggle("Cola").unwrap();
    assert_eq!(session.next().unwrap(), NextOutcome::Review);

    assert_eq!(names(&session), names(&straight));
    assert_eq!(session.steps(), straight.steps());
    assert_eq!(session.total(), straight.total());
}

#[test]
fn combo_trigger_applies_to_later_steps() {
    let catalog = catalog();
    let mut session = open(&catalog);
    assert_eq!(session.steps(), vec![group("size"), group("meal"), group("side"), group("drink")]);
    session.toggle("Large").unwrap();
    session.next().unwrap();
    session.toggle("Make it a meal").unwrap();
    session.next().unwrap();

    assert_eq!(session.mode(), FlowMode::Combo);
    // el paso sólo à la carte desaparece de la parte no visitada
    assert_eq!(session.steps(), vec![group("size"), group("meal"), group("drink")]);
    assert_eq!(session.current_step(), Some(group("drink")));
    assert_eq!(session.total(), 17.0);
    session.toggle("Shake").unwrap();
    assert_eq!(session.total(), 18.5);

    let kinds: Vec<SessionEventKind> = session.events().into_iter().map(|e| e.kind).collect();
    assert!(kinds.contains(&SessionEventKind::ComboActivated { step_index: 1 }));
    assert!(kinds.iter().any(|k| matches!(k, SessionEventKind::StepsRecomputed { step_count: 3, .. })));
}

#[test]
fn editing_out_the_trigger_reverts_to_ala_carte() {
    let catalog = catalog();
    let mut session = open(&catalog);
    session.next().unwrap();
    session.toggle("Make it a meal").unwrap();
    session.next().unwrap();
    session.toggle("Cola").unwrap();
    assert_eq!(session.next().unwrap(), NextOutcome::Review);
    assert_eq!(session.total(), 15.0);

    session.jump_to_step(1).unwrap();
    session.decrement("Make it a meal").unwrap();
    assert_eq!(session.total(), 10.0);
    session.next().unwrap();

    assert_eq!(session.mode(), FlowMode::AlaCarte);
    assert_eq!(session.total(), 10.0);
    // los pasos visitados conservan su posición
    assert_eq!(session.steps(), vec![group("size"), group("meal"), group("drink"), group("side")]);
    match session.next().unwrap() {
        NextOutcome::Completed(done) => assert!(!done.is_combo),
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn sequence_hash_is_stable_for_the_same_item() {
    let catalog = catalog();
    let hashes: Vec<String> = (0..2).map(|_| {
                                        let session = open(&catalog);
                                        match session.events().remove(0).kind {
                                            SessionEventKind::FlowOpened { sequence_hash, .. } => sequence_hash,
                                            other => panic!("unexpected first event {other:?}"),
                                        }
                                    })
                                    .collect();
    assert_eq!(hashes[0], hashes[1]);
    assert_eq!(hashes[0].len(), 64);
}

// meal (disparador) -> side1, side2 (sólo à la carte)
fn set_catalog() -> Catalog {
    let meal = OptionGroup::new("meal", "Meal", vec![MenuItemOption::addon("Make it a meal", 0.0).combo_trigger()]);
    let side1 = OptionGroup::new("side1", "Side", vec![MenuItemOption::addon("Soup", 2.0)]);
    let side2 = OptionGroup::new("side2", "Second side", vec![MenuItemOption::addon("Salad", 3.0)]);
    Catalog::new(vec![MenuItem::new("set", "Set", 8.0).with_combo_price(12.0)
                                                       .linked_to(["meal", "side1", "side2"])],
                 vec![meal.max(1), side1.display(DisplayMode::AlaCarte), side2.display(DisplayMode::AlaCarte)])
}

#[test]
fn steps_revealed_by_an_edit_are_reached_in_order() {
    let catalog = set_catalog();
    let mut session = FlowSession::open(&catalog, "set", OpenOptions::default()).unwrap()
                                                                               .into_session()
                                                                               .unwrap();
    session.toggle("Make it a meal").unwrap();
    assert_eq!(session.next().unwrap(), NextOutcome::Review);
    assert_eq!(session.steps(), vec![group("meal")]);

    session.jump_to_step(0).unwrap();
    session.decrement("Make it a meal").unwrap();
    assert_eq!(session.next().unwrap(), NextOutcome::Saved { step_index: 0 });
    assert_eq!(session.steps(), vec![group("meal"), group("side1"), group("side2")]);
    assert_eq!(session.history().len(), 1);

    // un paso sin visitar más allá del siguiente dejaría un hueco
    assert_eq!(session.jump_to_step(2), Err(FlowError::InvalidStepIndex(2)));
    assert_eq!(session.phase(), FlowPhase::Review);

    session.jump_to_step(1).unwrap();
    session.toggle("Soup").unwrap();
    assert_eq!(session.next().unwrap(), NextOutcome::Saved { step_index: 1 });
    assert_eq!(session.history().len(), 2);

    assert_eq!(session.back().unwrap(), BackOutcome::Step { step_index: 1 });
    assert_history_tracks_step(&session);
    assert_eq!(session.working()[0].name, "Soup");
    assert_eq!(session.next().unwrap(), NextOutcome::Advanced { step_index: 2 });
    assert_history_tracks_step(&session);
    assert_eq!(session.next().unwrap(), NextOutcome::Review);
    assert_eq!(names(&session), vec!["Soup".to_string()]);
}
