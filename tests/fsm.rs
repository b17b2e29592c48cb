use choreo::error::StateError;
use choreo::fsm::{StateHandlers, StateId, StateMachine};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;
use common::{logging_handlers, logging_machine, CallLog, TestState};

/// A machine over any state type, every state sharing one copied handler table.
fn uniform_machine<S: StateId, C>(states: &[S], handlers: StateHandlers<S, C>) -> StateMachine<S, C> {
    let mut builder = StateMachine::builder("uniform");
    for &state in states {
        builder = builder.state(state, handlers);
    }
    builder.build(states[0]).unwrap()
}

fn started() -> (common::LogMachine, CallLog) {
    let mut fsm = logging_machine();
    let mut log = CallLog::default();
    fsm.restart(TestState::Idle, &mut log);
    (fsm, log)
}

#[test]
fn test_restart_enters_initial_state() {
    let (mut fsm, log) = started();

    assert_eq!(log.calls, vec!["enter Idle"]);
    assert_that(&fsm.current()).is_equal_to(TestState::Idle);
    assert_that(&fsm.previous()).is_none();
    assert_eq!(fsm.drain_changes().to_vec(), vec![TestState::Idle]);
}

#[test]
fn test_change_state_runs_exit_then_enter() {
    let (mut fsm, mut log) = started();
    for _ in 0..5 {
        fsm.update(&mut log);
    }
    log.calls.clear();
    log.enter_elapsed.clear();

    fsm.change_state(TestState::Running, &mut log);

    assert_eq!(log.calls, vec!["exit Idle", "enter Running"]);
    assert_eq!(log.enter_elapsed, vec![0]);
    assert_that(&fsm.timer().elapsed_ticks()).is_equal_to(0);
    assert_that(&fsm.timer().is_running()).is_true();
    assert_that(&fsm.previous()).is_equal_to(Some(TestState::Idle));
}

#[test]
fn test_update_ticks_timer_before_handler() {
    let (mut fsm, mut log) = started();
    fsm.update(&mut log);
    fsm.update(&mut log);

    assert_that(&fsm.timer().elapsed_ticks()).is_equal_to(2);
    assert_eq!(log.calls, vec!["enter Idle", "update Idle", "update Idle"]);
}

#[test]
fn test_self_transition_rewinds_timer() {
    let (mut fsm, mut log) = started();
    for _ in 0..3 {
        fsm.update(&mut log);
    }
    log.calls.clear();

    fsm.change_state(TestState::Idle, &mut log);

    assert_eq!(log.calls, vec!["exit Idle", "enter Idle"]);
    assert_that(&fsm.timer().elapsed_ticks()).is_equal_to(0);
}

#[test]
fn test_each_state_keeps_its_own_timer() {
    let (mut fsm, mut log) = started();
    for _ in 0..4 {
        fsm.update(&mut log);
    }
    fsm.change_state(TestState::Running, &mut log);
    fsm.update(&mut log);

    assert_that(&fsm.timer_of(TestState::Idle).map(|timer| timer.elapsed_ticks())).is_equal_to(Some(4));
    assert_that(&fsm.timer_of(TestState::Running).map(|timer| timer.elapsed_ticks())).is_equal_to(Some(1));
    assert_that(&fsm.timer_of(TestState::Done)).is_none();
}

#[test]
fn test_try_change_to_undeclared_state_fails() {
    let (mut fsm, mut log) = started();
    log.calls.clear();

    let result = fsm.try_change_state(TestState::Done, &mut log);

    assert!(matches!(result, Err(StateError::Undeclared { .. })));
    assert_that(&fsm.current()).is_equal_to(TestState::Idle);
    assert_that(&log.calls).is_empty();
}

#[test]
#[should_panic]
fn test_change_to_undeclared_state_panics() {
    let (mut fsm, mut log) = started();
    fsm.change_state(TestState::Done, &mut log);
}

#[test]
fn test_duplicate_declaration_fails_build() {
    let result = StateMachine::<TestState, CallLog>::builder("dup")
        .state(TestState::Idle, logging_handlers())
        .state(TestState::Idle, StateHandlers::new())
        .build(TestState::Idle);

    assert!(matches!(result, Err(StateError::AlreadyDeclared { .. })));
}

#[test]
fn test_undeclared_initial_state_fails_build() {
    let result = StateMachine::<TestState, CallLog>::builder("empty")
        .state(TestState::Idle, logging_handlers())
        .build(TestState::Running);

    assert!(matches!(result, Err(StateError::Undeclared { .. })));
}

#[test]
fn test_restart_skips_exit_and_rewinds_every_timer() {
    let (mut fsm, mut log) = started();
    fsm.update(&mut log);
    fsm.change_state(TestState::Running, &mut log);
    fsm.update(&mut log);
    fsm.drain_changes();
    log.calls.clear();

    fsm.restart(TestState::Idle, &mut log);

    assert_eq!(log.calls, vec!["enter Idle"]);
    assert_that(&fsm.previous()).is_none();
    assert_that(&fsm.timer_of(TestState::Running).map(|timer| timer.elapsed_ticks())).is_equal_to(Some(0));
    assert_eq!(fsm.drain_changes().to_vec(), vec![TestState::Idle]);
}

#[test]
fn test_try_restart_undeclared_state_fails() {
    let mut fsm = logging_machine();
    let mut log = CallLog::default();
    assert!(fsm.try_restart(TestState::Done, &mut log).is_err());
    assert_that(&log.calls).is_empty();
}

#[test]
fn test_copied_handler_table_drives_every_state() {
    let mut fsm = uniform_machine(&[TestState::Idle, TestState::Running, TestState::Done], logging_handlers());
    let mut log = CallLog::default();
    fsm.restart(TestState::Idle, &mut log);
    fsm.change_state(TestState::Done, &mut log);
    fsm.update(&mut log);

    assert_eq!(log.calls, vec!["enter Idle", "exit Idle", "enter Done", "update Done"]);
}
