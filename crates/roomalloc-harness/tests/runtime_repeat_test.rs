//! Runtime tests for press-and-hold repeat under virtual time.
//!
//! Drives the production `Runtime` with the scripted `SimDriver`: a held
//! stepper must fire immediately and then every 200 ms until released,
//! and cancellation (release or focus movement) must be deterministic -
//! no queued step fires afterwards.

use roomalloc_app::{App, AppEvent, Runtime, StepDirection};
use roomalloc_harness::{SimDriver, SimError};

fn app_of(guests: u32, rooms: u32) -> App {
    match App::new(guests, rooms) {
        Ok(app) => app,
        Err(err) => unreachable!("valid configuration: {err}"),
    }
}

async fn run(driver: SimDriver, app: App) -> Result<(), SimError> {
    Runtime::new(app, driver).run().await
}

#[tokio::test]
async fn held_stepper_fires_every_interval() {
    // Press at t=0, release at t=500: steps land at 0, 200 and 400 ms.
    let driver = SimDriver::new()
        .at(0, AppEvent::StepperPressed { direction: StepDirection::Up })
        .at(500, AppEvent::StepperReleased)
        .at(600, AppEvent::Quit);
    let log = driver.log();

    let result = run(driver, app_of(10, 2)).await;
    assert_eq!(result, Ok(()));

    let log = log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    assert_eq!(log.reports.len(), 3);
    let Some(last) = log.reports.last() else {
        unreachable!("three reports recorded");
    };
    assert_eq!(last.rooms[0].adults(), 4);
    assert_eq!(last.unallocated, 5);
    assert!(log.stopped);
}

#[tokio::test]
async fn release_before_interval_yields_single_step() {
    let driver = SimDriver::new()
        .at(0, AppEvent::StepperPressed { direction: StepDirection::Up })
        .at(100, AppEvent::StepperReleased)
        .at(1000, AppEvent::Quit);
    let log = driver.log();

    let result = run(driver, app_of(10, 2)).await;
    assert_eq!(result, Ok(()));

    let log = log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    assert_eq!(log.reports.len(), 1);
    assert_eq!(log.reports[0].rooms[0].adults(), 2);
}

#[tokio::test]
async fn focus_movement_cancels_the_hold() {
    let driver = SimDriver::new()
        .at(0, AppEvent::StepperPressed { direction: StepDirection::Up })
        .at(100, AppEvent::FocusNext)
        .at(1000, AppEvent::Quit);
    let log = driver.log();

    let result = run(driver, app_of(10, 2)).await;
    assert_eq!(result, Ok(()));

    let log = log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    assert_eq!(log.reports.len(), 1);
    assert_eq!(log.reports[0].rooms[0].adults(), 2);
}

#[tokio::test]
async fn repeat_stops_stepping_at_the_bound_but_stays_armed() {
    // 4 guests over 2 rooms: room 0 adults can only reach 3. Later ticks
    // are rejected silently and report nothing.
    let driver = SimDriver::new()
        .at(0, AppEvent::StepperPressed { direction: StepDirection::Up })
        .at(900, AppEvent::StepperReleased)
        .at(1000, AppEvent::Quit);
    let log = driver.log();

    let result = run(driver, app_of(4, 2)).await;
    assert_eq!(result, Ok(()));

    let log = log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    assert_eq!(log.reports.len(), 2);
    let Some(last) = log.reports.last() else {
        unreachable!("two reports recorded");
    };
    assert_eq!(last.rooms[0].adults(), 3);
    assert_eq!(last.unallocated, 0);
}

#[tokio::test]
async fn down_hold_stops_at_the_adult_floor() {
    let driver = SimDriver::new()
        .at(0, AppEvent::StepperPressed { direction: StepDirection::Up })
        .at(0, AppEvent::StepperReleased)
        .at(50, AppEvent::StepperPressed { direction: StepDirection::Down })
        .at(700, AppEvent::StepperReleased)
        .at(800, AppEvent::Quit);
    let log = driver.log();

    let result = run(driver, app_of(10, 2)).await;
    assert_eq!(result, Ok(()));

    let log = log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let Some(last) = log.reports.last() else {
        unreachable!("at least the initial increment reports");
    };
    assert_eq!(last.rooms[0].adults(), 1);
}

#[tokio::test]
async fn scripted_set_value_rejection_rerenders_without_report() {
    let driver = SimDriver::new()
        .at(0, AppEvent::SetValue { value: 99 })
        .at(10, AppEvent::Quit);
    let log = driver.log();

    let result = run(driver, app_of(6, 2)).await;
    assert_eq!(result, Ok(()));

    let log = log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    assert!(log.reports.is_empty());
    // Initial render plus the revert re-render.
    assert_eq!(log.renders.len(), 2);
    let Some(last) = log.renders.last() else {
        unreachable!("two renders recorded");
    };
    assert_eq!(last.rooms[0].adults(), 1);
}

#[tokio::test]
async fn exhausted_script_surfaces_an_error() {
    let driver = SimDriver::new().at(0, AppEvent::FocusNext);
    let result = run(driver, app_of(6, 2)).await;
    assert_eq!(result, Err(SimError::ScriptExhausted));
}
