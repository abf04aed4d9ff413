//! Integration tests for Store effect execution and delayed actions.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use composable_todo_core::{
    effect::{Effect, EffectId},
    reducer::Reducer,
    smallvec, SmallVec,
};
use composable_todo_runtime::{Store, StoreConfig};
use composable_todo_testing::{helpers::init_test_tracing, test_time, ManualClock};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TimerAction {
    /// Schedule `Fire { id }` after `after`
    Arm { id: u32, after: Duration },
    /// Timer went off
    Fire { id: u32 },
    /// Log through the environment, then arm a follow-up
    Chain,
    /// Like `Arm`, but replaces any earlier `Rearm` still waiting
    Rearm { id: u32, after: Duration },
    /// Drop whatever `Rearm` is waiting
    Disarm,
    /// Schedule `Spin` after `after`
    ArmSpin { after: Duration },
    /// Feeds itself back forever
    Spin,
}

const REARM: EffectId = EffectId("rearm");

#[derive(Debug, Default)]
struct TimerState {
    fired: Vec<u32>,
}

#[derive(Clone, Default)]
struct TimerEnvironment {
    log: Arc<Mutex<Vec<String>>>,
}

struct TimerReducer;

impl Reducer for TimerReducer {
    type State = TimerState;
    type Action = TimerAction;
    type Environment = TimerEnvironment;

    fn reduce(
        &self,
        state: &mut TimerState,
        action: TimerAction,
        env: &TimerEnvironment,
    ) -> SmallVec<[Effect<TimerAction>; 4]> {
        match action {
            TimerAction::Arm { id, after } => {
                smallvec![Effect::delay(after, TimerAction::Fire { id })]
            },
            TimerAction::Fire { id } => {
                state.fired.push(id);
                SmallVec::new()
            },
            TimerAction::Chain => {
                let first = Arc::clone(&env.log);
                let second = Arc::clone(&env.log);
                smallvec![Effect::chain(vec![
                    Effect::task(move || {
                        first.lock().unwrap().push("first".to_string());
                        None
                    }),
                    Effect::None,
                    Effect::task(move || {
                        second.lock().unwrap().push("second".to_string());
                        Some(TimerAction::Arm {
                            id: 99,
                            after: Duration::from_secs(1),
                        })
                    }),
                ])]
            },
            TimerAction::Rearm { id, after } => smallvec![Effect::cancellable(
                REARM,
                Effect::delay(after, TimerAction::Fire { id })
            )],
            TimerAction::Disarm => smallvec![Effect::Cancel(REARM)],
            TimerAction::ArmSpin { after } => smallvec![Effect::delay(after, TimerAction::Spin)],
            TimerAction::Spin => smallvec![Effect::task(|| Some(TimerAction::Spin))],
        }
    }
}

type TimerStore = Store<TimerState, TimerAction, TimerEnvironment, TimerReducer>;

fn store(clock: Arc<ManualClock>) -> TimerStore {
    init_test_tracing();
    Store::with_config(
        TimerState::default(),
        TimerReducer,
        TimerEnvironment::default(),
        StoreConfig::default().with_max_feedback_actions(8),
    )
    .with_clock(clock)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn delayed_actions_wait_for_the_clock() {
    let clock = Arc::new(ManualClock::new(test_time()));
    let mut store = store(clock.clone());

    store
        .send(TimerAction::Arm {
            id: 1,
            after: Duration::from_secs(2),
        })
        .unwrap();
    assert_eq!(store.pending_timers(), 1);
    assert_eq!(store.tick().unwrap(), 0);

    clock.advance(Duration::from_secs(2));
    assert_eq!(store.tick().unwrap(), 1);
    assert_eq!(store.pending_timers(), 0);
    assert_eq!(store.state(|s| s.fired.clone()), vec![1]);
}

#[test]
fn due_timers_fire_earliest_first() {
    let clock = Arc::new(ManualClock::new(test_time()));
    let mut store = store(clock.clone());

    store
        .send(TimerAction::Arm {
            id: 1,
            after: Duration::from_secs(3),
        })
        .unwrap();
    clock.advance(Duration::from_secs(1));
    store
        .send(TimerAction::Arm {
            id: 2,
            after: Duration::from_secs(1),
        })
        .unwrap();

    clock.advance(Duration::from_secs(5));
    assert_eq!(store.tick().unwrap(), 2);
    assert_eq!(store.state(|s| s.fired.clone()), vec![2, 1]);
}

#[test]
fn sequential_effects_run_in_order_and_feed_back() {
    let clock = Arc::new(ManualClock::new(test_time()));
    let mut store = store(clock.clone());

    store.send(TimerAction::Chain).unwrap();

    assert_eq!(
        *store.environment().log.lock().unwrap(),
        vec!["first".to_string(), "second".to_string()]
    );
    // the fed-back Arm scheduled a timer
    assert_eq!(store.pending_timers(), 1);

    clock.advance(Duration::from_secs(1));
    store.tick().unwrap();
    assert_eq!(store.state(|s| s.fired.clone()), vec![99]);
}

#[test]
fn cancellable_delay_replaces_the_pending_one() {
    let clock = Arc::new(ManualClock::new(test_time()));
    let mut store = store(clock.clone());

    for id in 1..=100 {
        store
            .send(TimerAction::Rearm {
                id,
                after: Duration::from_secs(2),
            })
            .unwrap();
        clock.advance(Duration::from_secs(1));
    }
    assert_eq!(store.pending_timers(), 1);

    clock.advance(Duration::from_secs(1));
    assert_eq!(store.tick().unwrap(), 1);
    assert_eq!(store.state(|s| s.fired.clone()), vec![100]);
}

#[test]
fn cancel_leaves_other_timers_alone() {
    let clock = Arc::new(ManualClock::new(test_time()));
    let mut store = store(clock.clone());

    store
        .send(TimerAction::Rearm {
            id: 1,
            after: Duration::from_secs(1),
        })
        .unwrap();
    store
        .send(TimerAction::Arm {
            id: 2,
            after: Duration::from_secs(1),
        })
        .unwrap();
    store.send(TimerAction::Disarm).unwrap();
    assert_eq!(store.pending_timers(), 1);

    clock.advance(Duration::from_secs(1));
    store.tick().unwrap();
    assert_eq!(store.state(|s| s.fired.clone()), vec![2]);
}

#[test]
fn failed_tick_keeps_undelivered_timers() {
    let clock = Arc::new(ManualClock::new(test_time()));
    let mut store = store(clock.clone());

    store
        .send(TimerAction::ArmSpin {
            after: Duration::from_secs(1),
        })
        .unwrap();
    store
        .send(TimerAction::Arm {
            id: 7,
            after: Duration::from_secs(2),
        })
        .unwrap();

    clock.advance(Duration::from_secs(3));
    assert!(store.tick().is_err());
    assert_eq!(store.pending_timers(), 1);
    assert!(store.state(|s| s.fired.is_empty()));

    assert_eq!(store.tick().unwrap(), 1);
    assert_eq!(store.state(|s| s.fired.clone()), vec![7]);
}
