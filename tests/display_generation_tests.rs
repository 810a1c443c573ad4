use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::future;
use futures::task::LocalSpawnExt;
use latent_canvas::{CanvasError, CanvasResult};
use latent_canvas::guard::{DisplayGeneration, DisplayStage};

#[test]
fn stale_ticket_is_cancelled_before_running() {
    let generation = DisplayGeneration::new();
    let stale = generation.begin();
    let _fresh = generation.begin();
    let ran = Cell::new(false);

    let result = block_on(generation.guarded(&stale, async { ran.set(true) }));
    assert_eq!(result, Err(CanvasError::Cancelled));
    assert!(!ran.get());
}

#[test]
fn newer_request_aborts_in_flight_step() {
    let generation = DisplayGeneration::new();
    let mut pool = LocalPool::new();
    let outcome: Rc<RefCell<Option<CanvasResult<()>>>> = Rc::default();
    let (_never_sent, pending) = oneshot::channel::<()>();

    let ticket = generation.begin();
    let in_flight = generation.clone();
    let slot = Rc::clone(&outcome);
    pool.spawner()
        .spawn_local(async move {
            let result = in_flight
                .guarded(&ticket, pending.map(|_| ()))
                .await;
            *slot.borrow_mut() = Some(result);
        })
        .expect("spawn");
    pool.run_until_stalled();
    assert!(outcome.borrow().is_none());

    let _newer = generation.begin();
    pool.run_until_stalled();
    assert_eq!(*outcome.borrow(), Some(Err(CanvasError::Cancelled)));
}

#[test]
fn preview_then_actual_completes() {
    let generation = DisplayGeneration::new();
    let stage = block_on(generation.display_with_preview(
        async { Ok(()) },
        future::ready(()),
        || async { Ok(()) },
    ));
    assert_eq!(stage, Ok(DisplayStage::Actual));
}

#[test]
fn failed_actual_keeps_preview_and_failed_preview_errors() {
    let generation = DisplayGeneration::new();
    let stage = block_on(generation.display_with_preview(
        async { Ok(()) },
        future::ready(()),
        || async { Err(CanvasError::RenderFailed("fetch failed".to_owned())) },
    ));
    assert_eq!(stage, Ok(DisplayStage::PreviewOnly));

    let stage = block_on(generation.display_with_preview(
        async { Err(CanvasError::RenderFailed("decode failed".to_owned())) },
        future::ready(()),
        || async { Ok(()) },
    ));
    assert_eq!(
        stage,
        Err(CanvasError::RenderFailed("decode failed".to_owned()))
    );
}

#[test]
fn selecting_again_during_delay_supersedes_first_request() {
    let generation = DisplayGeneration::new();
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let actual_runs = Rc::new(Cell::new(0usize));
    let stages: Rc<RefCell<Vec<(usize, CanvasResult<DisplayStage>)>>> = Rc::default();
    let (_hold_delay, delay) = oneshot::channel::<()>();

    let first = {
        let generation = generation.clone();
        let runs = Rc::clone(&actual_runs);
        let stages = Rc::clone(&stages);
        async move {
            let stage = generation
                .display_with_preview(async { Ok(()) }, delay.map(|_| ()), move || {
                    runs.set(runs.get() + 1);
                    async { Ok(()) }
                })
                .await;
            stages.borrow_mut().push((1, stage));
        }
    };
    spawner.spawn_local(first).expect("spawn first");
    pool.run_until_stalled();
    assert!(stages.borrow().is_empty());

    let second = {
        let generation = generation.clone();
        let runs = Rc::clone(&actual_runs);
        let stages = Rc::clone(&stages);
        async move {
            let stage = generation
                .display_with_preview(async { Ok(()) }, future::ready(()), move || {
                    runs.set(runs.get() + 1);
                    async { Ok(()) }
                })
                .await;
            stages.borrow_mut().push((2, stage));
        }
    };
    spawner.spawn_local(second).expect("spawn second");
    pool.run_until_stalled();

    let stages = stages.borrow();
    assert!(stages.contains(&(1, Ok(DisplayStage::Superseded))));
    assert!(stages.contains(&(2, Ok(DisplayStage::Actual))));
    assert_eq!(actual_runs.get(), 1);
}
