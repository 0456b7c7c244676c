//! Lifecycle tests for the Web Animations player, driven against the mock
//! native recorder.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glint_animation::{
    AnimationError, AnimationGroupPlayer, AnimationOptions, AnimationPlayer,
    NoopAnimationPlayer, StyleMap,
};
use glint_web::testing::{CaptureLog, DomCall, MockAnimationsDriver, MockElement};
use glint_web::WebAnimationsPlayer;

fn make_player_with(
    keyframes: Vec<StyleMap>,
    options: AnimationOptions,
) -> (WebAnimationsPlayer<MockAnimationsDriver>, Rc<CaptureLog>) {
    let log = CaptureLog::new();
    let driver = MockAnimationsDriver::new(log.clone());
    let player = WebAnimationsPlayer::new(driver, MockElement, keyframes, options);
    player.init().unwrap();
    (player, log)
}

fn make_player() -> (WebAnimationsPlayer<MockAnimationsDriver>, Rc<CaptureLog>) {
    make_player_with(Vec::new(), AnimationOptions::new())
}

fn counter() -> (Rc<Cell<usize>>, Box<dyn FnMut()>) {
    let count = Rc::new(Cell::new(0));
    let hook = count.clone();
    (count, Box::new(move || hook.set(hook.get() + 1)))
}

#[test]
fn pauses_the_animation() {
    let (player, log) = make_player();
    assert_eq!(log.count(DomCall::Pause), 0);

    player.pause().unwrap();

    assert_eq!(log.count(DomCall::Pause), 1);
    assert_eq!(log.count(DomCall::Play), 0);
    assert_eq!(log.count(DomCall::Finish), 0);
}

#[test]
fn plays_the_animation() {
    let (player, log) = make_player();
    assert_eq!(log.count(DomCall::Play), 0);

    player.play().unwrap();
    assert_eq!(log.count(DomCall::Play), 1);
}

#[test]
fn finishes_the_animation() {
    let (player, log) = make_player();
    assert_eq!(log.count(DomCall::Finish), 0);

    player.finish().unwrap();
    assert_eq!(log.count(DomCall::Finish), 1);
}

#[test]
fn init_installs_exactly_one_completion_listener() {
    let (player, log) = make_player();
    assert!(log.has_onfinish());
    assert_eq!(log.count(DomCall::SetOnFinish), 1);

    // init is idempotent: no second handle, no second listener
    player.init().unwrap();
    assert_eq!(log.count(DomCall::Animate), 1);
    assert_eq!(log.count(DomCall::SetOnFinish), 1);
}

#[test]
fn native_completion_fires_done_callbacks_in_order() {
    let (player, log) = make_player();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in 1..=3 {
        let order = order.clone();
        player.on_done(Box::new(move || order.borrow_mut().push(tag)));
    }

    assert!(order.borrow().is_empty());
    log.trigger_finish();
    assert_eq!(*order.borrow(), [1, 2, 3]);

    // A second completion event does not re-fire the episode
    log.trigger_finish();
    assert_eq!(*order.borrow(), [1, 2, 3]);
}

#[test]
fn finish_fires_done_synchronously_exactly_once() {
    let (player, log) = make_player();
    let (count, hook) = counter();
    player.on_done(hook);
    assert_eq!(count.get(), 0);

    player.finish().unwrap();
    assert_eq!(count.get(), 1);

    // Already finished: no callback, no second native call
    player.finish().unwrap();
    assert_eq!(count.get(), 1);
    assert_eq!(log.count(DomCall::Finish), 1);
}

#[test]
fn destroy_triggers_finish_if_not_finished_already() {
    let (count, hook) = counter();

    let (player, _log) = make_player();
    let shared = count.clone();
    player.on_done(Box::new(move || shared.set(shared.get() + 1)));
    assert_eq!(count.get(), 0);
    player.destroy().unwrap();
    assert_eq!(count.get(), 1);

    let (player2, _log2) = make_player();
    player2.on_done(hook);
    assert_eq!(count.get(), 1);
    player2.finish().unwrap();
    assert_eq!(count.get(), 2);
    player2.destroy().unwrap();
    assert_eq!(count.get(), 2);
}

#[test]
fn finish_does_not_cancel_the_native_animation() {
    let (player, log) = make_player();
    player.finish().unwrap();

    assert_eq!(log.count(DomCall::Finish), 1);
    assert_eq!(log.count(DomCall::Cancel), 0);

    // Same with a parent player set
    let (player2, log2) = make_player();
    let parent: Rc<dyn AnimationPlayer> = Rc::new(NoopAnimationPlayer::new());
    player2.set_parent(Rc::downgrade(&parent));

    player2.finish().unwrap();
    assert_eq!(log2.count(DomCall::Finish), 1);
    assert_eq!(log2.count(DomCall::Cancel), 0);
}

#[test]
fn destroy_cancels_unless_parent_managed() {
    let (player, log) = make_player();
    player.finish().unwrap();
    log.clear();

    player.destroy().unwrap();
    assert_eq!(log.count(DomCall::Cancel), 1);

    let (player2, log2) = make_player();
    let parent: Rc<dyn AnimationPlayer> = Rc::new(NoopAnimationPlayer::new());
    player2.set_parent(Rc::downgrade(&parent));

    player2.destroy().unwrap();
    assert_eq!(log2.count(DomCall::Cancel), 0);
}

#[test]
fn destroy_cannot_cancel_twice_unless_reset() {
    let (player, log) = make_player();
    assert_eq!(log.count(DomCall::Cancel), 0);

    player.destroy().unwrap();
    assert_eq!(log.count(DomCall::Cancel), 1);

    log.clear();
    player.destroy().unwrap();
    assert_eq!(log.count(DomCall::Cancel), 0);

    player.reset();
    log.clear();
    player.destroy().unwrap();
    assert_eq!(log.count(DomCall::Cancel), 1);
}

#[test]
fn on_start_runs_when_started_but_only_once() {
    let (player, _log) = make_player();
    let (count, hook) = counter();
    player.on_start(hook);
    assert!(!player.has_started());
    assert_eq!(count.get(), 0);

    player.play().unwrap();
    assert!(player.has_started());
    assert_eq!(count.get(), 1);

    player.pause().unwrap();
    player.play().unwrap();
    assert_eq!(count.get(), 1);
}

#[test]
fn callbacks_registered_after_the_event_never_fire() {
    let (player, _log) = make_player();
    player.play().unwrap();
    player.finish().unwrap();

    let (started, start_hook) = counter();
    let (done, done_hook) = counter();
    player.on_start(start_hook);
    player.on_done(done_hook);

    player.play().unwrap();
    player.finish().unwrap();
    assert_eq!(started.get(), 0);
    assert_eq!(done.get(), 0);

    // They stay armed for the next episode
    player.reset();
    player.play().unwrap();
    player.finish().unwrap();
    assert_eq!(started.get(), 1);
    assert_eq!(done.get(), 1);
}

#[test]
fn reset_rearms_the_full_lifecycle() {
    let (player, log) = make_player();
    let (starts, start_hook) = counter();
    let (dones, done_hook) = counter();
    player.on_start(start_hook);
    player.on_done(done_hook);

    player.play().unwrap();
    player.finish().unwrap();
    assert_eq!((starts.get(), dones.get()), (1, 1));

    player.reset();
    player.play().unwrap();
    player.finish().unwrap();
    assert_eq!((starts.get(), dones.get()), (2, 2));

    // The handle was never rebound across episodes
    assert_eq!(log.count(DomCall::Animate), 1);
    assert_eq!(log.count(DomCall::SetOnFinish), 1);
}

#[test]
fn creation_failure_propagates_and_leaves_flags_unchanged() {
    let log = CaptureLog::new();
    let driver = MockAnimationsDriver::new(log.clone());
    driver.fail_creation();
    let player = WebAnimationsPlayer::new(driver, MockElement, Vec::new(), AnimationOptions::new());

    let err = player.play().unwrap_err();
    assert!(matches!(err, AnimationError::CreateFailed(_)));
    assert!(!player.has_started());
    assert_eq!(log.count(DomCall::Animate), 0);
}

#[test]
fn position_maps_through_total_time() {
    let options = AnimationOptions::new()
        .with("duration", 1000.0)
        .with("delay", 200.0);
    let (player, log) = make_player_with(Vec::new(), options);
    assert_eq!(player.total_time(), 1200.0);

    player.set_position(0.5);
    assert_eq!(log.count(DomCall::SetPosition), 1);
    assert_eq!(log.position(), 600.0);
    assert_eq!(player.position(), 0.5);
}

#[test]
fn position_set_before_init_is_applied_at_bind() {
    let log = CaptureLog::new();
    let driver = MockAnimationsDriver::new(log.clone());
    let options = AnimationOptions::new().with("duration", 1200.0);
    let player = WebAnimationsPlayer::new(driver, MockElement, Vec::new(), options);

    player.set_position(0.25);
    assert_eq!(log.count(DomCall::SetPosition), 0);
    assert_eq!(player.position(), 0.25);

    player.init().unwrap();
    assert_eq!(log.count(DomCall::SetPosition), 1);
    assert_eq!(log.position(), 300.0);
}

#[test]
fn group_takes_over_cleanup_from_its_children() {
    let (player_a, log_a) = make_player();
    let (player_b, log_b) = make_player();
    let a = Rc::new(player_a);
    let b = Rc::new(player_b);

    let group = AnimationGroupPlayer::new(vec![
        a.clone() as Rc<dyn AnimationPlayer>,
        b.clone() as Rc<dyn AnimationPlayer>,
    ]);
    let (dones, done_hook) = counter();
    group.on_done(done_hook);

    group.play().unwrap();
    group.destroy().unwrap();

    // Children are parent-managed: no autonomous native cancellation
    assert_eq!(log_a.count(DomCall::Cancel), 0);
    assert_eq!(log_b.count(DomCall::Cancel), 0);
    assert_eq!(dones.get(), 1);
}

#[test]
fn keyframes_and_options_are_passed_through_verbatim() {
    let frames: Vec<StyleMap> = serde_json::from_value(serde_json::json!([
        {"opacity": 0, "transform": "translateX(0)"},
        {"opacity": 1, "transform": "translateX(100px)"},
    ]))
    .unwrap();
    let options = AnimationOptions::new()
        .with("duration", 500.0)
        .with("easing", "ease-out");

    let (player, log) = make_player_with(frames.clone(), options.clone());

    assert_eq!(player.keyframes(), frames.as_slice());
    assert_eq!(player.options(), &options);
    assert_eq!(log.count(DomCall::Animate), 1);
}

#[test]
fn restart_resets_and_plays_again() {
    let (player, log) = make_player();
    let (starts, start_hook) = counter();
    player.on_start(start_hook);

    player.play().unwrap();
    player.restart().unwrap();

    assert_eq!(starts.get(), 2);
    assert_eq!(log.count(DomCall::Play), 2);
}
