//! Animation player lifecycle trait
//!
//! Every animation backend exposes the same lifecycle object: transport
//! controls (`play`/`pause`/`finish`), teardown (`destroy`/`reset`), and
//! `on_start`/`on_done` callback hooks. Players compose: a parent player
//! may take over cleanup responsibility for its children, which suppresses
//! the child's autonomous native cancellation on `destroy`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::Result;

/// Uniform lifecycle interface over a single animation
///
/// Players are single-threaded objects driven from the UI thread; all state
/// lives behind interior mutability so a player can be shared as
/// `Rc<dyn AnimationPlayer>` between the framework and a composing parent.
///
/// Callback semantics, per completion episode (creation or last `reset` up
/// to the first finished/destroyed transition):
///
/// - `on_start` callbacks fire exactly once, on the first `play`
/// - `on_done` callbacks fire exactly once, on `finish`, on `destroy` of a
///   not-yet-finished player, or on the native completion event
/// - callbacks registered after the triggering event has fired do not fire
///   retroactively; they stay armed for the next episode
pub trait AnimationPlayer {
    /// Register a callback fired when playback first begins
    fn on_start(&self, callback: Box<dyn FnMut()>);

    /// Register a callback fired when the animation completes
    fn on_done(&self, callback: Box<dyn FnMut()>);

    /// Bind the native handle and its completion listener
    ///
    /// Idempotent; transport controls call this lazily, so explicit
    /// initialization is only needed to surface creation errors early.
    fn init(&self) -> Result<()>;

    /// Start or resume playback
    fn play(&self) -> Result<()>;

    /// Pause playback; start/done state is unaffected
    fn pause(&self) -> Result<()>;

    /// Jump to the completed state, firing `on_done` callbacks
    ///
    /// No-op when the animation already finished this episode.
    fn finish(&self) -> Result<()>;

    /// Tear the player down
    ///
    /// Runs completion semantics if the animation never finished, and
    /// requests native cancellation unless a parent player owns cleanup.
    /// No-op when already destroyed.
    fn destroy(&self) -> Result<()>;

    /// Re-arm the player for another full lifecycle
    fn reset(&self);

    /// Reset, then play from the beginning
    fn restart(&self) -> Result<()> {
        self.reset();
        self.play()
    }

    /// Whether playback has begun this episode
    fn has_started(&self) -> bool;

    /// Hand cleanup responsibility to a composing parent player
    fn set_parent(&self, parent: Weak<dyn AnimationPlayer>);

    /// The composing parent player, if one is set and still alive
    fn parent(&self) -> Option<Rc<dyn AnimationPlayer>>;

    /// Seek to a fractional position (0.0 to 1.0) on the timeline
    fn set_position(&self, position: f64);

    /// Current fractional position (0.0 to 1.0)
    fn position(&self) -> f64;

    /// Total timeline length in milliseconds (duration plus delay)
    fn total_time(&self) -> f64;
}

/// Ordered list of zero-argument callbacks
///
/// Firing swaps the list out, invokes every callback in registration order,
/// then splices callbacks registered during the fire back in behind the old
/// ones. Re-entrant registrations are therefore never invoked mid-fire;
/// they stay armed for the next episode. The list is not cleared by firing:
/// the caller's episode flags decide whether a fire happens at all.
#[derive(Default)]
pub struct CallbackList {
    inner: RefCell<Vec<Box<dyn FnMut()>>>,
}

impl CallbackList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback
    pub fn push(&self, callback: Box<dyn FnMut()>) {
        self.inner.borrow_mut().push(callback);
    }

    /// Invoke all callbacks in registration order
    pub fn fire(&self) {
        let mut firing = std::mem::take(&mut *self.inner.borrow_mut());
        for callback in firing.iter_mut() {
            callback();
        }
        let mut inner = self.inner.borrow_mut();
        firing.append(&mut inner);
        *inner = firing;
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// A player that animates nothing
///
/// Carries the full lifecycle contract over nothing but flags: `play` fires
/// start callbacks once, `finish` and `destroy` fire done callbacks once,
/// `reset` re-arms. Used where the framework expects a player but there is
/// no native animation to drive, and as a stand-in parent in tests.
#[derive(Default)]
pub struct NoopAnimationPlayer {
    on_start: CallbackList,
    on_done: CallbackList,
    started: Cell<bool>,
    finished: Cell<bool>,
    destroyed: Cell<bool>,
    position: Cell<f64>,
    parent: RefCell<Option<Weak<dyn AnimationPlayer>>>,
}

impl NoopAnimationPlayer {
    /// Create a fresh no-op player
    pub fn new() -> Self {
        Self::default()
    }

    fn on_finish(&self) {
        if !self.finished.get() {
            self.finished.set(true);
            self.on_done.fire();
        }
    }
}

impl AnimationPlayer for NoopAnimationPlayer {
    fn on_start(&self, callback: Box<dyn FnMut()>) {
        self.on_start.push(callback);
    }

    fn on_done(&self, callback: Box<dyn FnMut()>) {
        self.on_done.push(callback);
    }

    fn init(&self) -> Result<()> {
        Ok(())
    }

    fn play(&self) -> Result<()> {
        if !self.started.get() {
            self.started.set(true);
            self.on_start.fire();
        }
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        self.on_finish();
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        if !self.destroyed.get() {
            self.destroyed.set(true);
            self.on_finish();
        }
        Ok(())
    }

    fn reset(&self) {
        self.destroyed.set(false);
        self.finished.set(false);
        self.started.set(false);
    }

    fn has_started(&self) -> bool {
        self.started.get()
    }

    fn set_parent(&self, parent: Weak<dyn AnimationPlayer>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    fn parent(&self) -> Option<Rc<dyn AnimationPlayer>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn set_position(&self, position: f64) {
        self.position.set(position.clamp(0.0, 1.0));
    }

    fn position(&self) -> f64 {
        self.position.get()
    }

    fn total_time(&self) -> f64 {
        0.0
    }
}
