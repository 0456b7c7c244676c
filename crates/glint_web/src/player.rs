//! Web Animations player
//!
//! Adapts a native browser animation handle into the framework's
//! [`AnimationPlayer`] lifecycle. The player owns the handle exclusively,
//! tracks the episode flags (`started`/`finished`/`destroyed`), and fires
//! `on_start`/`on_done` callbacks exactly once per completion episode.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glint_animation::{
    AnimationOptions, AnimationPlayer, CallbackList, Result, StyleMap,
};

use crate::dom::{DomAnimation, WebAnimationsDriver};

/// Shared player state
///
/// Held in an `Rc` so the completion listener installed on the native
/// handle can reach back into the player. The listener holds only a `Weak`;
/// the state owns the handle and the handle owns the listener, so a strong
/// back-reference would leak the whole triangle.
struct PlayerState {
    dom: RefCell<Option<Box<dyn DomAnimation>>>,
    initialized: Cell<bool>,
    started: Cell<bool>,
    finished: Cell<bool>,
    destroyed: Cell<bool>,
    /// Seek requested before the handle was bound, in milliseconds
    pending_position: Cell<Option<f64>>,
    on_start: CallbackList,
    on_done: CallbackList,
}

impl PlayerState {
    /// Completion path shared by `finish`, `destroy`, and the native event
    fn on_finish(&self) {
        if !self.finished.get() {
            self.finished.set(true);
            self.on_done.fire();
        }
    }
}

/// [`AnimationPlayer`] backed by the browser's Web Animations API
///
/// Construction stores the element, keyframes, and options; `init` (called
/// lazily by the transport controls) asks the driver for the native handle
/// and registers exactly one completion listener on it. `reset` re-arms the
/// episode flags without rebinding the handle, so the player can be driven
/// through another full lifecycle.
pub struct WebAnimationsPlayer<D: WebAnimationsDriver> {
    driver: D,
    element: D::Element,
    keyframes: Vec<StyleMap>,
    options: AnimationOptions,
    total_time: f64,
    state: Rc<PlayerState>,
    parent: RefCell<Option<Weak<dyn AnimationPlayer>>>,
}

impl<D: WebAnimationsDriver> WebAnimationsPlayer<D> {
    /// Create a player for `element` with the given keyframes and options
    ///
    /// No native resources are touched until `init` (or the first transport
    /// call) binds the handle.
    pub fn new(
        driver: D,
        element: D::Element,
        keyframes: Vec<StyleMap>,
        options: AnimationOptions,
    ) -> Self {
        let total_time = options.total_time();
        Self {
            driver,
            element,
            keyframes,
            options,
            total_time,
            state: Rc::new(PlayerState {
                dom: RefCell::new(None),
                initialized: Cell::new(false),
                started: Cell::new(false),
                finished: Cell::new(false),
                destroyed: Cell::new(false),
                pending_position: Cell::new(None),
                on_start: CallbackList::new(),
                on_done: CallbackList::new(),
            }),
            parent: RefCell::new(None),
        }
    }

    /// The element this player animates
    pub fn element(&self) -> &D::Element {
        &self.element
    }

    /// The keyframe sequence handed to the native API
    pub fn keyframes(&self) -> &[StyleMap] {
        &self.keyframes
    }

    /// The option map handed to the native API
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }
}

impl<D: WebAnimationsDriver> AnimationPlayer for WebAnimationsPlayer<D> {
    fn on_start(&self, callback: Box<dyn FnMut()>) {
        self.state.on_start.push(callback);
    }

    fn on_done(&self, callback: Box<dyn FnMut()>) {
        self.state.on_done.push(callback);
    }

    fn init(&self) -> Result<()> {
        if self.state.initialized.get() {
            return Ok(());
        }
        let mut dom = self
            .driver
            .animate(&self.element, &self.keyframes, &self.options)?;

        let state = Rc::downgrade(&self.state);
        dom.set_onfinish(Box::new(move || {
            if let Some(state) = state.upgrade() {
                state.on_finish();
            }
        }));
        if let Some(time_ms) = self.state.pending_position.take() {
            dom.set_position(time_ms);
        }
        tracing::debug!(
            "WebAnimationsPlayer: bound native animation ({} keyframes, {}ms total)",
            self.keyframes.len(),
            self.total_time
        );

        *self.state.dom.borrow_mut() = Some(dom);
        self.state.initialized.set(true);
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.init()?;
        {
            let mut dom = self.state.dom.borrow_mut();
            if let Some(dom) = dom.as_mut() {
                dom.play()?;
            }
        }
        if !self.state.started.get() {
            self.state.started.set(true);
            self.state.on_start.fire();
        }
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.init()?;
        let mut dom = self.state.dom.borrow_mut();
        if let Some(dom) = dom.as_mut() {
            dom.pause()?;
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        if self.state.finished.get() {
            return Ok(());
        }
        self.init()?;
        {
            let mut dom = self.state.dom.borrow_mut();
            if let Some(dom) = dom.as_mut() {
                dom.finish()?;
            }
        }
        self.state.on_finish();
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        if self.state.destroyed.get() {
            return Ok(());
        }
        // Parent-managed players defer cleanup authority to the parent and
        // never cancel autonomously.
        if self.parent.borrow().is_none() {
            let mut dom = self.state.dom.borrow_mut();
            if let Some(dom) = dom.as_mut() {
                dom.cancel()?;
            }
        }
        tracing::debug!("WebAnimationsPlayer: destroyed");
        self.state.destroyed.set(true);
        self.state.on_finish();
        Ok(())
    }

    fn reset(&self) {
        // The bound handle and its single completion listener survive a
        // reset; only the episode flags re-arm.
        self.state.destroyed.set(false);
        self.state.finished.set(false);
        self.state.started.set(false);
    }

    fn has_started(&self) -> bool {
        self.state.started.get()
    }

    fn set_parent(&self, parent: Weak<dyn AnimationPlayer>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    fn parent(&self) -> Option<Rc<dyn AnimationPlayer>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn set_position(&self, position: f64) {
        let time_ms = position.clamp(0.0, 1.0) * self.total_time;
        let mut dom = self.state.dom.borrow_mut();
        match dom.as_mut() {
            Some(dom) => dom.set_position(time_ms),
            None => self.state.pending_position.set(Some(time_ms)),
        }
    }

    fn position(&self) -> f64 {
        if self.total_time <= 0.0 {
            return 0.0;
        }
        let time_ms = match self.state.dom.borrow().as_ref() {
            Some(dom) => dom.position(),
            None => self.state.pending_position.get().unwrap_or(0.0),
        };
        (time_ms / self.total_time).clamp(0.0, 1.0)
    }

    fn total_time(&self) -> f64 {
        self.total_time
    }
}
