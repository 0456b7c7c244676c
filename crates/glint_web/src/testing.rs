//! Test doubles for the native animation capability
//!
//! [`MockDomAnimation`] records every transport call into a shared
//! [`CaptureLog`] instead of touching a browser; [`MockAnimationsDriver`]
//! hands such recorders to players under test. The log also holds the
//! installed completion callback so tests can simulate the host delivering
//! the native completion event.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glint_animation::{AnimationError, AnimationOptions, Result, StyleMap};

use crate::dom::{DomAnimation, WebAnimationsDriver};

/// A recorded call into the mock native handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomCall {
    /// The driver built a handle
    Animate,
    Play,
    Pause,
    Finish,
    Cancel,
    /// A completion listener was installed
    SetOnFinish,
    SetPosition,
}

/// Shared record of everything the player asked the native layer to do
#[derive(Default)]
pub struct CaptureLog {
    calls: RefCell<Vec<DomCall>>,
    onfinish: RefCell<Option<Box<dyn FnMut()>>>,
    position: Cell<f64>,
}

impl CaptureLog {
    /// Create an empty log, shared between a driver and the test
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn record(&self, call: DomCall) {
        self.calls.borrow_mut().push(call);
    }

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<DomCall> {
        self.calls.borrow().clone()
    }

    /// How many times `call` was recorded
    pub fn count(&self, call: DomCall) -> usize {
        self.calls.borrow().iter().filter(|&&c| c == call).count()
    }

    /// Forget all recorded calls (the installed listener is kept)
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Whether a completion listener has been installed
    pub fn has_onfinish(&self) -> bool {
        self.onfinish.borrow().is_some()
    }

    /// Simulate the host delivering the native completion event
    ///
    /// # Panics
    ///
    /// Panics if no completion listener was installed.
    pub fn trigger_finish(&self) {
        // Take the listener out while it runs so a re-entrant install from
        // inside a callback cannot hit a held borrow.
        let mut callback = self
            .onfinish
            .borrow_mut()
            .take()
            .expect("no onfinish listener installed on the mock animation");
        callback();
        let mut slot = self.onfinish.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }

    /// The last position the player seeked to, in milliseconds
    pub fn position(&self) -> f64 {
        self.position.get()
    }
}

/// In-memory [`DomAnimation`] recorder
pub struct MockDomAnimation {
    log: Rc<CaptureLog>,
}

impl MockDomAnimation {
    /// Create a recorder writing into `log`
    pub fn new(log: Rc<CaptureLog>) -> Self {
        Self { log }
    }
}

impl DomAnimation for MockDomAnimation {
    fn play(&mut self) -> Result<()> {
        self.log.record(DomCall::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.log.record(DomCall::Pause);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.log.record(DomCall::Finish);
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        self.log.record(DomCall::Cancel);
        Ok(())
    }

    fn set_onfinish(&mut self, callback: Box<dyn FnMut()>) {
        self.log.record(DomCall::SetOnFinish);
        *self.log.onfinish.borrow_mut() = Some(callback);
    }

    fn set_position(&mut self, time_ms: f64) {
        self.log.record(DomCall::SetPosition);
        self.log.position.set(time_ms);
    }

    fn position(&self) -> f64 {
        self.log.position.get()
    }
}

/// Stand-in for a DOM element in tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockElement;

/// Driver that hands out [`MockDomAnimation`] recorders
pub struct MockAnimationsDriver {
    log: Rc<CaptureLog>,
    fail_creation: Cell<bool>,
}

impl MockAnimationsDriver {
    /// Create a driver recording into `log`
    pub fn new(log: Rc<CaptureLog>) -> Self {
        Self {
            log,
            fail_creation: Cell::new(false),
        }
    }

    /// Make every subsequent `animate` call fail
    pub fn fail_creation(&self) {
        self.fail_creation.set(true);
    }
}

impl WebAnimationsDriver for MockAnimationsDriver {
    type Element = MockElement;

    fn animate(
        &self,
        _element: &MockElement,
        _keyframes: &[StyleMap],
        _options: &AnimationOptions,
    ) -> Result<Box<dyn DomAnimation>> {
        if self.fail_creation.get() {
            return Err(AnimationError::CreateFailed(
                "mock driver configured to fail".to_string(),
            ));
        }
        self.log.record(DomCall::Animate);
        Ok(Box::new(MockDomAnimation::new(self.log.clone())))
    }
}
