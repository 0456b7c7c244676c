//! Native animation capability traits
//!
//! [`DomAnimation`] is the capability set the browser's animation primitive
//! exposes: imperative transport controls plus a completion subscription.
//! [`WebAnimationsDriver`] builds such handles from an element, keyframes,
//! and options. The browser backend provides the production implementations;
//! [`crate::testing`] provides in-memory recorders with the same shape.

use glint_animation::{AnimationOptions, Result, StyleMap};

/// Handle to a native keyframe animation
///
/// One handle is owned by exactly one player; the player is its sole
/// mutator. Transport calls run synchronously into the host; the completion
/// callback is invoked by the host at an arbitrary later turn of the event
/// loop, on the same thread.
pub trait DomAnimation {
    /// Start or resume the native animation
    fn play(&mut self) -> Result<()>;

    /// Pause the native animation
    fn pause(&mut self) -> Result<()>;

    /// Seek the native animation to its end state
    fn finish(&mut self) -> Result<()>;

    /// Cancel the native animation, clearing its effects
    fn cancel(&mut self) -> Result<()>;

    /// Install the completion callback (`onfinish` or equivalent)
    ///
    /// Replaces any previously installed callback; players install exactly
    /// one per handle, at bind time.
    fn set_onfinish(&mut self, callback: Box<dyn FnMut()>);

    /// Seek to an absolute time in milliseconds
    fn set_position(&mut self, time_ms: f64);

    /// Current absolute time in milliseconds
    fn position(&self) -> f64;
}

/// Factory for native animation handles
///
/// Implemented by each backend (real browser, test recorder) to build a
/// [`DomAnimation`] from a target element, a keyframe sequence, and an
/// opaque option map.
pub trait WebAnimationsDriver {
    /// The element type animations attach to for this backend
    type Element;

    /// Build and start tracking a native animation on `element`
    ///
    /// Keyframes and options are passed through verbatim; fails only if the
    /// host environment cannot create the animation.
    fn animate(
        &self,
        element: &Self::Element,
        keyframes: &[StyleMap],
        options: &AnimationOptions,
    ) -> Result<Box<dyn DomAnimation>>;
}
