//! Glint Web Animations Backend
//!
//! Wraps the browser's native Web Animations API in the framework's
//! [`AnimationPlayer`](glint_animation::AnimationPlayer) lifecycle:
//!
//! - **DomAnimation**: capability trait over the native handle (transport
//!   controls plus a completion subscription)
//! - **WebAnimationsDriver**: native-handle factory, one implementation per
//!   backend (real browser on wasm32, in-memory recorder for tests)
//! - **WebAnimationsPlayer**: the adapter itself - episode flags, callback
//!   bookkeeping, and parent-aware teardown
//!
//! The `testing` module ships with the crate so downstream animation code
//! can drive players against the mock recorder.

pub mod dom;
pub mod player;
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use dom::{DomAnimation, WebAnimationsDriver};
pub use player::WebAnimationsPlayer;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserAnimation, BrowserAnimationsDriver};
