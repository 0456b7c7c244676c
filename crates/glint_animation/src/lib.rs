//! Glint Animation Players
//!
//! Framework-facing animation lifecycle for the Glint UI framework:
//!
//! - **AnimationPlayer**: uniform lifecycle trait (play/pause/finish/
//!   destroy/reset) with `on_start`/`on_done` callback hooks
//! - **Composition**: parent players take over cleanup authority for their
//!   children; `AnimationGroupPlayer` drives a set of players in parallel
//! - **Keyframes**: opaque style-value maps and timing options, passed
//!   through verbatim to whichever native backend renders them
//!
//! Backends (such as `glint_web`'s Web Animations adapter) implement
//! [`AnimationPlayer`] over their native animation primitive.
//!
//! # Example
//!
//! ```rust
//! use glint_animation::{AnimationPlayer, NoopAnimationPlayer};
//!
//! let player = NoopAnimationPlayer::new();
//! player.on_done(Box::new(|| println!("done")));
//!
//! player.play().unwrap();
//! player.finish().unwrap(); // fires the callback exactly once
//! ```

pub mod error;
pub mod group;
pub mod player;
pub mod style;

pub use error::{AnimationError, Result};
pub use group::AnimationGroupPlayer;
pub use player::{AnimationPlayer, CallbackList, NoopAnimationPlayer};
pub use style::{AnimationOptions, StyleMap, StyleValue};
