//! Browser-backed driver over the Web Animations API
//!
//! Production implementation of [`DomAnimation`]/[`WebAnimationsDriver`]
//! for wasm32 targets, marshalling keyframes and options into the
//! `Element.animate()` entry point via `web-sys`.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Animation, Element, KeyframeAnimationOptions};

use glint_animation::{AnimationError, AnimationOptions, Result, StyleMap, StyleValue};

use crate::dom::{DomAnimation, WebAnimationsDriver};

fn native_err(err: JsValue) -> AnimationError {
    AnimationError::Native(format!("{err:?}"))
}

fn style_to_js(value: &StyleValue) -> JsValue {
    match value {
        StyleValue::Num(n) => JsValue::from_f64(*n),
        StyleValue::Str(s) => JsValue::from_str(s),
    }
}

/// Native animation handle over `web_sys::Animation`
///
/// Keeps the `onfinish` closure alive for as long as the handle exists;
/// dropping the handle detaches the listener with it.
pub struct BrowserAnimation {
    animation: Animation,
    _onfinish: Option<Closure<dyn FnMut()>>,
}

impl DomAnimation for BrowserAnimation {
    fn play(&mut self) -> Result<()> {
        self.animation.play().map_err(native_err)
    }

    fn pause(&mut self) -> Result<()> {
        self.animation.pause().map_err(native_err)
    }

    fn finish(&mut self) -> Result<()> {
        self.animation.finish().map_err(native_err)
    }

    fn cancel(&mut self) -> Result<()> {
        self.animation.cancel();
        Ok(())
    }

    fn set_onfinish(&mut self, mut callback: Box<dyn FnMut()>) {
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        self.animation
            .set_onfinish(Some(closure.as_ref().unchecked_ref()));
        self._onfinish = Some(closure);
    }

    fn set_position(&mut self, time_ms: f64) {
        self.animation.set_current_time(Some(time_ms));
    }

    fn position(&self) -> f64 {
        self.animation.current_time().unwrap_or(0.0)
    }
}

/// Driver building [`BrowserAnimation`]s via `Element.animate()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserAnimationsDriver;

impl BrowserAnimationsDriver {
    /// Create the browser driver
    pub fn new() -> Self {
        Self
    }
}

impl WebAnimationsDriver for BrowserAnimationsDriver {
    type Element = Element;

    fn animate(
        &self,
        element: &Element,
        keyframes: &[StyleMap],
        options: &AnimationOptions,
    ) -> Result<Box<dyn DomAnimation>> {
        let create_err = |err: JsValue| AnimationError::CreateFailed(format!("{err:?}"));

        let frames = Array::new();
        for frame in keyframes {
            let entry = Object::new();
            for (name, value) in frame {
                Reflect::set(&entry, &JsValue::from_str(name), &style_to_js(value))
                    .map_err(create_err)?;
            }
            frames.push(&entry);
        }

        let timing = KeyframeAnimationOptions::new();
        for (name, value) in options.iter() {
            Reflect::set(timing.as_ref(), &JsValue::from_str(name), &style_to_js(value))
                .map_err(create_err)?;
        }

        let animation = element
            .animate_with_keyframe_animation_options(Some(frames.unchecked_ref()), &timing);
        Ok(Box::new(BrowserAnimation {
            animation,
            _onfinish: None,
        }))
    }
}
