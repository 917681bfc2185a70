use std::cell::RefCell;
use std::rc::Rc;

use valentine_core::Session;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, Window};

/// An attached DOM event listener. Dropping it detaches the callback.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    cb: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        cb: Closure<dyn FnMut(Event)>,
    ) -> Result<Listener, JsValue> {
        target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            event,
            cb,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.cb.as_ref().unchecked_ref());
    }
}

/// Runtime state stored behind an `Rc<RefCell<_>>` so it can be shared
/// across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub session: Session,
    /// Confetti canvas, acquired when the celebration starts.
    pub surface: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
    /// Button listeners, alive for the whole session.
    pub controls: Vec<Listener>,
    /// Window `mousemove` listener, attached only while prompting.
    pub mousemove: Option<Listener>,
    /// Window `resize` listener, attached once the celebration starts.
    pub resize: Option<Listener>,
}

impl State {
    /// Detach every listener. Their closures hold clones of the shared state,
    /// so this also breaks the reference cycle.
    pub fn detach_all(&mut self) {
        self.mousemove = None;
        self.resize = None;
        self.controls.clear();
        self.surface = None;
    }
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
