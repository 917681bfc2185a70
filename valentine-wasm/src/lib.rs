use std::cell::RefCell;
use std::rc::Rc;

use valentine_core::{Config, FrameStatus, Point, Session};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, MouseEvent, Window};

mod canvas;
mod config;
mod constants;
mod dom;
mod state;
mod utils;

use crate::canvas::{CanvasSurface, fit_to_viewport, init_canvas};
use crate::constants::{BTN_NO_ID, BTN_YES_ID, CONFETTI_ID, PROMPT_ID};
use crate::state::{Listener, STATE, State};
use crate::utils::{element_rect, log, now_ms, warn};

/// Relocate the runaway button if the session allows it and push the new
/// placement to the DOM.
fn evade(state: &mut State, pointer: Option<Point>) {
    let button = element_rect(&state.document, BTN_NO_ID);
    let container = element_rect(&state.document, PROMPT_ID);
    let now = now_ms();
    let moved = match pointer {
        Some(p) => state.session.on_pointer_activity(p, button, container, now),
        None => state.session.evade(button, container, now),
    };
    if let Some(pos) = moved {
        let placeholder = state.session.evader().placeholder();
        if let Err(e) = dom::apply_position(&state.document, pos, placeholder) {
            warn(&format!("Failed to move button: {e:?}"));
        }
    }
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc: Document = state.borrow().document.clone();
    let mut controls = Vec::new();

    // Direct contact with the "No" button: hover, touch and click all make it
    // run before the action can complete.
    if let Some(btn) = doc.get_element_by_id(BTN_NO_ID) {
        for (event, cancel) in [("mouseover", false), ("touchstart", true), ("click", true)] {
            let st = state.clone();
            let cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
                if cancel {
                    e.prevent_default();
                }
                evade(&mut st.borrow_mut(), None);
            }));
            controls.push(Listener::attach(&btn, event, cb)?);
        }
    }

    if let Some(btn) = doc.get_element_by_id(BTN_YES_ID) {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            if let Err(e) = accept(st.clone()) {
                warn(&format!("Celebration failed to start: {e:?}"));
            }
        }));
        controls.push(Listener::attach(&btn, "click", onclick)?);
    }

    // Proximity trigger, detached again when the celebration starts.
    let st = state.clone();
    let mousemove = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let pointer = Point {
            x: e.client_x() as f64,
            y: e.client_y() as f64,
        };
        evade(&mut st.borrow_mut(), Some(pointer));
    }));

    let mut s = state.borrow_mut();
    let window = s.window.clone();
    s.mousemove = Some(Listener::attach(&window, "mousemove", mousemove)?);
    s.controls = controls;
    Ok(())
}

fn accept(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    {
        let mut s = state.borrow_mut();
        if !s.session.accept() {
            return Ok(());
        }
        s.mousemove = None;
        dom::show_celebration(&s.document)?;
    }
    start_celebration(state)
}

fn start_celebration(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    {
        let mut s = state.borrow_mut();
        let (canvas, ctx) = match init_canvas(&s.document, CONFETTI_ID) {
            Ok(v) => v,
            Err(e) => {
                warn(&format!("No confetti surface: {e:?}"));
                return Ok(());
            }
        };
        let (w, h) = fit_to_viewport(&s.window, &canvas);
        s.surface = Some((canvas, ctx));
        s.session.start_celebration(w, h, now_ms());
        log(&format!("Celebration started on a {w}x{h} surface"));

        let st = state.clone();
        let onresize = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            let mut s = st.borrow_mut();
            let size = s
                .surface
                .as_ref()
                .map(|(canvas, _)| fit_to_viewport(&s.window, canvas));
            if let Some((w, h)) = size {
                s.session.resize_surface(w, h);
            }
        }));
        let window = s.window.clone();
        s.resize = Some(Listener::attach(&window, "resize", onresize)?);
    }
    start_animation(state);
    Ok(())
}

fn step_frame(state: &mut State) -> FrameStatus {
    let ctx = match &state.surface {
        Some((_, ctx)) => ctx.clone(),
        None => return FrameStatus::Finished,
    };
    let mut surface = CanvasSurface::new(&ctx);
    state.session.frame(now_ms(), &mut surface)
}

fn start_animation(state: Rc<RefCell<State>>) {
    type RafClosure = Closure<dyn FnMut(f64)>;
    let f: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let status = step_frame(&mut state.borrow_mut());
        if status == FrameStatus::Finished {
            log("Celebration finished");
            // Drop our own handle so the closure is freed once it returns.
            let _ = f.borrow_mut().take();
            return;
        }
        if let Some(window) = web_sys::window()
            && let Some(cb) = f.borrow().as_ref()
        {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(window) = web_sys::window()
        && let Some(cb) = g.borrow().as_ref()
    {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn mount(window: Window, document: Document, cfg: Config, seed: u64) -> Result<(), JsValue> {
    log(&format!("Mounting valentine widget (seed {seed})"));
    let mut session = Session::new(cfg, seed);
    dom::mount_glyphs(&document, &session.glyphs())?;

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        session,
        surface: None,
        controls: Vec::new(),
        mousemove: None,
        resize: None,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));
    attach_ui(state)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    wasm_bindgen_futures::spawn_local(async move {
        let cfg = config::load_config(&window).await;
        let seed = config::session_seed(&window);
        if let Err(e) = mount(window, document, cfg, seed) {
            warn(&format!("Failed to mount: {e:?}"));
        }
    });
    Ok(())
}

/// Tear the widget down: detach every listener and drop the state. A running
/// frame loop stops on its next tick.
#[wasm_bindgen]
pub fn teardown() {
    let Some(state) = STATE.with(|st| st.borrow_mut().take()) else {
        return;
    };
    state.borrow_mut().detach_all();
    log("Valentine widget torn down");
}
