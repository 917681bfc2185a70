use valentine_core::{ButtonSize, DecorativeGlyph, Position};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::constants::{
    BG_HEARTS_ID, BTN_NO_ID, CONFETTI_ID, NO_PLACEHOLDER_ID, PROMPT_ID, SUCCESS_ID,
};

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn set_display(document: &Document, id: &str, value: &str) -> Result<(), JsValue> {
    if let Some(el) = html_element(document, id) {
        el.style().set_property("display", value)?;
    }
    Ok(())
}

/// Inject the floating hearts into the background layer.
pub fn mount_glyphs(document: &Document, glyphs: &[DecorativeGlyph]) -> Result<(), JsValue> {
    let Some(layer) = document.get_element_by_id(BG_HEARTS_ID) else {
        return Ok(());
    };
    for g in glyphs {
        let el = document.create_element("div")?;
        el.set_class_name("heart");
        el.set_attribute("style", &g.style())?;
        el.set_text_content(Some(&g.symbol));
        layer.append_child(&el)?;
    }
    Ok(())
}

/// Move the runaway button and keep its old slot reserved.
pub fn apply_position(
    document: &Document,
    pos: Position,
    placeholder: Option<ButtonSize>,
) -> Result<(), JsValue> {
    if let Some(btn) = html_element(document, BTN_NO_ID) {
        let style = btn.style();
        match pos {
            Position::Relative => {
                style.set_property("position", "relative")?;
                style.remove_property("left")?;
                style.remove_property("top")?;
            }
            Position::Absolute { left, top } => {
                style.set_property("position", "absolute")?;
                style.set_property("left", &format!("{left}px"))?;
                style.set_property("top", &format!("{top}px"))?;
            }
        }
    }
    if let Some(ph) = html_element(document, NO_PLACEHOLDER_ID) {
        let style = ph.style();
        match placeholder {
            Some(size) => {
                style.set_property("display", "inline-block")?;
                style.set_property("width", &format!("{}px", size.width))?;
                style.set_property("height", &format!("{}px", size.height))?;
            }
            None => {
                style.set_property("display", "none")?;
            }
        }
    }
    Ok(())
}

/// Swap the prompt for the success message and reveal the confetti layer.
pub fn show_celebration(document: &Document) -> Result<(), JsValue> {
    set_display(document, PROMPT_ID, "none")?;
    set_display(document, SUCCESS_ID, "block")?;
    set_display(document, CONFETTI_ID, "block")?;
    Ok(())
}
