use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlElement, HtmlImageElement, Url};

use crate::dom::set_background_label;
use crate::state::State;

/// Decodes `file` and composites it as the board background once loaded.
///
/// Uploads are not serialized: if several are in flight, whichever image
/// finishes decoding last ends up on the board.
pub fn load_background(
    state: Rc<RefCell<State>>,
    file: &File,
    label: HtmlElement,
) -> Result<(), JsValue> {
    let url = Url::create_object_url_with_blob(file)?;
    let image = HtmlImageElement::new()?;
    let name = file.name();
    log::debug!("Decoding background {name}");

    let slot = HandlerSlot::new();
    let onload = {
        let image = image.clone();
        let url = url.clone();
        let name = name.clone();
        let slot = slot.clone();
        Closure::<dyn FnMut(Event)>::new(move |_| {
            detach_decode(&image, &url);
            {
                let mut state = state.borrow_mut();
                state.board.set_background(&image, name.as_str());
                set_background_label(&label, state.board.background_name());
            }
            drop(slot.disarm());
        })
    };
    let onerror = {
        let image = image.clone();
        let url = url.clone();
        let slot = slot.clone();
        Closure::<dyn FnMut(Event)>::new(move |_| {
            detach_decode(&image, &url);
            log::error!("Failed to decode background image {name}");
            drop(slot.disarm());
        })
    };
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    slot.arm(DecodeHandlers {
        _onload: onload,
        _onerror: onerror,
    });
    image.set_src(&url);
    Ok(())
}

/// Unhooks both callbacks so neither can fire again, and frees the blob URL.
fn detach_decode(image: &HtmlImageElement, url: &str) {
    image.set_onload(None);
    image.set_onerror(None);
    if let Err(err) = Url::revoke_object_url(url) {
        log::debug!("Failed to revoke {url}: {err:?}");
    }
}

struct DecodeHandlers {
    _onload: Closure<dyn FnMut(Event)>,
    _onerror: Closure<dyn FnMut(Event)>,
}

/// Keeps one-shot callbacks alive until whichever fires first disarms the
/// slot. Each callback holds a clone of the slot, so disarming also breaks
/// the cycle. The wasm-bindgen glue defers the free of a closure dropped
/// during its own call until that call returns.
struct HandlerSlot<T>(Rc<RefCell<Option<T>>>);

impl<T> Clone for HandlerSlot<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> HandlerSlot<T> {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    fn arm(&self, handlers: T) {
        *self.0.borrow_mut() = Some(handlers);
    }

    fn disarm(&self) -> Option<T> {
        self.0.borrow_mut().take()
    }
}
