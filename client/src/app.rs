use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, PointerEvent};

use sketchpad_shared::{Board, Color, Tool};

use crate::config::{init_logging, read_config};
use crate::dom::{
    context_2d, event_to_point, get_element, set_background_label, update_width_label, Toolbar,
};
use crate::render::CanvasSurface;
use crate::state::State;
use crate::upload::load_background;

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    init_logging(&window);
    let started = Rc::new(Cell::new(false));

    if document.ready_state() == "complete" {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            log::error!("Failed to start sketchpad: {err:?}");
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let config = read_config(&document);
    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    canvas.set_width(config.width);
    canvas.set_height(config.height);

    let ctx = match context_2d(&canvas) {
        Ok(ctx) => ctx,
        Err(err) => {
            log::error!("Canvas 2d context unavailable, drawing disabled: {err:?}");
            return Ok(());
        }
    };

    let toolbar = Toolbar::from_document(&document)?;
    toolbar.apply_config(&config);

    let surface = CanvasSurface::new(&canvas, ctx);
    let board = Board::new(surface, &config);
    toolbar.sync(&canvas, &board.tools);
    let state = Rc::new(RefCell::new(State::new(canvas.clone(), board)));
    log::info!("Sketchpad ready ({}x{})", config.width, config.height);

    {
        let color_state = state.clone();
        let color_input = toolbar.color_input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let value = color_input.value();
            match value.parse::<Color>() {
                Ok(color) => color_state.borrow_mut().board.tools.set_brush_color(color),
                Err(err) => log::warn!("Ignoring brush color: {err}"),
            }
        });
        toolbar
            .color_input
            .add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let width_state = state.clone();
        let width_input = toolbar.width_input.clone();
        let width_value = toolbar.width_value.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            width_state
                .borrow_mut()
                .board
                .tools
                .set_brush_width(width_input.value_as_number());
            update_width_label(&width_input, &width_value);
        });
        toolbar
            .width_input
            .add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let tool_state = state.clone();
        let tool_toolbar = toolbar.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let value = tool_toolbar.tool_select.value();
            let tool = match value.parse::<Tool>() {
                Ok(tool) => tool,
                Err(err) => {
                    log::warn!("{err}");
                    return;
                }
            };
            let mut state = tool_state.borrow_mut();
            state.board.select_tool(tool);
            tool_toolbar.sync(&state.canvas, &state.board.tools);
        });
        toolbar
            .tool_select
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let text_state = state.clone();
        let text_input = toolbar.text_input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            text_state
                .borrow_mut()
                .board
                .tools
                .set_pending_text(text_input.value());
        });
        toolbar
            .text_input
            .add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let font_state = state.clone();
        let font_size_input = toolbar.font_size_input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            font_state
                .borrow_mut()
                .board
                .tools
                .set_font_size(font_size_input.value_as_number());
        });
        toolbar
            .font_size_input
            .add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let clear_state = state.clone();
        let clear_label = toolbar.background_label.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = clear_state.borrow_mut();
            state.board.clear();
            set_background_label(&clear_label, state.board.background_name());
        });
        toolbar
            .clear_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let eraser_state = state.clone();
        let eraser_toolbar = toolbar.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = eraser_state.borrow_mut();
            state.board.toggle_eraser();
            eraser_toolbar.sync(&state.canvas, &state.board.tools);
        });
        toolbar
            .eraser_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let upload_state = state.clone();
        let file_input = toolbar.file_input.clone();
        let upload_label = toolbar.background_label.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let Some(file) = file_input.files().and_then(|list| list.get(0)) else {
                return;
            };
            if let Err(err) = load_background(upload_state.clone(), &file, upload_label.clone()) {
                log::error!("Failed to start background upload: {err:?}");
            }
        });
        toolbar
            .file_input
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let down_state = state.clone();
        let down_toolbar = toolbar.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let mut state = down_state.borrow_mut();
            if state.pointer.is_active() {
                return;
            }
            let Some(point) = event_to_point(&state.canvas, &event) else {
                return;
            };
            event.prevent_default();
            state.board.pointer_down(point);
            if state.board.is_drawing() {
                let pointer_id = event.pointer_id();
                state.pointer.claim(pointer_id);
                if let Err(err) = state.canvas.set_pointer_capture(pointer_id) {
                    // Without capture the release may never reach the canvas.
                    log::warn!("Pointer capture refused for {pointer_id}: {err:?}");
                    state.pointer.release(pointer_id);
                    state.board.cancel();
                }
            }
            down_toolbar.sync(&state.canvas, &state.board.tools);
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            if !state.pointer.owns(event.pointer_id()) {
                return;
            }
            if let Some(point) = event_to_point(&state.canvas, &event) {
                state.board.pointer_move(point);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_state = state.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let pointer_id = event.pointer_id();
            let canvas = {
                let mut state = up_state.borrow_mut();
                if !state.pointer.release(pointer_id) {
                    return;
                }
                match event_to_point(&state.canvas, &event) {
                    Some(point) => state.board.pointer_up(point),
                    None => state.board.cancel(),
                }
                state.canvas.clone()
            };
            // Released outside the borrow: lostpointercapture re-enters the state.
            if canvas.has_pointer_capture(pointer_id) {
                if let Err(err) = canvas.release_pointer_capture(pointer_id) {
                    log::debug!("Pointer capture already gone for {pointer_id}: {err:?}");
                }
            }
        });
        canvas.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let cancel_state = state.clone();
        let oncancel = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let Ok(mut state) = cancel_state.try_borrow_mut() else {
                return;
            };
            if !state.pointer.release(event.pointer_id()) {
                return;
            }
            log::debug!("Gesture cancelled by {}", event.type_());
            state.board.cancel();
        });
        // Losing capture mid-gesture (element removed, capture stolen) ends
        // the gesture like a cancel so the next press is accepted.
        for kind in ["pointercancel", "lostpointercapture"] {
            canvas.add_event_listener_with_callback(kind, oncancel.as_ref().unchecked_ref())?;
        }
        oncancel.forget();
    }

    Ok(())
}
