use crate::constants::{wheel_pixels, CLICK_SLOP_PX};
use crate::dom;
use crate::shell::Shell;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub last: (f32, f32),
    pub down_at: Option<(f32, f32)>,
    pub dragged: bool,
}

/// Pointer position in canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    (
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub shell: Shell,
    pub pointer: Rc<RefCell<PointerState>>,
}

pub fn wire_input_handlers(canvas: web::HtmlCanvasElement, shell: Shell) {
    let w = InputWiring {
        canvas,
        shell,
        pointer: Rc::new(RefCell::new(PointerState::default())),
    };
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "pointerdown", move |ev: web::PointerEvent| {
        let pos = (ev.client_x() as f32, ev.client_y() as f32);
        {
            let mut p = w.pointer.borrow_mut();
            p.down_at = Some(pos);
            p.last = pos;
            p.dragged = false;
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "pointermove", move |ev: web::PointerEvent| {
        let pos = (ev.client_x() as f32, ev.client_y() as f32);
        let delta = {
            let mut p = w.pointer.borrow_mut();
            let Some(start) = p.down_at else {
                return;
            };
            let delta = (pos.0 - p.last.0, pos.1 - p.last.1);
            p.last = pos;
            if (pos.0 - start.0).hypot(pos.1 - start.1) > CLICK_SLOP_PX {
                p.dragged = true;
            }
            delta
        };
        w.shell.app.borrow_mut().orbit(delta.0, delta.1);
    });
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "pointerup", move |ev: web::PointerEvent| {
        let click = {
            let mut p = w.pointer.borrow_mut();
            let was_down = p.down_at.take().is_some();
            was_down && !p.dragged
        };
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if click {
            let (sx, sy) = pointer_canvas_px(&ev, &w.canvas);
            let hit = w.shell.app.borrow_mut().pick_screen(sx, sy);
            if let Some(hit) = hit {
                log::info!("[pick] {} #{}", hit.label, hit.sprite);
            }
        }
    });
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let dy = wheel_pixels(ev.delta_y(), ev.delta_mode());
        w.shell.app.borrow_mut().zoom(dy);
    });
}
