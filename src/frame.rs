use crate::dom;
use crate::shell::Shell;
use std::cell::RefCell;
use std::rc::Rc;
use sunyata_render::SpriteRenderer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub shell: Shell,
    pub renderer: SpriteRenderer,
    pub canvas: web::HtmlCanvasElement,
    last_phase: Option<&'static str>,
    failed: bool,
}

impl FrameContext {
    pub fn new(shell: Shell, renderer: SpriteRenderer, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            shell,
            renderer,
            canvas,
            last_phase: None,
            failed: false,
        }
    }

    pub fn frame(&mut self) {
        // Canvas size only reaches the camera aspect and GPU targets.
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        if (w, h) != self.renderer.size() {
            self.shell.app.borrow_mut().resize(w, h);
            self.renderer.resize(w, h);
        }

        let result = self.shell.app.borrow_mut().frame(&mut self.renderer);
        match result {
            Ok(()) => self.failed = false,
            Err(e) => {
                if !self.failed {
                    log::error!("[gpu] render error: {}", e);
                }
                self.failed = true;
            }
        }

        {
            let app = self.shell.app.borrow();
            if app.fps_log_due() {
                log::debug!("[gpu] {:.1} fps after {} frames", app.fps(), app.frames());
            }
        }

        let phase = self.shell.app.borrow().phase_label();
        if phase != self.last_phase {
            self.last_phase = phase;
            self.shell.show_phase(phase);
        }
    }
}

pub fn start_loop(frame_ctx: FrameContext) {
    let frame_ctx = Rc::new(RefCell::new(frame_ctx));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
