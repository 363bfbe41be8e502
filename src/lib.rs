#![cfg(target_arch = "wasm32")]
use anyhow::anyhow;
use sunyata_core::{App, AppConfig, Library};
use sunyata_render::SpriteRenderer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod listeners;
mod overlay;
mod query;
mod shell;
mod ui;

use shell::Shell;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sunyata-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Chapter from `?chapter=N`, falling back to the first compiled-in one.
fn pick_chapter(window: &web::Window, library: &Library) -> anyhow::Result<u32> {
    let first = library
        .first_chapter()
        .map(|c| c.number)
        .ok_or_else(|| anyhow!("no chapters compiled in"))?;
    let search = window.location().search().unwrap_or_default();
    Ok(match query::chapter_from_search(&search) {
        Some(n) if library.chapter(n).is_ok() => n,
        Some(n) => {
            log::warn!("[nav] unknown chapter {}; showing chapter {}", n, first);
            first
        }
        None => first,
    })
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let chapter = pick_chapter(&window, &Library::builtin())?;
    let mut app = App::with_builtin(chapter, AppConfig::default())?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(shell::CANVAS_ID)
        .ok_or_else(|| anyhow!("missing #{}", shell::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!(format!("{:?}", e)))?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    app.resize(width, height);

    let shell = Shell::new(document.clone(), app);
    shell.wire_buttons();
    shell.refresh();
    events::keyboard::wire_global_keydown(shell.clone());

    match SpriteRenderer::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), width, height).await {
        Ok(renderer) => {
            log::info!("[gpu] renderer ready at {}x{}", width, height);
            events::pointer::wire_input_handlers(canvas.clone(), shell.clone());
            frame::start_loop(frame::FrameContext::new(shell, renderer, canvas));
        }
        Err(e) => {
            log::error!("[gpu] {}", e);
            shell::show_gpu_error(&document, &e.to_string());
        }
    }
    Ok(())
}
