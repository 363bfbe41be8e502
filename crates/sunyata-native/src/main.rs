use std::sync::Arc;

use anyhow::{anyhow, Context};
use sunyata_core::{command_for_key, App, AppConfig, Command, Library};
use sunyata_render::SpriteRenderer;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

/// Presses that move less than this many pixels count as clicks.
const CLICK_SLOP_PX: f64 = 4.0;

#[derive(Default)]
struct PointerState {
    position: PhysicalPosition<f64>,
    pressed_at: Option<PhysicalPosition<f64>>,
    dragged: bool,
}

fn parse_chapter(mut args: impl Iterator<Item = String>) -> anyhow::Result<Option<u32>> {
    while let Some(arg) = args.next() {
        if let Some(v) = arg.strip_prefix("--chapter=") {
            return Ok(Some(v.parse().with_context(|| format!("bad chapter `{v}`"))?));
        }
        if arg == "--chapter" {
            let v = args.next().ok_or_else(|| anyhow!("--chapter needs a number"))?;
            return Ok(Some(v.parse().with_context(|| format!("bad chapter `{v}`"))?));
        }
    }
    Ok(None)
}

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight"),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft"),
        Key::Named(NamedKey::PageDown) => Some("PageDown"),
        Key::Named(NamedKey::PageUp) => Some("PageUp"),
        Key::Named(NamedKey::Space) => Some(" "),
        Key::Character(s) => Some(s.as_str()),
        _ => None,
    }
}

fn show_verse(window: &Window, app: &App) {
    let entry = app.current_entry();
    let (index, total) = app.position();
    window.set_title(&format!(
        "{} {}: {} ({}/{})",
        app.chapter().title,
        entry.id,
        entry.concept_text,
        index + 1,
        total
    ));
    log::info!("[nav] verse {}: {}", entry.id, entry.display_text);
    log::info!("[nav] {}", entry.parallel_text);
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let library = Library::builtin();
    let chapter = match parse_chapter(std::env::args().skip(1))? {
        Some(n) => n,
        None => library
            .first_chapter()
            .map(|c| c.number)
            .ok_or_else(|| anyhow!("no chapters compiled in"))?,
    };
    let mut app = App::with_builtin(chapter, AppConfig::default())?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("sunyata")
            .with_inner_size(LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)?,
    );
    let size = window.inner_size();
    let mut renderer = pollster::block_on(SpriteRenderer::new(
        window.clone(),
        size.width,
        size.height,
    ))
    .context("[gpu] renderer init")?;
    app.resize(size.width, size.height);
    show_verse(&window, &app);
    for c in app.controls() {
        log::info!("[controls] {} ({:?})", c.key, c.kind);
    }

    let mut pointer = PointerState::default();
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                app.resize(size.width, size.height);
                renderer.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Key::Named(NamedKey::Escape) = logical_key {
                    elwt.exit();
                    return;
                }
                let Some(cmd) = key_name(&logical_key).and_then(command_for_key) else {
                    return;
                };
                match app.run_command(cmd) {
                    Ok(true) => {
                        if matches!(cmd, Command::NextVerse | Command::PrevVerse) {
                            show_verse(&window, &app);
                        }
                    }
                    Ok(false) => log::debug!("[keys] {:?} has no native counterpart", cmd),
                    Err(e) => log::error!("[keys] {:?} failed: {}", cmd, e),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(start) = pointer.pressed_at {
                    let (dx, dy) = (position.x - pointer.position.x, position.y - pointer.position.y);
                    app.orbit(dx as f32, dy as f32);
                    if (position.x - start.x).hypot(position.y - start.y) > CLICK_SLOP_PX {
                        pointer.dragged = true;
                    }
                }
                pointer.position = position;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    pointer.pressed_at = Some(pointer.position);
                    pointer.dragged = false;
                }
                ElementState::Released => {
                    if pointer.pressed_at.take().is_some() && !pointer.dragged {
                        let p = pointer.position;
                        if let Some(hit) = app.pick_screen(p.x as f32, p.y as f32) {
                            log::info!("[pick] {}", hit.label);
                        }
                    }
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * 100.0,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                app.zoom(dy);
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = app.frame(&mut renderer) {
                    log::error!("[gpu] {}", e);
                    elwt.exit();
                } else if app.fps_log_due() {
                    log::debug!("[gpu] {:.1} fps after {} frames", app.fps(), app.frames());
                }
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_chapter;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn chapter_flag_forms() {
        assert_eq!(parse_chapter(args(&[])).unwrap(), None);
        assert_eq!(parse_chapter(args(&["--chapter", "3"])).unwrap(), Some(3));
        assert_eq!(parse_chapter(args(&["-v", "--chapter=24"])).unwrap(), Some(24));
        assert!(parse_chapter(args(&["--chapter"])).is_err());
        assert!(parse_chapter(args(&["--chapter", "two"])).is_err());
    }
}
