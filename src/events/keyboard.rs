use crate::dom;
use crate::shell::Shell;
use sunyata_core::{command_for_key, Command};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys typed into a form widget belong to that widget.
fn typing_into_widget(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "SELECT" | "TEXTAREA"))
        .unwrap_or(false)
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, shell: &Shell) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || typing_into_widget(ev) {
        return;
    }
    let key = ev.key();
    let Some(cmd) = command_for_key(&key) else {
        return;
    };
    log::debug!("[keys] {:?} -> {:?}", key, cmd);
    if matches!(
        cmd,
        Command::TogglePause | Command::NextVerse | Command::PrevVerse
    ) {
        // keep Space and the arrows from scrolling the page
        ev.prevent_default();
    }
    shell.run(cmd);
}

pub fn wire_global_keydown(shell: Shell) {
    if let Some(window) = web::window() {
        dom::listen(&window, "keydown", move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &shell);
        });
    }
}
