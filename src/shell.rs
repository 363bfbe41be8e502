//! The page around the canvas: verse text, navigation buttons and the
//! sound and panel toggles. Everything the DOM handlers need is bundled
//! in [`Shell`], which is cheap to clone into closures.

use crate::audio::Chime;
use crate::{controls, dom, overlay, ui};
use std::cell::RefCell;
use std::rc::Rc;
use sunyata_core::{App, Command};
use web_sys as web;

pub const CANVAS_ID: &str = "app-canvas";
pub const VERSE_NUMBER_ID: &str = "verse-number";
pub const VERSE_TEXT_ID: &str = "verse-text";
pub const VERSE_CONCEPT_ID: &str = "verse-concept";
pub const VERSE_PARALLEL_ID: &str = "verse-parallel";
pub const VERSE_EXPLANATION_ID: &str = "verse-explanation";
pub const CHAPTER_TITLE_ID: &str = "chapter-title";
pub const PREV_ID: &str = "prev-verse";
pub const NEXT_ID: &str = "next-verse";
pub const PAUSE_ID: &str = "pause-btn";
pub const RESET_ID: &str = "reset-btn";
pub const PANEL_TOGGLE_ID: &str = "panel-toggle";
pub const SOUND_TOGGLE_ID: &str = "sound-toggle";
pub const GPU_ERROR_ID: &str = "gpu-error";
pub const PHASE_ID: &str = "phase-label";

#[derive(Clone)]
pub struct Shell {
    pub document: web::Document,
    pub app: Rc<RefCell<App>>,
    pub chime: Rc<RefCell<Chime>>,
    /// Listeners of the generated control widgets, released on rebuild.
    pub panel_listeners: Rc<RefCell<dom::OwnedListeners>>,
}

impl Shell {
    pub fn new(document: web::Document, app: App) -> Self {
        Self {
            document,
            app: Rc::new(RefCell::new(app)),
            chime: Rc::new(RefCell::new(Chime::default())),
            panel_listeners: Rc::new(RefCell::new(dom::OwnedListeners::default())),
        }
    }

    /// Writes the current verse and button states into the page.
    pub fn render_verse(&self) {
        let app = self.app.borrow();
        let entry = app.current_entry();
        let (index, total) = app.position();
        let doc = &self.document;
        let chapter = app.chapter();
        dom::set_text(doc, CHAPTER_TITLE_ID, &format!("{}: {}", chapter.title, chapter.subtitle));
        dom::set_text(doc, VERSE_NUMBER_ID, &ui::verse_counter(entry.id, index, total));
        dom::set_text(doc, VERSE_TEXT_ID, entry.display_text);
        dom::set_text(doc, VERSE_CONCEPT_ID, entry.concept_text);
        dom::set_text(doc, VERSE_PARALLEL_ID, entry.parallel_text);
        dom::set_text(doc, VERSE_EXPLANATION_ID, entry.explanation_text);
        dom::set_disabled(doc, PREV_ID, index == 0);
        dom::set_disabled(doc, NEXT_ID, index + 1 >= total);
        dom::set_text(doc, PAUSE_ID, ui::pause_label(app.is_paused()));
    }

    pub fn refresh(&self) {
        self.render_verse();
        controls::rebuild(self);
    }

    /// Runs a key or button command and updates whatever it touched.
    pub fn run(&self, cmd: Command) {
        let before = self.app.borrow().current_entry().id;
        let result = self.app.borrow_mut().run_command(cmd);
        match result {
            Ok(true) => match cmd {
                Command::NextVerse | Command::PrevVerse => {
                    let (changed, index) = {
                        let app = self.app.borrow();
                        (app.current_entry().id != before, app.position().0)
                    };
                    if changed {
                        log::info!("[nav] verse {}", self.app.borrow().current_entry().id);
                        self.refresh();
                        self.chime.borrow().play_for_verse(index);
                    }
                }
                Command::Reset => controls::rebuild(self),
                _ => self.render_verse(),
            },
            Ok(false) => match cmd {
                Command::TogglePanel => {
                    let visible = overlay::toggle(&self.document);
                    log::info!("[keys] panel visible={}", visible);
                }
                Command::ToggleSound => {
                    let on = self.chime.borrow_mut().toggle();
                    dom::set_text(&self.document, SOUND_TOGGLE_ID, if on { "Sound: on" } else { "Sound: off" });
                }
                _ => {}
            },
            Err(e) => log::error!("[nav] {:?} failed: {}", cmd, e),
        }
    }

    pub fn wire_buttons(&self) {
        let buttons = [
            (PREV_ID, Command::PrevVerse),
            (NEXT_ID, Command::NextVerse),
            (PAUSE_ID, Command::TogglePause),
            (RESET_ID, Command::Reset),
            (PANEL_TOGGLE_ID, Command::TogglePanel),
            (SOUND_TOGGLE_ID, Command::ToggleSound),
        ];
        for (id, cmd) in buttons {
            let shell = self.clone();
            dom::add_click_listener(&self.document, id, move || shell.run(cmd));
        }
    }

    pub fn show_phase(&self, label: Option<&str>) {
        dom::set_text(&self.document, PHASE_ID, label.unwrap_or(""));
    }
}

/// Replaces the canvas area with a readable message; the verse text and
/// navigation keep working without a renderer.
pub fn show_gpu_error(document: &web::Document, detail: &str) {
    dom::set_text(
        document,
        GPU_ERROR_ID,
        &format!("This browser could not start WebGPU, so the animation is unavailable. ({detail})"),
    );
    dom::set_hidden(document, GPU_ERROR_ID, false);
    dom::set_hidden(document, CANVAS_ID, true);
}
