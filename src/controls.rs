//! Builds the controls panel from the active animation's descriptors.

use crate::shell::Shell;
use crate::{dom, overlay, ui};
use sunyata_core::{ControlDescriptor, ControlKind, ControlValue};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Clears the panel and creates one widget per control.
pub fn rebuild(shell: &Shell) {
    let Some(panel) = shell.document.get_element_by_id(overlay::PANEL_ID) else {
        return;
    };
    let mut owned = shell.panel_listeners.borrow_mut();
    let released = dom::release_listeners(&mut owned);
    panel.set_inner_html("");
    let descriptors = shell.app.borrow().controls();
    for desc in descriptors {
        if let Err(e) = add_control(shell, &mut owned, &panel, &desc) {
            log::error!("[controls] {} widget: {:?}", desc.key, e);
        }
    }
    log::debug!(
        "[controls] released {} listeners, attached {} ({} released in total)",
        released,
        owned.len(),
        owned.released()
    );
}

fn set_control(shell: &Shell, key: &'static str, value: ControlValue) {
    let result = shell.app.borrow_mut().set_control(key, value);
    if let Err(e) = result {
        log::warn!("[controls] {}: {}", key, e);
    }
}

fn add_control(
    shell: &Shell,
    owned: &mut dom::OwnedListeners,
    panel: &web::Element,
    desc: &ControlDescriptor,
) -> Result<(), JsValue> {
    let doc = &shell.document;
    let row = doc.create_element("div")?;
    row.set_class_name("control");
    let key = desc.key;
    let kind = desc.kind;

    if kind != ControlKind::Button {
        let label = doc.create_element("label")?;
        label.set_text_content(Some(desc.label));
        row.append_child(&label)?;
    }

    match kind {
        ControlKind::Slider { min, max, step } => {
            let input: web::HtmlInputElement = doc.create_element("input")?.dyn_into()?;
            input.set_type("range");
            input.set_min(&min.to_string());
            input.set_max(&max.to_string());
            input.set_step(&step.to_string());
            input.set_value(&ui::format_value(desc, &desc.value));
            let readout = doc.create_element("span")?;
            readout.set_class_name("readout");
            readout.set_text_content(Some(&ui::format_value(desc, &desc.value)));
            row.append_child(&input)?;
            row.append_child(&readout)?;
            let shell = shell.clone();
            let widget = input.clone();
            dom::listen_owned(owned, &input, "input", move |_: web::Event| {
                if let Some(ControlValue::Number(v)) = ui::parse_widget(kind, &widget.value(), false) {
                    readout.set_text_content(Some(&ui::format_number(v, step)));
                    set_control(&shell, key, ControlValue::Number(v));
                }
            });
        }
        ControlKind::Toggle => {
            let input: web::HtmlInputElement = doc.create_element("input")?.dyn_into()?;
            input.set_type("checkbox");
            input.set_checked(desc.value.as_bool().unwrap_or(false));
            row.append_child(&input)?;
            let shell = shell.clone();
            let widget = input.clone();
            dom::listen_owned(owned, &input, "change", move |_: web::Event| {
                if let Some(v) = ui::parse_widget(kind, "", widget.checked()) {
                    set_control(&shell, key, v);
                }
            });
        }
        ControlKind::Choice { options } => {
            let select: web::HtmlSelectElement = doc.create_element("select")?.dyn_into()?;
            for (i, name) in options.iter().enumerate() {
                let opt = web::HtmlOptionElement::new_with_text_and_value(name, &i.to_string())?;
                select.append_child(&opt)?;
            }
            select.set_selected_index(desc.value.as_choice().unwrap_or(0) as i32);
            row.append_child(&select)?;
            let shell = shell.clone();
            let widget = select.clone();
            dom::listen_owned(owned, &select, "change", move |_: web::Event| {
                if let Some(v) = ui::parse_widget(kind, &widget.value(), false) {
                    set_control(&shell, key, v);
                }
            });
        }
        ControlKind::Button => {
            let button = doc.create_element("button")?;
            button.set_text_content(Some(desc.label));
            row.append_child(&button)?;
            let shell = shell.clone();
            dom::listen_owned(owned, &button, "click", move |_: web::Event| {
                set_control(&shell, key, ControlValue::Trigger);
            });
        }
    }
    panel.append_child(&row)?;
    Ok(())
}
