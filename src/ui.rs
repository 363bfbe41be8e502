//! Text shown next to verses and control widgets.

use sunyata_core::{ControlDescriptor, ControlKind, ControlValue};

/// "Verse 3 of 12" style counter.
pub fn verse_counter(id: u32, index: usize, total: usize) -> String {
    format!("Verse {} ({}/{})", id, index + 1, total)
}

/// Readout beside a slider, with as many decimals as the step needs.
pub fn format_number(value: f32, step: f32) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10() - 1e-3).ceil().clamp(0.0, 4.0) as usize
    };
    format!("{:.*}", decimals, value)
}

pub fn format_value(desc: &ControlDescriptor, value: &ControlValue) -> String {
    match (desc.kind, value) {
        (ControlKind::Slider { step, .. }, ControlValue::Number(v)) => format_number(*v, step),
        (ControlKind::Toggle, ControlValue::Bool(on)) => if *on { "on" } else { "off" }.to_string(),
        (ControlKind::Choice { options, .. }, ControlValue::Choice(i)) => {
            options.get(*i).copied().unwrap_or("?").to_string()
        }
        _ => String::new(),
    }
}

/// Reads a widget's raw string value back into a control value.
/// Malformed numbers yield `None` and the widget is left alone.
pub fn parse_widget(kind: ControlKind, raw: &str, checked: bool) -> Option<ControlValue> {
    match kind {
        ControlKind::Slider { .. } => raw.trim().parse::<f32>().ok().map(ControlValue::Number),
        ControlKind::Toggle => Some(ControlValue::Bool(checked)),
        ControlKind::Choice { .. } => raw.trim().parse::<usize>().ok().map(ControlValue::Choice),
        ControlKind::Button => Some(ControlValue::Trigger),
    }
}

pub fn pause_label(paused: bool) -> &'static str {
    if paused {
        "Play"
    } else {
        "Pause"
    }
}
