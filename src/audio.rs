//! Optional chime on verse change. Silent until the user turns sound on;
//! the `AudioContext` is created lazily from that click so browsers'
//! autoplay rules are satisfied.

use crate::constants::{chime_hz, CHIME_ATTACK_SEC, CHIME_DURATION_SEC, CHIME_GAIN};
use web_sys as web;

#[derive(Default)]
pub struct Chime {
    ctx: Option<web::AudioContext>,
    master: Option<web::GainNode>,
    enabled: bool,
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Option<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Some(g)
        }
        Err(e) => {
            log::error!("[audio] {} GainNode error: {:?}", label, e);
            None
        }
    }
}

impl Chime {
    /// Flips sound on or off and returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.enabled {
            self.enabled = false;
            if let Some(ctx) = &self.ctx {
                _ = ctx.suspend();
            }
        } else {
            self.enabled = self.ensure_context();
        }
        log::info!("[audio] sound={}", self.enabled);
        self.enabled
    }

    fn ensure_context(&mut self) -> bool {
        if let Some(ctx) = &self.ctx {
            _ = ctx.resume();
            return true;
        }
        let ctx = match web::AudioContext::new() {
            Ok(c) => c,
            Err(e) => {
                log::error!("[audio] AudioContext error: {:?}", e);
                return false;
            }
        };
        let Some(master) = create_gain(&ctx, CHIME_GAIN, "master") else {
            return false;
        };
        _ = master.connect_with_audio_node(&ctx.destination());
        _ = ctx.resume();
        self.ctx = Some(ctx);
        self.master = Some(master);
        true
    }

    /// One soft sine note pitched by the verse's position in the chapter.
    pub fn play_for_verse(&self, index: usize) {
        if !self.enabled {
            return;
        }
        let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
            return;
        };
        let Ok(src) = web::OscillatorNode::new(ctx) else {
            return;
        };
        src.set_type(web::OscillatorType::Sine);
        src.frequency().set_value(chime_hz(index));
        let Some(env) = create_gain(ctx, 0.0, "chime") else {
            return;
        };
        let t0 = ctx.current_time() + 0.005;
        _ = env.gain().linear_ramp_to_value_at_time(1.0, t0 + CHIME_ATTACK_SEC);
        _ = env
            .gain()
            .exponential_ramp_to_value_at_time(0.001, t0 + CHIME_DURATION_SEC);
        _ = src.connect_with_audio_node(&env);
        _ = env.connect_with_audio_node(master);
        _ = src.start_with_when(t0);
        _ = src.stop_with_when(t0 + CHIME_DURATION_SEC + 0.05);
    }
}
