//! Transient visual/audio decorations and their lifetime sweeps.
//!
//! Every short-lived effect is one `Effect` with a kind discriminant and a
//! shared spawn time, so expiry is a single retain pass. The portal is
//! singular and lives in its own slot.

use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    Burst { radius: f32 },
    Sparkle { angle: f32, radius: f32 },
    Seed { duration: f32, radius: f32 },
    Whisper,
    Wave { radius: f32 },
    WrapPortal { radius: f32 },
}

#[derive(Clone, Copy, Debug)]
pub struct Effect {
    pub pos: Vec2,
    pub spawned: f64,
    pub kind: EffectKind,
}

impl Effect {
    pub fn lifetime(&self) -> f32 {
        match self.kind {
            EffectKind::Burst { .. } => BURST_LIFE_SEC,
            EffectKind::Sparkle { .. } => SPARKLE_LIFE_SEC,
            EffectKind::Seed { duration, .. } => duration,
            EffectKind::Whisper => WHISPER_LIFE_SEC,
            EffectKind::Wave { .. } => WAVE_LIFE_SEC,
            EffectKind::WrapPortal { .. } => WRAP_LIFE_SEC,
        }
    }

    pub fn age(&self, now: f64) -> f32 {
        (now - self.spawned).max(0.0) as f32
    }

    /// Normalized age in [0, 1] over the effect's lifetime.
    pub fn progress(&self, now: f64) -> f32 {
        (self.age(now) / self.lifetime()).clamp(0.0, 1.0)
    }

    pub fn expired(&self, now: f64) -> bool {
        self.age(now) > self.lifetime()
    }
}

/// The one attractor field active at a time.
#[derive(Clone, Copy, Debug)]
pub struct Portal {
    pub pos: Vec2,
    pub radius: f32,
    pub spawned: f64,
    pub life: f32,
}

impl Portal {
    pub fn progress(&self, now: f64) -> f32 {
        (((now - self.spawned) as f32) / self.life).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct Effects {
    pub transients: Vec<Effect>,
    pub portal: Option<Portal>,
    last_portal: f64,
    last_whisper: f64,
    last_burst: f64,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            transients: Vec::new(),
            portal: None,
            // Never gate the first spawn of each kind.
            last_portal: f64::NEG_INFINITY,
            last_whisper: f64::NEG_INFINITY,
            last_burst: f64::NEG_INFINITY,
        }
    }
}

impl Effects {
    pub fn spawn(&mut self, pos: Vec2, now: f64, kind: EffectKind) {
        self.transients.push(Effect {
            pos,
            spawned: now,
            kind,
        });
    }

    pub fn spawn_seed(&mut self, pos: Vec2, now: f64) {
        self.spawn(
            pos,
            now,
            EffectKind::Seed {
                duration: SEED_DURATION_SEC,
                radius: SEED_RADIUS_PX,
            },
        );
    }

    /// Whispers are rate-limited; returns whether one was emitted.
    pub fn try_whisper(&mut self, pos: Vec2, now: f64) -> bool {
        if now - self.last_whisper <= WHISPER_INTERVAL_SEC {
            return false;
        }
        self.last_whisper = now;
        self.spawn(pos, now, EffectKind::Whisper);
        true
    }

    /// Loop bursts share one refractory window with their sparkle shower.
    pub fn burst_allowed(&self, now: f64) -> bool {
        now - self.last_burst > LOOP_INTERVAL_SEC
    }

    pub fn note_burst(&mut self, now: f64) {
        self.last_burst = now;
    }

    pub fn portal_allowed(&self, now: f64) -> bool {
        self.portal.is_none() && now - self.last_portal > PORTAL_INTERVAL_SEC
    }

    pub fn spawn_portal(&mut self, pos: Vec2, radius: f32, now: f64) {
        self.portal = Some(Portal {
            pos,
            radius,
            spawned: now,
            life: PORTAL_LIFE_SEC,
        });
        self.last_portal = now;
    }

    /// Active seeds, i.e. not yet past their own duration.
    pub fn seeds(&self, now: f64) -> impl Iterator<Item = &Effect> {
        self.transients.iter().filter(move |e| {
            matches!(e.kind, EffectKind::Seed { .. }) && !e.expired(now)
        })
    }

    /// Drop everything whose age exceeds its lifetime. Expired entries are
    /// removed exactly once and never come back.
    pub fn sweep(&mut self, now: f64) {
        self.transients.retain(|e| !e.expired(now));
        if let Some(p) = self.portal {
            if (now - p.spawned) as f32 > p.life {
                self.portal = None;
            }
        }
    }
}
