//! Effects module - timed speed modifiers
//!
//! Effects carry a factor in integer percent (150 = 1.5x tick rate) and an
//! absolute expiry time. Concurrent effects compose multiplicatively, so a
//! speed-up and a slow-down can net out close to the base rate.

use arrayvec::ArrayVec;

use crate::types::{EffectKind, EFFECT_DURATION_MS, SLOW_FACTOR_PCT, SPEED_FACTOR_PCT};

/// More simultaneous effects than this cannot occur: each food spawns at most
/// one effect and expiries are pruned every tick at 5s lifetimes.
const MAX_ACTIVE_EFFECTS: usize = 16;

/// A speed modifier currently in force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Tick-rate factor in integer percent (150 = faster, 70 = slower)
    pub factor_pct: u32,
    /// Absolute time this effect lapses, in engine milliseconds
    pub expires_at_ms: u64,
}

impl ActiveEffect {
    pub fn start(kind: EffectKind, now_ms: u64) -> Self {
        let factor_pct = match kind {
            EffectKind::Speed => SPEED_FACTOR_PCT,
            EffectKind::Slow => SLOW_FACTOR_PCT,
        };
        Self {
            kind,
            factor_pct,
            expires_at_ms: now_ms + EFFECT_DURATION_MS,
        }
    }
}

/// The set of effects currently in force
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectSet {
    effects: ArrayVec<ActiveEffect, MAX_ACTIVE_EFFECTS>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    /// Add an effect; silently dropped if the set is saturated
    pub fn push(&mut self, effect: ActiveEffect) {
        let _ = self.effects.try_push(effect);
    }

    /// Drop every effect whose expiry has passed
    pub fn prune(&mut self, now_ms: u64) {
        self.effects.retain(|e| e.expires_at_ms > now_ms);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Net tick-rate factor of all active effects, in integer percent.
    ///
    /// 100 means base speed; 150 and 70 together give 105. Never zero:
    /// truncating division under a deep slow stack bottoms out at 1, which
    /// interval math divides by.
    pub fn net_factor_pct(&self) -> u32 {
        self.effects
            .iter()
            .fold(100u32, |acc, e| acc * e.factor_pct / 100)
            .max(1)
    }

    /// Remaining lifetime of the longest-lived effect of `kind`, in ms
    pub fn remaining_ms(&self, kind: EffectKind, now_ms: u64) -> Option<u64> {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.expires_at_ms.saturating_sub(now_ms))
            .max()
    }
}
