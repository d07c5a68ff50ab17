//! Spell state: vision level, the fairy timer and live lightning strikes.
//!
//! Stored on `SimulationEngine`. Timed effects are measured against
//! simulation time, never wall-clock time.

use rampart_core::config::SpellConfig;
use rampart_core::types::CellCoord;

/// A lightning bolt still showing on a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningStrike {
    pub cell: CellCoord,
    pub started_at_secs: f64,
}

#[derive(Debug, Clone)]
pub struct SpellBook {
    /// 1-based.
    pub vision_level: u32,
    fairy_started_at: Option<f64>,
    /// Lightning was picked in the shop and awaits a target cell.
    pub lightning_armed: bool,
    strikes: Vec<LightningStrike>,
}

impl Default for SpellBook {
    fn default() -> Self {
        Self {
            vision_level: 1,
            fairy_started_at: None,
            lightning_armed: false,
            strikes: Vec::new(),
        }
    }
}

impl SpellBook {
    /// Price of the next vision level, `None` once maxed.
    pub fn vision_upgrade_price(&self, spells: &SpellConfig) -> Option<u32> {
        (self.vision_level < spells.vision_max_level)
            .then(|| self.vision_level.saturating_mul(spells.base_price))
    }

    pub fn fairy_active(&self, now: f64, spells: &SpellConfig) -> bool {
        self.fairy_remaining(now, spells) > 0.0
    }

    pub fn fairy_remaining(&self, now: f64, spells: &SpellConfig) -> f64 {
        match self.fairy_started_at {
            Some(start) => (start + spells.fairy_duration_secs - now).max(0.0),
            None => 0.0,
        }
    }

    pub fn start_fairy(&mut self, now: f64) {
        self.fairy_started_at = Some(now);
    }

    /// Whether a strike on `cell` is still showing.
    pub fn strike_active(&self, cell: CellCoord, now: f64, spells: &SpellConfig) -> bool {
        self.strikes
            .iter()
            .any(|s| s.cell == cell && now - s.started_at_secs < spells.lightning_effect_secs)
    }

    pub fn record_strike(&mut self, cell: CellCoord, now: f64) {
        self.strikes.push(LightningStrike {
            cell,
            started_at_secs: now,
        });
    }

    pub fn strikes(&self) -> &[LightningStrike] {
        &self.strikes
    }

    /// Drop finished timed effects.
    pub fn expire(&mut self, now: f64, spells: &SpellConfig) {
        if !self.fairy_active(now, spells) {
            self.fairy_started_at = None;
        }
        self.strikes
            .retain(|s| now - s.started_at_secs < spells.lightning_effect_secs);
    }
}
