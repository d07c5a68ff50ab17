//! Economy data model: gold, lives and the live price of each tower kind.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities.

use std::collections::HashMap;

use rampart_core::config::{EconomyConfig, TowerTable};
use rampart_core::enums::TowerKind;

/// Running economy state tracked by the engine.
#[derive(Debug, Clone)]
pub struct Economy {
    pub gold: u32,
    pub lives: u32,
    prices: HashMap<TowerKind, u32>,
}

impl Economy {
    pub fn new(economy: &EconomyConfig, towers: &TowerTable) -> Self {
        let prices = TowerKind::ALL
            .iter()
            .map(|&kind| (kind, towers.get(kind).price))
            .collect();
        Self {
            gold: economy.starting_gold,
            lives: economy.starting_lives,
            prices,
        }
    }

    /// Current shop price of a tower kind.
    pub fn price_of(&self, kind: TowerKind) -> u32 {
        self.prices.get(&kind).copied().unwrap_or(0)
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.gold >= amount
    }

    /// Debit `amount` if there is enough gold. Returns whether it was paid.
    pub fn spend(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn earn(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Remove lives, flooring at zero. Returns the lives left.
    pub fn lose_lives(&mut self, amount: u32) -> u32 {
        self.lives = self.lives.saturating_sub(amount);
        self.lives
    }

    /// Move the kind's price up its curve after a purchase.
    pub fn record_purchase(&mut self, kind: TowerKind, towers: &TowerTable) {
        let next = towers.get(kind).price_curve.after_purchase(self.price_of(kind));
        self.prices.insert(kind, next);
    }

    /// Move the kind's price down its curve after a sale.
    pub fn record_sale(&mut self, kind: TowerKind, towers: &TowerTable) {
        let next = towers.get(kind).price_curve.after_sale(self.price_of(kind));
        self.prices.insert(kind, next);
    }

    /// Current prices in `TowerKind::ALL` order.
    pub fn price_list(&self) -> Vec<(TowerKind, u32)> {
        TowerKind::ALL
            .iter()
            .map(|&kind| (kind, self.price_of(kind)))
            .collect()
    }
}

/// Gold returned when selling a tower bought for `price_paid`.
pub fn refund_for(price_paid: u32) -> u32 {
    price_paid / 2
}
