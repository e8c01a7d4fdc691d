//! Between-wave shop: catalog, paging, slide animation and purchases

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::GameState;
use crate::consts::SHOP_SLIDE_TIME;

/// What a shop item grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopItemKind {
    /// Equip the shield at this catalog index
    Shield(usize),
    /// Add this many hearts
    Heart(u32),
}

/// Shop catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub texture: String,
    pub cost: u32,
    pub kind: ShopItemKind,
}

impl ShopItem {
    pub fn new(name: &str, texture: &str, cost: u32, kind: ShopItemKind) -> Self {
        Self {
            name: name.to_string(),
            texture: texture.to_string(),
            cost,
            kind,
        }
    }
}

/// Why a purchase was refused. The game state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("no item in slot {slot} of page {page}")]
    NoSuchItem { page: usize, slot: usize },
    #[error("item costs {cost} coins but only {coins} available")]
    InsufficientCoins { cost: u32, coins: u32 },
    #[error("shield {0} is already equipped")]
    AlreadyEquipped(usize),
}

/// A completed purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// Index into the shop catalog
    pub item: usize,
    pub cost: u32,
    pub kind: ShopItemKind,
}

/// Shop overlay state
#[derive(Debug, Clone, Default)]
pub struct Shop {
    pub open: bool,
    /// Counts up while open; slides back to zero after closing
    pub timer: f32,
    pub page: usize,
}

impl Shop {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        log::debug!("Shop {}", if self.open { "opened" } else { "closed" });
    }

    /// Advance the slide animation
    pub fn advance(&mut self, dt: f32) {
        if self.open {
            self.timer += dt;
        } else if self.timer > 0.0 {
            self.timer = (self.timer.min(SHOP_SLIDE_TIME) - dt).max(0.0);
        }
    }

    pub fn page_count(item_count: usize, page_size: usize) -> usize {
        item_count.div_ceil(page_size).max(1)
    }

    pub fn next_page(&mut self, item_count: usize, page_size: usize) {
        let last = Self::page_count(item_count, page_size) - 1;
        self.page = (self.page + 1).min(last);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Catalog index for a slot on the current page
    pub fn item_index(&self, slot: usize, item_count: usize, page_size: usize) -> Option<usize> {
        if slot >= page_size {
            return None;
        }
        let index = self.page * page_size + slot;
        (index < item_count).then_some(index)
    }
}

impl GameState {
    /// Buy the item in `slot` of the current shop page
    pub fn purchase(&mut self, slot: usize) -> Result<PurchaseReceipt, ShopError> {
        let page_size = self.tuning.shop_page_size;
        let index = self
            .shop
            .item_index(slot, self.tuning.shop_items.len(), page_size)
            .ok_or(ShopError::NoSuchItem {
                page: self.shop.page,
                slot,
            })?;
        let item = &self.tuning.shop_items[index];

        if let ShopItemKind::Shield(shield) = item.kind
            && shield == self.active_shield
        {
            return Err(ShopError::AlreadyEquipped(shield));
        }
        if !self.scoreboard.spend(item.cost) {
            return Err(ShopError::InsufficientCoins {
                cost: item.cost,
                coins: self.scoreboard.coins,
            });
        }

        match item.kind {
            ShopItemKind::Shield(shield) => self.active_shield = shield,
            ShopItemKind::Heart(delta) => self.hearts = self.hearts.saturating_add(delta),
        }
        log::info!("Bought {} for {} coins", item.name, item.cost);

        Ok(PurchaseReceipt {
            item: index,
            cost: item.cost,
            kind: item.kind,
        })
    }
}
