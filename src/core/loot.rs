//! Weighted loot tables.
//!
//! Table order is part of the contract: it decides both the walk order of a
//! roll and the fallback item when floating-point drift leaves the walk
//! without a winner.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LootTableError;
use crate::prng::{RandomSource, SeededRng};

/// Miss counts shown by the bad-streak readout.
pub const STREAK_LENGTHS: [u32; 5] = [10, 25, 50, 100, 200];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LootItem {
    pub name: String,
    pub weight: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<f64>,
}

impl LootItem {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Walk `items` in order subtracting weights from `roll`; the first item
/// that takes it to zero or below wins, the last item if none does.
/// `items` must be non-empty.
fn walk(items: &[LootItem], mut roll: f64) -> usize {
    for (idx, item) in items.iter().enumerate() {
        roll -= item.weight;
        if roll <= 0.0 {
            return idx;
        }
    }
    items.len() - 1
}

/// One draw from an unvalidated slice.
///
/// Returns `None` for an empty slice or a non-positive total weight.
pub fn roll_weighted<'a, R: RandomSource + ?Sized>(
    items: &'a [LootItem],
    rng: &mut R,
) -> Option<&'a LootItem> {
    let total: f64 = items.iter().map(|i| i.weight).sum();
    if !(total > 0.0) || !total.is_finite() {
        return None;
    }
    items.get(walk(items, rng.next_f64() * total))
}

/// A validated, ordered list of weighted items.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LootTable {
    items: Vec<LootItem>,
    #[cfg_attr(feature = "serde", serde(skip))]
    total_weight: f64,
}

impl LootTable {
    pub fn new(items: Vec<LootItem>) -> Result<Self, LootTableError> {
        if items.is_empty() {
            return Err(LootTableError::Empty);
        }
        if let Some(bad) = items
            .iter()
            .find(|i| !i.weight.is_finite() || i.weight <= 0.0)
        {
            return Err(LootTableError::InvalidWeight {
                name: bad.name.clone(),
                weight: bad.weight,
            });
        }
        let total_weight: f64 = items.iter().map(|i| i.weight).sum();
        if !(total_weight > 0.0) || !total_weight.is_finite() {
            return Err(LootTableError::NonPositiveTotal(total_weight));
        }
        Ok(Self {
            items,
            total_weight,
        })
    }

    pub fn items(&self) -> &[LootItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Draw exactly one item.
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &LootItem {
        &self.items[self.roll_index(rng)]
    }

    /// Same as [`LootTable::roll`] but reports the winning index.
    pub fn roll_index<R: RandomSource + ?Sized>(&self, rng: &mut R) -> usize {
        walk(&self.items, rng.next_f64() * self.total_weight)
    }

    /// Theoretical drop chance of the item at `idx`.
    pub fn probability(&self, idx: usize) -> f64 {
        self.items
            .get(idx)
            .map(|i| i.weight / self.total_weight)
            .unwrap_or(0.0)
    }

    pub fn expected_value(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.weight / self.total_weight * i.value_or_zero())
            .sum()
    }

    pub fn variance(&self) -> f64 {
        let ev = self.expected_value();
        self.items
            .iter()
            .map(|i| {
                let diff = i.value_or_zero() - ev;
                i.weight / self.total_weight * diff * diff
            })
            .sum()
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// The item tracked by the bad-streak readout: the last row of the table.
    pub fn rarest(&self) -> &LootItem {
        &self.items[self.items.len() - 1]
    }

    /// Chance of `misses` consecutive rolls without the rarest item.
    pub fn bad_streak_probability(&self, misses: u32) -> f64 {
        let p = self.probability(self.items.len() - 1);
        (1.0 - p).powi(misses.min(i32::MAX as u32) as i32)
    }

    /// Run `runs` draws. A seed makes the counts reproducible; without one the
    /// stream is seeded from OS entropy.
    ///
    /// Seeded runs start from the raw seed, without the playground's offset,
    /// so a share link replays the same counts as the explorer.
    pub fn simulate(&self, runs: u32, seed: Option<i32>) -> SimulationResult {
        let mut rng = match seed {
            Some(s) => SeededRng::from_state(s as u32),
            None => SeededRng::from_entropy(),
        };
        let result = self.simulate_with(runs, &mut rng);
        debug!(
            runs,
            seeded = seed.is_some(),
            total_value = result.total_value,
            "simulated loot table"
        );
        result
    }

    pub fn simulate_with<R: RandomSource + ?Sized>(
        &self,
        runs: u32,
        rng: &mut R,
    ) -> SimulationResult {
        let mut counts = vec![0u32; self.items.len()];
        let mut total_value = 0.0;
        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;

        for _ in 0..runs {
            let idx = self.roll_index(rng);
            counts[idx] += 1;
            let v = self.items[idx].value_or_zero();
            total_value += v;
            min_value = min_value.min(v);
            max_value = max_value.max(v);
        }

        SimulationResult {
            names: self.items.iter().map(|i| i.name.clone()).collect(),
            counts,
            total_value,
            min_value: if runs == 0 { 0.0 } else { min_value },
            max_value: if runs == 0 { 0.0 } else { max_value },
            runs,
        }
    }
}

/// Aggregate of a simulation, counts kept in table order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationResult {
    pub names: Vec<String>,
    pub counts: Vec<u32>,
    pub total_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub runs: u32,
}

impl SimulationResult {
    pub fn average_value(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_value / self.runs as f64
        }
    }

    /// Observed share of the item at `idx`.
    pub fn frequency(&self, idx: usize) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.counts
            .get(idx)
            .map(|&c| c as f64 / self.runs as f64)
            .unwrap_or(0.0)
    }

    pub fn count_of(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.counts[idx])
    }
}

/// Shareable link that replays a seeded simulation.
pub fn share_link(seed: &str, table_id: &str) -> String {
    format!("dumgorf.net/loot?seed={seed}&table={table_id}")
}

/// Built-in tables offered by the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LootPreset {
    BasicChest,
    RareDrop,
    BossLoot,
}

impl LootPreset {
    pub const ALL: [LootPreset; 3] = [Self::BasicChest, Self::RareDrop, Self::BossLoot];

    pub fn id(self) -> &'static str {
        match self {
            Self::BasicChest => "basic-chest",
            Self::RareDrop => "rare-drop",
            Self::BossLoot => "boss-loot",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BasicChest => "Basic Chest",
            Self::RareDrop => "Rare Drop",
            Self::BossLoot => "Boss Loot",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    fn rows(self) -> &'static [(&'static str, f64, f64)] {
        match self {
            Self::BasicChest => &[
                ("Gold Pouch (50g)", 40.0, 50.0),
                ("Health Potion", 30.0, 25.0),
                ("Iron Sword", 15.0, 100.0),
                ("Rare Gem", 10.0, 250.0),
                ("Legendary Scroll", 5.0, 1000.0),
            ],
            Self::RareDrop => &[
                ("Nothing", 60.0, 0.0),
                ("Common Material", 20.0, 10.0),
                ("Uncommon Material", 12.0, 50.0),
                ("Rare Material", 6.0, 200.0),
                ("Epic Material", 1.5, 800.0),
                ("Legendary Material", 0.5, 5000.0),
            ],
            Self::BossLoot => &[
                ("Gold Hoard (500g)", 30.0, 500.0),
                ("Boss Armor", 25.0, 400.0),
                ("Boss Weapon", 20.0, 600.0),
                ("Unique Trinket", 15.0, 1200.0),
                ("Mount Scroll", 7.0, 3000.0),
                ("World Drop", 3.0, 10000.0),
            ],
        }
    }

    pub fn table(self) -> LootTable {
        let items = self
            .rows()
            .iter()
            .map(|&(name, weight, value)| LootItem::new(name, weight).with_value(value))
            .collect();
        // Preset rows all carry positive weights.
        LootTable {
            total_weight: self.rows().iter().map(|r| r.1).sum(),
            items,
        }
    }
}
