//! # dumgorf
//!
//! Deterministic computation behind the dumgorf.net game-engine tools: a
//! seeded PRNG, dice distributions, weighted loot tables and step-by-step
//! sorting traces.
//!
//! ## Quick Start
//!
//! ```
//! use dumgorf::prelude::*;
//!
//! // Same text, same stream.
//! let mut rng = SeededRng::from_text("hello-world");
//! let r = rng.next_f64_01();
//! assert!((0.0..1.0).contains(&r));
//!
//! // Dice notation to distribution.
//! let expr = parse_dice_notation("2d6").unwrap();
//! let dist = expr.distribution();
//! assert_eq!(dist.min(), Some(2));
//!
//! // One loot drop.
//! let table = LootPreset::BasicChest.table();
//! let drop = table.roll(&mut rng);
//! assert!(!drop.name.is_empty());
//!
//! // Replayable sort trace.
//! let last = sort_steps(SortAlgorithm::Bubble, &[5, 3, 8, 1]).last().unwrap();
//! assert_eq!(last.array, [1, 3, 5, 8]);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialize/deserialize the public data types
//!
//! ## Modules
//!
//! - [`prng`]: Seeded 32-bit PRNG and the `RandomSource` seam
//! - [`seed`]: Text to seed hashing
//! - [`dice`]: Dice notation and outcome distributions
//! - [`loot`]: Weighted loot tables and simulation
//! - [`sort_steps`]: Sorting traces for visualization
//! - [`algorithms`]: Algorithm catalog and Monte Carlo helpers
//! - [`registry`]: Tool registration table

#[path = "core/error.rs"]
pub mod error;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/seed.rs"]
pub mod seed;

#[path = "core/dice.rs"]
pub mod dice;

#[path = "core/loot.rs"]
pub mod loot;

#[path = "core/sort_steps.rs"]
pub mod sort_steps;

#[path = "core/algorithms.rs"]
pub mod algorithms;

#[path = "core/registry.rs"]
pub mod registry;

pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// ```
/// use dumgorf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dice::{distribution, parse_dice_notation, DiceExpr, Distribution, DistributionMethod};
    pub use crate::loot::{roll_weighted, LootItem, LootPreset, LootTable, SimulationResult};
    pub use crate::prng::{rng_stream, RandomSource, SeededRng};
    pub use crate::registry::{ToolManifest, ToolRegistry};
    pub use crate::seed::hash_seed;
    pub use crate::sort_steps::{sort_steps, SortAlgorithm, SortStep, SortSteps};
}
