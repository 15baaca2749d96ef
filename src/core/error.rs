use thiserror::Error;

/// Why a dice notation string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("invalid dice notation `{0}` (expected e.g. 2d6+3)")]
    Malformed(String),
    #[error("dice count must be between 1 and {max}, got {got}")]
    Count { got: u64, max: u32 },
    #[error("dice sides must be between 1 and {max}, got {got}")]
    Sides { got: u64, max: u32 },
    #[error("modifier `{0}` is out of range")]
    Modifier(String),
}

/// Loot tables are validated once, at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LootTableError {
    #[error("loot table has no items")]
    Empty,
    #[error("item `{name}` has invalid weight {weight}")]
    InvalidWeight { name: String, weight: f64 },
    #[error("total weight must be positive and finite, got {0}")]
    NonPositiveTotal(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate tool id `{0}`")]
    DuplicateId(String),
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error(transparent)]
    LootTable(#[from] LootTableError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("unknown sort algorithm `{0}`")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
