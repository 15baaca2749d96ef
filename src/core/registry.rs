//! Tool registry.
//!
//! The table is built once by the composition root and handed out by
//! reference; there is no global registry.

use hashbrown::HashMap;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ToolStatus {
    Stable,
    Beta,
    ComingSoon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ToolCategory {
    GameEngine,
    Media,
    DevUtils,
    Meta,
}

impl ToolCategory {
    pub fn id(self) -> &'static str {
        match self {
            Self::GameEngine => "game-engine",
            Self::Media => "media",
            Self::DevUtils => "dev-utils",
            Self::Meta => "meta",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ToolManifest {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
    pub color: &'static str,
    pub category: ToolCategory,
    pub tags: &'static [&'static str],
    pub local_only: bool,
    pub status: ToolStatus,
    pub order: u32,
}

impl ToolManifest {
    /// Tools whose computation lives in this crate.
    pub fn computes_locally(&self) -> bool {
        matches!(self.id, "dice" | "rng" | "loot" | "algorithms")
    }
}

#[derive(Debug, Clone)]
pub struct ToolRegistry {
    /// Sorted by `order`.
    tools: Vec<ToolManifest>,
    by_id: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new(mut tools: Vec<ToolManifest>) -> Result<Self, RegistryError> {
        tools.sort_by_key(|t| t.order);
        let mut by_id = HashMap::with_capacity(tools.len());
        for (idx, t) in tools.iter().enumerate() {
            if by_id.insert(t.id, idx).is_some() {
                return Err(RegistryError::DuplicateId(t.id.to_string()));
            }
        }
        Ok(Self { tools, by_id })
    }

    /// The site's tool table.
    pub fn builtin() -> Self {
        let mut reg = Self {
            tools: builtin_tools(),
            by_id: HashMap::new(),
        };
        reg.reindex();
        reg
    }

    fn reindex(&mut self) {
        self.tools.sort_by_key(|t| t.order);
        self.by_id = self
            .tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect();
    }

    pub fn all(&self) -> &[ToolManifest] {
        &self.tools
    }

    /// Everything that is not `ComingSoon`, in display order.
    pub fn active(&self) -> impl Iterator<Item = &ToolManifest> {
        self.tools
            .iter()
            .filter(|t| t.status != ToolStatus::ComingSoon)
    }

    pub fn get(&self, id: &str) -> Option<&ToolManifest> {
        self.by_id.get(id).map(|&i| &self.tools[i])
    }

    pub fn by_category(&self, category: ToolCategory) -> impl Iterator<Item = &ToolManifest> {
        self.tools.iter().filter(move |t| t.category == category)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn builtin_tools() -> Vec<ToolManifest> {
    vec![
        ToolManifest {
            id: "dice",
            title: "Dice Calculator",
            description: "RPG dice probability explorer. Input notation like 2d6+3, see probability curves.",
            route: "/dice",
            color: "#3b82f6",
            category: ToolCategory::GameEngine,
            tags: &["dice", "probability", "rpg"],
            local_only: false,
            status: ToolStatus::Stable,
            order: 1,
        },
        ToolManifest {
            id: "rng",
            title: "Seeded RNG",
            description: "Deterministic random number playground. Enter a seed, see outputs, visualize distributions.",
            route: "/rng",
            color: "#10b981",
            category: ToolCategory::GameEngine,
            tags: &["rng", "seed", "deterministic"],
            local_only: false,
            status: ToolStatus::Stable,
            order: 2,
        },
        ToolManifest {
            id: "npcs",
            title: "NPC Viewer",
            description: "Browse the pantheon. See mood states and voice profiles.",
            route: "/npcs",
            color: "#f59e0b",
            category: ToolCategory::GameEngine,
            tags: &["npc", "pantheon", "personality"],
            local_only: false,
            status: ToolStatus::Stable,
            order: 3,
        },
        ToolManifest {
            id: "vectorize",
            title: "Vectorize",
            description: "Raster to vector conversion with 9 presets. Upload an image, pick a style, download SVG.",
            route: "/vectorize",
            color: "#ec4899",
            category: ToolCategory::Media,
            tags: &["image", "svg", "vector"],
            local_only: false,
            status: ToolStatus::Stable,
            order: 4,
        },
        ToolManifest {
            id: "ffmpeg",
            title: "FFmpeg Cookbook",
            description: "Pick a recipe, configure options, copy a ready-to-paste ffmpeg command.",
            route: "/ffmpeg",
            color: "#06b6d4",
            category: ToolCategory::Media,
            tags: &["ffmpeg", "video", "command"],
            local_only: true,
            status: ToolStatus::Stable,
            order: 6,
        },
        ToolManifest {
            id: "audio",
            title: "Audio Utility",
            description: "Generate ffmpeg audio commands: trim silence, normalize loudness, convert format.",
            route: "/audio",
            color: "#14b8a6",
            category: ToolCategory::Media,
            tags: &["audio", "ffmpeg", "loudness"],
            local_only: true,
            status: ToolStatus::Beta,
            order: 8,
        },
        ToolManifest {
            id: "loot",
            title: "Loot Tables",
            description: "Simulate loot table drops. See EV, variance, bad-streak probability, and seed-specific results.",
            route: "/loot",
            color: "#f97316",
            category: ToolCategory::GameEngine,
            tags: &["loot", "probability", "simulation"],
            local_only: false,
            status: ToolStatus::Beta,
            order: 9,
        },
        ToolManifest {
            id: "formatter",
            title: "Input Formatter",
            description: "Live input masking for phone, credit card, date, currency, SSN.",
            route: "/formatter",
            color: "#a855f7",
            category: ToolCategory::DevUtils,
            tags: &["format", "mask", "input"],
            local_only: false,
            status: ToolStatus::Beta,
            order: 10,
        },
        ToolManifest {
            id: "assets",
            title: "Asset Checker",
            description: "Scan a folder for naming issues, missing @2x, odd sizes, large files, duplicates.",
            route: "/assets",
            color: "#f43f5e",
            category: ToolCategory::DevUtils,
            tags: &["assets", "audit", "naming"],
            local_only: true,
            status: ToolStatus::Beta,
            order: 11,
        },
        ToolManifest {
            id: "algorithms",
            title: "Algorithms",
            description: "Visualize sorting, searching, and probability algorithms step by step.",
            route: "/algorithms",
            color: "#22d3ee",
            category: ToolCategory::DevUtils,
            tags: &["algorithm", "sorting", "visualization"],
            local_only: false,
            status: ToolStatus::Beta,
            order: 12,
        },
        ToolManifest {
            id: "motion",
            title: "Motion Sandbox",
            description: "Interactive animation demos: FLIP reorder, list transitions, grid shuffle.",
            route: "/motion",
            color: "#fb923c",
            category: ToolCategory::DevUtils,
            tags: &["animation", "css", "motion"],
            local_only: false,
            status: ToolStatus::Beta,
            order: 13,
        },
    ]
}
