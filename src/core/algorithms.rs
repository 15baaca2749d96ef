//! Catalog backing the algorithms playground, plus the seeded helpers it uses
//! to build inputs and run the Monte Carlo demo.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::prng::{RandomSource, SeededRng};
use crate::sort_steps::SortAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgoCategory {
    Sorting,
    Searching,
    Probability,
}

impl AlgoCategory {
    pub const ALL: [AlgoCategory; 3] = [Self::Sorting, Self::Searching, Self::Probability];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sorting => "Sorting",
            Self::Searching => "Searching",
            Self::Probability => "Probability",
        }
    }
}

/// Descriptive entry with asymptotic costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub category: AlgoCategory,
    pub description: &'static str,
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

impl AlgorithmInfo {
    /// Step generator for this entry, if it can be animated.
    pub fn step_algorithm(&self) -> Option<SortAlgorithm> {
        self.id.parse().ok()
    }
}

const CATALOG: [AlgorithmInfo; 8] = [
    AlgorithmInfo {
        id: "bubble",
        label: "Bubble Sort",
        category: AlgoCategory::Sorting,
        description: "Repeatedly steps through the list, compares adjacent elements, and swaps them if they are in the wrong order.",
        best: "O(n)",
        average: "O(n^2)",
        worst: "O(n^2)",
        space: "O(1)",
    },
    AlgorithmInfo {
        id: "selection",
        label: "Selection Sort",
        category: AlgoCategory::Sorting,
        description: "Finds the minimum element and places it at the beginning, then repeats for the remaining unsorted portion.",
        best: "O(n^2)",
        average: "O(n^2)",
        worst: "O(n^2)",
        space: "O(1)",
    },
    AlgorithmInfo {
        id: "insertion",
        label: "Insertion Sort",
        category: AlgoCategory::Sorting,
        description: "Builds the sorted array one item at a time by inserting each element into its correct position.",
        best: "O(n)",
        average: "O(n^2)",
        worst: "O(n^2)",
        space: "O(1)",
    },
    AlgorithmInfo {
        id: "quick",
        label: "Quick Sort",
        category: AlgoCategory::Sorting,
        description: "Picks a pivot, partitions the array around it, then recursively sorts the sub-arrays.",
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n^2)",
        space: "O(log n)",
    },
    AlgorithmInfo {
        id: "merge",
        label: "Merge Sort",
        category: AlgoCategory::Sorting,
        description: "Divides the array in half, recursively sorts both halves, then merges the sorted halves.",
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n log n)",
        space: "O(n)",
    },
    AlgorithmInfo {
        id: "binary-search",
        label: "Binary Search",
        category: AlgoCategory::Searching,
        description: "Finds a target value in a sorted array by repeatedly dividing the search interval in half.",
        best: "O(1)",
        average: "O(log n)",
        worst: "O(log n)",
        space: "O(1)",
    },
    AlgorithmInfo {
        id: "linear-search",
        label: "Linear Search",
        category: AlgoCategory::Searching,
        description: "Sequentially checks each element until the target is found or the end is reached.",
        best: "O(1)",
        average: "O(n)",
        worst: "O(n)",
        space: "O(1)",
    },
    AlgorithmInfo {
        id: "monte-carlo",
        label: "Monte Carlo Pi",
        category: AlgoCategory::Probability,
        description: "Estimates Pi by randomly sampling points in a unit square and counting how many fall inside a quarter circle.",
        best: "-",
        average: "O(n)",
        worst: "O(n)",
        space: "O(1)",
    },
];

pub fn catalog() -> &'static [AlgorithmInfo] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static AlgorithmInfo> {
    CATALOG.iter().find(|a| a.id == id)
}

pub fn by_category(category: AlgoCategory) -> impl Iterator<Item = &'static AlgorithmInfo> {
    CATALOG.iter().filter(move |a| a.category == category)
}

/// Playground input: `size` values in `1..=100`.
pub fn random_array(size: usize, rng: &mut SeededRng) -> Vec<u32> {
    (0..size).map(|_| rng.gen_range_u32(1, 100)).collect()
}

/// Fraction of points in the unit square that land inside the quarter
/// circle, times four. Returns 0 for zero samples.
pub fn estimate_pi<R: RandomSource + ?Sized>(samples: u32, rng: &mut R) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let mut inside = 0u32;
    for _ in 0..samples {
        let x = rng.next_f64();
        let y = rng.next_f64();
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }
    4.0 * inside as f64 / samples as f64
}
