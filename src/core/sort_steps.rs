//! Step-by-step sorting traces for visualization.
//!
//! Each generator is an explicit state machine over a private copy of the
//! input. Every yielded [`SortStep`] owns a snapshot of the array, so frames
//! can be kept and replayed without aliasing the working buffer.
//!
//! A generator is single-pass: once it returns `None` it stays exhausted.
//! Replaying a trace means building a new [`SortSteps`] from the same
//! input.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [Self::Bubble, Self::Selection, Self::Insertion];

    pub fn id(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SortAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// One frame of a trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortStep<T> {
    pub array: Vec<T>,
    /// Indices looked at (or exchanged) in this step.
    pub compared: (usize, usize),
    pub swapped: bool,
}

/// Loop counters of each algorithm, frozen between steps.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    /// Outer pass `i`, adjacent pair `(j, j + 1)`.
    Bubble { i: usize, j: usize },
    /// Filling slot `i`; scanning `j` with best-so-far `min`.
    Selection { i: usize, j: usize, min: usize },
    /// Inserting element `i`, currently sitting at `j`.
    Insertion { i: usize, j: usize },
    Done,
}

/// Lazy trace of one sorting run.
#[derive(Debug, Clone)]
pub struct SortSteps<T> {
    algorithm: SortAlgorithm,
    array: Vec<T>,
    cursor: Cursor,
    steps: usize,
}

impl<T: PartialOrd + Clone> SortSteps<T> {
    pub fn new(algorithm: SortAlgorithm, input: &[T]) -> Self {
        let array = input.to_vec();
        let cursor = if array.len() < 2 {
            Cursor::Done
        } else {
            match algorithm {
                SortAlgorithm::Bubble => Cursor::Bubble { i: 0, j: 0 },
                SortAlgorithm::Selection => Cursor::Selection { i: 0, j: 1, min: 0 },
                SortAlgorithm::Insertion => Cursor::Insertion { i: 1, j: 1 },
            }
        };
        let mut steps = Self {
            algorithm,
            array,
            cursor,
            steps: 0,
        };
        steps.settle();
        steps
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// True once the trace is exhausted. Becomes true as soon as the last
    /// step has been yielded.
    pub fn is_done(&self) -> bool {
        matches!(self.cursor, Cursor::Done)
    }

    pub fn has_next(&self) -> bool {
        !self.is_done()
    }

    /// Steps yielded so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// The working array as of the last yielded step.
    pub fn current(&self) -> &[T] {
        &self.array
    }

    fn snapshot(&self, compared: (usize, usize), swapped: bool) -> SortStep<T> {
        SortStep {
            array: self.array.clone(),
            compared,
            swapped,
        }
    }

    /// Run the loop bookkeeping that produces no frame, stopping at the next
    /// state that will yield one (or at `Done`).
    fn settle(&mut self) {
        let n = self.array.len();
        loop {
            self.cursor = match self.cursor {
                Cursor::Done => return,
                Cursor::Bubble { i, .. } if i >= n => Cursor::Done,
                Cursor::Bubble { i, j } if j + i + 1 >= n => Cursor::Bubble { i: i + 1, j: 0 },
                Cursor::Bubble { .. } => return,

                Cursor::Selection { i, .. } if i >= n => Cursor::Done,
                Cursor::Selection { j, .. } if j < n => return,
                Cursor::Selection { i, min, .. } if min != i => return,
                Cursor::Selection { i, .. } => Cursor::Selection {
                    i: i + 1,
                    j: i + 2,
                    min: i + 1,
                },

                Cursor::Insertion { i, .. } if i >= n => Cursor::Done,
                Cursor::Insertion { i, j } if j == i || (j > 0 && self.array[j - 1] > self.array[j]) => {
                    return
                }
                Cursor::Insertion { i, .. } => Cursor::Insertion { i: i + 1, j: i + 1 },
            };
        }
    }

    fn advance(&mut self) -> Option<SortStep<T>> {
        self.settle();
        let step = match self.cursor {
            Cursor::Done => return None,

            Cursor::Bubble { i, j } => {
                let swap = self.array[j] > self.array[j + 1];
                if swap {
                    self.array.swap(j, j + 1);
                }
                self.cursor = Cursor::Bubble { i, j: j + 1 };
                self.snapshot((j, j + 1), swap)
            }

            Cursor::Selection { i, j, min } if j < self.array.len() => {
                // The frame shows the pair before the minimum moves.
                let step = self.snapshot((min, j), false);
                let min = if self.array[j] < self.array[min] { j } else { min };
                self.cursor = Cursor::Selection { i, j: j + 1, min };
                step
            }

            Cursor::Selection { i, min, .. } => {
                self.array.swap(i, min);
                self.cursor = Cursor::Selection {
                    i: i + 1,
                    j: i + 2,
                    min: i + 1,
                };
                self.snapshot((i, min), true)
            }

            Cursor::Insertion { i, j } if j > 0 && self.array[j - 1] > self.array[j] => {
                self.array.swap(j - 1, j);
                self.cursor = Cursor::Insertion { i, j: j - 1 };
                self.snapshot((j - 1, j), true)
            }

            Cursor::Insertion { i, j } => {
                // Already in place: still show the comparison.
                self.cursor = Cursor::Insertion { i: i + 1, j: i + 1 };
                self.snapshot((j - 1, j), false)
            }
        };
        self.settle();
        Some(step)
    }
}

impl<T: PartialOrd + Clone> Iterator for SortSteps<T> {
    type Item = SortStep<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.advance()?;
        self.steps += 1;
        Some(step)
    }
}

impl<T: PartialOrd + Clone> FusedIterator for SortSteps<T> {}

/// Build a fresh trace of `algorithm` over a copy of `input`.
pub fn sort_steps<T: PartialOrd + Clone>(algorithm: SortAlgorithm, input: &[T]) -> SortSteps<T> {
    SortSteps::new(algorithm, input)
}
