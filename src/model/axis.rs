use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three body axes, independent of how an array stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnatomicalAxis {
    AnteriorPosterior,
    SuperiorInferior,
    LeftRight,
}

impl AnatomicalAxis {
    /// Canonical ordering used when comparing spaces.
    pub const ALL: [AnatomicalAxis; 3] = [
        AnatomicalAxis::AnteriorPosterior,
        AnatomicalAxis::SuperiorInferior,
        AnatomicalAxis::LeftRight,
    ];

    pub fn index(self) -> usize {
        match self {
            AnatomicalAxis::AnteriorPosterior => 0,
            AnatomicalAxis::SuperiorInferior => 1,
            AnatomicalAxis::LeftRight => 2,
        }
    }
}

impl fmt::Display for AnatomicalAxis {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnatomicalAxis::AnteriorPosterior => "anterior-posterior",
            AnatomicalAxis::SuperiorInferior => "superior-inferior",
            AnatomicalAxis::LeftRight => "left-right",
        };
        formatter.write_str(label)
    }
}

/// Whether an array dimension runs along the canonical direction of its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Canonical,
    Reversed,
}

/// Letter table for orientation codes. Each letter names the end of the axis
/// found at index 0 of its dimension; `a`, `s` and `r` are canonical.
pub(crate) fn axis_for_letter(letter: char) -> Option<(AnatomicalAxis, Direction)> {
    match letter {
        'a' => Some((AnatomicalAxis::AnteriorPosterior, Direction::Canonical)),
        'p' => Some((AnatomicalAxis::AnteriorPosterior, Direction::Reversed)),
        's' => Some((AnatomicalAxis::SuperiorInferior, Direction::Canonical)),
        'i' => Some((AnatomicalAxis::SuperiorInferior, Direction::Reversed)),
        'r' => Some((AnatomicalAxis::LeftRight, Direction::Canonical)),
        'l' => Some((AnatomicalAxis::LeftRight, Direction::Reversed)),
        _ => None,
    }
}

pub(crate) fn letter_for_axis(axis: AnatomicalAxis, direction: Direction) -> char {
    match (axis, direction) {
        (AnatomicalAxis::AnteriorPosterior, Direction::Canonical) => 'a',
        (AnatomicalAxis::AnteriorPosterior, Direction::Reversed) => 'p',
        (AnatomicalAxis::SuperiorInferior, Direction::Canonical) => 's',
        (AnatomicalAxis::SuperiorInferior, Direction::Reversed) => 'i',
        (AnatomicalAxis::LeftRight, Direction::Canonical) => 'r',
        (AnatomicalAxis::LeftRight, Direction::Reversed) => 'l',
    }
}
