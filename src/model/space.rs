use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::axis::{axis_for_letter, letter_for_axis};
use super::{AnatomicalAxis, CoreError, Direction, Result};

/// Orientation code such as `"asr"`; each letter pair appears once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnatomicalSpace {
    dims: [(AnatomicalAxis, Direction); 3],
}

impl AnatomicalSpace {
    pub fn parse(code: &str) -> Result<Self> {
        let invalid = |reason: String| CoreError::InvalidOrientationCode {
            code: code.to_string(),
            reason,
        };

        let letters = code.chars().collect::<Vec<_>>();
        if letters.len() != 3 {
            return Err(invalid(format!(
                "expected 3 letters, found {}",
                letters.len()
            )));
        }

        let mut dims = [(AnatomicalAxis::AnteriorPosterior, Direction::Canonical); 3];
        for (dim, letter) in letters.iter().enumerate() {
            let lowered = letter.to_ascii_lowercase();
            dims[dim] = axis_for_letter(lowered)
                .ok_or_else(|| invalid(format!("`{letter}` is not one of a, p, s, i, r, l")))?;
        }

        for first in 0..3 {
            for second in first + 1..3 {
                if dims[first].0 == dims[second].0 {
                    return Err(invalid(format!(
                        "dimensions {first} and {second} both carry the {} axis",
                        dims[first].0
                    )));
                }
            }
        }

        Ok(Self { dims })
    }

    pub fn all() -> Vec<Self> {
        const PERMUTATIONS: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let mut spaces = Vec::with_capacity(48);
        for permutation in PERMUTATIONS {
            for flips in 0..8_u8 {
                let mut dims = [(AnatomicalAxis::AnteriorPosterior, Direction::Canonical); 3];
                for (dim, axis_index) in permutation.iter().enumerate() {
                    let direction = if flips & (1 << dim) == 0 {
                        Direction::Canonical
                    } else {
                        Direction::Reversed
                    };
                    dims[dim] = (AnatomicalAxis::ALL[*axis_index], direction);
                }
                spaces.push(Self { dims });
            }
        }
        spaces
    }

    pub fn code(&self) -> String {
        self.dims
            .iter()
            .map(|(axis, direction)| letter_for_axis(*axis, *direction))
            .collect()
    }

    pub fn axis(&self, dim: usize) -> AnatomicalAxis {
        self.dims[dim].0
    }

    pub fn direction(&self, dim: usize) -> Direction {
        self.dims[dim].1
    }

    pub fn dim_of(&self, axis: AnatomicalAxis) -> Option<usize> {
        self.dims.iter().position(|(candidate, _)| *candidate == axis)
    }

    /// For each canonical axis (anterior-posterior, superior-inferior,
    /// left-right) the dimension that carries it.
    pub fn axis_order(&self) -> [usize; 3] {
        let mut order = [0; 3];
        for (dim, (axis, _)) in self.dims.iter().enumerate() {
            order[axis.index()] = dim;
        }
        order
    }

    pub fn mapping_to(&self, target: &AnatomicalSpace) -> Result<AxisMapping> {
        mapping(self, target)
    }
}

/// Transpose and mirror needed to move between two spaces.
///
/// Output dimension `d` reads from input dimension `permutation[d]`, reversed
/// when `flips[d]` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMapping {
    pub permutation: [usize; 3],
    pub flips: [bool; 3],
}

impl AxisMapping {
    pub fn identity() -> Self {
        Self {
            permutation: [0, 1, 2],
            flips: [false; 3],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn apply<T: Copy>(&self, values: [T; 3]) -> [T; 3] {
        [
            values[self.permutation[0]],
            values[self.permutation[1]],
            values[self.permutation[2]],
        ]
    }
}

pub fn mapping(from: &AnatomicalSpace, to: &AnatomicalSpace) -> Result<AxisMapping> {
    let mut permutation = [0; 3];
    let mut flips = [false; 3];
    for dim in 0..3 {
        let axis = to.axis(dim);
        let source = from
            .dim_of(axis)
            .ok_or_else(|| CoreError::IncompatibleSpaces {
                from: from.code(),
                to: to.code(),
                missing: axis,
            })?;
        permutation[dim] = source;
        flips[dim] = from.direction(source) != to.direction(dim);
    }
    Ok(AxisMapping { permutation, flips })
}

impl FromStr for AnatomicalSpace {
    type Err = CoreError;

    fn from_str(code: &str) -> Result<Self> {
        Self::parse(code)
    }
}

impl TryFrom<String> for AnatomicalSpace {
    type Error = CoreError;

    fn try_from(code: String) -> Result<Self> {
        Self::parse(&code)
    }
}

impl From<AnatomicalSpace> for String {
    fn from(space: AnatomicalSpace) -> Self {
        space.code()
    }
}

impl fmt::Display for AnatomicalSpace {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.code())
    }
}
