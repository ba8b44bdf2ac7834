// crates/lavainfo-core/src/token.rs
//
// LAVA token amounts. The base unit is the ulava; 1 LAVA = 10^6 ulava.
// All accounting is done in integer ulava. Display truncates to whole LAVA.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Number of ulava in one LAVA.
pub const ULAVA_PER_LAVA: u128 = 1_000_000;

/// An amount of LAVA, stored in ulava.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ulava(pub u128);

impl Ulava {
    pub fn zero() -> Self {
        Self(0)
    }

    /// Whole LAVA, truncating any fractional part.
    pub fn whole_lava(&self) -> u128 {
        self.0 / ULAVA_PER_LAVA
    }
}

impl Add for Ulava {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Ulava {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Ulava {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Ulava::zero(), Add::add)
    }
}

impl fmt::Display for Ulava {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0 LAVA");
        }
        write!(f, "{} LAVA", self.whole_lava())
    }
}

/// Format a ulava amount for display, e.g. `2_500_000` -> `"2 LAVA"`.
pub fn format_lava(ulava: u128) -> String {
    Ulava(ulava).to_string()
}
