//! The simulation clock, as far as movement is concerned.

use core::fmt;

/// Number of ticks the enclosing simulation runs per second of game time.
///
/// Movement constants such as [`PhysicsConfig::gravity`] are expressed per tick, so
/// this only matters for converting tick counts into seconds for display.
///
/// [`PhysicsConfig::gravity`]: crate::physics::PhysicsConfig::gravity
pub const TICKS_PER_SECOND: u32 = 20;

/// Identifies one step of the simulation.
///
/// Ticks are stamps, not durations: the only things movement code does with them are
/// comparing two for equality and advancing to the next one.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Tick(u64);

impl Tick {
    /// The first tick of a simulation.
    pub const ZERO: Self = Self(0);

    /// Constructs the tick with the given sequence number.
    #[inline]
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number of this tick.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the tick that follows this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Game time elapsed from [`Tick::ZERO`] to the start of this tick, in seconds.
    #[inline]
    pub fn seconds(self) -> f64 {
        self.0 as f64 / f64::from(TICKS_PER_SECOND)
    }
}

impl fmt::Debug for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;

    #[test]
    fn next_and_seconds() {
        let t = Tick::ZERO.next().next();
        assert_eq!(t, Tick::new(2));
        assert_eq!(t.seconds(), 0.1);
    }

    #[test]
    fn formatting() {
        assert_eq!(format!("{:?}", Tick::new(7)), "Tick(7)");
        assert_eq!(Tick::new(7).to_string(), "tick 7");
    }
}
