use alloc::string::String;
use core::fmt;

use arcstr::ArcStr;
use manyfmt::Refmt as _;

use crate::math::{Cube, FreePoint};
use crate::physics::BodyId;
use crate::util::ConciseDebug;

#[cfg(doc)]
use crate::{physics::move_body, world::Effects};

/// Failure of a reaction to a body touching a block, as reported by [`Effects`].
#[derive(Clone, Debug, Eq, displaydoc::Display, PartialEq)]
#[displaydoc("{message}")]
pub struct ReactionError {
    message: String,
}

impl ReactionError {
    /// Constructs an error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl core::error::Error for ReactionError {}

/// Which block reaction failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, displaydoc::Display)]
#[expect(clippy::exhaustive_enums)]
pub enum Reaction {
    /// landing on
    LandedOn,
    /// stepping on
    SteppedOn,
    /// being inside
    InsideBlock,
}

/// A fatal failure during [`move_body()`].
///
/// When a block reaction fails, the body is left partway through its tick, so the
/// report records where it was and what it was touching rather than letting the
/// simulation carry on with inconsistent state.
#[derive(Clone, Debug, PartialEq)]
pub struct CrashReport {
    body: BodyId,
    position: FreePoint,
    cube: Cube,
    block: ArcStr,
    reaction: Reaction,
    error: ReactionError,
}

impl CrashReport {
    pub(crate) fn new(
        body: BodyId,
        position: FreePoint,
        cube: Cube,
        block: ArcStr,
        reaction: Reaction,
        error: ReactionError,
    ) -> Self {
        Self {
            body,
            position,
            cube,
            block,
            reaction,
            error,
        }
    }

    /// The body that was moving.
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Where the body was when the failure happened.
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// The cube of the block whose reaction failed.
    pub fn cube(&self) -> Cube {
        self.cube
    }

    /// The name of the block whose reaction failed.
    pub fn block_name(&self) -> &str {
        &self.block
    }

    /// Which reaction failed.
    pub fn reaction(&self) -> Reaction {
        self.reaction
    }
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Don't include `error` because that's our `Error::source()`.
        write!(
            f,
            "body {body} at {position} crashed while {reaction} block {block:?} at {cube}",
            body = self.body,
            position = self.position.refmt(&ConciseDebug),
            reaction = self.reaction,
            block = self.block,
            cube = self.cube.refmt(&ConciseDebug),
        )
    }
}

impl core::error::Error for CrashReport {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ErrorChain;
    use alloc::string::ToString as _;
    use euclid::point3;

    #[test]
    fn crash_report_message() {
        let report = CrashReport::new(
            BodyId(3),
            point3(1.0, 2.5, -3.0),
            Cube::new(1, 1, -3),
            arcstr::literal!("cactus"),
            Reaction::InsideBlock,
            ReactionError::new("prickly"),
        );
        assert_eq!(
            ErrorChain(&report).to_string(),
            "body #3 at (+1.000, +2.500, -3.000) crashed while being inside \
            block \"cactus\" at (+1, +1, -3)\n\nCaused by:\n    prickly"
        );
    }
}
