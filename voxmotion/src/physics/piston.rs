use core::fmt;

use manyfmt::Refmt as _;

use crate::math::{Axis, FreeVector};
use crate::physics::{Body, PhysicsConfig};
use crate::time::Tick;
use crate::util::ConciseDebug;

/// How far pistons have pushed a body, along each axis, during one tick.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct PistonBudget {
    deltas: FreeVector,
    last_tick: Option<Tick>,
}

impl PistonBudget {
    /// Net displacement by pistons so far during [`Self::last_tick()`].
    pub fn deltas(&self) -> FreeVector {
        self.deltas
    }

    /// The tick during which the body was last pushed, if ever.
    pub fn last_tick(&self) -> Option<Tick> {
        self.last_tick
    }
}

impl fmt::Debug for PistonBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { deltas, last_tick } = self;
        f.debug_struct("PistonBudget")
            .field("deltas", &deltas.refmt(&ConciseDebug))
            .field("last_tick", last_tick)
            .finish()
    }
}

/// Limits a piston's push of `body` so that, over all pushes during `tick`, it moves no
/// more than [`PhysicsConfig::piston_limit`] along any axis.
///
/// Pistons push along one axis at a time; only the first nonzero component of `desired`
/// (in X, Y, Z order) is considered. The result is zero if the push is negligible or the
/// budget for that direction is used up.
pub fn limit_piston_movement(
    body: &mut Body,
    config: &PhysicsConfig,
    desired: FreeVector,
    tick: Tick,
) -> FreeVector {
    if desired.square_length() <= 1e-7 {
        return desired;
    }

    let budget = &mut body.piston_budget;
    if budget.last_tick != Some(tick) {
        budget.deltas = FreeVector::zero();
        budget.last_tick = Some(tick);
    }

    let Some(axis) = Axis::ALL.into_iter().find(|&axis| desired[axis] != 0.0) else {
        return FreeVector::zero();
    };

    let limit = config.piston_limit;
    let previous = budget.deltas[axis];
    let total = (desired[axis] + previous).clamp(-limit, limit);
    let allowed = total - previous;
    budget.deltas[axis] = total;

    if allowed.abs() <= config.piston_epsilon {
        log::trace!("piston push of {} ran out of budget", body.id());
        return FreeVector::zero();
    }
    let mut result = FreeVector::zero();
    result[axis] = allowed;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyId;
    use euclid::vec3;

    fn body() -> Body {
        Body::new(BodyId(1), [0.0, 0.0, 0.0], 1.0, 1.0)
    }

    #[test]
    fn negligible_push_is_returned_unchanged() {
        let mut body = body();
        let tiny = vec3(1e-4, 0.0, 0.0);
        assert_eq!(
            limit_piston_movement(&mut body, &PhysicsConfig::DEFAULT, tiny, Tick::new(1)),
            tiny
        );
        assert_eq!(body.piston_budget().last_tick(), None);
    }

    #[test]
    fn budget_is_per_direction_and_signed() {
        let config = PhysicsConfig::DEFAULT;
        let mut body = body();
        let tick = Tick::new(5);
        assert_eq!(
            limit_piston_movement(&mut body, &config, vec3(0.0, -0.5, 0.0), tick),
            vec3(0.0, -0.5, 0.0)
        );
        // Pushing back the other way is allowed up to the opposite limit.
        let back = limit_piston_movement(&mut body, &config, vec3(0.0, 2.0, 0.0), tick);
        assert!((back.y - 1.01).abs() < 1e-12, "{back:?}");
        // X is unaffected by Y's use.
        assert_eq!(
            limit_piston_movement(&mut body, &config, vec3(0.5, 0.0, 0.0), tick),
            vec3(0.5, 0.0, 0.0)
        );
    }

    #[test]
    fn only_first_axis_is_used() {
        let mut body = body();
        assert_eq!(
            limit_piston_movement(
                &mut body,
                &PhysicsConfig::DEFAULT,
                vec3(0.0, 0.25, 0.25),
                Tick::new(1)
            ),
            vec3(0.0, 0.25, 0.0)
        );
    }
}
