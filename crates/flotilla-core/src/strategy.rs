//! Strategy seam: where per-ship preferences come from.
//!
//! A [`Strategy`] looks at the frozen [`TurnSnapshot`] and ranks the actions
//! one ship would like to take this turn. It never commits anything; the
//! ranked [`Plan`] is handed to the [`Arbiter`](crate::arbitration::Arbiter),
//! which turns the plans of the whole fleet into a collision-free set of
//! commands.
//!
//! # Thread Safety
//!
//! Strategies must be `Send + Sync`. The [`Overmind`](crate::overmind::Overmind)
//! plans every ship in parallel against the same immutable snapshot, and
//! collects the results by ship id so the outcome never depends on thread
//! scheduling.
//!
//! # Example
//!
//! ```
//! use flotilla_core::action::Action;
//! use flotilla_core::entity::Ship;
//! use flotilla_core::snapshot::TurnSnapshot;
//! use flotilla_core::strategy::{Plan, PlanContext, Strategy, StrategyId};
//!
//! struct Anchored;
//!
//! impl Strategy for Anchored {
//!     fn id(&self) -> StrategyId {
//!         StrategyId::new("anchored")
//!     }
//!
//!     fn plan(&self, _ctx: &PlanContext, _snapshot: &TurnSnapshot, _ship: &Ship) -> Plan {
//!         Plan::hold()
//!     }
//! }
//!
//! assert_eq!(Anchored.id().as_str(), "anchored");
//! assert_eq!(Plan::hold().preferences, vec![Action::Stay]);
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use shoal::Coord;

use crate::action::Action;
use crate::entity::{Ship, ShipId};
use crate::snapshot::TurnSnapshot;

// =============================================================================
// Strategy Id
// =============================================================================

/// Name of a strategy, used in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrategyId(Cow<'static, str>);

impl StrategyId {
    /// Creates an id from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Plan
// =============================================================================

/// One ship's ranked wishes for the turn.
///
/// `preferences` is ordered best first and must not be empty. `target` is the
/// cell the ship is heading for; together with `final_dash` it decides whether
/// the ship bypasses arbitration on its last step into a base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Candidate actions, highest ranked first.
    pub preferences: Vec<Action>,
    /// Declared destination, if any.
    pub target: Option<Coord>,
    /// Set on the end-of-game run home.
    pub final_dash: bool,
}

impl Plan {
    /// A plan with the given preferences and no target.
    #[must_use]
    pub fn new(preferences: Vec<Action>) -> Self {
        Self {
            preferences,
            target: None,
            final_dash: false,
        }
    }

    /// A plan that only wants to stay put.
    #[must_use]
    pub fn hold() -> Self {
        Self::new(vec![Action::Stay])
    }

    /// Sets the declared target.
    #[must_use]
    pub fn with_target(mut self, target: Coord) -> Self {
        self.target = Some(target);
        self
    }

    /// Marks the plan as part of the final dash home.
    #[must_use]
    pub fn dashing(mut self) -> Self {
        self.final_dash = true;
        self
    }

    /// The top-ranked action.
    #[must_use]
    pub fn first(&self) -> Option<Action> {
        self.preferences.first().copied()
    }
}

// =============================================================================
// Plan Context
// =============================================================================

/// Per-ship, per-turn context handed to [`Strategy::plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanContext {
    /// The ship being planned.
    pub ship_id: ShipId,
    /// Zero-based turn number.
    pub turn: u32,
    /// Seed for any randomness the strategy needs; stable for a given
    /// (master seed, turn, ship).
    pub rng_seed: u64,
}

// =============================================================================
// Strategy Trait
// =============================================================================

/// Produces a [`Plan`] for one ship.
///
/// Implementations must be deterministic given the same context and snapshot:
/// any randomness has to come from [`PlanContext::rng_seed`].
pub trait Strategy: Send + Sync {
    /// Name used in logs.
    fn id(&self) -> StrategyId;

    /// Ranks the ship's candidate actions for this turn.
    fn plan(&self, ctx: &PlanContext, snapshot: &TurnSnapshot, ship: &Ship) -> Plan;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let plan = Plan::new(vec![Action::East, Action::Stay])
            .with_target(Coord::new(3, 3))
            .dashing();
        assert_eq!(plan.first(), Some(Action::East));
        assert_eq!(plan.target, Some(Coord::new(3, 3)));
        assert!(plan.final_dash);
    }

    #[test]
    fn empty_plan_has_no_first() {
        assert_eq!(Plan::new(Vec::new()).first(), None);
    }

    #[test]
    fn strategy_id_display() {
        let id = StrategyId::new("prospector");
        assert_eq!(id.to_string(), "prospector");
        assert_eq!(id, StrategyId::new("prospector"));
    }
}
