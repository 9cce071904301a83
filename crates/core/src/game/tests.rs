//! Regression test module wiring for driver behaviours.

mod room_lifecycle;

/// Shared imports for driver regression tests.
mod support {
    pub(super) use super::super::*;
    pub(super) use crate::actor::{DamageOutcome, StateKind};
    pub(super) use crate::entity::PickupKind;
    pub(super) use crate::game::test_support::*;
    pub(super) use crate::mapgen::CellType;
    pub(super) use crate::room::MathProblem;
}
