//! Events guards emit while ticking

use serde::Serialize;

use crate::core::types::{BuildingId, EntityId};
use crate::entity::EntityKind;
use crate::guard::state::GuardState;

/// Why a candidate was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Dead,
    NotVisible,
    /// Player the colony does not allow guards to attack
    NoPermission,
}

/// Why a held target was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    /// Id no longer resolves
    Gone,
    Dead,
    OutOfSight,
    /// Ranged guard lost its launcher
    Unarmed,
    /// The guard itself died
    GuardDown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GuardEvent {
    StateChanged {
        guard: EntityId,
        from: GuardState,
        to: GuardState,
    },
    TargetAcquired {
        guard: EntityId,
        target: EntityId,
        kind: EntityKind,
    },
    CandidateRejected {
        guard: EntityId,
        candidate: EntityId,
        reason: RejectReason,
    },
    TargetLost {
        guard: EntityId,
        target: EntityId,
        reason: LossReason,
    },
    MeleeHit {
        guard: EntityId,
        target: EntityId,
        damage: f64,
    },
    ArrowLoosed {
        guard: EntityId,
        target: EntityId,
        damage: f64,
    },
    Restocked {
        guard: EntityId,
        armor_taken: usize,
        weapon_taken: bool,
    },
    RestockAbandoned {
        guard: EntityId,
        home: BuildingId,
    },
    /// Guard has no usable weapon and is waiting for one
    EquipmentRequested {
        guard: EntityId,
    },
}

impl GuardEvent {
    pub fn is_attack(&self) -> bool {
        matches!(self, GuardEvent::MeleeHit { .. } | GuardEvent::ArrowLoosed { .. })
    }
}
