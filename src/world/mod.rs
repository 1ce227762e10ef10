//! The host world as seen by guards, and an in-memory implementation

pub mod sandbox;
pub mod traits;

pub use sandbox::{SandboxEntity, SandboxWorld, SoundRecord};
pub use traits::{
    Building, BuildingKind, ColonyRegistry, CombatTargets, Effects, GuardWorld, Navigation,
    PermissionAction, Permissions, QueryVolume, Senses, SpatialQuery, TrackedEntity,
};
