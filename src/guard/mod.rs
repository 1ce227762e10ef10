//! Guard behavior: the state machine and the policies it drives

pub mod acquisition;
pub mod context;
pub mod equipment;
pub mod event;
pub mod machine;
pub mod melee;
pub mod patrol;
pub mod ranged;
pub mod state;

pub use acquisition::{attack_budget, max_vision, next_radius};
pub use context::SearchContext;
pub use equipment::{update_armor, wield_first, withdraw_supplies, RestockReport};
pub use event::{GuardEvent, LossReason, RejectReason};
pub use machine::{GuardClass, GuardStateMachine, TickOutcome};
pub use patrol::next_waypoint;
pub use state::{GuardState, Transition};
