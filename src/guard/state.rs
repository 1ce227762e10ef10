//! Guard states and handler results

use serde::{Deserialize, Serialize};

/// The guard's current activity; exactly one is active per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GuardState {
    #[default]
    Idle,
    StartWorking,
    SearchTarget,
    GetTarget,
    HuntDownTarget,
    Patrol,
    Restock,
    Gathering,
}

impl GuardState {
    pub const ALL: [GuardState; 8] = [
        GuardState::Idle,
        GuardState::StartWorking,
        GuardState::SearchTarget,
        GuardState::GetTarget,
        GuardState::HuntDownTarget,
        GuardState::Patrol,
        GuardState::Restock,
        GuardState::Gathering,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GuardState::Idle => "idle",
            GuardState::StartWorking => "start_working",
            GuardState::SearchTarget => "search_target",
            GuardState::GetTarget => "get_target",
            GuardState::HuntDownTarget => "hunt_down_target",
            GuardState::Patrol => "patrol",
            GuardState::Restock => "restock",
            GuardState::Gathering => "gathering",
        }
    }
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a handler decided: the next state and how many ticks to sit out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: GuardState,
    pub delay: u32,
}

impl Transition {
    pub fn to(next: GuardState) -> Self {
        Self { next, delay: 0 }
    }

    pub fn after(next: GuardState, delay: u32) -> Self {
        Self { next, delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        assert_eq!(GuardState::default(), GuardState::Idle);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = GuardState::ALL.iter().map(GuardState::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), GuardState::ALL.len());
    }
}
