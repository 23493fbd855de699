// Pull-based accessors for state owned by the player collaborator.
// The controls never push into the player; they ask for the latest state.

use super::types::PlayerSnapshot;
use crate::models::{SourceDataState, SourceLink};

pub trait PlayerStateProvider: Send + Sync {
    fn snapshot(&self) -> PlayerSnapshot;
}

pub trait SourceStateProvider: Send + Sync {
    fn source_state(&self) -> SourceDataState;

    /// Source links offered as servers. Empty until resolution succeeds.
    fn source_links(&self) -> Vec<SourceLink> {
        Vec::new()
    }
}

impl<F> PlayerStateProvider for F
where
    F: Fn() -> PlayerSnapshot + Send + Sync,
{
    fn snapshot(&self) -> PlayerSnapshot {
        self()
    }
}

impl<F> SourceStateProvider for F
where
    F: Fn() -> SourceDataState + Send + Sync,
{
    fn source_state(&self) -> SourceDataState {
        self()
    }
}
