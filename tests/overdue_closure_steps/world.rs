//! Shared world state for overdue closure BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::config::TrackerConfig;
use taskboard::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{ProjectId, Task},
    services::{ProjectService, TaskService, TrackerError},
};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTrackerStore, InMemoryTrackerStore, DefaultClock>;

/// Scenario world for overdue closure behaviour tests.
pub struct OverdueWorld {
    pub projects: ProjectService<InMemoryTrackerStore, DefaultClock>,
    pub tasks: TestTaskService,
    pub project: Option<ProjectId>,
    pub task: Option<Task>,
    pub last_sweep: Option<Result<usize, TrackerError>>,
}

impl OverdueWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTrackerStore::new());
        let clock = Arc::new(DefaultClock);
        let config = Arc::new(TrackerConfig::default());

        Self {
            projects: ProjectService::new(
                Arc::clone(&store),
                Arc::clone(&clock),
                Arc::clone(&config),
            ),
            tasks: TaskService::new(Arc::clone(&store), store, clock, config),
            project: None,
            task: None,
            last_sweep: None,
        }
    }
}

impl Default for OverdueWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OverdueWorld {
    OverdueWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
