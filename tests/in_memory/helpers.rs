//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::config::TrackerConfig;
use taskboard::tracker::{
    adapters::memory::InMemoryTrackerStore,
    services::{ProjectService, TaskService},
};

/// Project service wired to the in-memory store.
pub type TestProjectService = ProjectService<InMemoryTrackerStore, DefaultClock>;

/// Task service wired to the in-memory store.
pub type TestTaskService = TaskService<InMemoryTrackerStore, InMemoryTrackerStore, DefaultClock>;

/// Both services sharing one store.
pub struct Services {
    pub projects: TestProjectService,
    pub tasks: TestTaskService,
}

/// Provides services over a fresh store with default configuration.
#[fixture]
pub fn services() -> Services {
    let store = Arc::new(InMemoryTrackerStore::new());
    let clock = Arc::new(DefaultClock);
    let config = Arc::new(TrackerConfig::default());
    Services {
        projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock), Arc::clone(&config)),
        tasks: TaskService::new(Arc::clone(&store), store, clock, config),
    }
}

/// Provides a fresh, empty store.
#[fixture]
pub fn store() -> InMemoryTrackerStore {
    InMemoryTrackerStore::new()
}
