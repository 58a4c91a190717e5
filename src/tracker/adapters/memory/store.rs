//! In-memory store backing both tracker repository ports.
//!
//! Projects and tasks share one lock so the cascade on project deletion and
//! batched task updates are atomic.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tracker::{
    domain::{Project, ProjectId, ProjectName, Task, TaskId},
    ports::{ProjectRepository, RepositoryError, RepositoryResult, TaskRepository},
};

/// Thread-safe in-memory project and task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    next_sequence: u64,
    projects: HashMap<ProjectId, Stored<Project>>,
    name_index: HashMap<ProjectName, ProjectId>,
    tasks: HashMap<TaskId, Stored<Task>>,
}

/// Record paired with its insertion sequence, used for stable ordering.
#[derive(Debug)]
struct Stored<T> {
    sequence: u64,
    record: T,
}

impl InMemoryTrackerState {
    const fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn insert_project(&mut self, project: &Project) -> RepositoryResult<()> {
        if self.projects.contains_key(&project.id()) {
            return Err(RepositoryError::DuplicateProject(project.id()));
        }
        if self.name_index.contains_key(project.name()) {
            return Err(RepositoryError::DuplicateProjectName(project.name().clone()));
        }

        let sequence = self.next_sequence();
        self.name_index.insert(project.name().clone(), project.id());
        self.projects.insert(
            project.id(),
            Stored {
                sequence,
                record: project.clone(),
            },
        );
        Ok(())
    }

    fn insert_task(&mut self, task: &Task) -> RepositoryResult<()> {
        if !self.projects.contains_key(&task.project_id()) {
            return Err(RepositoryError::MissingProject(task.project_id()));
        }
        if self.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::DuplicateTask(task.id()));
        }

        let sequence = self.next_sequence();
        self.tasks.insert(
            task.id(),
            Stored {
                sequence,
                record: task.clone(),
            },
        );
        Ok(())
    }
}

impl InMemoryTrackerStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, InMemoryTrackerState>> {
        self.state.read().map_err(|err| {
            RepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, InMemoryTrackerState>> {
        self.state.write().map_err(|err| {
            RepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Clones records matching `predicate` in insertion order.
fn collect_ordered<'a, T, I, F>(records: I, predicate: F) -> Vec<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a Stored<T>>,
    F: Fn(&T) -> bool,
{
    let mut matching: Vec<&Stored<T>> = records.filter(|stored| predicate(&stored.record)).collect();
    matching.sort_by_key(|stored| stored.sequence);
    matching
        .into_iter()
        .map(|stored| stored.record.clone())
        .collect()
}

#[async_trait]
impl ProjectRepository for InMemoryTrackerStore {
    async fn insert_project(&self, project: &Project) -> RepositoryResult<()> {
        self.write()?.insert_project(project)
    }

    async fn insert_project_within(
        &self,
        project: &Project,
        max_projects: usize,
    ) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.len() >= max_projects {
            return Err(RepositoryError::ProjectLimitReached { max: max_projects });
        }
        state.insert_project(project)
    }

    async fn update_project(&self, project: &Project) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let old_name = state
            .projects
            .get(&project.id())
            .ok_or(RepositoryError::ProjectNotFound(project.id()))?
            .record
            .name()
            .clone();

        if old_name != *project.name() {
            if state.name_index.contains_key(project.name()) {
                return Err(RepositoryError::DuplicateProjectName(project.name().clone()));
            }
            state.name_index.remove(&old_name);
            state.name_index.insert(project.name().clone(), project.id());
        }

        if let Some(stored) = state.projects.get_mut(&project.id()) {
            stored.record = project.clone();
        }
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).map(|stored| stored.record.clone()))
    }

    async fn find_project_by_name(
        &self,
        name: &ProjectName,
    ) -> RepositoryResult<Option<Project>> {
        let state = self.read()?;
        let project = state
            .name_index
            .get(name)
            .and_then(|id| state.projects.get(id))
            .map(|stored| stored.record.clone());
        Ok(project)
    }

    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        let state = self.read()?;
        Ok(collect_ordered(state.projects.values(), |_| true))
    }

    async fn count_projects(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.projects.len())
    }

    async fn delete_project_cascade(&self, id: ProjectId) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        let removed = state
            .projects
            .remove(&id)
            .ok_or(RepositoryError::ProjectNotFound(id))?;
        state.name_index.remove(removed.record.name());

        let before = state.tasks.len();
        state
            .tasks
            .retain(|_, stored| stored.record.project_id() != id);
        Ok(before - state.tasks.len())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTrackerStore {
    async fn insert_task(&self, task: &Task) -> RepositoryResult<()> {
        self.write()?.insert_task(task)
    }

    async fn insert_task_within(&self, task: &Task, max_tasks: usize) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.len() >= max_tasks {
            return Err(RepositoryError::TaskLimitReached { max: max_tasks });
        }
        state.insert_task(task)
    }

    async fn update_task(&self, task: &Task) -> RepositoryResult<()> {
        self.update_tasks(std::slice::from_ref(task)).await
    }

    async fn update_tasks(&self, tasks: &[Task]) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if let Some(missing) = tasks
            .iter()
            .find(|task| !state.tasks.contains_key(&task.id()))
        {
            return Err(RepositoryError::TaskNotFound(missing.id()));
        }

        for task in tasks {
            if let Some(stored) = state.tasks.get_mut(&task.id()) {
                stored.record = task.clone();
            }
        }
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).map(|stored| stored.record.clone()))
    }

    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_ordered(state.tasks.values(), |_| true))
    }

    async fn list_tasks_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_ordered(state.tasks.values(), |task| {
            task.project_id() == project_id
        }))
    }

    async fn count_tasks(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::TaskNotFound(id))
    }

    async fn find_overdue_tasks(&self, today: NaiveDate) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_ordered(state.tasks.values(), |task| {
            task.is_overdue(today)
        }))
    }
}
