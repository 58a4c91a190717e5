//! `PostgreSQL` implementation of the tracker repository ports.
//!
//! Each port call runs on one pooled connection inside `spawn_blocking`.
//! Multi-statement operations (cascade delete, batched task updates) run in
//! a single transaction.

use super::{
    models::{NewProjectRow, NewTaskRow, ProjectRow, TaskRow},
    schema::{projects, tasks},
};
use crate::tracker::{
    domain::{
        Deadline, Description, PersistedProjectData, PersistedTaskData, Project, ProjectId,
        ProjectName, Task, TaskId, TaskStatus, TaskTitle,
    },
    ports::{ProjectRepository, RepositoryError, RepositoryResult, TaskRepository},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by tracker adapters.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

const PROJECT_NAME_CONSTRAINT: &str = "projects_name_unique";

/// `PostgreSQL`-backed project and task store.
#[derive(Debug, Clone)]
pub struct PostgresTrackerStore {
    pool: TrackerPgPool,
}

impl PostgresTrackerStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool for `database_url` and wraps it in a store.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the pool cannot be
    /// created.
    pub fn connect(database_url: &str) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(RepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RepositoryError::persistence)?
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ProjectRepository for PostgresTrackerStore {
    async fn insert_project(&self, project: &Project) -> RepositoryResult<()> {
        let name = project.name().clone();
        let new_row = to_new_project_row(project);
        self.run_blocking(move |connection| insert_project_row(connection, &new_row, &name))
            .await
    }

    async fn insert_project_within(
        &self,
        project: &Project,
        max_projects: usize,
    ) -> RepositoryResult<()> {
        let name = project.name().clone();
        let new_row = to_new_project_row(project);

        self.run_blocking(move |connection| {
            connection.transaction::<(), RepositoryError, _>(|tx| {
                lock_table(tx, "projects")?;
                if count_rows(projects::table.count().get_result::<i64>(tx)?)? >= max_projects {
                    return Err(RepositoryError::ProjectLimitReached { max: max_projects });
                }
                insert_project_row(tx, &new_row, &name)
            })
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> RepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().clone();
        let row = to_new_project_row(project);

        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(project_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateProjectName(name.clone())
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            if updated == 0 {
                return Err(RepositoryError::ProjectNotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(row_to_project))
        })
        .await
    }

    async fn find_project_by_name(
        &self,
        name: &ProjectName,
    ) -> RepositoryResult<Option<Project>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::name.eq(lookup))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(row_to_project))
        })
        .await
    }

    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        self.run_blocking(|connection| {
            let rows = projects::table
                .order((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }

    async fn count_projects(&self) -> RepositoryResult<usize> {
        self.run_blocking(|connection| {
            count_rows(projects::table.count().get_result::<i64>(connection)?)
        })
        .await
    }

    async fn delete_project_cascade(&self, id: ProjectId) -> RepositoryResult<usize> {
        self.run_blocking(move |connection| {
            connection.transaction::<usize, RepositoryError, _>(|tx| {
                let removed_tasks =
                    diesel::delete(tasks::table.filter(tasks::project_id.eq(id.into_inner())))
                        .execute(tx)?;
                let removed_projects =
                    diesel::delete(projects::table.find(id.into_inner())).execute(tx)?;
                if removed_projects == 0 {
                    return Err(RepositoryError::ProjectNotFound(id));
                }
                Ok(removed_tasks)
            })
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTrackerStore {
    async fn insert_task(&self, task: &Task) -> RepositoryResult<()> {
        let new_row = to_new_task_row(task);
        self.run_blocking(move |connection| insert_task_row(connection, &new_row))
            .await
    }

    async fn insert_task_within(&self, task: &Task, max_tasks: usize) -> RepositoryResult<()> {
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            connection.transaction::<(), RepositoryError, _>(|tx| {
                lock_table(tx, "tasks")?;
                if count_rows(tasks::table.count().get_result::<i64>(tx)?)? >= max_tasks {
                    return Err(RepositoryError::TaskLimitReached { max: max_tasks });
                }
                insert_task_row(tx, &new_row)
            })
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> RepositoryResult<()> {
        let row = to_new_task_row(task);
        self.run_blocking(move |connection| update_task_row(connection, &row))
            .await
    }

    async fn update_tasks(&self, tasks: &[Task]) -> RepositoryResult<()> {
        let rows: Vec<NewTaskRow> = tasks.iter().map(to_new_task_row).collect();
        self.run_blocking(move |connection| {
            connection.transaction::<(), RepositoryError, _>(|tx| {
                rows.iter().try_for_each(|row| update_task_row(tx, row))
            })
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn list_tasks_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn count_tasks(&self) -> RepositoryResult<usize> {
        self.run_blocking(|connection| {
            count_rows(tasks::table.count().get_result::<i64>(connection)?)
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            if removed == 0 {
                return Err(RepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_overdue_tasks(&self, today: NaiveDate) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::deadline.lt(today))
                .filter(tasks::status.ne(TaskStatus::TERMINAL))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }
}

fn insert_project_row(
    connection: &mut PgConnection,
    row: &NewProjectRow,
    name: &ProjectName,
) -> RepositoryResult<()> {
    diesel::insert_into(projects::table)
        .values(row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                if is_project_name_violation(info.as_ref()) =>
            {
                RepositoryError::DuplicateProjectName(name.clone())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                RepositoryError::DuplicateProject(ProjectId::from_uuid(row.id))
            }
            _ => RepositoryError::persistence(err),
        })?;
    Ok(())
}

fn insert_task_row(connection: &mut PgConnection, row: &NewTaskRow) -> RepositoryResult<()> {
    diesel::insert_into(tasks::table)
        .values(row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                RepositoryError::MissingProject(ProjectId::from_uuid(row.project_id))
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                RepositoryError::DuplicateTask(TaskId::from_uuid(row.id))
            }
            _ => RepositoryError::persistence(err),
        })?;
    Ok(())
}

/// Serialises capacity-checked inserts on `table` until the transaction ends.
/// Readers are not blocked.
fn lock_table(connection: &mut PgConnection, table: &str) -> RepositoryResult<()> {
    diesel::sql_query(format!("LOCK TABLE {table} IN SHARE ROW EXCLUSIVE MODE"))
        .execute(connection)?;
    Ok(())
}

fn count_rows(count: i64) -> RepositoryResult<usize> {
    usize::try_from(count).map_err(RepositoryError::persistence)
}

fn update_task_row(connection: &mut PgConnection, row: &NewTaskRow) -> RepositoryResult<()> {
    let updated = diesel::update(tasks::table.find(row.id))
        .set(row)
        .execute(connection)?;
    if updated == 0 {
        return Err(RepositoryError::TaskNotFound(TaskId::from_uuid(row.id)));
    }
    Ok(())
}

fn is_project_name_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == PROJECT_NAME_CONSTRAINT)
}

fn to_new_project_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().as_str().to_owned(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> Project {
    Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: ProjectName::from_persisted(row.name),
        description: Description::from_persisted(row.description),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline().map(Deadline::date),
        closed_at: task.closed_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title: TaskTitle::from_persisted(row.title),
        description: Description::from_persisted(row.description),
        status: TaskStatus::from_persisted(row.status),
        deadline: row.deadline.map(Deadline::from_date),
        closed_at: row.closed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
