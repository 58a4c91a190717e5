//! Periodic invocation of overdue task closure.

use crate::tracker::ports::{ProjectRepository, TaskRepository};
use mockable::Clock;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::{TaskService, TrackerResult};

/// Shortest period accepted by [`OverdueSweeper::run_every`].
const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Runs [`TaskService::close_overdue_tasks`] once or on a fixed interval.
pub struct OverdueSweeper<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskService<P, T, C>,
}

impl<P, T, C> OverdueSweeper<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper over the given task service.
    #[must_use]
    pub const fn new(service: TaskService<P, T, C>) -> Self {
        Self { service }
    }

    /// Performs a single sweep.
    ///
    /// # Errors
    ///
    /// Propagates the store failure from
    /// [`TaskService::close_overdue_tasks`].
    pub async fn run_once(&self) -> TrackerResult<usize> {
        let closed = self.service.close_overdue_tasks().await?;
        info!(closed, "overdue sweep finished");
        Ok(closed)
    }

    /// Sweeps immediately and then every `period` until `shutdown` resolves.
    ///
    /// A failed sweep is logged and the loop carries on. Periods shorter than
    /// one second are raised to one second. Returns the total number of tasks
    /// closed.
    pub async fn run_every<F>(&self, period: Duration, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(period.max(MIN_PERIOD));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut total = 0;
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => match self.run_once().await {
                    Ok(closed) => total += closed,
                    Err(err) => warn!(error = %err, "overdue sweep failed"),
                },
            }
        }
        info!(total, "overdue sweeper stopped");
        total
    }
}
