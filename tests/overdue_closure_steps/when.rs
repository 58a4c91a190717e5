//! When steps for overdue closure BDD scenarios.

use super::world::{OverdueWorld, run_async};
use rstest_bdd_macros::when;

#[when("the overdue sweep runs")]
fn overdue_sweep_runs(world: &mut OverdueWorld) {
    world.last_sweep = Some(run_async(world.tasks.close_overdue_tasks()));
}
