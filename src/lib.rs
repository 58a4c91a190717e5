//! Taskboard: a project and task tracker core.
//!
//! Users organise tasks under uniquely named projects. Each task carries a
//! status drawn from a configurable set, an optional calendar-date deadline,
//! and descriptive text. Overdue tasks are closed by a periodic sweep.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: validated entities and values with no infrastructure
//!   dependencies
//! - **Ports**: async repository traits
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: business rules (uniqueness, capacity, cascading delete,
//!   overdue closure) over the ports
//!
//! # Modules
//!
//! - [`config`]: environment-sourced limits and status values
//! - [`tracker`]: projects, tasks, and the overdue sweep

pub mod config;
pub mod tracker;
