//! Core types for the education portal client.
//!
//! This crate holds everything the `portal` binary needs that does not talk to
//! the network:
//! - `event` for the API's event records and their parsed form
//! - `grid` for building the Monday-start month grid that calendars render
//! - `view` for tracking the selected month across overlapping fetches
//! - `session` and `config` for the files kept in the user's config directory

pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod grid;
pub mod month;
pub mod session;
pub mod today;
pub mod upcoming;
pub mod view;

pub use error::{PortalError, PortalResult};
pub use event::Event;
pub use grid::{CalendarDay, CalendarGrid, build_grid};
