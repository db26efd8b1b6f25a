//! Core domain logic for network-presence attendance tracking.
//!
//! Everything here is storage-agnostic and clock-injected: the tick engine
//! talks to persistence through [`AttendanceStore`] and every time-dependent
//! operation takes an explicit observation time, so the whole state machine
//! is testable without a database or a real clock.

pub mod config;
pub mod durations;
pub mod event;
pub mod mac;
pub mod presence;
pub mod store;
pub mod summary;
pub mod tracker;

pub use config::TickConfig;
pub use durations::{DayTotals, replay};
pub use event::{AttendanceEvent, EventKind, UnknownEventKind};
pub use mac::{InvalidMac, MacAddr};
pub use presence::PresenceState;
pub use store::{AttendanceStore, Employee};
pub use summary::{DailySummary, DayStatus, SummaryPatch, UnknownDayStatus};
pub use tracker::{EmployeeStatus, Tracker};
