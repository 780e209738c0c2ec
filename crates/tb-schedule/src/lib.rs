//! `tb-schedule` — the discrete-event scheduler.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`event`]  | `Event`, `EventKind` (tagged payload), priorities        |
//! | [`queue`]  | `EventQueue`, `EventHandle`                              |
//! | [`error`]  | `ScheduleError`, `ScheduleResult<T>`                     |
//!
//! # Ordering model (summary)
//!
//! Every pending event is keyed by
//!
//! ```text
//! (tick, kind.priority(), registration sequence)
//! ```
//!
//! so events fire in non-decreasing tick order, same-tick events fire in
//! priority order, and equal priorities fire in the order they were
//! registered.  Recurring registrations are re-armed when popped and can be
//! cancelled through the `EventHandle` returned at registration.

pub mod error;
pub mod event;
pub mod queue;


pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind};
pub use queue::{EventHandle, EventQueue};
