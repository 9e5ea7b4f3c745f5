//! Shared model definitions for `Nexus` mission tracking.
//!
//! Everything in this crate is pure: no I/O, no clocks. Callers supply
//! timestamps and decide where encoded task lists end up.

pub mod codec;
pub mod rank;
pub mod task;
pub mod view;

pub use codec::{CodecError, Iso8601, TimestampCodec};
pub use rank::{Rank, RankState, RankUpdate};
pub use task::{NewTask, Priority, Task, TaskId, TaskPatch};
pub use view::{Stats, StatusFilter};
