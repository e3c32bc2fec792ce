//! List pipeline services.
//!
//! Raw records are transformed into view records once per fetch; filtering
//! and pagination are recomputed from the full collection on every change.

pub mod filter;
pub mod list_state;
pub mod transform;

pub use filter::ListFilter;
pub use list_state::{ListEvent, ListState, ListView, LoadPhase};
pub use transform::{transform_records, IntoView};
