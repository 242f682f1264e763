pub mod error;
pub mod event;
pub mod instant;
pub mod occurrence;

pub use event::{Event, EventData, StartForm};
pub use instant::Instant;
