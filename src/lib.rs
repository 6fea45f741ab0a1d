pub mod cache;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod math;
pub mod naming;
pub mod operations;
pub mod report;
pub mod session;

pub use error::{Result, RoomformError};
pub use session::{FinishingSession, SessionReport};
