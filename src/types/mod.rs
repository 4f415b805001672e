//! Type definitions

pub mod error;
pub mod participant;
pub mod reservation;
pub mod scenario;
pub mod schedule;
pub mod travel;

pub use error::*;
pub use participant::*;
pub use reservation::*;
pub use scenario::*;
pub use schedule::*;
pub use travel::*;
