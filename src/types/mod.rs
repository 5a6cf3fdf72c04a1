//! Type definitions for homewatt

mod device;
mod error;
mod period;
mod usage;

pub use device::*;
pub use error::*;
pub use period::*;
pub use usage::*;
