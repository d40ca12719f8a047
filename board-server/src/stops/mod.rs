//! Static stop reference data.
//!
//! Stops are loaded once at startup from a delimited reference table and
//! never change afterwards. Lookups are total: asking for an unknown id
//! yields a zero-value [`Stop`], never an error, since live feeds routinely
//! mention stops the reference table has not caught up with.

mod directory;
mod error;

pub use directory::{LocationType, ServiceDirections, Stop, StopDirectory};
pub use error::StopDataError;
