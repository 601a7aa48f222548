//! Finished-game records, their JSON file and the filters and orderings the
//! history screen applies to them.

pub use error::*;
pub use filter::*;
pub use record::*;
pub use sort::*;
pub use store::*;

mod error;
mod filter;
mod record;
mod sort;
mod store;
#[cfg(test)]
mod testing;
