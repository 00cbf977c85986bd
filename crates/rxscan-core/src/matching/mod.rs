//! Resolving decoded scans against expected serialized records.

mod compare;
mod resolver;

pub use compare::{dates_equal, exact_equal, lot_equal};
pub use resolver::{resolve, MatchResolver};
