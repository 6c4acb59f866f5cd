pub mod aggregate;

pub use aggregate::{Table, TableId};
