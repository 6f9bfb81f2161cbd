pub mod aggregate;
pub mod book;
pub mod config;
pub mod cover;
pub mod dedup;
pub mod error;
pub mod favorites;
pub mod lookup;
pub mod merge;
pub mod reader;
pub mod related;
pub mod topics;

pub mod prelude {
    pub use crate::aggregate::Aggregator;
    pub use crate::book::*;
    pub use crate::error::*;
}
