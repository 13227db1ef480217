mod builder;
mod cache;
pub mod compound;
mod config;
mod error;
mod index;
mod source;
mod vocabulary;

pub use builder::*;
pub use cache::*;
pub use compound::{CompoundShape, DEFAULT_COMPOUND_RATIO};
pub use config::*;
pub use error::*;
pub use index::*;
pub use source::*;
pub use vocabulary::*;
