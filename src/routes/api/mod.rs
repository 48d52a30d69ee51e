pub mod members;
pub mod public;
mod router;
pub mod tasks;
mod validate;

pub use router::router;
