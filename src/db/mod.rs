pub mod comments;
pub mod connection;
pub mod posts;
pub mod transients;

pub use connection::{init_db, Database};
