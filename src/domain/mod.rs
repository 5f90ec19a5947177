pub mod note;
pub mod query;
pub mod stats;
