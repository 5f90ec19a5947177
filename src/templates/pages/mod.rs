pub mod comments;
pub mod record;

pub use comments::{comments_page, CommentsVm};
pub use record::{record_page, EntryVm, RecordVm};
