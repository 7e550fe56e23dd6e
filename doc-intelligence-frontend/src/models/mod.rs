pub mod document;
pub mod session;
pub mod view;

pub use document::{DocumentRecord, ProcessStatus};
pub use session::PageSession;
pub use view::{DisplayRow, Listing, Notice, RowAction};
