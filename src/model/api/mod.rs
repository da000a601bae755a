//! Shapes returned to (or accepted from) the views.

pub mod booth;
pub mod notice;
pub mod session;
pub mod status;

pub use booth::{PartyCard, PartyInfo, ThankYou};
pub use notice::{Notice, NoticeKind};
pub use session::{SessionView, View};
pub use status::ElectionStatus;
