mod issue;
mod user;
mod worklog;

pub use issue::{Issue, SearchResults};
pub use user::User;
pub use worklog::{Worklog, WorklogAuthor, WorklogPage};
