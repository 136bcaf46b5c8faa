pub mod chapters_cmd;
pub mod search_cmd;

pub use chapters_cmd::cmd_chapters;
pub use search_cmd::{cmd_search, SearchArgs};
