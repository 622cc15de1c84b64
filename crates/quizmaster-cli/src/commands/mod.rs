pub mod chat;
pub mod init;
pub mod list_categories;
pub mod play;
pub mod stats;
pub mod validate;
