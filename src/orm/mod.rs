//! Entity definitions for every table the service reads or writes.

pub mod comment_likes;
pub mod comments;
pub mod followers;
pub mod likes;
pub mod posts;
pub mod user_details;
pub mod users;
