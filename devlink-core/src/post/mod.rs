//! 帖子：发布、点赞、评论

mod manager;
mod models;

pub use manager::PostManager;
pub use models::{Author, Comment, Like, Post, PostInput};
