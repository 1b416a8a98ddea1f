mod auth;
mod output;
mod posts;
mod profiles;
pub mod ui;

pub use auth::{login, me, register};
pub use output::OutputFormat;
pub use posts::{
    add_comment, create_post, delete_post, get_post, like_post, list_posts, remove_comment,
    unlike_post,
};
pub use profiles::{create_profile, get_profile, list_profiles, my_profile, profile_by_handle};
