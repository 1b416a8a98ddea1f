mod auth;
mod health;
mod posts;
mod profiles;
mod users;

pub use auth::{login, register};
pub use health::{handler_404, health};
pub use posts::{
    add_comment, create_post, delete_post, get_comment, get_post, like_post, list_comments,
    list_posts, remove_comment, unlike_post,
};
pub use profiles::{
    add_education, add_experience, create_profile, delete_profile, get_my_profile, get_profile,
    get_profile_by_handle, list_profiles, remove_education, remove_experience,
};
pub use users::get_me;
