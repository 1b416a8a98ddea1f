use devlink_core::{PostManager, ProfileManager, UserManager};
use std::sync::Arc;

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserManager>,
    pub profiles: Arc<ProfileManager>,
    pub posts: Arc<PostManager>,
}
