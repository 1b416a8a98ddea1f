//! Core library for the social backend: document store, validators,
//! account/profile/post managers, and token issuance.

mod avatar;
mod error;
mod post;
mod profile;
mod store;
mod user;
pub mod validation;

pub use avatar::avatar_url;
pub use error::{Result, StoreError};
pub use post::{Author, Comment, Like, Post, PostInput, PostManager};
pub use profile::{
    Education, EducationInput, Experience, ExperienceInput, Profile, ProfileInput, ProfileManager,
    ProfileOwner, ProfileView,
};
pub use store::{Collection, Index};
pub use user::{
    AuthToken, LoginRequest, RegisterRequest, TokenClaims, User, UserManager, UserSummary,
};
