//! 个人档案：唯一 handle、技能、职业与教育经历

mod manager;
mod models;

pub use manager::ProfileManager;
pub use models::{
    Education, EducationInput, Experience, ExperienceInput, Profile, ProfileInput, ProfileOwner,
    ProfileView,
};
