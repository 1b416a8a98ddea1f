//! 档案管理器：建档、查询、经历条目的增删

use super::models::*;
use crate::error::{Result, StoreError};
use crate::store::{Collection, Index};
use chrono::Utc;
use std::path::Path;
use tracing::{info, instrument};

/// 档案管理器
#[derive(Debug, Clone)]
pub struct ProfileManager {
    profiles: Collection,
    /// handle -> 档案 id 索引
    handles: Index,
    /// 用户 id -> 档案 id 索引（每用户至多一份档案）
    owners: Index,
}

impl ProfileManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let profiles = Collection::new(data_dir, "profiles");
        let handles = Index::new(&profiles, "handle");
        let owners = Index::new(&profiles, "owner");
        Self {
            profiles,
            handles,
            owners,
        }
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        self.profiles.ensure_dir().await
    }

    /// 逗号分隔的技能串拆成去重后的列表（保留出现顺序）。
    fn split_skills(raw: &str) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();
        for part in raw.split(',') {
            let skill = part.trim();
            if !skill.is_empty() && !skills.iter().any(|s| s == skill) {
                skills.push(skill.to_string());
            }
        }
        skills
    }

    async fn persist(&self, profile: &mut Profile) -> Result<()> {
        profile.updated_at = Some(Utc::now());
        self.profiles.write(&profile.id, profile).await
    }
}

impl ProfileManager {
    /// 建档；用户已有档案或 handle 已占用时返回 AlreadyExists。
    #[instrument(skip(self, input))]
    pub async fn create(&self, user_id: &str, input: ProfileInput) -> Result<Profile> {
        self.ensure_dirs().await?;

        if self.owners.get(user_id).await.is_some() {
            return Err(StoreError::AlreadyExists(format!(
                "profile for user: {}",
                user_id
            )));
        }

        let handle = input.handle.unwrap_or_default();
        if self.handles.get(&handle).await.is_some() {
            return Err(StoreError::AlreadyExists(format!("handle: {}", handle)));
        }

        let now = Utc::now();
        let profile = Profile {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            handle,
            skills: Self::split_skills(input.skills.as_deref().unwrap_or_default()),
            experience: Vec::new(),
            education: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.profiles.write(&profile.id, &profile).await?;
        self.handles.insert(&profile.handle, &profile.id).await?;
        self.owners.insert(&profile.user_id, &profile.id).await?;

        info!(profile_id = %profile.id, handle = %profile.handle, "created profile");
        Ok(profile)
    }

    /// 按档案 id 获取
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Profile> {
        self.profiles.read(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => StoreError::NotFound(format!("profile: {}", id)),
            other => other,
        })
    }

    /// 按用户 id 获取该用户的档案
    #[instrument(skip(self))]
    pub async fn get_by_user(&self, user_id: &str) -> Result<Profile> {
        let id = self
            .owners
            .get(user_id)
            .await
            .ok_or_else(|| StoreError::NotFound(format!("profile for user: {}", user_id)))?;
        self.get(&id).await
    }

    /// 按 handle 获取
    #[instrument(skip(self))]
    pub async fn get_by_handle(&self, handle: &str) -> Result<Profile> {
        let id = self
            .handles
            .get(handle)
            .await
            .ok_or_else(|| StoreError::NotFound(format!("handle: {}", handle)))?;
        self.get(&id).await
    }

    /// 列出全部档案
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Profile>> {
        self.profiles.list().await
    }

    /// 追加职业经历（最新在前）。
    #[instrument(skip(self, input))]
    pub async fn add_experience(&self, user_id: &str, input: ExperienceInput) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        let entry = Experience {
            id: uuid::Uuid::new_v4().to_string(),
            title: input.title.unwrap_or_default(),
            company: input.company.unwrap_or_default(),
            location: input.location,
            from: input.from.unwrap_or_default(),
            to: input.to,
            current: input.current.unwrap_or(false),
            description: input.description,
        };
        profile.experience.insert(0, entry);
        self.persist(&mut profile).await?;
        Ok(profile)
    }

    /// 删除职业经历条目；id 不存在返回 NotFound 且列表不变。
    #[instrument(skip(self))]
    pub async fn remove_experience(&self, user_id: &str, entry_id: &str) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        let position = profile
            .experience
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or_else(|| StoreError::NotFound(format!("experience: {}", entry_id)))?;
        profile.experience.remove(position);
        self.persist(&mut profile).await?;
        Ok(profile)
    }

    /// 追加教育经历（最新在前）。
    #[instrument(skip(self, input))]
    pub async fn add_education(&self, user_id: &str, input: EducationInput) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        let entry = Education {
            id: uuid::Uuid::new_v4().to_string(),
            school: input.school.unwrap_or_default(),
            degree: input.degree.unwrap_or_default(),
            field_of_study: input.field_of_study.unwrap_or_default(),
            from: input.from.unwrap_or_default(),
            to: input.to,
            current: input.current.unwrap_or(false),
            description: input.description,
        };
        profile.education.insert(0, entry);
        self.persist(&mut profile).await?;
        Ok(profile)
    }

    /// 删除教育经历条目；id 不存在返回 NotFound 且列表不变。
    #[instrument(skip(self))]
    pub async fn remove_education(&self, user_id: &str, entry_id: &str) -> Result<Profile> {
        let mut profile = self.get_by_user(user_id).await?;
        let position = profile
            .education
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or_else(|| StoreError::NotFound(format!("education: {}", entry_id)))?;
        profile.education.remove(position);
        self.persist(&mut profile).await?;
        Ok(profile)
    }

    /// 删除某用户的档案及其索引条目
    #[instrument(skip(self))]
    pub async fn delete_by_user(&self, user_id: &str) -> Result<Profile> {
        let profile = self.get_by_user(user_id).await?;
        self.profiles.remove(&profile.id).await?;
        self.handles.remove_id(&profile.id).await?;
        self.owners.remove_id(&profile.id).await?;
        info!(profile_id = %profile.id, "deleted profile");
        Ok(profile)
    }
}
