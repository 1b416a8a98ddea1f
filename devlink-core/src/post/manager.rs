//! 帖子管理器：发布、点赞、评论的单文档读改写

use super::models::*;
use crate::error::{Result, StoreError};
use crate::store::Collection;
use chrono::Utc;
use std::path::Path;
use tracing::{info, instrument};

/// 帖子管理器
#[derive(Debug, Clone)]
pub struct PostManager {
    posts: Collection,
}

impl PostManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            posts: Collection::new(data_dir, "posts"),
        }
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        self.posts.ensure_dir().await
    }

    async fn persist(&self, post: &Post) -> Result<()> {
        self.posts.write(&post.id, post).await
    }
}

impl PostManager {
    /// 发布帖子，作者展示字段取自 claims。
    #[instrument(skip(self, author, text))]
    pub async fn create(&self, author: &Author, text: &str) -> Result<Post> {
        self.ensure_dirs().await?;

        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            user: author.id.clone(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            text: text.to_string(),
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: Some(Utc::now()),
        };

        self.persist(&post).await?;
        info!(post_id = %post.id, user_id = %post.user, "created post");
        Ok(post)
    }

    /// 按 id 获取帖子
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Post> {
        self.posts.read(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => StoreError::NotFound(format!("post: {}", id)),
            other => other,
        })
    }

    /// 列出全部帖子，最新在前。
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.list().await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// 删除帖子；仅作者本人可删。
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str, requester_id: &str) -> Result<()> {
        let post = self.get(id).await?;
        if post.user != requester_id {
            return Err(StoreError::Forbidden("not the post author".into()));
        }
        self.posts.remove(id).await?;
        info!(post_id = %id, "deleted post");
        Ok(())
    }

    /// 点赞；同一用户重复点赞返回 AlreadyLiked。
    #[instrument(skip(self))]
    pub async fn like(&self, id: &str, user_id: &str) -> Result<Post> {
        let mut post = self.get(id).await?;
        if post.likes.iter().any(|l| l.user == user_id) {
            return Err(StoreError::AlreadyLiked(format!("post: {}", id)));
        }
        post.likes.insert(
            0,
            Like {
                user: user_id.to_string(),
            },
        );
        self.persist(&post).await?;
        Ok(post)
    }

    /// 取消点赞；尚未点赞返回 NotLiked。
    #[instrument(skip(self))]
    pub async fn unlike(&self, id: &str, user_id: &str) -> Result<Post> {
        let mut post = self.get(id).await?;
        let position = post
            .likes
            .iter()
            .position(|l| l.user == user_id)
            .ok_or_else(|| StoreError::NotLiked(format!("post: {}", id)))?;
        post.likes.remove(position);
        self.persist(&post).await?;
        Ok(post)
    }

    /// 追加评论（最新在前）。
    #[instrument(skip(self, author, text))]
    pub async fn add_comment(&self, id: &str, author: &Author, text: &str) -> Result<Post> {
        let mut post = self.get(id).await?;
        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            user: author.id.clone(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            text: text.to_string(),
            created_at: Some(Utc::now()),
        };
        post.comments.insert(0, comment);
        self.persist(&post).await?;
        Ok(post)
    }

    /// 获取单条评论
    #[instrument(skip(self))]
    pub async fn get_comment(&self, id: &str, comment_id: &str) -> Result<Comment> {
        let post = self.get(id).await?;
        post.comments
            .into_iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| StoreError::NotFound(format!("comment: {}", comment_id)))
    }

    /// 删除评论；id 不存在返回 NotFound 且评论列表不变。
    #[instrument(skip(self))]
    pub async fn remove_comment(&self, id: &str, comment_id: &str) -> Result<Post> {
        let mut post = self.get(id).await?;
        let position = post
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| StoreError::NotFound(format!("comment: {}", comment_id)))?;
        post.comments.remove(position);
        self.persist(&post).await?;
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn author(id: &str, name: &str) -> Author {
        Author {
            id: id.to_string(),
            name: name.to_string(),
            avatar: format!("https://example.com/{}.png", id),
        }
    }

    #[tokio::test]
    async fn create_denormalizes_author_fields() {
        let dir = TempDir::new().unwrap();
        let posts = PostManager::new(dir.path());

        let post = posts
            .create(&author("u1", "Ada"), "a long enough post body")
            .await
            .unwrap();
        assert_eq!(post.user, "u1");
        assert_eq!(post.name, "Ada");
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let posts = PostManager::new(dir.path());
        let ada = author("u1", "Ada");

        let first = posts.create(&ada, "the first post body").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = posts.create(&ada, "the second post body").await.unwrap();

        let all = posts.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn double_like_rejected() {
        let dir = TempDir::new().unwrap();
        let posts = PostManager::new(dir.path());
        let post = posts
            .create(&author("u1", "Ada"), "a long enough post body")
            .await
            .unwrap();

        let liked = posts.like(&post.id, "u2").await.unwrap();
        assert_eq!(liked.likes.len(), 1);

        let err = posts.like(&post.id, "u2").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyLiked(_)));

        let stored = posts.get(&post.id).await.unwrap();
        assert_eq!(stored.likes.len(), 1);
    }

    #[tokio::test]
    async fn unlike_requires_existing_like() {
        let dir = TempDir::new().unwrap();
        let posts = PostManager::new(dir.path());
        let post = posts
            .create(&author("u1", "Ada"), "a long enough post body")
            .await
            .unwrap();

        let err = posts.unlike(&post.id, "u2").await.unwrap_err();
        assert!(matches!(err, StoreError::NotLiked(_)));

        posts.like(&post.id, "u2").await.unwrap();
        let unliked = posts.unlike(&post.id, "u2").await.unwrap();
        assert!(unliked.likes.is_empty());
    }

    #[tokio::test]
    async fn comments_are_prepended() {
        let dir = TempDir::new().unwrap();
        let posts = PostManager::new(dir.path());
        let post = posts
            .create(&author("u1", "Ada"), "a long enough post body")
            .await
            .unwrap();

        posts
            .add_comment(&post.id, &author("u2", "Eve"), "first comment text")
            .await
            .unwrap();
        let updated = posts
            .add_comment(&post.id, &author("u3", "Bob"), "second comment text")
            .await
            .unwrap();

        assert_eq!(updated.comments.len(), 2);
        assert_eq!(updated.comments[0].name, "Bob");
        assert_eq!(updated.comments[1].name, "Eve");
    }

    #[tokio::test]
    async fn removing_unknown_comment_keeps_list() {
        let dir = TempDir::new().unwrap();
        let posts = PostManager::new(dir.path());
        let post = posts
            .create(&author("u1", "Ada"), "a long enough post body")
            .await
            .unwrap();
        posts
            .add_comment(&post.id, &author("u2", "Eve"), "only comment text")
            .await
            .unwrap();

        let err = posts
            .remove_comment(&post.id, "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let stored = posts.get(&post.id).await.unwrap();
        assert_eq!(stored.comments.len(), 1);
    }

    #[tokio::test]
    async fn only_author_deletes_post() {
        let dir = TempDir::new().unwrap();
        let posts = PostManager::new(dir.path());
        let post = posts
            .create(&author("u1", "Ada"), "a long enough post body")
            .await
            .unwrap();

        let err = posts.delete(&post.id, "u2").await.unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));

        posts.delete(&post.id, "u1").await.unwrap();
        let err = posts.get(&post.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
