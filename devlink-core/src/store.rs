//! 文档存储：每个文档一个 JSON 文件，唯一键通过索引文件维护。

use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 单个文档集合，目录下每个文档对应一个 `<id>.json`。
#[derive(Debug, Clone)]
pub struct Collection {
    dir: PathBuf,
}

impl Collection {
    pub fn new<P: AsRef<Path>>(data_dir: P, name: &str) -> Self {
        Self {
            dir: data_dir.as_ref().join(name),
        }
    }

    /// 确保集合目录存在。
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn doc_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    pub(crate) fn index_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.index.json", name))
    }

    /// 校验文档 id，仅允许字母数字/`-`/`_`。
    pub fn validate_id(id: &str) -> Result<()> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if valid {
            Ok(())
        } else {
            Err(StoreError::InvalidId)
        }
    }

    pub async fn exists(&self, id: &str) -> bool {
        if Self::validate_id(id).is_err() {
            return false;
        }
        tokio::fs::try_exists(self.doc_path(id)).await.unwrap_or(false)
    }

    /// 读取单个文档，不存在返回 NotFound。
    pub async fn read<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        Self::validate_id(id)?;
        let path = self.doc_path(id);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound(format!("document: {}", id)));
        }
        let data = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// 写入（覆盖）单个文档。
    pub async fn write<T: Serialize>(&self, id: &str, doc: &T) -> Result<()> {
        Self::validate_id(id)?;
        self.ensure_dir().await?;
        let data = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(self.doc_path(id), data).await?;
        Ok(())
    }

    /// 删除文档，不存在返回 NotFound。
    pub async fn remove(&self, id: &str) -> Result<()> {
        Self::validate_id(id)?;
        let path = self.doc_path(id);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound(format!("document: {}", id)));
        }
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    /// 列出集合内所有可解析的文档（跳过索引文件）。
    pub async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.ensure_dir().await?;
        let mut docs = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            let is_index = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.ends_with(".index"))
                .unwrap_or(false);
            if is_index {
                continue;
            }
            if let Ok(data) = tokio::fs::read(&path).await {
                if let Ok(doc) = serde_json::from_slice::<T>(&data) {
                    docs.push(doc);
                }
            }
        }
        Ok(docs)
    }
}

/// 唯一键索引：键 -> 文档 id 的 JSON 映射文件。
#[derive(Debug, Clone)]
pub struct Index {
    path: PathBuf,
}

impl Index {
    pub fn new(collection: &Collection, name: &str) -> Self {
        Self {
            path: collection.index_path(name),
        }
    }

    /// 读索引；文件缺失或损坏时返回空映射。
    pub async fn load(&self) -> HashMap<String, String> {
        if let Ok(data) = tokio::fs::read(&self.path).await {
            if let Ok(map) = serde_json::from_slice::<HashMap<String, String>>(&data) {
                return map;
            }
        }
        HashMap::new()
    }

    pub async fn save(&self, map: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(map)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }

    /// 查键对应的文档 id。
    pub async fn get(&self, key: &str) -> Option<String> {
        self.load().await.get(key).cloned()
    }

    /// 写入一个键值对并落盘。
    pub async fn insert(&self, key: &str, id: &str) -> Result<()> {
        let mut map = self.load().await;
        map.insert(key.to_string(), id.to_string());
        self.save(&map).await
    }

    /// 删除单个键。
    pub async fn remove_key(&self, key: &str) -> Result<()> {
        let mut map = self.load().await;
        map.remove(key);
        self.save(&map).await
    }

    /// 删除指向指定文档的所有键。
    pub async fn remove_id(&self, id: &str) -> Result<()> {
        let mut map = self.load().await;
        map.retain(|_, v| v != id);
        self.save(&map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        id: String,
        value: u32,
    }

    fn doc(id: &str, value: u32) -> Doc {
        Doc {
            id: id.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn write_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let col = Collection::new(dir.path(), "docs");
        col.write("a1", &doc("a1", 7)).await.unwrap();
        let loaded: Doc = col.read("a1").await.unwrap();
        assert_eq!(loaded, doc("a1", 7));
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let col = Collection::new(dir.path(), "docs");
        let err = col.read::<Doc>("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn rejects_path_like_ids() {
        let dir = TempDir::new().unwrap();
        let col = Collection::new(dir.path(), "docs");
        let err = col.read::<Doc>("../escape").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId));
    }

    #[tokio::test]
    async fn list_skips_index_files() {
        let dir = TempDir::new().unwrap();
        let col = Collection::new(dir.path(), "docs");
        col.write("a1", &doc("a1", 1)).await.unwrap();
        col.write("a2", &doc("a2", 2)).await.unwrap();
        let idx = Index::new(&col, "email");
        idx.insert("k", "a1").await.unwrap();

        let docs: Vec<Doc> = col.list().await.unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn index_insert_and_remove() {
        let dir = TempDir::new().unwrap();
        let col = Collection::new(dir.path(), "docs");
        col.ensure_dir().await.unwrap();
        let idx = Index::new(&col, "email");

        idx.insert("a@x.com", "u1").await.unwrap();
        idx.insert("b@x.com", "u2").await.unwrap();
        assert_eq!(idx.get("a@x.com").await.as_deref(), Some("u1"));

        idx.remove_id("u1").await.unwrap();
        assert_eq!(idx.get("a@x.com").await, None);
        assert_eq!(idx.get("b@x.com").await.as_deref(), Some("u2"));
    }
}
