//! 帖子 CLI 操作

use super::ui::{print_error, print_header, print_kv, print_section, print_success};
use super::OutputFormat;
use crate::client::expect_json;
use crossterm::style::Stylize;
use reqwest::Client;
use serde_json::{json, Value};

/// 渲染单个帖子（表格模式）
fn print_post(post: &Value) {
    print_header(&format!(
        "📝 {} 的帖子",
        post["name"].as_str().unwrap_or("unknown")
    ));
    println!();
    print_kv("ID", post["id"].as_str().unwrap_or(""));
    print_kv("正文", post["text"].as_str().unwrap_or(""));
    let likes = post["likes"].as_array().map(Vec::len).unwrap_or(0);
    print_kv("点赞", &likes.to_string());

    if let Some(comments) = post["comments"].as_array() {
        if !comments.is_empty() {
            print_section("💬 评论");
            for c in comments {
                println!(
                    "  • [{}] {}: {}",
                    c["id"].as_str().unwrap_or("").dark_grey(),
                    c["name"].as_str().unwrap_or("").cyan(),
                    c["text"].as_str().unwrap_or("")
                );
            }
        }
    }
    println!();
}

/// 列出全部帖子，最新在前
pub async fn list_posts(client: &Client, base: &str, output: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts", base);
    let resp = client.get(&url).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            print_header("📝 帖子列表");
            println!();
            let posts = body.as_array().cloned().unwrap_or_default();
            if posts.is_empty() {
                println!("  {}", "暂无帖子".dark_grey());
            } else {
                for p in posts {
                    let likes = p["likes"].as_array().map(Vec::len).unwrap_or(0);
                    let comments = p["comments"].as_array().map(Vec::len).unwrap_or(0);
                    println!(
                        "  {}  {} {}",
                        p["id"].as_str().unwrap_or("").dark_grey(),
                        p["name"].as_str().unwrap_or("").cyan(),
                        format!("(👍{} 💬{})", likes, comments).dark_grey()
                    );
                    println!("    {}", p["text"].as_str().unwrap_or(""));
                }
            }
            println!();
        }
    }

    Ok(())
}

/// 查看单个帖子
pub async fn get_post(
    client: &Client,
    base: &str,
    id: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts/{}", base, id);
    let resp = client.get(&url).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => print_post(&body),
    }

    Ok(())
}

/// 发帖
pub async fn create_post(
    client: &Client,
    base: &str,
    text: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts", base);
    let resp = client.post(&url).json(&json!({ "text": text })).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => {
            print_success("帖子已发布");
            print_kv("ID", body["id"].as_str().unwrap_or(""));
        }
    }

    Ok(())
}

/// 删帖（仅作者）
pub async fn delete_post(client: &Client, base: &str, id: &str) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts/{}", base, id);
    let resp = client.delete(&url).send().await?;
    match expect_json(resp).await {
        Ok(_) => print_success(&format!("帖子 {} 已删除", id)),
        Err(e) => print_error(&e.to_string()),
    }
    Ok(())
}

/// 点赞
pub async fn like_post(
    client: &Client,
    base: &str,
    id: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts/{}/like", base, id);
    let resp = client.put(&url).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => {
            let likes = body["likes"].as_array().map(Vec::len).unwrap_or(0);
            print_success(&format!("已点赞，当前 {} 个赞", likes));
        }
    }

    Ok(())
}

/// 取消点赞
pub async fn unlike_post(
    client: &Client,
    base: &str,
    id: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts/{}/unlike", base, id);
    let resp = client.put(&url).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => {
            let likes = body["likes"].as_array().map(Vec::len).unwrap_or(0);
            print_success(&format!("已取消点赞，当前 {} 个赞", likes));
        }
    }

    Ok(())
}

/// 追加评论
pub async fn add_comment(
    client: &Client,
    base: &str,
    id: &str,
    text: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts/{}/comments", base, id);
    let resp = client.post(&url).json(&json!({ "text": text })).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => print_post(&body),
    }

    Ok(())
}

/// 删除评论
pub async fn remove_comment(
    client: &Client,
    base: &str,
    id: &str,
    comment_id: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/posts/{}/comments/{}", base, id, comment_id);
    let resp = client.delete(&url).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => {
            print_success(&format!("评论 {} 已删除", comment_id));
            print_post(&body);
        }
    }

    Ok(())
}
