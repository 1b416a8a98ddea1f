//! 档案 CLI 操作

use super::ui::{print_header, print_kv, print_section, print_success};
use super::OutputFormat;
use crate::client::expect_json;
use crossterm::style::Stylize;
use reqwest::Client;
use serde_json::{json, Value};

/// 渲染单个档案（表格模式）
fn print_profile(profile: &Value) {
    let handle = profile["handle"].as_str().unwrap_or("unknown");
    print_header(&format!("📋 {}", handle));
    println!();
    print_kv("ID", profile["id"].as_str().unwrap_or(""));
    print_kv("主人", profile["user"]["name"].as_str().unwrap_or(""));

    let skills: Vec<&str> = profile["skills"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    print_kv("技能", &skills.join(", "));

    if let Some(entries) = profile["experience"].as_array() {
        if !entries.is_empty() {
            print_section("💼 职业经历");
            for e in entries {
                println!(
                    "  • {} @ {} ({})",
                    e["title"].as_str().unwrap_or("").cyan(),
                    e["company"].as_str().unwrap_or(""),
                    e["from"].as_str().unwrap_or("")
                );
            }
        }
    }

    if let Some(entries) = profile["education"].as_array() {
        if !entries.is_empty() {
            print_section("🎓 教育经历");
            for e in entries {
                println!(
                    "  • {} - {} ({})",
                    e["school"].as_str().unwrap_or("").cyan(),
                    e["degree"].as_str().unwrap_or(""),
                    e["from"].as_str().unwrap_or("")
                );
            }
        }
    }
    println!();
}

async fn show_profile(resp: reqwest::Response, output: OutputFormat) -> anyhow::Result<()> {
    let body = expect_json(resp).await?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => print_profile(&body["profile"]),
    }
    Ok(())
}

/// 列出全部档案
pub async fn list_profiles(
    client: &Client,
    base: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/profiles", base);
    let resp = client.get(&url).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            print_header("📋 档案列表");
            println!();
            let profiles = body["profiles"].as_array().cloned().unwrap_or_default();
            if profiles.is_empty() {
                println!("  {}", "暂无档案".dark_grey());
            } else {
                println!(
                    "  {:<20}  {:<20}  {}",
                    "Handle".bold(),
                    "主人".bold(),
                    "技能".bold()
                );
                println!("  {}", "─".repeat(70).dark_grey());
                for p in profiles {
                    let skills: Vec<&str> = p["skills"]
                        .as_array()
                        .map(|a| a.iter().filter_map(Value::as_str).collect())
                        .unwrap_or_default();
                    println!(
                        "  {:<20}  {:<20}  {}",
                        p["handle"].as_str().unwrap_or("").cyan(),
                        p["user"]["name"].as_str().unwrap_or(""),
                        skills.join(", ")
                    );
                }
            }
            println!();
        }
    }

    Ok(())
}

/// 查看自己的档案
pub async fn my_profile(client: &Client, base: &str, output: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/profiles/me", base);
    let resp = client.get(&url).send().await?;
    show_profile(resp, output).await
}

/// 按 handle 查看档案
pub async fn profile_by_handle(
    client: &Client,
    base: &str,
    handle: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/profiles/handle/{}", base, handle);
    let resp = client.get(&url).send().await?;
    show_profile(resp, output).await
}

/// 按 id 查看档案
pub async fn get_profile(
    client: &Client,
    base: &str,
    id: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/profiles/{}", base, id);
    let resp = client.get(&url).send().await?;
    show_profile(resp, output).await
}

/// 建档
pub async fn create_profile(
    client: &Client,
    base: &str,
    handle: &str,
    skills: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/profiles", base);
    let resp = client
        .post(&url)
        .json(&json!({
            "profile": {
                "handle": handle,
                "skills": skills
            }
        }))
        .send()
        .await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
        OutputFormat::Table => {
            print_success(&format!(
                "档案 {} 创建成功",
                body["profile"]["handle"].as_str().unwrap_or(handle)
            ));
        }
    }

    Ok(())
}
