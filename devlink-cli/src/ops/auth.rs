//! 认证相关 CLI 操作

use super::ui::{print_header, print_kv, print_section, print_success};
use super::OutputFormat;
use crate::client::expect_json;
use crossterm::style::Stylize;
use devlink_core::{AuthToken, UserSummary};
use reqwest::Client;
use serde_json::json;

/// 注册新账户
pub async fn register(
    client: &Client,
    base: &str,
    name: &str,
    email: &str,
    password: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/auth/register", base);
    let resp = client
        .post(&url)
        .json(&json!({
            "name": name,
            "email": email,
            "password": password
        }))
        .send()
        .await?;
    let body = expect_json(resp).await?;
    let user: UserSummary = serde_json::from_value(body.clone())?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            print_success(&format!("账户 {} 注册成功", user.name));
            print_kv("ID", &user.id);
            print_kv("邮箱", &user.email);
            print_kv("头像", &user.avatar);
        }
    }

    Ok(())
}

/// 登录，获取 access token
pub async fn login(
    client: &Client,
    base: &str,
    email: &str,
    password: &str,
    output: OutputFormat,
) -> anyhow::Result<AuthToken> {
    let url = format!("{}/api/v1/auth/login", base);
    let resp = client
        .post(&url)
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await?;
    let body = expect_json(resp).await?;
    let token: AuthToken = serde_json::from_value(body)?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&token)?);
        }
        OutputFormat::Table => {
            print_header("🔐 登录成功");
            println!();
            print_kv("Token", &token.token);
            println!();
            print_section("💡 提示");
            println!(
                "  设置环境变量以使用此 token: {}",
                "DL_TOKEN=<token>".cyan()
            );
        }
    }

    Ok(token)
}

/// 查看当前登录用户
pub async fn me(client: &Client, base: &str, output: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/users/me", base);
    let resp = client.get(&url).send().await?;
    let body = expect_json(resp).await?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            let user = &body["user"];
            print_header(&format!(
                "👤 {}",
                user["name"].as_str().unwrap_or("unknown")
            ));
            println!();
            print_kv("ID", user["id"].as_str().unwrap_or(""));
            print_kv("邮箱", user["email"].as_str().unwrap_or(""));
            print_kv("头像", user["avatar"].as_str().unwrap_or(""));
            println!();
        }
    }

    Ok(())
}
