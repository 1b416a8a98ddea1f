mod client;
mod ops;

use clap::{Parser, Subcommand};
use ops::{
    add_comment, create_post, create_profile, delete_post, get_post, get_profile, like_post,
    list_posts, list_profiles, login, me, my_profile, profile_by_handle, register, remove_comment,
    unlike_post, OutputFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI wrapper around the Devlink HTTP API.
#[derive(Parser)]
#[command(name = "devlink-cli", author, version, about = "CLI for Devlink API")]
struct Cli {
    /// API base url
    #[arg(long, env = "DL_API_BASE", default_value = "http://127.0.0.1:8080")]
    api_base: String,

    /// Bearer token for authentication
    #[arg(long, env = "DL_TOKEN")]
    token: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // ==================== 认证 ====================
    /// 注册新账户
    Register {
        /// 显示名称
        #[arg(long)]
        name: String,
        /// 邮箱（用于登录）
        #[arg(long)]
        email: String,
        /// 密码
        #[arg(long)]
        password: String,
    },
    /// 登录，获取 access token
    Login {
        /// 邮箱
        #[arg(long, short)]
        email: String,
        /// 密码
        #[arg(long, short)]
        password: String,
    },
    /// 查看当前登录用户
    Me,

    // ==================== 档案 ====================
    /// 档案管理命令
    #[command(subcommand)]
    Profile(ProfileCommands),

    // ==================== 帖子 ====================
    /// 帖子管理命令
    #[command(subcommand)]
    Post(PostCommands),
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// 列出全部档案
    List,
    /// 查看自己的档案
    Me,
    /// 按 handle 查看档案
    Handle { handle: String },
    /// 按 id 查看档案
    Get { id: String },
    /// 建档
    Create {
        /// 唯一的展示用标识
        #[arg(long)]
        handle: String,
        /// 逗号分隔的技能列表
        #[arg(long)]
        skills: String,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    /// 列出全部帖子
    List,
    /// 查看帖子
    Get { id: String },
    /// 发帖
    Create { text: String },
    /// 删帖（仅作者）
    Delete { id: String },
    /// 点赞
    Like { id: String },
    /// 取消点赞
    Unlike { id: String },
    /// 追加评论
    Comment { id: String, text: String },
    /// 删除评论
    Uncomment { id: String, comment_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件（如果存在），忽略错误
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();
    let client = client::build_client(cli.token.as_deref())?;
    let base = cli.api_base.trim_end_matches('/');

    match cli.command {
        // 认证命令
        Commands::Register {
            name,
            email,
            password,
        } => register(&client, base, &name, &email, &password, cli.output).await?,
        Commands::Login { email, password } => {
            login(&client, base, &email, &password, cli.output).await?;
        }
        Commands::Me => me(&client, base, cli.output).await?,

        // 档案命令
        Commands::Profile(profile_cmd) => match profile_cmd {
            ProfileCommands::List => list_profiles(&client, base, cli.output).await?,
            ProfileCommands::Me => my_profile(&client, base, cli.output).await?,
            ProfileCommands::Handle { handle } => {
                profile_by_handle(&client, base, &handle, cli.output).await?
            }
            ProfileCommands::Get { id } => get_profile(&client, base, &id, cli.output).await?,
            ProfileCommands::Create { handle, skills } => {
                create_profile(&client, base, &handle, &skills, cli.output).await?
            }
        },

        // 帖子命令
        Commands::Post(post_cmd) => match post_cmd {
            PostCommands::List => list_posts(&client, base, cli.output).await?,
            PostCommands::Get { id } => get_post(&client, base, &id, cli.output).await?,
            PostCommands::Create { text } => create_post(&client, base, &text, cli.output).await?,
            PostCommands::Delete { id } => delete_post(&client, base, &id).await?,
            PostCommands::Like { id } => like_post(&client, base, &id, cli.output).await?,
            PostCommands::Unlike { id } => unlike_post(&client, base, &id, cli.output).await?,
            PostCommands::Comment { id, text } => {
                add_comment(&client, base, &id, &text, cli.output).await?
            }
            PostCommands::Uncomment { id, comment_id } => {
                remove_comment(&client, base, &id, &comment_id, cli.output).await?
            }
        },
    }

    Ok(())
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
