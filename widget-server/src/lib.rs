//! Hermit Widget Server - Shopify 店面客服挂件后端
//!
//! # 架构概述
//!
//! 本模块是挂件后端的主入口，提供以下核心功能：
//!
//! - **店面公共接口** (`api::widget`): 访客注册、消息收发、外观配置
//! - **商家收件箱** (`api::inbox`): 会话列表、消息记录、客服回复
//! - **认证** (`auth`): JWT + Argon2 商家认证体系
//! - **数据库** (`db`): SQLite (sqlx) 关系存储
//!
//! # 模块结构
//!
//! ```text
//! widget-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志等工具
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use api::{build_app, build_router};
pub use auth::{CurrentAdmin, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 保留的日志天数，超过即被启动时的清理删除
const LOG_RETENTION_DAYS: u64 = 30;

/// 设置运行环境
///
/// 按顺序：
/// 1. 加载 .env 文件 (可选)
/// 2. 创建日志目录 (WORK_DIR/logs)
/// 3. 初始化日志 (LOG_LEVEL / LOG_JSON 控制格式)
/// 4. 清理过期日志文件
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/hermit".into());
    let log_dir = std::path::Path::new(&work_dir).join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());

    init_logger_with_file(log_level.as_deref(), log_json, log_dir.to_str());

    if let Some(dir) = log_dir.to_str()
        && let Err(e) = cleanup_old_logs(dir, LOG_RETENTION_DAYS)
    {
        tracing::warn!("Failed to clean up old logs: {}", e);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  __                    _ __
   / / / /__  _________ ___  (_) /_
  / /_/ / _ \/ ___/ __ `__ \/ / __/
 / __  /  __/ /  / / / / / / / /_
/_/ /_/\___/_/  /_/ /_/ /_/_/\__/
    "#
    );
}
