use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 挂件后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/hermit | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | (开发环境自动生成) | JWT 密钥，至少 32 字节 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌过期时间(分钟) |
/// | ADMIN_SHOP | (无) | 初始管理员所属店铺域名 |
/// | ADMIN_USERNAME | (无) | 初始管理员用户名 |
/// | ADMIN_PASSWORD | (无) | 初始管理员密码 |
/// | ADMIN_DISPLAY_NAME | (无) | 初始管理员显示名称 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/hermit HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 初始管理员账户 ===
    // 三项齐全时，启动阶段为空数据库播种一个收件箱账户。
    /// 初始管理员所属店铺域名
    pub admin_shop: Option<String>,
    /// 初始管理员用户名
    pub admin_username: Option<String>,
    /// 初始管理员密码
    pub admin_password: Option<String>,
    /// 初始管理员显示名称
    pub admin_display_name: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/hermit".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            admin_shop: std::env::var("ADMIN_SHOP").ok(),
            admin_username: std::env::var("ADMIN_USERNAME").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            admin_display_name: std::env::var("ADMIN_DISPLAY_NAME").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 数据库文件路径 (work_dir/database/hermit.db)
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("hermit.db")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
