use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::models::AdminAccountCreate;
use crate::db::repository::admin_account;
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是挂件后端的核心数据结构，`Clone` 为浅拷贝。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// # 使用示例
///
/// ```ignore
/// let messages = chat_message::list_by_session(&state.pool, &session_id).await?;
/// let jwt = state.get_jwt_service();
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 方法代替
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/hermit.db，自动迁移)
    /// 3. JWT 服务
    /// 4. 初始管理员账户 (仅当 ADMIN_* 配置齐全且账户不存在)
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        let db_path = config.database_path();
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");
        let pool = db_service.pool;

        // 2. Initialize JWT service with the configured secret
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        // 3. Seed the bootstrap admin account if configured
        seed_admin_account(config, &pool).await;

        Self::new(config.clone(), pool, jwt_service)
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

/// 播种初始管理员账户
///
/// `ADMIN_SHOP` / `ADMIN_USERNAME` / `ADMIN_PASSWORD` 三项齐全且
/// 该店铺下用户名不存在时创建，否则跳过。收件箱没有注册接口，
/// 新部署靠这里拿到第一个账户。
async fn seed_admin_account(config: &Config, pool: &SqlitePool) {
    let (shop, username, password) = match (
        &config.admin_shop,
        &config.admin_username,
        &config.admin_password,
    ) {
        (Some(shop), Some(username), Some(password)) => (shop, username, password),
        _ => return,
    };

    let existing = admin_account::find_by_shop_username(pool, shop, username)
        .await
        .expect("Failed to check for the bootstrap admin account");

    if existing.is_some() {
        tracing::debug!("Bootstrap admin '{}' already exists for {}", username, shop);
        return;
    }

    let created = admin_account::create(
        pool,
        AdminAccountCreate {
            shop: shop.clone(),
            username: username.clone(),
            password: password.clone(),
            display_name: config.admin_display_name.clone(),
        },
    )
    .await
    .expect("Failed to seed the bootstrap admin account");

    tracing::info!(
        "🔑 Seeded admin account '{}' for shop {}",
        created.username,
        created.shop
    );
}
