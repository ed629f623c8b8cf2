use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::AccountRepository;
use crate::services::{HttpService, Notifier};

/// 服务器状态 - 所有服务的共享句柄
///
/// 每个请求处理函数都拿到一份克隆；内部都是 Arc 或浅拷贝句柄，
/// 克隆成本可以忽略。
///
/// # 使用示例
///
/// ```ignore
/// // 获取数据库连接
/// let repo = FoodItemRepository::new(state.get_db());
///
/// // 发送告警 (不阻塞请求)
/// state.notifier.send("Low stock alert: ...");
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置 (不可变)
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB on RocksDB)
    pub db: Surreal<Db>,
    /// HTTP 服务
    pub http: HttpService,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// Webhook 告警服务
    pub notifier: Notifier,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/db) 并应用表结构
    /// 3. 初始管理员账号播种 (仅当不存在任何 admin 时)
    /// 4. 各服务 (HTTP, JWT, Notifier)
    /// 5. HTTP 服务延迟初始化 (需要完整 state)
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_dir = config.database_dir();
        let db_service = DbService::new(&db_dir.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        AccountRepository::new(db.clone())
            .ensure_admin_seed(config)
            .await
            .expect("Failed to seed admin account");

        let http = HttpService::new(config.clone());
        let state = Self {
            config: config.clone(),
            db,
            http: http.clone(),
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            notifier: Notifier::new(config),
        };

        // 路由需要完整的 state，最后补挂
        http.initialize(state.clone());

        state
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
