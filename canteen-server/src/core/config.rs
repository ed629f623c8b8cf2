use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 食堂服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/canteen | 工作目录 (数据库、上传文件、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | JWT_SECRET 等 | (见 [`JwtConfig`]) | JWT 密钥、有效期、签发者 |
/// | ADMIN_USERNAME | admin | 初始管理员账号 |
/// | ADMIN_PASSWORD | admin123 | 初始管理员密码 (仅首次建库时使用) |
/// | LOW_STOCK_THRESHOLD | 5 | 低库存告警阈值 |
/// | NOTIFY_WEBHOOK_URL | (空) | 告警 webhook 地址，空则不发送 |
/// | MAX_UPLOAD_MB | 5 | 图片上传大小上限 (MB) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/canteen HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传图片、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,

    // === 账号播种 ===
    /// 初始管理员用户名
    pub admin_username: String,
    /// 初始管理员密码
    pub admin_password: String,

    // === 告警配置 ===
    /// 低库存告警阈值 (quantity <= threshold 时告警)
    pub low_stock_threshold: i64,
    /// 告警 webhook URL，空字符串表示禁用
    pub notify_webhook_url: String,

    // === 上传配置 ===
    /// 图片上传大小上限 (MB)
    pub max_upload_mb: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/canteen".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),

            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),

            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            notify_webhook_url: std::env::var("NOTIFY_WEBHOOK_URL").unwrap_or_default(),

            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
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

    /// 运行环境是否为 production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 运行环境是否为 development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (WORK_DIR/db)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("db")
    }

    /// 上传文件目录 (WORK_DIR/uploads)
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// 日志目录 (WORK_DIR/logs)
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

/// 等价于 [`Config::from_env`]
impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
