use canteen_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 打印横幅
    print_banner();

    // 2. 加载配置并初始化日志 (日志目录需先于 logger 存在)
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    let logs_dir = config.logs_dir();
    init_logger_with_file(Some(&config.log_level), logs_dir.to_str());

    tracing::info!("🍽️ Canteen Server starting...");

    // 3. 初始化服务器状态 (工作目录、数据库、管理员播种、各服务)
    let state = ServerState::initialize(&config).await;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server exited with error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
