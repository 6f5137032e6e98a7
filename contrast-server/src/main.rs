use anyhow::Result;
use contrast_rules::ContrastRules;
use contrast_server::{Server, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("contrast_server=debug".parse()?))
        .init();

    info!("Contrast 服务端启动中...");

    let config = ServerConfig::load()?;
    let server = Server::bind(&config, ContrastRules).await?;

    tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("收到退出信号，服务端关闭");
            Ok(())
        }
    }
}
