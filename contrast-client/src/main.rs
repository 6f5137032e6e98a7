use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Contrast 终端客户端
#[derive(Parser, Debug)]
#[command(name = "contrast-client", version, about)]
struct Args {
    /// 服务端主机名
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 日志写到 stderr，避免与棋盘输出混在一起
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("contrast_client=warn".parse()?))
        .init();

    contrast_client::run(&args.host).await?;
    Ok(())
}
