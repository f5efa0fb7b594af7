use anyhow::Result;
use clap::Parser;
use question_regen::cli::Cli;
use question_regen::utils::logging;
use question_regen::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 解析参数并加载配置
    let config = Cli::parse().into_config()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
