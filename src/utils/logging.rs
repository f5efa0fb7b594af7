/// 日志工具模块
///
/// 提供日志初始化和输出格式化的辅助函数
use crate::config::Config;
use crate::orchestrator::RunSummary;
use std::ops::Range;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing
///
/// `RUST_LOG` 优先；否则普通模式为 info，详细模式为 debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能被重复调用
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 开放题批量重新生成");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 接口: {} | 默认模型: {}", config.llm_api_url, config.llm_model_name);
    info!(
        "📁 输入: {} | 模板: {} | 输出: {}",
        config.input_file, config.template_file, config.output_file
    );
    info!("{}", "=".repeat(60));
}

/// 记录本次选中的题目范围
///
/// # 参数
/// - `total`: 开放题总数
/// - `window`: 实际生效的区间
pub fn log_selection(total: usize, window: &Range<usize>) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📦 本批题目: [{}, {}) / 共 {} 道，派发 {} 个任务",
        window.start,
        window.end,
        total,
        window.len()
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary, output_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.succeeded, summary.dispatched);
    info!("❌ 失败: {}", summary.failed);
    info!("📋 开放题总数: {}", summary.open_text);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {} (共 {} 条)", output_file, summary.total_records);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
