// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// 日志写 stderr, stdout 留给报表结果输出
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    // 从环境变量读取日志级别，默认为 info
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=gym_reports=trace
///
/// # 示例
/// ```no_run
/// use gym_reports::logging;
/// logging::init();
/// ```
pub fn init() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .try_init();
}

/// 初始化 JSON 格式日志 (供日志采集使用)
pub fn init_json() {
    let _ = fmt()
        .json()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_current_span(false)
        .try_init();
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
