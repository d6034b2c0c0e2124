// apps/tc_cli/src/main.rs

//! TerraCompact 命令行界面
//!
//! 提供土壤压实模拟的命令行工具。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 4: Application**：
//! - 组装配置，调用 `tc_physics` 驱动器与 `tc_io` 导出器
//! - 库层通过 `log` 记录日志，这里由 tracing 订阅器统一输出

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// TerraCompact 土壤压实模拟命令行工具
#[derive(Parser)]
#[command(name = "tc_cli")]
#[command(author = "TerraCompact Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TerraCompact soil compaction simulator", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 单点土柱多次通过模拟
    Column(commands::column::ColumnArgs),
    /// 沿路线的三维体积模拟
    Route(commands::route::RouteArgs),
    /// 单变量敏感性矩阵
    Sweep(commands::sweep::SweepArgs),
    /// 验证配置文件
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志（同时桥接库层的 log 记录）
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish()
        .try_init()?;

    match cli.command {
        Commands::Column(args) => commands::column::execute(args),
        Commands::Route(args) => commands::route::execute(args),
        Commands::Sweep(args) => commands::sweep::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
