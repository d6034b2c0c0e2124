// apps/tc_cli/src/commands/sweep.rs

//! 单变量敏感性矩阵命令

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tc_config::SweepConfig;
use tc_physics::run_sweep;
use tracing::{info, warn};

/// 敏感性矩阵参数
#[derive(Args)]
pub struct SweepArgs {
    /// JSON 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出目录
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 有检查未通过时返回错误
    #[arg(long)]
    pub strict: bool,
}

/// 执行敏感性矩阵命令
pub fn execute(args: SweepArgs) -> Result<()> {
    info!("=== TerraCompact 敏感性矩阵 ===");
    let mut config = match &args.config {
        Some(path) => SweepConfig::from_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => SweepConfig::default(),
    };
    if let Some(dir) = &args.output {
        config.output.directory = dir.clone();
    }
    info!(
        "通过次数 {:?}, 质量 {:?} kg, 含水率 {:?}",
        config.pass_values, config.mass_values_kg, config.moisture_values
    );

    let start = Instant::now();
    let report = run_sweep(&config).context("敏感性矩阵运行失败")?;
    info!("矩阵完成, 耗时 {:.2?}", start.elapsed());

    let summary =
        tc_io::export_sweep(&report, &config.output.directory).context("导出结果失败")?;
    super::report_files(&summary);

    let failed = report.checks.iter().filter(|c| !c.passed).count();
    if failed == 0 {
        info!("全部 {} 项趋势检查通过", report.checks.len());
    } else {
        warn!("{} / {} 项趋势检查未通过", failed, report.checks.len());
        if args.strict {
            bail!("{} 项趋势检查未通过", failed);
        }
    }
    Ok(())
}
