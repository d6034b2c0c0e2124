// apps/tc_cli/src/commands/column.rs

//! 单点土柱模拟命令

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tc_config::ColumnRunConfig;
use tc_physics::simulate_column;
use tracing::info;

/// 单点土柱参数（命令行值覆盖配置文件）
#[derive(Args)]
pub struct ColumnArgs {
    /// JSON 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出目录
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 通过次数
    #[arg(long)]
    pub passes: Option<u32>,

    /// 土柱深度 [m]
    #[arg(long)]
    pub depth: Option<f64>,

    /// 分层厚度 [m]
    #[arg(long)]
    pub dz: Option<f64>,

    /// 整机质量 [kg]
    #[arg(long)]
    pub mass: Option<f64>,

    /// 车轮数量
    #[arg(long)]
    pub wheels: Option<u32>,

    /// 单轮载荷覆盖值 [kg]
    #[arg(long)]
    pub wheel_load: Option<f64>,

    /// 轮胎宽度 [m]
    #[arg(long)]
    pub tire_width: Option<f64>,

    /// 接地长度 [m]
    #[arg(long)]
    pub contact_length: Option<f64>,

    /// 含水率 [-]
    #[arg(long)]
    pub moisture: Option<f64>,

    /// Bekker 黏聚模量 kc
    #[arg(long)]
    pub kc: Option<f64>,

    /// Bekker 摩擦模量 kphi
    #[arg(long)]
    pub kphi: Option<f64>,

    /// Bekker 沉陷指数 n
    #[arg(long)]
    pub n: Option<f64>,
}

impl ColumnArgs {
    /// 组装运行配置
    pub fn build_config(&self) -> Result<ColumnRunConfig> {
        let mut config = match &self.config {
            Some(path) => ColumnRunConfig::from_file(path)
                .with_context(|| format!("加载配置失败: {}", path.display()))?,
            None => ColumnRunConfig::default(),
        };

        if let Some(v) = self.passes {
            config.column.passes = v;
        }
        if let Some(v) = self.depth {
            config.column.depth_m = v;
        }
        if let Some(v) = self.dz {
            config.column.dz_m = v;
        }
        if let Some(v) = self.mass {
            config.machine.mass_kg = v;
        }
        if let Some(v) = self.wheels {
            config.machine.wheels = v;
        }
        if self.wheel_load.is_some() {
            config.wheel_load_kg = self.wheel_load;
        }
        if let Some(v) = self.tire_width {
            config.machine.tire_width_m = v;
        }
        if let Some(v) = self.contact_length {
            config.machine.contact_length_m = v;
        }
        if let Some(v) = self.moisture {
            config.soil.moisture = v;
        }
        if let Some(v) = self.kc {
            config.soil.kc = v;
        }
        if let Some(v) = self.kphi {
            config.soil.kphi = v;
        }
        if let Some(v) = self.n {
            config.soil.n_bekker = v;
        }
        if let Some(dir) = &self.output {
            config.output.directory = dir.clone();
        }

        config.validate().context("配置无效")?;
        Ok(config)
    }
}

/// 执行单点土柱命令
pub fn execute(args: ColumnArgs) -> Result<()> {
    info!("=== TerraCompact 单点土柱模拟 ===");
    let config = args.build_config()?;
    info!(
        "通过 {} 次, 深度 {} m, dz {} m, 质量 {} kg, 含水率 {}",
        config.column.passes,
        config.column.depth_m,
        config.column.dz_m,
        config.machine.mass_kg,
        config.soil.moisture
    );

    let start = Instant::now();
    let outcome = simulate_column(&config).context("单点土柱模拟失败")?;
    info!("模拟完成, 耗时 {:.2?}", start.elapsed());

    if let Some(last) = outcome.last_record() {
        info!(
            "车辙 {:.2} mm, 表层压实指数 {:.3}, 0-30cm {:.3}, 30-100cm {:.3}",
            last.rut_depth_mm,
            last.surface_compaction_index,
            last.avg_compaction_0_30cm,
            last.avg_compaction_30_100cm
        );
    }

    let summary = tc_io::export_column(&outcome, &config, &config.output.directory)
        .context("导出结果失败")?;
    super::report_files(&summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ColumnArgs,
    }

    #[test]
    fn test_flags_override_defaults() {
        let harness = Harness::parse_from([
            "tc_cli", "--passes", "7", "--moisture", "0.33", "--wheel-load", "3000",
        ]);
        let config = harness.args.build_config().unwrap();
        assert_eq!(config.column.passes, 7);
        assert_eq!(config.soil.moisture, 0.33);
        assert_eq!(config.wheel_load_kg, Some(3000.0));
        assert_eq!(config.column.depth_m, 10.0);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let harness = Harness::parse_from(["tc_cli", "--dz", "20"]);
        assert!(harness.args.build_config().is_err());
    }
}
