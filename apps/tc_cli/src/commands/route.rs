// apps/tc_cli/src/commands/route.rs

//! 路线三维体积模拟命令

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tc_config::{RouteMode, SoilProfile, VolumeRunConfig};
use tc_physics::simulate_volume;
use tracing::info;

/// 路线三维模拟参数（命令行值覆盖配置文件）
#[derive(Args)]
pub struct RouteArgs {
    /// JSON 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出目录
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 通过次数
    #[arg(long)]
    pub passes: Option<u32>,

    /// 路线长度 [m]（直线/正弦）
    #[arg(long)]
    pub route_length: Option<f64>,

    /// 计算域宽度 [m]
    #[arg(long)]
    pub domain_width: Option<f64>,

    /// 计算深度 [m]
    #[arg(long)]
    pub depth: Option<f64>,

    /// 沿路线网格步长 [m]
    #[arg(long)]
    pub dx: Option<f64>,

    /// 横向网格步长 [m]
    #[arg(long)]
    pub dy: Option<f64>,

    /// 垂向分层厚度 [m]
    #[arg(long)]
    pub dz: Option<f64>,

    /// 轮距 [m]
    #[arg(long)]
    pub track_gauge: Option<f64>,

    /// 路线重采样步长 [m]
    #[arg(long)]
    pub step_along_route: Option<f64>,

    /// 路线来源 (straight, sine, csv)
    #[arg(long)]
    pub route_mode: Option<RouteMode>,

    /// CSV 路线文件（隐含 csv 模式）
    #[arg(long)]
    pub route_csv: Option<PathBuf>,

    /// 正弦振幅 [m]
    #[arg(long)]
    pub sine_amplitude: Option<f64>,

    /// 正弦波长 [m]
    #[arg(long)]
    pub sine_wavelength: Option<f64>,

    /// 横向偏移 [m]
    #[arg(long, allow_hyphen_values = true)]
    pub y_offset: Option<f64>,

    /// 整机质量 [kg]
    #[arg(long)]
    pub mass: Option<f64>,

    /// 车轮数量
    #[arg(long)]
    pub wheels: Option<u32>,

    /// 单轮载荷覆盖值 [kg]
    #[arg(long)]
    pub wheel_load: Option<f64>,

    /// 含水率 [-]
    #[arg(long)]
    pub moisture: Option<f64>,

    /// 临界应力剖面 (linear, sandy_loam, clayey, lateritic, wet_weak, custom)
    #[arg(long)]
    pub soil_profile: Option<SoilProfile>,

    /// 自定义分层 "深度:kPa,深度:kPa"（隐含 custom 剖面）
    #[arg(long)]
    pub sigma_crit_layers: Option<String>,

    /// 体积采样阈值
    #[arg(long)]
    pub volume_threshold: Option<f64>,

    /// 不导出交互式 HTML
    #[arg(long)]
    pub no_interactive_html: bool,
}

impl RouteArgs {
    /// 组装运行配置
    pub fn build_config(&self) -> Result<VolumeRunConfig> {
        let mut config = match &self.config {
            Some(path) => VolumeRunConfig::from_file(path)
                .with_context(|| format!("加载配置失败: {}", path.display()))?,
            None => VolumeRunConfig::default(),
        };

        let domain = &mut config.domain;
        if let Some(v) = self.route_length {
            domain.route_length_m = v;
        }
        if let Some(v) = self.domain_width {
            domain.domain_width_m = v;
        }
        if let Some(v) = self.depth {
            domain.depth_m = v;
        }
        if let Some(v) = self.dx {
            domain.dx_m = v;
        }
        if let Some(v) = self.dy {
            domain.dy_m = v;
        }
        if let Some(v) = self.dz {
            domain.dz_m = v;
        }

        if let Some(v) = self.passes {
            config.traffic.passes = v;
        }
        if let Some(v) = self.track_gauge {
            config.traffic.track_gauge_m = v;
        }
        if let Some(v) = self.step_along_route {
            config.traffic.step_along_route_m = v;
        }

        let route = &mut config.route;
        if let Some(mode) = self.route_mode {
            route.mode = mode;
        }
        if let Some(path) = &self.route_csv {
            route.mode = RouteMode::Csv;
            route.csv_path = Some(path.clone());
        }
        if let Some(v) = self.sine_amplitude {
            route.sine_amplitude_m = v;
        }
        if let Some(v) = self.sine_wavelength {
            route.sine_wavelength_m = v;
        }
        if let Some(v) = self.y_offset {
            route.y_offset_m = v;
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

        if let Some(v) = self.moisture {
            config.soil.moisture = v;
        }
        if let Some(profile) = self.soil_profile {
            config.soil.soil_profile = profile;
        }
        if let Some(spec) = &self.sigma_crit_layers {
            config.soil.soil_profile = SoilProfile::Custom;
            config.soil.sigma_crit_layers = spec.clone();
        }

        if let Some(v) = self.volume_threshold {
            config.output.volume_threshold = v;
        }
        if self.no_interactive_html {
            config.output.interactive_html = false;
        }
        if let Some(dir) = &self.output {
            config.output.directory = dir.clone();
        }

        config.validate().context("配置无效")?;
        Ok(config)
    }
}

/// 执行路线三维命令
pub fn execute(args: RouteArgs) -> Result<()> {
    info!("=== TerraCompact 路线三维模拟 ===");
    let config = args.build_config()?;

    let source = tc_io::route_source(&config).context("构建路线失败")?;
    info!(
        "路线 {}, 通过 {} 次, 剖面 {}, 含水率 {}",
        source.name(),
        config.traffic.passes,
        config.soil.soil_profile,
        config.soil.moisture
    );

    let start = Instant::now();
    let outcome = simulate_volume(&config, &source).context("路线三维模拟失败")?;
    let (nz, ny, nx) = outcome.grid.dims();
    info!("网格 {}x{}x{}, 耗时 {:.2?}", nx, ny, nz, start.elapsed());

    if let Some(last) = outcome.last_record() {
        info!(
            "最大压实指数 {:.3}, 0-30cm 均值 {:.3}, 30-100cm 均值 {:.3}",
            last.max_compaction_index,
            last.mean_compaction_0_30cm,
            last.mean_compaction_30_100cm
        );
    }

    let summary = tc_io::export_volume(&outcome, &config, &config.output.directory)
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
        args: RouteArgs,
    }

    #[test]
    fn test_layers_imply_custom_profile() {
        let harness = Harness::parse_from(["tc_cli", "--sigma-crit-layers", "0.3:90,1.0:140"]);
        let config = harness.args.build_config().unwrap();
        assert_eq!(config.soil.soil_profile, SoilProfile::Custom);
        assert_eq!(config.soil.sigma_crit_layers, "0.3:90,1.0:140");
    }

    #[test]
    fn test_route_csv_implies_csv_mode() {
        let harness = Harness::parse_from([
            "tc_cli", "--route-csv", "track.csv", "--no-interactive-html", "--y-offset", "-0.5",
        ]);
        let config = harness.args.build_config().unwrap();
        assert_eq!(config.route.mode, RouteMode::Csv);
        assert!(!config.output.interactive_html);
        assert_eq!(config.route.y_offset_m, -0.5);
    }

    #[test]
    fn test_unknown_profile_rejected() {
        assert!(Harness::try_parse_from(["tc_cli", "--soil-profile", "peat"]).is_err());
    }
}
