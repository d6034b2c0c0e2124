// apps/tc_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 加载 JSON 运行配置并执行全部前置检查，包括临界应力剖面解析与路线构建。

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use tc_config::{ColumnRunConfig, SweepConfig, VolumeRunConfig};
use tc_physics::critical::layered::resolve_layers;
use tc_physics::geometry::VolumeGrid;
use tc_physics::RouteGeometry;
use tracing::{error, info};

/// 配置种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKind {
    /// 单点土柱
    Column,
    /// 路线三维
    Route,
    /// 敏感性矩阵
    Sweep,
}

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 配置种类
    #[arg(short, long, value_enum, default_value = "column")]
    pub kind: ConfigKind,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== TerraCompact 配置验证 ===");
    info!("文件: {} ({:?})", args.config.display(), args.kind);

    match check(&args.config, args.kind) {
        Ok(notes) => {
            for note in notes {
                info!("  {}", note);
            }
            info!("验证通过 ✓");
            Ok(())
        }
        Err(e) => {
            error!("验证失败: {:#}", e);
            bail!("配置验证失败")
        }
    }
}

/// 加载并检查配置，返回摘要信息
fn check(path: &Path, kind: ConfigKind) -> Result<Vec<String>> {
    let mut notes = Vec::new();
    match kind {
        ConfigKind::Column => {
            let config = ColumnRunConfig::from_file(path)?;
            notes.push(format!(
                "土柱: {} 次通过, 深度 {} m, dz {} m",
                config.column.passes, config.column.depth_m, config.column.dz_m
            ));
        }
        ConfigKind::Sweep => {
            let config = SweepConfig::from_file(path)?;
            let cases = 1
                + config.pass_values.len()
                + config.mass_values_kg.len()
                + config.moisture_values.len();
            notes.push(format!("敏感性矩阵: {} 个工况", cases));
        }
        ConfigKind::Route => {
            let config = VolumeRunConfig::from_file(path)?;
            let layers = resolve_layers(&config.soil, config.domain.depth_m)?;
            if layers.is_empty() {
                notes.push(format!(
                    "临界应力: {} (线性)",
                    config.soil.soil_profile
                ));
            } else {
                notes.push(format!(
                    "临界应力: {} ({} 层)",
                    config.soil.soil_profile,
                    layers.len()
                ));
            }

            let source = tc_io::route_source(&config)?;
            let route = RouteGeometry::build(
                &source,
                config.traffic.step_along_route_m,
                config.traffic.track_gauge_m,
            )?;
            let grid = VolumeGrid::around_route(&route, &config.domain)?;
            let (nz, ny, nx) = grid.dims();
            notes.push(format!(
                "路线: {}, {} 个采样点, 网格 {}x{}x{}",
                source.name(),
                route.centerline.len(),
                nx,
                ny,
                nz
            ));
        }
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_config_checks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("column.json");
        ColumnRunConfig::default().save_to_file(&path).unwrap();
        assert!(check(&path, ConfigKind::Column).is_ok());
    }

    #[test]
    fn test_bad_layer_spec_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.json");
        let mut config = VolumeRunConfig::default();
        config.soil.soil_profile = tc_config::SoilProfile::Custom;
        config.soil.sigma_crit_layers = "1.0:100,0.5:200".to_string();
        config.save_to_file(&path).unwrap();
        assert!(check(&path, ConfigKind::Route).is_err());
    }
}
