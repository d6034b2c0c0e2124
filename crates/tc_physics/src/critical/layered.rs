// crates/tc_physics/src/critical/layered.rs

//! 静态临界应力剖面：线性或分层
//!
//! 分层表为按上界深度升序的 `(z_i, σc_i)`；深度 `z` 取第一个
//! `z_i ≥ z` 的层，超出最后一层时取最后一层。表的最后上界小于
//! 计算深度时以最后一层的值补齐到计算深度。

use serde::Serialize;
use tc_config::{SoilProfile, VolumeSoilConfig};

use crate::error::{PhysicsError, PhysicsResult};

use super::CriticalStress;

/// 分层临界应力中的一层
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalLayer {
    /// 层上界深度 [m]
    pub upper_depth_m: f64,
    /// 临界应力 [kPa]
    pub sigma_crit_kpa: f64,
}

impl CriticalLayer {
    const fn new(upper_depth_m: f64, sigma_crit_kpa: f64) -> Self {
        Self {
            upper_depth_m,
            sigma_crit_kpa,
        }
    }
}

const SANDY_LOAM: [CriticalLayer; 4] = [
    CriticalLayer::new(0.30, 85.0),
    CriticalLayer::new(1.00, 120.0),
    CriticalLayer::new(2.00, 160.0),
    CriticalLayer::new(5.00, 210.0),
];

const CLAYEY: [CriticalLayer; 4] = [
    CriticalLayer::new(0.30, 110.0),
    CriticalLayer::new(1.00, 155.0),
    CriticalLayer::new(2.00, 210.0),
    CriticalLayer::new(5.00, 280.0),
];

const LATERITIC: [CriticalLayer; 4] = [
    CriticalLayer::new(0.30, 130.0),
    CriticalLayer::new(1.00, 190.0),
    CriticalLayer::new(2.00, 260.0),
    CriticalLayer::new(5.00, 340.0),
];

const WET_WEAK: [CriticalLayer; 4] = [
    CriticalLayer::new(0.30, 70.0),
    CriticalLayer::new(1.00, 95.0),
    CriticalLayer::new(2.00, 130.0),
    CriticalLayer::new(5.00, 180.0),
];

/// 内置分层剖面；`linear` 与 `custom` 没有内置表
pub fn builtin_layers(profile: SoilProfile) -> Option<&'static [CriticalLayer]> {
    match profile {
        SoilProfile::SandyLoam => Some(&SANDY_LOAM),
        SoilProfile::Clayey => Some(&CLAYEY),
        SoilProfile::Lateritic => Some(&LATERITIC),
        SoilProfile::WetWeak => Some(&WET_WEAK),
        SoilProfile::Linear | SoilProfile::Custom => None,
    }
}

fn extend_to_depth(mut layers: Vec<CriticalLayer>, depth_m: f64) -> Vec<CriticalLayer> {
    if let Some(&last) = layers.last() {
        if last.upper_depth_m < depth_m {
            layers.push(CriticalLayer::new(depth_m, last.sigma_crit_kpa));
        }
    }
    layers
}

/// 解析 `"z1:kPa1,z2:kPa2,..."`
///
/// 深度必须严格递增且为正，临界应力必须为正；结果补齐到 `depth_m`。
pub fn parse_layer_spec(spec: &str, depth_m: f64) -> PhysicsResult<Vec<CriticalLayer>> {
    let tokens: Vec<&str> = spec
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(PhysicsError::layer_spec("分层描述为空"));
    }

    let mut layers = Vec::with_capacity(tokens.len() + 1);
    let mut last_depth = 0.0;
    for token in tokens {
        let (z_txt, kpa_txt) = token
            .split_once(':')
            .ok_or_else(|| PhysicsError::layer_spec(format!("'{}' 格式应为 深度:kPa", token)))?;
        let z = parse_number(z_txt, token)?;
        let kpa = parse_number(kpa_txt, token)?;
        if !(z > last_depth) {
            return Err(PhysicsError::layer_spec(format!(
                "深度必须严格递增: '{}'",
                token
            )));
        }
        if !(kpa > 0.0) {
            return Err(PhysicsError::layer_spec(format!(
                "临界应力必须为正: '{}'",
                token
            )));
        }
        layers.push(CriticalLayer::new(z, kpa));
        last_depth = z;
    }
    Ok(extend_to_depth(layers, depth_m))
}

fn parse_number(text: &str, token: &str) -> PhysicsResult<f64> {
    let v: f64 = text
        .trim()
        .parse()
        .map_err(|_| PhysicsError::layer_spec(format!("无法解析数值: '{}'", token)))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PhysicsError::layer_spec(format!("数值必须有限: '{}'", token)))
    }
}

/// 解析土壤配置对应的分层表；`linear` 返回空表
pub fn resolve_layers(soil: &VolumeSoilConfig, depth_m: f64) -> PhysicsResult<Vec<CriticalLayer>> {
    match soil.soil_profile {
        SoilProfile::Linear => Ok(Vec::new()),
        SoilProfile::Custom => {
            if soil.sigma_crit_layers.trim().is_empty() {
                return Err(PhysicsError::layer_spec("custom 剖面需要提供 sigma_crit_layers"));
            }
            parse_layer_spec(&soil.sigma_crit_layers, depth_m)
        }
        profile => {
            let table = builtin_layers(profile).unwrap_or_default();
            Ok(extend_to_depth(table.to_vec(), depth_m))
        }
    }
}

/// 分层查表 [kPa]
pub fn layered_lookup(layers: &[CriticalLayer], z: f64) -> f64 {
    if layers.is_empty() {
        return 0.0;
    }
    let idx = layers
        .partition_point(|layer| layer.upper_depth_m < z)
        .min(layers.len() - 1);
    layers[idx].sigma_crit_kpa
}

/// 随结果导出的临界应力表
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriticalStressTable {
    /// 线性剖面：每个深度层一行
    PerDepth {
        /// `(深度 [m], σc [kPa])`
        rows: Vec<(f64, f64)>,
    },
    /// 分层剖面：每层一行
    Layers {
        /// 剖面来源
        profile: SoilProfile,
        /// 分层表
        layers: Vec<CriticalLayer>,
    },
}

impl CriticalStressTable {
    /// 剖面来源名称
    pub fn source_name(&self) -> &'static str {
        match self {
            CriticalStressTable::PerDepth { .. } => SoilProfile::Linear.name(),
            CriticalStressTable::Layers { profile, .. } => profile.name(),
        }
    }
}

/// 静态临界应力剖面
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCriticalStress {
    sigma_pa: Vec<f64>,
    table: CriticalStressTable,
}

impl StaticCriticalStress {
    /// 线性剖面 `(σ₀ + g·z)` [kPa]
    pub fn linear(depths: &[f64], surface_kpa: f64, gradient_kpa_m: f64) -> Self {
        let rows: Vec<(f64, f64)> = depths
            .iter()
            .map(|&z| (z, surface_kpa + gradient_kpa_m * z))
            .collect();
        Self {
            sigma_pa: rows.iter().map(|&(_, kpa)| kpa * 1000.0).collect(),
            table: CriticalStressTable::PerDepth { rows },
        }
    }

    /// 分层剖面
    pub fn layered(depths: &[f64], profile: SoilProfile, layers: Vec<CriticalLayer>) -> Self {
        Self {
            sigma_pa: depths
                .iter()
                .map(|&z| layered_lookup(&layers, z) * 1000.0)
                .collect(),
            table: CriticalStressTable::Layers { profile, layers },
        }
    }

    /// 按土壤配置构造
    pub fn from_soil(soil: &VolumeSoilConfig, depths: &[f64], depth_m: f64) -> PhysicsResult<Self> {
        if soil.soil_profile == SoilProfile::Linear {
            return Ok(Self::linear(
                depths,
                soil.sigma_crit_surface_kpa,
                soil.sigma_crit_gradient_kpa_m,
            ));
        }
        let layers = resolve_layers(soil, depth_m)?;
        Ok(Self::layered(depths, soil.soil_profile, layers))
    }

    /// 导出表
    pub fn table(&self) -> &CriticalStressTable {
        &self.table
    }
}

impl CriticalStress for StaticCriticalStress {
    fn name(&self) -> &'static str {
        "static"
    }

    fn profile_pa(&self) -> &[f64] {
        &self.sigma_pa
    }
}
