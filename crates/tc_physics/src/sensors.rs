// crates/tc_physics/src/sensors.rs

//! 虚拟传感器：由压实指数与含水率推算圆锥指数与干密度
//!
//! ```text
//! CI = (0.45 + 0.5·ln(1 + 2.8z)) · (1 + 2.2c) · exp(-1.8Δw)     ≥ 0.1 MPa
//! ρ  = 1.25 + 0.28·(1 - exp(-z/0.7)) + 0.35c - 0.08Δw           ∈ [0.9, 2.1] g/cm³
//! ```

use serde::Serialize;

/// 圆锥指数下限 [MPa]
const MIN_CONE_INDEX_MPA: f64 = 0.1;
/// 干密度范围 [g/cm³]
const DENSITY_RANGE: (f64, f64) = (0.9, 2.1);

/// 一个深度上的传感器读数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    /// 深度 [m]
    pub depth_m: f64,
    /// 压实指数
    pub compaction_index: f64,
    /// 圆锥指数 [MPa]
    pub cone_index_mpa: f64,
    /// 干密度 [g/cm³]
    pub bulk_density_g_cm3: f64,
}

/// 圆锥指数 [MPa]
pub fn cone_index_mpa(depth_m: f64, compaction: f64, moisture_offset: f64) -> f64 {
    let base = 0.45 + 0.50 * (depth_m * 2.8).ln_1p();
    (base * (1.0 + 2.2 * compaction) * (-1.8 * moisture_offset).exp()).max(MIN_CONE_INDEX_MPA)
}

/// 干密度 [g/cm³]
pub fn bulk_density_g_cm3(depth_m: f64, compaction: f64, moisture_offset: f64) -> f64 {
    let base = 1.25 + 0.28 * (1.0 - (-depth_m / 0.7).exp());
    (base + 0.35 * compaction - 0.08 * moisture_offset).clamp(DENSITY_RANGE.0, DENSITY_RANGE.1)
}

/// 整条剖面的虚拟传感器读数
pub fn virtual_sensors(depths: &[f64], compaction: &[f64], moisture_offset: f64) -> Vec<SensorReading> {
    depths
        .iter()
        .zip(compaction)
        .map(|(&z, &c)| SensorReading {
            depth_m: z,
            compaction_index: c,
            cone_index_mpa: cone_index_mpa(z, c, moisture_offset),
            bulk_density_g_cm3: bulk_density_g_cm3(z, c, moisture_offset),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_reading() {
        assert!((cone_index_mpa(0.0, 0.0, 0.0) - 0.45).abs() < 1e-12);
        assert!((bulk_density_g_cm3(0.0, 0.0, 0.0) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_compaction_raises_both() {
        assert!(cone_index_mpa(0.5, 0.6, 0.05) > cone_index_mpa(0.5, 0.1, 0.05));
        assert!(bulk_density_g_cm3(0.5, 0.6, 0.05) > bulk_density_g_cm3(0.5, 0.1, 0.05));
    }

    #[test]
    fn test_clamps() {
        assert_eq!(cone_index_mpa(0.0, 0.0, 10.0), 0.1);
        assert_eq!(bulk_density_g_cm3(5.0, 1.0, -20.0), 2.1);
        assert_eq!(bulk_density_g_cm3(0.0, 0.0, 10.0), 0.9);
    }

    #[test]
    fn test_profile_length() {
        let r = virtual_sensors(&[0.05, 0.15], &[0.3, 0.2], 0.05);
        assert_eq!(r.len(), 2);
        assert_eq!(r[1].depth_m, 0.15);
    }
}
