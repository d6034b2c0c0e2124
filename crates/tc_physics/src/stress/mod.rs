// crates/tc_physics/src/stress/mod.rs

//! 竖向应力传播
//!
//! 应力场可分离为 `σ(cell) = p · D(z) · L(k)`：
//! `D` 为深度衰减核，`L` 为层内横向分布（单点土柱恒为 1）。
//! - [`AxisymmetricStress`]: 等效圆形荷载中心线下的弹性解
//! - [`FootprintStress`]: 指数深度衰减 × 轮迹荷载图

pub mod axisymmetric;
pub mod footprint;

pub use axisymmetric::AxisymmetricStress;
pub use footprint::{build_load_map, FootprintStress, FootprintWidths, LoadMap};

use tc_foundation::{TcError, TcResult};

use crate::geometry::SoilGeometry;

/// 应力传播模型
pub trait StressModel: Send + Sync {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 接地压力 [Pa]
    fn pressure_pa(&self) -> f64;

    /// 深度衰减核 D(z)
    fn depth_factor(&self, z: f64) -> f64;

    /// 层内横向分布 L(k)
    fn lateral_factor(&self, _cell_in_level: usize) -> f64 {
        1.0
    }

    /// 横向分布要求的层内单元数（`None` 表示不限）
    fn lateral_cells(&self) -> Option<usize> {
        None
    }

    /// 计算整个场的竖向应力 [Pa]
    fn stress_field(&self, geometry: &dyn SoilGeometry) -> TcResult<Vec<f64>> {
        let per_level = geometry.cells_per_level();
        if let Some(n) = self.lateral_cells() {
            TcError::check_size("load_map", per_level, n)?;
        }
        let p = self.pressure_pa();
        let mut field = Vec::with_capacity(geometry.n_cells());
        for &z in geometry.depths() {
            let d = p * self.depth_factor(z);
            field.extend((0..per_level).map(|k| d * self.lateral_factor(k)));
        }
        Ok(field)
    }
}
