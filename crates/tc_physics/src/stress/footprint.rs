// crates/tc_physics/src/stress/footprint.rs

//! 轮迹荷载图与指数深度衰减
//!
//! 每个轮迹点在平面上叠加一个各向异性高斯足印：
//! ```text
//! g(x, y) = exp(-½((x-px)/σx)²) · exp(-½((y-py)/σy)²)
//! σx = max(0.10, l/2.2),  σy = max(0.08, b/2.2)
//! ```
//! 叠加后按峰值归一化到 [0, 1]。应力场为
//! `σ = p · exp(-z/λ) · L(x, y) · max(wheels/2, 1)`。

use rayon::prelude::*;
use serde::Serialize;
use tc_config::MachineConfig;

use crate::route::Point2;
use crate::types::{MIN_LENGTH, MIN_LOAD_PEAK};

use super::StressModel;

/// 高斯足印宽度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintWidths {
    /// 沿 x 方向 [m]
    pub sigma_x: f64,
    /// 沿 y 方向 [m]
    pub sigma_y: f64,
}

impl FootprintWidths {
    /// 由轮胎尺寸确定
    pub fn from_machine(machine: &MachineConfig) -> Self {
        Self {
            sigma_x: (machine.contact_length_m / 2.2).max(0.10),
            sigma_y: (machine.tire_width_m / 2.2).max(0.08),
        }
    }
}

/// 归一化平面荷载图，行优先 `[iy][ix]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadMap {
    /// x 方向点数
    pub nx: usize,
    /// y 方向点数
    pub ny: usize,
    /// 归一化值
    pub values: Vec<f64>,
}

impl LoadMap {
    /// 取值
    #[inline]
    pub fn get(&self, iy: usize, ix: usize) -> f64 {
        self.values[iy * self.nx + ix]
    }

    /// 最大值
    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// 叠加所有轮迹点的高斯足印并归一化
///
/// 按行并行，行内对轮迹点顺序求和，结果与线程数无关。
pub fn build_load_map<'a, I>(x: &[f64], y: &[f64], points: I, widths: FootprintWidths) -> LoadMap
where
    I: IntoIterator<Item = &'a Point2>,
{
    let points: Vec<Point2> = points.into_iter().copied().collect();
    let nx = x.len();
    let inv_sx = 1.0 / widths.sigma_x;
    let inv_sy = 1.0 / widths.sigma_y;

    let mut values = vec![0.0; nx * y.len()];
    if nx > 0 {
        values
            .par_chunks_mut(nx)
            .zip(y.par_iter())
            .for_each(|(row, &yy)| {
                for &[px, py] in &points {
                    let dy = (yy - py) * inv_sy;
                    let gy = (-0.5 * dy * dy).exp();
                    for (cell, &xx) in row.iter_mut().zip(x) {
                        let dx = (xx - px) * inv_sx;
                        *cell += (-0.5 * dx * dx).exp() * gy;
                    }
                }
            });
    }

    let peak = values.iter().copied().fold(0.0, f64::max).max(MIN_LOAD_PEAK);
    values.iter_mut().for_each(|v| *v /= peak);
    LoadMap {
        nx,
        ny: y.len(),
        values,
    }
}

/// 路线三维应力模型
#[derive(Debug, Clone)]
pub struct FootprintStress {
    pressure_pa: f64,
    decay_m: f64,
    wheels_per_track: f64,
    load_map: LoadMap,
}

impl FootprintStress {
    /// 构造
    pub fn new(pressure_pa: f64, decay_m: f64, wheels: u32, load_map: LoadMap) -> Self {
        Self {
            pressure_pa,
            decay_m: decay_m.max(MIN_LENGTH),
            wheels_per_track: (f64::from(wheels) / 2.0).max(1.0),
            load_map,
        }
    }

    /// 归一化荷载图
    pub fn load_map(&self) -> &LoadMap {
        &self.load_map
    }

    /// 每条轮迹上的车轮数（荷载放大倍数）
    pub fn wheels_per_track(&self) -> f64 {
        self.wheels_per_track
    }
}

impl StressModel for FootprintStress {
    fn name(&self) -> &'static str {
        "footprint"
    }

    fn pressure_pa(&self) -> f64 {
        self.pressure_pa
    }

    fn depth_factor(&self, z: f64) -> f64 {
        (-z / self.decay_m).exp()
    }

    fn lateral_factor(&self, cell_in_level: usize) -> f64 {
        self.load_map.values[cell_in_level] * self.wheels_per_track
    }

    fn lateral_cells(&self) -> Option<usize> {
        Some(self.load_map.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::VolumeGrid;
    use tc_foundation::arange;

    fn widths() -> FootprintWidths {
        FootprintWidths::from_machine(&MachineConfig::default())
    }

    #[test]
    fn test_widths_floor() {
        let machine = MachineConfig {
            tire_width_m: 0.05,
            contact_length_m: 0.05,
            ..Default::default()
        };
        let w = FootprintWidths::from_machine(&machine);
        assert_eq!(w.sigma_x, 0.10);
        assert_eq!(w.sigma_y, 0.08);
    }

    #[test]
    fn test_load_map_normalized() {
        let x = arange(0.0, 10.0, 0.5);
        let y = arange(-2.0, 2.0, 0.25);
        let pts = vec![[2.0, 1.0], [5.0, 1.0], [5.0, -1.0]];
        let map = build_load_map(&x, &y, &pts, widths());
        assert!((map.peak() - 1.0).abs() < 1e-12);
        assert!(map.values.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_empty_points_stay_zero() {
        let x = arange(0.0, 3.0, 1.0);
        let y = arange(0.0, 2.0, 1.0);
        let map = build_load_map(&x, &y, &Vec::<Point2>::new(), widths());
        assert!(map.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_stress_field_layout() {
        let grid = VolumeGrid {
            x: vec![0.0, 1.0],
            y: vec![0.0],
            z: vec![0.1, 1.1],
        };
        let map = LoadMap {
            nx: 2,
            ny: 1,
            values: vec![1.0, 0.5],
        };
        let model = FootprintStress::new(1000.0, 1.0, 8, map);
        let field = model.stress_field(&grid).unwrap();
        assert_eq!(field.len(), 4);
        assert!((field[0] - 4000.0 * (-0.1f64).exp()).abs() < 1e-9);
        assert!((field[1] - 2000.0 * (-0.1f64).exp()).abs() < 1e-9);
        assert!((field[3] - 2000.0 * (-1.1f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_load_map_size_checked() {
        let grid = VolumeGrid {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0],
            z: vec![0.1],
        };
        let map = LoadMap {
            nx: 2,
            ny: 1,
            values: vec![1.0, 0.5],
        };
        let model = FootprintStress::new(1000.0, 1.0, 8, map);
        assert!(model.stress_field(&grid).is_err());
    }
}
