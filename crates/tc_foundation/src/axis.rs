// crates/tc_foundation/src/axis.rs

//! 一维坐标轴工具
//!
//! 规则网格的坐标轴生成与查询：
//! - [`arange`]: 半开区间 `[start, stop)` 上的等步长采样
//! - [`cell_centers`]: 厚度为 `step` 的分层中心深度
//! - [`interp`]: 单调横坐标上的分段线性插值（端点外取端值）
//! - [`nearest_index`]: 最近坐标索引

use serde::{Deserialize, Serialize};

use crate::error::{TcError, TcResult};

/// 浮点步数计算的容差，防止 `10.0 / 0.1` 之类的舍入多出一个点
const STEP_EPS: f64 = 1e-9;

/// 半开区间 `[start, stop)` 上的等步长坐标
///
/// 采样点数为 `ceil((stop - start) / step)`，步长非正时返回空数组。
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(stop > start) {
        return Vec::new();
    }
    let n = ((stop - start) / step - STEP_EPS).ceil().max(0.0) as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// 厚度 `step` 的分层中心：`step/2, 3·step/2, ...`，覆盖 `[0, extent]`
///
/// # 错误
///
/// `step` 非正或大于 `extent` 时返回 [`TcError::OutOfRange`]。
pub fn cell_centers(extent: f64, step: f64) -> TcResult<Vec<f64>> {
    TcError::check_positive("extent", extent)?;
    TcError::check_range("step", step, f64::MIN_POSITIVE, extent)?;
    Ok(arange(0.5 * step, extent + 0.5 * step, step))
}

/// 分段线性插值
///
/// `xp` 必须单调非减；`x` 超出范围时取端点值。
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    match xp.len() {
        0 => return 0.0,
        1 => return fp[0],
        _ => {}
    }
    if x <= xp[0] {
        return fp[0];
    }
    let last = xp.len() - 1;
    if x >= xp[last] {
        return fp[last];
    }
    // 第一个 > x 的点
    let hi = xp.partition_point(|&v| v <= x).clamp(1, last);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    if span <= 0.0 {
        return fp[hi];
    }
    let t = (x - xp[lo]) / span;
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// 距离 `value` 最近的坐标索引（并列时取较小索引）
pub fn nearest_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| {
            let d = (v - value).abs();
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            }
        })
        .map(|(i, _)| i)
}

/// 深度区间描述
///
/// 上界总是闭合；`include_min` 控制下界是否闭合。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthBand {
    /// 区间下界 [m]
    pub z_min: f64,
    /// 区间上界 [m]
    pub z_max: f64,
    /// 下界是否闭合
    pub include_min: bool,
}

impl DepthBand {
    /// 表层 0–0.30 m（含下界）
    pub const TOPSOIL: DepthBand = DepthBand {
        z_min: 0.0,
        z_max: 0.30,
        include_min: true,
    };

    /// 亚表层 0.30–1.00 m（不含下界）
    pub const SUBSOIL: DepthBand = DepthBand {
        z_min: 0.30,
        z_max: 1.0,
        include_min: false,
    };

    /// 深度是否落在区间内
    #[inline]
    pub fn contains(&self, z: f64) -> bool {
        let above_min = if self.include_min {
            z >= self.z_min
        } else {
            z > self.z_min
        };
        above_min && z <= self.z_max
    }

    /// 区间中心
    #[inline]
    pub fn center(&self) -> f64 {
        0.5 * (self.z_min + self.z_max)
    }

    /// 落在区间内的深度索引；为空时退化为离中心最近的单个索引
    pub fn indices(&self, depths: &[f64]) -> Vec<usize> {
        let inside: Vec<usize> = depths
            .iter()
            .enumerate()
            .filter(|(_, &z)| self.contains(z))
            .map(|(i, _)| i)
            .collect();
        if !inside.is_empty() {
            return inside;
        }
        nearest_index(depths, self.center()).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arange_excludes_stop() {
        let x = arange(0.0, 1.0, 0.25);
        assert_eq!(x.len(), 4);
        assert!((x[3] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_arange_degenerate() {
        assert!(arange(0.0, 1.0, 0.0).is_empty());
        assert!(arange(1.0, 0.0, 0.1).is_empty());
    }

    #[test]
    fn test_cell_centers_column() {
        let z = cell_centers(10.0, 0.1).unwrap();
        assert_eq!(z.len(), 100);
        assert!((z[0] - 0.05).abs() < 1e-12);
        assert!((z[99] - 9.95).abs() < 1e-9);

        let z = cell_centers(5.0, 0.2).unwrap();
        assert_eq!(z.len(), 25);
    }

    #[test]
    fn test_cell_centers_rejects_step_larger_than_extent() {
        assert!(cell_centers(1.0, 2.0).is_err());
        assert!(cell_centers(1.0, 0.0).is_err());
        assert!(cell_centers(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_interp() {
        let xp = [0.0, 1.0, 3.0];
        let fp = [0.0, 10.0, 30.0];
        assert!((interp(0.5, &xp, &fp) - 5.0).abs() < 1e-12);
        assert!((interp(2.0, &xp, &fp) - 20.0).abs() < 1e-12);
        assert_eq!(interp(-1.0, &xp, &fp), 0.0);
        assert_eq!(interp(5.0, &xp, &fp), 30.0);
        assert_eq!(interp(1.0, &xp, &fp), 10.0);
    }

    #[test]
    fn test_nearest_index() {
        let axis = [0.05, 0.15, 0.25];
        assert_eq!(nearest_index(&axis, 0.16), Some(1));
        assert_eq!(nearest_index(&axis, 9.0), Some(2));
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    #[test]
    fn test_depth_band_fallback_to_nearest() {
        // 粗分层：0.30–1.00 m 区间内没有层中心
        let depths = [0.25, 1.25];
        assert_eq!(DepthBand::SUBSOIL.indices(&depths), vec![0]);
        assert_eq!(DepthBand::TOPSOIL.indices(&depths), vec![0]);
    }

    #[test]
    fn test_depth_band_bounds() {
        assert!(DepthBand::TOPSOIL.contains(0.0));
        assert!(DepthBand::TOPSOIL.contains(0.30));
        assert!(!DepthBand::SUBSOIL.contains(0.30));
        assert!(DepthBand::SUBSOIL.contains(1.0));
    }
}
