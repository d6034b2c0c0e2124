// crates/tc_physics/src/sampling.rs

//! 三维压实场的点云抽样（用于交互式可视化）
//!
//! 选取压实指数不低于阈值的单元；一个都没有时阈值降为
//! `min(0.35, max(c))`。点数超过上限时按等间隔抽取。

use serde::Serialize;

use crate::geometry::VolumeGrid;

/// 回退阈值上限
const FALLBACK_THRESHOLD: f64 = 0.35;

/// 抽样点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampledPoint {
    /// x [m]
    pub x: f64,
    /// y [m]
    pub y: f64,
    /// 深度 [m]
    pub z: f64,
    /// 压实指数
    pub compaction_index: f64,
}

/// 按阈值与点数上限抽样
///
/// 点按 `(iz, iy, ix)` 字典序排列。
pub fn sample_compaction_points(
    grid: &VolumeGrid,
    compaction: &[f64],
    threshold: f64,
    max_points: usize,
) -> Vec<SampledPoint> {
    let mut selected = select(compaction, threshold);
    if selected.is_empty() {
        let peak = compaction.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        selected = select(compaction, FALLBACK_THRESHOLD.min(peak));
    }

    let stride = if max_points > 0 && selected.len() > max_points {
        selected.len().div_ceil(max_points)
    } else {
        1
    };

    selected
        .into_iter()
        .step_by(stride)
        .map(|cell| {
            let (iz, iy, ix) = grid.unravel(cell);
            SampledPoint {
                x: grid.x[ix],
                y: grid.y[iy],
                z: grid.z[iz],
                compaction_index: compaction[cell],
            }
        })
        .collect()
}

fn select(compaction: &[f64], threshold: f64) -> Vec<usize> {
    compaction
        .iter()
        .enumerate()
        .filter(|(_, &c)| c >= threshold)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> VolumeGrid {
        VolumeGrid {
            x: vec![0.0, 1.0, 2.0],
            y: vec![-1.0, 1.0],
            z: vec![0.1, 0.3],
        }
    }

    #[test]
    fn test_threshold_selection() {
        let g = grid();
        let mut c = vec![0.1; 12];
        c[4] = 0.6;
        c[11] = 0.5;
        let pts = sample_compaction_points(&g, &c, 0.45, 100);
        assert_eq!(pts.len(), 2);
        assert_eq!((pts[0].x, pts[0].y, pts[0].z), (1.0, 1.0, 0.1));
        assert_eq!((pts[1].x, pts[1].y, pts[1].z), (2.0, 1.0, 0.3));
    }

    #[test]
    fn test_fallback_threshold() {
        let g = grid();
        let mut c = vec![0.05; 12];
        c[7] = 0.2;
        let pts = sample_compaction_points(&g, &c, 0.45, 100);
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].compaction_index, 0.2);
    }

    #[test]
    fn test_decimation() {
        let g = grid();
        let c = vec![0.9; 12];
        let pts = sample_compaction_points(&g, &c, 0.45, 5);
        // stride = ceil(12 / 5) = 3
        assert_eq!(pts.len(), 4);
    }
}
