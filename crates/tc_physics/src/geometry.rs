// crates/tc_physics/src/geometry.rs

//! 土体离散几何
//!
//! 场量统一存储为扁平数组，按深度层优先排列：
//! 单元 `i` 所在的深度层为 `i / cells_per_level`。
//! - [`ColumnGeometry`]: 单点土柱，每层 1 个单元
//! - [`VolumeGrid`]: 路线三维网格，每层 `ny × nx` 个单元（行优先 `[iy][ix]`）

use serde::Serialize;
use tc_config::{ColumnConfig, DomainConfig};
use tc_foundation::{arange, cell_centers, DepthBand, TcResult};

use crate::route::RouteGeometry;

/// 分层离散几何
pub trait SoilGeometry: Sync {
    /// 各深度层中心深度 [m]
    fn depths(&self) -> &[f64];

    /// 每个深度层内的单元数
    fn cells_per_level(&self) -> usize;

    /// 单元总数
    fn n_cells(&self) -> usize {
        self.depths().len() * self.cells_per_level()
    }

    /// 单元所在深度层
    #[inline]
    fn level_of(&self, cell: usize) -> usize {
        cell / self.cells_per_level().max(1)
    }

    /// 深度区间内全部单元的平均值
    ///
    /// 区间内没有深度层时取离区间中心最近的一层。
    fn band_mean(&self, field: &[f64], band: DepthBand) -> f64 {
        let per_level = self.cells_per_level();
        let (sum, count) = band
            .indices(self.depths())
            .into_iter()
            .flat_map(|iz| &field[iz * per_level..(iz + 1) * per_level])
            .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// 按深度层生成初始场
    fn level_field(&self, f: impl Fn(f64) -> f64) -> Vec<f64>
    where
        Self: Sized,
    {
        let per_level = self.cells_per_level();
        let mut field = Vec::with_capacity(self.n_cells());
        for &z in self.depths() {
            let v = f(z);
            field.extend(std::iter::repeat(v).take(per_level));
        }
        field
    }
}

/// 单点土柱
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnGeometry {
    depths: Vec<f64>,
}

impl ColumnGeometry {
    /// 由深度与层厚构造
    pub fn new(depth_m: f64, dz_m: f64) -> TcResult<Self> {
        Ok(Self {
            depths: cell_centers(depth_m, dz_m)?,
        })
    }

    /// 由配置构造
    pub fn from_config(column: &ColumnConfig) -> TcResult<Self> {
        Self::new(column.depth_m, column.dz_m)
    }
}

impl SoilGeometry for ColumnGeometry {
    fn depths(&self) -> &[f64] {
        &self.depths
    }

    fn cells_per_level(&self) -> usize {
        1
    }
}

/// 路线三维规则网格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeGrid {
    /// x 坐标 [m]
    pub x: Vec<f64>,
    /// y 坐标 [m]
    pub y: Vec<f64>,
    /// 深度层中心 [m]
    pub z: Vec<f64>,
}

impl VolumeGrid {
    /// 覆盖中心线外包矩形（四周各扩展半个域宽）的网格
    pub fn around_route(route: &RouteGeometry, domain: &DomainConfig) -> TcResult<Self> {
        let half = 0.5 * domain.domain_width_m;
        let (x0, x1, y0, y1) = route.bounds();
        Ok(Self {
            x: arange(x0 - half, x1 + half + 0.5 * domain.dx_m, domain.dx_m),
            y: arange(y0 - half, y1 + half + 0.5 * domain.dy_m, domain.dy_m),
            z: cell_centers(domain.depth_m, domain.dz_m)?,
        })
    }

    /// 网格维度 `(nz, ny, nx)`
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.z.len(), self.y.len(), self.x.len())
    }

    /// 扁平索引
    #[inline]
    pub fn index(&self, iz: usize, iy: usize, ix: usize) -> usize {
        (iz * self.y.len() + iy) * self.x.len() + ix
    }

    /// 扁平索引对应的 `(iz, iy, ix)`
    #[inline]
    pub fn unravel(&self, cell: usize) -> (usize, usize, usize) {
        let nx = self.x.len();
        let per_level = self.cells_per_level();
        (cell / per_level, (cell % per_level) / nx, cell % nx)
    }
}

impl SoilGeometry for VolumeGrid {
    fn depths(&self) -> &[f64] {
        &self.z
    }

    fn cells_per_level(&self) -> usize {
        self.x.len() * self.y.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteGeometry, RouteSource};

    #[test]
    fn test_column_layers() {
        let g = ColumnGeometry::new(10.0, 0.1).unwrap();
        assert_eq!(g.depths().len(), 100);
        assert!((g.depths()[0] - 0.05).abs() < 1e-12);
        assert_eq!(g.n_cells(), 100);
    }

    #[test]
    fn test_column_rejects_thick_layer() {
        assert!(ColumnGeometry::new(0.5, 1.0).is_err());
    }

    #[test]
    fn test_grid_around_straight_route() {
        let domain = DomainConfig::default();
        let source = RouteSource::Straight {
            length_m: 80.0,
            y_offset_m: 0.0,
        };
        let route = RouteGeometry::build(&source, 0.5, 2.2).unwrap();
        let grid = VolumeGrid::around_route(&route, &domain).unwrap();
        let (nz, ny, nx) = grid.dims();
        assert_eq!(nz, 25);
        assert_eq!(ny, 33);
        assert_eq!(nx, 89);
        assert!((grid.x[0] + 4.0).abs() < 1e-12);
        assert!((grid.y[0] + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_index_round_trip() {
        let grid = VolumeGrid {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0],
            z: vec![0.1, 0.3],
        };
        let i = grid.index(1, 1, 2);
        assert_eq!(i, 11);
        assert_eq!(grid.unravel(i), (1, 1, 2));
        assert_eq!(grid.level_of(i), 1);
    }

    #[test]
    fn test_band_mean_with_nearest_fallback() {
        let g = ColumnGeometry::new(2.0, 0.5).unwrap();
        // 深度 0.25, 0.75, 1.25, 1.75
        let field = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(g.band_mean(&field, DepthBand::TOPSOIL), 1.0);
        assert_eq!(g.band_mean(&field, DepthBand::SUBSOIL), 2.0);

        let coarse = ColumnGeometry::new(4.0, 2.0).unwrap();
        // 深度 1.0, 3.0：表层区间为空，取最近的 1.0
        assert_eq!(coarse.band_mean(&[7.0, 9.0], DepthBand::TOPSOIL), 7.0);
    }

    #[test]
    fn test_level_field() {
        let grid = VolumeGrid {
            x: vec![0.0, 1.0],
            y: vec![0.0],
            z: vec![0.0, 1.0],
        };
        let f = grid.level_field(|z| z + 1.0);
        assert_eq!(f, vec![1.0, 1.0, 2.0, 2.0]);
    }
}
