// crates/tc_physics/src/route.rs

//! 路线几何
//!
//! 路线中心线来源（直线 / 正弦 / 外部折线）→ 按弧长等距重采样 →
//! 沿法向偏移 ±轮距/2 得到左右轮迹。
//!
//! 重采样点位于弧长 `k·s`（`k = 0..⌈L/s⌉-1`）处，并补上终点 `L`，
//! 共 `⌈L/s⌉ + 1` 个点。

use serde::Serialize;
use tc_config::{DomainConfig, RouteConfig, RouteMode};
use tc_foundation::interp;

use crate::error::{PhysicsError, PhysicsResult};
use crate::types::MIN_LENGTH;

/// 平面点 `[x, y]` [m]
pub type Point2 = [f64; 2];

/// 重合点判定长度 [m]
const SEGMENT_EPS: f64 = 1e-9;

/// 中心线来源
#[derive(Debug, Clone, PartialEq)]
pub enum RouteSource {
    /// 沿 x 轴的直线 `y = y_offset`
    Straight {
        /// 路线长度 [m]
        length_m: f64,
        /// 横向偏移 [m]
        y_offset_m: f64,
    },
    /// 正弦曲线 `y = y_offset + A·sin(2πx/λ)`
    Sine {
        /// 沿 x 的长度 [m]
        length_m: f64,
        /// 振幅 [m]
        amplitude_m: f64,
        /// 波长 [m]
        wavelength_m: f64,
        /// 横向偏移 [m]
        y_offset_m: f64,
    },
    /// 外部提供的折线（已含偏移）
    Polyline(Vec<Point2>),
}

impl RouteSource {
    /// 由配置构造
    ///
    /// CSV 模式下折线由 IO 层读入后经 `polyline` 传入；缺失时报错。
    pub fn from_config(
        route: &RouteConfig,
        domain: &DomainConfig,
        polyline: Option<Vec<Point2>>,
    ) -> PhysicsResult<Self> {
        match route.mode {
            RouteMode::Straight => Ok(RouteSource::Straight {
                length_m: domain.route_length_m,
                y_offset_m: route.y_offset_m,
            }),
            RouteMode::Sine => Ok(RouteSource::Sine {
                length_m: domain.route_length_m,
                amplitude_m: route.sine_amplitude_m,
                wavelength_m: route.sine_wavelength_m,
                y_offset_m: route.y_offset_m,
            }),
            RouteMode::Csv => match polyline {
                Some(points) => Ok(RouteSource::Polyline(points)),
                None => Err(PhysicsError::route("csv 模式需要提供路线折线")),
            },
        }
    }

    /// 来源名称
    pub fn name(&self) -> &'static str {
        match self {
            RouteSource::Straight { .. } => "straight",
            RouteSource::Sine { .. } => "sine",
            RouteSource::Polyline(_) => "polyline",
        }
    }

    /// 重采样前的原始折线
    fn raw_points(&self, step_m: f64) -> Vec<Point2> {
        match self {
            RouteSource::Straight {
                length_m,
                y_offset_m,
            } => vec![[0.0, *y_offset_m], [*length_m, *y_offset_m]],
            RouteSource::Sine {
                length_m,
                amplitude_m,
                wavelength_m,
                y_offset_m,
            } => stations(*length_m, step_m)
                .into_iter()
                .map(|x| {
                    let phase = 2.0 * std::f64::consts::PI * x / wavelength_m.max(MIN_LENGTH);
                    [x, y_offset_m + amplitude_m * phase.sin()]
                })
                .collect(),
            RouteSource::Polyline(points) => points.clone(),
        }
    }
}

/// `[0, length]` 上步长 `step` 的站点，末点恰为 `length`
fn stations(length: f64, step: f64) -> Vec<f64> {
    let n = (length / step - SEGMENT_EPS).ceil().max(1.0) as usize;
    let mut s: Vec<f64> = (0..n).map(|k| k as f64 * step).collect();
    // 浮点舍入可能让最后一个站点与终点几乎重合
    if s.len() > 1 && length - s[s.len() - 1] < 1e-6 * step {
        s.pop();
    }
    s.push(length);
    s
}

/// 折线总长 [m]
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| segment_length(w[0], w[1])).sum()
}

#[inline]
fn segment_length(a: Point2, b: Point2) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

/// 按弧长等距重采样
///
/// 先剔除与前一点重合的点；剩余不足 2 点或总长为零时报错。
pub fn resample_polyline(points: &[Point2], step_m: f64) -> PhysicsResult<Vec<Point2>> {
    if !(step_m > 0.0) {
        return Err(PhysicsError::route(format!("重采样步长必须为正: {}", step_m)));
    }
    if points.len() < 2 {
        return Err(PhysicsError::route("路线至少需要 2 个点"));
    }
    if points.iter().any(|p| !p[0].is_finite() || !p[1].is_finite()) {
        return Err(PhysicsError::route("路线坐标包含非有限值"));
    }

    let mut unique: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        match unique.last() {
            Some(&last) if segment_length(last, p) <= SEGMENT_EPS => {}
            _ => unique.push(p),
        }
    }
    if unique.len() < 2 {
        return Err(PhysicsError::route("去除重合点后路线不足 2 个点"));
    }

    let mut arc = Vec::with_capacity(unique.len());
    arc.push(0.0);
    for w in unique.windows(2) {
        let last = arc[arc.len() - 1];
        arc.push(last + segment_length(w[0], w[1]));
    }
    let total = arc[arc.len() - 1];
    if total <= SEGMENT_EPS {
        return Err(PhysicsError::route("路线总长为零"));
    }

    let xs: Vec<f64> = unique.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = unique.iter().map(|p| p[1]).collect();
    Ok(stations(total, step_m)
        .into_iter()
        .map(|s| [interp(s, &arc, &xs), interp(s, &arc, &ys)])
        .collect())
}

/// 左右轮迹：沿单位法向 `(-t_y, t_x)` 偏移 ±gauge/2
///
/// 切向取中心差分（端点单侧差分），零长度切向按单位长度处理。
pub fn wheel_tracks(centerline: &[Point2], gauge_m: f64) -> (Vec<Point2>, Vec<Point2>) {
    let n = centerline.len();
    let half = 0.5 * gauge_m;
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    for (i, &[x, y]) in centerline.iter().enumerate() {
        let (tx, ty) = tangent(centerline, i);
        let norm = tx.hypot(ty);
        let norm = if norm > SEGMENT_EPS { norm } else { 1.0 };
        let (nx, ny) = (-ty / norm, tx / norm);
        left.push([x + nx * half, y + ny * half]);
        right.push([x - nx * half, y - ny * half]);
    }
    (left, right)
}

fn tangent(points: &[Point2], i: usize) -> (f64, f64) {
    let n = points.len();
    if n < 2 {
        return (0.0, 0.0);
    }
    let (a, b, scale) = if i == 0 {
        (0, 1, 1.0)
    } else if i == n - 1 {
        (n - 2, n - 1, 1.0)
    } else {
        (i - 1, i + 1, 0.5)
    };
    (
        (points[b][0] - points[a][0]) * scale,
        (points[b][1] - points[a][1]) * scale,
    )
}

/// 重采样后的路线与轮迹
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteGeometry {
    /// 中心线
    pub centerline: Vec<Point2>,
    /// 左轮迹
    pub left_track: Vec<Point2>,
    /// 右轮迹
    pub right_track: Vec<Point2>,
}

impl RouteGeometry {
    /// 由来源构建
    pub fn build(source: &RouteSource, step_m: f64, gauge_m: f64) -> PhysicsResult<Self> {
        let centerline = resample_polyline(&source.raw_points(step_m), step_m)?;
        let (left_track, right_track) = wheel_tracks(&centerline, gauge_m);
        log::debug!(
            "路线 {}: {} 个采样点, 长度 {:.2} m",
            source.name(),
            centerline.len(),
            polyline_length(&centerline)
        );
        Ok(Self {
            centerline,
            left_track,
            right_track,
        })
    }

    /// 所有轮迹点
    pub fn track_points(&self) -> impl Iterator<Item = &Point2> {
        self.left_track.iter().chain(self.right_track.iter())
    }

    /// 中心线外包矩形 `(x_min, x_max, y_min, y_max)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.centerline.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), p| (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1])),
        )
    }
}
