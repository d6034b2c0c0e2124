// crates/tc_io/src/import/route_csv.rs

//! CSV 路线折线导入
//!
//! - 第一行为表头，逗号分隔，支持带引号的字段
//! - 指定的 x/y 列不存在时回退到 `x`/`y`
//! - x 或 y 为空、无法解析或非有限值的行被丢弃
//! - y 加上横向偏移
//! - 至少需要 2 行有效数据

use std::path::Path;

use tc_config::{RouteConfig, RouteMode, VolumeRunConfig};
use tc_physics::{Point2, RouteSource};

use crate::error::{IoError, IoResult};

/// 回退列名
const FALLBACK_X: &str = "x";
const FALLBACK_Y: &str = "y";

/// CSV 路线读取选项
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCsvOptions {
    /// x 列名
    pub x_column: String,
    /// y 列名
    pub y_column: String,
    /// y 偏移 [m]
    pub y_offset_m: f64,
}

impl Default for RouteCsvOptions {
    fn default() -> Self {
        Self {
            x_column: "x_m".to_string(),
            y_column: "y_m".to_string(),
            y_offset_m: 0.0,
        }
    }
}

impl RouteCsvOptions {
    /// 由路线配置构造
    pub fn from_route(route: &RouteConfig) -> Self {
        Self {
            x_column: route.csv_x_col.clone(),
            y_column: route.csv_y_col.clone(),
            y_offset_m: route.y_offset_m,
        }
    }
}

fn find_column(headers: &csv::StringRecord, wanted: &str, fallback: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h == wanted)
        .or_else(|| headers.iter().position(|h| h == fallback))
}

fn numeric(record: &csv::StringRecord, i: usize) -> Option<f64> {
    record
        .get(i)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// 从字符串解析路线
///
/// `source` 仅用于错误信息。
pub fn parse_route_csv(content: &str, options: &RouteCsvOptions, source: &str) -> IoResult<Vec<Point2>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IoError::parse(source, 1, e.to_string()))?
        .clone();
    if headers.iter().all(str::is_empty) {
        return Err(IoError::parse(source, 1, "缺少表头"));
    }

    let missing = || IoError::MissingColumn {
        file: source.to_string(),
        expected: format!(
            "({},{}) 或 ({},{})",
            options.x_column, options.y_column, FALLBACK_X, FALLBACK_Y
        ),
    };
    let ix = find_column(&headers, &options.x_column, FALLBACK_X).ok_or_else(missing)?;
    let iy = find_column(&headers, &options.y_column, FALLBACK_Y).ok_or_else(missing)?;

    let mut points = Vec::new();
    let mut dropped = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line() as usize);
            IoError::parse(source, line, e.to_string())
        })?;
        match (numeric(&record, ix), numeric(&record, iy)) {
            (Some(x), Some(y)) => points.push([x, y + options.y_offset_m]),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("{}: 丢弃 {} 行无效路线数据", source, dropped);
    }
    if points.len() < 2 {
        return Err(IoError::InsufficientRows {
            file: source.to_string(),
            found: points.len(),
            required: 2,
        });
    }
    Ok(points)
}

/// 从文件读取路线
pub fn load_route_csv(path: &Path, options: &RouteCsvOptions) -> IoResult<Vec<Point2>> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let points = parse_route_csv(&content, options, &path.display().to_string())?;
    log::info!("读取路线 {}: {} 个点", path.display(), points.len());
    Ok(points)
}

/// 按运行配置确定路线来源；csv 模式下读取文件
pub fn route_source(config: &VolumeRunConfig) -> IoResult<RouteSource> {
    let polyline = match (config.route.mode, &config.route.csv_path) {
        (RouteMode::Csv, Some(path)) => Some(load_route_csv(
            path,
            &RouteCsvOptions::from_route(&config.route),
        )?),
        _ => None,
    };
    Ok(RouteSource::from_config(&config.route, &config.domain, polyline)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_columns_with_offset() {
        let csv = "id,x_m,y_m\n1,0.0,0.0\n2,5.0,1.0\n3,10.0,0.5\n";
        let options = RouteCsvOptions {
            y_offset_m: 2.0,
            ..Default::default()
        };
        let pts = parse_route_csv(csv, &options, "mem").unwrap();
        assert_eq!(pts, vec![[0.0, 2.0], [5.0, 3.0], [10.0, 2.5]]);
    }

    #[test]
    fn test_fallback_columns() {
        let csv = "x,y\n0,0\n3,4\n";
        let pts = parse_route_csv(csv, &RouteCsvOptions::default(), "mem").unwrap();
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn test_missing_columns() {
        let csv = "east,north\n0,0\n3,4\n";
        let err = parse_route_csv(csv, &RouteCsvOptions::default(), "mem").unwrap_err();
        assert!(matches!(err, IoError::MissingColumn { .. }));
    }

    #[test]
    fn test_invalid_rows_dropped() {
        let csv = "x_m,y_m\n0,0\n,1\nabc,2\n4,\n8,1\n";
        let pts = parse_route_csv(csv, &RouteCsvOptions::default(), "mem").unwrap();
        assert_eq!(pts, vec![[0.0, 0.0], [8.0, 1.0]]);
    }

    #[test]
    fn test_quoted_field_with_comma() {
        let csv = "label,x_m,y_m\n\"1,5\",0.0,0.0\n\"2,5\",10.0,2.0\n";
        let pts = parse_route_csv(csv, &RouteCsvOptions::default(), "mem").unwrap();
        assert_eq!(pts, vec![[0.0, 0.0], [10.0, 2.0]]);
    }

    #[test]
    fn test_quoted_header_and_padding() {
        let csv = "\"x_m\",\"y_m\"\n 1.0 , 2.0\n3.0,4.0\n";
        let pts = parse_route_csv(csv, &RouteCsvOptions::default(), "mem").unwrap();
        assert_eq!(pts, vec![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_empty_content() {
        let err = parse_route_csv("", &RouteCsvOptions::default(), "mem").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_too_few_rows() {
        let csv = "x_m,y_m\n0,0\n";
        let err = parse_route_csv(csv, &RouteCsvOptions::default(), "mem").unwrap_err();
        assert!(matches!(err, IoError::InsufficientRows { found: 1, .. }));
    }
}
