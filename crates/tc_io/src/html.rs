// crates/tc_io/src/html.rs

//! 交互式三维压实体积页面
//!
//! 单文件 HTML，通过 CDN 加载 Plotly，点云与路线折线以 JSON 内嵌。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tc_physics::{Point2, RouteGeometry, SampledPoint};

use crate::error::IoResult;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Serialize)]
struct Payload {
    pts_x: Vec<f64>,
    pts_y: Vec<f64>,
    pts_z: Vec<f64>,
    pts_c: Vec<f64>,
    route_x: Vec<f64>,
    route_y: Vec<f64>,
    left_x: Vec<f64>,
    left_y: Vec<f64>,
    right_x: Vec<f64>,
    right_y: Vec<f64>,
}

fn split_xy(points: &[Point2]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p[0], p[1])).unzip()
}

impl Payload {
    fn new(points: &[SampledPoint], route: &RouteGeometry) -> Self {
        let (route_x, route_y) = split_xy(&route.centerline);
        let (left_x, left_y) = split_xy(&route.left_track);
        let (right_x, right_y) = split_xy(&route.right_track);
        Self {
            pts_x: points.iter().map(|p| p.x).collect(),
            pts_y: points.iter().map(|p| p.y).collect(),
            pts_z: points.iter().map(|p| p.z).collect(),
            pts_c: points.iter().map(|p| p.compaction_index).collect(),
            route_x,
            route_y,
            left_x,
            left_y,
            right_x,
            right_y,
        }
    }
}

const TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>__TITLE__</title>
    <script src="__CDN__"></script>
    <style>
      body { font-family: Arial, sans-serif; margin: 0; background: #f6f6f6; }
      #wrap { padding: 10px 12px 18px; }
      #plot { width: 100%; height: 88vh; background: #fff; border: 1px solid #ddd; }
      .meta { font-size: 13px; color: #444; margin: 0 0 8px; }
    </style>
  </head>
  <body>
    <div id="wrap">
      <p class="meta">Interactive 3-D view of the compacted volume</p>
      <div id="plot"></div>
    </div>
    <script>
      const d = __PAYLOAD__;
      const track = (x, y, color, width, name) => ({
        type: "scatter3d",
        mode: "lines",
        x: x,
        y: y,
        z: new Array(x.length).fill(0),
        line: { color: color, width: width },
        name: name
      });
      const traces = [
        {
          type: "scatter3d",
          mode: "markers",
          x: d.pts_x,
          y: d.pts_y,
          z: d.pts_z,
          marker: {
            size: 2.8,
            color: d.pts_c,
            colorscale: "Inferno",
            opacity: 0.65,
            colorbar: { title: "Compaction index" }
          },
          name: "Compacted volume"
        },
        track(d.route_x, d.route_y, "#111111", 5, "Route centreline"),
        track(d.left_x, d.left_y, "#00bcd4", 4, "Left wheel track"),
        track(d.right_x, d.right_y, "#00bcd4", 4, "Right wheel track")
      ];
      const layout = {
        title: "__TITLE__",
        margin: { l: 0, r: 0, t: 46, b: 0 },
        scene: {
          xaxis: { title: "x (m)" },
          yaxis: { title: "y (m)" },
          zaxis: { title: "Depth (m)", autorange: "reversed" },
          camera: { eye: { x: 1.35, y: -1.45, z: 0.85 } }
        },
        legend: { x: 0.02, y: 0.98 }
      };
      Plotly.newPlot("plot", traces, layout, { responsive: true, displaylogo: false });
    </script>
  </body>
</html>
"##;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 生成页面内容
pub fn render_volume_html(points: &[SampledPoint], route: &RouteGeometry, title: &str) -> IoResult<String> {
    let payload = serde_json::to_string(&Payload::new(points, route))?;
    Ok(TEMPLATE
        .replace("__CDN__", PLOTLY_CDN)
        .replace("__TITLE__", &escape_html(title))
        .replace("__PAYLOAD__", &payload))
}

/// 写出页面
pub fn write_volume_html(
    path: &Path,
    points: &[SampledPoint],
    route: &RouteGeometry,
    title: &str,
) -> IoResult<()> {
    let html = render_volume_html(points, route, title)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(html.as_bytes())?;
    writer.flush()?;
    log::info!("交互式页面: {} ({} 个点)", path.display(), points.len());
    Ok(())
}
