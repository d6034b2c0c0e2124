// crates/tc_io/src/import/mod.rs

//! 外部数据导入

pub mod route_csv;

pub use route_csv::{load_route_csv, parse_route_csv, route_source, RouteCsvOptions};
