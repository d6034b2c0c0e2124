// crates/tc_physics/src/contact/mod.rs

//! 轮胎-土壤接触
//!
//! - [`load`]: 单轮载荷与平均接地压力
//! - [`sinkage`]: Bekker 压力-沉陷关系（含含水率软化与压实硬化）

pub mod load;
pub mod sinkage;

pub use load::{contact_pressure_pa, wheel_load_n, ContactLoad};
pub use sinkage::BekkerSinkage;
