// crates/tc_physics/src/contact/load.rs

//! 单轮载荷与接地压力
//!
//! ```text
//! W = m_wheel * g          （显式单轮质量优先，否则整机质量 / 车轮数）
//! p = W / max(b * l, A_min)
//! ```

use serde::Serialize;
use tc_config::MachineConfig;

use crate::types::{GRAVITY, MIN_CONTACT_AREA};

/// 单轮竖向载荷 [N]
///
/// `wheel_load_kg` 为 `Some` 时直接使用，否则按整机质量在车轮间均分。
pub fn wheel_load_n(machine: &MachineConfig, wheel_load_kg: Option<f64>) -> f64 {
    let kg = match wheel_load_kg {
        Some(kg) => kg,
        None => machine.mass_kg / f64::from(machine.wheels.max(1)),
    };
    kg * GRAVITY
}

/// 平均接地压力 [Pa]
#[inline]
pub fn contact_pressure_pa(machine: &MachineConfig, load_n: f64) -> f64 {
    load_n / machine.contact_area_m2().max(MIN_CONTACT_AREA)
}

/// 单轮接触荷载汇总，模拟期间保持不变
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContactLoad {
    /// 单轮载荷 [N]
    pub load_n: f64,
    /// 接地面积 [m²]
    pub area_m2: f64,
    /// 平均接地压力 [Pa]
    pub pressure_pa: f64,
}

impl ContactLoad {
    /// 由机械参数计算
    pub fn new(machine: &MachineConfig, wheel_load_kg: Option<f64>) -> Self {
        let load_n = wheel_load_n(machine, wheel_load_kg);
        Self {
            load_n,
            area_m2: machine.contact_area_m2(),
            pressure_pa: contact_pressure_pa(machine, load_n),
        }
    }
}
