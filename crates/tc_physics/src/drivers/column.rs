// crates/tc_physics/src/drivers/column.rs

//! 单点土柱驱动
//!
//! 每次通过：
//! 1. 以当前表层压实指数计算 Bekker 平衡沉陷，车辙向目标值指数趋近
//! 2. 以通过前的临界应力剖面更新压实指数
//! 3. 以更新后的压实指数硬化临界应力
//! 4. 累加压实功 `W · Δrut · wheels`

use serde::Serialize;
use tc_config::ColumnRunConfig;
use tc_foundation::DepthBand;

use crate::accumulator::{CompactionAccumulator, CompactionLaw};
use crate::contact::{BekkerSinkage, ContactLoad};
use crate::critical::{CriticalStress, HardeningCriticalStress};
use crate::error::PhysicsResult;
use crate::geometry::{ColumnGeometry, SoilGeometry};
use crate::sensors::{virtual_sensors, SensorReading};
use crate::stress::{AxisymmetricStress, StressModel};
use crate::types::MIN_LENGTH;

use super::snapshot_passes;

/// 初始压实指数 `c₀·exp(-z/λ)`
const INITIAL_COMPACTION: f64 = 0.12;
const INITIAL_COMPACTION_DECAY_M: f64 = 1.2;

/// 一次通过的记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnPassRecord {
    /// 通过序号（从 1 开始）
    pub pass: u32,
    /// 累计车辙深度 [mm]
    pub rut_depth_mm: f64,
    /// 本次车辙增量 [mm]
    pub rut_increment_mm: f64,
    /// 表层压实指数
    pub surface_compaction_index: f64,
    /// 0–30 cm 平均压实指数
    pub avg_compaction_0_30cm: f64,
    /// 30–100 cm 平均压实指数
    pub avg_compaction_30_100cm: f64,
    /// 压实阻力 [kN]
    pub compaction_resistance_kn: f64,
    /// 累计压实功 [kJ]
    pub cumulative_compaction_energy_kj: f64,
}

/// 单点土柱模拟结果
#[derive(Debug, Clone, Serialize)]
pub struct ColumnOutcome {
    /// 各层中心深度 [m]
    pub depths: Vec<f64>,
    /// 每次通过的记录
    pub records: Vec<ColumnPassRecord>,
    /// 每次通过后的压实剖面
    pub history: Vec<Vec<f64>>,
    /// 最终压实剖面
    pub final_compaction: Vec<f64>,
    /// 最终临界应力剖面 [Pa]
    pub final_sigma_crit_pa: Vec<f64>,
    /// 最终虚拟传感器读数
    pub sensors: Vec<SensorReading>,
    /// 单轮载荷 [N]
    pub load_n: f64,
    /// 接地压力 [Pa]
    pub pressure_pa: f64,
}

impl ColumnOutcome {
    /// 最后一次通过的记录
    pub fn last_record(&self) -> Option<&ColumnPassRecord> {
        self.records.last()
    }

    /// 快照剖面 `(通过序号, 剖面)`
    pub fn snapshots(&self) -> Vec<(u32, &[f64])> {
        snapshot_passes(self.records.len() as u32)
            .into_iter()
            .filter_map(|p| self.history.get(p as usize - 1).map(|h| (p, h.as_slice())))
            .collect()
    }
}

/// 单点土柱模拟
pub struct ColumnSimulation {
    config: ColumnRunConfig,
    geometry: ColumnGeometry,
    contact: ContactLoad,
    sinkage: BekkerSinkage,
    stress_pa: Vec<f64>,
    critical: HardeningCriticalStress,
    accumulator: CompactionAccumulator,
    compaction: Vec<f64>,
    rut_depth_m: f64,
    energy_j: f64,
    records: Vec<ColumnPassRecord>,
    history: Vec<Vec<f64>>,
}

impl ColumnSimulation {
    /// 校验配置并初始化
    pub fn new(config: &ColumnRunConfig) -> PhysicsResult<Self> {
        config.validate()?;
        let geometry = ColumnGeometry::from_config(&config.column)?;
        let contact = ContactLoad::new(&config.machine, config.wheel_load_kg);
        let stress = AxisymmetricStress::new(contact.pressure_pa, contact.area_m2);
        let stress_pa = stress.stress_field(&geometry)?;
        let critical = HardeningCriticalStress::new(geometry.depths(), config.soil.precon_hardening);
        let accumulator = CompactionAccumulator::new(CompactionLaw::column(&config.soil));

        let mut compaction = geometry
            .level_field(|z| INITIAL_COMPACTION * (-z / INITIAL_COMPACTION_DECAY_M).exp());
        accumulator.clamp_initial(&mut compaction);

        log::info!(
            "单点土柱: {} 层, 单轮载荷 {:.1} kN, 接地压力 {:.1} kPa",
            geometry.depths().len(),
            contact.load_n / 1000.0,
            contact.pressure_pa / 1000.0
        );
        log::debug!(
            "应力模型 {} (等效半径 {:.3} m), 临界应力 {}",
            stress.name(),
            stress.radius_m(),
            critical.name()
        );

        Ok(Self {
            sinkage: BekkerSinkage::from_soil(&config.soil),
            config: config.clone(),
            geometry,
            contact,
            stress_pa,
            critical,
            accumulator,
            compaction,
            rut_depth_m: 0.0,
            energy_j: 0.0,
            records: Vec::with_capacity(config.column.passes as usize),
            history: Vec::with_capacity(config.column.passes as usize),
        })
    }

    /// 已完成的通过次数
    pub fn passes_done(&self) -> u32 {
        self.records.len() as u32
    }

    /// 是否已达到配置的通过次数
    pub fn is_finished(&self) -> bool {
        self.passes_done() >= self.config.column.passes
    }

    /// 当前压实剖面
    pub fn compaction(&self) -> &[f64] {
        &self.compaction
    }

    /// 当前临界应力剖面 [Pa]
    pub fn sigma_crit_pa(&self) -> &[f64] {
        self.critical.profile_pa()
    }

    /// 各层中心深度
    pub fn depths(&self) -> &[f64] {
        self.geometry.depths()
    }

    /// 推进一次通过
    pub fn step(&mut self) -> PhysicsResult<ColumnPassRecord> {
        let machine = &self.config.machine;
        let offset = self.config.soil.moisture_offset();
        let surface = self.compaction[0];

        let z_eq = self
            .sinkage
            .sinkage_m(self.contact.pressure_pa, machine.tire_width_m, surface);
        let rut_target = z_eq * (1.15 + 0.25 * offset.max(0.0));
        let growth = (0.35 * (1.0 - 0.45 * surface)).max(0.04);
        let rut_increment = ((rut_target - self.rut_depth_m) * (1.0 - (-growth).exp())).max(0.0);
        self.rut_depth_m += rut_increment;

        let stats = self.accumulator.step(
            &mut self.compaction,
            &self.stress_pa,
            &self.critical,
            &self.geometry,
        )?;
        self.critical.harden(&self.stress_pa, &self.compaction);

        self.energy_j += self.contact.load_n * rut_increment * f64::from(machine.wheels);

        let record = ColumnPassRecord {
            pass: self.passes_done() + 1,
            rut_depth_mm: self.rut_depth_m * 1000.0,
            rut_increment_mm: rut_increment * 1000.0,
            surface_compaction_index: self.compaction[0],
            avg_compaction_0_30cm: self.geometry.band_mean(&self.compaction, DepthBand::TOPSOIL),
            avg_compaction_30_100cm: self.geometry.band_mean(&self.compaction, DepthBand::SUBSOIL),
            compaction_resistance_kn: self.contact.load_n * self.rut_depth_m
                / machine.contact_length_m.max(MIN_LENGTH)
                / 1000.0,
            cumulative_compaction_energy_kj: self.energy_j / 1000.0,
        };
        log::debug!(
            "通过 {}: 车辙 {:.2} mm, 表层压实 {:.4}, 最大增量 {:.2e}",
            record.pass,
            record.rut_depth_mm,
            record.surface_compaction_index,
            stats.max_increment
        );

        self.records.push(record);
        self.history.push(self.compaction.clone());
        Ok(record)
    }

    /// 运行到配置的通过次数
    pub fn run(mut self) -> PhysicsResult<ColumnOutcome> {
        while !self.is_finished() {
            self.step()?;
        }
        if let Some(last) = self.records.last() {
            log::info!(
                "单点土柱完成: {} 次通过, 车辙 {:.2} mm, 表层压实 {:.4}",
                last.pass,
                last.rut_depth_mm,
                last.surface_compaction_index
            );
        }
        let sensors = virtual_sensors(
            self.geometry.depths(),
            &self.compaction,
            self.config.soil.moisture_offset(),
        );
        Ok(ColumnOutcome {
            depths: self.geometry.depths().to_vec(),
            final_sigma_crit_pa: self.critical.profile_pa().to_vec(),
            records: self.records,
            history: self.history,
            final_compaction: self.compaction,
            sensors,
            load_n: self.contact.load_n,
            pressure_pa: self.contact.pressure_pa,
        })
    }
}

/// 运行单点土柱模拟
pub fn simulate_column(config: &ColumnRunConfig) -> PhysicsResult<ColumnOutcome> {
    ColumnSimulation::new(config)?.run()
}
