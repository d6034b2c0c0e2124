// crates/tc_physics/src/drivers/volume.rs

//! 路线三维驱动
//!
//! 路线、网格、荷载图、应力场与临界应力剖面在构造时一次算好，
//! 每次通过只更新压实场。

use serde::Serialize;
use tc_config::VolumeRunConfig;
use tc_foundation::DepthBand;

use crate::accumulator::{CompactionAccumulator, CompactionLaw};
use crate::contact::ContactLoad;
use crate::critical::{CriticalStress, CriticalStressTable, StaticCriticalStress};
use crate::error::PhysicsResult;
use crate::geometry::{SoilGeometry, VolumeGrid};
use crate::route::{RouteGeometry, RouteSource};
use crate::sampling::{sample_compaction_points, SampledPoint};
use crate::stress::{build_load_map, FootprintStress, FootprintWidths, LoadMap, StressModel};

/// 初始压实指数 `c₀·exp(-z/λ)`
const INITIAL_COMPACTION: f64 = 0.08;
const INITIAL_COMPACTION_DECAY_M: f64 = 1.3;

/// 一次通过的汇总
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumePassRecord {
    /// 通过序号（从 1 开始）
    pub pass: u32,
    /// 全场最大压实指数
    pub max_compaction_index: f64,
    /// 0–0.30 m 平均压实指数
    pub mean_compaction_0_30cm: f64,
    /// 0.30–1.00 m 平均压实指数
    pub mean_compaction_30_100cm: f64,
}

/// 路线三维模拟结果
#[derive(Debug, Clone, Serialize)]
pub struct VolumeOutcome {
    /// 网格
    pub grid: VolumeGrid,
    /// 最终压实场，`[iz][iy][ix]` 扁平存储
    pub compaction: Vec<f64>,
    /// 归一化荷载图（未乘每轨车轮数）
    pub load_map: LoadMap,
    /// 每次通过的汇总
    pub records: Vec<VolumePassRecord>,
    /// 各深度层临界应力 [Pa]
    pub sigma_crit_pa: Vec<f64>,
    /// 临界应力表
    pub sigma_crit_table: CriticalStressTable,
    /// 路线与轮迹
    pub route: RouteGeometry,
    /// 单轮载荷 [N]
    pub load_n: f64,
    /// 接地压力 [Pa]
    pub pressure_pa: f64,
}

impl VolumeOutcome {
    /// 最后一次通过的汇总
    pub fn last_record(&self) -> Option<&VolumePassRecord> {
        self.records.last()
    }

    /// 点云抽样
    pub fn sample_points(&self, threshold: f64, max_points: usize) -> Vec<SampledPoint> {
        sample_compaction_points(&self.grid, &self.compaction, threshold, max_points)
    }

    /// 过表层最大压实单元的横断面 `[iz][iy]`，返回所在 x 索引与断面值
    pub fn peak_cross_section(&self) -> (usize, Vec<f64>) {
        let surface = &self.compaction[..self.grid.cells_per_level()];
        let peak_cell = surface
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &c)| if c > best.1 { (i, c) } else { best })
            .0;
        let (_, _, ix) = self.grid.unravel(peak_cell);
        let (nz, ny, _) = self.grid.dims();
        let mut section = Vec::with_capacity(nz * ny);
        for iz in 0..nz {
            for iy in 0..ny {
                section.push(self.compaction[self.grid.index(iz, iy, ix)]);
            }
        }
        (ix, section)
    }
}

/// 路线三维模拟
pub struct VolumeSimulation {
    passes: u32,
    grid: VolumeGrid,
    route: RouteGeometry,
    contact: ContactLoad,
    stress: FootprintStress,
    stress_pa: Vec<f64>,
    critical: StaticCriticalStress,
    accumulator: CompactionAccumulator,
    compaction: Vec<f64>,
    records: Vec<VolumePassRecord>,
}

impl VolumeSimulation {
    /// 校验配置、构建路线与网格并初始化
    ///
    /// `source` 通常由 [`RouteSource::from_config`] 得到。
    pub fn new(config: &VolumeRunConfig, source: &RouteSource) -> PhysicsResult<Self> {
        config.validate()?;
        let traffic = &config.traffic;
        let route = RouteGeometry::build(source, traffic.step_along_route_m, traffic.track_gauge_m)?;
        let grid = VolumeGrid::around_route(&route, &config.domain)?;

        let contact = ContactLoad::new(&config.machine, config.wheel_load_kg);
        let load_map = build_load_map(
            &grid.x,
            &grid.y,
            route.track_points(),
            FootprintWidths::from_machine(&config.machine),
        );
        if load_map.peak() <= 0.0 {
            log::warn!("荷载图全为零：轮迹未覆盖网格");
        }
        let stress = FootprintStress::new(
            contact.pressure_pa,
            config.soil.depth_stress_decay_m,
            config.machine.wheels,
            load_map,
        );
        let stress_pa = stress.stress_field(&grid)?;
        let critical = StaticCriticalStress::from_soil(&config.soil, &grid.z, config.domain.depth_m)?;
        let accumulator = CompactionAccumulator::new(CompactionLaw::volume(&config.soil));

        let mut compaction =
            grid.level_field(|z| INITIAL_COMPACTION * (-z / INITIAL_COMPACTION_DECAY_M).exp());
        accumulator.clamp_initial(&mut compaction);

        let (nz, ny, nx) = grid.dims();
        log::info!(
            "路线三维: 网格 {}×{}×{} ({} 单元), 路线 {} 点, 应力模型 {}, 临界应力 {} ({})",
            nx,
            ny,
            nz,
            grid.n_cells(),
            route.centerline.len(),
            stress.name(),
            critical.name(),
            critical.table().source_name()
        );

        Ok(Self {
            passes: traffic.passes,
            grid,
            route,
            contact,
            stress,
            stress_pa,
            critical,
            accumulator,
            compaction,
            records: Vec::with_capacity(traffic.passes as usize),
        })
    }

    /// 已完成的通过次数
    pub fn passes_done(&self) -> u32 {
        self.records.len() as u32
    }

    /// 是否已达到配置的通过次数
    pub fn is_finished(&self) -> bool {
        self.passes_done() >= self.passes
    }

    /// 网格
    pub fn grid(&self) -> &VolumeGrid {
        &self.grid
    }

    /// 当前压实场
    pub fn compaction(&self) -> &[f64] {
        &self.compaction
    }

    /// 应力场 [Pa]
    pub fn stress_pa(&self) -> &[f64] {
        &self.stress_pa
    }

    /// 推进一次通过
    pub fn step(&mut self) -> PhysicsResult<VolumePassRecord> {
        let stats = self.accumulator.step(
            &mut self.compaction,
            &self.stress_pa,
            &self.critical,
            &self.grid,
        )?;

        let record = VolumePassRecord {
            pass: self.passes_done() + 1,
            max_compaction_index: self.compaction.iter().copied().fold(0.0, f64::max),
            mean_compaction_0_30cm: self.grid.band_mean(&self.compaction, DepthBand::TOPSOIL),
            mean_compaction_30_100cm: self.grid.band_mean(&self.compaction, DepthBand::SUBSOIL),
        };
        log::debug!(
            "通过 {}: 最大压实 {:.4}, 最大增量 {:.2e}",
            record.pass,
            record.max_compaction_index,
            stats.max_increment
        );
        self.records.push(record);
        Ok(record)
    }

    /// 运行到配置的通过次数
    pub fn run(mut self) -> PhysicsResult<VolumeOutcome> {
        while !self.is_finished() {
            self.step()?;
        }
        if let Some(last) = self.records.last() {
            log::info!(
                "路线三维完成: {} 次通过, 最大压实 {:.4}",
                last.pass,
                last.max_compaction_index
            );
        }
        Ok(VolumeOutcome {
            sigma_crit_pa: self.critical.profile_pa().to_vec(),
            sigma_crit_table: self.critical.table().clone(),
            load_map: self.stress.load_map().clone(),
            grid: self.grid,
            compaction: self.compaction,
            records: self.records,
            route: self.route,
            load_n: self.contact.load_n,
            pressure_pa: self.contact.pressure_pa,
        })
    }
}

/// 运行路线三维模拟
pub fn simulate_volume(config: &VolumeRunConfig, source: &RouteSource) -> PhysicsResult<VolumeOutcome> {
    VolumeSimulation::new(config, source)?.run()
}
