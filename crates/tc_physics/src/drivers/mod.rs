// crates/tc_physics/src/drivers/mod.rs

//! 模拟驱动
//!
//! 两个驱动共享相同的流程：构造时完成全部校验并预计算不随通过变化的量，
//! 之后 [`step`](ColumnSimulation::step) 每调用一次推进一次通过，
//! [`run`](ColumnSimulation::run) 运行到配置的通过次数并返回结果。

pub mod column;
pub mod volume;

pub use column::{ColumnOutcome, ColumnPassRecord, ColumnSimulation};
pub use volume::{VolumeOutcome, VolumePassRecord, VolumeSimulation};

/// 剖面快照的候选通过序号（最后一次通过总会被加入）
pub const SNAPSHOT_PASSES: [u32; 4] = [1, 3, 5, 10];

/// 实际存在的快照通过序号，升序去重
pub fn snapshot_passes(total_passes: u32) -> Vec<u32> {
    let mut passes: Vec<u32> = SNAPSHOT_PASSES
        .iter()
        .copied()
        .chain(std::iter::once(total_passes))
        .filter(|&p| p >= 1 && p <= total_passes)
        .collect();
    passes.sort_unstable();
    passes.dedup();
    passes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_passes() {
        assert_eq!(snapshot_passes(30), vec![1, 3, 5, 10, 30]);
        assert_eq!(snapshot_passes(4), vec![1, 3, 4]);
        assert_eq!(snapshot_passes(1), vec![1]);
        assert_eq!(snapshot_passes(10), vec![1, 3, 5, 10]);
    }
}
