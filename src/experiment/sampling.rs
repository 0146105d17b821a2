//! 固定主机对集合的构建
//!
//! 有序主机对 `(i, j), i != j` 按行优先编号：第 `i` 行有 `n-1` 个元素。
//! 随机抽样直接抽编号再解码，不需要物化全部 `n(n-1)` 个主机对。

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FatTreeError;
use crate::fault::sample_indices;
use crate::net::NodeId;
use crate::topo::fat_tree::{FatTree, FatTreeParams};

/// 一对主机（全局主机编号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostPair {
    pub src: usize,
    pub dst: usize,
}

impl HostPair {
    /// 第 `ordinal` 个有序主机对（`n_hosts >= 2`）
    pub fn from_ordinal(n_hosts: usize, ordinal: usize) -> Self {
        let row = n_hosts - 1;
        let src = ordinal / row;
        let r = ordinal % row;
        let dst = if r < src { r } else { r + 1 };
        Self { src, dst }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    Exhaustive,
    Random,
}

/// 整个实验共用的主机对集合，构建后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostPairSample {
    pub mode: SamplingMode,
    pub pairs: Vec<HostPair>,
}

impl HostPairSample {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 映射到某个拓扑实例上的节点
    pub fn resolve(&self, topo: &FatTree) -> Vec<(NodeId, NodeId)> {
        self.pairs
            .iter()
            .map(|p| (topo.host_at(p.src), topo.host_at(p.dst)))
            .collect()
    }
}

/// 构建固定主机对集合
///
/// 主机数不超过 `exhaustive_limit` 时穷举；否则用以 `seed` 初始化的独立随机源
/// 无放回抽取 `min(max_pairs, n(n-1))` 个主机对。
pub fn build_host_pairs(
    params: &FatTreeParams,
    max_pairs: usize,
    seed: u64,
    exhaustive_limit: usize,
) -> Result<HostPairSample, FatTreeError> {
    let n = params.total_hosts;
    let total = params.ordered_host_pairs();

    if n <= exhaustive_limit {
        let pairs = (0..total).map(|ord| HostPair::from_ordinal(n, ord)).collect::<Vec<_>>();
        info!(pairs = pairs.len(), "Sampling: exhaustive check");
        return Ok(HostPairSample {
            mode: SamplingMode::Exhaustive,
            pairs,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let amount = max_pairs.min(total);
    let pairs = sample_indices(&mut rng, total, amount)?
        .into_iter()
        .map(|ord| HostPair::from_ordinal(n, ord))
        .collect::<Vec<_>>();
    info!(pairs = pairs.len(), seed, "Sampling: randomly sampled fixed pairs");

    Ok(HostPairSample {
        mode: SamplingMode::Random,
        pairs,
    })
}
