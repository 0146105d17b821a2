//! 最短路径统计
//!
//! 对一组固定的主机对计算平均最短跳数与可达率。不可达是正常结果，
//! 只计入可达率，不参与平均跳数。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::net::{HopDistances, Network, NodeId};

/// 一次分析的结果
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathStats {
    /// 检查的主机对数
    pub checked: usize,
    /// 仍然连通的主机对数
    pub reachable: usize,
    /// 可达主机对的跳数之和
    pub total_hops: u64,
    /// 可达主机对的平均跳数；没有可达对时为 0
    pub avg_path_len: f64,
    /// `100 * reachable / checked`；输入为空时为 0
    pub reachability_pct: f64,
}

/// 两点之间的最短跳数，`None` 表示不连通
pub fn shortest_path_len(net: &Network, src: NodeId, dst: NodeId) -> Option<u32> {
    HopDistances::from_source(net, src).get(dst)
}

/// 在当前拓扑上统计 `pairs` 的平均最短跳数和可达率
///
/// 同一源节点的 BFS 结果在本次调用内复用。
#[tracing::instrument(skip_all, fields(pairs = pairs.len()))]
pub fn analyze(net: &Network, pairs: &[(NodeId, NodeId)]) -> PathStats {
    let checked = pairs.len();
    if checked == 0 {
        return PathStats::default();
    }

    let mut cache: HashMap<NodeId, HopDistances> = HashMap::new();
    let mut reachable = 0usize;
    let mut total_hops = 0u64;

    for &(src, dst) in pairs {
        let dist = cache
            .entry(src)
            .or_insert_with(|| HopDistances::from_source(net, src));
        match dist.get(dst) {
            Some(hops) => {
                reachable += 1;
                total_hops += u64::from(hops);
            }
            None => trace!(src = ?src, dst = ?dst, "no path"),
        }
    }

    if reachable == 0 {
        return PathStats {
            checked,
            ..PathStats::default()
        };
    }

    PathStats {
        checked,
        reachable,
        total_hops,
        avg_path_len: total_hops as f64 / reachable as f64,
        reachability_pct: reachable as f64 / checked as f64 * 100.0,
    }
}
