//! 最短跳数（BFS）
//!
//! 链路无权重，单源 BFS 即可得到到所有节点的最短跳数。

use std::collections::VecDeque;

use super::id::NodeId;
use super::network::Network;

const UNREACHABLE: u32 = u32::MAX;

/// 从一个源节点出发到所有节点的最短跳数
#[derive(Debug, Clone)]
pub struct HopDistances {
    source: NodeId,
    dist: Vec<u32>,
}

impl HopDistances {
    /// 在当前（可能不连通的）拓扑上做一次 BFS
    pub fn from_source(net: &Network, source: NodeId) -> Self {
        let mut dist = vec![UNREACHABLE; net.node_count()];
        let mut q = VecDeque::new();

        dist[source.0] = 0;
        q.push_back(source);

        while let Some(v) = q.pop_front() {
            let dv = dist[v.0];
            for nbr in net.neighbors(v) {
                if dist[nbr.0] == UNREACHABLE {
                    dist[nbr.0] = dv + 1;
                    q.push_back(nbr);
                }
            }
        }

        Self { source, dist }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// 到 `dst` 的跳数；不可达为 `None`
    pub fn get(&self, dst: NodeId) -> Option<u32> {
        match self.dist.get(dst.0) {
            Some(&d) if d != UNREACHABLE => Some(d),
            _ => None,
        }
    }

    /// 可达节点数（含源节点自身）
    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }
}
