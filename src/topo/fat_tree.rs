//! Fat-tree 拓扑构建
//!
//! k 端口 fat-tree：`(k/2)^2` 台 core，`k` 个 pod，每个 pod `k/2` 台 aggregation
//! 和 `k/2` 台 edge，每台 edge 下挂 `k/2` 台主机。
//!
//! 第 i 台 aggregation 交换机（pod 内从 0 计数）连接全局下标位于
//! `[i*k/2, (i+1)*k/2)` 的 core 交换机（striping）。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FatTreeError;
use crate::net::{LinkLayer, Network, NodeId, NodeKey, NodeKind};

/// 由 k 推导出的结构参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatTreeParams {
    pub k: usize,
    pub k_half: usize,
    pub num_pods: usize,
    pub num_core_switches: usize,
    pub total_hosts: usize,
}

impl FatTreeParams {
    pub fn new(k: usize) -> Result<Self, FatTreeError> {
        if k < 2 || k % 2 != 0 {
            return Err(FatTreeError::InvalidParameter { k });
        }
        let k_half = k / 2;
        let total_hosts = k
            .checked_mul(k_half)
            .and_then(|v| v.checked_mul(k_half))
            .ok_or(FatTreeError::InvalidParameter { k })?;
        Ok(Self {
            k,
            k_half,
            num_pods: k,
            num_core_switches: k_half * k_half,
            total_hosts,
        })
    }

    /// 每层交换机数（edge 与 aggregation 相同）
    pub fn switches_per_tier(&self) -> usize {
        self.num_pods * self.k_half
    }

    /// 总链路数：edge-host、agg-edge、agg-core 三层各 `k^3/4`
    pub fn total_links(&self) -> usize {
        3 * self.total_hosts
    }

    /// 有序主机对总数 `n(n-1)`
    pub fn ordered_host_pairs(&self) -> usize {
        self.total_hosts * self.total_hosts.saturating_sub(1)
    }
}

/// 一个 fat-tree 实例：图本身 + 各层节点的下标表
#[derive(Debug, Clone)]
pub struct FatTree {
    params: FatTreeParams,
    pub net: Network,
    hosts: Vec<NodeId>,
    edge_switches: Vec<NodeId>,
    agg_switches: Vec<NodeId>,
    core_switches: Vec<NodeId>,
}

impl FatTree {
    pub fn params(&self) -> &FatTreeParams {
        &self.params
    }

    pub fn k(&self) -> usize {
        self.params.k
    }

    fn half(&self) -> usize {
        self.params.k_half
    }

    /// 按全局主机编号排列
    pub fn hosts(&self) -> &[NodeId] {
        &self.hosts
    }

    pub fn edge_switches(&self) -> &[NodeId] {
        &self.edge_switches
    }

    pub fn agg_switches(&self) -> &[NodeId] {
        &self.agg_switches
    }

    pub fn core_switches(&self) -> &[NodeId] {
        &self.core_switches
    }

    /// 全局编号为 `index` 的主机
    pub fn host_at(&self, index: usize) -> NodeId {
        self.hosts[index]
    }

    pub fn host(&self, pod: usize, edge: usize, host: usize) -> NodeId {
        let half = self.half();
        let idx = (pod * half + edge) * half + host;
        self.hosts[idx]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + edge;
        self.edge_switches[idx]
    }

    pub fn agg(&self, pod: usize, agg: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + agg;
        self.agg_switches[idx]
    }

    /// 第 `group` 组（对应 pod 内第 `group` 台 aggregation）中的第 `index` 台 core
    pub fn core(&self, group: usize, index: usize) -> NodeId {
        let half = self.half();
        let idx = group * half + index;
        self.core_switches[idx]
    }
}

/// 构建 k 端口 fat-tree
///
/// 纯函数：同一个 k 总是得到同样的节点编号和链路编号。
#[tracing::instrument]
pub fn build_fat_tree(k: usize) -> Result<FatTree, FatTreeError> {
    let params = FatTreeParams::new(k)?;
    let half = params.k_half;
    let mut net = Network::default();

    let mut core_switches = Vec::with_capacity(params.num_core_switches);
    for index in 0..params.num_core_switches {
        core_switches.push(net.add_switch(NodeKey::Core { index }, NodeKind::Core, None));
    }

    let mut hosts = Vec::with_capacity(params.total_hosts);
    let mut edge_switches = Vec::with_capacity(params.switches_per_tier());
    let mut agg_switches = Vec::with_capacity(params.switches_per_tier());

    for pod in 0..params.num_pods {
        for index in 0..half {
            agg_switches.push(net.add_switch(NodeKey::Agg { pod, index }, NodeKind::Agg, Some(pod)));
        }
        for index in 0..half {
            let edge_id = net.add_switch(NodeKey::Edge { pod, index }, NodeKind::Edge, Some(pod));
            edge_switches.push(edge_id);
            for _ in 0..half {
                let host_id = net.add_host(hosts.len(), pod, edge_id);
                net.connect(edge_id, host_id, LinkLayer::EdgeHost)?;
                hosts.push(host_id);
            }
        }
    }

    for pod in 0..params.num_pods {
        let aggs = &agg_switches[pod * half..(pod + 1) * half];
        let edges = &edge_switches[pod * half..(pod + 1) * half];

        for &agg_id in aggs {
            for &edge_id in edges {
                net.connect(agg_id, edge_id, LinkLayer::AggEdge)?;
            }
        }

        // striping
        for (agg_idx, &agg_id) in aggs.iter().enumerate() {
            for &core_id in &core_switches[agg_idx * half..(agg_idx + 1) * half] {
                net.connect(agg_id, core_id, LinkLayer::AggCore)?;
            }
        }
    }

    debug!(
        k,
        hosts = params.total_hosts,
        nodes = net.node_count(),
        links = net.link_count(),
        "🌲 fat-tree 构建完成"
    );

    Ok(FatTree {
        params,
        net,
        hosts,
        edge_switches,
        agg_switches,
        core_switches,
    })
}
