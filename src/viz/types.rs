use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FatTreeError;
use crate::net::{Link, LinkLayer, NodeKind};
use crate::topo::fat_tree::FatTree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizNodeInfo {
    pub id: usize,
    pub name: String,
    pub kind: NodeKind,
    /// core 交换机为 -1
    pub pod: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_anchor: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizLinkInfo {
    pub a: usize,
    pub b: usize,
    pub layer: LinkLayer,
    pub failed: bool,
}

/// 某个拓扑实例在一次失效注入后的完整状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub k: usize,
    pub nodes: Vec<VizNodeInfo>,
    /// 全部链路（存活 + 失效），按链路编号排列
    pub links: Vec<VizLinkInfo>,
    pub failed_count: usize,
}

impl TopologySnapshot {
    pub fn capture(topo: &FatTree, failed: &[Link]) -> Self {
        let net = &topo.net;
        let nodes = net
            .nodes()
            .iter()
            .map(|n| VizNodeInfo {
                id: n.id.0,
                name: n.name(),
                kind: n.kind,
                pod: n.pod.map_or(-1, |p| p as i64),
                edge_anchor: n.edge_anchor.map(|e| e.0),
            })
            .collect::<Vec<_>>();
        let links = net
            .links()
            .iter()
            .map(|l| VizLinkInfo {
                a: l.a.0,
                b: l.b.0,
                layer: l.layer,
                failed: !net.is_up(l.id),
            })
            .collect::<Vec<_>>();
        Self {
            k: topo.k(),
            nodes,
            links,
            failed_count: failed.len(),
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), FatTreeError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
