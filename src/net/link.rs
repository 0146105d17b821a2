//! 链路类型
//!
//! 无向、无权重的链路，只记录所属层级；状态只有“存在/已失效”。

use serde::{Deserialize, Serialize};

use super::id::{LinkId, NodeId};

/// 链路所属层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkLayer {
    EdgeHost,
    AggEdge,
    AggCore,
}

/// 网络链路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub id: LinkId,
    pub a: NodeId,
    pub b: NodeId,
    pub layer: LinkLayer,
}

impl Link {
    /// 创建新链路
    pub fn new(id: LinkId, a: NodeId, b: NodeId, layer: LinkLayer) -> Self {
        Self { id, a, b, layer }
    }
}

/// 端点对（小的在前），用于无向去重
pub(crate) fn normalize(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}
