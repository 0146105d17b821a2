//! 节点类型
//!
//! 节点只携带拓扑属性：类别、所属 pod，以及主机所挂的 edge 交换机。

use serde::{Deserialize, Serialize};

use super::id::{NodeId, NodeKey};

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Core,
    Agg,
    Edge,
    Host,
}

/// 网络节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub key: NodeKey,
    pub kind: NodeKind,
    /// core 交换机不属于任何 pod
    pub pod: Option<usize>,
    /// 主机所连接的 edge 交换机（查找关系，不是所有权）
    pub edge_anchor: Option<NodeId>,
}

impl Node {
    /// 创建交换机节点
    pub fn switch(id: NodeId, key: NodeKey, kind: NodeKind, pod: Option<usize>) -> Self {
        debug_assert!(kind != NodeKind::Host);
        Self {
            id,
            key,
            kind,
            pod,
            edge_anchor: None,
        }
    }

    /// 创建主机节点
    pub fn host(id: NodeId, index: usize, pod: usize, edge: NodeId) -> Self {
        Self {
            id,
            key: NodeKey::Host { index },
            kind: NodeKind::Host,
            pod: Some(pod),
            edge_anchor: Some(edge),
        }
    }

    /// 可读名称，例如 `A_0_1`
    pub fn name(&self) -> String {
        self.key.to_string()
    }

    pub fn is_host(&self) -> bool {
        self.kind == NodeKind::Host
    }
}
