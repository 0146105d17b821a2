//! 网络拓扑管理
//!
//! 节点表 + 链路表 + 邻接表。链路失效只翻转状态位，节点集合保持不变。

use std::collections::HashMap;

use super::id::{LinkId, NodeId, NodeKey};
use super::link::{normalize, Link, LinkLayer};
use super::node::{Node, NodeKind};
use crate::error::FatTreeError;
use tracing::trace;

/// 网络拓扑（无向图）
#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    up: Vec<bool>,
    adj: Vec<Vec<(NodeId, LinkId)>>,
    edges: HashMap<(NodeId, NodeId), LinkId>,
    live: usize,
}

impl Network {
    /// 添加交换机节点
    pub fn add_switch(&mut self, key: NodeKey, kind: NodeKind, pod: Option<usize>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.push_node(Node::switch(id, key, kind, pod))
    }

    /// 添加主机节点，`edge` 为它挂接的 edge 交换机
    pub fn add_host(&mut self, index: usize, pod: usize, edge: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.push_node(Node::host(id, index, pod, edge))
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        self.adj.push(Vec::new());
        id
    }

    /// 连接两个节点（创建无向链路）
    ///
    /// 自环、重复链路或未知节点都会被拒绝。
    pub fn connect(&mut self, a: NodeId, b: NodeId, layer: LinkLayer) -> Result<LinkId, FatTreeError> {
        let pair = normalize(a, b);
        if a == b || b.0 >= self.nodes.len() || a.0 >= self.nodes.len() || self.edges.contains_key(&pair) {
            return Err(FatTreeError::InvalidLink {
                a: self.describe(a),
                b: self.describe(b),
            });
        }

        let id = LinkId(self.links.len());
        self.links.push(Link::new(id, a, b, layer));
        self.up.push(true);
        self.adj[a.0].push((b, id));
        self.adj[b.0].push((a, id));
        self.edges.insert(pair, id);
        self.live += 1;
        trace!(link = ?id, a = ?a, b = ?b, ?layer, "新增链路");
        Ok(id)
    }

    fn describe(&self, id: NodeId) -> String {
        self.nodes
            .get(id.0)
            .map(Node::name)
            .unwrap_or_else(|| format!("{id:?}"))
    }

    /// 移除一条链路。已经移除过的链路返回 `false`，不报错。
    pub fn remove_link(&mut self, id: LinkId) -> bool {
        match self.up.get_mut(id.0) {
            Some(up) if *up => {
                *up = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 某类节点（按构建顺序）
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// 所有曾经建立的链路（含已失效的）
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_up(&self, id: LinkId) -> bool {
        self.up.get(id.0).copied().unwrap_or(false)
    }

    /// 当前存活的链路，按 `LinkId` 顺序
    pub fn live_links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(|l| self.up[l.id.0])
    }

    /// 存活链路数
    pub fn link_count(&self) -> usize {
        self.live
    }

    /// 两点之间的链路（无论是否存活）
    pub fn find_link(&self, a: NodeId, b: NodeId) -> Option<LinkId> {
        self.edges.get(&normalize(a, b)).copied()
    }

    /// 两点之间是否存在存活链路
    pub fn has_link(&self, a: NodeId, b: NodeId) -> bool {
        self.find_link(a, b).is_some_and(|id| self.is_up(id))
    }

    /// 通过存活链路相邻的节点
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj[id.0]
            .iter()
            .filter(|(_, link)| self.up[link.0])
            .map(|(nbr, _)| *nbr)
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).count()
    }

    /// 某类邻居的个数
    pub fn degree_by_kind(&self, id: NodeId, kind: NodeKind) -> usize {
        self.neighbors(id)
            .filter(|n| self.nodes[n.0].kind == kind)
            .count()
    }
}
