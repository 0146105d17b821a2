//! 标识符类型
//!
//! 定义节点和链路的唯一标识符。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 节点标识符（节点表中的稠密下标，按构建顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// 链路标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(pub usize);

/// 结构化的节点身份：角色 + 下标
///
/// 只用于展示和比较，任何逻辑都不解析它的字符串形式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum NodeKey {
    Core { index: usize },
    Agg { pod: usize, index: usize },
    Edge { pod: usize, index: usize },
    /// `index` 为全局主机编号（按创建顺序）
    Host { index: usize },
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Core { index } => write!(f, "C_{index}"),
            NodeKey::Agg { pod, index } => write!(f, "A_{pod}_{index}"),
            NodeKey::Edge { pod, index } => write!(f, "E_{pod}_{index}"),
            NodeKey::Host { index } => write!(f, "H_{index}"),
        }
    }
}
