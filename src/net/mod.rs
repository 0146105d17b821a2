//! 网络拓扑模型
//!
//! 此模块包含图的基本组件：节点、链路、拓扑容器以及最短跳数计算。

// 子模块声明
mod id;
mod node;
mod link;
mod network;
mod hops;

// 重新导出公共接口
pub use id::{LinkId, NodeId, NodeKey};
pub use node::{Node, NodeKind};
pub use link::{Link, LinkLayer};
pub use network::Network;
pub use hops::HopDistances;
