//! 拓扑快照导出（供外部渲染/绘图工具使用）
//!
//! 设计目标：
//! - **结构化**：节点带类别、pod、所挂 edge 交换机，链路带层级和失效标记
//! - **不含布局**：分层布局与绘制由外部工具完成

mod types;

pub use types::{TopologySnapshot, VizLinkInfo, VizNodeInfo};
