//! 错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FatTreeError {
    /// fat-tree 的 k 必须是 >= 2 的偶数
    #[error("fat-tree k must be an even number >= 2, got {k}")]
    InvalidParameter { k: usize },

    #[error("failure rate must be a finite percentage, got {rate}")]
    InvalidFailureRate { rate: f64 },

    /// 采样数量超过总体；调用方应先截断
    #[error("cannot sample {requested} items from a population of {available}")]
    Sampling { requested: usize, available: usize },

    #[error("invalid link {a} <-> {b} (self-loop, duplicate or unknown node)")]
    InvalidLink { a: String, b: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
