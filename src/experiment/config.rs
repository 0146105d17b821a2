use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FatTreeError;
use crate::topo::fat_tree::FatTreeParams;

/// 默认扫描的失效率（%）
pub const DEFAULT_FAIL_RATES: [f64; 9] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 15.0];

/// 实验参数，可从 JSON 文件加载；缺省字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub k: usize,
    /// 按输入顺序输出结果
    pub fail_rates: Vec<f64>,
    /// 每个失效率的试验次数
    pub trials: usize,
    /// 大拓扑下随机抽取的主机对上限
    pub max_sample_pairs: usize,
    /// 主机对抽样专用随机源的种子，不用于失效注入
    pub sample_seed: u64,
    /// 主机数不超过该值时穷举所有有序主机对
    pub exhaustive_host_limit: usize,
    /// 是否在 rayon 线程池上并行执行试验
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            k: 8,
            fail_rates: DEFAULT_FAIL_RATES.to_vec(),
            trials: 100,
            max_sample_pairs: 500,
            sample_seed: 1000,
            exhaustive_host_limit: 16,
            parallel: true,
        }
    }
}

impl ExperimentConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, FatTreeError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FatTreeError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 校验参数并返回拓扑结构参数
    pub fn validate(&self) -> Result<FatTreeParams, FatTreeError> {
        let params = FatTreeParams::new(self.k)?;
        if let Some(&rate) = self.fail_rates.iter().find(|r| r.is_nan()) {
            return Err(FatTreeError::InvalidFailureRate { rate });
        }
        Ok(params)
    }
}
