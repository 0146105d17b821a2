//! 统计实验
//!
//! 对每个失效率重复多次“构建 → 注入失效 → 分析”，主机对集合在整个实验内固定。

mod config;
mod runner;
mod sampling;

pub use config::{DEFAULT_FAIL_RATES, ExperimentConfig};
pub use runner::{
    ExperimentResults, RateResult, Snapshot, run_experiment, run_experiment_with, run_trial,
    snapshot, trial_rng,
};
pub use sampling::{HostPair, HostPairSample, SamplingMode, build_host_pairs};
