//! 试验循环与结果汇总

use std::fmt::Write as _;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::ExperimentConfig;
use super::sampling::{HostPair, HostPairSample, SamplingMode, build_host_pairs};
use crate::analysis::{PathStats, analyze};
use crate::error::FatTreeError;
use crate::fault::inject_failures;
use crate::net::Link;
use crate::topo::fat_tree::{FatTree, build_fat_tree};

/// 第 `trial` 次试验的随机源，只取决于试验序号，与失效率无关
pub fn trial_rng(trial: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(trial as u64)
}

/// 一次完整试验：构建全新拓扑 → 注入失效 → 统计固定主机对
pub fn run_trial(
    k: usize,
    rate_pct: f64,
    trial: usize,
    pairs: &HostPairSample,
) -> Result<PathStats, FatTreeError> {
    let mut topo = build_fat_tree(k)?;
    let mut rng = trial_rng(trial);
    let failed = inject_failures(&mut topo.net, rate_pct, &mut rng)?;
    let stats = analyze(&topo.net, &pairs.resolve(&topo));
    debug!(
        trial,
        rate_pct,
        failed = failed.len(),
        reachable = stats.reachable,
        "trial done"
    );
    Ok(stats)
}

/// 某个失效率下的汇总结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    pub fail_rate_pct: f64,
    pub avg_path_len: f64,
    pub reachability_pct: f64,
}

impl RateResult {
    /// 对各次试验取算术平均；没有试验时为 0
    pub fn aggregate(fail_rate_pct: f64, trials: &[PathStats]) -> Self {
        if trials.is_empty() {
            return Self {
                fail_rate_pct,
                avg_path_len: 0.0,
                reachability_pct: 0.0,
            };
        }
        let mut path_sum = 0.0;
        let mut reach_sum = 0.0;
        for s in trials {
            path_sum += s.avg_path_len;
            reach_sum += s.reachability_pct;
        }
        let n = trials.len() as f64;
        Self {
            fail_rate_pct,
            avg_path_len: path_sum / n,
            reachability_pct: reach_sum / n,
        }
    }

    pub fn report_line(&self) -> String {
        format!(
            "RATE {}%: Avg Path={:.4}, Reachability={:.2}%",
            self.fail_rate_pct, self.avg_path_len, self.reachability_pct
        )
    }

    pub fn table_row(&self) -> String {
        format!(
            "{:.1}, {:.4}, {:.2}",
            self.fail_rate_pct, self.avg_path_len, self.reachability_pct
        )
    }
}

/// 整个实验的结果表，行顺序与输入失效率顺序一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResults {
    pub k: usize,
    pub total_hosts: usize,
    pub trials: usize,
    pub sampling: SamplingMode,
    pub sample_pairs: Vec<HostPair>,
    pub rows: Vec<RateResult>,
}

impl ExperimentResults {
    pub const TABLE_HEADER: &'static str =
        "Failure Rate (%), Avg Path Length (Hops), Reachability (%)";

    pub fn table(&self) -> String {
        let mut out = String::from(Self::TABLE_HEADER);
        out.push('\n');
        for row in &self.rows {
            let _ = writeln!(out, "{}", row.table_row());
        }
        out
    }
}

pub fn run_experiment(cfg: &ExperimentConfig) -> Result<ExperimentResults, FatTreeError> {
    run_experiment_with(cfg, |_| {})
}

/// 运行实验，每算完一个失效率回调一次 `on_rate`
#[tracing::instrument(skip_all, fields(k = cfg.k, trials = cfg.trials, parallel = cfg.parallel))]
pub fn run_experiment_with<F>(
    cfg: &ExperimentConfig,
    mut on_rate: F,
) -> Result<ExperimentResults, FatTreeError>
where
    F: FnMut(&RateResult),
{
    let params = cfg.validate()?;
    let sample = build_host_pairs(
        &params,
        cfg.max_sample_pairs,
        cfg.sample_seed,
        cfg.exhaustive_host_limit,
    )?;
    info!(
        hosts = params.total_hosts,
        pairs = sample.len(),
        mode = ?sample.mode,
        "📊 开始统计实验"
    );

    let mut rows = Vec::with_capacity(cfg.fail_rates.len());
    for &rate in &cfg.fail_rates {
        // 按试验序号收集后顺序求和，并行与串行结果逐位一致
        let outcomes: Vec<PathStats> = if cfg.parallel {
            (0..cfg.trials)
                .into_par_iter()
                .map(|t| run_trial(cfg.k, rate, t, &sample))
                .collect::<Result<_, _>>()?
        } else {
            (0..cfg.trials)
                .map(|t| run_trial(cfg.k, rate, t, &sample))
                .collect::<Result<_, _>>()?
        };

        let row = RateResult::aggregate(rate, &outcomes);
        info!(
            rate_pct = row.fail_rate_pct,
            avg_path = row.avg_path_len,
            reachability = row.reachability_pct,
            "失效率统计完成"
        );
        on_rate(&row);
        rows.push(row);
    }

    Ok(ExperimentResults {
        k: cfg.k,
        total_hosts: params.total_hosts,
        trials: cfg.trials,
        sampling: sample.mode,
        sample_pairs: sample.pairs,
        rows,
    })
}

/// 单个拓扑实例及其失效链路，供外部可视化使用
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub topo: FatTree,
    pub failed: Vec<Link>,
}

/// 构建一次拓扑并以 `seed` 注入失效
pub fn snapshot(k: usize, rate_pct: f64, seed: u64) -> Result<Snapshot, FatTreeError> {
    let mut topo = build_fat_tree(k)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let failed = inject_failures(&mut topo.net, rate_pct, &mut rng)?;
    Ok(Snapshot { topo, failed })
}
