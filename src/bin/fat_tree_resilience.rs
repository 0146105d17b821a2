//! Fat-tree 链路失效鲁棒性分析
//!
//! 先构建一个拓扑快照（可导出 JSON 供外部绘图），再对一组失效率做统计实验。

use std::path::PathBuf;

use clap::Parser;
use fattree_rs::FatTreeError;
use fattree_rs::experiment::{ExperimentConfig, run_experiment_with, snapshot};
use fattree_rs::viz::TopologySnapshot;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "fat_tree_resilience", about = "k 端口 fat-tree 随机链路失效下的路径长度与可达率分析")]
struct Args {
    /// JSON 实验配置文件；命令行显式给出的参数覆盖其中的值
    #[arg(long)]
    config: Option<PathBuf>,
    /// fat-tree 端口数（>= 2 的偶数）
    #[arg(long)]
    k: Option<usize>,
    /// 每个失效率的试验次数
    #[arg(long)]
    trials: Option<usize>,
    /// k 较大时随机抽取的主机对数
    #[arg(long)]
    samples: Option<usize>,
    /// 扫描的失效率（%），逗号分隔
    #[arg(long, value_delimiter = ',')]
    rates: Option<Vec<f64>>,
    /// 主机对抽样的随机种子
    #[arg(long)]
    sample_seed: Option<u64>,
    /// 串行执行试验
    #[arg(long, default_value_t = false)]
    serial: bool,
    /// 快照的失效率（%）
    #[arg(long, default_value_t = 0.0)]
    fail_rate: f64,
    /// 快照 JSON 输出路径
    #[arg(long)]
    snapshot_json: Option<PathBuf>,
    /// 结果表 JSON 输出路径
    #[arg(long)]
    results_json: Option<PathBuf>,
    /// 只做快照，不跑统计实验
    #[arg(long, default_value_t = false)]
    skip_sweep: bool,
}

impl Args {
    fn experiment_config(&self) -> Result<ExperimentConfig, FatTreeError> {
        let mut cfg = match &self.config {
            Some(path) => ExperimentConfig::load(path)?,
            None => ExperimentConfig::default(),
        };
        if let Some(k) = self.k {
            cfg.k = k;
        }
        if let Some(trials) = self.trials {
            cfg.trials = trials;
        }
        if let Some(samples) = self.samples {
            cfg.max_sample_pairs = samples;
        }
        if let Some(rates) = &self.rates {
            cfg.fail_rates = rates.clone();
        }
        if let Some(seed) = self.sample_seed {
            cfg.sample_seed = seed;
        }
        if self.serial {
            cfg.parallel = false;
        }
        Ok(cfg)
    }
}

fn run(args: &Args) -> Result<(), FatTreeError> {
    let cfg = args.experiment_config()?;
    let params = cfg.validate()?;

    // 快照的种子沿用试验次数
    let snap = snapshot(cfg.k, args.fail_rate, cfg.trials as u64)?;
    println!("--- Structural Snapshot (K={}) ---", cfg.k);
    println!("Links Failed in Snapshot: {}", snap.failed.len());
    if let Some(path) = &args.snapshot_json {
        TopologySnapshot::capture(&snap.topo, &snap.failed).write_json(path)?;
    }

    if args.skip_sweep {
        return Ok(());
    }

    println!("--- Running Statistical Analysis ---");
    println!("Topology Size: K={} (Hosts: {})", cfg.k, params.total_hosts);
    println!("Runs per Data Point: {}", cfg.trials);

    let results = run_experiment_with(&cfg, |row| println!("{}", row.report_line()))?;
    println!(
        "Sampling: {:?} ({} fixed pairs)",
        results.sampling,
        results.sample_pairs.len()
    );

    println!("--- Final Analysis Data ---");
    print!("{}", results.table());

    if let Some(path) = &args.results_json {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(path, json)?;
    }
    Ok(())
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!(%err, "实验失败");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
