//! 随机链路失效注入
//!
//! 随机源由调用方显式传入，不使用全局随机数生成器。

use rand::Rng;
use rand::seq::index;
use tracing::{debug, trace};

use crate::error::FatTreeError;
use crate::net::{Link, Network};

/// 需要失效的链路数：`ceil(total * rate / 100)`，截断到 `total`
pub fn fail_count(total: usize, rate_pct: f64) -> usize {
    if rate_pct.is_nan() || rate_pct <= 0.0 {
        return 0;
    }
    let n = (total as f64 * (rate_pct / 100.0)).ceil();
    // `as` 对 +inf 饱和到 usize::MAX
    (n as usize).min(total)
}

/// 从 `0..population` 中无放回均匀抽取 `amount` 个下标（按抽取顺序）
pub fn sample_indices<R: Rng + ?Sized>(
    rng: &mut R,
    population: usize,
    amount: usize,
) -> Result<Vec<usize>, FatTreeError> {
    if amount > population {
        return Err(FatTreeError::Sampling {
            requested: amount,
            available: population,
        });
    }
    Ok(index::sample(rng, population, amount).into_vec())
}

/// 按百分比随机移除链路，返回被移除的链路
///
/// `rate_pct <= 0` 时不做任何修改；超过 100 时截断为全部链路。
/// 节点集合不变，允许出现孤立节点。
#[tracing::instrument(skip(net, rng), fields(links = net.link_count()))]
pub fn inject_failures<R: Rng + ?Sized>(
    net: &mut Network,
    rate_pct: f64,
    rng: &mut R,
) -> Result<Vec<Link>, FatTreeError> {
    if rate_pct.is_nan() {
        return Err(FatTreeError::InvalidFailureRate { rate: rate_pct });
    }
    if rate_pct <= 0.0 {
        return Ok(Vec::new());
    }

    let population: Vec<Link> = net.live_links().copied().collect();
    let num_to_fail = fail_count(population.len(), rate_pct);
    let picks = sample_indices(rng, population.len(), num_to_fail)?;

    let mut removed = Vec::with_capacity(picks.len());
    for i in picks {
        let link = population[i];
        if net.remove_link(link.id) {
            trace!(link = ?link.id, layer = ?link.layer, "链路失效");
        }
        removed.push(link);
    }

    debug!(
        failed = removed.len(),
        remaining = net.link_count(),
        "💥 链路失效注入完成"
    );
    Ok(removed)
}
