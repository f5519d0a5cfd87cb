//! Seeded synthetic workloads, for exercising the policies without a trace
//! file on disk. The access pattern is a simple hot/cold mix: a small hot
//! set absorbs most references, the rest spread uniformly over the whole
//! page range, which is enough skew for the clean-first/recency trade-off
//! to show up in the counters.

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::cache::Access;

/// Shape of a generated workload.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    /// Number of accesses to generate.
    pub accesses: usize,
    /// Size of the page range references are drawn from.
    pub pages: u64,
    /// Fraction of accesses that are writes.
    pub write_ratio: f64,
    /// Fraction of the page range forming the hot set.
    pub hot_fraction: f64,
    /// Fraction of accesses that go to the hot set.
    pub hot_bias: f64,
    /// Generation is fully deterministic under a fixed seed.
    pub seed: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Workload {
            accesses: 1_000_000,
            pages: 1 << 16,
            write_ratio: 0.25,
            hot_fraction: 0.1,
            hot_bias: 0.8,
            seed: 42,
        }
    }
}

/// Generate the access sequence for a workload.
pub fn generate(workload: &Workload) -> Vec<Access> {
    let mut rng = SmallRng::seed_from_u64(workload.seed);
    let pages = workload.pages.max(1);
    let hot = ((pages as f64 * workload.hot_fraction) as u64).clamp(1, pages);
    let mut accesses = Vec::with_capacity(workload.accesses);
    for _ in 0..workload.accesses {
        let page_number = if rng.gen_bool(workload.hot_bias) {
            rng.gen_range(0..hot)
        } else {
            rng.gen_range(0..pages)
        };
        accesses.push(Access { page_number, is_write: rng.gen_bool(workload.write_ratio) });
    }
    debug!("generated {} accesses over {} pages (hot set {})", accesses.len(), pages, hot);
    accesses
}
