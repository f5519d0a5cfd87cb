//! Sweep driver: replays one trace against a policy across an ascending
//! list of frame sizes and renders the accumulated counters as the
//! tab-separated table the simulator has always printed.

use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;
use std::time::Instant;

use log::info;

use crate::cache;
use crate::cache::Access;
use crate::cache::PageCache;
use crate::cache::PolicyType;
use crate::cache::Stats;
use crate::error::Result;

/// Header row of a sweep table.
pub const REPORT_HEADER: &str = "Frame\tHit\t\tMiss\t\tPage fault ratio\tWrite back count";

/// Counters for one (policy, frame count) configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub policy: PolicyType,
    pub frames: usize,
    pub stats: Stats,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t\t{:.10}\t\t{}",
            self.frames,
            self.stats.hit,
            self.stats.miss,
            self.stats.fault_ratio(),
            self.stats.write_back
        )
    }
}

/// One policy swept across a list of frame sizes, with the advisory
/// wall-clock time the whole sweep took. The elapsed time is not part of
/// the rendered table so the table stays deterministic for a given trace.
pub struct Sweep {
    pub policy: PolicyType,
    pub reports: Vec<Report>,
    pub elapsed: Duration,
}

impl Display for Sweep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} policy:", self.policy)?;
        writeln!(f, "{}", REPORT_HEADER)?;
        for report in &self.reports {
            writeln!(f, "{}", report)?;
        }
        Ok(())
    }
}

/// Replay the full trace against one cache, access by access, and return
/// the accumulated counters.
pub fn replay(cache: &mut dyn PageCache, trace: &[Access]) -> Stats {
    for &access in trace {
        cache.access(access);
    }
    cache.stats()
}

/// Replay the trace against a fresh cache per frame size. Counters never
/// carry over between configurations.
pub fn run_sweep(policy: PolicyType, frame_sizes: &[usize], trace: &[Access]) -> Result<Sweep> {
    let start = Instant::now();
    let mut reports = Vec::with_capacity(frame_sizes.len());
    for &frames in frame_sizes {
        let mut cache = cache::new_cache(policy, frames)?;
        let stats = replay(cache.as_mut(), trace);
        info!(
            "{} frames={} hit={} miss={} write_back={}",
            policy, frames, stats.hit, stats.miss, stats.write_back
        );
        reports.push(Report { policy, frames, stats });
    }
    Ok(Sweep { policy, reports, elapsed: start.elapsed() })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use goldenfile::Mint;

    use super::*;

    const GOLDEN_DIR: &str = "src/golden/sim";

    // All six pages are distinct, A is written first: enough for the
    // clean-first/recency divergence to show up in the write-back column.
    fn divergence_trace() -> Vec<Access> {
        vec![
            Access::write(0xa),
            Access::read(0xb),
            Access::read(0xc),
            Access::read(0xd),
            Access::read(0xe),
            Access::read(0xf),
        ]
    }

    #[test]
    fn test_run_sweep_one_report_per_frame_size() -> Result<()> {
        let trace = divergence_trace();
        let sweep = run_sweep(PolicyType::Lru, &[4, 5], &trace)?;
        assert_eq!(PolicyType::Lru, sweep.policy);
        assert_eq!(2, sweep.reports.len());
        for report in &sweep.reports {
            assert_eq!(trace.len() as u64, report.stats.accesses());
        }
        Ok(())
    }

    #[test]
    fn test_report_row_format() {
        let report = Report {
            policy: PolicyType::Lru,
            frames: 4096,
            stats: Stats { hit: 1, miss: 3, write_back: 2 },
        };
        assert_eq!("4096\t1\t3\t\t0.7500000000\t\t2", format!("{}", report));
    }

    macro_rules! test_sweep_tables {
        ($($name:ident: $policy:expr, )*) => {
            $(
                #[test]
                fn $name() -> Result<()> {
                    let sweep = run_sweep($policy, &[4, 5], &divergence_trace())?;
                    let mut mint = Mint::new(GOLDEN_DIR);
                    let mut f = mint.new_goldenfile(stringify!($name))?;
                    write!(f, "{}", sweep)?;
                    Ok(())
                }
            )*
        };
    }

    test_sweep_tables! {
        lru_sweep: PolicyType::Lru,
        cflru_sweep: PolicyType::Cflru,
    }
}
