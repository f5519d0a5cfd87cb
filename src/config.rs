use serde::Deserialize;

use crate::cache::PolicyType;
use crate::error::Result;

#[derive(Debug, PartialEq, Deserialize)]
pub struct Config {
    /// Path of the trace file to replay. May stay empty when the binary is
    /// asked to generate a synthetic workload instead.
    #[serde(default)]
    pub trace: String,

    /// Ascending list of frame counts each policy is swept across.
    pub frame_sizes: Vec<usize>,

    /// Policies to run, each over the full frame-size list in turn.
    pub policies: Vec<PolicyType>,

    pub log_level: String,
}

impl Config {
    pub fn new(file: &str) -> Result<Config> {
        let mut cfg = config::Config::builder()
            .set_default("trace", "")?
            .set_default("frame_sizes", vec![4096, 8192, 16384, 32768, 65536])?
            .set_default("policies", vec!["lru", "cflru"])?
            .set_default("log_level", "info")?;
        if !file.is_empty() {
            cfg = cfg.add_source(config::File::with_name(file))
        }
        cfg = cfg.add_source(config::Environment::with_prefix("PAGESIM"));
        Ok(cfg.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() -> Result<()> {
        let cfg = Config::new("")?;
        assert_eq!("", cfg.trace);
        assert_eq!(vec![4096, 8192, 16384, 32768, 65536], cfg.frame_sizes);
        assert_eq!(vec![PolicyType::Lru, PolicyType::Cflru], cfg.policies);
        assert_eq!("info", cfg.log_level);
        Ok(())
    }
}
