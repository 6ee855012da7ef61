use serde::Deserialize;

/// Options controlling how an `ObjectScanner` runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerOptions {
    /// Emit the per-node trace through `debug!`
    pub verbose: bool,
    /// Turn panics raised by host objects into node failures instead of unwinding out of the scan
    pub catch_panics: bool,
    /// Worker count for `scan_all`; `None` uses the global rayon pool
    pub threads: Option<usize>,
    /// Name prefixes blacklisted in addition to the construction seeds
    pub extra_prefixes: Vec<String>,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            catch_panics: true,
            threads: None,
            extra_prefixes: Vec::new(),
        }
    }
}
