//! Scanning several roots at once
//!
//! Every root is scanned independently on the rayon pool with its own
//! worklist and visited set, so an object reachable from two roots is
//! reported once per root.

use crate::collector::ScanOutcome;
use crate::core::scanner::ObjectScanner;
use crate::model::{ObjectRef, TypeRef};
use graphscan_error::{GraphScanError, Result};
use log::debug;
use rayon::prelude::*;

impl ObjectScanner {
    /// Scan each of `roots`, returning one outcome per root in input order
    pub fn scan_all(&self, types: &[TypeRef], roots: &[ObjectRef]) -> Result<Vec<ScanOutcome>> {
        if !self.is_initialized() {
            return Err(GraphScanError::scanner_uninitialized());
        }
        debug!(
            "Scanning {} roots on {} threads",
            roots.len(),
            self.options()
                .threads
                .unwrap_or_else(rayon::current_num_threads)
        );

        let run = || {
            roots
                .par_iter()
                .map(|root| self.scan_detailed(types, Some(root)))
                .collect::<Result<Vec<_>>>()
        };

        match self.options().threads {
            Some(threads) => self.pool(threads)?.install(run),
            None => run(),
        }
    }

    fn pool(&self, threads: usize) -> Result<&rayon::ThreadPool> {
        self.pool.get_or_try_init(|| {
            debug!("Building scan pool with {threads} threads");
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    GraphScanError::scanner_pool_unavailable(format!(
                        "Failed to create thread pool: {e}"
                    ))
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::ScannerOptions;
    use crate::model::{DynObject, TypeInfo, TypeRegistry};

    #[test]
    fn test_results_follow_input_order() {
        let leaf = TypeInfo::builder("host.Leaf").build();
        let holder = TypeInfo::builder("host.Holder").field("leaf").build();
        let roots: Vec<ObjectRef> = (0..8)
            .map(|i| {
                let root = DynObject::new(&holder);
                if i % 2 == 0 {
                    root.set("leaf", Some(DynObject::new(&leaf))).unwrap();
                }
                root as ObjectRef
            })
            .collect();

        let mut scanner = ObjectScanner::new(Vec::new(), &TypeRegistry::new())
            .with_options(ScannerOptions {
                threads: Some(2),
                ..Default::default()
            });
        scanner.initialize();

        let outcomes = scanner.scan_all(&[leaf], &roots).unwrap();
        let counts: Vec<usize> = outcomes.iter().map(|o| o.matches.len()).collect();
        assert_eq!(counts, vec![1, 0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_dedicated_pool_is_built_once() {
        let holder = TypeInfo::builder("host.Holder").field("leaf").build();
        let roots = vec![
            DynObject::new(&holder) as ObjectRef,
            DynObject::new(&holder) as ObjectRef,
        ];
        let mut scanner = ObjectScanner::new(Vec::new(), &TypeRegistry::new())
            .with_options(ScannerOptions {
                threads: Some(3),
                ..Default::default()
            });
        scanner.initialize();
        assert!(scanner.pool.get().is_none());

        scanner.scan_all(&[holder.clone()], &roots).unwrap();
        let first = scanner.pool.get().unwrap() as *const rayon::ThreadPool;
        assert_eq!(scanner.pool.get().unwrap().current_num_threads(), 3);

        scanner.scan_all(&[holder], &roots).unwrap();
        let second = scanner.pool.get().unwrap() as *const rayon::ThreadPool;
        assert_eq!(first, second);
    }

    #[test]
    fn test_global_pool_used_without_thread_count() {
        let mut scanner = ObjectScanner::new(Vec::new(), &TypeRegistry::new());
        scanner.initialize();
        scanner.scan_all(&[], &[]).unwrap();
        assert!(scanner.pool.get().is_none());
    }

    #[test]
    fn test_requires_initialize() {
        let scanner = ObjectScanner::new(Vec::new(), &TypeRegistry::new());
        assert!(scanner.scan_all(&[], &[]).is_err());
    }
}
