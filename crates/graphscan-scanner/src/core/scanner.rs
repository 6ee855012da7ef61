use crate::collector::{Collector, ScanMatch, ScanOutcome};
use crate::core::options::ScannerOptions;
use crate::core::work::{IdentitySet, WorkItem};
use crate::diagnostics::{NodeFailure, ScanTrace};
use crate::filter::{
    Blacklist, BlacklistEntry, BlacklistSeed, FilterChain, FilterConfigSource, FilterRef,
};
use crate::model::{ObjectRef, TypeRef, TypeResolver, same_object};
use crate::unpackers::{Candidate, UnpackContext, Unpacker, default_unpackers, panic_message};
use graphscan_error::{GraphScanError, Result};
use log::{debug, trace};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Breadth-first scanner locating objects of given types in an object graph.
///
/// One scanner can serve many scans, from several threads at once. Each scan
/// owns its worklist and visited set; the scanner only shares its filters.
pub struct ObjectScanner {
    seeds: Vec<BlacklistEntry>,
    unpackers: Vec<Box<dyn Unpacker>>,
    filters: FilterChain,
    options: ScannerOptions,
    initialized: bool,
    /// Dedicated pool for `scan_all`, built on first use when `threads` is set
    #[cfg(feature = "parallel")]
    pub(super) pool: once_cell::sync::OnceCell<rayon::ThreadPool>,
}

/// What expanding one node produced
struct NodeStep {
    seen: usize,
    matches: Vec<ScanMatch>,
    next: Vec<WorkItem>,
}

impl ObjectScanner {
    /// Create a scanner with the default unpackers.
    ///
    /// Seeds the resolver cannot make sense of are dropped here.
    pub fn new<I>(seeds: I, resolver: &dyn TypeResolver) -> Self
    where
        I: IntoIterator<Item = BlacklistSeed>,
    {
        let seeds: Vec<BlacklistSeed> = seeds.into_iter().collect();
        let resolved = Blacklist::from_seeds(&seeds, resolver);
        debug!(
            "Resolved {} of {} blacklist seeds",
            resolved.len(),
            seeds.len()
        );
        ObjectScanner {
            seeds: resolved.entries().to_vec(),
            unpackers: default_unpackers(),
            filters: FilterChain::default(),
            options: ScannerOptions::default(),
            initialized: false,
            #[cfg(feature = "parallel")]
            pool: once_cell::sync::OnceCell::new(),
        }
    }

    pub fn with_options(mut self, options: ScannerOptions) -> Self {
        self.options = options;
        #[cfg(feature = "parallel")]
        {
            self.pool = once_cell::sync::OnceCell::new();
        }
        self
    }

    /// Set where `load_config` reads filter rules from
    pub fn with_config_source(mut self, source: Arc<dyn FilterConfigSource>) -> Self {
        self.filters.configurable_mut().set_source(source);
        self
    }

    pub fn register_unpacker(&mut self, unpacker: Box<dyn Unpacker>) {
        debug!("Registering unpacker '{}'", unpacker.name());
        self.unpackers.push(unpacker);
    }

    /// Reset the strategy list to the array, sequence and field unpackers
    pub fn with_default_unpackers(mut self) -> Self {
        self.unpackers = default_unpackers();
        self
    }

    /// Remove every strategy, including the defaults
    pub fn clear_unpackers(&mut self) {
        self.unpackers.clear();
    }

    /// Build the effective blacklist. Must be called before scanning.
    pub fn initialize(&mut self) -> &mut Self {
        let mut entries = self.seeds.clone();
        entries.extend(
            self.options
                .extra_prefixes
                .iter()
                .filter(|prefix| !prefix.is_empty())
                .map(|prefix| BlacklistEntry::NamePrefix(prefix.clone())),
        );
        debug!("Initializing scanner with {} blacklist entries", entries.len());
        self.filters.set_blacklist(Blacklist::new(entries));
        self.initialized = true;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    pub fn unpacker_names(&self) -> Vec<&'static str> {
        self.unpackers.iter().map(|u| u.name()).collect()
    }

    /// Register a dynamic filter; it applies to scans started afterwards
    pub fn add_filter(&self, filter: FilterRef) -> bool {
        self.filters.dynamic().add(filter)
    }

    pub fn remove_filter(&self, filter: &FilterRef) -> bool {
        self.filters.dynamic().remove(filter)
    }

    /// Reload the configurable filter's rules, returning how many are active
    pub fn load_config(&self) -> Result<usize> {
        self.filters.configurable().load_config()
    }

    /// Find every object reachable from `root` whose type is assignable to one of `types`.
    ///
    /// The root itself is never reported.
    pub fn scan(&self, types: &[TypeRef], root: Option<&ObjectRef>) -> Result<Vec<ScanMatch>> {
        self.scan_detailed(types, root).map(|outcome| outcome.matches)
    }

    /// Like `scan`, also returning statistics and per-node failures
    pub fn scan_detailed(
        &self,
        types: &[TypeRef],
        root: Option<&ObjectRef>,
    ) -> Result<ScanOutcome> {
        if !self.initialized {
            return Err(GraphScanError::scanner_uninitialized());
        }
        let Some(root) = root else {
            return Ok(ScanOutcome::default());
        };

        let scan_trace = ScanTrace::new(self.options.verbose);
        let mut collector = Collector::new();
        let mut visited = IdentitySet::new();
        let mut queue = VecDeque::new();
        queue.push_back(WorkItem::root(root.clone()));

        scan_trace.banner();
        while let Some(item) = queue.pop_front() {
            if !visited.insert(&item.value) {
                scan_trace.skip(&item.value, &item.ty);
                collector.record_skip();
                continue;
            }
            scan_trace.scanning(&item.value, &item.ty);
            collector.record_visit();

            let mut ctx =
                UnpackContext::new(&self.filters).with_catch_panics(self.options.catch_panics);
            let step = self.guarded(&item, || {
                self.expand(types, root, &item, &mut ctx, &scan_trace)
            });
            let (_, field_errors) = ctx.into_parts();

            let general_error = match step {
                Ok(step) => {
                    scan_trace.added(step.next.len());
                    collector.record_children(step.seen, step.next.len());
                    collector.extend_matches(step.matches);
                    queue.extend(step.next);
                    None
                }
                Err(error) => {
                    scan_trace.added(0);
                    Some(error)
                }
            };

            if let Some(failure) =
                NodeFailure::new(&item.value, &item.ty, field_errors, general_error)
            {
                failure.log();
                collector.record_failure(failure);
            }
        }
        scan_trace.banner();

        let outcome = collector.finish(scan_trace.into_lines());
        trace!(
            "Scan finished: {} visited, {} matches, {} failed nodes",
            outcome.stats.visited,
            outcome.stats.matches,
            outcome.stats.failed_nodes
        );
        Ok(outcome)
    }

    /// Run `work`, turning a panic into the node's general error when enabled
    fn guarded<F>(&self, item: &WorkItem, work: F) -> Result<NodeStep>
    where
        F: FnOnce() -> Result<NodeStep>,
    {
        if !self.options.catch_panics {
            return work();
        }
        panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
            Err(GraphScanError::unpack_panicked(panic_message(payload.as_ref()))
                .with_type_name(item.ty.name()))
        })
    }

    fn expand(
        &self,
        types: &[TypeRef],
        root: &ObjectRef,
        item: &WorkItem,
        ctx: &mut UnpackContext<'_>,
        scan_trace: &ScanTrace,
    ) -> Result<NodeStep> {
        let mut step = NodeStep {
            seen: 0,
            matches: Vec::new(),
            next: Vec::new(),
        };
        if item.ty.is_value_type() || self.filters.is_blacklisted(&item.ty, None) {
            return Ok(step);
        }

        for unpacker in &self.unpackers {
            if unpacker.can_unpack(&item.ty) {
                unpacker.unpack(&item.value, &item.ty, ctx)?;
            }
        }

        step.seen = ctx.candidates().len();
        for candidate in ctx.candidates() {
            let child_ty = candidate.value.runtime_type();

            // a cycle back to the root expands nothing new and must not report it
            if !same_object(&candidate.value, root)
                && types.iter().any(|target| target.is_assignable_from(&child_ty))
            {
                scan_trace.matched(candidate);
                step.matches.push(ScanMatch {
                    value: candidate.value.clone(),
                    runtime_type: child_ty.clone(),
                    parent: item.value.clone(),
                    field: candidate.field.clone(),
                });
            }

            if self.is_pruned(item, candidate, &child_ty) {
                scan_trace.pruned(candidate);
            } else {
                scan_trace.enqueued(candidate);
                step.next.push(WorkItem {
                    value: candidate.value.clone(),
                    ty: child_ty,
                    parent: Some(item.value.clone()),
                    field: candidate.field.clone(),
                });
            }
        }
        Ok(step)
    }

    fn is_pruned(&self, item: &WorkItem, candidate: &Candidate, child_ty: &TypeRef) -> bool {
        child_ty.is_value_type()
            || self.filters.is_blacklisted(child_ty, None)
            || candidate.field.as_ref().is_some_and(|f| f.is_static())
            || (candidate.field.is_some()
                && self
                    .filters
                    .is_blacklisted(&item.ty, candidate.field.as_deref()))
            || item
                .parent
                .as_ref()
                .is_some_and(|parent| same_object(parent, &candidate.value))
    }
}
