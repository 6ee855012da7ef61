use crate::diagnostics::NodeFailure;
use crate::model::{FieldRef, ObjectId, ObjectRef, TypeRef};
use std::fmt;

/// An object found during a scan whose type is assignable to a target type
#[derive(Clone)]
pub struct ScanMatch {
    pub value: ObjectRef,
    pub runtime_type: TypeRef,
    /// The object the match was reached from
    pub parent: ObjectRef,
    /// Field of `parent` holding the match, `None` for array and sequence elements
    pub field: Option<FieldRef>,
}

impl ScanMatch {
    pub fn id(&self) -> ObjectId {
        ObjectId::of(&self.value)
    }

    pub fn type_name(&self) -> &str {
        self.runtime_type.name()
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field.as_ref().map(|f| f.name())
    }
}

impl fmt::Debug for ScanMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanMatch")
            .field("id", &self.id())
            .field("type", &self.type_name())
            .field("parent", &ObjectId::of(&self.parent))
            .field("field", &self.field_name())
            .finish()
    }
}

/// Counters for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ScanStats {
    /// Nodes popped and processed
    pub visited: usize,
    /// Pops of nodes already processed
    pub skipped: usize,
    pub children_seen: usize,
    pub children_enqueued: usize,
    pub matches: usize,
    pub failed_nodes: usize,
}

/// Full result of `ObjectScanner::scan_detailed`
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Matches in discovery order
    pub matches: Vec<ScanMatch>,
    pub stats: ScanStats,
    pub failures: Vec<NodeFailure>,
    /// Verbose trace lines, empty unless `ScannerOptions::verbose` is set
    pub trace: Vec<String>,
}

impl ScanOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Default)]
pub(crate) struct Collector {
    outcome: ScanOutcome,
}

impl Collector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_visit(&mut self) {
        self.outcome.stats.visited += 1;
    }

    pub(crate) fn record_skip(&mut self) {
        self.outcome.stats.skipped += 1;
    }

    pub(crate) fn record_children(&mut self, seen: usize, enqueued: usize) {
        self.outcome.stats.children_seen += seen;
        self.outcome.stats.children_enqueued += enqueued;
    }

    pub(crate) fn extend_matches(&mut self, matches: Vec<ScanMatch>) {
        self.outcome.stats.matches += matches.len();
        self.outcome.matches.extend(matches);
    }

    pub(crate) fn record_failure(&mut self, failure: NodeFailure) {
        self.outcome.stats.failed_nodes += 1;
        self.outcome.failures.push(failure);
    }

    pub(crate) fn finish(self, trace: Vec<String>) -> ScanOutcome {
        ScanOutcome {
            trace,
            ..self.outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DynObject, TypeInfo};

    #[test]
    fn test_collector_keeps_order_and_counts() {
        let ty = TypeInfo::builder("host.Node").field("next").build();
        let parent: ObjectRef = DynObject::new(&ty);
        let matches: Vec<ScanMatch> = (0..3)
            .map(|_| ScanMatch {
                value: DynObject::new(&ty),
                runtime_type: ty.clone(),
                parent: parent.clone(),
                field: ty.find_field("next").cloned(),
            })
            .collect();
        let ids: Vec<_> = matches.iter().map(ScanMatch::id).collect();

        let mut collector = Collector::new();
        collector.record_visit();
        collector.record_children(3, 1);
        collector.extend_matches(matches);
        let outcome = collector.finish(Vec::new());

        assert_eq!(outcome.matches.iter().map(ScanMatch::id).collect::<Vec<_>>(), ids);
        assert_eq!(outcome.stats.matches, 3);
        assert_eq!(outcome.stats.children_enqueued, 1);
        assert_eq!(outcome.matches[0].field_name(), Some("next"));
        assert!(outcome.is_clean());
        assert!(outcome.trace.is_empty());
    }
}
