//! Scan diagnostics
//!
//! Two outputs live here: the verbose trace of a scan (emitted through
//! `debug!` and kept in `ScanOutcome::trace` when `ScannerOptions::verbose`
//! is set) and the failure report of a
//! node whose unpacking went wrong, which is always logged with `warn!` and
//! also handed back in `ScanOutcome::failures`.

use crate::model::{ObjectId, ObjectRef, TypeInfo};
use crate::unpackers::Candidate;
use graphscan_error::GraphScanError;
use log::{debug, warn};
use std::cell::RefCell;

const BANNER: &str = "****************************************************************";
const SEPARATOR: &str =
    "-----------------------------------------------------------------------";

/// A field that could not be read, with the context it was read in
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct FieldError {
    pub context: String,
    pub error: GraphScanError,
}

/// Everything that went wrong while unpacking one node
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct NodeFailure {
    pub object_id: ObjectId,
    pub type_name: String,
    pub description: String,
    pub field_errors: Vec<FieldError>,
    /// Set when the node was abandoned; it then contributed no children
    pub general_error: Option<GraphScanError>,
}

impl NodeFailure {
    pub(crate) fn new(
        value: &ObjectRef,
        ty: &TypeInfo,
        field_errors: Vec<FieldError>,
        general_error: Option<GraphScanError>,
    ) -> Option<Self> {
        if field_errors.is_empty() && general_error.is_none() {
            return None;
        }
        Some(Self {
            object_id: ObjectId::of(value),
            type_name: ty.name().to_string(),
            description: value.describe(),
            field_errors,
            general_error,
        })
    }

    pub fn is_abandoned(&self) -> bool {
        self.general_error.is_some()
    }

    /// The report as log lines
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![
            SEPARATOR.to_string(),
            "Warning: Class scanner encountered an error while scanning class".to_string(),
        ];
        if let Some(error) = &self.general_error {
            lines.push(format!(
                "General exception: {}, {}",
                error.kind_name(),
                error.message()
            ));
        }
        if !self.field_errors.is_empty() {
            lines.push("Errors:".to_string());
            for field_error in &self.field_errors {
                lines.push(format!(
                    " - {}: {}, {}",
                    field_error.context,
                    field_error.error.kind_name(),
                    field_error.error.message()
                ));
            }
        }
        lines.push(format!("Type: {}", self.type_name));
        lines.push(format!("Object: {}:{}", self.object_id, self.description));
        lines.push(SEPARATOR.to_string());
        lines
    }

    pub(crate) fn log(&self) {
        for line in self.report_lines() {
            warn!("{line}");
        }
    }
}

/// Verbose per-scan trace. Every method is a no-op unless enabled.
pub(crate) struct ScanTrace {
    lines: Option<RefCell<Vec<String>>>,
}

impl ScanTrace {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            lines: enabled.then(|| RefCell::new(Vec::new())),
        }
    }

    /// Lines emitted so far, empty when tracing is off
    pub(crate) fn into_lines(self) -> Vec<String> {
        self.lines.map(RefCell::into_inner).unwrap_or_default()
    }

    fn emit(&self, line: impl FnOnce() -> String) {
        if let Some(lines) = &self.lines {
            let line = line();
            debug!("{line}");
            lines.borrow_mut().push(line);
        }
    }

    fn node_label(value: &ObjectRef, ty: &TypeInfo) -> String {
        format!("{}:{}", ObjectId::of(value), ty.name())
    }

    fn child_label(candidate: &Candidate) -> String {
        let field = candidate
            .field
            .as_ref()
            .map(|f| f.name().to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            "{} = {}",
            field,
            Self::node_label(&candidate.value, &candidate.value.runtime_type())
        )
    }

    pub(crate) fn banner(&self) {
        self.emit(|| BANNER.to_string());
    }

    pub(crate) fn scanning(&self, value: &ObjectRef, ty: &TypeInfo) {
        self.emit(|| format!("* Scanning:\t{}", Self::node_label(value, ty)));
    }

    pub(crate) fn skip(&self, value: &ObjectRef, ty: &TypeInfo) {
        self.emit(|| format!("* Skip:\t{}", Self::node_label(value, ty)));
    }

    pub(crate) fn matched(&self, candidate: &Candidate) {
        self.emit(|| format!("* F {}", Self::child_label(candidate)));
    }

    pub(crate) fn enqueued(&self, candidate: &Candidate) {
        self.emit(|| format!("* + {}", Self::child_label(candidate)));
    }

    pub(crate) fn pruned(&self, candidate: &Candidate) {
        self.emit(|| format!("* - {}", Self::child_label(candidate)));
    }

    pub(crate) fn added(&self, count: usize) {
        self.emit(|| format!("* Added:\t{count} objects."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DynObject, TypeInfo};

    #[test]
    fn test_no_failure_without_errors() {
        let ty = TypeInfo::builder("host.Fine").build();
        let value: ObjectRef = DynObject::new(&ty);
        assert!(NodeFailure::new(&value, &ty, Vec::new(), None).is_none());
    }

    #[test]
    fn test_report_layout() {
        let ty = TypeInfo::builder("host.Broken").build();
        let value: ObjectRef = DynObject::new(&ty);
        let failure = NodeFailure::new(
            &value,
            &ty,
            vec![FieldError {
                context: "Unpack field 'lock'".into(),
                error: GraphScanError::field_sealed("host.Broken", "lock"),
            }],
            Some(GraphScanError::unpack_panicked("boom")),
        )
        .unwrap();

        let lines = failure.report_lines();
        assert_eq!(lines.first(), lines.last());
        assert_eq!(
            lines[1],
            "Warning: Class scanner encountered an error while scanning class"
        );
        assert_eq!(lines[2], "General exception: Unpack/Panicked, boom");
        assert_eq!(lines[3], "Errors:");
        assert_eq!(
            lines[4],
            " - Unpack field 'lock': FieldAccess/Sealed, field 'lock' of 'host.Broken' is sealed"
        );
        assert_eq!(lines[5], "Type: host.Broken");
        assert!(lines[6].starts_with("Object: "));
        assert!(failure.is_abandoned());
    }

    #[test]
    fn test_trace_records_only_when_enabled() {
        let ty = TypeInfo::builder("host.Node").field("next").build();
        let value: ObjectRef = DynObject::new(&ty);
        let candidate = Candidate {
            value: value.clone(),
            field: ty.find_field("next").cloned(),
        };

        let quiet = ScanTrace::new(false);
        quiet.scanning(&value, &ty);
        quiet.matched(&candidate);
        assert!(quiet.into_lines().is_empty());

        let verbose = ScanTrace::new(true);
        verbose.scanning(&value, &ty);
        verbose.pruned(&candidate);
        verbose.added(0);
        let id = ObjectId::of(&value);
        assert_eq!(
            verbose.into_lines(),
            vec![
                format!("* Scanning:\t{id}:host.Node"),
                format!("* - next = {id}:host.Node"),
                "* Added:\t0 objects.".to_string(),
            ]
        );
    }
}
