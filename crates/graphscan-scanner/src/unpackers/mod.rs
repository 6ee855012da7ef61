//! Unpacking strategies
//!
//! Each strategy pulls a different kind of child out of a node: array
//! elements, produced elements, field values. All of them run for every
//! expandable node and their output is merged, keeping the first occurrence
//! of each (value, field) pair.

pub mod access;
pub mod array;
pub mod fields;
pub mod sequence;

pub use access::AccessOverride;
pub use array::ArrayUnpacker;
pub use fields::FieldUnpacker;
pub use sequence::SequenceUnpacker;

use crate::diagnostics::FieldError;
use crate::filter::FilterChain;
use crate::model::{FieldInfo, FieldRef, ObjectId, ObjectRef, TypeInfo, TypeRef};
use graphscan_error::{GraphScanError, Result};
use std::any::Any;
use std::collections::HashSet;

/// A child discovered while unpacking a node
#[derive(Clone)]
pub struct Candidate {
    pub value: ObjectRef,
    /// Field the value was read from, `None` for array and sequence elements
    pub field: Option<FieldRef>,
}

/// Accumulates the children and per-field errors of a single node
pub struct UnpackContext<'a> {
    filters: &'a FilterChain,
    seen: HashSet<(ObjectId, Option<usize>)>,
    candidates: Vec<Candidate>,
    field_errors: Vec<FieldError>,
    catch_panics: bool,
}

impl<'a> UnpackContext<'a> {
    pub fn new(filters: &'a FilterChain) -> Self {
        Self {
            filters,
            seen: HashSet::new(),
            candidates: Vec::new(),
            field_errors: Vec::new(),
            catch_panics: true,
        }
    }

    /// Whether strategies should contain panics raised by host reads
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    pub fn catches_panics(&self) -> bool {
        self.catch_panics
    }

    pub fn filters(&self) -> &FilterChain {
        self.filters
    }

    /// Add a child unless the same value was already yielded through the same field
    pub fn push(&mut self, value: ObjectRef, field: Option<&FieldRef>) -> bool {
        let key = (ObjectId::of(&value), field.map(FieldInfo::identity));
        if !self.seen.insert(key) {
            return false;
        }
        self.candidates.push(Candidate {
            value,
            field: field.cloned(),
        });
        true
    }

    pub fn record_field_error<C: Into<String>>(&mut self, context: C, error: GraphScanError) {
        self.field_errors.push(FieldError {
            context: context.into(),
            error,
        });
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn into_parts(self) -> (Vec<Candidate>, Vec<FieldError>) {
        (self.candidates, self.field_errors)
    }
}

/// Strategy extracting children from a node.
///
/// Returning `Err` marks the whole node as failed; the node then contributes
/// no children at all. Recoverable per-field problems go through
/// `UnpackContext::record_field_error` instead.
pub trait Unpacker: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_unpack(&self, ty: &TypeInfo) -> bool;

    fn unpack(&self, value: &ObjectRef, ty: &TypeRef, ctx: &mut UnpackContext<'_>) -> Result<()>;
}

/// Text of a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The array, sequence and field strategies, in that order
pub fn default_unpackers() -> Vec<Box<dyn Unpacker>> {
    vec![
        Box::new(ArrayUnpacker),
        Box::new(SequenceUnpacker),
        Box::new(FieldUnpacker),
    ]
}
