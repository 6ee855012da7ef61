//! Shared fixtures for scanner integration tests
#![allow(dead_code)]

use graphscan_error::{GraphScanError, Result};
use graphscan_scanner::{
    BlacklistSeed, DynObject, FieldInfo, Introspect, ObjectId, ObjectRef, ObjectScanner,
    ScanMatch, ScannerOptions, TypeInfo, TypeRef, TypeRegistry, UnpackContext, Unpacker,
    builtins,
};
use std::sync::Arc;

pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

/// Types of a small editing host: an edit session holding tracked extents
pub struct Host {
    pub registry: TypeRegistry,
    /// Interface the change tracker looks for
    pub tracked: TypeRef,
    pub session: TypeRef,
    pub extent: TypeRef,
    pub node: TypeRef,
    pub holder: TypeRef,
}

impl Host {
    pub fn new() -> Self {
        let tracked = TypeInfo::interface("host.history.Tracked").build();
        let extent = TypeInfo::builder("host.edit.Extent")
            .implements(&tracked)
            .private_field("parent")
            .field("mask")
            .build();
        let session = TypeInfo::builder("host.edit.EditSession")
            .field("extent")
            .private_field("history")
            .static_field("defaults")
            .field("name")
            .build();
        let node = TypeInfo::builder("host.graph.Node")
            .implements(&tracked)
            .field("next")
            .field("label")
            .build();
        let holder = TypeInfo::builder("host.graph.Holder")
            .field("first")
            .field("second")
            .field("items")
            .build();
        let registry = [
            tracked.clone(),
            extent.clone(),
            session.clone(),
            node.clone(),
            holder.clone(),
        ]
        .into_iter()
        .chain(builtins::all())
        .collect();
        Host {
            registry,
            tracked,
            session,
            extent,
            node,
            holder,
        }
    }

    pub fn scanner(&self, seeds: Vec<BlacklistSeed>) -> ObjectScanner {
        self.scanner_with(seeds, ScannerOptions::default())
    }

    pub fn scanner_with(
        &self,
        seeds: Vec<BlacklistSeed>,
        options: ScannerOptions,
    ) -> ObjectScanner {
        let mut scanner = ObjectScanner::new(seeds, &self.registry).with_options(options);
        scanner.initialize();
        scanner
    }

    pub fn node(&self) -> Arc<DynObject> {
        DynObject::new(&self.node)
    }

    /// root -> a -> b -> c -> a
    pub fn cycle(&self) -> Result<(ObjectRef, Vec<ObjectRef>)> {
        let root = DynObject::new(&self.holder);
        let a = self.node();
        let b = self.node();
        let c = self.node();
        a.set("next", Some(b.clone()))?;
        b.set("next", Some(c.clone()))?;
        c.set("next", Some(a.clone()))?;
        root.set("first", Some(a.clone()))?;
        let nodes = vec![a as ObjectRef, b as ObjectRef, c as ObjectRef];
        let root: ObjectRef = root;
        Ok((root, nodes))
    }
}

pub fn ids(matches: &[ScanMatch]) -> Vec<ObjectId> {
    matches.iter().map(ScanMatch::id).collect()
}

pub fn id(value: &ObjectRef) -> ObjectId {
    ObjectId::of(value)
}

/// Hand-written host object: a region exposing its chunks as produced elements
pub struct Region {
    pub ty: TypeRef,
    pub chunks: Vec<ObjectRef>,
}

impl Region {
    pub fn region_type() -> TypeRef {
        TypeInfo::builder("host.world.Region")
            .implements(&builtins::ITERABLE)
            .build()
    }
}

impl Introspect for Region {
    fn runtime_type(&self) -> TypeRef {
        self.ty.clone()
    }

    fn read_field(&self, field: &FieldInfo) -> Result<Option<ObjectRef>> {
        Err(GraphScanError::field_not_declared(self.ty.name(), field.name()))
    }

    fn produce_elements(&self) -> Option<Result<Vec<Option<ObjectRef>>>> {
        Some(Ok(self.chunks.iter().cloned().map(Some).collect()))
    }
}

/// Host sequence whose element cursor blows up
pub struct Exploding {
    pub ty: TypeRef,
}

impl Exploding {
    pub fn exploding_type() -> TypeRef {
        TypeInfo::builder("host.native.Exploding")
            .iterable()
            .private_field("handle")
            .build()
    }
}

impl Introspect for Exploding {
    fn runtime_type(&self) -> TypeRef {
        self.ty.clone()
    }

    fn read_field(&self, _field: &FieldInfo) -> Result<Option<ObjectRef>> {
        Ok(None)
    }

    fn produce_elements(&self) -> Option<Result<Vec<Option<ObjectRef>>>> {
        panic!("native cursor released");
    }
}

/// Host object with one readable field and one whose read blows up
pub struct HalfBroken {
    pub ty: TypeRef,
    pub good: ObjectRef,
}

impl HalfBroken {
    pub fn half_broken_type() -> TypeRef {
        TypeInfo::builder("host.native.HalfBroken")
            .field("good")
            .private_field("bad")
            .build()
    }
}

impl Introspect for HalfBroken {
    fn runtime_type(&self) -> TypeRef {
        self.ty.clone()
    }

    fn read_field(&self, field: &FieldInfo) -> Result<Option<ObjectRef>> {
        match field.name() {
            "bad" => panic!("native handle {} released", field.name()),
            _ => Ok(Some(self.good.clone())),
        }
    }
}

/// Strategy failing on every node of one type
pub struct RejectingUnpacker {
    pub type_name: String,
}

impl Unpacker for RejectingUnpacker {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn can_unpack(&self, ty: &TypeInfo) -> bool {
        ty.name() == self.type_name
    }

    fn unpack(&self, _value: &ObjectRef, ty: &TypeRef, _ctx: &mut UnpackContext<'_>) -> Result<()> {
        Err(GraphScanError::unpack_failed(format!("cannot unpack {}", ty.name())))
    }
}
