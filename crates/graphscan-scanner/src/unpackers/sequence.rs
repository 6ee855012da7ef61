use crate::model::{ObjectRef, TypeInfo, TypeRef};
use crate::unpackers::{UnpackContext, Unpacker};
use graphscan_error::Result;

/// Yields the non-null elements of objects that produce elements
pub struct SequenceUnpacker;

impl Unpacker for SequenceUnpacker {
    fn name(&self) -> &'static str {
        "sequence"
    }

    // whether a value iterates is only known by asking it
    fn can_unpack(&self, _ty: &TypeInfo) -> bool {
        true
    }

    fn unpack(&self, value: &ObjectRef, ty: &TypeRef, ctx: &mut UnpackContext<'_>) -> Result<()> {
        let Some(produced) = value.produce_elements() else {
            return Ok(());
        };
        let elements =
            produced.map_err(|e| e.with_type_name(ty.name()).with_unpacker(self.name()))?;
        for element in elements.into_iter().flatten() {
            ctx.push(element, None);
        }
        Ok(())
    }
}
