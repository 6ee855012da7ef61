use crate::model::{ObjectRef, TypeInfo, TypeRef};
use crate::unpackers::{UnpackContext, Unpacker};
use graphscan_error::{GraphScanError, Result};
use log::trace;

/// Yields the non-null elements of arrays whose innermost element type is
/// neither a value type nor blacklisted
pub struct ArrayUnpacker;

impl Unpacker for ArrayUnpacker {
    fn name(&self) -> &'static str {
        "array"
    }

    fn can_unpack(&self, ty: &TypeInfo) -> bool {
        ty.is_array()
    }

    fn unpack(&self, value: &ObjectRef, ty: &TypeRef, ctx: &mut UnpackContext<'_>) -> Result<()> {
        let Some(innermost) = ty.innermost_element() else {
            return Ok(());
        };
        if innermost.is_value_type() || ctx.filters().is_blacklisted(innermost, None) {
            trace!("Not unpacking {} elements", innermost.name());
            return Ok(());
        }

        let elements = value.array_elements().ok_or_else(|| {
            GraphScanError::unpack_elements_unavailable("array object exposes no elements")
                .with_type_name(ty.name())
                .with_unpacker(self.name())
        })?;
        for element in elements.into_iter().flatten() {
            ctx.push(element, None);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Blacklist, BlacklistEntry, FilterChain};
    use crate::model::{DynObject, builtins};

    #[test]
    fn test_yields_non_null_elements() {
        let item = TypeInfo::builder("host.Item").build();
        let array_ty = TypeInfo::array_of(&item);
        let a: ObjectRef = DynObject::new(&item);
        let b: ObjectRef = DynObject::new(&item);
        let array: ObjectRef = DynObject::with_elements(&array_ty, vec![Some(a), None, Some(b)]);

        let chain = FilterChain::default();
        let mut ctx = UnpackContext::new(&chain);
        ArrayUnpacker.unpack(&array, &array_ty, &mut ctx).unwrap();
        assert_eq!(ctx.candidates().len(), 2);
        assert!(ctx.candidates().iter().all(|c| c.field.is_none()));
    }

    #[test]
    fn test_skips_value_and_blacklisted_elements() {
        let numbers_ty = TypeInfo::array_of(&TypeInfo::array_of(&builtins::INTEGER));
        let numbers: ObjectRef =
            DynObject::with_elements(&numbers_ty, vec![Some(DynObject::integer(1))]);
        let chain = FilterChain::default();
        let mut ctx = UnpackContext::new(&chain);
        ArrayUnpacker.unpack(&numbers, &numbers_ty, &mut ctx).unwrap();
        assert!(ctx.candidates().is_empty());

        let hidden = TypeInfo::builder("host.Hidden").build();
        let hidden_ty = TypeInfo::array_of(&hidden);
        let hidden_array: ObjectRef =
            DynObject::with_elements(&hidden_ty, vec![Some(DynObject::new(&hidden) as ObjectRef)]);
        let mut chain = FilterChain::default();
        chain.set_blacklist(Blacklist::new(vec![BlacklistEntry::ExactType(hidden)]));
        let mut ctx = UnpackContext::new(&chain);
        ArrayUnpacker.unpack(&hidden_array, &hidden_ty, &mut ctx).unwrap();
        assert!(ctx.candidates().is_empty());
    }
}
