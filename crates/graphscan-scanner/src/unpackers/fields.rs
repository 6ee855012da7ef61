use crate::model::{FieldInfo, ObjectRef, TypeInfo, TypeRef};
use crate::unpackers::{AccessOverride, UnpackContext, Unpacker, panic_message};
use graphscan_error::{GraphScanError, Result};
use log::trace;
use std::panic::{self, AssertUnwindSafe};

/// Reads every field of the node's type and its ancestors.
///
/// Each read happens under an `AccessOverride`. A failed or panicking read is
/// recorded against the node and the remaining fields are still read.
pub struct FieldUnpacker;

impl Unpacker for FieldUnpacker {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn can_unpack(&self, _ty: &TypeInfo) -> bool {
        true
    }

    fn unpack(&self, value: &ObjectRef, ty: &TypeRef, ctx: &mut UnpackContext<'_>) -> Result<()> {
        for field in ty.all_fields() {
            let read = {
                let _access = AccessOverride::open(&field);
                read_field(value, &field, ctx.catches_panics())
            };
            match read {
                Ok(Some(child)) => {
                    ctx.push(child, Some(&field));
                }
                Ok(None) => {}
                Err(error) => {
                    trace!("Failed to read {}.{}: {error}", field.owner(), field.name());
                    ctx.record_field_error(format!("Unpack field '{}'", field.name()), error);
                }
            }
        }
        Ok(())
    }
}

fn read_field(
    value: &ObjectRef,
    field: &FieldInfo,
    catch_panics: bool,
) -> Result<Option<ObjectRef>> {
    if !catch_panics {
        return value.read_field(field);
    }
    panic::catch_unwind(AssertUnwindSafe(|| value.read_field(field))).unwrap_or_else(|payload| {
        Err(GraphScanError::field_host_failure(panic_message(payload.as_ref()))
            .with_type_name(field.owner())
            .with_field_name(field.name()))
    })
}
