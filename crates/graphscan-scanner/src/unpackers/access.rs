use crate::model::{FieldInfo, Visibility};

/// Scoped read permission for a non-public field.
///
/// Opening the guard on a private field raises its override count; dropping
/// it lowers the count again, on normal exit and during unwinding alike.
/// Public fields need no override and sealed fields refuse one, so for
/// those the guard does nothing.
pub struct AccessOverride<'a> {
    field: &'a FieldInfo,
    opened: bool,
}

impl<'a> AccessOverride<'a> {
    pub fn open(field: &'a FieldInfo) -> Self {
        let opened = field.visibility() == Visibility::Private;
        if opened {
            field.open_override();
        }
        Self { field, opened }
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }
}

impl Drop for AccessOverride<'_> {
    fn drop(&mut self) {
        if self.opened {
            self.field.close_override();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeInfo;
    use std::panic;

    #[test]
    fn test_guard_restores_on_drop() {
        let ty = TypeInfo::builder("host.T").private_field("p").build();
        let field = ty.find_field("p").unwrap();
        {
            let guard = AccessOverride::open(field);
            assert!(guard.is_open());
            assert!(field.is_accessible());
        }
        assert!(!field.is_accessible());
    }

    #[test]
    fn test_guard_restores_on_unwind() {
        let ty = TypeInfo::builder("host.T").private_field("p").build();
        let field = ty.find_field("p").unwrap().clone();
        let inner = field.clone();
        let result: std::thread::Result<()> = panic::catch_unwind(move || {
            let _guard = AccessOverride::open(&inner);
            panic!("host read failed");
        });
        assert!(result.is_err());
        assert_eq!(field.override_count(), 0);
    }

    #[test]
    fn test_sealed_field_is_never_opened() {
        let ty = TypeInfo::builder("host.T").sealed_field("s").build();
        let field = ty.find_field("s").unwrap();
        let guard = AccessOverride::open(field);
        assert!(!guard.is_open());
        assert!(!field.is_accessible());
    }
}
