//! Boilerplate for the common `EntityRecord` shape.

/// Implement `EntityRecord` for a record with `id` and `status` fields;
/// pass `sequence` for records that also carry an ordering number.
macro_rules! impl_entity_record {
    ($ty:ty, $entity:literal) => {
        impl milladmin_core::EntityRecord for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> milladmin_core::EntityId {
                self.id
            }

            fn is_active(&self) -> bool {
                self.status
            }

            fn set_active(&mut self, active: bool) {
                self.status = active;
            }
        }
    };
    ($ty:ty, $entity:literal, sequence) => {
        impl milladmin_core::EntityRecord for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> milladmin_core::EntityId {
                self.id
            }

            fn is_active(&self) -> bool {
                self.status
            }

            fn set_active(&mut self, active: bool) {
                self.status = active;
            }

            fn sequence(&self) -> Option<i64> {
                self.sequence
            }
        }
    };
}

pub(crate) use impl_entity_record;
