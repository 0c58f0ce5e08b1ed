//! Per-entity field tables
//!
//! `resource!` expands a flat field list into the entity, its DTO, the
//! mapper between them and the Postgres table binding. Every field is
//! optional on both sides so that mapping stays total and a DTO can act as
//! a partial patch.

/// Declare a flat resource (no nested relations).
///
/// ```ignore
/// crate::resource! {
///     /// A thing.
///     entity Thing;
///     dto ThingDto;
///     mapper ThingMapper;
///     name "thing";
///     table "things";
///     fields {
///         label: String,
///         amount: i64,
///     }
/// }
/// ```
#[macro_export]
macro_rules! resource {
    (
        $(#[$meta:meta])*
        entity $entity:ident;
        dto $dto:ident;
        mapper $mapper:ident;
        name $name:literal;
        table $table:literal;
        fields {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::sqlx::FromRow)]
        pub struct $entity {
            pub id: Option<i64>,
            $( pub $field: Option<$ty>, )+
        }

        #[doc = concat!("Transport shape of [`", stringify!($entity), "`].")]
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $dto {
            pub id: Option<i64>,
            $( $(#[$field_meta])* pub $field: Option<$ty>, )+
        }

        #[doc = concat!("Maps [`", stringify!($entity), "`] to and from [`", stringify!($dto), "`].")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $mapper;

        impl $crate::crud::Record for $entity {
            const NAME: &'static str = $name;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: Option<i64>) {
                self.id = id;
            }
        }

        impl $crate::crud::Mapper for $mapper {
            type Entity = $entity;
            type Dto = $dto;

            fn dto(entity: &$entity) -> $dto {
                $dto {
                    id: entity.id,
                    $( $field: entity.$field.clone(), )+
                }
            }

            fn entity(dto: &$dto) -> $entity {
                $entity {
                    id: dto.id,
                    $( $field: dto.$field.clone(), )+
                }
            }

            fn patch(dto: &$dto, target: &mut $entity) {
                $(
                    if let Some(value) = &dto.$field {
                        target.$field = Some(value.clone());
                    }
                )+
            }
        }

        impl $crate::crud::Table for $entity {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[$( stringify!($field) ),+];

            fn bind_columns<'q>(
                &self,
                query: $crate::crud::postgres::PgQuery<'q>,
            ) -> $crate::crud::postgres::PgQuery<'q> {
                query $( .bind(self.$field.clone()) )+
            }
        }
    };
}
