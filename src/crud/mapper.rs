//! Entity <-> DTO conversion
//!
//! Implementors supply the three field-level primitives; the optional-aware
//! conversions and the merge used by partial updates are provided.

use super::Record;

pub trait Mapper: Send + Sync + 'static {
    type Entity: Record;
    type Dto: Clone + Send + Sync + 'static;

    /// Copy every field of `entity` into a fresh DTO.
    fn dto(entity: &Self::Entity) -> Self::Dto;

    /// Copy every field of `dto` into a fresh entity.
    fn entity(dto: &Self::Dto) -> Self::Entity;

    /// Overwrite the fields of `target` that are present in `dto`.
    fn patch(dto: &Self::Dto, target: &mut Self::Entity);

    fn to_dto(entity: Option<&Self::Entity>) -> Option<Self::Dto> {
        entity.map(Self::dto)
    }

    fn to_entity(dto: Option<&Self::Dto>) -> Option<Self::Entity> {
        dto.map(Self::entity)
    }

    fn to_dto_list(entities: Option<&[Self::Entity]>) -> Option<Vec<Self::Dto>> {
        entities.map(|entities| entities.iter().map(Self::dto).collect())
    }

    /// Merge a partial DTO into an existing entity.
    ///
    /// Fields absent from `dto` keep their existing values and the result
    /// always carries the id of `existing`. A `None` patch yields a copy of
    /// `existing`.
    fn merge_to_entity(dto: Option<&Self::Dto>, existing: &Self::Entity) -> Self::Entity {
        let mut merged = existing.clone();
        if let Some(dto) = dto {
            Self::patch(dto, &mut merged);
            merged.set_id(existing.id());
        }
        merged
    }
}
