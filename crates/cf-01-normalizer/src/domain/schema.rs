//! # Schemas
//!
//! A schema names the entity type of a document and the fields that embed
//! other entities. Fields not listed are copied through untouched.

use shared_types::{EntityKind, ID_FIELD};

/// Shape description for one level of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// A single entity object (or an id reference to one).
    Entity(EntitySchema),
    /// A sequence whose items follow the inner schema.
    Array(Box<Schema>),
}

impl Schema {
    /// Wrap a schema so it describes a sequence of items.
    #[must_use]
    pub fn array_of(item: Schema) -> Self {
        Self::Array(Box::new(item))
    }
}

/// An entity type and its nested entity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    key: String,
    id_field: String,
    nested: Vec<(String, Schema)>,
}

impl EntitySchema {
    /// An entity type stored under `key`, identified by `id`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id_field: ID_FIELD.to_string(),
            nested: Vec::new(),
        }
    }

    /// Declare `field` as embedding entities of `schema`.
    #[must_use]
    pub fn nested(mut self, field: impl Into<String>, schema: Schema) -> Self {
        self.nested.push((field.into(), schema));
        self
    }

    /// Key under which records of this type are collected.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the identifier field.
    #[must_use]
    pub fn id_field_name(&self) -> &str {
        &self.id_field
    }

    /// Nested entity fields in declaration order.
    pub fn nested_fields(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.nested.iter().map(|(field, schema)| (field.as_str(), schema))
    }
}

impl From<EntitySchema> for Schema {
    fn from(entity: EntitySchema) -> Self {
        Self::Entity(entity)
    }
}

/// A case with its `asset` and `serviceProvider` embedded.
#[must_use]
pub fn case_schema() -> Schema {
    EntitySchema::new(EntityKind::Case.key())
        .nested(
            EntityKind::Asset.key(),
            EntitySchema::new(EntityKind::Asset.key()).into(),
        )
        .nested(
            EntityKind::ServiceProvider.key(),
            EntitySchema::new(EntityKind::ServiceProvider.key()).into(),
        )
        .into()
}

/// A case list.
#[must_use]
pub fn cases_schema() -> Schema {
    Schema::array_of(case_schema())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_schema_declares_foreign_keys() {
        let Schema::Entity(case) = case_schema() else {
            panic!("case schema must be an entity");
        };
        assert_eq!(case.key(), "case");
        assert_eq!(case.id_field_name(), "id");
        let fields: Vec<_> = case.nested_fields().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["asset", "serviceProvider"]);
    }

    #[test]
    fn test_cases_schema_is_array_of_case() {
        assert_eq!(cases_schema(), Schema::Array(Box::new(case_schema())));
    }
}
