//! # Normalization
//!
//! Depth-first walk over a document. Every object found where the schema
//! declares an entity is flattened into `entities[key][id]` and replaced
//! in its parent by its id. Id references (strings, integers) are left as
//! they are, which makes normalizing normalized output a no-op.

use serde_json::{Map, Value};
use shared_types::{id_from_value, merge_record, NormalizedData, NormalizedResult};
use tracing::trace;

use crate::domain::errors::NormalizeError;
use crate::domain::schema::{EntitySchema, Schema};

/// Normalize `document` against `schema`.
///
/// A `null` document yields an empty result. Duplicate ids within one
/// document are merged field by field, later fields winning.
///
/// # Errors
///
/// [`NormalizeError`] when an embedded entity has no id or a value has
/// the wrong shape for its schema.
pub fn normalize(document: &Value, schema: &Schema) -> Result<NormalizedData, NormalizeError> {
    let mut out = NormalizedData::default();

    if document.is_null() {
        return Ok(out);
    }

    let mut walker = Walker { out: &mut out };
    let result = match schema {
        Schema::Entity(entity) => {
            let reference = walker.visit_entity(document, entity, "$")?;
            NormalizedResult::Single(top_level_id(&reference, entity, "$")?)
        }
        Schema::Array(item) => {
            let items = document
                .as_array()
                .ok_or_else(|| mismatch("$", "array", document))?;
            let mut ids = Vec::with_capacity(items.len());
            for (index, value) in items.iter().enumerate() {
                let path = format!("$[{index}]");
                let reference = walker.visit(value, item, &path)?;
                match item.as_ref() {
                    Schema::Entity(entity) => ids.push(top_level_id(&reference, entity, &path)?),
                    Schema::Array(_) => return Err(mismatch(&path, "entity", value)),
                }
            }
            NormalizedResult::Many(ids)
        }
    };
    out.result = result;

    trace!(
        types = out.entities.len(),
        records = out.entities.values().map(|m| m.len()).sum::<usize>(),
        "normalized document"
    );
    Ok(out)
}

struct Walker<'a> {
    out: &'a mut NormalizedData,
}

impl Walker<'_> {
    fn visit(&mut self, value: &Value, schema: &Schema, path: &str) -> Result<Value, NormalizeError> {
        match schema {
            Schema::Entity(entity) => self.visit_entity(value, entity, path),
            Schema::Array(item) => match value {
                Value::Null => Ok(Value::Null),
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(index, v)| self.visit(v, item, &format!("{path}[{index}]")))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                other => Err(mismatch(path, "array", other)),
            },
        }
    }

    /// Returns the value that replaces `value` in its parent.
    fn visit_entity(
        &mut self,
        value: &Value,
        schema: &EntitySchema,
        path: &str,
    ) -> Result<Value, NormalizeError> {
        let object = match value {
            Value::Object(object) => object,
            Value::Array(_) => return Err(mismatch(path, "entity", value)),
            // Already an id reference, or absent.
            other => return Ok(other.clone()),
        };

        let id_value = object
            .get(schema.id_field_name())
            .cloned()
            .unwrap_or(Value::Null);
        let id = id_from_value(&id_value).ok_or_else(|| NormalizeError::MissingId {
            entity: schema.key().to_string(),
            path: path.to_string(),
        })?;

        let mut flat: Map<String, Value> = object.clone();
        for (field, nested) in schema.nested_fields() {
            if let Some(child) = object.get(field) {
                let replaced = self.visit(child, nested, &format!("{path}.{field}"))?;
                flat.insert(field.to_string(), replaced);
            }
        }

        let record = self
            .out
            .entities
            .entry(schema.key().to_string())
            .or_default()
            .entry(id)
            .or_default();
        merge_record(record, &flat);

        Ok(id_value)
    }
}

fn top_level_id(
    reference: &Value,
    schema: &EntitySchema,
    path: &str,
) -> Result<String, NormalizeError> {
    id_from_value(reference).ok_or_else(|| NormalizeError::MissingId {
        entity: schema.key().to_string(),
        path: path.to_string(),
    })
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> NormalizeError {
    NormalizeError::ShapeMismatch {
        path: path.to_string(),
        expected,
        found: json_type(found),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
