//! Registry of the built-in record schemas
//!
//! Schemas are compiled into the crate. The registry collects them by
//! kind and checks each table's structure once, when it is built.

use std::collections::BTreeMap;

use super::errors::SchemaStructureError;
use super::types::RecordSchema;
use crate::records::RecordKind;

/// In-memory registry of every record schema, keyed by kind.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<RecordKind, &'static RecordSchema>,
}

impl SchemaRegistry {
    /// Builds the registry of built-in schemas.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found in any schema table.
    pub fn builtin() -> Result<Self, SchemaStructureError> {
        let mut schemas = BTreeMap::new();

        for kind in RecordKind::ALL {
            let schema = kind.schema();
            schema.validate_structure()?;
            schemas.insert(kind, schema);
        }

        Ok(Self { schemas })
    }

    /// Gets the schema for a kind.
    pub fn get(&self, kind: RecordKind) -> Option<&'static RecordSchema> {
        self.schemas.get(&kind).copied()
    }

    /// Returns all schemas in kind order.
    pub fn all_schemas(&self) -> impl Iterator<Item = &'static RecordSchema> + '_ {
        self.schemas.values().copied()
    }

    /// Returns the number of registered schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
