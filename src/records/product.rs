//! Product record
//!
//! Collection name: "product"

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

use super::{Record, RecordKind};
use crate::schema::{
    Constraint, FieldDef, FieldError, FieldType, FieldValue, RecordSchema, ValidatedFields,
    ValidationFailure,
};

static PRODUCT_SCHEMA: OnceLock<RecordSchema> = OnceLock::new();

/// A validated product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    title: String,
    description: Option<String>,
    price: f64,
    category: String,
    in_stock: bool,
}

impl Product {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Price in dollars, never negative
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

impl Record for Product {
    const KIND: RecordKind = RecordKind::Product;

    fn schema() -> &'static RecordSchema {
        PRODUCT_SCHEMA.get_or_init(|| {
            RecordSchema::new(
                RecordKind::Product,
                "Products collection schema",
                vec![
                    FieldDef::required("title", FieldType::Text).describe("Product title"),
                    FieldDef::optional("description", FieldType::Text)
                        .describe("Product description"),
                    FieldDef::required("price", FieldType::Decimal)
                        .constrain(Constraint::Ge(0.0))
                        .describe("Price in dollars"),
                    FieldDef::required("category", FieldType::Text).describe("Product category"),
                    FieldDef::with_default("in_stock", FieldValue::Boolean(true))
                        .describe("Whether product is in stock"),
                ],
            )
        })
    }

    fn from_fields(mut fields: ValidatedFields) -> Result<Self, FieldError> {
        Ok(Self {
            title: fields.text("title")?,
            description: fields.optional_text("description")?,
            price: fields.decimal("price")?,
            category: fields.text("category")?,
            in_stock: fields.boolean("in_stock")?,
        })
    }
}

impl TryFrom<&Value> for Product {
    type Error = ValidationFailure;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        Product::validate(raw)
    }
}
