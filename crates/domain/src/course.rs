//! `Course`: the typed record behind the course submission form.

use crate::{
    DomainError, FieldName, FieldValue, RuleKind, RuleRegistry, SchemaBuilder, SchemaId,
    ValidationSubject,
};

static COURSE_SCHEMA: SchemaId = SchemaId::from_static("Course");

/// A course offering entered through the submission form.
///
/// Construction accepts any values; the registry-driven validator decides
/// whether a course is acceptable. [`Course::set_price`] is a separate,
/// stricter path for direct updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    title: String,
    price: f64,
}

impl Course {
    /// `title` field name.
    pub const TITLE: FieldName = FieldName::from_static("title");
    /// `price` field name.
    pub const PRICE: FieldName = FieldName::from_static("price");

    /// Create a course without checking its values.
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
        }
    }

    /// Schema id under which course rules are registered.
    #[must_use]
    pub fn schema() -> &'static SchemaId {
        &COURSE_SCHEMA
    }

    /// Register the course field rules: `title` is required, `price` is
    /// required and positive.
    pub fn declare(registry: &mut RuleRegistry) {
        registry.register(Self::schema().clone(), Self::TITLE, RuleKind::Required);
        registry.register(Self::schema().clone(), Self::PRICE, RuleKind::Required);
        registry.register(Self::schema().clone(), Self::PRICE, RuleKind::PositiveNumber);
    }

    /// Same declarations as [`Course::declare`], for use inside
    /// [`crate::RegistryBuilder::schema`].
    #[must_use]
    pub fn declare_fields(fields: SchemaBuilder) -> SchemaBuilder {
        fields
            .field(Self::TITLE, [RuleKind::Required])
            .field(Self::PRICE, [RuleKind::Required, RuleKind::PositiveNumber])
    }

    /// Course title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Course price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the price, rejecting values that are not strictly positive.
    pub fn set_price(&mut self, price: f64) -> Result<(), DomainError> {
        if price > 0.0 {
            self.price = price;
            Ok(())
        } else {
            Err(DomainError::NonPositivePrice { value: price })
        }
    }
}

impl ValidationSubject for Course {
    fn schema_id(&self) -> &SchemaId {
        Self::schema()
    }

    fn field(&self, field: &FieldName) -> FieldValue {
        match field.as_str() {
            "title" => FieldValue::Text(self.title.clone()),
            "price" => FieldValue::Number(self.price),
            _ => FieldValue::Undefined,
        }
    }
}
