//! Schema-keyed rule registry and its setup builders.
//!
//! A registry is built once by the composition root (directly, through
//! [`RegistryBuilder`], or from a config rule table) and then only read.
//! Field and schema order is insertion order; the validator walks it as-is.

use crate::{FieldName, RuleKind, SchemaId};
use indexmap::IndexMap;
use serde::Serialize;

/// Rules attached to the fields of one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldRules {
    fields: IndexMap<FieldName, Vec<RuleKind>>,
}

impl FieldRules {
    /// Rules registered for `field`, in registration order.
    #[must_use]
    pub fn rules(&self, field: &FieldName) -> Option<&[RuleKind]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterate fields and their rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &[RuleKind])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field, rules.as_slice()))
    }

    /// Number of fields with at least one rule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field has a rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn push(&mut self, field: FieldName, rule: RuleKind) {
        self.fields.entry(field).or_default().push(rule);
    }
}

/// Mapping from schema identity to per-field rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleRegistry {
    schemas: IndexMap<SchemaId, FieldRules>,
}

impl RuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` to the rules of `schema.field`.
    ///
    /// Missing schema and field entries are created. Registering the same
    /// triple again appends a duplicate, which never changes a verdict.
    pub fn register(&mut self, schema: SchemaId, field: FieldName, rule: RuleKind) {
        tracing::debug!(
            schema = %schema,
            field = %field,
            rule = %rule,
            "registered field rule"
        );
        self.schemas.entry(schema).or_default().push(field, rule);
    }

    /// Field rules registered for `schema`.
    #[must_use]
    pub fn rules_for(&self, schema: &SchemaId) -> Option<&FieldRules> {
        self.schemas.get(schema)
    }

    /// Iterate schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = (&SchemaId, &FieldRules)> {
        self.schemas.iter()
    }

    /// Number of schemas with at least one registered field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Fluent setup API that registers rules in declaration order.
///
/// ```
/// use field_rules_domain::{FieldName, RegistryBuilder, RuleKind, SchemaId};
///
/// let registry = RegistryBuilder::new()
///     .schema(SchemaId::from_static("Course"), |course| {
///         course
///             .field(FieldName::from_static("title"), [RuleKind::Required])
///             .field(
///                 FieldName::from_static("price"),
///                 [RuleKind::Required, RuleKind::PositiveNumber],
///             )
///     })
///     .build();
///
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: RuleRegistry,
}

impl RegistryBuilder {
    /// Start from an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the fields of one schema.
    #[must_use]
    pub fn schema(
        self,
        schema: SchemaId,
        declare: impl FnOnce(SchemaBuilder) -> SchemaBuilder,
    ) -> Self {
        let scoped = SchemaBuilder {
            schema,
            registry: self.registry,
        };
        Self {
            registry: declare(scoped).registry,
        }
    }

    /// Finish setup.
    #[must_use]
    pub fn build(self) -> RuleRegistry {
        self.registry
    }
}

/// Field declarations scoped to a single schema.
#[derive(Debug)]
pub struct SchemaBuilder {
    schema: SchemaId,
    registry: RuleRegistry,
}

impl SchemaBuilder {
    /// Register each rule in `rules` for `field`.
    #[must_use]
    pub fn field(mut self, field: FieldName, rules: impl IntoIterator<Item = RuleKind>) -> Self {
        for rule in rules {
            self.registry
                .register(self.schema.clone(), field.clone(), rule);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE: SchemaId = SchemaId::from_static("Course");
    const TITLE: FieldName = FieldName::from_static("title");
    const PRICE: FieldName = FieldName::from_static("price");

    #[test]
    fn register_creates_intermediate_entries() {
        let mut registry = RuleRegistry::new();
        assert!(registry.is_empty());

        registry.register(COURSE, PRICE, RuleKind::Required);
        registry.register(COURSE, PRICE, RuleKind::PositiveNumber);

        let fields = registry.rules_for(&COURSE);
        assert_eq!(
            fields.and_then(|fields| fields.rules(&PRICE)),
            Some([RuleKind::Required, RuleKind::PositiveNumber].as_slice())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut registry = RuleRegistry::new();
        registry.register(COURSE, TITLE, RuleKind::Required);
        registry.register(COURSE, TITLE, RuleKind::Required);

        let rules = registry
            .rules_for(&COURSE)
            .and_then(|fields| fields.rules(&TITLE))
            .map(<[RuleKind]>::len);
        assert_eq!(rules, Some(2));
    }

    #[test]
    fn field_order_is_registration_order() {
        let registry = RegistryBuilder::new()
            .schema(COURSE, |course| {
                course
                    .field(PRICE, [RuleKind::PositiveNumber])
                    .field(TITLE, [RuleKind::Required])
                    .field(PRICE, [RuleKind::Required])
            })
            .build();

        let order: Vec<&str> = registry
            .rules_for(&COURSE)
            .map(|fields| fields.iter().map(|(field, _)| field.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(order, ["price", "title"]);
    }

    #[test]
    fn builder_matches_direct_registration() {
        let mut direct = RuleRegistry::new();
        direct.register(COURSE, TITLE, RuleKind::Required);
        direct.register(COURSE, PRICE, RuleKind::Required);
        direct.register(COURSE, PRICE, RuleKind::PositiveNumber);

        let built = RegistryBuilder::new()
            .schema(COURSE, |course| {
                course.field(TITLE, [RuleKind::Required]).field(
                    PRICE,
                    [RuleKind::Required, RuleKind::PositiveNumber],
                )
            })
            .build();

        assert_eq!(direct, built);
    }

    #[test]
    fn registry_serializes_as_nested_tags() -> Result<(), serde_json::Error> {
        let mut registry = RuleRegistry::new();
        registry.register(COURSE, PRICE, RuleKind::PositiveNumber);

        let value = serde_json::to_value(&registry)?;
        assert_eq!(value, serde_json::json!({ "Course": { "price": ["positive"] } }));
        Ok(())
    }
}
