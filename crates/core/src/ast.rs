//! Typed AST for parsed UI schema documents.
//!
//! These types are produced by the parser and consumed by renderers,
//! schema transformers, and static analyzers. They live here so that the
//! walker and downstream consumers can import them without depending on
//! the parser.
//!
//! Serialization preserves the wire field names (`type`, `scope`,
//! `expectedValue`, `failWhenUndefined`, ...) and omits fields that were
//! absent on input, so a parse → serialize round trip is stable. There is
//! deliberately no `Deserialize` derive: deserialization goes through the
//! parser, which enforces required fields and the custom-element fallback.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

// ── Rule effects ────────────────────────────────────────────────────

/// Effect strings known to renderers. `Rule::effect` is stored verbatim
/// and is not restricted to this set.
pub const EFFECT_HIDE: &str = "HIDE";
pub const EFFECT_SHOW: &str = "SHOW";
pub const EFFECT_ENABLE: &str = "ENABLE";
pub const EFFECT_DISABLE: &str = "DISABLE";

// ── AST root ────────────────────────────────────────────────────────

/// Complete parsed form definition: the typed layout tree plus the data
/// schema carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ast {
    pub uischema: UiSchemaElement,
    /// Decoded data schema, opaque to this crate. `None` when no data
    /// schema text was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

// ── Elements ────────────────────────────────────────────────────────

/// A single UI schema element, dispatched by its `type` discriminator.
///
/// The set is closed: any discriminator outside the seven standard kinds
/// parses into [`CustomElement`], which keeps the original object verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UiSchemaElement {
    Control(Control),
    VerticalLayout(VerticalLayout),
    HorizontalLayout(HorizontalLayout),
    Group(Group),
    Categorization(Categorization),
    Category(Category),
    Label(LabelElement),
    Custom(CustomElement),
}

impl UiSchemaElement {
    fn base(&self) -> &ElementBase {
        match self {
            UiSchemaElement::Control(e) => &e.base,
            UiSchemaElement::VerticalLayout(e) => &e.base,
            UiSchemaElement::HorizontalLayout(e) => &e.base,
            UiSchemaElement::Group(e) => &e.base,
            UiSchemaElement::Categorization(e) => &e.base,
            UiSchemaElement::Category(e) => &e.base,
            UiSchemaElement::Label(e) => &e.base,
            UiSchemaElement::Custom(e) => &e.base,
        }
    }

    /// The element's `type` discriminator as it appeared in the source.
    /// For custom elements this is the unrecognized discriminator itself.
    pub fn element_type(&self) -> &str {
        &self.base().element_type
    }

    /// The conditional-visibility rule attached to this element, if any.
    pub fn rule(&self) -> Option<&Rule> {
        self.base().rule.as_ref()
    }

    /// Renderer options carried through uninterpreted, if any.
    pub fn options(&self) -> Option<&Map<String, Value>> {
        self.base().options.as_ref()
    }

    /// Internationalization key, if any.
    pub fn i18n(&self) -> Option<&str> {
        self.base().i18n.as_deref()
    }
}

/// Fields shared by every UI schema element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementBase {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n: Option<String>,
}

/// Binds a UI input to a data property addressed by a JSON Pointer scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    #[serde(flatten)]
    pub base: ElementBase,
    pub scope: String,
    /// Label kept opaque: the source may supply a string, a bool, or a
    /// descriptor object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
}

/// Stacks child elements vertically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalLayout {
    #[serde(flatten)]
    pub base: ElementBase,
    pub elements: Vec<UiSchemaElement>,
}

/// Arranges child elements side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalLayout {
    #[serde(flatten)]
    pub base: ElementBase,
    pub elements: Vec<UiSchemaElement>,
}

/// A labelled vertical grouping of child elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    #[serde(flatten)]
    pub base: ElementBase,
    pub label: String,
    pub elements: Vec<UiSchemaElement>,
}

/// Tab-like organization of related sections. Children are restricted to
/// [`Category`] and nested [`Categorization`]; any other parsed child kind
/// is dropped from the sequence without error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Categorization {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub elements: Vec<CategoryElement>,
}

/// The restricted child set of a [`Categorization`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryElement {
    Category(Category),
    Categorization(Categorization),
}

/// An individual tab within a [`Categorization`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: ElementBase,
    pub label: String,
    pub elements: Vec<UiSchemaElement>,
}

/// Static text displayed in the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub text: String,
}

/// Fallback for any discriminator outside the standard set.
///
/// `raw` holds the complete original object, every key unchanged. When the
/// source had an `elements` field that parsed cleanly, `elements` holds the
/// recursively parsed children; when child parsing fails the element is
/// still returned with `raw` intact and no children.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomElement {
    pub base: ElementBase,
    pub raw: Map<String, Value>,
    pub elements: Vec<UiSchemaElement>,
}

impl Serialize for CustomElement {
    /// Custom elements re-serialize as their original object, byte-for-byte
    /// equivalent modulo JSON formatting.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

// ── Rules and conditions ────────────────────────────────────────────

/// Conditional-visibility directive attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Stored as given; see the `EFFECT_*` constants for the known values.
    pub effect: String,
    pub condition: Condition,
}

/// A condition expression, dispatched by its optional `type` discriminator.
/// This crate parses conditions; evaluating them against form data is the
/// renderer's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Condition {
    SchemaBased(SchemaBasedCondition),
    Leaf(LeafCondition),
    And(AndCondition),
    Or(OrCondition),
}

impl Condition {
    /// Discriminator string of the condition, with the SCHEMA_BASED default
    /// applied for conditions parsed without an explicit `type`.
    pub fn type_name(&self) -> &str {
        match self {
            Condition::SchemaBased(c) => c.type_name(),
            Condition::Leaf(_) => "LEAF",
            Condition::And(_) => "AND",
            Condition::Or(_) => "OR",
        }
    }
}

/// Validates a scope against a JSON Schema fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaBasedCondition {
    /// `type` as it appeared in the source; absent when the source relied
    /// on the SCHEMA_BASED default.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub condition_type: Option<String>,
    pub scope: String,
    /// Opaque schema fragment. May be any JSON value, including null.
    pub schema: Value,
    #[serde(rename = "failWhenUndefined", skip_serializing_if = "Option::is_none")]
    pub fail_when_undefined: Option<bool>,
}

impl SchemaBasedCondition {
    pub fn type_name(&self) -> &str {
        match self.condition_type.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "SCHEMA_BASED",
        }
    }
}

/// Simple value comparison against the data at `scope`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafCondition {
    pub scope: String,
    pub expected_value: Value,
}

impl Serialize for LeafCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "LEAF")?;
        map.serialize_entry("scope", &self.scope)?;
        map.serialize_entry("expectedValue", &self.expected_value)?;
        map.end()
    }
}

/// Conjunction of nested conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct AndCondition {
    pub conditions: Vec<Condition>,
}

impl Serialize for AndCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "AND")?;
        map.serialize_entry("conditions", &self.conditions)?;
        map.end()
    }
}

/// Disjunction of nested conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrCondition {
    pub conditions: Vec<Condition>,
}

impl Serialize for OrCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "OR")?;
        map.serialize_entry("conditions", &self.conditions)?;
        map.end()
    }
}
