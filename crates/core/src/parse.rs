//! Recursive descent parser from decoded JSON values to the typed AST.
//!
//! The main entry point is [`parse`], which takes the UI schema text and
//! the (possibly empty) data schema text and produces an [`Ast`]. The
//! per-element workhorse is [`parse_element`], which dispatches on the
//! `type` discriminator. Unknown discriminators fall back to
//! [`CustomElement`] instead of failing, preserving the original object
//! for forward compatibility.

use serde_json::{Map, Value};

use crate::ast::{
    Ast, Categorization, Category, CategoryElement, Control, CustomElement, ElementBase, Group,
    HorizontalLayout, LabelElement, UiSchemaElement, VerticalLayout,
};
use crate::error::ParseError;
use crate::rule::parse_rule;

/// Maximum element/condition nesting depth accepted by the parser.
///
/// Nesting depth is attacker-controllable when the document is untrusted;
/// the explicit limit turns a potential stack overflow into a
/// [`ParseError::NestingTooDeep`].
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse a UI schema document and an optional data schema document.
///
/// The data schema is decoded but otherwise carried through opaquely; an
/// empty `schema_json` yields `schema: None`, not an error. Malformed
/// text in either document fails with a decode-kind error, distinct from
/// the structural errors raised on well-formed but invalid documents.
pub fn parse(uischema_json: &str, schema_json: &str) -> Result<Ast, ParseError> {
    let uischema =
        parse_uischema(uischema_json).map_err(|e| ParseError::UiSchema(Box::new(e)))?;

    let schema = if schema_json.is_empty() {
        None
    } else {
        Some(serde_json::from_str(schema_json).map_err(ParseError::DataSchema)?)
    };

    Ok(Ast { uischema, schema })
}

fn parse_uischema(text: &str) -> Result<UiSchemaElement, ParseError> {
    let value: Value = serde_json::from_str(text).map_err(|source| ParseError::Json { source })?;
    parse_element(&value)
}

/// Classify and construct a single element from a decoded JSON value.
pub fn parse_element(value: &Value) -> Result<UiSchemaElement, ParseError> {
    parse_element_at(value, 0)
}

fn parse_element_at(value: &Value, depth: usize) -> Result<UiSchemaElement, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    let obj = value.as_object().ok_or(ParseError::NotAnObject)?;

    // The discriminator check comes before any variant-specific validation.
    let element_type = match obj.get("type").and_then(Value::as_str) {
        Some(t) => t,
        None => return Err(ParseError::MissingType),
    };

    let base = parse_base(obj, element_type, depth)?;

    match element_type {
        "Control" => parse_control(obj, base).map(UiSchemaElement::Control),
        "VerticalLayout" => parse_vertical_layout(obj, base, depth).map(UiSchemaElement::VerticalLayout),
        "HorizontalLayout" => {
            parse_horizontal_layout(obj, base, depth).map(UiSchemaElement::HorizontalLayout)
        }
        "Group" => parse_group(obj, base, depth).map(UiSchemaElement::Group),
        "Categorization" => parse_categorization(obj, base, depth).map(UiSchemaElement::Categorization),
        "Category" => parse_category(obj, base, depth).map(UiSchemaElement::Category),
        "Label" => parse_label(obj, base).map(UiSchemaElement::Label),
        _ => Ok(UiSchemaElement::Custom(parse_custom(obj, base, depth))),
    }
}

// ── Shared base fields ──────────────────────────────────────────────

/// Parse the fields shared by every element kind. A `rule` that is present
/// but not an object is ignored, matching the leniency applied to
/// wrong-typed `options` and `i18n`; a present rule object that fails to
/// parse is an error.
fn parse_base(
    obj: &Map<String, Value>,
    element_type: &str,
    depth: usize,
) -> Result<ElementBase, ParseError> {
    let rule = match obj.get("rule").and_then(Value::as_object) {
        Some(rule_obj) => {
            Some(parse_rule(rule_obj, depth).map_err(|e| ParseError::Rule(Box::new(e)))?)
        }
        None => None,
    };

    let options = obj.get("options").and_then(Value::as_object).cloned();
    let i18n = obj.get("i18n").and_then(Value::as_str).map(str::to_owned);

    Ok(ElementBase {
        element_type: element_type.to_owned(),
        rule,
        options,
        i18n,
    })
}

pub(crate) fn require_str(
    obj: &Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<String, ParseError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ParseError::MissingField { kind, field })
}

// ── Per-variant constructors ────────────────────────────────────────

fn parse_control(obj: &Map<String, Value>, base: ElementBase) -> Result<Control, ParseError> {
    let scope = require_str(obj, "Control", "scope")?;
    Ok(Control {
        base,
        scope,
        label: obj.get("label").cloned(),
    })
}

fn parse_vertical_layout(
    obj: &Map<String, Value>,
    base: ElementBase,
    depth: usize,
) -> Result<VerticalLayout, ParseError> {
    let elements = parse_children(obj, "VerticalLayout", depth)?;
    Ok(VerticalLayout { base, elements })
}

fn parse_horizontal_layout(
    obj: &Map<String, Value>,
    base: ElementBase,
    depth: usize,
) -> Result<HorizontalLayout, ParseError> {
    let elements = parse_children(obj, "HorizontalLayout", depth)?;
    Ok(HorizontalLayout { base, elements })
}

fn parse_group(
    obj: &Map<String, Value>,
    base: ElementBase,
    depth: usize,
) -> Result<Group, ParseError> {
    let label = require_str(obj, "Group", "label")?;
    let elements = parse_children(obj, "Group", depth)?;
    Ok(Group {
        base,
        label,
        elements,
    })
}

fn parse_categorization(
    obj: &Map<String, Value>,
    base: ElementBase,
    depth: usize,
) -> Result<Categorization, ParseError> {
    let entries = obj
        .get("elements")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingField {
            kind: "Categorization",
            field: "elements",
        })?;

    let mut elements = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let element = parse_element_at(entry, depth + 1).map_err(|e| ParseError::Element {
            index,
            source: Box::new(e),
        })?;

        // Only Category and nested Categorization belong here; any other
        // successfully parsed kind is dropped, not an error.
        match element {
            UiSchemaElement::Category(c) => elements.push(CategoryElement::Category(c)),
            UiSchemaElement::Categorization(c) => {
                elements.push(CategoryElement::Categorization(c))
            }
            _ => {}
        }
    }

    let label = obj.get("label").and_then(Value::as_str).map(str::to_owned);

    Ok(Categorization {
        base,
        label,
        elements,
    })
}

fn parse_category(
    obj: &Map<String, Value>,
    base: ElementBase,
    depth: usize,
) -> Result<Category, ParseError> {
    let label = require_str(obj, "Category", "label")?;
    let elements = parse_children(obj, "Category", depth)?;
    Ok(Category {
        base,
        label,
        elements,
    })
}

fn parse_label(obj: &Map<String, Value>, base: ElementBase) -> Result<LabelElement, ParseError> {
    let text = require_str(obj, "Label", "text")?;
    Ok(LabelElement { base, text })
}

/// Construct the custom-element fallback. Never fails: when an `elements`
/// field is present but does not parse, the element is returned with its
/// raw object intact and no children.
fn parse_custom(obj: &Map<String, Value>, base: ElementBase, depth: usize) -> CustomElement {
    let elements = if obj.contains_key("elements") {
        parse_children(obj, "CustomElement", depth).unwrap_or_default()
    } else {
        Vec::new()
    };

    CustomElement {
        base,
        raw: obj.clone(),
        elements,
    }
}

// ── Children ────────────────────────────────────────────────────────

/// Parse the `elements` array shared by the container kinds. Every entry
/// must be an object and must classify; the first failure aborts the whole
/// array, wrapped with the entry's 0-based index.
fn parse_children(
    obj: &Map<String, Value>,
    kind: &'static str,
    depth: usize,
) -> Result<Vec<UiSchemaElement>, ParseError> {
    let entries = obj
        .get("elements")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingField {
            kind,
            field: "elements",
        })?;

    let mut elements = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let element = parse_element_at(entry, depth + 1).map_err(|e| ParseError::Element {
            index,
            source: Box::new(e),
        })?;
        elements.push(element);
    }

    Ok(elements)
}
