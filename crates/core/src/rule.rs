//! Parser for the conditional-visibility rule/condition sub-grammar.
//!
//! A rule is an `effect` string plus one condition tree. Condition dispatch
//! reads an optional `type` discriminator; a missing or empty discriminator
//! resolves to SCHEMA_BASED, the one place where absence is a valid default
//! rather than an error.

use serde_json::{Map, Value};

use crate::ast::{
    AndCondition, Condition, LeafCondition, OrCondition, Rule, SchemaBasedCondition,
};
use crate::error::ParseError;
use crate::parse::{require_str, MAX_NESTING_DEPTH};

/// Parse a rule object attached to an element.
///
/// The effect is stored verbatim: values outside the four known effects
/// (see the `EFFECT_*` constants) are accepted and left to the renderer.
pub(crate) fn parse_rule(obj: &Map<String, Value>, depth: usize) -> Result<Rule, ParseError> {
    let effect = require_str(obj, "Rule", "effect")?;

    let condition_obj =
        obj.get("condition")
            .and_then(Value::as_object)
            .ok_or(ParseError::MissingField {
                kind: "Rule",
                field: "condition",
            })?;

    let condition = parse_condition_at(condition_obj, depth)
        .map_err(|e| ParseError::Condition(Box::new(e)))?;

    Ok(Rule { effect, condition })
}

/// Parse a single decoded condition object.
pub fn parse_condition(value: &Value) -> Result<Condition, ParseError> {
    let obj = value.as_object().ok_or(ParseError::NotAnObject)?;
    parse_condition_at(obj, 0)
}

fn parse_condition_at(obj: &Map<String, Value>, depth: usize) -> Result<Condition, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    // A non-string 'type' is treated the same as an absent one.
    let condition_type = obj.get("type").and_then(Value::as_str).unwrap_or("");

    match condition_type {
        "LEAF" => parse_leaf(obj).map(Condition::Leaf),
        "AND" => parse_conditions(obj, "AndCondition", depth)
            .map(|conditions| Condition::And(AndCondition { conditions })),
        "OR" => parse_conditions(obj, "OrCondition", depth)
            .map(|conditions| Condition::Or(OrCondition { conditions })),
        "SCHEMA_BASED" | "" => parse_schema_based(obj).map(Condition::SchemaBased),
        other => Err(ParseError::UnknownConditionType(other.to_owned())),
    }
}

fn parse_schema_based(obj: &Map<String, Value>) -> Result<SchemaBasedCondition, ParseError> {
    let scope = require_str(obj, "SchemaBasedCondition", "scope")?;

    // Presence of the key is the requirement; any value, including null,
    // is acceptable.
    let schema = obj
        .get("schema")
        .cloned()
        .ok_or(ParseError::MissingField {
            kind: "SchemaBasedCondition",
            field: "schema",
        })?;

    let condition_type = obj.get("type").and_then(Value::as_str).map(str::to_owned);
    let fail_when_undefined = obj.get("failWhenUndefined").and_then(Value::as_bool);

    Ok(SchemaBasedCondition {
        condition_type,
        scope,
        schema,
        fail_when_undefined,
    })
}

fn parse_leaf(obj: &Map<String, Value>) -> Result<LeafCondition, ParseError> {
    let scope = require_str(obj, "LeafCondition", "scope")?;

    let expected_value = obj
        .get("expectedValue")
        .cloned()
        .ok_or(ParseError::MissingField {
            kind: "LeafCondition",
            field: "expectedValue",
        })?;

    Ok(LeafCondition {
        scope,
        expected_value,
    })
}

/// Parse the `conditions` array of an AND/OR condition. Every entry must be
/// an object and must parse; the first failure aborts the whole array,
/// wrapped with the entry's 0-based index.
fn parse_conditions(
    obj: &Map<String, Value>,
    kind: &'static str,
    depth: usize,
) -> Result<Vec<Condition>, ParseError> {
    let entries = obj
        .get("conditions")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingField {
            kind,
            field: "conditions",
        })?;

    let mut conditions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry_obj = entry.as_object().ok_or_else(|| ParseError::ConditionEntry {
            index,
            source: Box::new(ParseError::NotAnObject),
        })?;
        let condition =
            parse_condition_at(entry_obj, depth + 1).map_err(|e| ParseError::ConditionEntry {
                index,
                source: Box::new(e),
            })?;
        conditions.push(condition);
    }

    Ok(conditions)
}
