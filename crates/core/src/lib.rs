//! uischema-core: typed AST and parser for UI schema documents.
//!
//! Converts a declarative UI-layout JSON document, plus an optional data
//! schema document carried through opaquely, into an immutable typed tree
//! that renderers, schema transformers, and static analyzers can traverse
//! without touching raw JSON. The embedded conditional-visibility grammar
//! (rules and conditions) is parsed, not evaluated.
//!
//! # Public API
//!
//! Key types and entry points are re-exported at the crate root:
//!
//! - [`parse()`] -- parse UI schema + data schema text into an [`Ast`]
//! - [`parse_element()`] -- classify a single decoded JSON value
//! - [`parse_condition()`] -- parse a decoded condition object
//! - [`walk()`] / [`Visitor`] -- pre-order traversal with per-variant
//!   callbacks defaulting to no-ops
//! - [`ParseError`] -- decode/structural/semantic error taxonomy

pub mod ast;
pub mod error;
pub mod parse;
pub mod rule;
pub mod walk;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    AndCondition, Ast, Categorization, Category, CategoryElement, Condition, Control,
    CustomElement, ElementBase, Group, HorizontalLayout, LabelElement, LeafCondition,
    OrCondition, Rule, SchemaBasedCondition, UiSchemaElement, VerticalLayout,
    EFFECT_DISABLE, EFFECT_ENABLE, EFFECT_HIDE, EFFECT_SHOW,
};
pub use error::ParseError;

// ── Convenience re-exports: entry points ─────────────────────────────

pub use parse::{parse, parse_element, MAX_NESTING_DEPTH};
pub use rule::parse_condition;
pub use walk::{walk, walk_opt, Visitor};
