//! Error taxonomy for UI schema parsing.
//!
//! Three families of failure: decode (input text is not JSON), structural
//! (a required field is missing or wrong-typed), and semantic (an
//! unrecognized condition discriminator). Recursive failures are wrapped
//! with positional context as they unwind, so the display string and the
//! `std::error::Error::source()` chain both read from document root down
//! to the root cause.

/// All errors that can be returned by the parser.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input text is not valid JSON.
    #[error("invalid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// The data schema text is non-empty but not valid JSON.
    #[error("failed to parse data schema: {0}")]
    DataSchema(#[source] serde_json::Error),

    /// An element's `type` discriminator is missing or not a string.
    #[error("missing or invalid 'type' field")]
    MissingType,

    /// A value expected to be an element object is not an object.
    #[error("element is not an object")]
    NotAnObject,

    /// A required field on a typed element or condition is missing or
    /// wrong-typed.
    #[error("{kind} missing required '{field}' field")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A condition carries a `type` discriminator outside the known set.
    #[error("unknown condition type: {0}")]
    UnknownConditionType(String),

    /// Document nesting exceeded [`MAX_NESTING_DEPTH`].
    ///
    /// [`MAX_NESTING_DEPTH`]: crate::parse::MAX_NESTING_DEPTH
    #[error("nesting too deep: exceeded {limit} levels")]
    NestingTooDeep { limit: usize },

    /// Failure inside an `elements` entry, tagged with its 0-based index.
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ParseError>,
    },

    /// Failure inside a `conditions` entry, tagged with its 0-based index.
    #[error("condition {index}: {source}")]
    ConditionEntry {
        index: usize,
        #[source]
        source: Box<ParseError>,
    },

    /// Failure while parsing an element's `rule` object.
    #[error("failed to parse rule: {0}")]
    Rule(#[source] Box<ParseError>),

    /// Failure while parsing a rule's `condition` object.
    #[error("failed to parse condition: {0}")]
    Condition(#[source] Box<ParseError>),

    /// Failure while parsing the UI schema document.
    #[error("failed to parse UI schema: {0}")]
    UiSchema(#[source] Box<ParseError>),
}

impl ParseError {
    /// Unwrap positional context down to the innermost failure.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::Element { source, .. }
            | ParseError::ConditionEntry { source, .. }
            | ParseError::Rule(source)
            | ParseError::Condition(source)
            | ParseError::UiSchema(source) => source.root_cause(),
            other => other,
        }
    }

    /// True when the failure is a JSON decode error rather than a
    /// structural or semantic one.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self.root_cause(),
            ParseError::Json { .. } | ParseError::DataSchema(_)
        )
    }
}
