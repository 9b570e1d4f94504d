//! The stored custom id format: an ordered list of typed elements.
//!
//! An inventory persists its format as an opaque JSON string:
//!
//! ```json
//! { "Elements": [ { "Type": "FixedText", "Value": "SKU-" },
//!                 { "Type": "Sequence", "Format": "D3" } ] }
//! ```
//!
//! Field casing and the literal `"Guid"` type tag are part of the stored
//! format and must not change.

use crate::error::TemplateError;
use serde::{Deserialize, Serialize};

/// Widest `D<n>` / `X<n>` token width accepted where a width is validated.
///
/// Widths come from inventory administrators; the cap keeps a typo from
/// turning into an enormous regex repetition or allocation.
pub const MAX_TOKEN_WIDTH: usize = 32;

/// One atomic piece of a custom id format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum IdElement {
    /// Emitted verbatim.
    FixedText {
        #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Random token shaped by a `D<n>` (decimal) or `X<n>` (hex) spec.
    Random {
        #[serde(rename = "Format", default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// Per-inventory ordinal derived from the current item count.
    Sequence {
        #[serde(rename = "Format", default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// Current UTC time rendered with a strftime pattern.
    DateTime {
        #[serde(rename = "Format", default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// Fresh random 128-bit identifier in canonical hyphenated form.
    Guid,
    /// Catch-all for type tags this build does not recognize.
    ///
    /// Parsing keeps the element so the failure surfaces where it matters:
    /// rendering and pattern synthesis reject it explicitly instead of
    /// skipping it.
    #[serde(other)]
    Unknown,
}

/// An ordered custom id format as configured on one inventory.
///
/// Immutable once parsed; a single generate or validate call never mutates
/// the format it read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdFormat {
    #[serde(rename = "Elements")]
    elements: Vec<IdElement>,
}

impl IdFormat {
    pub fn new(elements: Vec<IdElement>) -> Self {
        Self { elements }
    }

    /// The format applied when an inventory has none configured: a single
    /// `Guid` element.
    pub fn default_guid() -> Self {
        Self {
            elements: vec![IdElement::Guid],
        }
    }

    /// Parses a stored document.
    ///
    /// A non-empty document that fails to parse, or that parses to zero
    /// elements, is corrupt. Deciding what a *blank* document means is the
    /// caller's business, not the parser's.
    pub fn parse(document: &str) -> Result<Self, TemplateError> {
        let format: Self =
            serde_json::from_str(document).map_err(|e| TemplateError::Corrupt(e.to_string()))?;
        if format.elements.is_empty() {
            return Err(TemplateError::Corrupt(
                "format contains no elements".to_string(),
            ));
        }
        Ok(format)
    }

    /// Serializes back to the stored document form.
    pub fn to_document(&self) -> String {
        // Serializing a plain struct of strings cannot fail.
        serde_json::to_string(self).expect("id format serialization failed")
    }

    /// The elements in declared order.
    pub fn elements(&self) -> &[IdElement] {
        &self.elements
    }

    /// Whether any element draws on the per-inventory sequence ordinal.
    pub fn has_sequence(&self) -> bool {
        self.elements
            .iter()
            .any(|e| matches!(e, IdElement::Sequence { .. }))
    }
}
