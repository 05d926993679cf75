// web_app/validation.rs - Static validation ruleset for the product form
//
// The ruleset is declared as plain rule objects and evaluated as a pure
// function from raw form values to a set of field errors. No rule touches
// the network; validation always runs before any request is made.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::web_app::model::{Field, FieldErrors};

/// What a single field must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming.
    RequiredText,
    /// Parses as a number and is zero or greater.
    NonNegativeNumber,
    /// Parses as a whole number and is zero or greater.
    NonNegativeInteger,
    /// A file has been selected for upload.
    RequiredImage,
}

/// One rule bound to one form field, with the label used in messages.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: Field,
    pub rule: Rule,
    pub label: &'static str,
}

/// The complete ruleset, in form display order.
///
/// `images` has no rule of its own: it is populated from the upload result
/// together with `image`.
pub const RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::Name,
        rule: Rule::RequiredText,
        label: "Product name",
    },
    FieldRule {
        field: Field::Description,
        rule: Rule::RequiredText,
        label: "Description",
    },
    FieldRule {
        field: Field::Category,
        rule: Rule::RequiredText,
        label: "Category",
    },
    FieldRule {
        field: Field::Price,
        rule: Rule::NonNegativeNumber,
        label: "Price",
    },
    FieldRule {
        field: Field::Rating,
        rule: Rule::NonNegativeNumber,
        label: "Rating",
    },
    FieldRule {
        field: Field::PriceBeforeDiscount,
        rule: Rule::NonNegativeNumber,
        label: "Price before discount",
    },
    FieldRule {
        field: Field::Quantity,
        rule: Rule::NonNegativeInteger,
        label: "Quantity",
    },
    FieldRule {
        field: Field::Sold,
        rule: Rule::NonNegativeInteger,
        label: "Units sold",
    },
    FieldRule {
        field: Field::View,
        rule: Rule::NonNegativeInteger,
        label: "View count",
    },
    FieldRule {
        field: Field::Image,
        rule: Rule::RequiredImage,
        label: "Product image",
    },
];

/// Parse a raw input as a decimal number.
pub fn parse_decimal(raw: &str) -> Result<Decimal, ()> {
    Decimal::from_str(raw.trim()).map_err(|_| ())
}

/// Parse a raw input as a whole number.
pub fn parse_integer(raw: &str) -> Result<i64, ()> {
    raw.trim().parse::<i64>().map_err(|_| ())
}

/// Check one rule against one raw value. Returns the error message on
/// violation.
pub fn rule_violation(rule: Rule, label: &str, raw: &str, has_file: bool) -> Option<String> {
    match rule {
        Rule::RequiredText => {
            if raw.trim().is_empty() {
                Some(format!("{} is required", label))
            } else {
                None
            }
        }
        Rule::NonNegativeNumber => match parse_decimal(raw) {
            Err(()) => Some(format!("{} must be a number", label)),
            Ok(value) if value < Decimal::ZERO => {
                Some(format!("{} must be zero or greater", label))
            }
            Ok(_) => None,
        },
        Rule::NonNegativeInteger => match parse_integer(raw) {
            Err(()) => Some(format!("{} must be a whole number", label)),
            Ok(value) if value < 0 => Some(format!("{} must be zero or greater", label)),
            Ok(_) => None,
        },
        Rule::RequiredImage => {
            if has_file {
                None
            } else {
                Some(format!("{} is required", label))
            }
        }
    }
}

/// Evaluate the whole ruleset. `value_of` yields the raw value currently
/// bound to a field; `has_file` reports whether an image file is selected.
pub fn validate<'a>(mut value_of: impl FnMut(Field) -> &'a str, has_file: bool) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in RULES {
        if let Some(message) = rule_violation(rule.rule, rule.label, value_of(rule.field), has_file)
        {
            errors.insert(rule.field, message);
        }
    }
    errors
}
