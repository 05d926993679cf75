// web_app/model/mod.rs - Shared data models for client and server
//
// These structs are used throughout the application for type-safe
// communication between the form page, the server functions, and the
// external product API.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every input of the add-product form, by stable wire key.
///
/// The wire key (snake_case) is what the backend uses when it rejects a
/// draft with per-field errors, so the mapping here must stay in sync with
/// the submitted JSON field names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Description,
    Category,
    Price,
    Rating,
    PriceBeforeDiscount,
    Quantity,
    Sold,
    View,
    Image,
    Images,
}

impl Field {
    /// All fields, in form display order.
    pub const ALL: [Field; 11] = [
        Field::Name,
        Field::Description,
        Field::Category,
        Field::Price,
        Field::Rating,
        Field::PriceBeforeDiscount,
        Field::Quantity,
        Field::Sold,
        Field::View,
        Field::Image,
        Field::Images,
    ];

    /// Stable wire key, matching the JSON field names of the submitted draft.
    pub fn as_key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Category => "category",
            Field::Price => "price",
            Field::Rating => "rating",
            Field::PriceBeforeDiscount => "price_before_discount",
            Field::Quantity => "quantity",
            Field::Sold => "sold",
            Field::View => "view",
            Field::Image => "image",
            Field::Images => "images",
        }
    }

    /// Resolve a wire key from a server error payload. Unknown keys yield
    /// `None` and are dropped by the caller.
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_key() == key)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Per-field validation messages, keyed by form field.
///
/// Produced either by the local ruleset before submission or from the
/// backend's unprocessable-entity payload after it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Build from a wire map as sent by the backend. Keys that do not name a
    /// known form field are dropped.
    pub fn from_wire(map: &BTreeMap<String, String>) -> Self {
        let mut errors = FieldErrors::new();
        for (key, message) in map {
            if let Some(field) = Field::from_key(key) {
                errors.insert(field, message.clone());
            }
        }
        errors
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        FieldErrors(iter.into_iter().collect())
    }
}

/// The product record submitted to the backend create endpoint.
///
/// `image` and `images` carry URLs returned by the upload endpoint, never a
/// local file name; the submission workflow enforces this.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_before_discount: Decimal,
    pub quantity: i64,
    pub sold: i64,
    pub view: i64,
    pub image: String,
    pub images: Vec<String>,
}

/// A locally chosen image file: display name plus raw content.
///
/// Held outside the draft; exists only between file selection and a
/// successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Notification command emitted by the submission workflow.
///
/// Rendering is up to the toast component; the workflow only decides what
/// to say and with which severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Success envelope of the product API: `{ "message": ..., "data": ... }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub message: String,
    pub data: T,
}

/// Error envelope of the product API. On a 422 the `data` map carries one
/// message per rejected field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
}

/// A created product as returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_before_discount: Decimal,
    pub quantity: i64,
    pub sold: i64,
    pub view: i64,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Result of the image-upload server function.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

/// Result of the product-create server function.
///
/// The structured unprocessable-entity outcome travels in the success
/// channel so the per-field map survives the server-fn boundary; transport
/// and backend failures use the error channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CreateProductResult {
    Created {
        message: String,
        product: Product,
    },
    Rejected {
        message: String,
        field_errors: FieldErrors,
    },
}
