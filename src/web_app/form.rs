// web_app/form.rs - Product form state and submission workflow
//
// ProductForm holds the transient, as-typed state of the add-product page.
// The submission workflow is a pure async orchestration over two effect
// seams (upload, create) so the whole state machine can be driven by tests
// without a network.
//
// Per submission attempt:
//   Idle -> Validating -> Invalid (errors shown, no network)
//                      -> Uploading -> UploadFailed
//                                   -> Submitting -> Created
//                                                 -> Rejected (field errors)
//                                                 -> Failed

use std::collections::BTreeMap;
use std::future::Future;

use crate::web_app::model::{Field, FieldErrors, Notification, ProductDraft, SelectedFile};
use crate::web_app::validation;

/// Raw form values plus the selected image file.
///
/// Values are kept as entered; parsing and validation happen at submit time,
/// not per keystroke.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductForm {
    values: BTreeMap<Field, String>,
    selected_image: Option<SelectedFile>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    /// A fresh form: empty texts, zero numerics, no file.
    pub fn new() -> Self {
        let mut values = BTreeMap::new();
        for field in Field::ALL {
            values.insert(field, default_value(field).to_string());
        }
        Self {
            values,
            selected_image: None,
        }
    }

    /// The raw value currently bound to a field.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Overwrite one field. No validation runs here; that is deferred to
    /// submit time.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Store the chosen file. The `image` field shows the file's display
    /// name until the upload replaces it with a URL.
    pub fn select_image_file(&mut self, file: SelectedFile) {
        self.update_field(Field::Image, file.name.clone());
        self.selected_image = Some(file);
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_image.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.selected_image.is_some()
    }

    /// Run the static ruleset against the current values.
    pub fn validate(&self) -> FieldErrors {
        validation::validate(|field| self.value(field), self.has_file())
    }

    /// Parse the raw values into a submittable draft, or return every
    /// violated rule.
    pub fn build_draft(&self) -> Result<ProductDraft, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProductDraft {
            name: self.value(Field::Name).trim().to_string(),
            description: self.value(Field::Description).trim().to_string(),
            category: self.value(Field::Category).trim().to_string(),
            price: parse_checked_decimal(self.value(Field::Price), Field::Price)?,
            rating: parse_checked_decimal(self.value(Field::Rating), Field::Rating)?,
            price_before_discount: parse_checked_decimal(
                self.value(Field::PriceBeforeDiscount),
                Field::PriceBeforeDiscount,
            )?,
            quantity: parse_checked_integer(self.value(Field::Quantity), Field::Quantity)?,
            sold: parse_checked_integer(self.value(Field::Sold), Field::Sold)?,
            view: parse_checked_integer(self.value(Field::View), Field::View)?,
            image: self.value(Field::Image).to_string(),
            images: Vec::new(),
        })
    }

    /// Restore defaults. Called after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn default_value(field: Field) -> &'static str {
    match field {
        Field::Price
        | Field::Rating
        | Field::PriceBeforeDiscount
        | Field::Quantity
        | Field::Sold
        | Field::View => "0",
        _ => "",
    }
}

// The ruleset has already accepted these values; the error branch only
// exists so a ruleset/parser mismatch surfaces as a field error instead of
// a panic.
fn parse_checked_decimal(raw: &str, field: Field) -> Result<rust_decimal::Decimal, FieldErrors> {
    validation::parse_decimal(raw).map_err(|_| single_error(field, "must be a number"))
}

fn parse_checked_integer(raw: &str, field: Field) -> Result<i64, FieldErrors> {
    validation::parse_integer(raw).map_err(|_| single_error(field, "must be a whole number"))
}

fn single_error(field: Field, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field, message);
    errors
}

/// Where a submission attempt currently is. The page disables the submit
/// control whenever the phase is not `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Uploading,
    Submitting,
}

impl SubmitPhase {
    pub fn is_busy(&self) -> bool {
        *self != SubmitPhase::Idle
    }
}

/// Failure modes of the create seam.
#[derive(Clone, Debug, PartialEq)]
pub enum CreateError {
    /// Structured unprocessable-entity rejection with per-field messages.
    Rejected {
        message: String,
        field_errors: FieldErrors,
    },
    /// Transport error or any other backend failure.
    Failed(String),
}

/// Terminal result of one submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; no network call was made.
    Invalid(FieldErrors),
    /// The image upload failed; create was never called.
    UploadFailed(String),
    /// The backend accepted the draft.
    Created { message: String },
    /// The backend rejected the draft field by field.
    Rejected {
        message: String,
        field_errors: FieldErrors,
    },
    /// Any other failure.
    Failed(String),
}

impl SubmitOutcome {
    /// Field annotations to render, if this outcome carries any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitOutcome::Invalid(errors) => Some(errors),
            SubmitOutcome::Rejected { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// The notification command for this outcome. Field-scoped outcomes
    /// carry no global notification; every other failure path does, so no
    /// failure is silent.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            SubmitOutcome::Created { message } => Some(Notification::success(message.clone())),
            SubmitOutcome::UploadFailed(message) => Some(Notification::error(format!(
                "Image upload failed: {}",
                message
            ))),
            SubmitOutcome::Failed(message) => Some(Notification::error(message.clone())),
            SubmitOutcome::Invalid(_) | SubmitOutcome::Rejected { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. })
    }
}

/// Run one submission attempt.
///
/// `upload` resolves to the uploaded image URL; `create` resolves to the
/// backend's success message. The two calls are strictly sequential and
/// each runs at most once. `on_phase` observes every transition, ending in
/// `Idle`.
pub async fn submit<U, FU, C, FC>(
    form: &ProductForm,
    upload: U,
    create: C,
    mut on_phase: impl FnMut(SubmitPhase),
) -> SubmitOutcome
where
    U: FnOnce(SelectedFile) -> FU,
    FU: Future<Output = Result<String, String>>,
    C: FnOnce(ProductDraft) -> FC,
    FC: Future<Output = Result<String, CreateError>>,
{
    on_phase(SubmitPhase::Validating);

    let mut draft = match form.build_draft() {
        Ok(draft) => draft,
        Err(errors) => {
            on_phase(SubmitPhase::Idle);
            return SubmitOutcome::Invalid(errors);
        }
    };

    // The ruleset requires a file, so this only trips if the form mutated
    // between validation and here.
    let file = match form.selected_file() {
        Some(file) => file.clone(),
        None => {
            on_phase(SubmitPhase::Idle);
            return SubmitOutcome::Invalid(single_error(Field::Image, "Product image is required"));
        }
    };

    on_phase(SubmitPhase::Uploading);
    let url = match upload(file).await {
        Ok(url) => url,
        Err(message) => {
            on_phase(SubmitPhase::Idle);
            return SubmitOutcome::UploadFailed(message);
        }
    };

    // Never submit the local file name: both image fields carry the URL
    // returned by the upload endpoint.
    draft.image = url.clone();
    draft.images = vec![url];

    on_phase(SubmitPhase::Submitting);
    let outcome = match create(draft).await {
        Ok(message) => SubmitOutcome::Created { message },
        Err(CreateError::Rejected {
            message,
            field_errors,
        }) => SubmitOutcome::Rejected {
            message,
            field_errors,
        },
        Err(CreateError::Failed(message)) => SubmitOutcome::Failed(message),
    };

    on_phase(SubmitPhase::Idle);
    outcome
}
