// web_app/pages/add_product.rs - Add-product page component
//
// The administrative form for adding a product to the catalog. Owns the
// form state and runs the submission workflow against the server-function
// gateways: validate locally, upload the image, submit the draft, then
// reconcile the outcome (field annotations, toast, reset).

use leptos::prelude::*;

use crate::web_app::components::{Button, FileField, TextField, Toast};
use crate::web_app::form::{submit, CreateError, ProductForm, SubmitPhase};
use crate::web_app::model::{CreateProductResult, Field, FieldErrors, Notification};
use crate::web_app::server_fns::{add_product, upload_image};

/// Add-product page component
///
/// One submission at a time: the submit control is disabled from the moment
/// a valid submission starts until its outcome arrives. Upload and create
/// run strictly in sequence.
#[component]
pub fn AddProductPage() -> impl IntoView {
    let form = RwSignal::new(ProductForm::new());
    let errors = RwSignal::new(FieldErrors::new());
    let phase = RwSignal::new(SubmitPhase::Idle);
    let notification = RwSignal::new(None::<Notification>);

    let busy = Signal::derive(move || phase.get().is_busy());

    let submit_label = move || match phase.get() {
        SubmitPhase::Idle => "Save",
        SubmitPhase::Validating => "Validating...",
        SubmitPhase::Uploading => "Uploading image...",
        SubmitPhase::Submitting => "Saving...",
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        // One submission in flight at a time
        if phase.get_untracked().is_busy() {
            return;
        }

        notification.set(None);
        let snapshot = form.get_untracked();

        leptos::task::spawn_local(async move {
            let outcome = submit(
                &snapshot,
                |file| async move {
                    use base64::Engine;
                    let payload = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
                    upload_image(file.name, payload)
                        .await
                        .map(|uploaded| uploaded.url)
                        .map_err(|e| e.to_string())
                },
                |draft| async move {
                    match add_product(draft).await {
                        Ok(CreateProductResult::Created { message, .. }) => Ok(message),
                        Ok(CreateProductResult::Rejected {
                            message,
                            field_errors,
                        }) => Err(CreateError::Rejected {
                            message,
                            field_errors,
                        }),
                        Err(e) => Err(CreateError::Failed(e.to_string())),
                    }
                },
                move |p| phase.set(p),
            )
            .await;

            errors.set(outcome.field_errors().cloned().unwrap_or_default());
            if let Some(note) = outcome.notification() {
                notification.set(Some(note));
            }
            if outcome.is_success() {
                form.update(|f| f.reset());
            }
        });
    };

    view! {
        <div class="min-h-screen bg-gray-50 font-sans text-gray-900">
            // Header
            <header class="bg-white shadow-sm sticky top-0 z-40 border-b border-gray-200">
                <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 h-16 flex items-center justify-between">
                    <h1 class="text-xl font-bold text-gray-900">"Shop Admin"</h1>
                    <div class="text-sm text-gray-500">"Product catalog"</div>
                </div>
            </header>

            // Main content
            <main class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <section class="bg-white rounded-2xl shadow-sm border border-gray-100 px-2 pb-10 md:px-7 md:pb-16">
                    <div class="border-b border-gray-200 py-6">
                        <h2 class="text-lg font-medium capitalize text-gray-900">"Add product"</h2>
                    </div>

                    <form class="mt-4 mr-auto max-w-2xl" on:submit=on_submit>
                        <TextField
                            label="Product name"
                            field=Field::Name
                            form=form
                            errors=errors
                            placeholder="Product name"
                        />
                        <TextField
                            label="Description"
                            field=Field::Description
                            form=form
                            errors=errors
                            placeholder="What is it?"
                        />
                        <TextField
                            label="Category"
                            field=Field::Category
                            form=form
                            errors=errors
                            placeholder="Category"
                        />
                        <FileField
                            label="Product image"
                            form=form
                            errors=errors
                        />
                        <TextField
                            label="Price"
                            field=Field::Price
                            form=form
                            errors=errors
                            input_type="number"
                        />
                        <TextField
                            label="Rating"
                            field=Field::Rating
                            form=form
                            errors=errors
                            input_type="number"
                        />
                        <TextField
                            label="Price before discount"
                            field=Field::PriceBeforeDiscount
                            form=form
                            errors=errors
                            input_type="number"
                        />
                        <TextField
                            label="Quantity"
                            field=Field::Quantity
                            form=form
                            errors=errors
                            input_type="number"
                        />
                        <TextField
                            label="Units sold"
                            field=Field::Sold
                            form=form
                            errors=errors
                            input_type="number"
                        />
                        <TextField
                            label="View count"
                            field=Field::View
                            form=form
                            errors=errors
                            input_type="number"
                        />

                        <div class="mt-6 flex flex-col flex-wrap sm:flex-row">
                            <div class="sm:w-[20%]" />
                            <div class="sm:w-[80%] sm:pl-5">
                                <Button button_type="submit" disabled=busy>
                                    {submit_label}
                                </Button>
                            </div>
                        </div>
                    </form>
                </section>
            </main>

            // Notification overlay
            <Toast notification=notification />
        </div>
    }
}
