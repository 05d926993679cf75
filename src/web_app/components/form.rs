// web_app/components/form.rs - Form field components
//
// Labeled input rows for the add-product form. Each row binds one Field of
// the ProductForm signal and renders the matching entry of the error map
// inline below the control.

use leptos::prelude::*;

use crate::web_app::form::ProductForm;
use crate::web_app::model::{Field, FieldErrors, SelectedFile};

/// Labeled text/number input bound to one form field
///
/// Shows the field's error message, when present, under the input.
#[component]
pub fn TextField(
    /// Visible row label
    label: &'static str,
    /// The form field this input binds
    field: Field,
    /// Shared form state
    form: RwSignal<ProductForm>,
    /// Current error map
    #[prop(into)]
    errors: Signal<FieldErrors>,
    /// Input type (text, number, ...)
    #[prop(default = "text")]
    input_type: &'static str,
    /// Placeholder text
    #[prop(default = "")]
    placeholder: &'static str,
) -> impl IntoView {
    let error = Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)));

    view! {
        <div class="mt-4 flex flex-col flex-wrap sm:flex-row">
            <label class="truncate pt-3 capitalize text-gray-700 sm:w-[20%] sm:text-right">
                {label}
            </label>
            <div class="sm:w-[80%] sm:pl-5">
                <input
                    type=input_type
                    placeholder=placeholder
                    class="w-full rounded-lg border border-gray-300 px-3 py-2 shadow-sm \
                           outline-none transition-shadow focus:ring-2 focus:ring-blue-500 \
                           focus:border-transparent"
                    prop:value=move || form.with(|f| f.value(field).to_string())
                    on:input=move |ev| {
                        form.update(|f| f.update_field(field, event_target_value(&ev)));
                    }
                />
                {move || error.get().map(|message| view! {
                    <p class="mt-1 min-h-[1.25rem] text-sm text-red-600">{message}</p>
                })}
            </div>
        </div>
    }
}

/// Labeled file input for the product image
///
/// Reads the chosen file's bytes in the browser and records it on the form;
/// the upload itself happens at submit time. Errors reported against either
/// `image` or `images` render here, since this single control feeds both.
#[component]
pub fn FileField(
    /// Visible row label
    label: &'static str,
    /// Shared form state
    form: RwSignal<ProductForm>,
    /// Current error map
    #[prop(into)]
    errors: Signal<FieldErrors>,
) -> impl IntoView {
    let error = Signal::derive(move || {
        errors.with(|e| {
            e.get(Field::Image)
                .or_else(|| e.get(Field::Images))
                .map(str::to_string)
        })
    });

    let on_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        leptos::task::spawn_local(async move {
            match read_file_bytes(&file).await {
                Ok(bytes) => {
                    form.update(|f| f.select_image_file(SelectedFile::new(file.name(), bytes)));
                }
                Err(e) => {
                    tracing::warn!("Could not read selected file: {}", e);
                }
            }
        });
    };

    view! {
        <div class="mt-4 flex flex-col flex-wrap sm:flex-row">
            <label class="truncate pt-3 capitalize text-gray-700 sm:w-[20%] sm:text-right">
                {label}
            </label>
            <div class="sm:w-[80%] sm:pl-5">
                <input
                    type="file"
                    accept="image/*"
                    class="w-full rounded-lg border border-gray-300 px-3 py-2 shadow-sm \
                           outline-none file:mr-4 file:rounded-md file:border-0 \
                           file:bg-blue-50 file:px-3 file:py-1 file:text-blue-700"
                    on:change=on_change
                />
                {move || {
                    form.with(|f| f.selected_file().map(|file| file.name.clone()))
                        .map(|name| view! {
                            <p class="mt-1 text-sm text-gray-500">"Selected: " {name}</p>
                        })
                }}
                {move || error.get().map(|message| view! {
                    <p class="mt-1 min-h-[1.25rem] text-sm text-red-600">{message}</p>
                })}
            </div>
        </div>
    }
}

/// Read the chosen file's content in the browser.
#[cfg(feature = "hydrate")]
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    use wasm_bindgen_futures::JsFuture;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("could not read '{}'", file.name()))?;

    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Server-rendered markup never reads files; selection only happens after
/// hydration.
#[cfg(not(feature = "hydrate"))]
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    Err(format!(
        "file '{}' can only be read in the browser",
        file.name()
    ))
}
