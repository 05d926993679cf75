// tests/submit_workflow_tests.rs
// Test suite for the submission workflow state machine
//
// The workflow is generic over its two effect seams (upload, create), so
// these tests drive every branch with in-memory gateways: no network calls
// are made, and both call counts and call order are observable.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use shop_admin::web_app::form::{
    submit, CreateError, ProductForm, SubmitOutcome, SubmitPhase,
};
use shop_admin::web_app::model::{
    Field, FieldErrors, NotificationKind, ProductDraft, SelectedFile,
};

fn filled_form() -> ProductForm {
    let mut form = ProductForm::new();
    form.update_field(Field::Name, "Mechanical keyboard");
    form.update_field(Field::Description, "Hot-swappable, 87 keys");
    form.update_field(Field::Category, "Peripherals");
    form.update_field(Field::Price, "89.00");
    form.update_field(Field::Rating, "4.5");
    form.update_field(Field::PriceBeforeDiscount, "109.00");
    form.update_field(Field::Quantity, "40");
    form.select_image_file(SelectedFile::new("keyboard.jpg", vec![0xff, 0xd8, 0xff]));
    form
}

#[tokio::test]
async fn invalid_draft_makes_no_network_calls_and_annotates_every_field() -> anyhow::Result<()> {
    let mut form = ProductForm::new();
    form.update_field(Field::Price, "-1");

    let uploads = Rc::new(Cell::new(0u32));
    let creates = Rc::new(Cell::new(0u32));
    let u = Rc::clone(&uploads);
    let c = Rc::clone(&creates);

    let outcome = submit(
        &form,
        move |_file: SelectedFile| {
            u.set(u.get() + 1);
            async move { Ok::<String, String>("https://cdn.example.com/x.jpg".to_string()) }
        },
        move |_draft: ProductDraft| {
            c.set(c.get() + 1);
            async move { Ok::<String, CreateError>("unused".to_string()) }
        },
        |_phase| {},
    )
    .await;

    assert_eq!(uploads.get(), 0, "upload must not run for an invalid draft");
    assert_eq!(creates.get(), 0, "create must not run for an invalid draft");

    let errors = match outcome {
        SubmitOutcome::Invalid(errors) => errors,
        other => anyhow::bail!("expected Invalid, got {:?}", other),
    };

    // Every violated field is annotated: empty texts, negative price, no file
    assert_eq!(errors.get(Field::Name), Some("Product name is required"));
    assert_eq!(errors.get(Field::Description), Some("Description is required"));
    assert_eq!(errors.get(Field::Category), Some("Category is required"));
    assert_eq!(errors.get(Field::Price), Some("Price must be zero or greater"));
    assert_eq!(errors.get(Field::Image), Some("Product image is required"));
    Ok(())
}

#[tokio::test]
async fn valid_draft_uploads_once_then_creates_once_with_the_url() -> anyhow::Result<()> {
    let calls = Rc::new(RefCell::new(Vec::<&'static str>::new()));
    let sent_draft = Rc::new(RefCell::new(None::<ProductDraft>));

    let calls_u = Rc::clone(&calls);
    let calls_c = Rc::clone(&calls);
    let sent = Rc::clone(&sent_draft);

    let outcome = submit(
        &filled_form(),
        move |file: SelectedFile| {
            calls_u.borrow_mut().push("upload");
            async move {
                Ok::<String, String>(format!("https://cdn.example.com/{}", file.name))
            }
        },
        move |draft: ProductDraft| {
            calls_c.borrow_mut().push("create");
            *sent.borrow_mut() = Some(draft);
            async move { Ok::<String, CreateError>("Created".to_string()) }
        },
        |_phase| {},
    )
    .await;

    assert_eq!(*calls.borrow(), vec!["upload", "create"]);
    assert!(matches!(outcome, SubmitOutcome::Created { .. }));

    let draft = sent_draft.borrow().clone().expect("create saw the draft");
    assert_eq!(draft.image, "https://cdn.example.com/keyboard.jpg");
    assert_eq!(draft.images, vec!["https://cdn.example.com/keyboard.jpg".to_string()]);
    assert_ne!(draft.image, "keyboard.jpg", "local file name must not be submitted");

    // The user-entered values survive; nothing is overridden behind the
    // user's back.
    assert_eq!(draft.name, "Mechanical keyboard");
    assert_eq!(draft.category, "Peripherals");
    Ok(())
}

#[tokio::test]
async fn server_rejection_maps_messages_onto_fields() -> anyhow::Result<()> {
    let outcome = submit(
        &filled_form(),
        |_file| async move { Ok::<String, String>("https://cdn.example.com/a.jpg".to_string()) },
        |_draft| async move {
            let mut field_errors = FieldErrors::new();
            field_errors.insert(Field::Price, "must be >= 0");
            Err::<String, CreateError>(CreateError::Rejected {
                message: "Validation failed".to_string(),
                field_errors,
            })
        },
        |_phase| {},
    )
    .await;

    let errors = match &outcome {
        SubmitOutcome::Rejected { field_errors, .. } => field_errors,
        other => anyhow::bail!("expected Rejected, got {:?}", other),
    };

    // The server-supplied message is preserved verbatim
    assert_eq!(errors.get(Field::Price), Some("must be >= 0"));

    // Field-scoped rejection carries no global toast; the annotations are
    // the visible result
    assert!(outcome.notification().is_none());
    assert!(!outcome.is_success());
    Ok(())
}

#[tokio::test]
async fn success_yields_notification_and_resettable_state() -> anyhow::Result<()> {
    let mut form = filled_form();

    let outcome = submit(
        &form,
        |_file| async move { Ok::<String, String>("https://cdn.example.com/a.jpg".to_string()) },
        |_draft| async move { Ok::<String, CreateError>("Created".to_string()) },
        |_phase| {},
    )
    .await;

    let note = outcome.notification().expect("success must notify");
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.message, "Created");
    assert!(outcome.is_success());
    assert!(outcome.field_errors().is_none());

    // The page resets the form on success; the result is a clean state
    form.reset();
    assert_eq!(form, ProductForm::new());
    Ok(())
}

#[tokio::test]
async fn upload_failure_skips_create_and_is_visible() -> anyhow::Result<()> {
    let creates = Rc::new(Cell::new(0u32));
    let c = Rc::clone(&creates);

    let outcome = submit(
        &filled_form(),
        |_file| async move { Err::<String, String>("connection refused".to_string()) },
        move |_draft| {
            c.set(c.get() + 1);
            async move { Ok::<String, CreateError>("unused".to_string()) }
        },
        |_phase| {},
    )
    .await;

    assert_eq!(creates.get(), 0, "create must not run after a failed upload");

    match &outcome {
        SubmitOutcome::UploadFailed(message) => assert_eq!(message, "connection refused"),
        other => anyhow::bail!("expected UploadFailed, got {:?}", other),
    }

    // Not silent: the outcome carries an error notification
    let note = outcome.notification().expect("upload failure must notify");
    assert_eq!(note.kind, NotificationKind::Error);
    assert!(note.message.contains("connection refused"));
    Ok(())
}

#[tokio::test]
async fn generic_failure_yields_error_notification() -> anyhow::Result<()> {
    let outcome = submit(
        &filled_form(),
        |_file| async move { Ok::<String, String>("https://cdn.example.com/a.jpg".to_string()) },
        |_draft| async move {
            Err::<String, CreateError>(CreateError::Failed("server error (500)".to_string()))
        },
        |_phase| {},
    )
    .await;

    let note = outcome.notification().expect("generic failure must notify");
    assert_eq!(note.kind, NotificationKind::Error);
    assert!(note.message.contains("server error"));
    Ok(())
}

#[tokio::test]
async fn phase_transitions_follow_the_state_machine() -> anyhow::Result<()> {
    let record_phases = || {
        let phases = Rc::new(RefCell::new(Vec::<SubmitPhase>::new()));
        let sink = Rc::clone(&phases);
        (phases, move |phase| sink.borrow_mut().push(phase))
    };

    // Happy path: Validating -> Uploading -> Submitting -> Idle
    let (phases, on_phase) = record_phases();
    submit(
        &filled_form(),
        |_file| async move { Ok::<String, String>("https://cdn.example.com/a.jpg".to_string()) },
        |_draft| async move { Ok::<String, CreateError>("Created".to_string()) },
        on_phase,
    )
    .await;
    assert_eq!(
        *phases.borrow(),
        vec![
            SubmitPhase::Validating,
            SubmitPhase::Uploading,
            SubmitPhase::Submitting,
            SubmitPhase::Idle,
        ]
    );

    // Invalid draft: never leaves validation
    let (phases, on_phase) = record_phases();
    submit(
        &ProductForm::new(),
        |_file| async move { Ok::<String, String>("unused".to_string()) },
        |_draft| async move { Ok::<String, CreateError>("unused".to_string()) },
        on_phase,
    )
    .await;
    assert_eq!(
        *phases.borrow(),
        vec![SubmitPhase::Validating, SubmitPhase::Idle]
    );

    // Upload failure: never reaches Submitting
    let (phases, on_phase) = record_phases();
    submit(
        &filled_form(),
        |_file| async move { Err::<String, String>("timeout".to_string()) },
        |_draft| async move { Ok::<String, CreateError>("unused".to_string()) },
        on_phase,
    )
    .await;
    assert_eq!(
        *phases.borrow(),
        vec![
            SubmitPhase::Validating,
            SubmitPhase::Uploading,
            SubmitPhase::Idle,
        ]
    );

    Ok(())
}
