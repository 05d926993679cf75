// web_app/components/common.rs - Reusable UI components
//
// These are small, composable components used throughout the application.
// Philosophy: Pure, stateless components that receive all data via props.

use leptos::prelude::*;

use crate::web_app::model::{Notification, NotificationKind};

/// Loading spinner component
///
/// Displays a centered spinner with optional message.
#[component]
pub fn Loading(
    /// Optional message to display below the spinner
    #[prop(default = "Loading...")]
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center p-12">
            <div class="animate-spin rounded-full h-10 w-10 border-4 border-gray-200 border-t-blue-600"></div>
            <span class="mt-4 text-gray-500 font-medium animate-pulse">{message}</span>
        </div>
    }
}

/// Primary button component
///
/// A styled button with hover effects.
#[component]
pub fn Button(
    /// Button label text
    children: Children,
    /// Click handler
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    /// Whether the button is disabled
    #[prop(into)]
    disabled: Signal<bool>,
    /// Button type (submit, button, reset)
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let base_class = "px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 \
                      transition-colors disabled:bg-gray-400 disabled:cursor-not-allowed \
                      font-medium shadow-sm active:transform active:scale-95";

    view! {
        <button
            type=button_type
            disabled=move || disabled.get()
            class=format!("{} {}", base_class, class)
            on:click=move |_| {
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            {children()}
        </button>
    }
}

/// Toast notification component
///
/// Renders the current notification command (success or error) in a fixed
/// corner overlay. Dismissed by the close button or by clearing the signal.
#[component]
pub fn Toast(
    /// The notification to display, if any
    notification: RwSignal<Option<Notification>>,
) -> impl IntoView {
    view! {
        <div class="fixed top-6 right-6 z-50">
            {move || notification.get().map(|note| {
                let (container, icon) = match note.kind {
                    NotificationKind::Success => (
                        "flex items-start gap-3 bg-green-50 border border-green-200 text-green-800 \
                         rounded-xl px-4 py-3 shadow-lg max-w-sm",
                        "✓",
                    ),
                    NotificationKind::Error => (
                        "flex items-start gap-3 bg-red-50 border border-red-200 text-red-800 \
                         rounded-xl px-4 py-3 shadow-lg max-w-sm",
                        "⚠",
                    ),
                };

                view! {
                    <div class=container role="status">
                        <span class="text-lg font-bold">{icon}</span>
                        <p class="text-sm font-medium flex-1">{note.message}</p>
                        <button
                            class="text-current opacity-50 hover:opacity-100 transition-opacity"
                            title="Dismiss"
                            on:click=move |_| notification.set(None)
                        >
                            "✕"
                        </button>
                    </div>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    // Component tests would typically be done via end-to-end testing
    // or component testing frameworks. Unit tests verify logic only.

    use crate::web_app::model::{Notification, NotificationKind};

    #[test]
    fn test_toast_style_selection() {
        // The class pair chosen per notification kind
        let kinds = [NotificationKind::Success, NotificationKind::Error];
        for kind in kinds {
            let icon = match kind {
                NotificationKind::Success => "✓",
                NotificationKind::Error => "⚠",
            };
            match kind {
                NotificationKind::Success => assert_eq!(icon, "✓"),
                NotificationKind::Error => assert_eq!(icon, "⚠"),
            }
        }
    }

    #[test]
    fn test_toast_dismiss_clears_notification() {
        // The dismiss handler logic: Some -> None
        let mut current = Some(Notification::success("Created"));
        assert!(current.is_some());
        current = None;
        assert!(current.is_none());
    }
}
