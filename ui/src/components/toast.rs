use crate::contexts::toast::{Toast, ToastContext, ToastKind, use_toast};
use yew::prelude::*;

#[function_component]
pub fn ToastContainer() -> Html {
    let toasts = use_context::<ToastContext>()
        .map(|context| context.toasts.clone())
        .unwrap_or_default();

    if toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="fixed top-4 right-4 z-50 space-y-3 max-w-sm w-full">
            {for toasts.into_iter().map(|toast| {
                let key = toast.id.to_string();
                html! { <ToastItem {key} {toast} /> }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component]
fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;

    let (colors, icon) = match toast.kind {
        ToastKind::Error => (
            "bg-red-50 dark:bg-red-900 border-red-200 dark:border-red-800 \
             text-red-700 dark:text-red-400",
            "✕",
        ),
        ToastKind::Success => (
            "bg-green-50 dark:bg-green-900 border-green-200 \
             dark:border-green-800 text-green-700 dark:text-green-400",
            "✓",
        ),
    };

    let on_close = {
        let id = toast.id;
        Callback::from(move |_: MouseEvent| toast_handle.remove(id))
    };

    html! {
        <div class={format!("p-4 rounded-lg border shadow-lg {colors}")}
             role="status">
            <div class="flex items-start gap-3">
                <span class="text-sm font-medium">{icon}</span>
                <p class="flex-1 text-sm font-medium leading-5">
                    {&toast.message}
                </p>
                <button
                    onclick={on_close}
                    class="text-neutral-400 hover:text-neutral-600
                           dark:hover:text-neutral-200"
                    title="Dismiss"
                >
                    {"×"}
                </button>
            </div>
        </div>
    }
}
