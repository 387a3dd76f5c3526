use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Second step of a two-step delete.
#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_text: AttrValue,
    pub on_confirm: Callback<()>,
    /// Cancel button or a click on the backdrop.
    pub on_close: Callback<()>,
}

#[function_component]
pub fn ConfirmModal(props: &ConfirmModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(backdrop) = backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>() == Some(&backdrop)
            {
                on_close.emit(());
            }
        })
    };

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            class="fixed inset-0 bg-neutral-900/50 z-50 flex items-center
                   justify-center p-4"
        >
            <div class="bg-white dark:bg-neutral-800 rounded-lg shadow-xl
                        max-w-md w-full p-6">
                <h3 class="text-lg font-semibold mb-4">{&props.title}</h3>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {&props.message}
                </p>
                <div class="flex justify-end gap-3 mt-6">
                    <button
                        type="button"
                        onclick={props.on_close.reform(|_| ())}
                        class="px-4 py-2 text-sm font-medium rounded-md
                               border border-neutral-300
                               dark:border-neutral-600
                               hover:bg-neutral-50 dark:hover:bg-neutral-700"
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="button"
                        onclick={props.on_confirm.reform(|_| ())}
                        class="px-4 py-2 text-sm font-medium text-white
                               bg-red-600 hover:bg-red-700 rounded-md"
                    >
                        {&props.confirm_text}
                    </button>
                </div>
            </div>
        </div>
    }
}
