use forms::{FormErrors, FormStatus};
use yew::prelude::*;

/// Frame around a section form: title, load warnings, a general error and
/// the submit button. The button is only live while the form is ready.
#[derive(Properties, PartialEq)]
pub struct SectionCardProps {
    pub title: AttrValue,
    pub status: FormStatus,
    #[prop_or_default]
    pub errors: FormErrors,
    /// Reference lists that failed to load.
    #[prop_or_default]
    pub option_errors: Vec<String>,
    /// Sections that save item by item leave this unset and get no submit
    /// button.
    #[prop_or_default]
    pub on_submit: Option<Callback<()>>,
    #[prop_or(AttrValue::Static("Save"))]
    pub submit_text: AttrValue,
    pub children: Html,
}

#[function_component]
pub fn SectionCard(props: &SectionCardProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(on_submit) = &on_submit {
                on_submit.emit(());
            }
        })
    };

    html! {
        <form
            {onsubmit}
            class="bg-white dark:bg-neutral-800 rounded-lg shadow-sm border
                   border-neutral-200 dark:border-neutral-700 p-6 space-y-6"
        >
            <h2 class="text-lg font-semibold">{&props.title}</h2>

            if !props.option_errors.is_empty() {
                <div class="p-3 rounded-md bg-amber-50 dark:bg-amber-900/20
                            border border-amber-200 dark:border-amber-700
                            text-sm text-amber-800 dark:text-amber-200">
                    <p>{"Some choices could not be loaded:"}</p>
                    <ul class="list-disc ml-5">
                        {for props.option_errors.iter().map(|e| html! {
                            <li>{e}</li>
                        })}
                    </ul>
                </div>
            }

            if props.status == FormStatus::LoadingOptions {
                <p class="text-sm text-neutral-500">{"Loading..."}</p>
            }

            <fieldset disabled={props.status.is_busy()} class="space-y-6">
                {props.children.clone()}
            </fieldset>

            if let Some(message) = props.errors.general() {
                <p class="text-sm text-red-600 dark:text-red-400">
                    {message}
                </p>
            }

            if props.on_submit.is_some() {
                <div class="flex justify-end">
                    <button
                        type="submit"
                        disabled={!props.status.can_submit()}
                        class="px-4 py-2 text-sm font-medium text-white
                               bg-neutral-900 dark:bg-neutral-100
                               dark:text-neutral-900 rounded-md
                               hover:bg-neutral-800 disabled:opacity-50"
                    >
                        {if props.status == FormStatus::Submitting {
                            "Saving..."
                        } else {
                            props.submit_text.as_str()
                        }}
                    </button>
                </div>
            }
        </form>
    }
}
