//! Labelled inputs shared by the section forms. Each reports the raw input
//! value; formatting and parsing belong to the form state.

use payloads::responses::ReferenceOption;
use forms::TagSet;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

const INPUT_CLASS: &str = "w-full px-3 py-2 text-sm border rounded-md \
    border-neutral-300 dark:border-neutral-600 bg-white \
    dark:bg-neutral-700 focus:outline-none focus:ring-2 \
    focus:ring-neutral-500 disabled:opacity-50";

fn field_error(error: &Option<AttrValue>) -> Html {
    match error {
        Some(message) => html! {
            <p class="mt-1 text-sm text-red-600 dark:text-red-400">
                {message}
            </p>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct TextInputProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<String>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    /// Show a numeric keypad on phones.
    #[prop_or_default]
    pub numeric: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn TextInput(props: &TextInputProps) -> Html {
    let oninput = props.on_input.reform(|e: InputEvent| {
        e.target_unchecked_into::<HtmlInputElement>().value()
    });
    let inputmode = props.numeric.then_some("numeric");

    html! {
        <label class="block">
            <span class="block text-sm font-medium mb-1">{&props.label}</span>
            <input
                type="text"
                class={INPUT_CLASS}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                {inputmode}
                disabled={props.disabled}
                {oninput}
            />
            {field_error(&props.error)}
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextAreaProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<String>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component]
pub fn TextArea(props: &TextAreaProps) -> Html {
    let oninput = props.on_input.reform(|e: InputEvent| {
        e.target_unchecked_into::<HtmlTextAreaElement>().value()
    });

    html! {
        <label class="block">
            <span class="block text-sm font-medium mb-1">{&props.label}</span>
            <textarea
                rows="4"
                class={INPUT_CLASS}
                value={props.value.clone()}
                {oninput}
            />
            {field_error(&props.error)}
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectInputProps {
    pub label: AttrValue,
    /// (value, label) pairs.
    pub choices: Vec<(String, String)>,
    /// Empty when nothing is chosen.
    pub selected: AttrValue,
    /// Emits the chosen value, or "" for the blank entry.
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("Choose..."))]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component]
pub fn SelectInput(props: &SelectInputProps) -> Html {
    let onchange = props.on_change.reform(|e: Event| {
        e.target_unchecked_into::<HtmlSelectElement>().value()
    });

    html! {
        <label class="block">
            <span class="block text-sm font-medium mb-1">{&props.label}</span>
            <select class={INPUT_CLASS} {onchange}>
                <option value="" selected={props.selected.is_empty()}>
                    {&props.placeholder}
                </option>
                {for props.choices.iter().map(|(value, label)| html! {
                    <option
                        value={value.clone()}
                        selected={props.selected.as_str() == value.as_str()}
                    >
                        {label}
                    </option>
                })}
            </select>
            {field_error(&props.error)}
        </label>
    }
}

/// Select choices for a reference option list.
pub fn option_choices(options: &[ReferenceOption]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|o| (o.key.clone(), o.label.clone()))
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct CheckboxProps {
    pub label: AttrValue,
    pub checked: bool,
    pub on_change: Callback<bool>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn Checkbox(props: &CheckboxProps) -> Html {
    let onchange = props.on_change.reform(|e: Event| {
        e.target_unchecked_into::<HtmlInputElement>().checked()
    });

    html! {
        <label class="inline-flex items-center gap-2 text-sm">
            <input
                type="checkbox"
                checked={props.checked}
                disabled={props.disabled}
                {onchange}
            />
            {&props.label}
        </label>
    }
}

/// A tag set rendered as one checkbox per option.
#[derive(Properties, PartialEq)]
pub struct ChecklistProps {
    pub label: AttrValue,
    pub options: Vec<ReferenceOption>,
    pub tags: TagSet,
    /// Emits the key of the option that was clicked.
    pub on_toggle: Callback<String>,
}

#[function_component]
pub fn Checklist(props: &ChecklistProps) -> Html {
    let boxes = props.tags.checklist(&props.options).map(|(option, checked)| {
        let key = option.key.clone();
        html! {
            <Checkbox
                label={option.label.clone()}
                {checked}
                on_change={props.on_toggle.reform(move |_: bool| key.clone())}
            />
        }
    });

    html! {
        <fieldset>
            <legend class="text-sm font-medium mb-2">{&props.label}</legend>
            if props.options.is_empty() {
                <p class="text-sm text-neutral-500">
                    {"Nothing to choose from"}
                </p>
            }
            <div class="grid grid-cols-2 sm:grid-cols-3 gap-2">
                {for boxes}
            </div>
        </fieldset>
    }
}
