//! Photos of the house, uploaded and edited one at a time.

use forms::{
    Feedback, FormErrors, FormStatus, ItemAction, ItemKey, ItemStatus,
    Removal, Section,
    items::Entry,
    sections::images::{ImagesForm, MediaDraft, check_file, send_save},
};
use payloads::{ClientError, MediaId, requests::MediaFile};
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, HtmlInputElement};
use yew::prelude::*;

use super::{SectionProps, reload_house};
use crate::{
    backend_url,
    components::{ConfirmModal, SectionCard, TextInput},
    contexts::toast::use_toast,
    get_api_client,
    hooks::{use_cancel_token, use_draft},
};

#[derive(Clone, PartialEq, Default)]
struct ImagesState {
    form: ImagesForm,
    errors: BTreeMap<ItemKey, FormErrors>,
}

async fn read_file_as_bytes(file: &File) -> Result<Vec<u8>, String> {
    let file_reader =
        FileReader::new().map_err(|_| "Failed to create FileReader")?;

    let file_reader_clone = file_reader.clone();
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let file_reader_for_closure = file_reader_clone.clone();
        let onload = wasm_bindgen::closure::Closure::wrap(Box::new(
            move |_: web_sys::Event| {
                let outcome = match file_reader_for_closure.result() {
                    Ok(array_buffer) => resolve
                        .call1(&wasm_bindgen::JsValue::NULL, &array_buffer),
                    Err(_) => reject.call1(
                        &wasm_bindgen::JsValue::NULL,
                        &wasm_bindgen::JsValue::from_str("Failed to read file"),
                    ),
                };
                if outcome.is_err() {
                    tracing::warn!("file reader callback failed");
                }
            },
        )
            as Box<dyn FnMut(_)>);

        file_reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
    });

    file_reader
        .read_as_array_buffer(file)
        .map_err(|_| "Failed to start reading file")?;

    let result = JsFuture::from(promise)
        .await
        .map_err(|_| "Failed to read file")?;
    let array_buffer: js_sys::ArrayBuffer =
        result.dyn_into().map_err(|_| "Invalid file data")?;
    let uint8_array = js_sys::Uint8Array::new(&array_buffer);

    Ok(uint8_array.to_vec())
}

/// The first file picked in `input`, read into memory.
async fn picked_file(input: HtmlInputElement) -> Option<MediaFile> {
    let file = input.files()?.get(0)?;
    // let the same file be picked again later
    input.set_value("");
    match read_file_as_bytes(&file).await {
        Ok(data) => Some(MediaFile {
            file_name: file.name(),
            mime_type: file.type_(),
            data,
        }),
        Err(e) => {
            tracing::warn!("could not read {}: {e}", file.name());
            None
        }
    }
}

enum ImageEvent {
    Title(String),
    Replace(MediaFile),
}

fn preview(image: &MediaDraft) -> Html {
    match (&image.file, &image.url) {
        (Some(file), _) => html! {
            <div class="h-32 flex items-center justify-center rounded-md
                        bg-neutral-100 dark:bg-neutral-700 text-sm
                        text-neutral-600 dark:text-neutral-300 px-2">
                {format!("{} (not uploaded yet)", file.file_name)}
            </div>
        },
        (None, Some(url)) => html! {
            <img
                src={format!("{}{url}", backend_url())}
                alt={image.title.clone()}
                class="h-32 w-full object-cover rounded-md"
            />
        },
        (None, None) => html! {},
    }
}

struct ImageCallbacks {
    edit: Callback<(ItemKey, ImageEvent)>,
    pick: Callback<(ItemKey, HtmlInputElement)>,
    save: Callback<ItemKey>,
    make_main: Callback<ItemKey>,
    remove: Callback<ItemKey>,
}

fn image_card(
    entry: &Entry<MediaDraft, MediaId>,
    state: &ImagesState,
    callbacks: &ImageCallbacks,
) -> Html {
    let key = entry.key;
    let image = &entry.value;
    let items = &state.form.items;
    let busy = items.is_pending(key);
    let statuses = [ItemAction::Save, ItemAction::MakeMain, ItemAction::Delete]
        .map(|action| items.status(key, action));
    let saving = statuses[0] == ItemStatus::Pending;
    let error = |field: &str| {
        state
            .errors
            .get(&key)
            .and_then(|e| e.get(field))
            .map(|e| AttrValue::from(e.to_string()))
    };

    html! {
        <div
            key={format!("{key:?}")}
            class="border border-neutral-200 dark:border-neutral-700
                   rounded-md p-3 space-y-3"
        >
            {preview(image)}
            if image.is_main {
                <span class="inline-block text-xs font-medium px-2 py-0.5
                             rounded bg-neutral-900 text-white">
                    {"Main photo"}
                </span>
            }
            <TextInput
                label="Title"
                value={image.title.clone()}
                error={error("title")}
                on_input={callbacks.edit.reform(move |title: String| {
                    (key, ImageEvent::Title(title))
                })}
            />
            <label class="block text-sm">
                <span class="block mb-1">{"Replace file"}</span>
                <input
                    type="file"
                    accept="image/*"
                    disabled={busy}
                    onchange={callbacks.pick.reform(move |e: Event| {
                        (key, e.target_unchecked_into::<HtmlInputElement>())
                    })}
                />
            </label>
            if let Some(message) = error("file") {
                <p class="text-sm text-red-600 dark:text-red-400">
                    {message}
                </p>
            }
            {for statuses.iter().filter_map(|status| match status {
                ItemStatus::Error(message) => Some(html! {
                    <p class="text-sm text-red-600 dark:text-red-400">
                        {message}
                    </p>
                }),
                _ => None,
            })}
            <div class="flex flex-wrap justify-end gap-2">
                if entry.id.is_some() && !image.is_main {
                    <button
                        type="button"
                        disabled={busy}
                        onclick={callbacks
                            .make_main
                            .reform(move |_: MouseEvent| key)}
                        class="px-3 py-1.5 text-sm border rounded-md
                               border-neutral-300 disabled:opacity-50"
                    >
                        {"Make main"}
                    </button>
                }
                <button
                    type="button"
                    disabled={busy}
                    onclick={callbacks.remove.reform(move |_: MouseEvent| key)}
                    class="px-3 py-1.5 text-sm text-red-600 border
                           border-red-300 rounded-md disabled:opacity-50"
                >
                    {"Delete"}
                </button>
                <button
                    type="button"
                    disabled={busy}
                    onclick={callbacks.save.reform(move |_: MouseEvent| key)}
                    class="px-3 py-1.5 text-sm text-white bg-neutral-900
                           dark:bg-neutral-100 dark:text-neutral-900
                           rounded-md disabled:opacity-50"
                >
                    {if saving { "Saving..." } else { "Save" }}
                </button>
            </div>
        </div>
    }
}

#[function_component]
pub fn ImagesSection(props: &SectionProps) -> Html {
    let draft = {
        let house = props.house.clone();
        use_draft(move || ImagesState {
            form: ImagesForm::seed(&house),
            ..Default::default()
        })
    };
    let toast = use_toast();
    let token = use_cancel_token();
    let house_id = props.house.uuid.clone();
    let on_saved = props.on_saved.clone();

    let edit = draft.callback(
        |state: &mut ImagesState, (key, event): (ItemKey, ImageEvent)| {
            match event {
                ImageEvent::Title(title) => {
                    if let Some(errors) = state.errors.get_mut(&key) {
                        errors.clear_field("title");
                    }
                    state.form.set_title(key, &title);
                }
                ImageEvent::Replace(file) => {
                    if let Some(errors) = state.errors.get_mut(&key) {
                        errors.clear_field("file");
                    }
                    if let Err(message) = state.form.replace_file(key, file) {
                        state
                            .errors
                            .entry(key)
                            .or_default()
                            .set("file", message);
                    }
                }
            }
        },
    );

    let pick = {
        let edit = edit.clone();
        Callback::from(move |(key, input): (ItemKey, HtmlInputElement)| {
            let edit = edit.clone();
            yew::platform::spawn_local(async move {
                if let Some(file) = picked_file(input).await {
                    edit.emit((key, ImageEvent::Replace(file)));
                }
            });
        })
    };

    let add_image = {
        let draft = draft.clone();
        let toast = toast.clone();
        Callback::from(move |e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            let draft = draft.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                let Some(file) = picked_file(input).await else {
                    return;
                };
                if let Err(message) = check_file(&file) {
                    toast.error(message);
                    return;
                }
                draft.update(move |state| {
                    if let Err(message) = state.form.add_image(file) {
                        tracing::warn!("image rejected: {message}");
                    }
                });
            });
        })
    };

    let save = {
        let draft = draft.clone();
        let toast = toast.clone();
        let token = token.clone();
        let house_id = house_id.clone();
        let on_saved = on_saved.clone();
        Callback::from(move |key: ItemKey| {
            let mut planned = draft.get().form.clone();
            let save = match planned.begin_save(key) {
                None => return,
                Some(Err(errors)) => {
                    draft.update(move |state| {
                        state.errors.insert(key, errors);
                    });
                    return;
                }
                Some(Ok(save)) => save,
            };
            draft.update(move |state| {
                if let Some(errors) = state.errors.get_mut(&key) {
                    errors.begin_submit();
                }
                state.form.begin_save(key);
            });

            let draft = draft.clone();
            let toast = toast.clone();
            let token = token.clone();
            let house_id = house_id.clone();
            let on_saved = on_saved.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let pending = send_save(&client, &house_id, &save);
                let Some(result) = token.run(pending).await else {
                    return;
                };
                toast.feedback(&Feedback::from_result(&result), "Image saved");
                let saved = result.is_ok();
                draft.update(move |state| {
                    state.form.finish_save(key, result.as_ref());
                    if result.is_ok() {
                        state.errors.remove(&key);
                    }
                    if let Err(ClientError::Validation(fields)) = &result {
                        state
                            .errors
                            .entry(key)
                            .or_default()
                            .apply_validation(fields);
                    }
                });
                if saved {
                    token
                        .run(reload_house(&house_id, &on_saved, &toast))
                        .await;
                }
            });
        })
    };

    let make_main = {
        let draft = draft.clone();
        let toast = toast.clone();
        let token = token.clone();
        let house_id = house_id.clone();
        let on_saved = on_saved.clone();
        Callback::from(move |key: ItemKey| {
            let mut planned = draft.get().form.clone();
            let Some((id, upload)) = planned.begin_make_main(key) else {
                return;
            };
            draft.update(move |state| {
                state.form.begin_make_main(key);
            });

            let draft = draft.clone();
            let toast = toast.clone();
            let token = token.clone();
            let house_id = house_id.clone();
            let on_saved = on_saved.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let pending = client.update_media(&house_id, &id, &upload);
                let Some(result) = token.run(pending).await else {
                    return;
                };
                let result = result.map(|_| ());
                toast.feedback(
                    &Feedback::from_result(&result),
                    "Main photo changed",
                );
                let saved = result.is_ok();
                draft.update(move |state| {
                    state.form.finish_make_main(key, result.as_ref().copied());
                });
                if saved {
                    token
                        .run(reload_house(&house_id, &on_saved, &toast))
                        .await;
                }
            });
        })
    };

    let request_remove =
        draft.callback(|state: &mut ImagesState, key: ItemKey| {
            state.form.items.request_remove(key);
        });
    let cancel_remove = draft.callback(|state: &mut ImagesState, _: ()| {
        state.form.items.cancel_remove();
    });
    let confirm_remove = {
        let draft = draft.clone();
        Callback::from(move |_: ()| {
            let mut planned = draft.get().form.items.clone();
            let removal = planned.confirm_remove();
            draft.update(|state| {
                state.form.items.confirm_remove();
            });
            let Some(Removal::Remote { key, id }) = removal else {
                return;
            };

            let draft = draft.clone();
            let toast = toast.clone();
            let token = token.clone();
            let house_id = house_id.clone();
            let on_saved = on_saved.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let pending = client.delete_media(&house_id, &id);
                let Some(result) = token.run(pending).await else {
                    return;
                };
                toast.feedback(
                    &Feedback::from_result(&result),
                    "Image deleted",
                );
                let deleted = result.is_ok();
                draft.update(move |state| {
                    state
                        .form
                        .items
                        .finish_remove(key, result.map_err(|e| e.to_string()));
                });
                if deleted {
                    token
                        .run(reload_house(&house_id, &on_saved, &toast))
                        .await;
                }
            });
        })
    };

    let state = draft.get();
    let callbacks = ImageCallbacks {
        edit,
        pick,
        save,
        make_main,
        remove: request_remove,
    };

    html! {
        <SectionCard title={Section::Images.title()} status={FormStatus::Ready}>
            if state.form.items.is_empty() {
                <p class="text-sm text-neutral-500">{"No photos yet."}</p>
            }
            <div class="grid gap-4 sm:grid-cols-2">
                {for state
                    .form
                    .items
                    .iter()
                    .map(|entry| image_card(entry, state, &callbacks))}
            </div>
            <label class="block text-sm">
                <span class="block font-medium mb-1">{"Add a photo"}</span>
                <input type="file" accept="image/*" onchange={add_image} />
            </label>
            if state.form.items.confirming().is_some() {
                <ConfirmModal
                    title="Delete photo"
                    message="This photo will be removed from the listing."
                    on_confirm={confirm_remove}
                    on_close={cancel_remove}
                />
            }
        </SectionCard>
    }
}
