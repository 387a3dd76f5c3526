//! Rooms are saved and deleted one at a time. The list is seeded when the
//! section mounts and then only changed by the user and by server answers,
//! so unsaved rooms survive other rooms' saves.

use forms::{
    Feedback, FormErrors, FormStatus, ItemAction, ItemKey, ItemStatus,
    Removal, Section,
    items::Entry,
    sections::rooms::{BedKind, RoomDraft, RoomsForm, send_save},
};
use payloads::{
    ClientError, OptionCategory, RoomId, responses::ReferenceOption,
};
use std::collections::BTreeMap;
use yew::prelude::*;

use super::{SectionProps, reload_house};
use crate::{
    components::{
        Checkbox, Checklist, ConfirmModal, SectionCard, TextInput,
    },
    contexts::toast::use_toast,
    get_api_client,
    hooks::{use_cancel_token, use_draft, use_options},
};

#[derive(Clone, PartialEq, Default)]
struct RoomsState {
    form: RoomsForm,
    errors: BTreeMap<ItemKey, FormErrors>,
}

enum RoomEdit {
    Name(String),
    Beds(BedKind, String),
    Facility(String),
    AirCondition(String),
    Master(bool),
}

impl RoomEdit {
    fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Beds(..) => "beds",
            Self::Facility(_) => "facilities",
            Self::AirCondition(_) => "air_conditions",
            Self::Master(_) => "is_master",
        }
    }

    fn apply(self, room: &mut RoomDraft) {
        match self {
            Self::Name(name) => room.name = name,
            Self::Beds(kind, input) => {
                let digits = forms::format::digits_only(&input);
                room.set_beds(kind, digits.parse().unwrap_or(0));
            }
            Self::Facility(key) => room.facilities.toggle(&key),
            Self::AirCondition(key) => room.air_conditions.toggle(&key),
            Self::Master(checked) => room.is_master = checked,
        }
    }
}

fn status_line(status: &ItemStatus) -> Html {
    match status {
        ItemStatus::Error(message) => html! {
            <p class="text-sm text-red-600 dark:text-red-400">{message}</p>
        },
        _ => html! {},
    }
}

struct RoomCallbacks {
    edit: Callback<(ItemKey, RoomEdit)>,
    save: Callback<ItemKey>,
    remove: Callback<ItemKey>,
}

fn room_card(
    entry: &Entry<RoomDraft, RoomId>,
    state: &RoomsState,
    facilities: &[ReferenceOption],
    air_conditions: &[ReferenceOption],
    callbacks: &RoomCallbacks,
) -> Html {
    let key = entry.key;
    let room = &entry.value;
    let items = &state.form.items;
    let saving = items.status(key, ItemAction::Save);
    let deleting = items.status(key, ItemAction::Delete);
    let busy = items.is_pending(key);
    let errors = state.errors.get(&key);
    let error = |field: &str| {
        errors
            .and_then(|e| e.get(field))
            .map(|e| AttrValue::from(e.to_string()))
    };
    let edit = |make: fn(String) -> RoomEdit| {
        callbacks.edit.reform(move |value: String| (key, make(value)))
    };

    let title = if room.is_living_room() {
        "Living room".to_string()
    } else if room.name.trim().is_empty() {
        "New room".to_string()
    } else {
        room.name.clone()
    };

    html! {
        <div
            key={format!("{key:?}")}
            class="border border-neutral-200 dark:border-neutral-700
                   rounded-md p-4 space-y-4"
        >
            <div class="flex items-center justify-between">
                <h3 class="font-medium">{title}</h3>
                <span class="text-sm text-neutral-500">
                    {format!("Sleeps {}", room.sleeps())}
                    if entry.id.is_none() {
                        {" · not saved yet"}
                    }
                </span>
            </div>

            <TextInput
                label="Name"
                value={room.name.clone()}
                error={error("name")}
                on_input={edit(RoomEdit::Name)}
            />

            <div class="grid gap-3 grid-cols-2 sm:grid-cols-4">
                {for BedKind::ALL.into_iter().map(|kind| html! {
                    <TextInput
                        label={kind.label()}
                        value={room.beds(kind).to_string()}
                        numeric=true
                        on_input={callbacks.edit.reform(move |v: String| {
                            (key, RoomEdit::Beds(kind, v))
                        })}
                    />
                })}
            </div>

            <Checklist
                label="Room facilities"
                options={facilities.to_vec()}
                tags={room.facilities.clone()}
                on_toggle={edit(RoomEdit::Facility)}
            />
            <Checklist
                label="Cooling and heating"
                options={air_conditions.to_vec()}
                tags={room.air_conditions.clone()}
                on_toggle={edit(RoomEdit::AirCondition)}
            />
            if !room.is_living_room() {
                <Checkbox
                    label="Master bedroom"
                    checked={room.is_master}
                    on_change={callbacks.edit.reform(move |checked: bool| {
                        (key, RoomEdit::Master(checked))
                    })}
                />
            }

            {status_line(&saving)}
            {status_line(&deleting)}

            <div class="flex justify-end gap-2">
                <button
                    type="button"
                    disabled={busy}
                    onclick={callbacks.remove.reform(move |_: MouseEvent| key)}
                    class="px-3 py-1.5 text-sm text-red-600 border
                           border-red-300 rounded-md disabled:opacity-50"
                >
                    {if deleting == ItemStatus::Pending {
                        "Deleting..."
                    } else {
                        "Delete"
                    }}
                </button>
                <button
                    type="button"
                    disabled={busy}
                    onclick={callbacks.save.reform(move |_: MouseEvent| key)}
                    class="px-3 py-1.5 text-sm text-white bg-neutral-900
                           dark:bg-neutral-100 dark:text-neutral-900
                           rounded-md disabled:opacity-50"
                >
                    {if saving == ItemStatus::Pending {
                        "Saving..."
                    } else {
                        "Save room"
                    }}
                </button>
            </div>
        </div>
    }
}

#[function_component]
pub fn RoomsSection(props: &SectionProps) -> Html {
    let draft = {
        let house = props.house.clone();
        use_draft(move || RoomsState {
            form: RoomsForm::seed(&house),
            ..Default::default()
        })
    };
    let options = use_options(RoomsForm::OPTIONS);
    let toast = use_toast();
    let token = use_cancel_token();

    let edit = draft.callback(
        |state: &mut RoomsState, (key, edit): (ItemKey, RoomEdit)| {
            if let Some(errors) = state.errors.get_mut(&key) {
                errors.clear_field(edit.field());
            }
            if let Some(room) = state.form.draft_mut(key) {
                edit.apply(room);
            }
        },
    );

    let add_room = draft.callback(|state: &mut RoomsState, _: MouseEvent| {
        state.form.add_room();
    });
    let add_living_room =
        draft.callback(|state: &mut RoomsState, _: MouseEvent| {
            state.form.add_living_room();
        });

    let save = {
        let draft = draft.clone();
        let toast = toast.clone();
        let token = token.clone();
        let house_id = props.house.uuid.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |key: ItemKey| {
            // plan on a copy; the real state is updated through the reducer
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
                toast.feedback(&Feedback::from_result(&result), "Room saved");
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

    let request_remove =
        draft.callback(|state: &mut RoomsState, key: ItemKey| {
            state.form.items.request_remove(key);
        });
    let cancel_remove = draft.callback(|state: &mut RoomsState, _: ()| {
        state.form.items.cancel_remove();
    });
    let confirm_remove = {
        let draft = draft.clone();
        let house_id = props.house.uuid.clone();
        let on_saved = props.on_saved.clone();
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
                let pending = client.delete_room(&house_id, &id);
                let Some(result) = token.run(pending).await else {
                    return;
                };
                toast.feedback(&Feedback::from_result(&result), "Room deleted");
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
    let lists = options.data.as_ref();
    let facilities = lists
        .map(|l| l.get(OptionCategory::RoomFacility).to_vec())
        .unwrap_or_default();
    let air_conditions = lists
        .map(|l| l.get(OptionCategory::AirCondition).to_vec())
        .unwrap_or_default();
    let option_errors = lists.map(|l| l.errors.clone()).unwrap_or_default();
    let callbacks = RoomCallbacks {
        edit,
        save,
        remove: request_remove,
    };

    html! {
        <SectionCard
            title={Section::Rooms.title()}
            status={FormStatus::Ready}
            {option_errors}
        >
            if state.form.items.is_empty() {
                <p class="text-sm text-neutral-500">{"No rooms yet."}</p>
            }
            <div class="space-y-4">
                {for state.form.items.iter().map(|entry| room_card(
                    entry,
                    state,
                    &facilities,
                    &air_conditions,
                    &callbacks,
                ))}
            </div>
            <div class="flex gap-2">
                <button
                    type="button"
                    onclick={add_room}
                    class="px-3 py-1.5 text-sm border rounded-md
                           border-neutral-300 dark:border-neutral-600"
                >
                    {"Add room"}
                </button>
                <button
                    type="button"
                    onclick={add_living_room}
                    disabled={!state.form.can_add_living_room()}
                    title={(!state.form.can_add_living_room())
                        .then_some("This house already has a living room")}
                    class="px-3 py-1.5 text-sm border rounded-md
                           border-neutral-300 dark:border-neutral-600
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {"Add living room"}
                </button>
            </div>
            if state.form.items.confirming().is_some() {
                <ConfirmModal
                    title="Delete room"
                    message="This room and its prices will be removed."
                    on_confirm={confirm_remove}
                    on_close={cancel_remove}
                />
            }
        </SectionCard>
    }
}
