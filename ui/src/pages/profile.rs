use forms::{
    Feedback, FormErrors,
    profile::{VendorField, VendorForm},
};
use payloads::responses::UserProfile;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State,
    components::{RequireAuth, TextInput},
    contexts::toast::use_toast,
    get_api_client,
    hooks::{use_cancel_token, use_draft, use_logout, use_title},
    session,
};

#[function_component]
pub fn ProfilePage() -> Html {
    use_title("Profile");
    let render = Callback::from(|profile: UserProfile| {
        html! { <ProfilePageInner {profile} /> }
    });

    html! { <RequireAuth {render} /> }
}

#[derive(Properties, PartialEq)]
struct ProfilePageInnerProps {
    profile: UserProfile,
}

#[derive(Clone, PartialEq)]
struct VendorState {
    form: VendorForm,
    errors: FormErrors,
    is_saving: bool,
}

#[function_component]
fn ProfilePageInner(props: &ProfilePageInnerProps) -> Html {
    let profile = &props.profile;
    let logout = use_logout();
    let toast = use_toast();
    let token = use_cancel_token();
    let (_, dispatch) = use_store::<State>();
    let draft = {
        let profile = profile.clone();
        use_draft(move || VendorState {
            form: VendorForm::seed(&profile),
            errors: FormErrors::default(),
            is_saving: false,
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let current = draft.get();
            if current.is_saving {
                return;
            }
            let details = match current.form.submission() {
                Ok(details) => details,
                Err(errors) => {
                    draft.update(move |state| state.errors = errors);
                    return;
                }
            };
            draft.update(|state| {
                state.is_saving = true;
                state.errors.begin_submit();
            });

            let draft = draft.clone();
            let toast = toast.clone();
            let token = token.clone();
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let pending = client.update_vendor_profile(&details);
                let Some(result) = token.run(pending).await else {
                    return;
                };
                let feedback = Feedback::from_result(&result);
                toast.feedback(&feedback, "Profile saved");
                if let Ok(profile) = result {
                    session::cache_user(&profile);
                    dispatch.reduce_mut(|state| state.login(profile));
                }
                draft.update(move |state| {
                    state.is_saving = false;
                    match &feedback {
                        Feedback::Saved => state.errors.clear(),
                        Feedback::Invalid(fields) => {
                            state.errors.apply_validation(fields)
                        }
                        _ => {}
                    }
                });
            });
        })
    };

    let state = draft.get();
    let inputs = VendorField::ALL.into_iter().map(|field| {
        let on_input = draft.callback(
            move |state: &mut VendorState, value: String| {
                state.errors.clear_field(field.name());
                state.form.set(field, &value);
            },
        );
        html! {
            <TextInput
                label={field.label()}
                value={state.form.get(field).to_string()}
                error={state
                    .errors
                    .get(field.name())
                    .map(|e| AttrValue::from(e.to_string()))}
                numeric={field == VendorField::NationalCode}
                {on_input}
            />
        }
    });

    html! {
        <div class="max-w-2xl space-y-8">
            <div>
                <h1 class="text-2xl font-bold">{profile.display_name()}</h1>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {&profile.mobile}
                    if profile.is_vendor {
                        {" · host account"}
                    }
                </p>
            </div>

            <form {onsubmit} class="space-y-4">
                <h2 class="text-lg font-semibold">{"Payout details"}</h2>
                <div class="grid gap-4 sm:grid-cols-2">
                    {for inputs}
                </div>
                if let Some(message) = state.errors.general() {
                    <p class="text-sm text-red-600 dark:text-red-400">
                        {message}
                    </p>
                }
                <button
                    type="submit"
                    disabled={state.is_saving}
                    class="px-4 py-2 text-sm font-medium text-white
                           bg-neutral-900 rounded-md disabled:opacity-50"
                >
                    {if state.is_saving { "Saving..." } else { "Save" }}
                </button>
            </form>

            <button
                type="button"
                onclick={logout}
                class="text-sm text-red-600 underline"
            >
                {"Log out"}
            </button>
        </div>
    }
}
