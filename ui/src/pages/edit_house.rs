//! The house editor: loads the house once, keeps the shared snapshot and
//! mounts the section picked in the navigator.

use forms::{Section, WorkflowAction, WorkflowState, workflow::load};
use payloads::{
    HouseId,
    responses::{House, UserProfile},
};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    Route,
    components::{RequireAuth, SectionNavigator},
    contexts::toast::use_toast,
    get_api_client,
    hooks::{DraftHandle, use_cancel_token, use_draft, use_title},
    sections::{SectionProps, render_section},
};

#[derive(Properties, PartialEq, Clone)]
pub struct EditHouseProps {
    pub house_id: HouseId,
    /// Section slug from the URL. Unknown slugs open the first section.
    #[prop_or_default]
    pub section: Option<String>,
}

#[function_component]
pub fn EditHousePage(props: &EditHouseProps) -> Html {
    let render = {
        let props = props.clone();
        Callback::from(move |_: UserProfile| {
            let EditHouseProps { house_id, section } = props.clone();
            // a different house gets a fresh editor
            let key = house_id.to_string();
            html! {
                <HouseEditor
                    {key}
                    {house_id}
                    {section}
                />
            }
        })
    };

    html! { <RequireAuth {render} /> }
}

fn dispatch(workflow: &DraftHandle<WorkflowState>, action: WorkflowAction) {
    workflow.update(move |state| *state = state.clone().apply(action));
}

#[function_component]
fn HouseEditor(props: &EditHouseProps) -> Html {
    let active = props
        .section
        .as_deref()
        .and_then(Section::from_slug)
        .unwrap_or_default();
    let workflow = {
        let house_id = props.house_id.clone();
        use_draft(move || WorkflowState::new(house_id, active))
    };
    let toast = use_toast();
    let token = use_cancel_token();
    let navigator = use_navigator().unwrap();

    let state = workflow.get();
    let title = match &state.house {
        Some(house) => format!("{} · {}", state.active.title(), house.name),
        None => "Edit house".to_string(),
    };
    use_title(&title);

    {
        let workflow = workflow.clone();
        let house_id = props.house_id.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let pending = load(&client, &house_id);
                let Some(result) = token.run(pending).await else {
                    return;
                };
                let action = match result {
                    Ok(house) => WorkflowAction::Loaded(house),
                    Err(e) => {
                        tracing::warn!("failed to load house {house_id}: {e}");
                        WorkflowAction::LoadFailed(e.to_string())
                    }
                };
                dispatch(&workflow, action);
            });
        });
    }

    {
        let navigator = navigator.clone();
        let error = state
            .should_redirect()
            .then(|| state.load_error.clone())
            .flatten();
        use_effect_with(error, move |error| {
            if let Some(message) = error {
                toast.error(format!("Could not open this house: {message}"));
                navigator.push(&Route::Dashboard);
            }
        });
    }

    // the URL is the source of truth for the active section
    {
        let workflow = workflow.clone();
        use_effect_with(active, move |active| {
            if workflow.get().active != *active {
                dispatch(&workflow, WorkflowAction::Select(*active));
            }
        });
    }

    let on_select = {
        let id = props.house_id.0.clone();
        Callback::from(move |section: Section| {
            navigator.push(&Route::EditHouseSection {
                id: id.clone(),
                section: section.slug().to_string(),
            });
        })
    };

    let on_saved = {
        let workflow = workflow.clone();
        Callback::from(move |house: House| {
            dispatch(&workflow, WorkflowAction::Refreshed(house));
        })
    };

    let Some(house) = &state.house else {
        return html! {
            <div class="text-center py-12 text-neutral-600">
                {"Loading house..."}
            </div>
        };
    };
    let section_props = SectionProps {
        house: Rc::new(house.clone()),
        revision: state.revision,
        on_saved,
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{&house.name}</h1>
            <div class="grid gap-6 md:grid-cols-[14rem_1fr]">
                <aside>
                    <SectionNavigator active={state.active} {on_select} />
                </aside>
                <div>
                    {render_section(state.active, &section_props)}
                </div>
            </div>
        </div>
    }
}
