//! Seasonal prices. Whole-house rentals have one grid; rent-by-room houses
//! have one grid per room, each saved on its own.

use forms::{
    Feedback, FormErrors, FormStatus, Section, SubmitError,
    sections::pricing::{PriceGrid, PriceKind, PricingForm},
    workflow::submit_and_refresh,
};
use payloads::{RoomId, Season};
use std::collections::{BTreeMap, BTreeSet};
use yew::prelude::*;

use super::SectionProps;
use crate::{
    components::{SectionCard, TextInput},
    contexts::toast::use_toast,
    get_api_client,
    hooks::{use_cancel_token, use_draft},
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PriceTarget {
    House,
    Room(RoomId),
}

#[derive(Clone, PartialEq, Default)]
struct PricingState {
    form: PricingForm,
    saving: BTreeSet<PriceTarget>,
    errors: BTreeMap<PriceTarget, FormErrors>,
}

impl PricingState {
    fn grid_mut(&mut self, target: &PriceTarget) -> Option<&mut PriceGrid> {
        match target {
            PriceTarget::House => Some(&mut self.form.house),
            PriceTarget::Room(id) => self.form.room_mut(id),
        }
    }

    fn status(&self, target: &PriceTarget) -> FormStatus {
        if self.saving.contains(target) {
            FormStatus::Submitting
        } else {
            FormStatus::Ready
        }
    }

    fn finish(&mut self, target: &PriceTarget, invalid: Option<&Feedback>) {
        self.saving.remove(target);
        if let Some(Feedback::Invalid(fields)) = invalid {
            self.errors
                .entry(target.clone())
                .or_default()
                .apply_validation(fields);
        }
    }
}

fn season_label(season: Season) -> &'static str {
    match season {
        Season::Spring => "Spring",
        Season::Summer => "Summer",
        Season::Autumn => "Autumn",
        Season::Winter => "Winter",
    }
}

type CellInput = (PriceTarget, Season, PriceKind, String);

fn price_grid(
    target: &PriceTarget,
    grid: &PriceGrid,
    kinds: &[PriceKind],
    errors: Option<&FormErrors>,
    on_input: &Callback<CellInput>,
) -> Html {
    let cell = |season: Season, kind: PriceKind| {
        let error = errors
            .and_then(|e| e.get(&kind.field_name(season)))
            .map(|e| AttrValue::from(e.to_string()));
        let target = target.clone();
        html! {
            <TextInput
                label={kind.label()}
                value={grid.display(season, kind)}
                numeric=true
                {error}
                on_input={on_input.reform(move |value: String| {
                    (target.clone(), season, kind, value)
                })}
            />
        }
    };

    html! {
        <div class="space-y-4">
            {for Season::ALL.into_iter().map(|season| html! {
                <fieldset>
                    <legend class="text-sm font-medium mb-2">
                        {season_label(season)}
                    </legend>
                    <div class="grid gap-3 sm:grid-cols-3 lg:grid-cols-5">
                        {for kinds.iter().map(|kind| cell(season, *kind))}
                    </div>
                </fieldset>
            })}
        </div>
    }
}

/// Prices are seeded once on mount. Saving one room's grid reloads the
/// house, and reseeding then would drop edits to the other rooms.
#[function_component]
pub fn PricingSection(props: &SectionProps) -> Html {
    let draft = {
        let house = props.house.clone();
        use_draft(move || PricingState {
            form: PricingForm::seed(&house),
            ..Default::default()
        })
    };
    let toast = use_toast();
    let token = use_cancel_token();

    let on_input = draft.callback(
        |state: &mut PricingState, (target, season, kind, value): CellInput| {
            if let Some(errors) = state.errors.get_mut(&target) {
                errors.clear_field(&kind.field_name(season));
            }
            if let Some(grid) = state.grid_mut(&target) {
                grid.set(season, kind, &value);
            }
        },
    );

    let save = {
        let draft = draft.clone();
        let house_id = props.house.uuid.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |target: PriceTarget| {
            let current = draft.get();
            if current.saving.contains(&target) {
                return;
            }
            let submission = match &target {
                PriceTarget::House => Ok(current.form.house_submission()),
                PriceTarget::Room(id) => current.form.room_submission(id),
            };
            let submission = match submission {
                Ok(submission) => submission,
                Err(errors) => {
                    draft.update(move |state| {
                        state.errors.insert(target, errors);
                    });
                    return;
                }
            };
            {
                let target = target.clone();
                draft.update(move |state| {
                    if let Some(errors) = state.errors.get_mut(&target) {
                        errors.begin_submit();
                    }
                    state.saving.insert(target);
                });
            }

            let draft = draft.clone();
            let toast = toast.clone();
            let on_saved = on_saved.clone();
            let house_id = house_id.clone();
            let token = token.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let pending =
                    submit_and_refresh(&client, &house_id, &submission);
                let Some(result) = token.run(pending).await else {
                    return;
                };
                match result {
                    Ok(house) => {
                        draft.update(move |state| {
                            state.errors.remove(&target);
                            state.finish(&target, None);
                        });
                        toast.success("Prices saved");
                        on_saved.emit(house);
                    }
                    Err(SubmitError::Write(e)) => {
                        let feedback = Feedback::from_error(&e);
                        toast.feedback(&feedback, "Prices saved");
                        draft.update(move |state| {
                            state.finish(&target, Some(&feedback))
                        });
                    }
                    Err(e @ SubmitError::Refresh(_)) => {
                        draft.update(move |state| state.finish(&target, None));
                        toast.error(e.to_string());
                    }
                }
            });
        })
    };

    let state = draft.get();
    let form = &state.form;
    let kinds: Vec<PriceKind> = form.visible_kinds().collect();

    if !form.is_rent_room {
        let target = PriceTarget::House;
        return html! {
            <SectionCard
                title={Section::Pricing.title()}
                status={state.status(&target)}
                errors={state.errors.get(&target).cloned().unwrap_or_default()}
                on_submit={Some(save.reform(|_: ()| PriceTarget::House))}
            >
                {price_grid(
                    &target,
                    &form.house,
                    &kinds,
                    state.errors.get(&target),
                    &on_input,
                )}
            </SectionCard>
        };
    }

    html! {
        <div class="space-y-6">
            if form.rooms.is_empty() {
                <p class="text-sm text-neutral-500">
                    {"Add rooms before setting their prices."}
                </p>
            }
            {for form.rooms.iter().map(|room| {
                let target = PriceTarget::Room(room.room_id.clone());
                let on_submit = {
                    let target = target.clone();
                    save.reform(move |_: ()| target.clone())
                };
                html! {
                    <SectionCard
                        key={room.room_id.to_string()}
                        title={format!("Prices for {}", room.name)}
                        status={state.status(&target)}
                        errors={state
                            .errors
                            .get(&target)
                            .cloned()
                            .unwrap_or_default()}
                        on_submit={Some(on_submit)}
                    >
                        {price_grid(
                            &target,
                            &room.grid,
                            &kinds,
                            state.errors.get(&target),
                            &on_input,
                        )}
                    </SectionCard>
                }
            })}
        </div>
    }
}
