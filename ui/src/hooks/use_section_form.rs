//! Shared driver for the sections that save with a single submit.

use forms::{
    Feedback, FormErrors, FormStatus, OptionLists, SectionForm, SubmitError,
    status::FormEvent, workflow::submit_and_refresh,
};
use payloads::responses::House;
use std::rc::Rc;
use yew::prelude::*;

use super::{DraftHandle, use_cancel_token, use_draft, use_options};
use crate::{contexts::toast::use_toast, get_api_client};

#[derive(Clone, PartialEq)]
pub struct SectionState<F> {
    pub form: F,
    pub status: FormStatus,
    pub errors: FormErrors,
    options: OptionLists,
    house: Option<Rc<House>>,
}

impl<F: SectionForm + Default> SectionState<F> {
    fn new() -> Self {
        Self {
            form: F::default(),
            status: FormStatus::Idle.next(FormEvent::Mounted),
            errors: FormErrors::default(),
            options: OptionLists::default(),
            house: None,
        }
    }

    /// Seed once both the snapshot and the option lists are in.
    fn reseed(&mut self) {
        if self.status == FormStatus::LoadingOptions {
            return;
        }
        if let Some(house) = &self.house {
            self.form = F::seed(house, &self.options);
        }
    }

    fn options_loaded(&mut self, options: OptionLists) {
        self.options = options;
        self.status = self.status.next(FormEvent::OptionsLoaded);
        self.reseed();
    }

    fn house_changed(&mut self, house: Rc<House>) {
        self.house = Some(house);
        self.reseed();
    }

    fn finish(&mut self, invalid: Option<&payloads::FieldErrors>) {
        self.status = self.status.next(FormEvent::SubmitFinished);
        if let Some(fields) = invalid {
            self.errors.apply_validation(fields);
        }
    }
}

pub struct SectionHandle<F: Clone + 'static> {
    draft: DraftHandle<SectionState<F>>,
    pub submit: Callback<()>,
}

impl<F: SectionForm + 'static> SectionHandle<F> {
    pub fn form(&self) -> &F {
        &self.draft.get().form
    }

    pub fn status(&self) -> FormStatus {
        self.draft.get().status
    }

    pub fn options(&self) -> &OptionLists {
        &self.draft.get().options
    }

    pub fn errors(&self) -> &FormErrors {
        &self.draft.get().errors
    }

    pub fn error(&self, field: &str) -> Option<AttrValue> {
        self.errors().get(field).map(|e| AttrValue::from(e.to_string()))
    }

    /// A callback that applies an input to the form and clears the error
    /// shown for `field`.
    pub fn edit<V: 'static>(
        &self,
        field: impl Into<String>,
        apply: impl Fn(&mut F, V) + 'static,
    ) -> Callback<V> {
        let field = field.into();
        self.draft.callback(move |state: &mut SectionState<F>, value: V| {
            state.errors.clear_field(&field);
            apply(&mut state.form, value);
        })
    }
}

/// Fetch the form's option lists, seed it from `house` and reseed whenever
/// `revision` moves. Submitting writes, reloads the house and hands the
/// fresh snapshot to `on_saved`.
#[hook]
pub fn use_section_form<F>(
    house: Rc<House>,
    revision: u64,
    on_saved: Callback<House>,
) -> SectionHandle<F>
where
    F: SectionForm + Default + 'static,
{
    let draft = use_draft(SectionState::<F>::new);
    let options = use_options(F::OPTIONS);
    let toast = use_toast();
    let token = use_cancel_token();

    {
        let draft = draft.clone();
        use_effect_with(options.data.clone(), move |data| {
            if let Some(lists) = data.as_ref() {
                let lists = lists.clone();
                draft.update(move |state| state.options_loaded(lists));
            }
        });
    }

    {
        let draft = draft.clone();
        let house = house.clone();
        use_effect_with(revision, move |_| {
            draft.update(move |state| state.house_changed(house));
        });
    }

    let submit = {
        let draft = draft.clone();
        let house_id = house.uuid.clone();
        Callback::from(move |_| {
            let current = draft.get();
            if !current.status.can_submit() {
                return;
            }
            let submission = match current.form.submission() {
                Ok(submission) => submission,
                Err(errors) => {
                    draft.update(move |state| state.errors = errors);
                    toast.error("Please correct the highlighted fields");
                    return;
                }
            };
            draft.update(|state| {
                state.status = state.status.next(FormEvent::Submit);
                state.errors.begin_submit();
            });

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
                        draft.update(|state| {
                            state.errors.clear();
                            state.finish(None);
                        });
                        toast.success("Saved");
                        on_saved.emit(house);
                    }
                    Err(SubmitError::Write(e)) => {
                        let feedback = Feedback::from_error(&e);
                        toast.feedback(&feedback, "Saved");
                        draft.update(move |state| match &feedback {
                            Feedback::Invalid(fields) => {
                                state.finish(Some(fields))
                            }
                            _ => state.finish(None),
                        });
                    }
                    Err(e @ SubmitError::Refresh(_)) => {
                        draft.update(|state| state.finish(None));
                        toast.error(e.to_string());
                    }
                }
            });
        })
    };

    SectionHandle { draft, submit }
}
