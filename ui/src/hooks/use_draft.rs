use std::rc::Rc;
use yew::prelude::*;

/// Local edit state updated through closures, so async completions always
/// apply to the latest value rather than the one captured at render time.
#[derive(PartialEq)]
pub struct Draft<T>(T);

impl<T: Clone + 'static> Reducible for Draft<T> {
    type Action = Box<dyn FnOnce(&mut T)>;

    fn reduce(self: Rc<Self>, apply: Self::Action) -> Rc<Self> {
        let mut value = self.0.clone();
        apply(&mut value);
        Rc::new(Draft(value))
    }
}

pub struct DraftHandle<T: Clone + 'static> {
    inner: UseReducerHandle<Draft<T>>,
}

impl<T: Clone + 'static> Clone for DraftHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> PartialEq for DraftHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Clone + 'static> DraftHandle<T> {
    /// The value as of this render.
    pub fn get(&self) -> &T {
        &self.inner.0
    }

    pub fn update(&self, apply: impl FnOnce(&mut T) + 'static) {
        self.inner.dispatch(Box::new(apply));
    }

    /// A callback that feeds its input through `apply`.
    pub fn callback<V: 'static>(
        &self,
        apply: impl Fn(&mut T, V) + 'static,
    ) -> Callback<V> {
        let handle = self.clone();
        let apply = Rc::new(apply);
        Callback::from(move |value: V| {
            let apply = apply.clone();
            handle.update(move |draft| apply(draft, value));
        })
    }
}

#[hook]
pub fn use_draft<T, F>(init: F) -> DraftHandle<T>
where
    T: Clone + 'static,
    F: FnOnce() -> T,
{
    let inner = use_reducer(move || Draft(init()));
    DraftHandle { inner }
}
