pub mod use_cancel_token;
pub mod use_draft;
pub mod use_fetch;
pub mod use_logout;
pub mod use_options;
pub mod use_profile;
pub mod use_section_form;
pub mod use_title;

pub use use_cancel_token::use_cancel_token;
pub use use_draft::{DraftHandle, use_draft};
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_logout::{redirect_to_login, use_logout};
pub use use_options::use_options;
pub use use_profile::use_profile;
pub use use_section_form::{SectionHandle, use_section_form};
pub use use_title::use_title;

/// Distinguishes "not fetched yet" from "fetched and empty".
#[derive(Clone, PartialEq, Debug)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}
