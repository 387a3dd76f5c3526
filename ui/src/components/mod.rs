pub mod confirm_modal;
pub mod fields;
pub mod navbar;
pub mod require_auth;
pub mod section_card;
pub mod section_navigator;
pub mod toast;

pub use confirm_modal::ConfirmModal;
pub use fields::{Checkbox, Checklist, SelectInput, TextArea, TextInput};
pub use navbar::Navbar;
pub use require_auth::RequireAuth;
pub use section_card::SectionCard;
pub use section_navigator::SectionNavigator;
pub use toast::ToastContainer;
