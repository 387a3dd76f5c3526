//! Section state for the house editor.
//!
//! Each section form seeds its edit state from the current house snapshot
//! and the reference lists it needs, exposes small mutation methods, and
//! turns its state into a request body. [`workflow`] owns the snapshot and
//! runs the write-then-refresh round trip.

pub mod cancel;
pub mod format;
pub mod items;
pub mod navigator;
pub mod options;
pub mod profile;
pub mod seed;
pub mod sections;
pub mod status;
pub mod tags;
pub mod workflow;

pub use cancel::{CancelOnDrop, CancellationToken};
pub use items::{ItemAction, ItemKey, ItemList, ItemStatus, Removal};
pub use navigator::{Category, NavigatorState, Section};
pub use sections::SectionForm;
pub use options::OptionLists;
pub use status::{Feedback, FormErrors, FormStatus};
pub use tags::TagSet;
pub use workflow::{Submission, SubmitError, WorkflowAction, WorkflowState};
