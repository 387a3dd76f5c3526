use forms::{CancelOnDrop, CancellationToken};
use yew::prelude::*;

/// A token cancelled when the calling component unmounts. Requests spawned
/// from event handlers run their result through it.
#[hook]
pub fn use_cancel_token() -> CancellationToken {
    let owner = use_mut_ref(CancelOnDrop::new);
    let token = owner.borrow().token();
    token
}
