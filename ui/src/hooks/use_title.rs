use yew::prelude::*;

/// Sets the document title to `{title} · Host portal`.
#[hook]
pub fn use_title(title: &str) {
    let title = format!("{title} · Host portal");
    use_effect_with(title, |title| {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(title);
        }
    });
}
