use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callback for a free-text form field.
#[derive(Clone, PartialEq)]
pub struct TextField {
    /// The current text content of the input field.
    pub text: String,
    /// Callback for the input's `oninput` event.
    pub oninput: Callback<InputEvent>,
}

/// Custom hook keeping an input's text in component state.
///
/// Validation happens when the form is submitted, not per keystroke.
#[hook]
pub fn use_text_field(initial: String) -> TextField {
    let text_state_handle = use_state(move || initial);

    let oninput = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    TextField {
        text: (*text_state_handle).clone(),
        oninput,
    }
}
