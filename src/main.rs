//! Asteroid finder web app using Yew.
//! Wires the search form to the loading/selection pipeline.

use asteroid_finder::{
    config::*, run_search, FormInput, HttpSource, Layout, ResultBlock, SearchQuery,
    SubmissionTracker,
};
use log::{error, warn, LevelFilter};
use std::rc::Rc;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;
use yew::prelude::*;

mod components;
mod hooks;

use components::{LayoutPicker, ResultList};
use hooks::use_text_field;

/// Form, layout choice and results.
#[function_component]
pub fn App() -> Html {
    let ores = use_text_field(DEFAULT_ORES.to_string());
    let origin = use_text_field(DEFAULT_ORIGIN.to_string());
    let max_distance = use_text_field(DEFAULT_MAX_DISTANCE.to_string());
    let amount = use_text_field(DEFAULT_AMOUNT.to_string());

    let layout = use_state(Layout::default);
    let blocks = use_state(|| Rc::new(Vec::<ResultBlock>::new()));
    // Shared by every submission so a newer one can supersede older ones
    let tracker = use_memo((), |_| SubmissionTracker::new());

    let onsubmit = {
        let form = FormInput {
            ores: ores.text.clone(),
            origin: origin.text.clone(),
            max_distance: max_distance.text.clone(),
            amount: amount.text.clone(),
        };
        let blocks = blocks.clone();
        let tracker = tracker.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let query = match SearchQuery::from_form(&form) {
                Ok(query) => query,
                Err(err) => {
                    warn!("Search not started: {}", err);
                    return;
                }
            };

            let blocks = blocks.clone();
            let tracker = tracker.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let sink = move |shown: Vec<ResultBlock>| blocks.set(Rc::new(shown));
                if let Err(err) = run_search(&HttpSource::default(), &sink, &query, &tracker).await
                {
                    error!("Search failed: {}", err);
                }
            });
        })
    };

    let on_layout = {
        let layout = layout.clone();
        Callback::from(move |choice: Layout| layout.set(choice))
    };

    html! {
        <div class="container">
            <h1>{ "Asteroid Finder" }</h1>
            <form id="search-form" class="form-section" {onsubmit}>
                <div class="form-group">
                    <label for="target-ores">{ "Target ores (comma separated):" }</label>
                    <input id="target-ores" type="text"
                        value={ores.text.clone()}
                        oninput={ores.oninput.clone()} />
                </div>
                <div class="form-group">
                    <label for="origin-gps">{ "Origin GPS:" }</label>
                    <input id="origin-gps" type="text"
                        placeholder="GPS:Name:X:Y:Z:#FF75C9F1:"
                        value={origin.text.clone()}
                        oninput={origin.oninput.clone()} />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="max-distance">{ "Max distance (m, 0 = any):" }</label>
                        <input id="max-distance" type="number" min="0" step="any"
                            value={max_distance.text.clone()}
                            oninput={max_distance.oninput.clone()} />
                    </div>
                    <div class="form-group">
                        <label for="amount">{ "Amount:" }</label>
                        <input id="amount" type="number" min="0" step="1"
                            value={amount.text.clone()}
                            oninput={amount.oninput.clone()} />
                    </div>
                </div>
                <button type="submit" class="btn-primary">{ "Search" }</button>
            </form>

            <LayoutPicker current={*layout} onchange={on_layout} />

            <ResultList blocks={(*blocks).clone()} layout={*layout} />
        </div>
    }
}

/// Entry point: installs the console logger and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    match gloo_utils::document().get_element_by_id(APP_ROOT_ID) {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
