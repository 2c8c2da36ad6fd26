//! Pure Yew view components for the asteroid finder.

use asteroid_finder::config::RESULTS_ELEMENT_ID;
use asteroid_finder::{Layout, ResultBlock};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultListProps {
    pub blocks: Rc<Vec<ResultBlock>>,
    pub layout: Layout,
}

/// The results container. Its children are replaced on every search; an
/// empty list leaves it empty.
#[function_component(ResultList)]
pub fn result_list(props: &ResultListProps) -> Html {
    html! {
        <div id={RESULTS_ELEMENT_ID} class="results">
            { props.blocks.iter().map(|block| match props.layout {
                Layout::Compact => render_compact(block),
                Layout::Detailed => render_detailed(block),
            }).collect::<Html>() }
        </div>
    }
}

fn render_compact(block: &ResultBlock) -> Html {
    html! {
        <p key={block.index}>{ block.summary_line() }</p>
    }
}

fn render_detailed(block: &ResultBlock) -> Html {
    html! {
        <div key={block.index} class="asteroid" style={format!("border-left-color: {}", block.color)}>
            <h4>{ format!("{}. {}", block.index, block.distance) }</h4>
            <p>{ "Region: " }{ block.region.clone() }</p>
            <p>{ "Type: " }{ block.kind.clone() }</p>
            <p>{ "Composition: " }{ block.composition.clone() }</p>
            <p>
                { "GPS: " }
                <span class="gps" style={format!("color: {}", block.color)}>{ block.gps() }</span>
            </p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutPickerProps {
    pub current: Layout,
    pub onchange: Callback<Layout>,
}

#[function_component(LayoutPicker)]
pub fn layout_picker(props: &LayoutPickerProps) -> Html {
    html! {
        <div class="layout-picker">
            { Layout::ALL.iter().map(|&layout| {
                let onchange = props.onchange.clone();
                html! {
                    <button type="button"
                        class={classes!("btn-secondary", "small", (layout == props.current).then_some("active"))}
                        onclick={Callback::from(move |_| onchange.emit(layout))}
                    >
                        { layout.label() }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}
