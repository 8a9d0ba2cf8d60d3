//! Sheet that slides down from the top of the viewport, used for dialogs.
//!
//! The sheet is always mounted; `open_top_sheet` and `close_top_sheet` only
//! toggle its `show` class, which the stylesheet animates.

use web_sys::HtmlElement;
use yew::{html, AttrValue, Callback, Component, Context, Html, MouseEvent, NodeRef, Properties};

const SHOWN_CLASS: &str = "show";

pub struct TopSheet;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub node_ref: NodeRef,
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    pub on_close: Callback<MouseEvent>,
    #[prop_or_default]
    pub children: Html,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="top-sheet" ref={props.node_ref.clone()}>
                <div class="top-sheet-panel">
                    <div class="top-sheet-header">
                        <div>
                            <h2>{ props.title.clone() }</h2>
                            if let Some(description) = &props.description {
                                <p class="muted">{ description.clone() }</p>
                            }
                        </div>
                        <button class="icon-btn" title="Close" onclick={props.on_close.clone()}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    set_shown(&top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    set_shown(&top_sheet_ref, false);
}

fn set_shown(top_sheet_ref: &NodeRef, shown: bool) {
    if let Some(top_sheet) = top_sheet_ref.cast::<HtmlElement>() {
        let classes = top_sheet.class_list();
        let result = if shown {
            classes.add_1(SHOWN_CLASS)
        } else {
            classes.remove_1(SHOWN_CLASS)
        };
        if let Err(e) = result {
            gloo_console::error!("Could not toggle top sheet", e);
        }
    }
}
