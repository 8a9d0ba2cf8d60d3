use yew::{classes, html, AttrValue, Children, Classes, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct WorkspaceGridProps {
    /// Value of `grid-template-columns`, e.g. `"20rem 1fr"`.
    pub columns: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

/// Column layout shared by the page shell and the editor/preview split.
/// Collapses to a single column on narrow screens (see `.workspace-grid`).
pub struct WorkspaceGrid;

impl Component for WorkspaceGrid {
    type Message = ();
    type Properties = WorkspaceGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        WorkspaceGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!("--grid-columns: {};", props.columns);

        html! {
            <div class={classes!("workspace-grid", props.class.clone())} style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
