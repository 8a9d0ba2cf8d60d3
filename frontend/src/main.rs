use crate::app::App;

mod app;
mod components;
mod services;
mod tops_sheet;
mod workspace_grid;

fn main() {
    yew::Renderer::<App>::new().render();
}
