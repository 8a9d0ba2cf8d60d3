//! Application shell: the order sidebar on the left; the details of the
//! selected order and the email editor on the right.
//!
//! Orders are fetched once on startup. Selecting one fetches its details
//! again by id; a response that arrives after the user already picked a
//! different order is dropped.

use crate::components::email::EmailEditor;
use crate::components::orders::{OrderDetails, OrderSidebar};
use crate::services::api;
use crate::workspace_grid::WorkspaceGrid;
use common::model::order::Order;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    OrdersLoaded(Result<Vec<Order>, String>),
    SelectOrder(String),
    OrderLoaded(Result<Order, String>),
}

pub struct App {
    orders: Vec<Order>,
    loading_orders: bool,
    selected_order_id: Option<String>,
    selected_order: Option<Order>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::OrdersLoaded(api::fetch_orders().await));
        });
        Self {
            orders: Vec::new(),
            loading_orders: true,
            selected_order_id: None,
            selected_order: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::OrdersLoaded(result) => {
                self.loading_orders = false;
                match result {
                    Ok(orders) => self.orders = orders,
                    Err(e) => gloo_console::error!(format!("Error fetching orders: {}", e)),
                }
                true
            }
            Msg::SelectOrder(order_id) => {
                if self.selected_order_id.as_deref() == Some(order_id.as_str()) {
                    return false;
                }
                self.selected_order_id = Some(order_id.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::OrderLoaded(api::fetch_order_details(&order_id).await));
                });
                true
            }
            Msg::OrderLoaded(Ok(order)) => {
                if self.selected_order_id.as_deref() != Some(order.order_id.as_str()) {
                    return false;
                }
                self.selected_order = Some(order);
                true
            }
            Msg::OrderLoaded(Err(e)) => {
                gloo_console::error!(format!("Error fetching order details: {}", e));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <WorkspaceGrid columns="20rem 1fr" class="app-shell">
                <OrderSidebar
                    orders={self.orders.clone()}
                    selected_order_id={self.selected_order_id.clone()}
                    loading={self.loading_orders}
                    on_select={ctx.link().callback(Msg::SelectOrder)}
                />
                <main class="content">
                    if let Some(order) = &self.selected_order {
                        <OrderDetails order={order.clone()} />
                    }
                    <EmailEditor order={self.selected_order.clone()} />
                </main>
            </WorkspaceGrid>
        }
    }
}
