use super::format_money;
use common::model::order::Order;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OrderSidebarProps {
    pub orders: Vec<Order>,
    pub selected_order_id: Option<String>,
    pub loading: bool,
    pub on_select: Callback<String>,
}

/// "Past Orders" card listing every order by customer, short id and total.
pub struct OrderSidebar;

impl Component for OrderSidebar {
    type Message = ();
    type Properties = OrderSidebarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        OrderSidebar
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        let list = if props.loading {
            html! { <p class="muted">{"Loading orders..."}</p> }
        } else if props.orders.is_empty() {
            html! { <p class="muted">{"No orders yet."}</p> }
        } else {
            props
                .orders
                .iter()
                .map(|order| order_entry(order, props))
                .collect::<Html>()
        };

        html! {
            <aside class="card order-sidebar">
                <div class="card-header">
                    <h2>{"Past Orders"}</h2>
                    <p class="muted">{"Recent customer orders"}</p>
                </div>
                <div class="order-list">{ list }</div>
            </aside>
        }
    }
}

fn order_entry(order: &Order, props: &OrderSidebarProps) -> Html {
    let selected = props.selected_order_id.as_deref() == Some(order.order_id.as_str());
    let onclick = {
        let on_select = props.on_select.clone();
        let order_id = order.order_id.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(order_id.clone()))
    };

    html! {
        <button
            key={order.order_id.clone()}
            class={classes!("order-item", selected.then_some("selected"))}
            {onclick}
        >
            <div class="order-customer">{ order.customer_name.clone() }</div>
            <div class="muted small">
                { format!("#{} - {}", order.short_id(), format_money(order.total)) }
            </div>
        </button>
    }
}
