use super::format_money;
use common::model::order::Order;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OrderDetailsProps {
    pub order: Order,
}

/// Summary card of the selected order: id, customer, total, rating, items
/// and review.
pub struct OrderDetails;

impl Component for OrderDetails {
    type Message = ();
    type Properties = OrderDetailsProps;

    fn create(_ctx: &Context<Self>) -> Self {
        OrderDetails
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let order = &ctx.props().order;

        html! {
            <section class="card order-details">
                <div class="card-header">
                    <h2>{"Order Details"}</h2>
                    <p class="muted">{"Information about the recent order"}</p>
                </div>
                <div class="detail-grid">
                    { field("Order ID", html! { { format!("#{}", order.short_id()) } }) }
                    { field("Customer Name", html! { { order.customer_name.clone() } }) }
                    { field("Order Total", html! { { format_money(order.total) } }) }
                    { field("Order Rating", rating(order)) }
                </div>
                <div class="detail-section">
                    <p class="muted small">{"Ordered Items"}</p>
                    { for order.ordered_items.iter().map(|item| html! {
                        <div class="item-row">
                            <div>
                                <span class="strong">{ item.name.clone() }</span>
                                <span class="muted small">{ format!(" x{}", item.quantity) }</span>
                            </div>
                            <span class="strong">{ format_money(item.price) }</span>
                        </div>
                    }) }
                </div>
                if let Some(review) = &order.customer_review {
                    <div class="detail-section">
                        <p class="muted small">{"Customer Review"}</p>
                        <blockquote>{ format!("\"{}\"", review) }</blockquote>
                    </div>
                }
            </section>
        }
    }
}

fn field(label: &str, value: Html) -> Html {
    html! {
        <div>
            <p class="muted small">{ label.to_string() }</p>
            <p class="strong">{ value }</p>
        </div>
    }
}

/// Average rating with the per-criterion breakdown as a tooltip.
fn rating(order: &Order) -> Html {
    let Some(average) = order.average_rating() else {
        return html! { <span class="muted">{"No ratings"}</span> };
    };
    let breakdown = order
        .ratings
        .iter()
        .map(|r| format!("{}: {}★", r.criterion, r.rating))
        .collect::<Vec<_>>()
        .join("\n");

    html! {
        <span class="rating" title={breakdown}>
            { format!("{:.1}", average) }
            <span class="star">{"★"}</span>
            <span class="muted small">
                { format!(" (based on {} criteria)", order.ratings.len()) }
            </span>
        </span>
    }
}
