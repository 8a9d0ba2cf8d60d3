//! Defines the properties for the `EmailEditor`.

use common::model::order::Order;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct EmailEditorProps {
    /// The order the email is written for.
    ///
    /// Its fields feed the preview and the variable menu, and it is sent as
    /// context with AI generation requests. When `None`, the sample variable
    /// catalog and its example values are used instead.
    #[prop_or_default]
    pub order: Option<Order>,
}
