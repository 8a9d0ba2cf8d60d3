//! Calls to the backend API.
//!
//! Every function returns `Result<_, String>` with a message fit for showing
//! to the user; the caller decides between a toast, an alert or a log line.

use common::model::order::Order;
use common::requests::{ErrorResponse, GenerateEmailRequest};
use common::sse::{decode_chunk, SseDecoder, SseEvent};
use gloo_net::http::{Request, Response};
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::ReadableStreamDefaultReader;

const API_BASE: &str = "/api";

pub async fn fetch_orders() -> Result<Vec<Order>, String> {
    let response = Request::get(&format!("{}/orders", API_BASE))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err("Failed to fetch orders".to_string());
    }
    response.json().await.map_err(|e| e.to_string())
}

pub async fn fetch_order_details(order_id: &str) -> Result<Order, String> {
    let encoded = String::from(js_sys::encode_uri_component(order_id));
    let response = Request::get(&format!("{}/orders/{}", API_BASE, encoded))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err("Failed to fetch order details".to_string());
    }
    response.json().await.map_err(|e| e.to_string())
}

/// Requests a generated email and feeds its fragments to `on_fragment` as
/// they arrive.
///
/// `on_started` runs once, after the backend accepted the request and before
/// the first fragment. Resolves when the stream reports `[DONE]` or the body
/// ends.
pub async fn stream_generation(
    request: &GenerateEmailRequest,
    mut on_started: impl FnMut(),
    mut on_fragment: impl FnMut(String),
) -> Result<(), String> {
    let response = Request::post(&format!("{}/generate-email", API_BASE))
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(error_message(&response).await);
    }

    let body = response
        .body()
        .ok_or_else(|| "Response has no body".to_string())?;
    let reader: ReadableStreamDefaultReader = body.get_reader().unchecked_into();
    on_started();

    let mut decoder = SseDecoder::new();
    loop {
        let chunk = JsFuture::from(reader.read()).await.map_err(js_error)?;
        let done = Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(js_error)?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value = Reflect::get(&chunk, &JsValue::from_str("value")).map_err(js_error)?;
        let bytes = Uint8Array::new(&value).to_vec();
        for event in decoder.push(&bytes) {
            match event {
                SseEvent::Done => return Ok(()),
                SseEvent::Data(payload) => forward(&payload, &mut on_fragment),
            }
        }
    }

    if let Some(SseEvent::Data(payload)) = decoder.finish() {
        forward(&payload, &mut on_fragment);
    }
    Ok(())
}

/// Hands the content of one relay event to `on_fragment`. Malformed events
/// are logged and skipped.
fn forward(payload: &str, on_fragment: &mut impl FnMut(String)) {
    match decode_chunk(payload) {
        Ok(chunk) => on_fragment(chunk.content),
        Err(e) => gloo_console::warn!(format!("Skipping malformed stream event {:?}: {}", payload, e)),
    }
}

async fn error_message(response: &Response) -> String {
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", response.status()),
    }
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
