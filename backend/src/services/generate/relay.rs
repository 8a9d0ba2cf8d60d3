//! # Generation Relay Handler
//!
//! `POST /api/generate-email`. The upstream stream is opened before any
//! response byte is written, so a rejected request (bad key, quota, network)
//! still gets a proper `500` JSON body. Once streaming has started, every text
//! delta is re-framed as `data: {"content": ...}` and the response ends with
//! `data: [DONE]`. A transport failure after that point simply ends the body.

use crate::completion::{ChatRequest, CompletionError, FragmentStream, RelayState};
use crate::services::generate::prompt;
use actix_web::http::header;
use actix_web::web::{self, Bytes};
use actix_web::HttpResponse;
use common::requests::{ErrorResponse, GenerateEmailRequest};
use common::sse;
use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use log::{error, info};

const TEMPERATURE: f32 = 0.7;
const FAILURE_MESSAGE: &str = "Failed to generate email";

pub async fn process(
    state: web::Data<RelayState>,
    payload: web::Json<GenerateEmailRequest>,
) -> HttpResponse {
    let request = payload.into_inner();
    let chat = ChatRequest {
        messages: prompt::build_messages(&request),
        temperature: TEMPERATURE,
    };

    match state.client.stream_chat(chat).await {
        Ok(fragments) => {
            info!("Streaming generated email ({} variables)", request.variables.len());
            // `Connection` is left to actix, which keeps HTTP/1.1 connections
            // alive by default.
            HttpResponse::Ok()
                .content_type("text/event-stream")
                .insert_header((header::CACHE_CONTROL, "no-cache"))
                .streaming(event_stream(fragments))
        }
        Err(e) => {
            error!("Error generating email: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: FAILURE_MESSAGE.to_string(),
            })
        }
    }
}

/// Re-frames text deltas as relay events followed by the terminator.
fn event_stream(fragments: FragmentStream) -> impl Stream<Item = Result<Bytes, CompletionError>> {
    fragments
        .map_ok(|content| Bytes::from(sse::encode_chunk(&content)))
        .inspect_err(|e| error!("Completion stream broke off: {}", e))
        .chain(stream::once(async {
            Ok::<_, CompletionError>(Bytes::from(sse::encode_done()))
        }))
}

#[cfg(test)]
mod tests {
    use crate::completion::{
        ChatRequest, CompletionClient, CompletionError, FragmentStream, RelayState,
    };
    use crate::services::generate::configure_routes;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use futures_util::future::BoxFuture;
    use futures_util::stream::{self, StreamExt};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Answers with a fixed list of deltas, or fails before streaming.
    struct ScriptedClient {
        fragments: Vec<&'static str>,
        reject: bool,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedClient {
        fn answering(fragments: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                fragments,
                reject: false,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn rejecting() -> Arc<Self> {
            Arc::new(Self {
                fragments: Vec::new(),
                reject: true,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl CompletionClient for ScriptedClient {
        fn stream_chat(
            &self,
            request: ChatRequest,
        ) -> BoxFuture<'_, Result<FragmentStream, CompletionError>> {
            self.seen.lock().unwrap().push(request);
            let items: Vec<Result<String, CompletionError>> =
                self.fragments.iter().map(|f| Ok(f.to_string())).collect();
            let reject = self.reject;
            Box::pin(async move {
                if reject {
                    return Err(CompletionError::Status {
                        status: 401,
                        body: "invalid api key".into(),
                    });
                }
                Ok(stream::iter(items).boxed())
            })
        }
    }

    fn body() -> serde_json::Value {
        json!({
            "prompt": "Say hi",
            "variables": [],
            "orderDetails": { "customerName": "Ann" }
        })
    }

    #[actix_web::test]
    async fn streams_each_fragment_then_done() {
        let client = ScriptedClient::answering(vec!["<p>Hi ", "Ann</p>"]);
        let state = RelayState {
            client: client.clone(),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-email")
            .set_json(body())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
        assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-cache");
        assert!(resp.headers().get(header::CONNECTION).is_none());

        let bytes = test::read_body(resp).await;
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            "data: {\"content\":\"<p>Hi \"}\n\n\
             data: {\"content\":\"Ann</p>\"}\n\n\
             data: [DONE]\n\n"
        );

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].messages[1].content.contains("\"Say hi\""));
    }

    #[actix_web::test]
    async fn empty_answer_still_terminates() {
        let state = RelayState {
            client: ScriptedClient::answering(vec![]),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/generate-email")
            .set_json(body())
            .to_request();
        let bytes = test::read_body(test::call_service(&app, req).await).await;
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), "data: [DONE]\n\n");
    }

    #[actix_web::test]
    async fn upstream_rejection_is_a_500_with_json_error() {
        let state = RelayState {
            client: ScriptedClient::rejecting(),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-email")
            .set_json(body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json, json!({ "error": "Failed to generate email" }));
    }
}
