//! `CompletionClient` backed by the OpenAI chat completions endpoint.
//!
//! The endpoint answers a `stream: true` request with server-sent events, one
//! JSON chunk per `data:` line and a final `data: [DONE]`. `delta_stream`
//! turns that byte stream into the text deltas the relay forwards.

use crate::completion::{ChatMessage, ChatRequest, CompletionClient, CompletionError, FragmentStream};
use crate::config::CompletionConfig;
use common::sse::{SseDecoder, SseEvent};
use futures_util::future::{self, BoxFuture};
use futures_util::stream::{self, Stream, StreamExt};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub struct OpenAiClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl OpenAiClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionClient for OpenAiClient {
    fn stream_chat(
        &self,
        request: ChatRequest,
    ) -> BoxFuture<'_, Result<FragmentStream, CompletionError>> {
        Box::pin(async move {
            let body = ChatCompletionBody {
                model: &self.config.model,
                messages: &request.messages,
                stream: true,
                temperature: request.temperature,
                max_tokens: self.config.max_tokens,
            };
            let response = self
                .http
                .post(format!("{}/chat/completions", self.config.base_url))
                .bearer_auth(&self.config.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(CompletionError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            debug!("Completion stream opened ({})", status);
            Ok(delta_stream(response.bytes_stream()).boxed())
        })
    }
}

/// Decodes an upstream event stream into text deltas.
///
/// Chunks without content (the opening role chunk, the closing finish chunk)
/// yield an empty string. Unparseable data lines are skipped. A last line
/// without a trailing newline is decoded when the body ends. Nothing after
/// `[DONE]` or after a transport error is emitted.
pub fn delta_stream<S, B, E>(bytes: S) -> impl Stream<Item = Result<String, CompletionError>> + Send
where
    S: Stream<Item = Result<B, E>> + Send,
    B: AsRef<[u8]> + Send,
    E: Into<CompletionError> + Send,
{
    let mut decoder = SseDecoder::new();
    let mut finished = false;

    // `None` marks the end of the body.
    bytes
        .map(Some)
        .chain(stream::once(future::ready(None)))
        .map(move |chunk| {
            let mut out: Vec<Result<String, CompletionError>> = Vec::new();
            if finished {
                return out;
            }
            let events = match chunk {
                Some(Ok(bytes)) => decoder.push(bytes.as_ref()),
                Some(Err(e)) => {
                    finished = true;
                    out.push(Err(e.into()));
                    return out;
                }
                None => decoder.finish().into_iter().collect(),
            };
            for event in events {
                match event {
                    SseEvent::Done => {
                        finished = true;
                        break;
                    }
                    SseEvent::Data(payload) => {
                        if let Some(content) = parse_delta(&payload) {
                            out.push(Ok(content));
                        }
                    }
                }
            }
            out
        })
        .flat_map(stream::iter)
}

fn parse_delta(payload: &str) -> Option<String> {
    match serde_json::from_str::<ChatCompletionChunk>(payload) {
        Ok(chunk) => Some(
            chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
                .unwrap_or_default(),
        ),
        Err(e) => {
            warn!("Skipping unparseable completion chunk {:?}: {}", payload, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({ "choices": [{ "index": 0, "delta": { "content": content } }] })
        )
    }

    async fn collect(parts: Vec<Result<Vec<u8>, CompletionError>>) -> Vec<Result<String, String>> {
        delta_stream(stream::iter(parts))
            .map(|item| item.map_err(|e| e.to_string()))
            .collect()
            .await
    }

    #[actix_web::test]
    async fn yields_deltas_in_order_until_done() {
        let raw = format!(
            "data: {{\"choices\":[{{\"delta\":{{\"role\":\"assistant\"}}}}]}}\n\n{}{}data: [DONE]\n\n{}",
            chunk("<p>Hi "),
            chunk("Ann</p>"),
            chunk("ignored"),
        );
        let bytes = raw.into_bytes();
        // Split in the middle of the second event.
        let (a, b) = bytes.split_at(70);
        let items = collect(vec![Ok(a.to_vec()), Ok(b.to_vec())]).await;
        assert_eq!(
            items,
            vec![Ok(String::new()), Ok("<p>Hi ".into()), Ok("Ann</p>".into())]
        );
    }

    #[actix_web::test]
    async fn malformed_lines_are_skipped() {
        let raw = format!("data: {{not json\n\n{}", chunk("ok"));
        let items = collect(vec![Ok(raw.into_bytes())]).await;
        assert_eq!(items, vec![Ok("ok".into())]);
    }

    #[actix_web::test]
    async fn unterminated_last_line_is_decoded_at_end_of_body() {
        let raw = format!("{}{}", chunk("Hello"), chunk(" there").trim_end());
        let items = collect(vec![Ok(raw.into_bytes())]).await;
        assert_eq!(items, vec![Ok("Hello".into()), Ok(" there".into())]);
    }

    #[actix_web::test]
    async fn transport_error_ends_the_stream() {
        let items = collect(vec![
            Ok(chunk("a").into_bytes()),
            Err(CompletionError::Status {
                status: 502,
                body: "gone".into(),
            }),
            Ok(chunk("b").into_bytes()),
        ])
        .await;
        assert_eq!(
            items,
            vec![Ok("a".into()), Err("completion API answered 502: gone".into())]
        );
    }
}
