//! OpenAI-compatible chat-completions client.

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

use super::{AiClient, AiEvent, AiEventSink};
use flashcard_core::Flashcard;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const FLASHCARD_PROMPT: &str = "You turn study notes into flashcards. \
Reply with only a JSON array of objects with \"question\" and \"answer\" string fields. \
Keep questions specific and answers short.";

const ANSWER_PROMPT: &str = "You answer questions about the user's notes. \
Base the answer on the notes; say so when the notes do not cover the question.";

/// AI client errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("AI service error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Malformed AI response: {0}")]
    Parse(String),

    #[error("AI service returned an empty response")]
    EmptyResponse,

    #[error("AI client is not connected")]
    NotConnected,
}

/// Connection settings for [`HttpAiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

impl ChatRequest {
    fn flashcards(model: &str, notes: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(FLASHCARD_PROMPT),
                ChatMessage::user(format!("Notes:\n{}", notes)),
            ],
            temperature: 0.3,
        }
    }

    fn answer(model: &str, context: &str, question: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(ANSWER_PROMPT),
                ChatMessage::user(format!("Notes:\n{}\n\nQuestion: {}", context, question)),
            ],
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlashcardEnvelope {
    flashcards: Vec<Flashcard>,
}

/// Chat-completions client that runs requests on a tokio runtime.
///
/// Requests are fire-and-forget: each spawned task reports exactly one
/// [`AiEvent`] through the connected sink.
pub struct HttpAiClient {
    client: Client,
    runtime: Handle,
    settings: AiSettings,
    endpoint_override: Option<String>,
    api_key_override: Option<String>,
    sink: Option<AiEventSink>,
}

impl HttpAiClient {
    pub fn new(settings: AiSettings, runtime: Handle) -> Self {
        Self {
            client: Client::new(),
            runtime,
            settings,
            endpoint_override: None,
            api_key_override: None,
            sink: None,
        }
    }

    /// Endpoint in effect, taking overrides into account.
    pub fn endpoint(&self) -> &str {
        self.endpoint_override
            .as_deref()
            .unwrap_or(&self.settings.endpoint)
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key_override
            .as_deref()
            .or(self.settings.api_key.as_deref())
    }

    fn dispatch<F>(&self, request: ChatRequest, finish: F)
    where
        F: FnOnce(Result<String, AiError>) -> AiEvent + Send + 'static,
    {
        let Some(sink) = self.sink.clone() else {
            tracing::warn!("{}, request dropped", AiError::NotConnected);
            return;
        };

        let call = self.complete(request);
        self.runtime.spawn(async move {
            sink.emit(finish(call.await));
        });
    }

    fn complete(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<String, AiError>> + Send + 'static {
        let client = self.client.clone();
        let url = self.endpoint().to_string();
        let api_key = self.api_key().map(str::to_string);

        async move {
            tracing::debug!(%url, "sending chat completion");

            let mut builder = client.post(&url).json(&request);
            if let Some(key) = api_key {
                builder = builder.bearer_auth(key);
            }

            let resp = builder
                .send()
                .await
                .map_err(|e| AiError::Network(e.to_string()))?;

            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let message = resp.text().await.unwrap_or_default();
                return Err(AiError::Backend { status, message });
            }

            let response: ChatResponse = resp
                .json()
                .await
                .map_err(|e| AiError::Parse(e.to_string()))?;

            response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|content| !content.trim().is_empty())
                .ok_or(AiError::EmptyResponse)
        }
    }
}

impl AiClient for HttpAiClient {
    fn connect(&mut self, sink: AiEventSink) {
        self.sink = Some(sink);
    }

    fn request_flashcards(&mut self, notes: &str) {
        tracing::info!(notes_len = notes.len(), "requesting flashcards from AI");
        let request = ChatRequest::flashcards(&self.settings.model, notes);
        self.dispatch(request, |result| {
            match result.and_then(|content| parse_flashcards(&content)) {
                Ok(cards) => AiEvent::FlashcardsReady(cards),
                Err(e) => AiEvent::Error(e.to_string()),
            }
        });
    }

    fn request_answer(&mut self, context: &str, question: &str) {
        tracing::info!(
            context_len = context.len(),
            question_len = question.len(),
            "requesting answer from AI"
        );
        let request = ChatRequest::answer(&self.settings.model, context, question);
        self.dispatch(request, |result| match result {
            Ok(answer) => AiEvent::AnswerReady(answer.trim().to_string()),
            Err(e) => AiEvent::Error(e.to_string()),
        });
    }

    fn set_endpoint_override(&mut self, url: &str) {
        let url = url.trim();
        self.endpoint_override = (!url.is_empty()).then(|| url.to_string());
    }

    fn set_api_key_override(&mut self, key: &str) {
        let key = key.trim();
        self.api_key_override = (!key.is_empty()).then(|| key.to_string());
    }
}

/// Extract flashcards from a chat reply.
///
/// Accepts a bare JSON array, a `{"flashcards": [...]}` object, either one
/// wrapped in a Markdown code fence, or an array surrounded by prose.
fn parse_flashcards(content: &str) -> Result<Vec<Flashcard>, AiError> {
    let body = strip_code_fence(content);

    let cards = serde_json::from_str::<Vec<Flashcard>>(body)
        .or_else(|_| serde_json::from_str::<FlashcardEnvelope>(body).map(|e| e.flashcards))
        .or_else(|err| match (body.find('['), body.rfind(']')) {
            (Some(start), Some(end)) if start < end => {
                serde_json::from_str::<Vec<Flashcard>>(&body[start..=end])
            }
            _ => Err(err),
        })
        .map_err(|e| AiError::Parse(e.to_string()))?;

    Ok(cards
        .into_iter()
        .filter(|card| !card.question.trim().is_empty() && !card.answer.trim().is_empty())
        .map(|card| Flashcard::new(card.question.trim(), card.answer.trim()))
        .collect())
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence line. A one-line
    // fence keeps its body on that same line.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.trim_start().strip_prefix("json").unwrap_or(rest),
    };
    body.trim_end().trim_end_matches("```").trim()
}
