#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use itinera::provider::{GeneratedText, TextGenerator};
use itinera::service::ItineraryService;
use itinera::store::ItineraryStore;
use itinera::{ItineraryRequest, Result};

/// Scripted generator: hands out queued responses and records every prompt
pub struct MockGenerator {
    responses: Mutex<VecDeque<GeneratedText>>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(responses: Vec<GeneratedText>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Generator that answers every call with the same text
    pub fn with_text(text: &str) -> Arc<Self> {
        Self::new(vec![text_response(text)])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
        _temperature: f32,
    ) -> Result<GeneratedText> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut responses = self.responses.lock().unwrap();
        let response = match responses.len() {
            0 => panic!("MockGenerator ran out of scripted responses"),
            // Keep replaying the last response so repeated calls stay scripted.
            1 => responses.front().cloned().unwrap(),
            _ => responses.pop_front().unwrap(),
        };
        Ok(response)
    }
}

pub fn text_response(text: &str) -> GeneratedText {
    GeneratedText {
        text: Some(text.to_string()),
        finish_reason: Some("STOP".to_string()),
        block_reason: None,
        block_message: None,
    }
}

pub fn blocked_response(reason: &str) -> GeneratedText {
    GeneratedText {
        text: None,
        finish_reason: None,
        block_reason: Some(reason.to_string()),
        block_message: None,
    }
}

/// Service over a scripted generator and a throwaway store. The TempDir must
/// stay alive for the store's lifetime.
pub fn service_with(generator: Arc<MockGenerator>) -> (Arc<ItineraryService>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = ItineraryStore::open(dir.path().join("docs")).unwrap();
    let service = Arc::new(ItineraryService::new(generator, store, 0.7));
    (service, dir)
}

pub fn paris_request() -> ItineraryRequest {
    ItineraryRequest {
        destination: "Paris".to_string(),
        start_date: "2024-06-01".parse().unwrap(),
        end_date: "2024-06-02".parse().unwrap(),
        interests: vec!["art".to_string(), "food".to_string()],
    }
}

pub const PARIS_FENCED_RESPONSE: &str = "```json\n{\"days\":[{\"day\":1,\"activities\":[\"Louvre\"]},{\"day\":2,\"activities\":[\"Market\"]}]}\n```";

pub const PARIS_ADJUSTED_RESPONSE: &str = "```json\n{\"days\":[{\"day\":1,\"activities\":[\"Street food tour\"]},{\"day\":2,\"activities\":[\"Market\"]}]}\n```";
