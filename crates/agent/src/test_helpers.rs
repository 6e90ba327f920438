//! Shared test helpers for agent tests.

use gamechat_core::dataset::{ColumnSummary, RowRecord, RowRetriever};
use gamechat_core::error::{ProviderError, RetrievalError};
use gamechat_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A mock provider that replays a scripted sequence of replies.
///
/// Each call to `complete` pops the next reply and records the request.
/// Panics if more calls are made than replies provided.
pub struct SequentialMockProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider that answers every call successfully, in order.
    pub fn texts(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Content of the last message of request `index`.
    pub fn prompt(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index]
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("SequentialMockProvider: no more replies (call #{call})"));

        reply.map(|content| ProviderResponse {
            content,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: "mock-model".into(),
        })
    }
}

/// A retriever returning a fixed row set and counting calls.
pub struct FixedRetriever {
    rows: Vec<RowRecord>,
    fail: bool,
    calls: Mutex<usize>,
}

impl FixedRetriever {
    pub fn new(rows: Vec<RowRecord>) -> Self {
        Self {
            rows,
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl RowRetriever for FixedRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<RowRecord>, RetrievalError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(RetrievalError::Unavailable("table offline".into()));
        }
        Ok(self.rows.clone())
    }
}

pub fn game(name: &str) -> RowRecord {
    RowRecord {
        name: name.into(),
        short_description: format!("{name} short"),
        genres: "Action".into(),
        ..Default::default()
    }
}

pub fn summaries() -> Vec<ColumnSummary> {
    vec![
        ColumnSummary {
            column_name: "name".into(),
            description: "The title of each game".into(),
            total_rows: 3,
        },
        ColumnSummary {
            column_name: "genres".into(),
            description: "Genres the game belongs to".into(),
            total_rows: 3,
        },
    ]
}
