#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use peak_engine::{FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher};

/// Fetcher that replays a fixed sequence of results and counts calls.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<FetchOutput, FetchError>>>,
    calls: AtomicU32,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Result<FetchOutput, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::new(FailureKind::Network, "script exhausted")))
    }
}

pub fn html_output(url: &str, body: &str) -> FetchOutput {
    FetchOutput {
        bytes: Bytes::copy_from_slice(body.as_bytes()),
        metadata: FetchMetadata {
            original_url: url.to_string(),
            final_url: url.to_string(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            byte_len: body.len() as u64,
        },
    }
}

pub fn timeout() -> FetchError {
    FetchError::new(FailureKind::Timeout, "operation timed out")
}

pub fn detail_page(classification: &str, coordinates: &str) -> String {
    format!(
        "<html><body><h1>Detail</h1><table>\
         <tr><td><b>Višina:</b> 1000 m</td></tr>\
         <tr><td><b>Vrsta:</b> {classification}</td></tr>\
         <tr><td><b>Širina/Dolžina:</b> {coordinates}</td></tr>\
         </table></body></html>"
    )
}
