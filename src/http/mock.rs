//! In-memory transport for unit tests

use super::transport::Transport;
use crate::error::{Error, Result};
use crate::query::QueryParams;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(usize, &QueryParams) -> Result<Value> + Send + Sync;

/// Transport that answers from a script and records every request
pub(crate) struct ScriptedTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<QueryParams>>,
}

impl ScriptedTransport {
    /// Answer call `n` with `f(n, params)`
    pub(crate) fn from_fn(
        f: impl Fn(usize, &QueryParams) -> Result<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(f),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer calls with `bodies` in order, failing once they run out
    pub(crate) fn sequence(bodies: Vec<Value>) -> Arc<Self> {
        Self::from_fn(move |n, _| {
            bodies
                .get(n)
                .cloned()
                .ok_or_else(|| Error::invalid_response("script exhausted"))
        })
    }

    /// Requests seen so far
    pub(crate) fn requests(&self) -> Vec<QueryParams> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests seen so far
    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, _endpoint: &str, params: &QueryParams) -> Result<Value> {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(params.clone());
            requests.len() - 1
        };
        (self.responder)(n, params)
    }
}
