//! Continuation engine
//!
//! Each sequence gets its own producer task. Items reach the consumer through
//! a single-slot channel, so the producer is never more than one page fetch
//! ahead of what has been drained.

use super::types::{ItemExtractor, PaginationState};
use crate::error::{Error, Result};
use crate::query::{QueryExecutor, QueryParams};
use futures::Stream;
use std::pin::Pin;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

/// Lazy sequence of items; an error, if any, is the last element
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Start a paginated request
///
/// Every call sends `base` merged with the current continuation. The stream
/// yields items in server order across pages. It ends after the last page,
/// or right after the first error. Dropping the stream abandons the request
/// and no further calls are made.
///
/// # Panics
///
/// Must be called from within a tokio runtime.
pub fn paginate<E: ItemExtractor>(
    executor: QueryExecutor,
    base: QueryParams,
    extractor: E,
) -> ItemStream<E::Item> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(produce(executor, base, extractor, tx));
    Box::pin(ReceiverStream::new(rx))
}

/// Producer loop
async fn produce<E: ItemExtractor>(
    executor: QueryExecutor,
    base: QueryParams,
    extractor: E,
    tx: mpsc::Sender<Result<E::Item>>,
) {
    let name = extractor.name();
    let mut state = PaginationState::new();

    while !state.phase.is_terminal() {
        if tx.is_closed() {
            debug!("{name}: consumer gone before page {}", state.pages_fetched + 1);
            return;
        }

        let params = state.params(&base);
        let fetched = tokio::select! {
            biased;
            () = tx.closed() => {
                debug!("{name}: consumer gone during page {}", state.pages_fetched + 1);
                return;
            }
            result = executor.execute(params) => result,
        };

        let body = match fetched {
            Ok(body) => body,
            Err(e) => {
                fail(&mut state, &tx, name, e).await;
                return;
            }
        };
        state.add_page();

        let entries = extractor.entries(&body);
        debug!(
            "{name}: page {} has {} items",
            state.pages_fetched,
            entries.len()
        );
        if entries.is_empty() {
            let e = Error::invalid_response(format!(
                "no {name} in response page {}",
                state.pages_fetched
            ));
            fail(&mut state, &tx, name, e).await;
            return;
        }

        for entry in entries {
            match extractor.parse(entry) {
                Ok(item) => {
                    if tx.send(Ok(item)).await.is_err() {
                        debug!("{name}: consumer gone after {} items", state.items_emitted);
                        return;
                    }
                    state.add_item();
                }
                Err(e) => {
                    fail(&mut state, &tx, name, e).await;
                    return;
                }
            }
        }

        state.advance(extractor.next_page(&body));
    }

    debug!(
        "{name}: completed with {} items in {} pages",
        state.items_emitted, state.pages_fetched
    );
}

/// Deliver `error` as the terminal element
async fn fail<T>(
    state: &mut PaginationState,
    tx: &mpsc::Sender<Result<T>>,
    name: &str,
    error: Error,
) {
    state.mark_failed();
    warn!(
        "{name}: failed after {} items in {} pages: {error}",
        state.items_emitted, state.pages_fetched
    );
    // A closed channel means nobody is left to tell
    let _ = tx.send(Err(error)).await;
}
