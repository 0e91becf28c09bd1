//! Request-scoped trace id.
//!
//! `RequestTrace` opens the scope; error rendering reads it back so problem
//! details and the `x-trace-id` header agree. Domain code never touches this.

use std::cell::RefCell;

use tokio::task_local;

const UNSCOPED: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current request, or `"unknown"` outside one.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| UNSCOPED.to_string())
}

/// Drive `future` with `trace_id` in scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
