//! Request context propagation for correlation IDs.

use std::cell::RefCell;
use std::future::Future;
use uuid::Uuid;

/// Header carrying the correlation ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied request ID that is accepted.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Per-request context with correlation ID.
#[derive(Clone, Debug)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    /// Creates a new request context with a generated ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Creates a new request context with an existing request ID.
    #[must_use]
    pub fn from_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Reuses a client-supplied ID when it is short printable ASCII,
    /// otherwise generates a fresh one.
    #[must_use]
    pub fn from_client_id(client_id: Option<&str>) -> Self {
        client_id
            .map(str::trim)
            .filter(|id| {
                !id.is_empty()
                    && id.len() <= MAX_REQUEST_ID_LEN
                    && id.bytes().all(|b| b.is_ascii_graphic())
            })
            .map_or_else(Self::new, Self::from_id)
    }

    /// Returns the request ID.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

tokio::task_local! {
    static TASK_CONTEXT: RequestContext;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Option<RequestContext>> = const { RefCell::new(None) };
}

/// Guard that restores the previous thread-local context on drop.
pub struct RequestContextGuard {
    previous: Option<RequestContext>,
}

impl Drop for RequestContextGuard {
    fn drop(&mut self) {
        THREAD_CONTEXT.with(|slot| {
            *slot.borrow_mut() = self.previous.take();
        });
    }
}

/// Enters a request context for synchronous flows such as the `dedup` command.
#[must_use]
pub fn enter_request_context(context: RequestContext) -> RequestContextGuard {
    let previous = THREAD_CONTEXT.with(|slot| slot.borrow_mut().replace(context));
    RequestContextGuard { previous }
}

/// Scopes a request context across an async future.
pub async fn scope_request_context<F, T>(context: RequestContext, fut: F) -> T
where
    F: Future<Output = T>,
{
    TASK_CONTEXT.scope(context, fut).await
}

/// Returns the current request ID, if set.
#[must_use]
pub fn current_request_id() -> Option<String> {
    if let Ok(id) = TASK_CONTEXT.try_with(|ctx| ctx.request_id.clone()) {
        return Some(id);
    }

    THREAD_CONTEXT.with(|slot| slot.borrow().as_ref().map(|ctx| ctx.request_id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_thread_context_guard_propagates_request_id() {
        let context = RequestContext::from_id("thread-test");
        {
            let _guard = enter_request_context(context);
            assert_eq!(current_request_id().as_deref(), Some("thread-test"));
        }
        assert_eq!(current_request_id(), None);
    }

    #[tokio::test]
    async fn test_scope_request_context_propagates_across_await() {
        let context = RequestContext::from_id("async-test");
        let observed = scope_request_context(context, async {
            tokio::task::yield_now().await;
            current_request_id()
        })
        .await;
        assert_eq!(observed.as_deref(), Some("async-test"));
    }

    #[test]
    fn test_generated_ids_are_uuids() {
        let id = RequestContext::new().request_id().to_string();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, RequestContext::new().request_id());
    }

    #[test_case(Some("abc-123"), true ; "plain id kept")]
    #[test_case(Some("  abc-123  "), true ; "trimmed id kept")]
    #[test_case(Some(""), false ; "empty replaced")]
    #[test_case(Some("has space"), false ; "space replaced")]
    #[test_case(None, false ; "missing generated")]
    fn test_from_client_id(input: Option<&str>, kept: bool) {
        let context = RequestContext::from_client_id(input);
        if kept {
            assert_eq!(context.request_id(), "abc-123");
        } else {
            assert!(Uuid::parse_str(context.request_id()).is_ok());
        }
    }

    #[test]
    fn test_from_client_id_rejects_oversized() {
        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        let context = RequestContext::from_client_id(Some(&long));
        assert_ne!(context.request_id(), long);
    }
}
