//! Data fetching
//!
//! One shape for every screen that loads data: a [`Loadable`] that starts
//! out `Loading` and is replaced wholesale by the response. Table screens
//! read it through [`ListState`] so that "loading", "no data" and "rows"
//! are decided in one place.
//!
//! [`Lifetime`] ties in-flight requests to the screen that issued them.
//! When the screen goes away its lifetime ends and pending requests are
//! aborted, so late responses never write into a dead screen.

use futures_util::future::{AbortHandle, Abortable};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::error::ApiResult;

/// State of a request-backed value
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    /// Message ready for display
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    /// Convert a response, using `fallback` when the server gave no detail
    pub fn from_result(result: ApiResult<T>, fallback: &str) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => Loadable::Failed(e.user_message(fallback)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Ready(value) => Loadable::Ready(f(value)),
            Loadable::Failed(message) => Loadable::Failed(message),
        }
    }
}

/// How a table screen should render its rows
#[derive(Debug, PartialEq)]
pub enum ListState<'a, T> {
    /// Before the first response
    Loading,
    /// Response arrived with no rows
    Empty,
    Rows(&'a [T]),
    Failed(&'a str),
}

impl<T> Loadable<Vec<T>> {
    pub fn list_state(&self) -> ListState<'_, T> {
        match self {
            Loadable::Loading => ListState::Loading,
            Loadable::Ready(rows) if rows.is_empty() => ListState::Empty,
            Loadable::Ready(rows) => ListState::Rows(rows),
            Loadable::Failed(message) => ListState::Failed(message),
        }
    }
}

#[derive(Default)]
struct LifetimeInner {
    ended: Cell<bool>,
    handles: RefCell<Vec<AbortHandle>>,
}

impl LifetimeInner {
    fn abort_all(&self) {
        for handle in self.handles.borrow_mut().drain(..) {
            handle.abort();
        }
    }
}

impl Drop for LifetimeInner {
    fn drop(&mut self) {
        self.abort_all();
    }
}

/// Scope for the in-flight work of one visible screen
///
/// Clones share the same scope. Ending it (explicitly or by dropping the
/// last clone) aborts every future bound to it.
#[derive(Clone, Default)]
pub struct Lifetime {
    inner: Rc<LifetimeInner>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a future to this lifetime
    ///
    /// Resolves to `None` if the lifetime ended before the future finished.
    pub fn bind<F>(&self, future: F) -> impl Future<Output = Option<F::Output>>
    where
        F: Future,
    {
        let (handle, registration) = AbortHandle::new_pair();
        if self.inner.ended.get() {
            handle.abort();
        } else {
            self.inner.handles.borrow_mut().push(handle);
        }
        let abortable = Abortable::new(future, registration);
        async move { abortable.await.ok() }
    }

    /// End the lifetime and abort everything still pending
    pub fn end(&self) {
        if !self.inner.ended.replace(true) {
            tracing::debug!("Lifetime ended, aborting pending requests");
        }
        self.inner.abort_all();
    }

    pub fn is_ended(&self) -> bool {
        self.inner.ended.get()
    }
}
