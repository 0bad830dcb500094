//! Run-loop wiring for a host page: explicit session state, a seam for the
//! visual effects, and the handlers the host's event glue invokes on
//! navigation change, DOM mutation, focus and load.

use crate::session::Session;
use crate::store::Store;
use arpa_core::{Action, DomNode, PageState};
use tracing::{debug, warn};

/// Side effects the host applies to the page. Rendering stays out of the
/// core: implementations toggle a highlight marker and synthesize activation
/// events however their host supports it.
pub trait PageEffects<N: DomNode> {
    /// Re-render the highlight marker: clear any previous marker, then mark
    /// `target` when present.
    fn highlight(&mut self, target: Option<&N>);

    /// Replay activation on `target` (the hover/press/release/click burst).
    fn trigger(&mut self, target: &N);
}

/// Mutable per-page state, owned by the loop instead of page globals.
#[derive(Debug)]
pub struct SessionState<N> {
    /// The element currently surfaced, if any.
    pub target: Option<N>,
    /// Last href seen by [`RunLoop::navigated`].
    pub href: Option<String>,
}

impl<N> Default for SessionState<N> {
    fn default() -> Self {
        Self {
            target: None,
            href: None,
        }
    }
}

/// Event-driven loop over one [`Session`]. Single-threaded by construction:
/// handlers run to completion, storage access is the only suspension point,
/// and every failure degrades to "do nothing this cycle".
pub struct RunLoop<S: Store, N: DomNode, E: PageEffects<N>> {
    session: Session<S>,
    effects: E,
    state: SessionState<N>,
}

impl<S: Store, N: DomNode, E: PageEffects<N>> RunLoop<S, N, E> {
    pub fn new(session: Session<S>, effects: E) -> Self {
        Self {
            session,
            effects,
            state: SessionState::default(),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn state(&self) -> &SessionState<N> {
        &self.state
    }

    /// True when `href` differs from the last one seen. Hosts that poll for
    /// single-page-app navigations call this and refresh on `true`.
    pub fn navigated(&mut self, href: &str) -> bool {
        if self.state.href.as_deref() == Some(href) {
            return false;
        }
        self.state.href = Some(href.to_string());
        true
    }

    /// Re-evaluate what to surface and re-render the highlight. Idempotent;
    /// hosts invoke it on load, focus, navigation and DOM mutation without
    /// coordination. A storage failure keeps the previous state.
    pub async fn refresh(&mut self, root: &N, page: &PageState) {
        if self.session.config().blacklisted(&page.hostname) {
            return;
        }
        match self.session.lookup(root, page).await {
            Ok(target) => {
                self.effects.highlight(target.as_ref());
                self.state.target = target;
            }
            Err(e) => {
                warn!(hostname = %page.hostname, error = %e, "lookup failed, keeping previous state");
            }
        }
    }

    /// Record a click observed by the host. Unrecordable clicks are ignored.
    pub async fn click(&mut self, el: &N, root: &N, page: &PageState) {
        if self.session.config().blacklisted(&page.hostname) {
            return;
        }
        if let Err(e) = self.session.record_click(el, root, page).await {
            warn!(hostname = %page.hostname, error = %e, "failed to record click");
        }
    }

    /// The re-trigger command: count another use of the current target, then
    /// replay activation on it. Does nothing when no target is surfaced.
    pub async fn request(&mut self, root: &N, page: &PageState) {
        if self.session.config().blacklisted(&page.hostname) {
            return;
        }
        let Some(target) = self.state.target.clone() else {
            debug!("no current target to trigger");
            return;
        };
        if let Some(action) = Action::from_element(&target, root) {
            if let Err(e) = self.session.record_action(action, page).await {
                warn!(hostname = %page.hostname, error = %e, "failed to record trigger");
            }
        }
        self.effects.trigger(&target);
    }
}
