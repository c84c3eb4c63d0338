//! Side effects requested by the event handler.
//!
//! [`crate::app::handle_event`] never talks to Zellij itself. It returns a
//! list of [`Action`]s that the plugin shim executes in order.

use crate::api::ApiRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends an HTTP request through Zellij's `web_request`.
    ///
    /// The request's context map comes back with the response and identifies
    /// which controller is waiting for it.
    Request(ApiRequest),
}

impl Action {
    /// The request carried by this action, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&ApiRequest> {
        match self {
            Self::Request(request) => Some(request),
            Self::CloseFocus => None,
        }
    }
}
