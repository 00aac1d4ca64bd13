//! Explicit confirmation for destructive operations.
//!
//! A caller asks the gate for confirmation and gets a token back. Resolving
//! that token with [`Decision::Confirmed`] yields a [`Confirmed`] value, which
//! is the only way to call the destructive store operations.

use uuid::Uuid;

/// Something that needs the operator's assent before it runs.
pub trait ConfirmationRequest {
    fn prompt(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCategory {
    pub name: String,
}

impl ConfirmationRequest for DeleteCategory {
    fn prompt(&self) -> String {
        format!("Delete category {}?", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteItems {
    pub category: String,
    pub items: Vec<String>,
}

impl ConfirmationRequest for DeleteItems {
    fn prompt(&self) -> String {
        format!(
            "Delete selected items from {}? ({})",
            self.category,
            self.items.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfirmationToken(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// Proof that a request went through the gate and was confirmed.
#[derive(Debug)]
pub struct Confirmed<R>(R);

impl<R> Confirmed<R> {
    pub fn request(&self) -> &R {
        &self.0
    }

    pub fn into_request(self) -> R {
        self.0
    }
}

#[derive(Debug)]
pub enum Resolution<R> {
    Confirmed(Confirmed<R>),
    Cancelled,
    /// The token does not match the pending request.
    Stale,
}

#[derive(Debug)]
enum GateState<R> {
    Idle,
    Pending {
        token: ConfirmationToken,
        request: R,
    },
}

/// One gate per kind of destructive action.
#[derive(Debug)]
pub struct ConfirmationGate<R> {
    state: GateState<R>,
}

impl<R> Default for ConfirmationGate<R> {
    fn default() -> Self {
        Self {
            state: GateState::Idle,
        }
    }
}

impl<R: ConfirmationRequest> ConfirmationGate<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to pending confirmation. A request already pending is dropped
    /// and its token goes stale.
    pub fn request(&mut self, request: R) -> ConfirmationToken {
        let token = ConfirmationToken(Uuid::new_v4());
        self.state = GateState::Pending { token, request };
        token
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, GateState::Pending { .. })
    }

    pub fn pending(&self) -> Option<&R> {
        match &self.state {
            GateState::Pending { request, .. } => Some(request),
            GateState::Idle => None,
        }
    }

    pub fn prompt(&self) -> Option<String> {
        self.pending().map(ConfirmationRequest::prompt)
    }

    /// Resolves the pending request and returns the gate to idle. A stale
    /// token leaves the pending request untouched.
    pub fn resolve(&mut self, token: ConfirmationToken, decision: Decision) -> Resolution<R> {
        match &self.state {
            GateState::Pending { token: pending, .. } if *pending == token => {}
            _ => return Resolution::Stale,
        }

        match std::mem::replace(&mut self.state, GateState::Idle) {
            GateState::Pending { request, .. } => match decision {
                Decision::Confirmed => Resolution::Confirmed(Confirmed(request)),
                Decision::Cancelled => Resolution::Cancelled,
            },
            GateState::Idle => Resolution::Stale,
        }
    }
}

#[cfg(test)]
pub(crate) fn confirmed<R>(request: R) -> Confirmed<R> {
    Confirmed(request)
}
