//! Client shell — the state behind the single-page optimizer UI.
//!
//! Holds the input, the last rewrite, the in-flight flag and the inline error,
//! plus the session's usage state. Quota and input checks happen here, before
//! anything reaches the relay.
//!
//! Lifecycle of a submission: idle → submitting → (success | failure) → idle.
//! [`Shell::begin_submit`] moves to submitting and hands back a
//! [`PendingSubmit`]; [`Shell::finish_submit`] consumes it. While a submission
//! is pending every further `begin_submit` is refused with [`ShellError::Busy`].

pub mod activation;
pub mod relay;
pub mod store;
pub mod usage;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::shell::activation::{classify_code, Activation};
use crate::shell::relay::{RelayClient, RelayError};
use crate::shell::store::{load_usage, save_usage, SessionStore};
use crate::shell::usage::{
    QuotaExhausted, Remaining, UsageEvent, UsageState, FREE_LIMIT, PACK_SIZE,
};

pub const INVALID_CODE_MESSAGE: &str = "Invalid activation code";

/// Submissions refused locally, without a network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("Please paste a job description first")]
    EmptyInput,

    #[error("An optimization is already in progress")]
    Busy,

    #[error("{}", quota_message(.0))]
    QuotaExhausted(QuotaExhausted),
}

fn quota_message(reason: &QuotaExhausted) -> String {
    match reason {
        QuotaExhausted::FreeUsed => format!(
            "You've used your {FREE_LIMIT} free optimizations. Enter an activation code to continue."
        ),
        QuotaExhausted::PackUsed => format!(
            "You've used all {PACK_SIZE} optimizations in your pack. Enter a new activation code to continue."
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay returned a rewrite; it is now the displayed output.
    Optimized,
    /// The relay call failed; the error is displayed and prior output kept.
    Failed,
    /// Refused before any network call.
    Rejected(ShellError),
}

/// An accepted submission waiting for the relay's answer.
#[derive(Debug)]
#[must_use = "a pending submission must be passed to `finish_submit`"]
pub struct PendingSubmit {
    job_description: String,
}

impl PendingSubmit {
    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}

pub struct Shell<S: SessionStore> {
    input: String,
    output: String,
    loading: bool,
    error: Option<String>,
    show_upsell: bool,
    usage: UsageState,
    store: S,
}

impl<S: SessionStore> Shell<S> {
    /// Starts a shell, restoring usage from the session store.
    pub fn new(store: S) -> Self {
        let usage = load_usage(&store);
        debug!("Restored session usage: {usage:?}");
        Self {
            input: String::new(),
            output: String::new(),
            loading: false,
            error: None,
            show_upsell: false,
            usage,
            store,
        }
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_upsell(&self) -> bool {
        self.show_upsell
    }

    pub fn usage(&self) -> UsageState {
        self.usage
    }

    pub fn remaining(&self) -> Remaining {
        self.usage.remaining()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Validates the input and quota and, if both pass, enters the submitting state.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, ShellError> {
        if self.loading {
            return Err(ShellError::Busy);
        }

        if self.input.trim().is_empty() {
            self.error = Some(ShellError::EmptyInput.to_string());
            return Err(ShellError::EmptyInput);
        }

        if let Err(reason) = self.usage.check() {
            info!("Submission blocked: {reason:?}");
            let err = ShellError::QuotaExhausted(reason);
            self.error = Some(err.to_string());
            self.show_upsell = true;
            return Err(err);
        }

        self.loading = true;
        self.error = None;
        Ok(PendingSubmit {
            job_description: self.input.clone(),
        })
    }

    /// Applies the relay's answer and returns to idle.
    pub fn finish_submit(
        &mut self,
        _pending: PendingSubmit,
        result: Result<String, RelayError>,
    ) -> SubmitOutcome {
        self.loading = false;

        match result {
            Ok(optimized) => {
                self.output = optimized;
                self.update_usage(UsageEvent::Optimized);
                SubmitOutcome::Optimized
            }
            Err(e) => {
                warn!("Relay call failed: {e}");
                self.error = Some(format!("Error: {e}"));
                SubmitOutcome::Failed
            }
        }
    }

    /// Runs a whole submission against `relay`.
    pub async fn submit(&mut self, relay: &dyn RelayClient) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(e) => return SubmitOutcome::Rejected(e),
        };

        let result = relay.optimize(pending.job_description()).await;
        self.finish_submit(pending, result)
    }

    /// Applies an activation code locally. Nothing is verified server-side.
    pub fn activate(&mut self, code: &str) -> Activation {
        let activation = classify_code(code);

        match activation.event() {
            Some(event) => {
                info!("Activation accepted: {activation:?}");
                self.update_usage(event);
                self.show_upsell = false;
                self.error = None;
            }
            None => {
                self.error = Some(INVALID_CODE_MESSAGE.to_string());
            }
        }

        activation
    }

    fn update_usage(&mut self, event: UsageEvent) {
        self.usage = self.usage.apply(event);
        save_usage(&mut self.store, &self.usage);
    }
}
