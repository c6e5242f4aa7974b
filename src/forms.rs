//! The three dashboard components, independent of HTTP.
//!
//! Each component owns its view state and moves it through
//! `Idle -> Requesting -> {Success, Error}` on every submit. Submits take a
//! ticket from a [`Sequencer`]; a response whose ticket is no longer the
//! latest is dropped, so a slow earlier request never overwrites a newer one.
//! In-flight requests are not cancelled.

use crate::errors::{AppError, ResultExt};
use crate::handoff::TwitterHandoff;
use crate::prediction_client::PredictionClient;
use crate::validation::{validate_query, validate_username};
use crate::verification::{
    InstagramVerification, LinkedProfile, SocialLinks, TwitterVerification,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const INVALID_INSTAGRAM_USERNAME: &str = "Please enter a valid Instagram username";
pub const INVALID_TWITTER_USERNAME: &str = "Please enter a valid Twitter username";
pub const EMPTY_QUERY: &str = "Please enter a search query";
pub const ANALYSIS_ERROR: &str = "An error occurred while analyzing the account";
pub const SEARCH_ERROR: &str = "An error occurred while searching";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Requesting,
    Success,
    Error,
}

/// Message shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FormError {
    /// Input rejected locally; no request was issued.
    Validation(String),
    /// A request failed; details are in the logs only.
    Request(String),
}

impl FormError {
    pub fn message(&self) -> &str {
        match self {
            FormError::Validation(msg) | FormError::Request(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<T> {
    pub phase: Phase,
    pub result: Option<T>,
    pub error: Option<FormError>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            result: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Issues monotonically increasing request tickets.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// View state plus the sequencer guarding it.
///
/// Tickets are issued while the state lock is held, and every update checks
/// its ticket under the same lock. The lock is never held across an await.
/// HTTP handlers build a fresh component per request, so only long-lived
/// components (library callers) ever see a stale ticket.
struct FormCore<T> {
    sequencer: Sequencer,
    state: Mutex<ViewState<T>>,
}

impl<T: Clone> FormCore<T> {
    fn new() -> Self {
        Self {
            sequencer: Sequencer::default(),
            state: Mutex::new(ViewState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> ViewState<T> {
        self.lock().clone()
    }

    /// Records a validation failure. Everything else stays as it was.
    fn reject(&self, message: &str) -> ViewState<T> {
        let mut state = self.lock();
        state.error = Some(FormError::Validation(message.to_string()));
        state.clone()
    }

    fn begin(&self) -> Ticket {
        let mut state = self.lock();
        let ticket = self.sequencer.issue();
        state.phase = Phase::Requesting;
        state.result = None;
        state.error = None;
        ticket
    }

    /// Applies `update` if `ticket` is still the latest. Returns whether it did.
    fn apply(&self, ticket: Ticket, update: impl FnOnce(&mut ViewState<T>)) -> bool {
        let mut state = self.lock();
        if !self.sequencer.is_current(ticket) {
            tracing::debug!("Discarding stale response for request #{}", ticket.0);
            return false;
        }
        update(&mut state);
        true
    }

    fn fail(&self, ticket: Ticket, message: &str) {
        self.apply(ticket, |state| {
            state.phase = Phase::Error;
            state.result = None;
            state.error = Some(FormError::Request(message.to_string()));
        });
    }

    fn succeed(&self, ticket: Ticket, result: T) -> bool {
        self.apply(ticket, |state| {
            state.phase = Phase::Success;
            state.result = Some(result);
        })
    }
}

impl<T: Clone + LinkedProfile> FormCore<T> {
    /// Second stage of a verification: merge the social links into the
    /// displayed result. A failure here keeps the verdict on screen.
    async fn load_social_links(&self, client: &PredictionClient, ticket: Ticket, username: &str) {
        let outcome = client
            .social_links(username)
            .await
            .with_context(|| format!("social links for {}", username));

        self.apply(ticket, |state| {
            let Some(result) = state.result.as_mut() else {
                return;
            };
            match outcome {
                Ok(links) => *result.social_links_mut() = SocialLinks::Loaded(links),
                Err(e) => {
                    tracing::warn!("Social links lookup failed: {}", e);
                    *result.social_links_mut() = SocialLinks::Failed;
                    state.error = Some(FormError::Request(ANALYSIS_ERROR.to_string()));
                }
            }
        });
    }
}

fn log_failure(action: &str, err: &AppError) {
    tracing::error!("{} failed: {}", action, err);
}

/// Instagram verification form.
pub struct InstagramVerificationForm {
    client: PredictionClient,
    core: FormCore<InstagramVerification>,
}

impl InstagramVerificationForm {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            core: FormCore::new(),
        }
    }

    pub fn state(&self) -> ViewState<InstagramVerification> {
        self.core.snapshot()
    }

    /// Verifies `input`: predict first, then social links.
    pub async fn submit(&self, input: &str) -> ViewState<InstagramVerification> {
        let Some(username) = validate_username(input) else {
            tracing::debug!("Rejected Instagram username {:?}", input);
            return self.core.reject(INVALID_INSTAGRAM_USERNAME);
        };

        let ticket = self.core.begin();
        let prediction = self
            .client
            .predict_instagram(username)
            .await
            .context("instagram prediction");

        match prediction {
            Ok(prediction) => {
                let verification = InstagramVerification::from_prediction(prediction);
                tracing::info!(
                    "Instagram verdict for {}: {:?} ({}%)",
                    username,
                    verification.verdict.kind,
                    verification.verdict.risk_score
                );
                if !self.core.succeed(ticket, verification) {
                    return self.core.snapshot();
                }
            }
            Err(e) => {
                log_failure("Instagram verification", &e);
                self.core.fail(ticket, ANALYSIS_ERROR);
                return self.core.snapshot();
            }
        }

        self.core
            .load_social_links(&self.client, ticket, username)
            .await;
        self.core.snapshot()
    }
}

/// Twitter verification form.
pub struct TwitterVerificationForm {
    client: PredictionClient,
    core: FormCore<TwitterVerification>,
}

impl TwitterVerificationForm {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            core: FormCore::new(),
        }
    }

    pub fn state(&self) -> ViewState<TwitterVerification> {
        self.core.snapshot()
    }

    /// Verifies `input`: predict first, then social links.
    pub async fn submit(&self, input: &str) -> ViewState<TwitterVerification> {
        let Some(username) = validate_username(input) else {
            tracing::debug!("Rejected Twitter username {:?}", input);
            return self.core.reject(INVALID_TWITTER_USERNAME);
        };

        let ticket = self.core.begin();
        let prediction = self
            .client
            .predict_twitter(username)
            .await
            .context("twitter prediction");

        match prediction {
            Ok(prediction) => {
                let verification = TwitterVerification::from_prediction(prediction);
                tracing::info!(
                    "Twitter verdict for {}: {:?} ({}%)",
                    username,
                    verification.verdict.kind,
                    verification.verdict.risk_score
                );
                if !self.core.succeed(ticket, verification) {
                    return self.core.snapshot();
                }
            }
            Err(e) => {
                log_failure("Twitter verification", &e);
                self.core.fail(ticket, ANALYSIS_ERROR);
                return self.core.snapshot();
            }
        }

        self.core
            .load_social_links(&self.client, ticket, username)
            .await;
        self.core.snapshot()
    }
}

/// One search result with its hand-off to the Twitter form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub url: String,
    pub analyze_path: String,
}

impl SearchHit {
    pub fn new(url: String) -> Self {
        let analyze_path = TwitterHandoff::for_result(&url).path();
        Self { url, analyze_path }
    }
}

/// Universal search form.
pub struct UniversalSearch {
    client: PredictionClient,
    core: FormCore<Vec<SearchHit>>,
}

impl UniversalSearch {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            core: FormCore::new(),
        }
    }

    pub fn state(&self) -> ViewState<Vec<SearchHit>> {
        self.core.snapshot()
    }

    pub async fn submit(&self, input: &str) -> ViewState<Vec<SearchHit>> {
        let Some(query) = validate_query(input) else {
            return self.core.reject(EMPTY_QUERY);
        };

        let ticket = self.core.begin();
        match self.client.search(query).await.context("search") {
            Ok(results) => {
                let hits = results.into_iter().map(SearchHit::new).collect();
                self.core.succeed(ticket, hits);
            }
            Err(e) => {
                log_failure("Search", &e);
                self.core.fail(ticket, SEARCH_ERROR);
            }
        }
        self.core.snapshot()
    }
}
