use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use validator::Validate;

use crate::auth::{AuthError, CredentialVerifier, Credentials, FixedCredentialVerifier};
use crate::chat::ChatSession;
use crate::config::Settings;
use crate::core::{ConfidenceRange, ItemRegistry, Matcher};
use crate::models::{
    flatten_errors, BoardSnapshot, FoundItem, FoundItemDraft, LostItem, LostItemDraft,
    MatchNotification, MatchedItem,
};

/// Submission rejection. The flat message list mirrors the error box shown
/// above the original forms; nothing here is fatal and the caller may
/// simply resubmit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Application state: registry, match engine, credential gate, and the
/// in-flight delayed scans.
///
/// Constructed at startup and torn down with [`App::close`] (or Drop);
/// all board state lives here, never in ambient globals. Teardown aborts
/// every scheduled scan so no callback lands on the registry afterward.
pub struct App {
    registry: Arc<Mutex<ItemRegistry>>,
    matcher: Matcher,
    verifier: Arc<dyn CredentialVerifier>,
    matches_tx: mpsc::UnboundedSender<MatchNotification>,
    scan_tasks: StdMutex<Vec<JoinHandle<()>>>,
    settings: Settings,
}

impl App {
    /// Build the app with the fixed demo verifier derived from settings.
    ///
    /// Returns the app plus the receiving end of the match-notification
    /// channel.
    pub fn new(settings: Settings) -> (Self, mpsc::UnboundedReceiver<MatchNotification>) {
        let verifier = Arc::new(FixedCredentialVerifier::new(settings.auth.clone()));
        Self::with_verifier(settings, verifier)
    }

    /// Build the app with a caller-supplied credential verifier.
    pub fn with_verifier(
        settings: Settings,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> (Self, mpsc::UnboundedReceiver<MatchNotification>) {
        let (matches_tx, matches_rx) = mpsc::unbounded_channel();

        let min = settings
            .matching
            .min_confidence
            .min(settings.matching.max_confidence);
        let max = settings
            .matching
            .min_confidence
            .max(settings.matching.max_confidence);
        let matcher = Matcher::new(ConfidenceRange { min, max });

        let app = Self {
            registry: Arc::new(Mutex::new(ItemRegistry::new())),
            matcher,
            verifier,
            matches_tx,
            scan_tasks: StdMutex::new(Vec::new()),
            settings,
        };
        (app, matches_rx)
    }

    /// Validate and append a lost-item report.
    pub async fn submit_lost_item(&self, draft: LostItemDraft) -> Result<LostItem, SubmitError> {
        if let Err(errors) = draft.validate() {
            let messages = flatten_errors(&errors);
            tracing::info!("Lost-item submission rejected: {:?}", messages);
            return Err(SubmitError::Invalid(messages));
        }

        let item = self.registry.lock().await.add_lost_item(draft);
        tracing::info!("Lost item reported: {} (id {})", item.item_name, item.id);
        Ok(item)
    }

    /// Validate and append a found-item report, then schedule the delayed
    /// match scan.
    ///
    /// The scan runs against the lost items that existed at submission
    /// time, so a match always references records that predate it. When
    /// two found items race for the same lost item, the first-submitted
    /// one wins by scan order.
    pub async fn submit_found_item(
        &self,
        draft: FoundItemDraft,
    ) -> Result<FoundItem, SubmitError> {
        if let Err(errors) = draft.validate() {
            let messages = flatten_errors(&errors);
            tracing::info!("Found-item submission rejected: {:?}", messages);
            return Err(SubmitError::Invalid(messages));
        }

        let (item, lost_snapshot) = {
            let mut registry = self.registry.lock().await;
            let item = registry.add_found_item(draft);
            (item, registry.lost_items().to_vec())
        };
        tracing::info!("Found item reported: {} (id {})", item.item_name, item.id);

        self.schedule_match_scan(item.clone(), lost_snapshot);
        Ok(item)
    }

    fn schedule_match_scan(&self, found: FoundItem, lost_snapshot: Vec<LostItem>) {
        let registry = Arc::clone(&self.registry);
        let matcher = self.matcher.clone();
        let matches_tx = self.matches_tx.clone();
        let delay = Duration::from_millis(self.settings.matching.scan_delay_ms);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            match matcher.try_match(&found, &lost_snapshot) {
                Some(candidate) => {
                    let matched = registry.lock().await.record_match(candidate, found);
                    tracing::info!(
                        "Match detected: lost {} / found {} at {}% confidence",
                        matched.lost_item.id,
                        matched.found_item.id,
                        matched.match_confidence
                    );
                    // Receiver may be gone; the match is still recorded.
                    let _ = matches_tx.send(MatchNotification {
                        matched,
                        detected_at: Utc::now(),
                    });
                }
                None => {
                    tracing::debug!("No match for found item {}", found.id);
                }
            }
        });

        let mut tasks = self.scan_tasks.lock().unwrap();
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    /// Open a chat session for a detected match.
    pub fn open_session(&self, matched: MatchedItem) -> ChatSession {
        ChatSession::open(matched, self.settings.chat.clone())
    }

    /// Check credentials against one of the three sign-in gates. A
    /// rejection carries the user-facing message; retries are unlimited.
    pub fn sign_in(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if self.verifier.verify(credentials) {
            tracing::info!("Sign-in accepted");
            return Ok(());
        }
        let err = match credentials {
            Credentials::Admin { .. } => AuthError::InvalidAdminCredentials,
            Credentials::InstitutionalEmail { .. } => AuthError::NonInstitutionalEmail {
                domain: self.settings.auth.email_domain.clone(),
            },
            Credentials::Otp { .. } => AuthError::MalformedOtp {
                length: self.settings.auth.otp_length,
            },
        };
        tracing::info!("Sign-in rejected: {}", err);
        Err(err)
    }

    /// Full board view for the admin panel.
    pub async fn board_snapshot(&self) -> BoardSnapshot {
        self.registry.lock().await.snapshot()
    }

    /// Tear down the app, aborting every pending match scan.
    pub fn close(&self) {
        let mut tasks = self.scan_tasks.lock().unwrap();
        for task in tasks.drain(..) {
            task.abort();
        }
        tracing::debug!("Application state closed");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Ok(mut tasks) = self.scan_tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}
