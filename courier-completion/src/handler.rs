//! The completion handler.

use std::sync::Arc;

use tracing::{info, warn};

use courier_core::config::CourierConfig;
use courier_core::engine::QueryEngine;
use courier_core::link::LinkMinter;
use courier_core::status::QueryState;
use courier_core::store::{Lookup, StatusStore, UpdateOutcome};
use courier_mail::{Email, RESULTS_READY_SUBJECT, Transport, results_ready_html};

use crate::error::CompletionError;
use crate::event::QueryStateChangeDetail;

/// Who the notification went to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// The requester resolved through the secondary index.
    Requester(String),
    /// Degraded mode: the index lookup was empty or ambiguous, so the
    /// notification went to the configured sender address instead of being
    /// dropped.
    SenderFallback(String),
}

impl Recipient {
    /// The address this recipient receives mail at; also the key the status
    /// update runs against.
    pub fn address(&self) -> &str {
        match self {
            Self::Requester(addr) | Self::SenderFallback(addr) => addr,
        }
    }
}

/// What happened to the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDisposition {
    /// The conditional update applied.
    Applied,
    /// The condition failed; a newer submission already superseded this
    /// execution. Benign.
    Superseded,
    /// The update request itself failed. Logged only; the notification was
    /// already delivered, and the record expires on its own.
    Failed,
}

/// Result of one completion invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The query is still in flight; nothing to deliver yet.
    Ignored { state: QueryState },
    /// The notification was sent and the status update attempted.
    Delivered {
        recipient: Recipient,
        link: Option<String>,
        update: UpdateDisposition,
    },
}

/// Handles query state-change notifications.
pub struct CompletionHandler<E, S, L, M> {
    config: Arc<CourierConfig>,
    engine: E,
    store: S,
    links: L,
    mailer: M,
}

impl<E, S, L, M> CompletionHandler<E, S, L, M>
where
    E: QueryEngine,
    S: StatusStore,
    L: LinkMinter,
    M: Transport,
{
    pub fn new(config: Arc<CourierConfig>, engine: E, store: S, links: L, mailer: M) -> Self {
        Self {
            config,
            engine,
            store,
            links,
            mailer,
        }
    }

    /// Handle one state-change notification.
    ///
    /// Invocations are at-least-once; duplicate deliveries re-send the
    /// notification but the conditional status update keeps the store
    /// consistent.
    pub async fn handle(
        &self,
        detail: &QueryStateChangeDetail,
    ) -> Result<CompletionOutcome, CompletionError> {
        let execution_id = detail.query_execution_id.as_str();

        match detail.current_state {
            QueryState::Failed => {
                return Err(CompletionError::QueryFailed {
                    execution_id: execution_id.to_string(),
                });
            }
            QueryState::Succeeded => {}
            state => {
                info!(execution_id, %state, "query not finished; nothing to deliver");
                return Ok(CompletionOutcome::Ignored { state });
            }
        }

        let location = self.engine.result_location(execution_id).await?;
        info!(execution_id, %location, "query succeeded");

        // A broken link is still worth a notification; minting failures
        // degrade to a link-less email rather than aborting.
        let link = match self.links.mint(&location, self.config.link_ttl).await {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(execution_id, error = %err, "could not mint download link");
                None
            }
        };

        let recipient = match self.store.find_by_execution_id(execution_id).await? {
            Lookup::Unique(key) => Recipient::Requester(key.requester_id),
            Lookup::Missing => {
                warn!(execution_id, "no status record for execution; notifying sender");
                Recipient::SenderFallback(self.config.sender_address.clone())
            }
            Lookup::Ambiguous(count) => {
                warn!(
                    execution_id,
                    count, "ambiguous status records for execution; notifying sender"
                );
                Recipient::SenderFallback(self.config.sender_address.clone())
            }
        };

        let email = Email::new()
            .from(&self.config.sender_address)
            .to(recipient.address())
            .subject(RESULTS_READY_SUBJECT)
            .html(results_ready_html(execution_id, link.as_deref()));
        self.mailer.send(&email).await?;
        info!(execution_id, recipient = recipient.address(), "notification sent");

        let update = match self
            .store
            .update_status(recipient.address(), execution_id, detail.current_state)
            .await
        {
            Ok(UpdateOutcome::Applied) => UpdateDisposition::Applied,
            Ok(UpdateOutcome::Superseded) => {
                info!(execution_id, "status already superseded by a newer submission");
                UpdateDisposition::Superseded
            }
            Err(err) => {
                warn!(execution_id, error = %err, "status update failed");
                UpdateDisposition::Failed
            }
        };

        Ok(CompletionOutcome::Delivered {
            recipient,
            link,
            update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    use courier_core::error::{EngineError, LinkError, StoreError};
    use courier_core::memory::MemoryStatusStore;
    use courier_core::s3uri::S3Uri;
    use courier_core::status::StatusRecord;
    use courier_mail::MailError;

    struct FakeEngine;

    #[async_trait]
    impl QueryEngine for FakeEngine {
        async fn submit(
            &self,
            _: &courier_core::engine::QuerySubmission,
        ) -> Result<courier_core::engine::SubmissionAck, EngineError> {
            unimplemented!("not used by the completion side")
        }

        async fn result_location(&self, execution_id: &str) -> Result<S3Uri, EngineError> {
            Ok(S3Uri::parse(&format!("s3://results-bucket/athena/{execution_id}.csv")).unwrap())
        }
    }

    struct FakeMinter {
        fail: bool,
    }

    #[async_trait]
    impl LinkMinter for FakeMinter {
        async fn mint(&self, location: &S3Uri, ttl: Duration) -> Result<String, LinkError> {
            if self.fail {
                return Err(LinkError::Presign("denied".to_string()));
            }
            Ok(format!("https://signed.example.com/{}?ttl={}", location.key(), ttl.as_secs()))
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Email>>,
        fail: bool,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, email: &Email) -> courier_mail::Result<()> {
            if self.fail {
                return Err(MailError::Provider("ses unavailable".to_string()));
            }
            email.validate()?;
            self.sent.lock().push(email.clone());
            Ok(())
        }
    }

    fn config() -> Arc<CourierConfig> {
        Arc::new(CourierConfig {
            region: "us-east-1".to_string(),
            output_bucket: "results-bucket".to_string(),
            workgroup: "primary".to_string(),
            table_name: "query-status".to_string(),
            sender_address: "no-reply@example.com".to_string(),
            link_ttl: Duration::from_secs(3600),
        })
    }

    fn succeeded(execution_id: &str) -> QueryStateChangeDetail {
        QueryStateChangeDetail {
            query_execution_id: execution_id.to_string(),
            previous_state: Some(QueryState::Running),
            current_state: QueryState::Succeeded,
            workgroup_name: Some("primary".to_string()),
        }
    }

    type TestHandler =
        CompletionHandler<FakeEngine, Arc<MemoryStatusStore>, FakeMinter, Arc<RecordingTransport>>;

    fn handler(
        store: Arc<MemoryStatusStore>,
        mailer: Arc<RecordingTransport>,
        mint_fails: bool,
    ) -> TestHandler {
        CompletionHandler::new(
            config(),
            FakeEngine,
            store,
            FakeMinter { fail: mint_fails },
            mailer,
        )
    }

    #[tokio::test]
    async fn failed_state_is_fatal() {
        let handler = handler(Arc::new(MemoryStatusStore::new()), Arc::default(), false);
        let mut detail = succeeded("e1");
        detail.current_state = QueryState::Failed;
        let err = handler.handle(&detail).await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn in_flight_states_are_ignored_without_side_effects() {
        let store = Arc::new(MemoryStatusStore::new());
        store
            .put(StatusRecord::queued("alice@example.com", "e1", Utc::now()))
            .await
            .unwrap();
        let mailer = Arc::new(RecordingTransport::default());
        let handler = handler(store.clone(), mailer.clone(), false);

        let mut detail = succeeded("e1");
        detail.current_state = QueryState::Running;
        let outcome = handler.handle(&detail).await.unwrap();

        assert_eq!(
            outcome,
            CompletionOutcome::Ignored {
                state: QueryState::Running
            }
        );
        assert!(mailer.sent.lock().is_empty());
        assert_eq!(store.get("alice@example.com").unwrap().status, QueryState::Queued);
    }

    #[tokio::test]
    async fn success_notifies_requester_and_updates_status() {
        let store = Arc::new(MemoryStatusStore::new());
        store
            .put(StatusRecord::queued("alice@example.com", "e1", Utc::now()))
            .await
            .unwrap();
        let mailer = Arc::new(RecordingTransport::default());
        let handler = handler(store.clone(), mailer.clone(), false);

        let outcome = handler.handle(&succeeded("e1")).await.unwrap();

        let CompletionOutcome::Delivered {
            recipient,
            link,
            update,
        } = outcome
        else {
            panic!("expected delivery");
        };
        assert_eq!(recipient, Recipient::Requester("alice@example.com".to_string()));
        assert!(link.as_deref().unwrap().starts_with("https://signed.example.com/"));
        assert_eq!(update, UpdateDisposition::Applied);

        let sent = mailer.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["alice@example.com".to_string()]);
        assert_eq!(sent[0].from.as_deref(), Some("no-reply@example.com"));
        assert!(sent[0].html.as_deref().unwrap().contains("e1"));

        assert_eq!(store.get("alice@example.com").unwrap().status, QueryState::Succeeded);
    }

    #[tokio::test]
    async fn duplicate_delivery_sends_twice_but_status_is_stable() {
        let store = Arc::new(MemoryStatusStore::new());
        store
            .put(StatusRecord::queued("alice@example.com", "e1", Utc::now()))
            .await
            .unwrap();
        let mailer = Arc::new(RecordingTransport::default());
        let handler = handler(store.clone(), mailer.clone(), false);

        handler.handle(&succeeded("e1")).await.unwrap();
        let second = handler.handle(&succeeded("e1")).await.unwrap();

        // No de-dup of sends; the store stays consistent either way.
        assert_eq!(mailer.sent.lock().len(), 2);
        assert!(matches!(second, CompletionOutcome::Delivered { .. }));
        assert_eq!(store.get("alice@example.com").unwrap().status, QueryState::Succeeded);
    }

    #[tokio::test]
    async fn stale_completion_loses_the_race_to_a_newer_submission() {
        let store = Arc::new(MemoryStatusStore::new());
        store
            .put(StatusRecord::queued("alice@example.com", "e1", Utc::now()))
            .await
            .unwrap();
        // A newer submission for the same requester supersedes e1.
        store
            .put(StatusRecord::queued("alice@example.com", "e2", Utc::now()))
            .await
            .unwrap();
        let mailer = Arc::new(RecordingTransport::default());
        let handler = handler(store.clone(), mailer.clone(), false);

        let outcome = handler.handle(&succeeded("e1")).await.unwrap();

        let CompletionOutcome::Delivered { recipient, update, .. } = outcome else {
            panic!("expected delivery");
        };
        // e1 is no longer indexed, so this is the degraded recipient path;
        // either way the stored status must not move.
        assert_eq!(
            recipient,
            Recipient::SenderFallback("no-reply@example.com".to_string())
        );
        assert_eq!(update, UpdateDisposition::Superseded);
        assert_eq!(store.get("alice@example.com").unwrap().status, QueryState::Queued);
        assert_eq!(store.get("alice@example.com").unwrap().execution_id, "e2");
    }

    #[tokio::test]
    async fn missing_record_falls_back_to_sender_address() {
        let store = Arc::new(MemoryStatusStore::new());
        let mailer = Arc::new(RecordingTransport::default());
        let handler = handler(store, mailer.clone(), false);

        let outcome = handler.handle(&succeeded("e1")).await.unwrap();

        let CompletionOutcome::Delivered { recipient, update, .. } = outcome else {
            panic!("expected delivery");
        };
        assert_eq!(
            recipient,
            Recipient::SenderFallback("no-reply@example.com".to_string())
        );
        // The update ran against the synthesized key and lost the condition.
        assert_eq!(update, UpdateDisposition::Superseded);
        let sent = mailer.sent.lock();
        assert_eq!(sent[0].to, vec!["no-reply@example.com".to_string()]);
    }

    #[tokio::test]
    async fn link_minting_failure_degrades_to_linkless_email() {
        let store = Arc::new(MemoryStatusStore::new());
        store
            .put(StatusRecord::queued("alice@example.com", "e1", Utc::now()))
            .await
            .unwrap();
        let mailer = Arc::new(RecordingTransport::default());
        let handler = handler(store.clone(), mailer.clone(), true);

        let outcome = handler.handle(&succeeded("e1")).await.unwrap();

        let CompletionOutcome::Delivered { link, update, .. } = outcome else {
            panic!("expected delivery");
        };
        assert_eq!(link, None);
        assert_eq!(update, UpdateDisposition::Applied);
        assert_eq!(mailer.sent.lock().len(), 1);
    }

    #[tokio::test]
    async fn send_failure_fails_the_invocation() {
        let store = Arc::new(MemoryStatusStore::new());
        store
            .put(StatusRecord::queued("alice@example.com", "e1", Utc::now()))
            .await
            .unwrap();
        let mailer = Arc::new(RecordingTransport {
            sent: Mutex::new(Vec::new()),
            fail: true,
        });
        let handler = handler(store.clone(), mailer, false);

        let err = handler.handle(&succeeded("e1")).await.unwrap_err();
        assert!(!err.is_fatal());
        // The update never ran.
        assert_eq!(store.get("alice@example.com").unwrap().status, QueryState::Queued);
    }

    #[tokio::test]
    async fn cancelled_state_is_ignored() {
        let handler = handler(Arc::new(MemoryStatusStore::new()), Arc::default(), false);
        let mut detail = succeeded("e1");
        detail.current_state = QueryState::Cancelled;
        let outcome = handler.handle(&detail).await.unwrap();
        assert_eq!(
            outcome,
            CompletionOutcome::Ignored {
                state: QueryState::Cancelled
            }
        );
    }
}
