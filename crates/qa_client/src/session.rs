//! Session controller - owns the current exchange.
//!
//! One [`ChatSession`] per subject; instances share nothing. Starting
//! a new question cancels the previous exchange before anything else
//! happens. The cancellation token and the published snapshot live
//! under one mutex, and a publish first re-checks its own token under
//! that mutex, so a cancelled exchange can never publish after its
//! replacement has begun.

use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::StreamExt;
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use qa_core::{Rating, StreamEvent};
use qa_state::{fold, SessionSnapshot};

use crate::config::ClientConfig;
use crate::decoder::FrameDecoder;
use crate::error::ClientError;

/// Subscribers that fall this far behind are dropped rather than
/// stalling the decode loop.
const SUBSCRIBER_CHANNEL_CAPACITY: usize = 64;

#[derive(Serialize)]
struct AskBody<'a> {
    question: &'a str,
}

#[derive(Serialize)]
struct FeedbackBody {
    rating: Rating,
}

/// The token-and-snapshot pair plus subscriber list, guarded as one.
struct State {
    cancel: CancellationToken,
    snapshot: SessionSnapshot,
    subscribers: Vec<mpsc::Sender<SessionSnapshot>>,
}

struct Shared {
    state: Mutex<State>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("session state poisoned")
    }

    /// Store and fan out a snapshot on behalf of the exchange holding
    /// `token`. A no-op once that token has been cancelled: the
    /// replacement cancels under the same mutex before taking over,
    /// so a stale exchange cannot publish late.
    fn publish(&self, token: &CancellationToken, snapshot: SessionSnapshot) {
        let mut state = self.lock();
        if token.is_cancelled() {
            return;
        }
        publish_locked(&mut state, snapshot);
    }
}

fn publish_locked(state: &mut State, snapshot: SessionSnapshot) {
    state.snapshot = snapshot.clone();
    state
        .subscribers
        .retain(|tx| tx.try_send(snapshot.clone()).is_ok());
}

/// Drives question/answer exchanges for one subject.
///
/// At most one exchange is active at a time: `ask` and `reset` cancel
/// whatever is in flight before doing anything else.
pub struct ChatSession {
    client: reqwest::Client,
    config: ClientConfig,
    subject_id: String,
    shared: Arc<Shared>,
}

impl ChatSession {
    pub fn new(config: ClientConfig, subject_id: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), config, subject_id)
    }

    /// Build a session around an existing HTTP client.
    pub fn with_client(
        client: reqwest::Client,
        config: ClientConfig,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            config,
            subject_id: subject_id.into(),
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    cancel: CancellationToken::new(),
                    snapshot: SessionSnapshot::default(),
                    subscribers: Vec::new(),
                }),
            }),
        }
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock().snapshot.clone()
    }

    /// Subscribe to snapshot updates.
    ///
    /// Every publish is delivered in fold order. A receiver that is
    /// dropped or stops draining is pruned on the next publish.
    pub fn subscribe(&self) -> mpsc::Receiver<SessionSnapshot> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CHANNEL_CAPACITY);
        self.shared.lock().subscribers.push(tx);
        rx
    }

    /// Start a new exchange, cancelling any exchange in flight.
    ///
    /// A question that trims to empty is rejected locally; no request
    /// is made and the snapshot is left untouched. Otherwise the
    /// thinking baseline is published and the call is issued; from
    /// then on progress arrives through the published snapshots.
    /// Must be called within a tokio runtime.
    pub fn ask(&self, question: &str) -> Result<(), ClientError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ClientError::EmptyQuestion);
        }

        // Cancel-then-replace, in one step under the state mutex.
        let token = {
            let mut state = self.shared.lock();
            state.cancel.cancel();
            state.cancel = CancellationToken::new();
            let token = state.cancel.clone();
            publish_locked(&mut state, SessionSnapshot::thinking());
            token
        };

        info!("[{}] asking: {} chars", self.subject_id, question.len());
        let request = self
            .client
            .post(self.config.chats_url(&self.subject_id))
            .json(&AskBody { question });

        let shared = Arc::clone(&self.shared);
        let subject_id = self.subject_id.clone();
        tokio::spawn(async move {
            run_exchange(&shared, &subject_id, request, &token).await;
        });
        Ok(())
    }

    /// Cancel any in-flight exchange and republish the idle snapshot.
    ///
    /// Safe to call at any time, including when already idle.
    pub fn reset(&self) {
        let mut state = self.shared.lock();
        state.cancel.cancel();
        state.cancel = CancellationToken::new();
        publish_locked(&mut state, SessionSnapshot::default());
    }

    /// Record a rating for a completed exchange.
    ///
    /// Independent of the stream: success or failure never touches the
    /// published snapshot, and callers may ignore the result.
    pub async fn send_feedback(
        &self,
        chat_id: &str,
        rating: Rating,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.config.feedback_url(&self.subject_id, chat_id))
            .json(&FeedbackBody { rating })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(())
    }
}

/// Run one exchange to completion, cancellation or failure.
///
/// The only suspension points are the outbound call and each body
/// chunk read; both race the cancellation token. Decoding, folding
/// and publishing are synchronous per chunk, so snapshots go out in
/// the order their events were decoded.
async fn run_exchange(
    shared: &Shared,
    subject_id: &str,
    request: reqwest::RequestBuilder,
    token: &CancellationToken,
) {
    let response = tokio::select! {
        _ = token.cancelled() => {
            debug!("[{subject_id}] cancelled before the response arrived");
            return;
        }
        result = request.send() => match result {
            Ok(response) => response,
            Err(err) => {
                warn!("[{subject_id}] request failed: {err}");
                fail(shared, token, &SessionSnapshot::thinking(), err.to_string());
                return;
            }
        },
    };

    let status = response.status();
    if !status.is_success() {
        // The body of a failed call is never decoded as frames; its
        // text only feeds the error message.
        let body = tokio::select! {
            _ = token.cancelled() => return,
            body = response.text() => body.unwrap_or_default(),
        };
        warn!("[{subject_id}] non-success status: {status}");
        fail(
            shared,
            token,
            &SessionSnapshot::thinking(),
            format!("HTTP {}: {}", status.as_u16(), body),
        );
        return;
    }

    let mut body = response.bytes_stream();
    let mut decoder = FrameDecoder::new();
    let mut snapshot = SessionSnapshot::thinking();

    loop {
        let chunk = tokio::select! {
            _ = token.cancelled() => {
                debug!("[{subject_id}] cancelled mid-stream");
                return;
            }
            chunk = body.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                for event in decoder.feed(&bytes) {
                    let terminal = event.is_terminal();
                    snapshot = fold(&snapshot, &event);
                    shared.publish(token, snapshot.clone());
                    if terminal {
                        info!("[{subject_id}] exchange finished: {:?}", snapshot.phase);
                        return;
                    }
                }
            }
            Some(Err(err)) => {
                if token.is_cancelled() {
                    return;
                }
                warn!("[{subject_id}] stream failed: {err}");
                fail(shared, token, &snapshot, err.to_string());
                return;
            }
            None => {
                // Stream ended without a terminal frame. Whatever was
                // published last stays visible; a partial line left in
                // the decoder is discarded with it.
                debug!("[{subject_id}] stream ended without a terminal frame");
                return;
            }
        }
    }
}

/// Fold a transport-level failure into a terminal error snapshot.
fn fail(shared: &Shared, token: &CancellationToken, snapshot: &SessionSnapshot, message: String) {
    let next = fold(snapshot, &StreamEvent::Error { message });
    shared.publish(token, next);
}
