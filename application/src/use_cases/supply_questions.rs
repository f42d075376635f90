//! Question supply: cache → remote generation → static fallback.
//!
//! The [`QuestionSupplier`] is an actor. It owns the [`QuestionCache`] and
//! the in-flight table and processes commands one at a time from a
//! single-consumer queue, so neither needs a lock. Remote generation runs in
//! spawned tasks whose completions are picked up by the same loop.
//!
//! A remote call is never cancelled. When an attempt outlives
//! `request_timeout` the supplier stops waiting for it and moves on, and
//! whatever it returns later is still put into the cache.
//!
//! ```text
//! SupplierHandle::request(topic, n)
//!        │
//!        ▼
//!  cache has n? ──yes──► pop n
//!        │no
//!  in flight for topic? ──yes──► wait for it (coalesced)
//!        │no
//!  spawn generate_with_retry ──ok──► put into cache, serve every waiter
//!                           └─err─► serve every waiter from the fallback corpus
//! ```

use crate::cache::QuestionCache;
use crate::config::SupplyParams;
use crate::ports::fallback_corpus::FallbackCorpus;
use crate::ports::question_generator::{GeneratorError, QuestionGenerator};
use futures::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use trivia_domain::{DomainError, Question, QuestionDraft, Topic};

/// Errors surfaced by the supplier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplyError {
    /// Cache empty, remote attempts exhausted and no fallback questions,
    /// not even for the default topic.
    #[error("No questions available for topic '{topic}'")]
    Exhausted { topic: Topic },

    #[error("Question supplier has shut down")]
    Closed,
}

/// Snapshot of the supplier's bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplyStatus {
    /// Unexpired cached questions per topic, sorted by topic.
    pub cached: Vec<(Topic, usize)>,
    /// Topics with an outstanding remote call, sorted.
    pub in_flight: Vec<Topic>,
}

type Reply = oneshot::Sender<Result<Vec<Question>, SupplyError>>;

enum SupplyCommand {
    Request {
        topic: Topic,
        count: usize,
        reply: Reply,
    },
    Prefetch {
        topic: Topic,
        count: usize,
    },
    Clear {
        topic: Topic,
    },
    ClearAll,
    Status {
        reply: oneshot::Sender<SupplyStatus>,
    },
}

/// A caller waiting on an in-flight generation.
struct Waiter {
    count: usize,
    reply: Reply,
}

type GenerationResult = (Topic, Result<Vec<Question>, GeneratorError>);

/// Validated batch from an attempt nobody was waiting for any more.
type LateBatch = (Topic, Vec<Question>);

/// Cheap, cloneable front door to the supplier actor.
#[derive(Clone)]
pub struct SupplierHandle {
    tx: mpsc::UnboundedSender<SupplyCommand>,
}

impl SupplierHandle {
    /// Get `count` questions for `topic`.
    ///
    /// Only fails when every tier is empty or the supplier is gone.
    pub async fn request(&self, topic: &Topic, count: usize) -> Result<Vec<Question>, SupplyError> {
        let (reply, rx) = oneshot::channel();
        self.send(SupplyCommand::Request {
            topic: topic.clone(),
            count,
            reply,
        })?;
        rx.await.map_err(|_| SupplyError::Closed)?
    }

    /// Warm the cache for `topic` without consuming anything.
    pub fn prefetch(&self, topic: &Topic, count: usize) -> Result<(), SupplyError> {
        self.send(SupplyCommand::Prefetch {
            topic: topic.clone(),
            count,
        })
    }

    pub fn clear(&self, topic: &Topic) -> Result<(), SupplyError> {
        self.send(SupplyCommand::Clear {
            topic: topic.clone(),
        })
    }

    pub fn clear_all(&self) -> Result<(), SupplyError> {
        self.send(SupplyCommand::ClearAll)
    }

    pub async fn status(&self) -> Result<SupplyStatus, SupplyError> {
        let (reply, rx) = oneshot::channel();
        self.send(SupplyCommand::Status { reply })?;
        rx.await.map_err(|_| SupplyError::Closed)
    }

    fn send(&self, command: SupplyCommand) -> Result<(), SupplyError> {
        self.tx.send(command).map_err(|_| SupplyError::Closed)
    }
}

/// The supplier actor. Build it with [`QuestionSupplier::spawn`].
pub struct QuestionSupplier {
    cache: QuestionCache,
    in_flight: HashMap<Topic, Vec<Waiter>>,
    generator: Arc<dyn QuestionGenerator>,
    corpus: Arc<dyn FallbackCorpus>,
    params: SupplyParams,
}

impl QuestionSupplier {
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        corpus: Arc<dyn FallbackCorpus>,
        params: SupplyParams,
    ) -> Result<Self, DomainError> {
        params.validate()?;
        let cache = QuestionCache::new(params.max_cache_size, params.cache_ttl)?;
        Ok(Self {
            cache,
            in_flight: HashMap::new(),
            generator,
            corpus,
            params,
        })
    }

    /// Validate `params`, start the actor on the current runtime and return
    /// its handle. The actor stops once every handle is dropped.
    pub fn spawn(
        generator: Arc<dyn QuestionGenerator>,
        corpus: Arc<dyn FallbackCorpus>,
        params: SupplyParams,
    ) -> Result<SupplierHandle, DomainError> {
        let supplier = Self::new(generator, corpus, params)?;
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(supplier.run(rx));
        Ok(SupplierHandle { tx })
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<SupplyCommand>) {
        let mut tasks: JoinSet<GenerationResult> = JoinSet::new();
        let (late_tx, mut late_rx) = mpsc::unbounded_channel::<LateBatch>();

        loop {
            tokio::select! {
                biased;

                Some(joined) = tasks.join_next() => {
                    match joined {
                        Ok((topic, outcome)) => self.finish_generation(topic, outcome),
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => warn!("Generation task failed to join: {}", e),
                    }
                }

                Some((topic, questions)) = late_rx.recv() => self.cache_late(topic, questions),

                command = rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    if let Some((topic, count)) = self.handle(command) {
                        let generator = Arc::clone(&self.generator);
                        let params = self.params.clone();
                        let late = late_tx.clone();
                        tasks.spawn(async move {
                            let outcome = generate_with_retry(&generator, &topic, count, &params, &late).await;
                            (topic, outcome)
                        });
                    }
                }
            }
        }

        debug!("Question supplier stopped");
    }

    /// Apply one command. Returns `(topic, count)` when a remote call must
    /// be started.
    fn handle(&mut self, command: SupplyCommand) -> Option<(Topic, usize)> {
        match command {
            SupplyCommand::Request {
                topic,
                count,
                reply,
            } => self.handle_request(topic, count, reply),
            SupplyCommand::Prefetch { topic, count } => self.handle_prefetch(topic, count),
            SupplyCommand::Clear { topic } => {
                debug!("Clearing cache for '{}'", topic);
                self.cache.clear(&topic);
                None
            }
            SupplyCommand::ClearAll => {
                debug!("Clearing all cached questions");
                self.cache.clear_all();
                None
            }
            SupplyCommand::Status { reply } => {
                let mut in_flight: Vec<Topic> = self.in_flight.keys().cloned().collect();
                in_flight.sort();
                let _ = reply.send(SupplyStatus {
                    cached: self.cache.status(),
                    in_flight,
                });
                None
            }
        }
    }

    fn handle_request(&mut self, topic: Topic, count: usize, reply: Reply) -> Option<(Topic, usize)> {
        let topic = self.resolve_topic(topic);
        if count == 0 {
            let _ = reply.send(Ok(Vec::new()));
            return None;
        }

        if self.cache.has_at_least(&topic, count) {
            debug!("Cache hit: {} question(s) for '{}'", count, topic);
            let _ = reply.send(Ok(self.cache.get(&topic, count)));
            return None;
        }

        if let Some(waiters) = self.in_flight.get_mut(&topic) {
            debug!(
                "Generation for '{}' already in flight; coalescing request ({} waiting)",
                topic,
                waiters.len() + 1
            );
            waiters.push(Waiter { count, reply });
            return None;
        }

        let batch = self.params.generation_batch(count);
        info!("Requesting {} question(s) for '{}' from generator", batch, topic);
        self.in_flight
            .insert(topic.clone(), vec![Waiter { count, reply }]);
        Some((topic, batch))
    }

    fn handle_prefetch(&mut self, topic: Topic, count: usize) -> Option<(Topic, usize)> {
        let topic = self.resolve_topic(topic);
        if count == 0 || self.cache.has_at_least(&topic, count) || self.in_flight.contains_key(&topic)
        {
            return None;
        }

        let batch = self.params.generation_batch(count);
        info!("Prefetching {} question(s) for '{}'", batch, topic);
        self.in_flight.insert(topic.clone(), Vec::new());
        Some((topic, batch))
    }

    fn finish_generation(&mut self, topic: Topic, outcome: Result<Vec<Question>, GeneratorError>) {
        let waiters = self.in_flight.remove(&topic).unwrap_or_default();

        match outcome {
            Ok(questions) => {
                info!("Generated {} question(s) for '{}'", questions.len(), topic);
                let evicted = self.cache.put(&topic, questions);
                if evicted > 0 {
                    debug!("Evicted {} old question(s) for '{}'", evicted, topic);
                }
                for waiter in waiters {
                    if waiter.reply.is_closed() {
                        continue;
                    }
                    let served = self.serve_from_cache(&topic, waiter.count);
                    let _ = waiter.reply.send(served);
                }
            }
            Err(e) => {
                if !waiters.is_empty() {
                    warn!(
                        "Generation for '{}' failed ({}); serving fallback questions",
                        topic, e
                    );
                }
                for waiter in waiters {
                    let _ = waiter.reply.send(self.serve_fallback(&topic, waiter.count));
                }
            }
        }
    }

    fn cache_late(&mut self, topic: Topic, questions: Vec<Question>) {
        info!(
            "Caching {} question(s) for '{}' from an attempt that outlived its timeout",
            questions.len(),
            topic
        );
        let evicted = self.cache.put(&topic, questions);
        if evicted > 0 {
            debug!("Evicted {} old question(s) for '{}'", evicted, topic);
        }
    }

    /// Serve from the freshly filled cache, topping up any shortfall from
    /// the fallback corpus instead of issuing another remote call.
    fn serve_from_cache(&mut self, topic: &Topic, count: usize) -> Result<Vec<Question>, SupplyError> {
        let mut served = self.cache.get(topic, count);
        let missing = count - served.len();
        if missing == 0 {
            return Ok(served);
        }

        debug!(
            "Cache short by {} question(s) for '{}'; topping up from fallback",
            missing, topic
        );
        match self.serve_fallback(topic, missing) {
            Ok(extra) => {
                served.extend(extra);
                Ok(served)
            }
            Err(_) if !served.is_empty() => Ok(served),
            Err(e) => Err(e),
        }
    }

    /// Draw `count` questions cyclically from the corpus, substituting the
    /// default topic when `topic` has none.
    fn serve_fallback(&self, topic: &Topic, count: usize) -> Result<Vec<Question>, SupplyError> {
        let mut pool = self.corpus.lookup(topic);
        if pool.is_empty() {
            let default_topic = self.corpus.default_topic();
            info!(
                "No fallback questions for '{}'; using default topic '{}'",
                topic, default_topic
            );
            pool = self.corpus.lookup(&default_topic);
        }
        if pool.is_empty() {
            warn!("Question supply exhausted for '{}'", topic);
            return Err(SupplyError::Exhausted {
                topic: topic.clone(),
            });
        }

        Ok(pool.iter().cycle().take(count).cloned().collect())
    }

    fn resolve_topic(&self, topic: Topic) -> Topic {
        if topic.is_empty() {
            self.corpus.default_topic()
        } else {
            topic
        }
    }
}

/// Call the generator up to `max_attempts` times.
///
/// The wait for each attempt is bounded by `request_timeout`; a failed
/// attempt is followed by `retry_delay` before the next one. An attempt
/// that times out keeps running and sends its batch to `late` if it
/// succeeds. Drafts are validated individually and invalid ones dropped.
/// A batch with no valid question counts as a failed attempt.
async fn generate_with_retry(
    generator: &Arc<dyn QuestionGenerator>,
    topic: &Topic,
    count: usize,
    params: &SupplyParams,
    late: &mpsc::UnboundedSender<LateBatch>,
) -> Result<Vec<Question>, GeneratorError> {
    let mut last_error = GeneratorError::Timeout;

    for attempt in 1..=params.max_attempts {
        debug!(
            "Generation attempt {}/{} for '{}'",
            attempt, params.max_attempts, topic
        );

        let pending = spawn_attempt(Arc::clone(generator), topic.clone(), count, late.clone());
        let result = match tokio::time::timeout(params.request_timeout, pending).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(GeneratorError::Connection(
                "generation task ended without a result".to_string(),
            )),
            Err(_) => Err(GeneratorError::Timeout),
        };

        match result {
            Ok(questions) => return Ok(questions),
            Err(e) if !e.is_retryable() => {
                debug!("Generator unavailable for '{}': {}", topic, e);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "Generation attempt {}/{} for '{}' failed: {}",
                    attempt, params.max_attempts, topic, e
                );
                last_error = e;
                if attempt < params.max_attempts {
                    tokio::time::sleep(params.retry_delay).await;
                }
            }
        }
    }

    Err(last_error)
}

/// Start one remote call as its own task.
///
/// The call always runs to completion. If the receiver is gone by then, a
/// valid batch goes to `late` instead.
fn spawn_attempt(
    generator: Arc<dyn QuestionGenerator>,
    topic: Topic,
    count: usize,
    late: mpsc::UnboundedSender<LateBatch>,
) -> oneshot::Receiver<Result<Vec<Question>, GeneratorError>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let call = AssertUnwindSafe(generator.generate(&topic, count)).catch_unwind();
        let result = match call.await {
            Ok(drafts) => drafts.and_then(|drafts| validate_batch(&topic, drafts)),
            Err(_) => Err(GeneratorError::Connection("generator panicked".to_string())),
        };
        if let Err(Ok(questions)) = tx.send(result) {
            let _ = late.send((topic, questions));
        }
    });
    rx
}

fn validate_batch(
    topic: &Topic,
    drafts: Vec<QuestionDraft>,
) -> Result<Vec<Question>, GeneratorError> {
    let received = drafts.len();
    let valid: Vec<Question> = drafts
        .into_iter()
        .enumerate()
        .filter_map(|(i, draft)| match draft.validate(topic) {
            Ok(question) => Some(question),
            Err(e) => {
                warn!("Dropping malformed question #{} for '{}': {}", i, topic, e);
                None
            }
        })
        .collect();

    if valid.is_empty() {
        return Err(GeneratorError::Malformed(format!(
            "none of {} generated question(s) were valid",
            received
        )));
    }
    Ok(valid)
}
