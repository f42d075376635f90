//! Session runtime - single-consumer event loop around the controller.
//!
//! Every host input and every supplier completion becomes a
//! [`SessionInput`] on one queue, processed strictly in arrival order. Supply
//! requests run in spawned tasks whose results re-enter the queue as
//! [`SessionInput::Supplied`], so the controller is only ever touched from
//! this loop.

use super::session_controller::{SessionAction, SessionController};
use super::supply_questions::{SupplierHandle, SupplyError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use trivia_domain::{FinalStats, Question, Topic};

/// Inputs accepted by the runtime.
#[derive(Debug)]
pub enum SessionInput {
    Tick(Duration),
    /// Player choice; negative means "no answer".
    Submit(i32),
    Pause,
    Resume,
    TogglePause,
    Hint,
    RetrySupply,
    /// Supplier result for the session that asked for it.
    Supplied {
        session_id: u64,
        result: Result<Vec<Question>, SupplyError>,
    },
    Quit,
}

pub struct SessionRuntime {
    controller: SessionController,
    supplier: SupplierHandle,
    tx: mpsc::UnboundedSender<SessionInput>,
    rx: mpsc::UnboundedReceiver<SessionInput>,
    cancellation: CancellationToken,
}

impl SessionRuntime {
    pub fn new(controller: SessionController, supplier: SupplierHandle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            supplier,
            tx,
            rx,
            cancellation: CancellationToken::new(),
        }
    }

    /// Use `token` to stop the session from outside. The runtime cancels it
    /// in turn when the session ends, so host tasks sharing it shut down.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Queue handle for host input (tick loop, keyboard reader).
    pub fn sender(&self) -> mpsc::UnboundedSender<SessionInput> {
        self.tx.clone()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Play one session on `topic` until game over or quit.
    ///
    /// Returns `None` only if the session never started.
    pub async fn run(mut self, topic: Topic) -> Option<FinalStats> {
        let action = self.controller.start_session(topic);
        let mut outcome = self.perform(action);

        while outcome.is_none() {
            let input = tokio::select! {
                _ = self.cancellation.cancelled() => {
                    debug!("Session cancelled by host");
                    let action = self.controller.quit();
                    outcome = self.perform(action);
                    break;
                }
                input = self.rx.recv() => input.unwrap_or(SessionInput::Quit),
            };
            let action = self.dispatch(input);
            outcome = self.perform(action);
        }

        self.cancellation.cancel();
        outcome
    }

    fn dispatch(&mut self, input: SessionInput) -> SessionAction {
        match input {
            SessionInput::Tick(dt) => self.controller.tick(dt),
            SessionInput::Submit(choice) => self.controller.submit_answer(choice),
            SessionInput::Pause => {
                self.controller.pause();
                SessionAction::None
            }
            SessionInput::Resume => {
                self.controller.resume();
                SessionAction::None
            }
            SessionInput::TogglePause => {
                self.controller.toggle_pause();
                SessionAction::None
            }
            SessionInput::Hint => {
                if self.controller.request_hint().is_none() {
                    debug!("No hint available right now");
                }
                SessionAction::None
            }
            SessionInput::RetrySupply => self.controller.retry_supply(),
            SessionInput::Supplied { session_id, result } => {
                self.controller.on_supplied(session_id, result)
            }
            SessionInput::Quit => self.controller.quit(),
        }
    }

    fn perform(&mut self, action: SessionAction) -> Option<FinalStats> {
        match action {
            SessionAction::None => None,
            SessionAction::RequestSupply {
                topic,
                count,
                session_id,
            } => {
                let supplier = self.supplier.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = supplier.request(&topic, count).await;
                    let _ = tx.send(SessionInput::Supplied { session_id, result });
                });
                None
            }
            SessionAction::GameOver(stats) => Some(stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SessionParams, SupplyParams};
    use crate::ports::question_generator::GeneratorError;
    use crate::test_support::{MapCorpus, RecordingObserver, ScriptedGenerator, drafts};
    use crate::use_cases::supply_questions::QuestionSupplier;
    use std::sync::Arc;

    fn supplier(generator: ScriptedGenerator, corpus: MapCorpus) -> SupplierHandle {
        QuestionSupplier::spawn(Arc::new(generator), Arc::new(corpus), SupplyParams::default()).unwrap()
    }

    fn runtime(supplier: SupplierHandle) -> (SessionRuntime, Arc<RecordingObserver>) {
        let mut controller = SessionController::new(SessionParams::default()).unwrap();
        let observer = Arc::new(RecordingObserver::default());
        controller.subscribe(observer.clone());
        (SessionRuntime::new(controller, supplier), observer)
    }

    fn spawn_ticker(tx: mpsc::UnboundedSender<SessionInput>, token: CancellationToken) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(500));
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(SessionInput::Tick(Duration::from_millis(500))).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_session_ends_after_three_timeouts() {
        let supplier = supplier(ScriptedGenerator::failing(), MapCorpus::default().with_topic("science", 2));
        let (runtime, observer) = runtime(supplier);
        spawn_ticker(runtime.sender(), runtime.cancellation_token());
        let token = runtime.cancellation_token();

        let stats = runtime.run(Topic::new("science")).await.unwrap();

        assert_eq!(stats.wrong_answers, 3);
        assert_eq!(stats.questions_seen, 3);
        assert_eq!(stats.total_score, 0);
        assert!(token.is_cancelled());
        let milestones = observer.milestones();
        assert_eq!(milestones.iter().filter(|e| e.starts_with("reveal:timeout")).count(), 3);
        assert_eq!(milestones.iter().filter(|e| e.starts_with("awaiting:")).count(), 1);
        assert_eq!(milestones.last().map(String::as_str), Some("game_over:0"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_answers_flow_through_queue() {
        let generator = ScriptedGenerator::new(vec![Ok(drafts("science", 3))]);
        let (runtime, observer) = runtime(supplier(generator, MapCorpus::default()));
        let tx = runtime.sender();

        let session = tokio::spawn(runtime.run(Topic::new("science")));
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(SessionInput::Submit(0)).unwrap();
        tx.send(SessionInput::Quit).unwrap();

        let stats = session.await.unwrap().unwrap();
        assert_eq!(stats.correct_answers, 1);
        assert_eq!(stats.total_score, 1100);
        assert!(observer.events().contains(&"question:science question 0".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_quits_session() {
        let generator = ScriptedGenerator::new(vec![Ok(drafts("science", 3))]);
        let (runtime, _) = runtime(supplier(generator, MapCorpus::default()));
        let token = runtime.cancellation_token();

        let session = tokio::spawn(runtime.run(Topic::new("science")));
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        let stats = session.await.unwrap().unwrap();
        assert_eq!(stats.questions_seen, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_supply_can_be_retried() {
        let generator = ScriptedGenerator::new(vec![
            Err(GeneratorError::Disabled),
            Ok(drafts("science", 3)),
        ]);
        let (runtime, observer) = runtime(supplier(generator, MapCorpus::default()));
        let tx = runtime.sender();

        let session = tokio::spawn(runtime.run(Topic::new("science")));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(observer.milestones().contains(&"unavailable:science".to_string()));

        tx.send(SessionInput::RetrySupply).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(observer.events().contains(&"question:science question 0".to_string()));

        tx.send(SessionInput::Quit).unwrap();
        assert!(session.await.unwrap().is_some());
    }
}
