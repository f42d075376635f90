//! Fallback corpus port
//!
//! Static, offline question set used when the remote generator is
//! unavailable.

use trivia_domain::{Question, Topic};

/// Read-only lookup into pre-populated questions.
pub trait FallbackCorpus: Send + Sync {
    /// Questions stored for `topic`, in corpus order. Empty if unknown.
    fn lookup(&self, topic: &Topic) -> Vec<Question>;

    /// The generic topic substituted for unknown ones.
    fn default_topic(&self) -> Topic;

    /// Every topic with at least one question, sorted.
    fn topics(&self) -> Vec<Topic>;
}
