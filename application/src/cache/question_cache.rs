//! Per-topic bounded store of unused questions with expiry.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use trivia_domain::{DomainError, Question, Topic};

#[derive(Debug)]
struct CacheEntry {
    questions: VecDeque<Question>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) > ttl
    }
}

/// Topic → FIFO queue of questions not yet dispensed.
///
/// - A topic's queue never grows past `max_size`; the oldest entries go first.
/// - A topic whose last insertion is older than `ttl` counts as empty and is
///   discarded on the next access.
/// - Dispensed questions are gone for good.
///
/// Time is read from `tokio::time::Instant`, so tests can pause the clock.
#[derive(Debug)]
pub struct QuestionCache {
    entries: HashMap<Topic, CacheEntry>,
    max_size: usize,
    ttl: Duration,
}

impl QuestionCache {
    pub fn new(max_size: usize, ttl: Duration) -> Result<Self, DomainError> {
        if max_size == 0 {
            return Err(DomainError::configuration(
                "cache size must be at least 1",
            ));
        }
        if ttl.is_zero() {
            return Err(DomainError::configuration(
                "cache TTL must be greater than zero",
            ));
        }
        Ok(Self {
            entries: HashMap::new(),
            max_size,
            ttl,
        })
    }

    /// Pop up to `count` questions for `topic`, oldest first.
    pub fn get(&mut self, topic: &Topic, count: usize) -> Vec<Question> {
        self.evict_if_expired(topic);
        let Some(entry) = self.entries.get_mut(topic) else {
            return Vec::new();
        };

        let take = count.min(entry.questions.len());
        let taken: Vec<Question> = entry.questions.drain(..take).collect();
        if entry.questions.is_empty() {
            self.entries.remove(topic);
        }
        taken
    }

    /// Append `questions` to the topic's queue and refresh its timestamp.
    ///
    /// Returns how many old entries were evicted to stay within bounds.
    pub fn put(&mut self, topic: &Topic, questions: Vec<Question>) -> usize {
        if questions.is_empty() {
            return 0;
        }
        self.evict_if_expired(topic);

        let now = Instant::now();
        let entry = self
            .entries
            .entry(topic.clone())
            .or_insert_with(|| CacheEntry {
                questions: VecDeque::new(),
                inserted_at: now,
            });
        entry.questions.extend(questions);
        entry.inserted_at = now;

        let overflow = entry.questions.len().saturating_sub(self.max_size);
        entry.questions.drain(..overflow);
        overflow
    }

    /// Whether `count` unexpired questions are available. Never mutates.
    pub fn has_at_least(&self, topic: &Topic, count: usize) -> bool {
        self.len(topic) >= count
    }

    /// Unexpired questions held for `topic`.
    pub fn len(&self, topic: &Topic) -> usize {
        let now = Instant::now();
        self.entries
            .get(topic)
            .filter(|e| !e.is_expired(now, self.ttl))
            .map_or(0, |e| e.questions.len())
    }

    pub fn clear(&mut self, topic: &Topic) {
        self.entries.remove(topic);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// `(topic, unexpired count)` for every non-empty topic, sorted by topic.
    pub fn status(&self) -> Vec<(Topic, usize)> {
        let mut status: Vec<(Topic, usize)> = self
            .entries
            .keys()
            .map(|topic| (topic.clone(), self.len(topic)))
            .filter(|(_, n)| *n > 0)
            .collect();
        status.sort_by(|a, b| a.0.cmp(&b.0));
        status
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn evict_if_expired(&mut self, topic: &Topic) {
        let now = Instant::now();
        let expired = self
            .entries
            .get(topic)
            .is_some_and(|e| e.is_expired(now, self.ttl));
        if expired {
            tracing::debug!("Cache entry for '{}' expired; discarding", topic);
            self.entries.remove(topic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> Topic {
        Topic::new("science")
    }

    fn batch(topic: &Topic, range: std::ops::Range<usize>) -> Vec<Question> {
        range
            .map(|i| {
                Question::new(
                    format!("question {}", i),
                    ["a", "b", "c", "d"].map(String::from),
                    i % 4,
                    None,
                    topic.clone(),
                )
                .unwrap()
            })
            .collect()
    }

    fn prompts(questions: &[Question]) -> Vec<String> {
        questions.iter().map(|q| q.prompt().to_string()).collect()
    }

    fn cache(max_size: usize) -> QuestionCache {
        QuestionCache::new(max_size, Duration::from_secs(300)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_bounds() {
        assert!(QuestionCache::new(0, Duration::from_secs(1)).is_err());
        assert!(QuestionCache::new(1, Duration::ZERO).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_then_get_returns_same_items_once() {
        let t = topic();
        let mut cache = cache(10);
        let items = batch(&t, 0..4);
        cache.put(&t, items.clone());

        assert!(cache.has_at_least(&t, 4));
        let got = cache.get(&t, 4);
        assert_eq!(got, items);
        assert!(!cache.has_at_least(&t, 1));
        assert!(cache.get(&t, 1).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_is_fifo_and_partial() {
        let t = topic();
        let mut cache = cache(10);
        cache.put(&t, batch(&t, 0..3));

        assert_eq!(prompts(&cache.get(&t, 2)), vec!["question 0", "question 1"]);
        assert_eq!(prompts(&cache.get(&t, 5)), vec!["question 2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overflow_evicts_oldest() {
        let t = topic();
        let mut cache = cache(10);
        let evicted = cache.put(&t, batch(&t, 0..15));

        assert_eq!(evicted, 5);
        assert_eq!(cache.len(&t), 10);
        let got = cache.get(&t, 10);
        assert_eq!(got.first().map(|q| q.prompt()), Some("question 5"));
        assert_eq!(got.last().map(|q| q.prompt()), Some("question 14"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_reads_as_empty() {
        let t = topic();
        let mut cache = QuestionCache::new(10, Duration::from_secs(300)).unwrap();
        cache.put(&t, batch(&t, 0..3));

        tokio::time::advance(Duration::from_secs(300)).await;
        assert!(cache.has_at_least(&t, 3));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!cache.has_at_least(&t, 1));
        assert_eq!(cache.len(&t), 0);
        assert!(cache.get(&t, 3).is_empty());
        assert!(cache.status().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_refreshes_timestamp() {
        let t = topic();
        let mut cache = cache(10);
        cache.put(&t, batch(&t, 0..1));
        tokio::time::advance(Duration::from_secs(200)).await;
        cache.put(&t, batch(&t, 1..2));
        tokio::time::advance(Duration::from_secs(200)).await;

        assert_eq!(cache.len(&t), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_onto_expired_entry_starts_over() {
        let t = topic();
        let mut cache = cache(10);
        cache.put(&t, batch(&t, 0..3));
        tokio::time::advance(Duration::from_secs(301)).await;
        cache.put(&t, batch(&t, 3..4));

        assert_eq!(prompts(&cache.get(&t, 5)), vec!["question 3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_topics_are_independent() {
        let science = topic();
        let math = Topic::new("math");
        let mut cache = cache(10);
        cache.put(&science, batch(&science, 0..2));
        cache.put(&math, batch(&math, 0..1));

        cache.clear(&science);
        assert_eq!(cache.len(&science), 0);
        assert_eq!(cache.len(&math), 1);
        assert_eq!(cache.status(), vec![(math.clone(), 1)]);

        cache.clear_all();
        assert!(cache.status().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_put_is_ignored() {
        let t = topic();
        let mut cache = cache(10);
        assert_eq!(cache.put(&t, Vec::new()), 0);
        assert!(cache.status().is_empty());
    }
}
