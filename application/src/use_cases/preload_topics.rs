//! Warm the question cache for configured topics at startup.

use super::supply_questions::{SupplierHandle, SupplyError};
use tracing::info;
use trivia_domain::Topic;

pub struct PreloadTopicsUseCase {
    supplier: SupplierHandle,
}

impl PreloadTopicsUseCase {
    pub fn new(supplier: SupplierHandle) -> Self {
        Self { supplier }
    }

    /// Prefetch `count` questions for every non-empty topic, without
    /// waiting for the results. Returns how many topics were queued.
    pub fn execute(&self, topics: &[Topic], count: usize) -> Result<usize, SupplyError> {
        if count == 0 {
            return Ok(0);
        }
        let mut queued = 0;
        for topic in topics.iter().filter(|t| !t.is_empty()) {
            self.supplier.prefetch(topic, count)?;
            queued += 1;
        }
        if queued > 0 {
            info!("Preloading {} question(s) for {} topic(s)", count, queued);
        }
        Ok(queued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupplyParams;
    use crate::test_support::{MapCorpus, ScriptedGenerator, drafts};
    use crate::use_cases::supply_questions::QuestionSupplier;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_preload_fills_cache_for_each_topic() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(drafts("science", 5)),
            Ok(drafts("math", 5)),
        ]));
        let supplier = QuestionSupplier::spawn(
            generator.clone(),
            Arc::new(MapCorpus::default()),
            SupplyParams::default(),
        )
        .unwrap();
        let preload = PreloadTopicsUseCase::new(supplier.clone());

        let topics = vec![Topic::new("science"), Topic::new(""), Topic::new("math")];
        assert_eq!(preload.execute(&topics, 5).unwrap(), 2);

        tokio::time::sleep(Duration::from_millis(10)).await;
        let status = supplier.status().await.unwrap();
        assert_eq!(status.cached.len(), 2);
        assert!(status.cached.iter().all(|(_, n)| *n == 5));
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_count_is_noop() {
        let generator = Arc::new(ScriptedGenerator::failing());
        let supplier = QuestionSupplier::spawn(
            generator.clone(),
            Arc::new(MapCorpus::default()),
            SupplyParams::default(),
        )
        .unwrap();

        let queued = PreloadTopicsUseCase::new(supplier)
            .execute(&[Topic::new("science")], 0)
            .unwrap();
        assert_eq!(queued, 0);
        assert_eq!(generator.calls(), 0);
    }
}
