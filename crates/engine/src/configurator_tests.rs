use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

struct RecordingHook(Arc<AtomicUsize>);

#[async_trait]
impl PrepareHook for RecordingHook {
    async fn prepare(&self, config_index: usize) -> Result<(), ConfigError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        if config_index == 99 {
            return Err(ConfigError::PrepareFailed {
                config_index,
                reason: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[tokio::test]
async fn synchronized_mode_invokes_the_hook() {
    let calls = Arc::new(AtomicUsize::new(0));
    let configurator = Configurator::new(ConfigMode::Synchronized, Arc::new(RecordingHook(calls.clone())));

    configurator.prepare(0).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn desynchronized_mode_never_calls_the_hook() {
    let calls = Arc::new(AtomicUsize::new(0));
    let configurator = Configurator::new(ConfigMode::Desynchronized, Arc::new(RecordingHook(calls.clone())));

    configurator.prepare(0).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn synchronized_mode_propagates_hook_errors() {
    let calls = Arc::new(AtomicUsize::new(0));
    let configurator = Configurator::new(ConfigMode::Synchronized, Arc::new(RecordingHook(calls)));

    let err = configurator.prepare(99).await.unwrap_err();
    assert!(matches!(err, ConfigError::PrepareFailed { config_index: 99, .. }));
}
