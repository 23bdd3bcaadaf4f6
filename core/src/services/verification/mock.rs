//! Mock SMS delivery for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::traits::SmsServiceTrait;

/// Records every delivered code instead of sending it
#[derive(Default)]
pub struct MockSmsService {
    sent: Mutex<Vec<(String, String)>>,
    should_fail: AtomicBool,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose deliveries always fail
    pub fn failing() -> Self {
        let service = Self::default();
        service.set_should_fail(true);
        service
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Delivered `(phone, code)` pairs in order
    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// The most recent code delivered to `phone`
    pub async fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMS gateway unavailable".to_string());
        }

        let mut sent = self.sent.lock().await;
        sent.push((phone.to_string(), code.to_string()));
        Ok(format!("mock-message-{}", sent.len()))
    }
}
