//! SMS Service Interface
//!
//! Defines the trait for SMS providers that deliver verification codes.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Text preceding the code in every verification message
pub const VERIFICATION_MESSAGE_PREFIX: &str = "Your Sky Park verification code is: ";

/// SMS service trait for sending text messages
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number in international format
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS using the standard message text
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        let message = format!("{}{}", VERIFICATION_MESSAGE_PREFIX, code);
        self.send_sms(phone_number, &message).await
    }

    /// Provider name, used in logs
    fn provider_name(&self) -> &str;

    /// Health check; providers without one report themselves available
    async fn is_available(&self) -> bool {
        true
    }
}
