//! HTTP mail-relay notifier.
//!
//! Posts subject+body as JSON to a configured relay endpoint. The relay
//! token comes from the environment; when it or the endpoint is unset the
//! notifier is simply not constructed and the run proceeds without one.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::NotifyConfig;
use crate::notify::Notifier;

/// Notifier backed by an HTTP mail relay.
pub struct MailRelayNotifier {
    client: Client,
    endpoint: String,
    token: String,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct MailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl MailRelayNotifier {
    /// Build from config; `None` when disabled or the endpoint/credentials
    /// are unset.
    pub fn from_config(config: &NotifyConfig, client: Client) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let endpoint = config.endpoint.clone()?;
        let token = std::env::var(&config.token_env).ok()?;
        Some(Self {
            client,
            endpoint,
            token,
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }
}

#[async_trait]
impl Notifier for MailRelayNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let message = MailMessage {
            from: &self.from,
            to: &self.to,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::notify(format!(
                "mail relay returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_endpoint_disables_the_notifier() {
        let config = NotifyConfig::default();
        assert!(MailRelayNotifier::from_config(&config, Client::new()).is_none());
    }

    #[test]
    fn disabled_config_disables_the_notifier() {
        let config = NotifyConfig {
            enabled: false,
            endpoint: Some("https://relay.example.com/send".to_string()),
            ..NotifyConfig::default()
        };
        assert!(MailRelayNotifier::from_config(&config, Client::new()).is_none());
    }

    #[test]
    fn missing_token_disables_the_notifier() {
        let config = NotifyConfig {
            endpoint: Some("https://relay.example.com/send".to_string()),
            token_env: "FAREWATCH_TEST_UNSET_TOKEN".to_string(),
            ..NotifyConfig::default()
        };
        assert!(MailRelayNotifier::from_config(&config, Client::new()).is_none());
    }
}
