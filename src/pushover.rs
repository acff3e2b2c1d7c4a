//! Pushover delivery of alert messages

use crate::config::PushoverConfig;
use crate::error::{Result, StromError};
use crate::logging::{StructuredLogger, get_logger};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Sink for alert messages. Implementations never fail the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str, image: Option<&[u8]>);
}

/// Notifier posting to the Pushover messages API
pub struct PushoverNotifier {
    cfg: PushoverConfig,
    http: reqwest::Client,
    logger: StructuredLogger,
}

impl PushoverNotifier {
    pub fn new(cfg: &PushoverConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()?;
        Ok(Self {
            cfg: cfg.clone(),
            http,
            logger: get_logger("pushover"),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.cfg.is_configured()
    }

    fn form(&self, message: &str, image: Option<&[u8]>) -> Result<Form> {
        let mut form = Form::new()
            .text("token", self.cfg.token.trim().to_string())
            .text("user", self.cfg.user.trim().to_string())
            .text("message", message.to_string())
            .text("title", self.cfg.title.clone())
            .text("sound", self.cfg.sound.clone());
        if let Some(bytes) = image {
            let part = Part::bytes(bytes.to_vec())
                .file_name("prices.png")
                .mime_str("image/png")
                .map_err(|e| StromError::notification(e.to_string()))?;
            form = form.part("attachment", part);
        }
        Ok(form)
    }

    /// Post one message; any failure comes back as a `Notification` error
    pub async fn send(&self, message: &str, image: Option<&[u8]>) -> Result<()> {
        let form = self.form(message, image)?;
        let resp = self
            .http
            .post(&self.cfg.api_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StromError::notification(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StromError::notification(format!(
                "Pushover returned {}: {}",
                status,
                body.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, message: &str, image: Option<&[u8]>) {
        if !self.is_enabled() {
            self.logger
                .warn("Pushover credentials missing, notification skipped");
            return;
        }
        match self.send(message, image).await {
            Ok(()) => self.logger.info(&format!(
                "Notification sent{}",
                if image.is_some() { " with chart" } else { "" }
            )),
            Err(e) => self.logger.error(&format!("Notification failed: {}", e)),
        }
    }
}
