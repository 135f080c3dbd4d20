//! SMS notification delivery via the Twilio REST API.
//!
//! Delivery runs on a background worker thread. `send_alert` only queues
//! the message, so the monitor loop never waits on the network.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use vigil_core::Notifier;

// HTTP timeout for one delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Twilio account and phone number settings.
///
/// Credentials are read from the environment only, never from config
/// files.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Account SID.
    pub account_sid: String,
    /// Auth token.
    pub auth_token: String,
    /// Sending phone number (E.164).
    pub from: String,
    /// Receiving phone number (E.164).
    pub to: String,
}

impl TwilioConfig {
    /// Builds a config with credentials from the `TWILIO_ACCOUNT_SID` and
    /// `TWILIO_AUTH_TOKEN` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is unset.
    pub fn from_env(from: impl Into<String>, to: impl Into<String>) -> Result<Self> {
        let account_sid =
            std::env::var("TWILIO_ACCOUNT_SID").context("TWILIO_ACCOUNT_SID is not set")?;
        let auth_token =
            std::env::var("TWILIO_AUTH_TOKEN").context("TWILIO_AUTH_TOKEN is not set")?;
        Ok(Self {
            account_sid,
            auth_token,
            from: from.into(),
            to: to.into(),
        })
    }
}

/// Notifier delivering SMS through Twilio.
///
/// Messages queue onto a channel consumed by a worker thread. Dropping the
/// notifier closes the queue, drains pending sends, and joins the worker.
pub struct TwilioNotifier {
    queue: mpsc::Sender<String>,
    worker: Option<JoinHandle<()>>,
}

impl TwilioNotifier {
    /// Spawns the delivery worker.
    #[must_use]
    pub fn spawn(config: TwilioConfig) -> Self {
        let (queue, inbox) = mpsc::channel::<String>();
        let worker = thread::spawn(move || deliver_loop(&config, &inbox));
        Self {
            queue,
            worker: Some(worker),
        }
    }
}

impl Notifier for TwilioNotifier {
    fn send_alert(&self, message: &str) -> Result<()> {
        self.queue
            .send(message.to_owned())
            .context("sms worker is gone")
    }
}

impl Drop for TwilioNotifier {
    fn drop(&mut self) {
        // Replacing the sender closes the queue, which ends the worker's
        // receive loop once it has drained pending messages.
        let (closed, _) = mpsc::channel();
        self.queue = closed;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn deliver_loop(config: &TwilioConfig, inbox: &mpsc::Receiver<String>) {
    let client = match reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("sms disabled: failed to build http client: {e}");
            return;
        }
    };

    for message in inbox {
        match deliver(&client, config, &message) {
            Ok(()) => info!("sms delivered to {}", config.to),
            Err(e) => warn!("sms delivery failed: {e:#}"),
        }
    }
    debug!("sms worker finished");
}

fn deliver(client: &reqwest::blocking::Client, config: &TwilioConfig, message: &str) -> Result<()> {
    let url = format!(
        "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
        config.account_sid
    );

    let response = client
        .post(&url)
        .basic_auth(&config.account_sid, Some(&config.auth_token))
        .form(&[
            ("To", config.to.as_str()),
            ("From", config.from.as_str()),
            ("Body", message),
        ])
        .send()
        .context("failed to reach Twilio")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        anyhow::bail!("Twilio returned {status}: {body}");
    }
    Ok(())
}

/// Notifier that drops every message, used when SMS is not configured.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send_alert(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_credentials() {
        // Only this test touches these variables.
        std::env::remove_var("TWILIO_ACCOUNT_SID");
        std::env::remove_var("TWILIO_AUTH_TOKEN");

        let err = TwilioConfig::from_env("+15550001", "+15550002").unwrap_err();
        assert!(err.to_string().contains("TWILIO_ACCOUNT_SID"));
    }

    #[test]
    fn test_worker_shuts_down_cleanly_without_traffic() {
        let notifier = TwilioNotifier::spawn(TwilioConfig {
            account_sid: "ACtest".into(),
            auth_token: "token".into(),
            from: "+15550001".into(),
            to: "+15550002".into(),
        });
        drop(notifier);
    }

    #[test]
    fn test_null_notifier_accepts_everything() {
        let notifier = NullNotifier;
        notifier.send_alert("anything").unwrap();
    }
}
