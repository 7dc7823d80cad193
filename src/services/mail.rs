use std::sync::Mutex;

use crate::config::Config;

/// Outgoing notifications.
pub trait MailService: Send + Sync {
    fn send(&self, subject: &str, message: &str);
}

/// Writes mails to the log instead of delivering them.
pub struct LocalMailService {
    mail_to: String,
    mail_from: String,
}

impl LocalMailService {
    pub fn new(config: &Config) -> Self {
        Self {
            mail_to: config.mail_to.clone(),
            mail_from: config.mail_from.clone(),
        }
    }
}

impl MailService for LocalMailService {
    fn send(&self, subject: &str, message: &str) {
        tracing::info!(
            from = %self.mail_from,
            to = %self.mail_to,
            subject = %subject,
            "Mail sent with {}: {}",
            std::any::type_name::<Self>(),
            message
        );
    }
}

/// Keeps every mail in memory so callers can inspect what was sent.
#[derive(Default)]
pub struct RecordingMailService {
    sent: Mutex<Vec<SentMail>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub subject: String,
    pub message: String,
}

impl RecordingMailService {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl MailService for RecordingMailService {
    fn send(&self, subject: &str, message: &str) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentMail {
                subject: subject.to_string(),
                message: message.to_string(),
            });
        }
    }
}
