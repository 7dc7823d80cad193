pub mod mail;

pub use mail::{LocalMailService, MailService, RecordingMailService, SentMail};
