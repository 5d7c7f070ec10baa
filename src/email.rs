//! Mailing a generated form to the office, and optionally to the customer.
//!
//! This module builds the message; delivering it is up to a [Dispatcher]
//! implementation supplied by the caller.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::composer::Composer;
use crate::config::Settings;
use crate::record::InboundParts;
use crate::signature::SignatureAsset;
use crate::{DispatchError, DocumentError};

pub const ATTACHMENT_NAME: &str = "CP72_Form.pdf";
pub const ATTACHMENT_TYPE: &str = "application/pdf";

/// A file attached to an [EmailMessage], its content base64 encoded
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// An outgoing email. Serializes to the JSON shape transactional mail APIs expect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<Attachment>,
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl EmailMessage {
    /// The message carrying a generated form. It always goes to the office; the
    /// customer is copied in when `customer_copy` is given.
    pub fn for_form(
        settings: &Settings,
        pdf: &[u8],
        sender: &str,
        recipient: &str,
        customer_copy: Option<&str>,
    ) -> EmailMessage {
        let mut to = vec![settings.office_email.clone()];
        to.extend(customer_copy.map(str::to_string));

        let html = format!(
            "<p>Hello,</p>\n\
             <p>Your CP72 customs declaration form is attached.</p>\n\
             <p><strong>Sender:</strong> {}<br>\n\
             <strong>Recipient:</strong> {}</p>\n\
             <p>Best regards,<br>Mon Freight CP72 System</p>\n",
            escape_html(sender),
            escape_html(recipient)
        );

        EmailMessage {
            from: settings.from_email.clone(),
            to,
            subject: format!("📄 CP72 Form - {sender} → {recipient}"),
            html,
            attachments: vec![Attachment {
                filename: ATTACHMENT_NAME.to_string(),
                content: STANDARD.encode(pdf),
                content_type: ATTACHMENT_TYPE.to_string(),
            }],
        }
    }
}

/// Delivers an [EmailMessage], e.g. through an HTTP mail API
pub trait Dispatcher {
    fn send(&self, message: &EmailMessage) -> Result<(), DispatchError>;
}

/// The outcome of a submitted form
#[derive(Debug)]
pub struct Submission {
    pub pdf: Vec<u8>,
    pub recipients: Vec<String>,
    /// Whether the dispatcher accepted the email. The form is still received
    /// when this is false.
    pub email_sent: bool,
}

impl Submission {
    /// A one-line status for the person who submitted the form
    pub fn notice(&self) -> &'static str {
        if self.email_sent {
            "CP72 form submitted successfully. PDF has been emailed."
        } else {
            "Error sending email. Submission received."
        }
    }
}

/// Generate the form for a submission and email it.
///
/// Failing to generate the PDF is an error. Failing to send it is not: the failure
/// is logged and reported through [Submission::email_sent].
pub fn submit<D: Dispatcher>(
    composer: &Composer,
    settings: &Settings,
    dispatcher: &D,
    parts: InboundParts,
) -> Result<Submission, DocumentError> {
    let signature = parts
        .signature_data
        .as_deref()
        .and_then(SignatureAsset::from_data_url);
    let pdf = composer.generate(&parts.record, signature)?;

    let message = EmailMessage::for_form(
        settings,
        &pdf,
        &parts.record.sender,
        &parts.record.recipient,
        parts.customer_copy.as_deref(),
    );

    let email_sent = match dispatcher.send(&message) {
        Ok(()) => {
            log::info!("emailed CP72 form to {}", message.to.join(", "));
            true
        }
        Err(e) => {
            log::error!("failed to email CP72 form: {e}");
            false
        }
    };

    Ok(Submission {
        pdf,
        recipients: message.to,
        email_sent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::record::FormRecord;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Outbox {
        sent: RefCell<Vec<EmailMessage>>,
    }

    impl Dispatcher for Outbox {
        fn send(&self, message: &EmailMessage) -> Result<(), DispatchError> {
            self.sent.borrow_mut().push(message.clone());
            Ok(())
        }
    }

    struct Unconfigured;

    impl Dispatcher for Unconfigured {
        fn send(&self, _message: &EmailMessage) -> Result<(), DispatchError> {
            Err(DispatchError::NotConfigured)
        }
    }

    fn parts(customer_copy: Option<&str>) -> InboundParts {
        InboundParts {
            record: FormRecord {
                sender: "Bat <Erdene>".to_string(),
                recipient: "Oyunaa & Co".to_string(),
                ..FormRecord::default()
            },
            customer_copy: customer_copy.map(str::to_string),
            signature_data: Some("data:image/png;base64,garbage".to_string()),
        }
    }

    #[test]
    fn message_for_office_only() {
        let message = EmailMessage::for_form(&Settings::default(), b"%PDF-", "A", "B", None);
        assert_eq!(message.from, "Mon Freight <no-reply@monfreight.com.au>");
        assert_eq!(message.to, vec!["info@monfreight.com.au"]);
        assert_eq!(message.subject, "📄 CP72 Form - A → B");
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.attachments[0].filename, "CP72_Form.pdf");
        assert_eq!(message.attachments[0].content_type, "application/pdf");
        assert_eq!(message.attachments[0].content, "JVBERi0=");
    }

    #[test]
    fn names_are_escaped_in_the_body() {
        let message = EmailMessage::for_form(
            &Settings::default(),
            b"",
            "Bat <Erdene>",
            "Oyunaa & Co",
            Some("c@example.com"),
        );
        assert_eq!(message.to, vec!["info@monfreight.com.au", "c@example.com"]);
        assert!(message.html.contains("<strong>Sender:</strong> Bat &lt;Erdene&gt;<br>"));
        assert!(message.html.contains("<strong>Recipient:</strong> Oyunaa &amp; Co</p>"));
        // the subject is plain text, not HTML
        assert_eq!(message.subject, "📄 CP72 Form - Bat <Erdene> → Oyunaa & Co");
    }

    #[test]
    fn serializes_with_api_field_names() {
        let message = EmailMessage::for_form(&Settings::default(), b"", "A", "B", None);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["attachments"][0]["type"], "application/pdf");
        assert_eq!(json["to"][0], "info@monfreight.com.au");
    }

    #[test]
    fn submit_sends_the_generated_pdf() {
        let outbox = Outbox::default();
        let composer = Composer::new(Assets::builtin());
        let submission = submit(
            &composer,
            &Settings::default(),
            &outbox,
            parts(Some("c@example.com")),
        )
        .unwrap();

        assert!(submission.email_sent);
        assert!(submission.pdf.starts_with(b"%PDF-"));
        assert_eq!(
            submission.recipients,
            vec!["info@monfreight.com.au", "c@example.com"]
        );
        let sent = outbox.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].attachments[0].content, STANDARD.encode(&submission.pdf));
    }

    #[test]
    fn dispatch_failure_still_returns_the_submission() {
        let composer = Composer::new(Assets::builtin());
        let submission = submit(&composer, &Settings::default(), &Unconfigured, parts(None)).unwrap();
        assert!(!submission.email_sent);
        assert!(submission.pdf.starts_with(b"%PDF-"));
        assert_eq!(submission.notice(), "Error sending email. Submission received.");
    }
}
