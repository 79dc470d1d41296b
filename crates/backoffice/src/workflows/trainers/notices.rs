use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::domain::ComplianceDocument;

/// Trait describing the outbound mail hook (SMTP relay, provider API, test double).
pub trait NoticeMailer: Send + Sync {
    fn send(&self, notice: EmailNotice) -> Result<(), DeliveryError>;
}

/// Rendered notice handed to the mailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailNotice {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail dispatch error. Delivery failure is terminal for the requesting call.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
    #[error("recipient rejected: {0}")]
    Rejected(String),
}

/// Fixed copy for one document kind.
#[derive(Debug, Clone)]
pub struct NoticeTemplate {
    pub subject: String,
    pub heading: String,
    pub body: String,
    pub action_label: String,
    pub action_path: String,
}

/// Per-document template table with a generic fallback.
///
/// The standard catalog covers every document kind; the fallback exists for
/// trimmed-down custom catalogs, where an uncovered kind renders a generic
/// subject over an empty content block rather than failing the request.
#[derive(Debug, Clone)]
pub struct NoticeCatalog {
    portal_url: String,
    entries: BTreeMap<ComplianceDocument, NoticeTemplate>,
}

impl NoticeCatalog {
    pub fn standard(portal_url: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            ComplianceDocument::Safesport,
            NoticeTemplate {
                subject: "Action needed: SafeSport certification".to_string(),
                heading: "SafeSport certification required".to_string(),
                body: "Our records show your SafeSport certification is missing or has \
                       expired. Training sessions cannot be scheduled until a current \
                       certificate is on file."
                    .to_string(),
                action_label: "Upload your SafeSport certificate".to_string(),
                action_path: "/compliance/safesport".to_string(),
            },
        );
        entries.insert(
            ComplianceDocument::W9,
            NoticeTemplate {
                subject: "Action needed: W-9 tax form".to_string(),
                heading: "W-9 on file is required for payouts".to_string(),
                body: "We need a completed W-9 tax form before any further payouts can \
                       be released to you."
                    .to_string(),
                action_label: "Submit your W-9".to_string(),
                action_path: "/compliance/w9".to_string(),
            },
        );
        entries.insert(
            ComplianceDocument::BackgroundCheck,
            NoticeTemplate {
                subject: "Action needed: background check".to_string(),
                heading: "Background check authorization required".to_string(),
                body: "Please authorize your background check so we can finish \
                       verifying your trainer profile."
                    .to_string(),
                action_label: "Start your background check".to_string(),
                action_path: "/compliance/background".to_string(),
            },
        );

        Self {
            portal_url: portal_url.into(),
            entries,
        }
    }

    /// Catalog with an explicit entry set; kinds without an entry render the
    /// generic fallback.
    pub fn with_entries(
        portal_url: impl Into<String>,
        entries: BTreeMap<ComplianceDocument, NoticeTemplate>,
    ) -> Self {
        Self {
            portal_url: portal_url.into(),
            entries,
        }
    }

    pub fn render(&self, document: ComplianceDocument, first_name: &str) -> EmailNoticeDraft {
        match self.entries.get(&document) {
            Some(template) => EmailNoticeDraft {
                subject: template.subject.clone(),
                html_body: render_notice_html(
                    first_name,
                    Some(template),
                    &self.portal_url,
                ),
            },
            None => EmailNoticeDraft {
                subject: "A compliance document is required".to_string(),
                html_body: render_notice_html(first_name, None, &self.portal_url),
            },
        }
    }
}

/// Subject and body before the recipient address is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailNoticeDraft {
    pub subject: String,
    pub html_body: String,
}

impl EmailNoticeDraft {
    pub fn addressed_to(self, recipient: impl Into<String>) -> EmailNotice {
        EmailNotice {
            recipient: recipient.into(),
            subject: self.subject,
            html_body: self.html_body,
        }
    }
}

fn render_notice_html(first_name: &str, template: Option<&NoticeTemplate>, portal_url: &str) -> String {
    let mut html = String::new();
    let greeting = if first_name.trim().is_empty() {
        "Hello,".to_string()
    } else {
        format!("Hi {},", escape_html(first_name.trim()))
    };
    writeln!(html, "<p>{}</p>", greeting).expect("write greeting");

    match template {
        Some(template) => {
            writeln!(html, "<h2>{}</h2>", escape_html(&template.heading)).expect("write heading");
            writeln!(html, "<p>{}</p>", escape_html(&template.body)).expect("write body");
            writeln!(
                html,
                "<p><a href=\"{}{}\">{}</a></p>",
                escape_html(portal_url),
                escape_html(&template.action_path),
                escape_html(&template.action_label)
            )
            .expect("write action link");
        }
        None => {
            writeln!(
                html,
                "<p><a href=\"{}\">Visit your trainer portal</a></p>",
                escape_html(portal_url)
            )
            .expect("write fallback link");
        }
    }

    writeln!(html, "<p>Thank you,<br>The Marketplace Operations Team</p>").expect("write signoff");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
