use crate::models::message::NotificationPayload;

pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text_body: String,
}

impl EmailMessage {
    pub fn verification(
        from: &str,
        verification_base_url: &str,
        payload: &NotificationPayload,
    ) -> Self {
        let url = verification_url(verification_base_url, &payload.email, &payload.token);

        Self {
            from: from.to_string(),
            to: vec![payload.email.clone()],
            subject: VERIFICATION_SUBJECT.to_string(),
            text_body: verification_body(&url),
        }
    }
}

pub fn verification_url(base_url: &str, email: &str, token: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };

    format!(
        "{}{}email={}&token={}",
        base_url,
        separator,
        urlencoding::encode(email),
        urlencoding::encode(token)
    )
}

pub fn verification_body(verification_url: &str) -> String {
    [
        "Hello,",
        "",
        "Please confirm your email address by clicking the link below:",
        verification_url,
        "",
        "If you did not create this account, you can ignore this email.",
        "",
        "Thank you.",
    ]
    .join("\n")
}
