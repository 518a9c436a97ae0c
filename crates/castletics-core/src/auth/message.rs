//! The signed sign-in message.
//!
//! The message is plain text with one `Key: value` field per line. Only
//! `FID` and `Nonce` are required; unknown lines are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInMessage {
    pub fid: u64,
    pub nonce: String,
    pub domain: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
}

impl SignInMessage {
    pub fn new(fid: u64, nonce: impl Into<String>) -> Self {
        Self {
            fid,
            nonce: nonce.into(),
            domain: None,
            issued_at: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn issued_at(mut self, at: DateTime<Utc>) -> Self {
        self.issued_at = Some(at);
        self
    }

    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let malformed = |msg: String| AuthError::MalformedMessage(msg);

        let mut fid = None;
        let mut nonce = None;
        let mut domain = None;
        let mut issued_at = None;

        for line in raw.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "fid" => {
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| malformed(format!("invalid FID '{value}'")))?;
                    fid = Some(parsed);
                }
                "nonce" => nonce = Some(value.to_string()),
                "domain" => domain = Some(value.to_string()),
                "issued at" => {
                    let parsed = DateTime::parse_from_rfc3339(value)
                        .map_err(|e| malformed(format!("invalid Issued At: {e}")))?;
                    issued_at = Some(parsed.with_timezone(&Utc));
                }
                _ => {}
            }
        }

        let fid = fid.ok_or_else(|| malformed("missing FID".into()))?;
        let nonce = nonce
            .filter(|n| !n.is_empty())
            .ok_or_else(|| malformed("missing Nonce".into()))?;

        Ok(Self {
            fid,
            nonce,
            domain,
            issued_at,
        })
    }

    /// Canonical text form; `parse(render())` yields the same message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(domain) = &self.domain {
            out.push_str(&format!("Domain: {domain}\n"));
        }
        out.push_str(&format!("FID: {}\nNonce: {}", self.fid, self.nonce));
        if let Some(at) = self.issued_at {
            out.push_str(&format!("\nIssued At: {}", at.to_rfc3339()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_all_fields() {
        let raw = "castletics.app wants you to sign in\n\
                   Domain: castletics.app\n\
                   FID: 12345\n\
                   Nonce: abc123def456\n\
                   Issued At: 2024-01-15T10:00:00Z";
        let msg = SignInMessage::parse(raw).unwrap();
        assert_eq!(msg.fid, 12345);
        assert_eq!(msg.nonce, "abc123def456");
        assert_eq!(msg.domain.as_deref(), Some("castletics.app"));
        assert_eq!(msg.issued_at, Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let msg = SignInMessage::parse("fid: 7\nNONCE: zzzzzzzz").unwrap();
        assert_eq!(msg.fid, 7);
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(matches!(
            SignInMessage::parse("Nonce: abcdefgh"),
            Err(AuthError::MalformedMessage(_))
        ));
        assert!(SignInMessage::parse("FID: 1").is_err());
        assert!(SignInMessage::parse("FID: 1\nNonce:").is_err());
        assert!(SignInMessage::parse("FID: abc\nNonce: abcdefgh").is_err());
        assert!(SignInMessage::parse("valid_message").is_err());
    }

    #[test]
    fn render_parses_back() {
        let msg = SignInMessage::new(42, "n0nceV4lue")
            .with_domain("localhost")
            .issued_at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        assert_eq!(SignInMessage::parse(&msg.render()).unwrap(), msg);
    }
}
