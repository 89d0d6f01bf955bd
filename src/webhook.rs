//! Discord webhook parsing
//!
//! Accepted input looks like
//! `(https?://)?(canary.|ptb.)?discord(app)?.com/api/webhooks/{id}/{token}/?`
//! and is always written back in the canonical
//! `https://discord.com/api/webhooks/{id}/{token}` form.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{HerokronError, Result};

const CANONICAL_BASE: &str = "https://discord.com/api/webhooks";

fn webhook_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<scheme>https?://)?(?:(?P<channel>canary|ptb)\.)?discord(?P<legacy>app)?\.com/api/webhooks/(?P<id>[0-9]+)/(?P<token>[A-Za-z0-9._-]+)/?$",
        )
        .expect("webhook pattern compiles")
    })
}

/// Discord client release channel named by a webhook subdomain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseChannel {
    Canary,
    Ptb,
}

/// The pieces of a webhook URL that matched the accepted pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookUrl {
    /// Whether a scheme (`http://` or `https://`) was given
    pub has_scheme: bool,
    /// `canary.` or `ptb.` subdomain, if any
    pub channel: Option<ReleaseChannel>,
    /// Whether the old `discordapp.com` domain was used
    pub legacy_domain: bool,
    pub id: String,
    pub token: String,
}

impl WebhookUrl {
    /// Match `url` against the webhook pattern
    pub fn parse(url: &str) -> Result<Self> {
        let caps = webhook_pattern()
            .captures(url)
            .ok_or_else(|| HerokronError::MalformedWebhook(url.to_string()))?;

        let channel = caps.name("channel").map(|m| match m.as_str() {
            "canary" => ReleaseChannel::Canary,
            _ => ReleaseChannel::Ptb,
        });

        Ok(Self {
            has_scheme: caps.name("scheme").is_some(),
            channel,
            legacy_domain: caps.name("legacy").is_some(),
            id: caps["id"].to_string(),
            token: caps["token"].to_string(),
        })
    }

    /// Canonical `https://discord.com/...` form
    pub fn canonical(&self) -> String {
        format!("{}/{}/{}", CANONICAL_BASE, self.id, self.token)
    }
}

/// Stored webhook settings
///
/// Either empty or carrying both `id` and `token`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Webhook {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.token.is_none()
    }

    /// Both parts are present
    pub fn is_complete(&self) -> bool {
        self.id.is_some() && self.token.is_some()
    }

    /// Full webhook URL when configured
    pub fn url(&self) -> Option<String> {
        match (&self.id, &self.token) {
            (Some(id), Some(token)) => Some(format!("{}/{}/{}", CANONICAL_BASE, id, token)),
            _ => None,
        }
    }
}

impl From<WebhookUrl> for Webhook {
    fn from(url: WebhookUrl) -> Self {
        Self {
            id: Some(url.id),
            token: Some(url.token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_url() {
        let url = "https://discord.com/api/webhooks/123456789/abcDEF-123_token";
        let parsed = WebhookUrl::parse(url).unwrap();
        assert_eq!(parsed.id, "123456789");
        assert_eq!(parsed.token, "abcDEF-123_token");
        assert!(parsed.has_scheme);
        assert_eq!(parsed.channel, None);
        assert!(!parsed.legacy_domain);
        assert_eq!(parsed.canonical(), url);
    }

    #[test]
    fn test_variants_normalize() {
        let expected = "https://discord.com/api/webhooks/42/tok.en";
        for input in [
            "http://discord.com/api/webhooks/42/tok.en",
            "discord.com/api/webhooks/42/tok.en",
            "https://discordapp.com/api/webhooks/42/tok.en",
            "https://canary.discord.com/api/webhooks/42/tok.en",
            "https://ptb.discordapp.com/api/webhooks/42/tok.en/",
        ] {
            let parsed = WebhookUrl::parse(input).unwrap();
            assert_eq!(parsed.canonical(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_structured_parts() {
        let parsed = WebhookUrl::parse("ptb.discordapp.com/api/webhooks/1/t").unwrap();
        assert!(!parsed.has_scheme);
        assert_eq!(parsed.channel, Some(ReleaseChannel::Ptb));
        assert!(parsed.legacy_domain);

        let parsed = WebhookUrl::parse("https://canary.discord.com/api/webhooks/1/t").unwrap();
        assert_eq!(parsed.channel, Some(ReleaseChannel::Canary));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "https://example.com/not-a-webhook",
            "https://discord.com/api/webhooks/abc/token",
            "https://discord.com/api/webhooks/123/",
            "https://discord.com/api/webhooks/123/tok$en",
            "https://beta.discord.com/api/webhooks/123/token",
            "ftp://discord.com/api/webhooks/123/token",
            "https://discord.com/api/webhooks/123/token//",
        ] {
            assert!(
                matches!(WebhookUrl::parse(input), Err(HerokronError::MalformedWebhook(_))),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_webhook_url_requires_both_parts() {
        assert_eq!(Webhook::default().url(), None);
        let partial = Webhook {
            id: Some("1".to_string()),
            token: None,
        };
        assert_eq!(partial.url(), None);
        assert!(!partial.is_complete());

        let full: Webhook = WebhookUrl::parse("discord.com/api/webhooks/1/t").unwrap().into();
        assert_eq!(full.url().unwrap(), "https://discord.com/api/webhooks/1/t");
    }
}
