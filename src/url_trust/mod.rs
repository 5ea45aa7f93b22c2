//! Offline URL trust heuristics.
//!
//! Combines a curated outlet list with lexical red flags in the URL itself.
//! A Safe Browsing verdict can be supplied by the caller; no lookup is made
//! here.

pub mod domains;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::{Host, Url};
use utoipa::ToSchema;

const LONG_URL_CHARS: usize = 75;
const MAX_HOST_LABELS: usize = 4;
const SIGNAL_PENALTY: i32 = 10;
const MAX_SIGNAL_PENALTY: i32 = 40;
const SAFE_BROWSING_PENALTY: i32 = 50;
const TRUSTED_BONUS: i32 = 50;
const BASE_SCORE: i32 = 50;
const TRUSTWORTHY_THRESHOLD: u8 = 50;

#[derive(Error, Debug)]
pub enum UrlTrustError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("url has no host")]
    MissingHost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UrlSignal {
    IpAddressHost,
    Shortener,
    AtSymbol,
    DoubleSlashRedirect,
    LongUrl,
    InsecureScheme,
    DeepSubdomain,
    HyphenatedHost,
}

impl UrlSignal {
    pub fn description(&self) -> &'static str {
        match self {
            UrlSignal::IpAddressHost => "Host is a raw IP address",
            UrlSignal::Shortener => "Uses a URL shortening service",
            UrlSignal::AtSymbol => "Contains an '@' symbol",
            UrlSignal::DoubleSlashRedirect => "Contains a '//' redirect in the path",
            UrlSignal::LongUrl => "Unusually long URL",
            UrlSignal::InsecureScheme => "Not served over HTTPS",
            UrlSignal::DeepSubdomain => "Deeply nested subdomains",
            UrlSignal::HyphenatedHost => "Hyphenated host name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UrlAssessment {
    pub url: String,
    pub host: String,
    pub trusted: bool,
    pub safe_browsing_flagged: bool,
    pub signals: Vec<UrlSignal>,
    pub trust_score: u8,
    pub is_trustworthy: bool,
    pub trust_reasons: Vec<String>,
    pub final_decision: String,
}

/// Collect lexical red flags for an already-parsed URL.
pub fn url_signals(raw: &str, url: &Url) -> Vec<UrlSignal> {
    let mut signals = Vec::new();

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => signals.push(UrlSignal::IpAddressHost),
        Some(Host::Domain(host)) => {
            if domains::is_shortener(host) {
                signals.push(UrlSignal::Shortener);
            }
            if host.split('.').count() > MAX_HOST_LABELS {
                signals.push(UrlSignal::DeepSubdomain);
            }
            if host.contains('-') {
                signals.push(UrlSignal::HyphenatedHost);
            }
        }
        None => {}
    }

    if raw.contains('@') {
        signals.push(UrlSignal::AtSymbol);
    }
    if raw
        .split_once("://")
        .is_some_and(|(_, rest)| rest.contains("//"))
    {
        signals.push(UrlSignal::DoubleSlashRedirect);
    }
    if raw.chars().count() > LONG_URL_CHARS {
        signals.push(UrlSignal::LongUrl);
    }
    if url.scheme() != "https" {
        signals.push(UrlSignal::InsecureScheme);
    }

    signals
}

#[instrument(skip_all, fields(url = %raw))]
pub fn assess_url(
    raw: &str,
    safe_browsing_flagged: Option<bool>,
) -> Result<UrlAssessment, UrlTrustError> {
    let raw = raw.trim();
    let url = Url::parse(raw)?;
    let host = url
        .host_str()
        .ok_or(UrlTrustError::MissingHost)?
        .to_ascii_lowercase();

    let trusted = domains::is_trusted_host(&host);
    let flagged = safe_browsing_flagged.unwrap_or(false);
    let signals = url_signals(raw, &url);

    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();

    if flagged {
        score -= SAFE_BROWSING_PENALTY;
        reasons.push("Flagged by Google Safe Browsing".to_string());
    }

    let penalty = (SIGNAL_PENALTY * signals.len() as i32).min(MAX_SIGNAL_PENALTY);
    score -= penalty;
    reasons.extend(signals.iter().map(|s| s.description().to_string()));

    if trusted {
        score += TRUSTED_BONUS;
        reasons.push("Verified by trusted news database".to_string());
    }

    let trust_score = score.clamp(0, 100) as u8;

    let final_decision = if trusted {
        "Trusted URL (verified by trusted database)"
    } else if flagged {
        "URL is Untrustworthy (flagged by Google Safe Browsing)"
    } else if signals.len() >= 2 {
        "URL is Possibly Phishing/Spam (suspicious URL structure)"
    } else {
        "URL appears Trustworthy"
    };

    debug!(trust_score, trusted, signals = signals.len(), "url assessed");

    Ok(UrlAssessment {
        url: raw.to_string(),
        host,
        trusted,
        safe_browsing_flagged: flagged,
        signals,
        trust_score,
        is_trustworthy: trust_score >= TRUSTWORTHY_THRESHOLD,
        trust_reasons: reasons,
        final_decision: final_decision.to_string(),
    })
}
