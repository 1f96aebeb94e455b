//! Startup configuration.
//!
//! Everything the site reads from the environment is resolved once into
//! explicit structs. Lookups go through an injected closure so tests never
//! touch the process environment.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, SiteError};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_BOOKMARKS_URL: &str =
    "https://meechum.vercel.app/api/public-bookmarks?curator_handle=recorder-152c&limit=3";
pub const DEFAULT_REVALIDATE_SECS: u64 = 300;
pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const BIND_ADDR_KEY: &str = "FOLIO_BIND_ADDR";
pub const BOOKMARKS_URL_KEY: &str = "FOLIO_BOOKMARKS_URL";
pub const REVALIDATE_SECS_KEY: &str = "FOLIO_REVALIDATE_SECS";
pub const EMAILJS_SERVICE_ID_KEY: &str = "EMAILJS_SERVICE_ID";
pub const EMAILJS_TEMPLATE_ID_KEY: &str = "EMAILJS_TEMPLATE_ID";
pub const EMAILJS_PUBLIC_KEY_KEY: &str = "EMAILJS_PUBLIC_KEY";
pub const EMAILJS_API_URL_KEY: &str = "EMAILJS_API_URL";

/// Bookmark proxy settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkConfig {
    pub upstream_url: String,
    /// How long a successful upstream body is reused.
    pub revalidate: Duration,
}

impl Default for BookmarkConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_BOOKMARKS_URL.to_string(),
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
        }
    }
}

impl BookmarkConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let revalidate_secs = match optional(&lookup, REVALIDATE_SECS_KEY) {
            Some(raw) => raw.parse::<u64>().map_err(|error| {
                SiteError::invalid_config(REVALIDATE_SECS_KEY, format!("{raw:?}: {error}"))
            })?,
            None => DEFAULT_REVALIDATE_SECS,
        };
        Ok(Self {
            upstream_url: optional(&lookup, BOOKMARKS_URL_KEY)
                .unwrap_or_else(|| DEFAULT_BOOKMARKS_URL.to_string()),
            revalidate: Duration::from_secs(revalidate_secs),
        })
    }
}

/// EmailJS credentials and endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    /// Sent as `user_id` in the REST payload.
    pub public_key: String,
    pub api_url: String,
}

impl EmailJsConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            service_id: required(&lookup, EMAILJS_SERVICE_ID_KEY)?,
            template_id: required(&lookup, EMAILJS_TEMPLATE_ID_KEY)?,
            public_key: required(&lookup, EMAILJS_PUBLIC_KEY_KEY)?,
            api_url: optional(&lookup, EMAILJS_API_URL_KEY)
                .unwrap_or_else(|| DEFAULT_EMAILJS_API_URL.to_string()),
        })
    }
}

/// Optional contact links shown next to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
    pub github_url: Option<String>,
}

impl SocialLinks {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            email: optional(&lookup, "MY_EMAIL"),
            linkedin_url: optional(&lookup, "MY_LINKEDIN_URL"),
            x_url: optional(&lookup, "MY_X_URL"),
            github_url: optional(&lookup, "MY_GITHUB_URL"),
        }
    }
}

/// Full configuration for `serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub bind_addr: String,
    pub bookmarks: BookmarkConfig,
    pub emailjs: EmailJsConfig,
    pub socials: SocialLinks,
}

impl SiteConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bind_addr: optional(&lookup, BIND_ADDR_KEY)
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            bookmarks: BookmarkConfig::from_lookup(&lookup)?,
            emailjs: EmailJsConfig::from_lookup(&lookup)?,
            socials: SocialLinks::from_lookup(&lookup),
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Trimmed value; blank counts as unset.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(SiteError::MissingConfig { key })
}
