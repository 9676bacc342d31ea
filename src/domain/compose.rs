// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings derived from other settings.
//!
//! Every function here is pure. The resolver calls them only after their
//! inputs have been resolved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substitution slot in a bounce address template.
pub const PLACEHOLDER: &str = "{}";

/// Default VERP prefix for forwarded mail.
pub const DEFAULT_BOUNCE_PREFIX: &str = "bounce+";

/// Default VERP prefix for transactional mail.
pub const DEFAULT_TRANSACTIONAL_BOUNCE_PREFIX: &str = "transactional+";

const PEM_PUBLIC_KEY_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_PUBLIC_KEY_FOOTER: &str = "-----END PUBLIC KEY-----";

/// A VERP return-path template: `prefix + "{}" + suffix`.
///
/// # Examples
///
/// ```
/// use aliascfg::domain::compose::BounceTemplate;
///
/// let bounce = BounceTemplate::with_defaults(None, None, "bounce+", "example.com");
/// assert_eq!(bounce.template(), "bounce+{}+@example.com");
/// assert_eq!(bounce.render(42), "bounce+42+@example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceTemplate {
    prefix: String,
    suffix: String,
}

impl BounceTemplate {
    /// Creates a template from an explicit prefix and suffix.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Applies the defaults: `default_prefix` and `"+@" + mail_domain`.
    pub fn with_defaults(
        prefix: Option<String>,
        suffix: Option<String>,
        default_prefix: &str,
        mail_domain: &str,
    ) -> Self {
        Self::new(
            prefix.unwrap_or_else(|| default_prefix.to_string()),
            suffix.unwrap_or_else(|| default_bounce_suffix(mail_domain)),
        )
    }

    /// The part before the identifier.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The part after the identifier.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The template with exactly one `{}` slot.
    pub fn template(&self) -> String {
        format!("{}{}{}", self.prefix, PLACEHOLDER, self.suffix)
    }

    /// Embeds `id` between prefix and suffix.
    pub fn render(&self, id: impl fmt::Display) -> String {
        format!("{}{}{}", self.prefix, id, self.suffix)
    }

    /// Extracts the identifier from an address built by [`render`](Self::render).
    pub fn extract<'a>(&self, address: &'a str) -> Option<&'a str> {
        address
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }
}

impl fmt::Display for BounceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, PLACEHOLDER, self.suffix)
    }
}

/// Default bounce suffix: `"+@" + mail_domain`.
pub fn default_bounce_suffix(mail_domain: &str) -> String {
    format!("+@{}", mail_domain.to_lowercase())
}

/// Lowercases and trims every domain.
pub fn normalize_domains<I, S>(domains: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    domains
        .into_iter()
        .map(|d| d.as_ref().trim().to_lowercase())
        .collect()
}

/// Domains users may create aliases on.
///
/// An `ALIAS_DOMAINS` override (comma-separated) replaces the rule entirely;
/// otherwise the secondary domains are followed by the mail domain.
pub fn alias_domains(
    override_list: Option<&str>,
    other_alias_domains: &[String],
    mail_domain: &str,
) -> Vec<String> {
    match override_list {
        Some(list) => normalize_domains(list.split(','))
            .into_iter()
            .filter(|d| !d.is_empty())
            .collect(),
        None => normalize_domains(
            other_alias_domains
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(mail_domain)),
        ),
    }
}

/// Premium-only alias domains, normalized with empty entries dropped.
pub fn premium_alias_domains(domains: &[String]) -> Vec<String> {
    normalize_domains(domains)
        .into_iter()
        .filter(|d| !d.is_empty())
        .collect()
}

/// The domain used for a user's first alias.
pub fn first_alias_domain(override_domain: Option<String>, mail_domain: &str) -> String {
    override_domain.unwrap_or_else(|| mail_domain.to_string())
}

/// Appends the primary product id to the list of additional ids.
///
/// The primary id is always last, even when it is already in the list.
pub fn product_ids(mut ids: Vec<i64>, primary: i64) -> Vec<i64> {
    ids.push(primary);
    ids
}

/// Parses a bare comma-separated id list such as `1, 2,3`.
///
/// Empty entries are skipped. Returns `None` if any entry is not an integer.
pub fn comma_ints(raw: &str) -> Option<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().ok())
        .collect()
}

/// The sender used for mail with an empty `From`.
pub fn noreply_address(override_address: Option<String>, mail_domain: &str) -> String {
    override_address.unwrap_or_else(|| format!("noreply@{mail_domain}"))
}

/// Strips PEM armour and line breaks from a public key for a DKIM TXT record.
///
/// # Examples
///
/// ```
/// use aliascfg::domain::compose::dkim_dns_value;
///
/// let pem = "-----BEGIN PUBLIC KEY-----\nMIIB\nIjAN\n-----END PUBLIC KEY-----\n";
/// assert_eq!(dkim_dns_value(pem), "MIIBIjAN");
/// ```
pub fn dkim_dns_value(pem: &str) -> String {
    pem.replace(PEM_PUBLIC_KEY_HEADER, "")
        .replace(PEM_PUBLIC_KEY_FOOTER, "")
        .replace(['\r', '\n'], "")
}

/// Appends a fixed label to the session secret.
pub fn derived_secret(base: &str, label: &str) -> String {
    format!("{base}{label}")
}

/// Host name of the service URL, used as the WebAuthn relying-party id.
pub fn relying_party_id(service_url: &str) -> Option<String> {
    match url::Url::parse(service_url) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(e) => {
            tracing::warn!(url = service_url, error = %e, "Service URL has no parsable host");
            None
        }
    }
}

/// Comma-separated list, kept verbatim apart from dropping empty entries.
pub fn comma_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
