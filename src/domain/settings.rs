// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolved configuration snapshot.
//!
//! [`Settings`] is built once by the resolver and then only read. Collaborators
//! receive it by reference (or behind an `Arc`); nothing in this crate keeps a
//! global copy.

use crate::domain::compose::BounceTemplate;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

const REDACTED: &str = "[redacted]";

/// A secret string that never shows up in `Debug` output or serialized dumps.
///
/// # Examples
///
/// ```
/// use aliascfg::domain::settings::Secret;
///
/// let secret = Secret::from("hunter2");
/// assert_eq!(secret.expose(), "hunter2");
/// assert_eq!(format!("{:?}", secret), "Secret([redacted])");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    pub fn new(value: String) -> Self {
        Secret(value)
    }

    /// Returns the secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret(value.to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED})")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// Every resolved setting of the service.
#[derive(Clone, Debug, Serialize)]
pub struct Settings {
    /// Presence-only switches
    pub flags: Flags,
    /// Public URLs and error reporting
    pub server: ServerSettings,
    /// Mail domains, addresses and templates
    pub email: EmailSettings,
    /// Outgoing MTA
    pub postfix: PostfixSettings,
    /// DKIM signing key material
    pub dkim: DkimSettings,
    /// Database URI and session-derived secrets
    pub secrets: SessionSecrets,
    /// Object storage and log shipping
    pub aws: AwsSettings,
    /// Subscription billing
    pub paddle: PaddleSettings,
    /// Key pair used to sign id tokens
    pub openid: OpenIdSettings,
    /// Social login clients
    pub oauth: OAuthSettings,
    /// Word list and disposable-domain denylist
    pub word_lists: WordLists,
    /// File uploads
    pub storage: StorageSettings,
    /// Spam scoring
    pub spam: SpamSettings,
    /// PGP signing and keyring directory
    pub pgp: PgpSettings,
    /// Crypto payments
    pub coinbase: CoinbaseSettings,
    /// Remaining third-party services
    pub integrations: IntegrationSettings,
}

/// Switches toggled by the mere presence of an environment key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    /// `RESET_DB`
    pub reset_db: bool,
    /// `COLOR_LOG`
    pub color_log: bool,
    /// `DEBUG`, the only valued flag: set and non-empty means on.
    pub debug: bool,
    /// `NOT_SEND_EMAIL`
    pub not_send_email: bool,
    /// `ENFORCE_SPF`
    pub enforce_spf: bool,
    /// `DISABLE_REGISTRATION`
    pub disable_registration: bool,
    /// `DISABLE_ALIAS_SUFFIX`
    pub disable_alias_suffix: bool,
    /// `LOAD_PGP_EMAIL_HANDLER`
    pub load_pgp_email_handler: bool,
    /// `DISABLE_ONBOARDING`
    pub disable_onboarding: bool,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServerSettings {
    pub url: String,
    /// WebAuthn relying-party id, the host of `url`.
    pub rp_id: Option<String>,
    pub landing_page_url: String,
    pub status_page_url: String,
    pub sentry_dsn: Option<String>,
    /// Falls back to `sentry_dsn`.
    pub sentry_front_end_dsn: Option<String>,
    pub profiler_path: Option<String>,
    pub profiler_password: Option<Secret>,
}

/// Mail domains, addresses and VERP templates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmailSettings {
    /// Primary mail domain, lowercase.
    pub email_domain: String,
    /// `SUPPORT_EMAIL`
    pub support_email: Option<String>,
    /// Display name used with the support address.
    pub support_name: String,
    /// `ADMIN_EMAIL`
    pub admin_email: Option<String>,
    /// Return path for forwarded mail.
    pub bounce: BounceTemplate,
    /// Return path for transactional mail.
    pub transactional_bounce: BounceTemplate,
    /// Alias quota on the free plan.
    pub max_nb_email_free_plan: i64,
    /// Domains users may create aliases on.
    pub alias_domains: Vec<String>,
    /// Domains reserved to premium users.
    pub premium_alias_domains: Vec<String>,
    /// Domain of a user's first alias.
    pub first_alias_domain: String,
    /// `(priority, hostname)` MX records expected on custom domains.
    pub email_servers_with_priority: Vec<(i64, String)>,
    /// Addresses excluded from statistics.
    pub ignored_emails: Vec<String>,
    /// Address receiving unsubscribe requests.
    pub unsubscriber: Option<String>,
    /// Sender for mail that arrives with an empty `From`.
    pub noreply: String,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostfixSettings {
    pub server: String,
    pub port: u16,
    /// Port used in the forward phase; defaults to `port`.
    pub port_forward: u16,
    /// Submit on 587 with TLS instead of plain 25.
    pub submission_tls: bool,
}

/// DKIM key material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DkimSettings {
    /// Resolved `DKIM_PRIVATE_KEY_PATH`.
    pub private_key_path: PathBuf,
    /// Resolved `DKIM_PUBLIC_KEY_PATH`.
    pub public_key_path: PathBuf,
    /// PEM private key used to sign outgoing mail.
    pub private_key: Secret,
    /// Public key body for the DNS TXT record, on one line.
    pub dns_value: String,
}

/// Secrets derived from the session secret, plus the database URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSecrets {
    /// `DB_URI`
    pub db_uri: Secret,
    /// `FLASK_SECRET`, signs session cookies.
    pub session_secret: Secret,
    /// Session secret + `"mailbox"`.
    pub mailbox_secret: Secret,
    /// Session secret + `"custom_alias"`.
    pub custom_alias_secret: Secret,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AwsSettings {
    pub region: String,
    pub bucket: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<Secret>,
    /// Present only when `ENABLE_CLOUDWATCH` is set.
    pub cloudwatch: Option<CloudWatchSettings>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CloudWatchSettings {
    pub log_group: String,
    pub log_stream: String,
}

/// Subscription billing.
///
/// The three scalar ids are `-1` when billing is not configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaddleSettings {
    /// `PADDLE_VENDOR_ID`
    pub vendor_id: i64,
    /// `PADDLE_MONTHLY_PRODUCT_ID`
    pub monthly_product_id: i64,
    /// `PADDLE_YEARLY_PRODUCT_ID`
    pub yearly_product_id: i64,
    /// Extra monthly ids, with `monthly_product_id` appended.
    pub monthly_product_ids: Vec<i64>,
    /// Extra yearly ids, with `yearly_product_id` appended.
    pub yearly_product_ids: Vec<i64>,
    /// Webhook signature verification key.
    pub public_key_path: PathBuf,
    /// `PADDLE_AUTH_CODE`
    pub auth_code: Option<Secret>,
}

impl PaddleSettings {
    /// Returns `true` when all scalar ids were provided.
    pub fn is_configured(&self) -> bool {
        self.vendor_id != -1
    }
}

/// Key pair used to sign OpenID Connect id tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpenIdSettings {
    /// Resolved `OPENID_PRIVATE_KEY_PATH`.
    pub private_key_path: PathBuf,
    /// Resolved `OPENID_PUBLIC_KEY_PATH`.
    pub public_key_path: PathBuf,
    /// PEM private key.
    pub private_key: Secret,
    /// PEM public key.
    pub public_key: String,
}

/// Client credentials of one social login provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OAuthClient {
    /// Public client id
    pub client_id: Option<String>,
    /// Client secret
    pub client_secret: Option<Secret>,
}

impl OAuthClient {
    /// Returns `true` when both id and secret are set.
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OAuthSettings {
    pub github: OAuthClient,
    pub google: OAuthClient,
    pub facebook: OAuthClient,
}

/// Lists loaded from disk at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordLists {
    /// Resolved `WORDS_FILE_PATH`.
    pub words_file_path: PathBuf,
    /// Words used to generate random aliases.
    pub words: Vec<String>,
    /// Resolved `DISPOSABLE_FILE_PATH`.
    pub disposable_file_path: PathBuf,
    /// Lowercase disposable mail domains, comments removed.
    pub disposable_email_domains: Vec<String>,
}

/// Local file uploads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StorageSettings {
    /// `LOCAL_FILE_UPLOAD`: store uploads on disk instead of the bucket.
    pub local_file_upload: bool,
    /// Created at startup when local upload is on.
    pub upload_dir: Option<PathBuf>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpamSettings {
    pub spamassassin_host: Option<String>,
    pub max_spam_score: f64,
    /// Stricter threshold applied to replies.
    pub max_reply_phase_spam_score: f64,
}

/// PGP signing of outgoing encrypted mail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PgpSettings {
    /// Absent unless `PGP_SENDER_PRIVATE_KEY_PATH` is set.
    pub sender_private_key: Option<Secret>,
    /// Address of the signer.
    pub signer: Option<String>,
    /// Keyring directory, owner-only.
    pub gnupg_home: PathBuf,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoinbaseSettings {
    pub webhook_secret: Option<Secret>,
    pub checkout_id: Option<String>,
    pub api_key: Option<Secret>,
    pub yearly_price: f64,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntegrationSettings {
    /// Used when querying the App Store for the iOS app.
    pub apple_api_secret: Option<Secret>,
    /// Same, for the Mac app.
    pub macapp_apple_api_secret: Option<Secret>,
    pub hcaptcha_secret: Option<Secret>,
    pub hcaptcha_sitekey: Option<String>,
    pub plausible_host: Option<String>,
    pub plausible_domain: Option<String>,
}
