// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed application constants shared with the rest of the service.
//!
//! These are not read from the environment.

/// Promo code granting a year of premium.
pub const PROMO_CODE: &str = "SIMPLEISBETTER";

/// Maximum number of directories a premium user can create.
pub const MAX_NB_DIRECTORY: u32 = 50;

/// Page size for paginated listings.
pub const PAGE_LIMIT: u32 = 20;

/// Lifetime of a signed avatar URL, in seconds (one week).
pub const AVATAR_URL_EXPIRATION: u64 = 3600 * 24 * 7;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "slapp";

/// Session key holding the user id between password and MFA steps.
pub const MFA_USER_ID: &str = "mfa_user_id";

/// DKIM selector published in DNS.
pub const DKIM_SELECTOR: &[u8] = b"dkim";

/// Headers covered by the DKIM signature.
pub const DKIM_HEADERS: &[&[u8]] = &[b"from", b"to"];

/// Greylisting: forward/reply events an alias may have per minute.
pub const MAX_ACTIVITY_DURING_MINUTE_PER_ALIAS: u32 = 5;

/// Greylisting: forward/reply events a mailbox may have per minute.
pub const MAX_ACTIVITY_DURING_MINUTE_PER_MAILBOX: u32 = 10;

/// Maximum alerts sent to the same address within 24 hours.
pub const MAX_ALERT_24H: u32 = 4;

/// Background job names.
pub mod jobs {
    /// First onboarding email.
    pub const ONBOARDING_1: &str = "onboarding-1";
    /// Second onboarding email.
    pub const ONBOARDING_2: &str = "onboarding-2";
    /// Third onboarding email.
    pub const ONBOARDING_3: &str = "onboarding-3";
    /// Fourth onboarding email.
    pub const ONBOARDING_4: &str = "onboarding-4";
    /// Alias batch import.
    pub const BATCH_IMPORT: &str = "batch-import";
}

/// Alert kinds, used to rate-limit alert emails.
pub mod alerts {
    /// A reverse-alias received mail from an unknown mailbox.
    pub const REVERSE_ALIAS_UNKNOWN_MAILBOX: &str = "reverse_alias_unknown_mailbox";
    /// A forwarded email bounced.
    pub const BOUNCE_EMAIL: &str = "bounce";
    /// A reply bounced.
    pub const BOUNCE_EMAIL_REPLY_PHASE: &str = "bounce-when-reply";
    /// A forwarded email was flagged as spam.
    pub const SPAM_EMAIL: &str = "spam";
    /// Mail sent from a mailbox to one of its own aliases.
    pub const SEND_EMAIL_CYCLE: &str = "cycle";
    /// SPF check failed.
    pub const SPF: &str = "spf";
    /// A mailbox address is also an alias.
    pub const MAILBOX_IS_ALIAS: &str = "mailbox_is_alias";
    /// A custom domain has wrong MX records.
    pub const WRONG_MX_RECORD_CUSTOM_DOMAIN: &str = "custom_domain_mx_record_issue";
    /// An alias was about to be created on a disabled directory.
    pub const DIRECTORY_DISABLED_ALIAS_CREATION: &str = "alert_directory_disabled_alias_creation";
}
