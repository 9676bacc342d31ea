// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the [`Settings`] snapshot from a configuration service.
//!
//! Settings are resolved group by group, in the order their inputs become
//! available: the mail domain before anything derived from it, the session
//! secret before the secrets derived from it, and so on. The first fatal
//! error stops resolution.

use crate::adapters::KeyFileLoader;
use crate::domain::compose::{self, BounceTemplate};
use crate::domain::settings::{
    AwsSettings, CloudWatchSettings, CoinbaseSettings, DkimSettings, EmailSettings, Flags,
    IntegrationSettings, OAuthClient, OAuthSettings, OpenIdSettings, PaddleSettings, PgpSettings,
    PostfixSettings, ServerSettings, SessionSecrets, SpamSettings, StorageSettings, WordLists,
};
use crate::domain::{ConfigValue, ConfigurationService, PathResolver, Result, Secret, Settings};
use crate::service::accessor::{EnvAccessor, FallbackPolicy};

const DEFAULT_SUPPORT_NAME: &str = "Son from SimpleLogin";
const DEFAULT_POSTFIX_SERVER: &str = "240.0.0.1";
const DEFAULT_POSTFIX_PORT: u16 = 25;
const DEFAULT_MAX_NB_EMAIL_FREE_PLAN: i64 = 5;
const DEFAULT_AWS_REGION: &str = "eu-west-3";
const UNSET_PADDLE_ID: i64 = -1;
const DEFAULT_PADDLE_PUBLIC_KEY_PATH: &str = "local_data/paddle.key.pub";
const DEFAULT_OPENID_PRIVATE_KEY_PATH: &str = "local_data/jwtRS256.key";
const DEFAULT_OPENID_PUBLIC_KEY_PATH: &str = "local_data/jwtRS256.key.pub";
const DEFAULT_WORDS_FILE_PATH: &str = "local_data/words_alpha.txt";
const DEFAULT_DISPOSABLE_FILE_PATH: &str = "local_data/local_disposable_domains.txt";
const DEFAULT_LANDING_PAGE_URL: &str = "https://simplelogin.io";
const DEFAULT_STATUS_PAGE_URL: &str = "https://status.simplelogin.io";
const DEFAULT_MAX_SPAM_SCORE: f64 = 5.5;
const DEFAULT_MAX_REPLY_PHASE_SPAM_SCORE: f64 = 5.0;
const DEFAULT_COINBASE_YEARLY_PRICE: f64 = 30.0;

const MAILBOX_SECRET_LABEL: &str = "mailbox";
const CUSTOM_ALIAS_SECRET_LABEL: &str = "custom_alias";

/// Resolves every setting of the service.
///
/// # Examples
///
/// ```rust,no_run
/// use aliascfg::domain::PathResolver;
/// use aliascfg::service::{DefaultConfigService, SettingsResolver};
///
/// # fn main() -> aliascfg::domain::Result<()> {
/// let service = DefaultConfigService::builder().with_env_vars().build()?;
/// let settings = SettingsResolver::new(&service, PathResolver::new("/srv/app")).resolve()?;
/// println!("serving {}", settings.server.url);
/// # Ok(())
/// # }
/// ```
pub struct SettingsResolver<'a> {
    env: EnvAccessor<'a>,
    paths: PathResolver,
    keys: KeyFileLoader,
}

impl<'a> SettingsResolver<'a> {
    /// Creates a resolver reading from `service`, with relative paths resolved
    /// by `paths`.
    pub fn new(service: &'a dyn ConfigurationService, paths: PathResolver) -> Self {
        Self {
            env: EnvAccessor::new(service),
            keys: KeyFileLoader::new(paths.clone()),
            paths,
        }
    }

    /// Resolves all settings.
    ///
    /// Reads key files and may create the upload and keyring directories.
    pub fn resolve(&self) -> Result<Settings> {
        let flags = self.flags();
        let server = self.server()?;
        let email = self.email()?;
        let postfix = self.postfix();
        let dkim = self.dkim()?;
        let secrets = self.secrets()?;
        let aws = self.aws()?;
        let paddle = self.paddle();
        let openid = self.openid()?;
        let word_lists = self.word_lists()?;
        let pgp = self.pgp()?;
        let oauth = self.oauth();
        let storage = self.storage()?;
        let spam = self.spam();
        let coinbase = self.coinbase();
        let integrations = self.integrations();

        tracing::debug!(
            alias_domains = email.alias_domains.len(),
            paddle = paddle.is_configured(),
            "Resolved settings for {}",
            email.email_domain
        );

        Ok(Settings {
            flags,
            server,
            email,
            postfix,
            dkim,
            secrets,
            aws,
            paddle,
            openid,
            oauth,
            word_lists,
            storage,
            spam,
            pgp,
            coinbase,
            integrations,
        })
    }

    fn flags(&self) -> Flags {
        Flags {
            reset_db: self.env.flag("RESET_DB"),
            color_log: self.env.flag("COLOR_LOG"),
            debug: self.env.enabled("DEBUG"),
            not_send_email: self.env.flag("NOT_SEND_EMAIL"),
            enforce_spf: self.env.flag("ENFORCE_SPF"),
            disable_registration: self.env.flag("DISABLE_REGISTRATION"),
            disable_alias_suffix: self.env.flag("DISABLE_ALIAS_SUFFIX"),
            load_pgp_email_handler: self.env.flag("LOAD_PGP_EMAIL_HANDLER"),
            disable_onboarding: self.env.flag("DISABLE_ONBOARDING"),
        }
    }

    fn server(&self) -> Result<ServerSettings> {
        let url = self.env.required("URL")?;
        tracing::info!("Service URL: {}", url);
        let sentry_dsn = self.env.optional("SENTRY_DSN");

        Ok(ServerSettings {
            rp_id: compose::relying_party_id(&url),
            url,
            landing_page_url: self.env.string_or("LANDING_PAGE_URL", DEFAULT_LANDING_PAGE_URL),
            status_page_url: self.env.string_or("STATUS_PAGE_URL", DEFAULT_STATUS_PAGE_URL),
            sentry_front_end_dsn: self
                .env
                .optional("SENTRY_FRONT_END_DSN")
                .or_else(|| sentry_dsn.clone()),
            sentry_dsn,
            profiler_path: self.env.optional("FLASK_PROFILER_PATH"),
            profiler_password: self.secret("FLASK_PROFILER_PASSWORD"),
        })
    }

    fn email(&self) -> Result<EmailSettings> {
        let email_domain = self.env.required("EMAIL_DOMAIN")?.to_lowercase();

        let bounce = BounceTemplate::with_defaults(
            self.env.optional("BOUNCE_PREFIX"),
            self.env.optional("BOUNCE_SUFFIX"),
            compose::DEFAULT_BOUNCE_PREFIX,
            &email_domain,
        );
        let transactional_bounce = BounceTemplate::with_defaults(
            self.env.optional("TRANSACTIONAL_BOUNCE_PREFIX"),
            self.env.optional("TRANSACTIONAL_BOUNCE_SUFFIX"),
            compose::DEFAULT_TRANSACTIONAL_BOUNCE_PREFIX,
            &email_domain,
        );

        let other_alias_domains: Vec<String> =
            self.env
                .structured("OTHER_ALIAS_DOMAINS", FallbackPolicy::WhenFalsy, Vec::new);
        let alias_domains = compose::alias_domains(
            self.env.optional("ALIAS_DOMAINS").as_deref(),
            &other_alias_domains,
            &email_domain,
        );
        let premium: Vec<String> =
            self.env
                .structured("PREMIUM_ALIAS_DOMAINS", FallbackPolicy::WhenFalsy, Vec::new);

        Ok(EmailSettings {
            support_email: self.env.optional("SUPPORT_EMAIL"),
            support_name: self.env.string_or("SUPPORT_NAME", DEFAULT_SUPPORT_NAME),
            admin_email: self.env.optional("ADMIN_EMAIL"),
            bounce,
            transactional_bounce,
            max_nb_email_free_plan: self
                .env
                .int_or("MAX_NB_EMAIL_FREE_PLAN", DEFAULT_MAX_NB_EMAIL_FREE_PLAN),
            alias_domains,
            premium_alias_domains: compose::premium_alias_domains(&premium),
            first_alias_domain: compose::first_alias_domain(
                self.env.optional("FIRST_ALIAS_DOMAIN"),
                &email_domain,
            ),
            email_servers_with_priority: self.env.structured(
                "EMAIL_SERVERS_WITH_PRIORITY",
                FallbackPolicy::WhenFalsy,
                Vec::new,
            ),
            ignored_emails: compose::comma_list(self.env.optional("IGNORED_EMAILS").as_deref()),
            unsubscriber: self.env.optional("UNSUBSCRIBER"),
            noreply: compose::noreply_address(self.env.optional("NOREPLY"), &email_domain),
            email_domain,
        })
    }

    fn postfix(&self) -> PostfixSettings {
        let port = self.env.port_or("POSTFIX_PORT", DEFAULT_POSTFIX_PORT);
        PostfixSettings {
            server: self.env.string_or("POSTFIX_SERVER", DEFAULT_POSTFIX_SERVER),
            port,
            port_forward: self.env.port_or("POSTFIX_PORT_FORWARD", port),
            submission_tls: self.env.flag("POSTFIX_SUBMISSION_TLS"),
        }
    }

    fn dkim(&self) -> Result<DkimSettings> {
        let private_key_path = self.paths.resolve(self.env.required("DKIM_PRIVATE_KEY_PATH")?);
        let public_key_path = self.paths.resolve(self.env.required("DKIM_PUBLIC_KEY_PATH")?);

        let private_key = self.keys.load_text("DKIM_PRIVATE_KEY_PATH", &private_key_path)?;
        let public_key = self.keys.load_text("DKIM_PUBLIC_KEY_PATH", &public_key_path)?;

        Ok(DkimSettings {
            private_key_path,
            public_key_path,
            private_key: Secret::from(private_key),
            dns_value: compose::dkim_dns_value(&public_key),
        })
    }

    fn secrets(&self) -> Result<SessionSecrets> {
        let db_uri = self.env.required("DB_URI")?;
        let session_secret = self.env.required("FLASK_SECRET")?;

        Ok(SessionSecrets {
            db_uri: Secret::from(db_uri),
            mailbox_secret: Secret::from(compose::derived_secret(
                &session_secret,
                MAILBOX_SECRET_LABEL,
            )),
            custom_alias_secret: Secret::from(compose::derived_secret(
                &session_secret,
                CUSTOM_ALIAS_SECRET_LABEL,
            )),
            session_secret: Secret::from(session_secret),
        })
    }

    fn aws(&self) -> Result<AwsSettings> {
        let cloudwatch = if self.env.flag("ENABLE_CLOUDWATCH") {
            Some(CloudWatchSettings {
                log_group: self.env.required("CLOUDWATCH_LOG_GROUP")?,
                log_stream: self.env.required("CLOUDWATCH_LOG_STREAM")?,
            })
        } else {
            None
        };

        Ok(AwsSettings {
            region: self.env.string_or("AWS_REGION", DEFAULT_AWS_REGION),
            bucket: self.env.optional("BUCKET"),
            access_key_id: self.env.optional("AWS_ACCESS_KEY_ID"),
            secret_access_key: self.secret("AWS_SECRET_ACCESS_KEY"),
            cloudwatch,
        })
    }

    fn paddle(&self) -> PaddleSettings {
        let (vendor_id, monthly_product_id, yearly_product_id) = self.paddle_ids();

        let monthly = self.product_id_list("PADDLE_MONTHLY_PRODUCT_IDS");
        let yearly = self.product_id_list("PADDLE_YEARLY_PRODUCT_IDS");

        PaddleSettings {
            vendor_id,
            monthly_product_id,
            yearly_product_id,
            monthly_product_ids: compose::product_ids(monthly, monthly_product_id),
            yearly_product_ids: compose::product_ids(yearly, yearly_product_id),
            public_key_path: self.env.path_or(
                "PADDLE_PUBLIC_KEY_PATH",
                DEFAULT_PADDLE_PUBLIC_KEY_PATH,
                &self.paths,
            ),
            auth_code: self.secret("PADDLE_AUTH_CODE"),
        }
    }

    /// Extra product ids, written either as `[1, 2]` or as `1,2`.
    fn product_id_list(&self, key: &str) -> Vec<i64> {
        if let Some(ids) = self.env.optional(key).as_deref().and_then(compose::comma_ints) {
            return ids;
        }
        self.env.structured(key, FallbackPolicy::WhenFalsy, Vec::new)
    }

    /// The three scalar ids, all `-1` unless every one of them is a valid integer.
    fn paddle_ids(&self) -> (i64, i64, i64) {
        let id = |key: &str| -> Result<i64> {
            let raw = self.env.required(key)?;
            ConfigValue::from(raw).as_i64(key)
        };

        match (
            id("PADDLE_VENDOR_ID"),
            id("PADDLE_MONTHLY_PRODUCT_ID"),
            id("PADDLE_YEARLY_PRODUCT_ID"),
        ) {
            (Ok(vendor), Ok(monthly), Ok(yearly)) => (vendor, monthly, yearly),
            (vendor, monthly, yearly) => {
                let reason = [vendor.err(), monthly.err(), yearly.err()]
                    .into_iter()
                    .flatten()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::warn!(%reason, "Paddle not configured");
                (UNSET_PADDLE_ID, UNSET_PADDLE_ID, UNSET_PADDLE_ID)
            }
        }
    }

    fn openid(&self) -> Result<OpenIdSettings> {
        let private_key_path = self.env.path_or(
            "OPENID_PRIVATE_KEY_PATH",
            DEFAULT_OPENID_PRIVATE_KEY_PATH,
            &self.paths,
        );
        let public_key_path = self.env.path_or(
            "OPENID_PUBLIC_KEY_PATH",
            DEFAULT_OPENID_PUBLIC_KEY_PATH,
            &self.paths,
        );

        Ok(OpenIdSettings {
            private_key: Secret::from(self.keys.load_text("OPENID_PRIVATE_KEY_PATH", &private_key_path)?),
            public_key: self.keys.load_text("OPENID_PUBLIC_KEY_PATH", &public_key_path)?,
            private_key_path,
            public_key_path,
        })
    }

    fn word_lists(&self) -> Result<WordLists> {
        let words_file_path =
            self.env
                .path_or("WORDS_FILE_PATH", DEFAULT_WORDS_FILE_PATH, &self.paths);
        let disposable_file_path = self.env.path_or(
            "DISPOSABLE_FILE_PATH",
            DEFAULT_DISPOSABLE_FILE_PATH,
            &self.paths,
        );

        Ok(WordLists {
            words: self.keys.load_lines("WORDS_FILE_PATH", &words_file_path)?,
            disposable_email_domains: self
                .keys
                .load_lines("DISPOSABLE_FILE_PATH", &disposable_file_path)?,
            words_file_path,
            disposable_file_path,
        })
    }

    fn pgp(&self) -> Result<PgpSettings> {
        let sender_private_key = self
            .keys
            .load_optional_text(
                "PGP_SENDER_PRIVATE_KEY_PATH",
                self.env.optional("PGP_SENDER_PRIVATE_KEY_PATH").as_deref(),
            )?
            .map(Secret::from);

        Ok(PgpSettings {
            sender_private_key,
            signer: self.env.optional("PGP_SIGNER"),
            gnupg_home: self
                .keys
                .ensure_private_dir(self.env.optional("GNUPGHOME").as_deref())?,
        })
    }

    fn oauth(&self) -> OAuthSettings {
        let client = |provider: &str| OAuthClient {
            client_id: self.env.optional(&format!("{provider}_CLIENT_ID")),
            client_secret: self.secret(&format!("{provider}_CLIENT_SECRET")),
        };

        OAuthSettings {
            github: client("GITHUB"),
            google: client("GOOGLE"),
            facebook: client("FACEBOOK"),
        }
    }

    fn storage(&self) -> Result<StorageSettings> {
        let local_file_upload = self.env.flag("LOCAL_FILE_UPLOAD");
        let upload_dir = if local_file_upload {
            Some(self.keys.ensure_upload_dir()?)
        } else {
            None
        };

        Ok(StorageSettings {
            local_file_upload,
            upload_dir,
        })
    }

    fn spam(&self) -> SpamSettings {
        SpamSettings {
            spamassassin_host: self.env.optional("SPAMASSASSIN_HOST"),
            max_spam_score: self.env.float_or("MAX_SPAM_SCORE", DEFAULT_MAX_SPAM_SCORE),
            max_reply_phase_spam_score: self.env.float_or(
                "MAX_REPLY_PHASE_SPAM_SCORE",
                DEFAULT_MAX_REPLY_PHASE_SPAM_SCORE,
            ),
        }
    }

    fn coinbase(&self) -> CoinbaseSettings {
        CoinbaseSettings {
            webhook_secret: self.secret("COINBASE_WEBHOOK_SECRET"),
            checkout_id: self.env.optional("COINBASE_CHECKOUT_ID"),
            api_key: self.secret("COINBASE_API_KEY"),
            yearly_price: self
                .env
                .float_or("COINBASE_YEARLY_PRICE", DEFAULT_COINBASE_YEARLY_PRICE),
        }
    }

    fn integrations(&self) -> IntegrationSettings {
        IntegrationSettings {
            apple_api_secret: self.secret("APPLE_API_SECRET"),
            macapp_apple_api_secret: self.secret("MACAPP_APPLE_API_SECRET"),
            hcaptcha_secret: self.secret("HCAPTCHA_SECRET"),
            hcaptcha_sitekey: self.env.optional("HCAPTCHA_SITEKEY"),
            plausible_host: self.env.optional("PLAUSIBLE_HOST"),
            plausible_domain: self.env.optional("PLAUSIBLE_DOMAIN"),
        }
    }

    fn secret(&self, key: &str) -> Option<Secret> {
        self.env.optional(key).map(Secret::from)
    }
}
