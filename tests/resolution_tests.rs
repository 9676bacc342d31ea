// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for settings resolution.
//!
//! Each test starts from a project root with valid key files and the required
//! settings, then changes one thing.

mod common;

use aliascfg::domain::{ConfigError, Settings};
use common::{Fixture, DKIM_PUBLIC_KEY};

fn resolve(fixture: &Fixture) -> Settings {
    fixture.resolve().unwrap()
}

#[test]
fn test_defaults() {
    let fixture = Fixture::new();
    let settings = resolve(&fixture);

    assert_eq!(settings.email.support_name, "Son from SimpleLogin");
    assert_eq!(settings.email.max_nb_email_free_plan, 5);
    assert_eq!(settings.postfix.server, "240.0.0.1");
    assert_eq!(settings.postfix.port, 25);
    assert!(!settings.postfix.submission_tls);
    assert_eq!(settings.aws.region, "eu-west-3");
    assert_eq!(settings.server.landing_page_url, "https://simplelogin.io");
    assert_eq!(settings.server.status_page_url, "https://status.simplelogin.io");
    assert_eq!(settings.spam.max_spam_score, 5.5);
    assert_eq!(settings.spam.max_reply_phase_spam_score, 5.0);
    assert_eq!(settings.coinbase.yearly_price, 30.0);
    assert_eq!(
        settings.paddle.public_key_path,
        fixture.path().join("local_data/paddle.key.pub")
    );
    assert!(settings.email.email_servers_with_priority.is_empty());
    assert!(settings.email.premium_alias_domains.is_empty());
    assert!(settings.email.ignored_emails.is_empty());
    assert_eq!(settings.email.first_alias_domain, "example.com");
}

#[test]
fn test_presence_flags() {
    let mut fixture = Fixture::new();
    fixture
        .set("RESET_DB", "")
        .set("NOT_SEND_EMAIL", "0")
        .set("POSTFIX_SUBMISSION_TLS", "")
        .set("DEBUG", "");

    let settings = resolve(&fixture);
    assert!(settings.flags.reset_db);
    assert!(settings.flags.not_send_email);
    assert!(settings.postfix.submission_tls);
    assert!(!settings.flags.color_log);
    assert!(!settings.flags.debug);
}

#[test]
fn test_missing_url_aborts_naming_key() {
    let mut fixture = Fixture::new();
    fixture.remove("URL");

    let err = fixture.resolve().unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.key(), Some("URL"));
    assert!(err.to_string().contains("URL"));
}

#[test]
fn test_each_required_setting_is_enforced() {
    for key in [
        "URL",
        "EMAIL_DOMAIN",
        "DB_URI",
        "FLASK_SECRET",
        "DKIM_PRIVATE_KEY_PATH",
        "DKIM_PUBLIC_KEY_PATH",
    ] {
        let mut fixture = Fixture::new();
        fixture.set(key, "");
        let err = fixture.resolve().unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingRequiredSetting { key: ref k } if k == key),
            "{key}: {err}"
        );
    }
}

#[test]
fn test_missing_dkim_file_is_unreadable_key_material() {
    let mut fixture = Fixture::new();
    fixture.set("DKIM_PRIVATE_KEY_PATH", "local_data/nope.key");

    match fixture.resolve().unwrap_err() {
        ConfigError::UnreadableKeyMaterial { key, path, .. } => {
            assert_eq!(key, "DKIM_PRIVATE_KEY_PATH");
            assert_eq!(path, fixture.path().join("local_data/nope.key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_optional_pgp_key_is_absent() {
    let fixture = Fixture::new();
    let settings = resolve(&fixture);

    assert!(settings.pgp.sender_private_key.is_none());
    assert!(settings.pgp.signer.is_none());
}

#[test]
fn test_configured_pgp_key_is_loaded() {
    let mut fixture = Fixture::new();
    fixture.write("local_data/pgp.key", "PGP PRIVATE");
    fixture
        .set("PGP_SENDER_PRIVATE_KEY_PATH", "local_data/pgp.key")
        .set("PGP_SIGNER", "Alias <sign@example.com>");

    let settings = resolve(&fixture);
    assert_eq!(
        settings.pgp.sender_private_key.as_ref().map(|k| k.expose()),
        Some("PGP PRIVATE")
    );
}

#[test]
fn test_gnupg_home_is_resolved_against_root() {
    let mut fixture = Fixture::new();
    fixture.set("GNUPGHOME", "keyring");

    let settings = resolve(&fixture);
    assert_eq!(settings.pgp.gnupg_home, fixture.path().join("keyring"));
}

#[test]
fn test_alias_domains_override() {
    let mut fixture = Fixture::new();
    fixture
        .set("ALIAS_DOMAINS", "foo.com,Bar.com")
        .set("OTHER_ALIAS_DOMAINS", r#"["other.com"]"#);

    let settings = resolve(&fixture);
    assert_eq!(settings.email.alias_domains, vec!["foo.com", "bar.com"]);
}

#[test]
fn test_alias_domains_union() {
    let mut fixture = Fixture::new();
    fixture.set("OTHER_ALIAS_DOMAINS", r#"["other.com"]"#);

    let settings = resolve(&fixture);
    assert_eq!(settings.email.alias_domains, vec!["other.com", "example.com"]);
}

#[test]
fn test_empty_alias_domains_override_keeps_union() {
    let mut fixture = Fixture::new();
    fixture
        .set("ALIAS_DOMAINS", "")
        .set("OTHER_ALIAS_DOMAINS", r#"["other.com"]"#);

    let settings = resolve(&fixture);
    assert_eq!(settings.email.alias_domains, vec!["other.com", "example.com"]);
    assert_eq!(settings.email.first_alias_domain, "example.com");
}

#[test]
fn test_mail_domain_is_lowercased() {
    let mut fixture = Fixture::new();
    fixture.set("EMAIL_DOMAIN", "Example.COM");

    let settings = resolve(&fixture);
    assert_eq!(settings.email.email_domain, "example.com");
    assert_eq!(settings.email.alias_domains, vec!["example.com"]);
    assert_eq!(settings.email.noreply, "noreply@example.com");
}

#[test]
fn test_bounce_templates() {
    let fixture = Fixture::new();
    let settings = resolve(&fixture);

    assert_eq!(settings.email.bounce.template(), "bounce+{}+@example.com");
    assert_eq!(settings.email.bounce.render(42), "bounce+42+@example.com");
    assert_eq!(
        settings.email.transactional_bounce.template(),
        "transactional+{}+@example.com"
    );
}

#[test]
fn test_bounce_overrides() {
    let mut fixture = Fixture::new();
    fixture
        .set("BOUNCE_PREFIX", "b+")
        .set("BOUNCE_SUFFIX", "+@bounces.example.com");

    let settings = resolve(&fixture);
    assert_eq!(settings.email.bounce.template(), "b+{}+@bounces.example.com");
}

#[test]
fn test_structured_lists_parse_exactly() {
    let mut fixture = Fixture::new();
    fixture
        .set("PADDLE_MONTHLY_PRODUCT_IDS", "[1,2,3]")
        .set("EMAIL_SERVERS_WITH_PRIORITY", r#"[(10,"a")]"#)
        .set("PREMIUM_ALIAS_DOMAINS", r#"["Premium.com", ""]"#);

    let settings = resolve(&fixture);
    assert_eq!(settings.paddle.monthly_product_ids, vec![1, 2, 3, -1]);
    assert_eq!(
        settings.email.email_servers_with_priority,
        vec![(10, "a".to_string())]
    );
    assert_eq!(settings.email.premium_alias_domains, vec!["premium.com"]);
}

#[test]
fn test_malformed_structured_lists_degrade() {
    let mut fixture = Fixture::new();
    fixture
        .set("OTHER_ALIAS_DOMAINS", "[\"other.com\"")
        .set("PREMIUM_ALIAS_DOMAINS", "premium.com")
        .set("EMAIL_SERVERS_WITH_PRIORITY", "[(10)]")
        .set("PADDLE_MONTHLY_PRODUCT_IDS", "__import__('os')")
        .set("PADDLE_YEARLY_PRODUCT_IDS", "1;2");

    let settings = resolve(&fixture);
    assert_eq!(settings.email.alias_domains, vec!["example.com"]);
    assert!(settings.email.premium_alias_domains.is_empty());
    assert!(settings.email.email_servers_with_priority.is_empty());
    assert_eq!(settings.paddle.monthly_product_ids, vec![-1]);
    assert_eq!(settings.paddle.yearly_product_ids, vec![-1]);
}

#[test]
fn test_malformed_numbers_degrade() {
    let mut fixture = Fixture::new();
    fixture
        .set("MAX_NB_EMAIL_FREE_PLAN", "many")
        .set("MAX_SPAM_SCORE", "high")
        .set("POSTFIX_PORT", "70000");

    let settings = resolve(&fixture);
    assert_eq!(settings.email.max_nb_email_free_plan, 5);
    assert_eq!(settings.spam.max_spam_score, 5.5);
    assert_eq!(settings.postfix.port, 25);
}

#[test]
fn test_dkim_dns_value() {
    let fixture = Fixture::new();
    let settings = resolve(&fixture);

    let value = &settings.dkim.dns_value;
    assert!(!value.contains("BEGIN") && !value.contains("END"));
    assert!(!value.contains('\n') && !value.contains('\r'));

    let body: String = DKIM_PUBLIC_KEY
        .lines()
        .filter(|line| !line.starts_with("-----"))
        .collect();
    assert_eq!(value, &body);
}

#[test]
fn test_paddle_configured() {
    let mut fixture = Fixture::new();
    fixture
        .set("PADDLE_VENDOR_ID", "1234")
        .set("PADDLE_MONTHLY_PRODUCT_ID", "10")
        .set("PADDLE_YEARLY_PRODUCT_ID", "20")
        .set("PADDLE_AUTH_CODE", "auth");

    let settings = resolve(&fixture);
    assert!(settings.paddle.is_configured());
    assert_eq!(settings.paddle.monthly_product_ids, vec![10]);
    assert_eq!(settings.paddle.yearly_product_ids, vec![20]);
}

#[test]
fn test_paddle_partial_falls_back() {
    let mut fixture = Fixture::new();
    fixture
        .set("PADDLE_VENDOR_ID", "1234")
        .set("PADDLE_MONTHLY_PRODUCT_ID", "10");

    let settings = resolve(&fixture);
    assert_eq!(settings.paddle.vendor_id, -1);
    assert_eq!(settings.paddle.monthly_product_id, -1);
    assert_eq!(settings.paddle.yearly_product_id, -1);
}

#[test]
fn test_cloudwatch() {
    let mut fixture = Fixture::new();
    fixture
        .set("ENABLE_CLOUDWATCH", "")
        .set("CLOUDWATCH_LOG_GROUP", "alias")
        .set("CLOUDWATCH_LOG_STREAM", "web");

    let settings = resolve(&fixture);
    let cloudwatch = settings.aws.cloudwatch.unwrap();
    assert_eq!(cloudwatch.log_group, "alias");
    assert_eq!(cloudwatch.log_stream, "web");

    fixture.remove("CLOUDWATCH_LOG_GROUP");
    let err = fixture.resolve().unwrap_err();
    assert_eq!(err.key(), Some("CLOUDWATCH_LOG_GROUP"));
}

#[test]
fn test_word_lists() {
    let fixture = Fixture::new();
    let settings = resolve(&fixture);

    assert_eq!(settings.word_lists.words, vec!["aardvark", "abacus", "abandon"]);
    assert_eq!(
        settings.word_lists.disposable_email_domains,
        vec!["mailinator.com", "yopmail.com"]
    );
}

#[test]
fn test_missing_word_list_is_fatal() {
    let mut fixture = Fixture::new();
    fixture.set("WORDS_FILE_PATH", "/nonexistent/words.txt");

    let err = fixture.resolve().unwrap_err();
    assert!(matches!(err, ConfigError::UnreadableKeyMaterial { ref key, .. } if key == "WORDS_FILE_PATH"));
}

#[test]
fn test_ignored_emails_and_derived_secrets() {
    let mut fixture = Fixture::new();
    fixture.set("IGNORED_EMAILS", "a@example.com,b@example.com");

    let settings = resolve(&fixture);
    assert_eq!(settings.email.ignored_emails, vec!["a@example.com", "b@example.com"]);
    assert_eq!(settings.secrets.mailbox_secret.expose(), "s3cr3tmailbox");
    assert_eq!(settings.secrets.custom_alias_secret.expose(), "s3cr3tcustom_alias");
}

#[test]
fn test_debug_output_hides_secrets() {
    let mut fixture = Fixture::new();
    fixture.set("AWS_SECRET_ACCESS_KEY", "aws-very-secret");

    let settings = resolve(&fixture);
    let debug = format!("{settings:?}");
    assert!(!debug.contains("s3cr3t"));
    assert!(!debug.contains("aws-very-secret"));
    assert!(!debug.contains("user:pw"));
}
