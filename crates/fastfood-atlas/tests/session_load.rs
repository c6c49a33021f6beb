use fastfood_atlas::canonical::{RuleError, WebsiteBackfill};
use fastfood_atlas::config::DatasetConfig;
use fastfood_atlas::session::SessionError;
use fastfood_atlas::AtlasSession;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(file)
}

#[test]
fn load_uses_standard_rules_without_rule_file() {
    let config = DatasetConfig {
        path: data_path("fast_food_sample.csv"),
        rules_path: None,
    };

    let session = AtlasSession::load(&config).expect("session loads");

    assert_eq!(session.dataset().len(), 69);
    assert_eq!(session.report().rules.len(), 3);
}

#[test]
fn load_applies_rule_file() {
    let config = DatasetConfig {
        path: data_path("fast_food_sample.csv"),
        rules_path: Some(data_path("chain_rules.json")),
    };

    let session = AtlasSession::load(&config).expect("session loads");
    let report = session.report();

    assert_eq!(report.rules.len(), 4);
    assert_eq!(report.skipped_backfills().count(), 0);
    assert_eq!(report.rules[2].website, WebsiteBackfill::Applied { records: 4 });
    assert!(session
        .dataset()
        .records()
        .iter()
        .filter(|record| record.name == "Dunkin' Donuts")
        .all(|record| record.website.as_deref() == Some("http://local-listing.example.com")));
}

#[test]
fn load_reports_missing_dataset() {
    let config = DatasetConfig {
        path: data_path("missing.csv"),
        rules_path: None,
    };

    let error = AtlasSession::load(&config).expect_err("dataset must exist");

    assert!(matches!(error, SessionError::Dataset(_)));
}

#[test]
fn load_reports_missing_rule_file() {
    let config = DatasetConfig {
        path: data_path("fast_food_sample.csv"),
        rules_path: Some(data_path("missing_rules.json")),
    };

    let error = AtlasSession::load(&config).expect_err("rule file must exist");

    assert!(matches!(error, SessionError::Rules(_)));
}

#[test]
fn load_rejects_rule_file_that_renames_a_canonical_name() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    let rules_path = std::env::temp_dir().join(format!("unstable_rules_{nanos}.json"));
    std::fs::write(
        &rules_path,
        r#"[
            {"canonical_name": "Burger King", "tokens": ["burger"], "source_row": 1},
            {"canonical_name": "BK Express", "tokens": ["burger", "king"], "source_row": 2}
        ]"#,
    )
    .expect("rule file written");
    let config = DatasetConfig {
        path: data_path("fast_food_sample.csv"),
        rules_path: Some(rules_path.clone()),
    };

    let error = AtlasSession::load(&config).expect_err("unstable table must be rejected");
    let _ = std::fs::remove_file(&rules_path);

    assert!(matches!(
        error,
        SessionError::Rules(RuleError::UnstableCanonicalName { canonical_name, .. })
            if canonical_name == "Burger King"
    ));
}
