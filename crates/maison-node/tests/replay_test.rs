//! Replay tests
//!
//! Drive the node end to end from script text and script files.

use std::io::Write;

use maison_core::{AccountKey, FixedHeight};
use maison_node::{Node, NodeConfig, NodeError, ReplaySummary};

fn replay(script: &str) -> (String, ReplaySummary) {
    let mut node = Node::with_oracle("ST1ADMIN", FixedHeight(1234));
    let mut out = Vec::new();
    let summary = node.replay(script, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

#[test]
fn duplicate_registration_scenario() {
    let (report, summary) = replay(
        "register U1 \"Maison X\" Qm1\n\
         register U1 \"Maison Y\" Qm2\n",
    );

    insta::assert_snapshot!(report, @r"
    1 register-maison -> value true
    2 register-maison -> error 101
    ");
    assert_eq!(summary, ReplaySummary { calls: 2, mutations: 1, failures: 1 });
}

#[test]
fn rejected_update_scenario() {
    let (report, _) = replay(
        "# moderation\n\
         register U1 \"Maison X\" CID\n\
         reject ST1ADMIN U1\n\
         update U1 Z Qm3\n\
         get U1\n\
         is-registered U1\n\
         is-rejected U1\n",
    );

    insta::assert_snapshot!(report, @r#"
    2 register-maison -> value true
    3 reject-maison -> value true
    4 update-maison -> error 103
    5 get-maison -> value {name: "Maison X", cid: "CID", registered: false, rejected: true, updated_at: 1234}
    6 is-registered -> value false
    7 is-rejected -> value true
    "#);
}

#[test]
fn transfer_admin_scenario() {
    let (report, summary) = replay(
        "register U2 \"Maison W\" Qm4\n\
         transfer-admin U1 NEW\n\
         transfer-admin ST1ADMIN NEW\n\
         reject ST1ADMIN U2\n\
         reject NEW U2\n",
    );

    insta::assert_snapshot!(report, @r"
    1 register-maison -> value true
    2 transfer-admin -> error 100
    3 transfer-admin -> value true
    4 reject-maison -> error 100
    5 reject-maison -> value true
    ");
    assert_eq!((summary.mutations, summary.failures), (3, 2));
}

#[test]
fn unknown_account_queries() {
    let (report, _) = replay("is-registered NOBODY\nis-rejected NOBODY\nget NOBODY\n");

    insta::assert_snapshot!(report, @r"
    1 is-registered -> value false
    2 is-rejected -> value false
    3 get-maison -> error 102
    ");
}

#[test]
fn replay_from_file_with_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "register U1 \"Maison d'Avant\" Qm123abc").unwrap();
    writeln!(file, "update U1 \"Maison Y\" CID2").unwrap();

    let config = NodeConfig {
        admin: "ST1ADMIN".to_string(),
        genesis_height: 77,
        block_interval: std::time::Duration::ZERO,
    };
    let mut node = Node::new(&config).unwrap();
    let source = std::fs::read_to_string(file.path()).unwrap();
    let mut out = Vec::new();

    let summary = node.replay(&source, &mut out).unwrap();

    assert_eq!(summary, ReplaySummary { calls: 2, mutations: 2, failures: 0 });
    let maison = node.registry().get_maison(&AccountKey::from("U1")).unwrap();
    assert_eq!(maison.name, "Maison Y");
    assert_eq!(maison.updated_at, 77);
}

#[test]
fn parse_error_reports_line() {
    let mut node = Node::with_oracle("ST1ADMIN", FixedHeight(0));
    let mut out = Vec::new();

    let err = node.replay("get U1\nreject ST1ADMIN\n", &mut out).unwrap_err();

    assert!(matches!(err, NodeError::Script(_)));
    assert_eq!(err.to_string(), "script error: line 2: 'reject' expects 2 arguments, got 1");
}
