//! Enrichment joins applied to classified funds.

mod common;

use common::{directory, registry, tracking, without_column, Fund, Tracked};
use fundrecon_core::{
    enrich::{apply_officer_email_policy, NewFundRecord},
    lookup::{FirstSeenMap, OfficerEntry},
    reconcile, ReconConfig, ReconOutput, Table,
};

fn run(auth: &Table, track: &Table, dir: &Table) -> ReconOutput {
    common::init_logging();
    reconcile(auth, track, dir, &ReconConfig::default_test()).expect("reconcile")
}

#[test]
fn officer_hit_rewrites_field_to_email_and_sets_region() {
    let auth = registry(&[Fund::new("F1").officer("Jane Doe")]);
    let dir = directory(&[("Jane Doe", "EMEA", "jane.doe@example.com")]);

    let out = run(&auth, &tracking(&[]), &dir);

    let f1 = &out.new_funds[0];
    assert_eq!(f1.credit_officer, "jane.doe@example.com");
    assert_eq!(f1.region, "EMEA");
    assert_eq!(out.summary.officer_hits, 1);
    assert_eq!(out.summary.officer_misses, 0);
}

#[test]
fn officer_miss_keeps_name_and_blank_region() {
    let auth = registry(&[Fund::new("F1").officer("Unknown Person")]);
    let dir = directory(&[("Jane Doe", "EMEA", "jane.doe@example.com")]);

    let out = run(&auth, &tracking(&[]), &dir);

    let f1 = &out.new_funds[0];
    assert_eq!(f1.credit_officer, "Unknown Person");
    assert_eq!(f1.region, "");
    assert_eq!(out.summary.officer_misses, 1);
}

#[test]
fn officer_match_ignores_case_and_padding() {
    let auth = registry(&[Fund::new("F1").officer("  JANE doe ")]);
    let dir = directory(&[("Jane Doe", "EMEA", "jane.doe@example.com")]);

    let out = run(&auth, &tracking(&[]), &dir);

    assert_eq!(out.new_funds[0].credit_officer, "jane.doe@example.com");
}

#[test]
fn email_policy_leaves_record_untouched_on_miss() {
    let directory = FirstSeenMap::build(vec![(
        "Jane Doe",
        OfficerEntry {
            region: "EMEA".into(),
            email: "jane@example.com".into(),
        },
    )]);
    let mut record = NewFundRecord {
        fund_id: "F1".into(),
        credit_officer: "Someone Else".into(),
        region: "prior".into(),
        ..NewFundRecord::default()
    };
    let before = record.clone();

    assert!(!apply_officer_email_policy(&mut record, &directory));
    assert_eq!(record, before);

    record.credit_officer = "Jane Doe".into();
    assert!(apply_officer_email_policy(&mut record, &directory));
    assert_eq!(record.credit_officer, "jane@example.com");
    assert_eq!(record.region, "EMEA");
}

#[test]
fn im_defaults_fill_settings_on_hit_and_stay_blank_on_miss() {
    let auth = registry(&[Fund::new("NEW1").im("IM7"), Fund::new("NEW2").im("IM9")]);
    let track = tracking(&[Tracked::new("OLD").im("IM7").settings("Admin", "Monthly", "Yes", "Y")]);

    let out = run(&auth, &track, &directory(&[]));

    let hit = &out.new_funds[0];
    assert_eq!(hit.nav_source, "Admin");
    assert_eq!(hit.frequency, "Monthly");
    assert_eq!(hit.ad_hoc_reporting, "Yes");
    assert_eq!(hit.parent_flagship_flag, "Y");

    let miss = &out.new_funds[1];
    assert_eq!(miss.nav_source, "");
    assert_eq!(miss.frequency, "");
    assert_eq!(miss.ad_hoc_reporting, "");
    assert_eq!(miss.parent_flagship_flag, "");
    assert_eq!(out.summary.im_default_hits, 1);
}

#[test]
fn placeholder_tracking_row_does_not_leak_im_defaults() {
    let auth = registry(&[Fund::new("NEW1").im("IM1")]);
    let track = tracking(&[
        Tracked::new("   ").im("IM1").settings("Placeholder", "Never", "No", "N"),
        Tracked::new("T1").im("IM1").settings("Admin", "Monthly", "Yes", "Y"),
    ]);

    let out = run(&auth, &track, &directory(&[]));

    assert_eq!(out.new_funds[0].nav_source, "Admin");
    assert_eq!(out.new_funds[0].frequency, "Monthly");
    assert!(out.inactive_funds.iter().all(|r| r.fund_id == "T1"));
}

#[test]
fn days_to_report_comes_from_registry() {
    let auth = registry(&[Fund::new("F1").days("45"), Fund::new("F2").days("")]);

    let out = run(&auth, &tracking(&[]), &directory(&[]));

    assert_eq!(out.new_funds[0].days_to_report, "45");
    assert_eq!(out.new_funds[1].days_to_report, "");
}

#[test]
fn days_to_report_blank_when_column_absent() {
    let auth = without_column(&registry(&[Fund::new("F1")]), "days_to_report");

    let out = run(&auth, &tracking(&[]), &directory(&[]));

    assert_eq!(out.new_funds[0].days_to_report, "");
    assert_eq!(out.summary.days_hits, 0);
}

#[test]
fn new_fund_carries_registry_fields_and_status() {
    let auth = registry(&[Fund::new("F1").tier("2")]);

    let out = run(&auth, &tracking(&[]), &directory(&[]));

    let f1 = &out.new_funds[0];
    assert_eq!(f1.fund_name, "F1 Fund");
    assert_eq!(f1.im_id, "IM1");
    assert_eq!(f1.im_name, "Manager One");
    assert_eq!(f1.tier, "2");
    assert_eq!(f1.status, "Active");
}

#[test]
fn configured_status_is_used_for_new_funds() {
    let auth = registry(&[Fund::new("F1")]);
    let mut config = ReconConfig::default_test();
    config.new_fund_status = "Onboarding".into();

    let out = reconcile(&auth, &tracking(&[]), &directory(&[]), &config).unwrap();

    assert_eq!(out.new_funds[0].status, "Onboarding");
}

#[test]
fn inactive_fund_keeps_tracking_status_and_comments() {
    let track = tracking(&[Tracked::new("GONE").status("Active").comments("liquidated Q3")]);

    let out = run(&registry(&[Fund::new("F1")]), &track, &directory(&[]));

    let gone = &out.inactive_funds[0];
    assert_eq!(gone.fund_id, "GONE");
    assert_eq!(gone.status, "Active");
    assert_eq!(gone.comments, "liquidated Q3");
    assert_eq!(gone.tier, "");
}
