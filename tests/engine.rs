use bigdecimal::BigDecimal;
use cad_verify::models::{MeasurementToken, Verdict};
use cad_verify::{extract_measurement_tokens, reconcile, verify};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::str::FromStr;

fn tokens(values: &[&str]) -> HashSet<MeasurementToken> {
    values.iter().map(|v| MeasurementToken::from(*v)).collect()
}

#[test]
fn matching_claim_is_verified() {
    let results = verify("101.6P x 24 = 2438.4").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].calculated, BigDecimal::from_str("2438.4").unwrap());
    assert_eq!(results[0].verdict, Verdict::Verified);
}

#[test]
fn wrong_total_is_a_mismatch() {
    let results = verify("101.6P x 24 = 2000").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].calculated, BigDecimal::from_str("2438.4").unwrap());
    assert_eq!(results[0].verdict, Verdict::Mismatch);
    assert!(results[0].message.starts_with("✘ Mismatch"));
}

#[test]
fn text_without_claims_is_empty() {
    assert!(verify("no formulas here").unwrap().is_empty());
    assert!(verify("PITCH 101.6 x 24 TOTAL 2438.4").unwrap().is_empty());
}

#[test]
fn exact_totals_verify_and_far_totals_do_not() {
    let cases = [("101.6", 24u64), ("25.4", 13), ("7.5", 1), ("0.05", 7), ("300", 300)];
    for (base, count) in cases {
        let exact = (BigDecimal::from_str(base).unwrap() * BigDecimal::from(count)).round(1);
        let ok = verify(&format!("{base}P x {count} = {exact}")).unwrap();
        assert!(ok[0].is_verified(), "{base} x {count}");

        let far = exact.clone() + BigDecimal::from_str("0.2").unwrap();
        let bad = verify(&format!("{base}P x {count} = {far}")).unwrap();
        assert!(!bad[0].is_verified(), "{base} x {count} vs {far}");
    }
}

#[test]
fn claims_inside_index_table_text() {
    let index = "\
NO  DESCRIPTION        PITCH
1   RAIL SUPPORT       101.6P x 24 = 2438.4
2   BRACKET SPACING    152.4P x 10 = 1524
3   ANCHOR ROW         76.2P x 8 = 600
";
    let results = verify(index).unwrap();
    let verdicts: Vec<_> = results.iter().map(|r| r.verdict).collect();
    assert_eq!(
        verdicts,
        vec![Verdict::Verified, Verdict::Verified, Verdict::Mismatch]
    );
    assert_eq!(
        results[2].message,
        "✘ Mismatch: 76.2P x 8 = 600 (calculated 609.6)"
    );
}

#[test]
fn reconcile_reports_matched_and_missing() {
    let report = reconcile(&["5mm", "10cm"], "The part measures 5mm and tolerance of 3in.");
    assert_eq!(report.matched.into_iter().collect::<HashSet<_>>(), tokens(&["5mm"]));
    assert_eq!(report.missing.into_iter().collect::<HashSet<_>>(), tokens(&["10cm"]));
}

#[test]
fn reconcile_against_empty_diagram() {
    let authoritative = ["5mm", "10cm", "3in"];
    let report = reconcile(&authoritative, "");
    assert!(report.matched.is_empty());
    assert_eq!(
        report.missing.into_iter().collect::<HashSet<_>>(),
        tokens(&authoritative)
    );
}

#[test]
fn reconcile_with_no_authoritative_values() {
    let none: Vec<String> = Vec::new();
    let report = reconcile(&none, "5mm 10cm");
    assert!(report.matched.is_empty());
    assert!(report.missing.is_empty());
}

#[test]
fn matched_is_intersection_with_extracted_tokens() {
    let diagram = "A 12.5 mm\nB 40cm\nC 2m\nD 1in";
    let authoritative = ["12.5 mm", "12.5mm", "40cm", "2 m", "1in"];
    let extracted: HashSet<&str> = extract_measurement_tokens(diagram).collect();
    let report = reconcile(&authoritative, diagram);

    for value in authoritative {
        let token = MeasurementToken::from(value);
        assert_eq!(report.matched.contains(&token), extracted.contains(value), "{value}");
        assert_ne!(report.matched.contains(&token), report.missing.contains(&token));
    }
}

#[test]
fn pure_functions_are_repeatable() {
    let text = "10P x 10 = 100, 3.3P x 3 = 9.8";
    assert_eq!(verify(text).unwrap(), verify(text).unwrap());
    assert_eq!(reconcile(&["1m"], "1m 2m"), reconcile(&["1m"], "1m 2m"));
}
