//! Tests for entropy, gain and per-attribute statistics

use rstest::rstest;

use oaktree::domain::{entropy, parse_dataset, Dataset, SubsetStats};

fn load(name: &str) -> Dataset {
    let content = std::fs::read_to_string(format!("tests/resources/datasets/{}", name))
        .expect("read dataset fixture");
    parse_dataset(&content).expect("parse dataset fixture")
}

fn three_places(x: f64) -> String {
    format!("{:.3}", x)
}

#[rstest]
#[case(&[3, 2], "0.97")]
#[case(&[1, 0], "0.00")]
#[case(&[1, 2], "0.92")]
#[case(&[1, 1], "1.00")]
fn given_counts_when_computing_entropy_then_matches_reference(
    #[case] counts: &[usize],
    #[case] expected: &str,
) {
    assert_eq!(format!("{:.2}", entropy(counts)), expected);
}

#[test]
fn given_new_treatment_when_computing_stats_then_set_entropy_is_0_971() {
    let stats = SubsetStats::compute(&load("new-treatment.data.txt"));

    assert_eq!(three_places(stats.entropy), "0.971");
}

#[test]
fn given_new_treatment_when_computing_stats_then_gains_match() {
    let stats = SubsetStats::compute(&load("new-treatment.data.txt"));

    let gains: Vec<_> = stats
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), three_places(a.gain)))
        .collect();
    assert_eq!(
        gains,
        [
            ("pulse", "0.020".to_string()),
            ("bp", "0.971".to_string()),
            ("age", "0.420".to_string()),
        ]
    );
}

#[test]
fn given_new_treatment_when_computing_stats_then_value_totals_match() {
    let stats = SubsetStats::compute(&load("new-treatment.data.txt"));

    let occurrences = |attribute: &str, value: &str| {
        stats
            .attribute(attribute)
            .and_then(|a| a.values.iter().find(|v| v.value == value))
            .map(|v| v.occurrences)
    };
    assert_eq!(occurrences("age", "<25"), Some(1));
    assert_eq!(occurrences("pulse", "normal"), Some(3));
    assert_eq!(occurrences("pulse", "rapid"), Some(2));
    assert_eq!(occurrences("bp", "normal"), Some(3));

    let age = stats.attribute("age").unwrap();
    let counts: Vec<_> = age.values.iter().map(|v| v.target_counts.clone()).collect();
    assert_eq!(counts, [vec![1, 0], vec![1, 0], vec![1, 2]]);
}

#[test]
fn given_new_treatment_when_selecting_best_attribute_then_picks_bp() {
    let stats = SubsetStats::compute(&load("new-treatment.data.txt"));

    assert_eq!(stats.best_attribute().map(|a| a.name.as_str()), Some("bp"));
}

#[test]
fn given_attribute_with_empty_bucket_when_computing_stats_then_value_entropy_is_zero() {
    // astigmatism=no never sees "hard", astigmatism=yes never sees "soft"
    let stats = SubsetStats::compute(&load("contact-lenses.data.txt"));

    let astigmatism = stats.attribute("astigmatism").unwrap();
    assert!(astigmatism.values.iter().all(|v| v.entropy == 0.0));
    assert_eq!(astigmatism.gain, stats.entropy);
    assert_eq!(stats.best_attribute().map(|a| a.name.as_str()), Some("astigmatism"));
}

#[test]
fn given_equal_gains_when_selecting_best_attribute_then_first_declared_wins() {
    let content = "2\nP,Q\n2\nA,2,x,y\nB,2,u,v\n2\nx,u,P\ny,v,Q\n";
    let stats = SubsetStats::compute(&parse_dataset(content).unwrap());
    assert_eq!(stats.attributes[0].gain, stats.attributes[1].gain);
    assert_eq!(stats.best_attribute().map(|a| a.name.as_str()), Some("A"));

    let swapped = "2\nP,Q\n2\nB,2,u,v\nA,2,x,y\n2\nu,x,P\nv,y,Q\n";
    let stats = SubsetStats::compute(&parse_dataset(swapped).unwrap());
    assert_eq!(stats.best_attribute().map(|a| a.name.as_str()), Some("B"));
}

#[test]
fn given_all_gains_zero_when_selecting_best_attribute_then_first_attribute_wins() {
    // neither attribute tells P from Q
    let content = "2\nP,Q\n2\nA,1,x\nB,1,u\n2\nx,u,P\nx,u,Q\n";
    let stats = SubsetStats::compute(&parse_dataset(content).unwrap());

    assert!(stats.attributes.iter().all(|a| a.gain.abs() < 1e-12));
    assert_eq!(stats.best_attribute().map(|a| a.name.as_str()), Some("A"));
}

#[test]
fn given_real_attributes_when_computing_stats_then_they_are_skipped() {
    let content = "2\nP,Q\n1\nheight,real\n2\n1.5,P\n2.0,Q\n";
    let stats = SubsetStats::compute(&parse_dataset(content).unwrap());

    assert!(stats.attributes.is_empty());
    assert!(stats.best_attribute().is_none());
}
