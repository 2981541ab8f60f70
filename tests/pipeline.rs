//! End-to-end pipeline tests over in-memory streams and tempfile-backed
//! cluster tables.

use std::io::Write;

use featurise::config::ClusterConfig;
use featurise::features::FeatureSet;
use featurise::pipeline::{Featuriser, Record};

fn run_to_string(featuriser: &mut Featuriser, input: &str) -> String {
    let mut out = Vec::new();
    featuriser
        .run(input.as_bytes(), &mut out)
        .expect("pipeline run failed");
    String::from_utf8(out).unwrap()
}

fn write_table(lines: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(lines.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn bow_end_to_end() {
    let mut featuriser =
        Featuriser::new(vec![FeatureSet::Bow], ClusterConfig::default()).unwrap();
    let output = run_to_string(
        &mut featuriser,
        "id1\tLBL\tthe quick\t_\tbrown fox jumps\n",
    );

    assert_eq!(
        output,
        "LBL\tBOW-brown:1.0 BOW-fox:1.0 BOW-jumps:1.0 BOW-quick:1.0 BOW-the:1.0\n"
    );
}

#[test]
fn comp_weights_end_to_end() {
    let mut featuriser =
        Featuriser::new(vec![FeatureSet::Comp], ClusterConfig::default()).unwrap();
    let record = Record::parse("id1\tLBL\ta b c\t_\td e f").unwrap();
    let vector = featuriser.featurise(&record).unwrap();

    assert_eq!(vector.get("WEIGHTED-POSITIONAL-PRV-c"), Some(&1.0));
    assert_eq!(vector.get("WEIGHTED-POSITIONAL-PRV-PRV-b"), Some(&0.5));
    assert_eq!(vector.get("WEIGHTED-POSITIONAL-PRV-PRV-PRV-a"), Some(&0.25));
    assert_eq!(vector.get("WEIGHTED-POSITIONAL-NXT-NXT-e"), Some(&0.5));
}

#[test]
fn google_features_end_to_end() {
    let table = write_table("a\tC1:0.2\tC2:0.9\n");
    let config = ClusterConfig {
        phrase_clusters_path: Some(table.path().to_path_buf()),
        ..ClusterConfig::default()
    };

    let mut featuriser = Featuriser::new(vec![FeatureSet::Google], config).unwrap();
    let record = Record::parse("id1\tLBL\ta\t_\t").unwrap();
    let vector = featuriser.featurise(&record).unwrap();

    assert_eq!(vector.len(), 2);
    assert_eq!(vector.get("GOOGLE-PRV-C1"), Some(&0.2));
    assert_eq!(vector.get("GOOGLE-PRV-C2"), Some(&0.9));
}

#[test]
fn later_emission_overwrites_earlier() {
    // The same feature name emitted twice with different weights keeps the
    // last value, not the sum.
    let table = write_table("a\tC1:0.2\tC1:0.7\n");
    let config = ClusterConfig {
        phrase_clusters_path: Some(table.path().to_path_buf()),
        ..ClusterConfig::default()
    };

    let mut featuriser = Featuriser::new(vec![FeatureSet::Google], config).unwrap();
    let record = Record::parse("id1\tLBL\ta\t_\t").unwrap();
    let vector = featuriser.featurise(&record).unwrap();

    assert_eq!(vector.len(), 1);
    assert_eq!(vector.get("GOOGLE-PRV-C1"), Some(&0.7));
}

#[test]
fn one_table_load_across_records_and_feature_sets() {
    let table = write_table("001100\tquick\n001111\tfox\n");
    let mut config = ClusterConfig::default();
    config
        .brown_clusters_by_size
        .insert(4, table.path().to_path_buf());

    // Two feature-set entries referencing the same table identity.
    let mut featuriser = Featuriser::new(
        vec![FeatureSet::Brown(4), FeatureSet::Brown(4)],
        config,
    )
    .unwrap();

    let input = "id1\tA\tquick\t_\tfox\nid2\tB\tquick\t_\tfox\n";
    let output = run_to_string(&mut featuriser, input);

    assert_eq!(output.lines().count(), 2);
    assert_eq!(featuriser.cache().loads(), 1);
}

#[test]
fn brown_features_use_full_code() {
    let table = write_table("0011001100\tquick\n");
    let mut config = ClusterConfig::default();
    config
        .brown_clusters_by_size
        .insert(10, table.path().to_path_buf());

    let mut featuriser = Featuriser::new(vec![FeatureSet::Brown(10)], config).unwrap();
    let record = Record::parse("id1\tLBL\tquick\t_\t").unwrap();
    let vector = featuriser.featurise(&record).unwrap();

    // 10-bit code: prefix lengths 4, 6 and 10 pass, 20 does not; the single
    // merged feature carries the untruncated code.
    assert_eq!(vector.len(), 1);
    assert_eq!(vector.get("BROWN-10-PRV-0011001100"), Some(&1.0));
}

#[test]
fn empty_vectors_are_skipped_not_fatal() {
    let mut featuriser =
        Featuriser::new(vec![FeatureSet::Bow], ClusterConfig::default()).unwrap();

    // First record has no context at all, second is normal.
    let input = "id1\tA\t\t_\t\nid2\tB\tleft\t_\tright\n";
    let mut out = Vec::new();
    let stats = featuriser.run(input.as_bytes(), &mut out).unwrap();

    assert_eq!(stats.records, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.emitted, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "B\tBOW-left:1.0 BOW-right:1.0\n"
    );
}

#[test]
fn malformed_record_aborts_the_run() {
    let mut featuriser =
        Featuriser::new(vec![FeatureSet::Bow], ClusterConfig::default()).unwrap();

    let mut out = Vec::new();
    let err = featuriser
        .run("id1\tonly three\tcolumns\n".as_bytes(), &mut out)
        .unwrap_err();

    assert!(err.to_string().contains("line 1"));
}

#[test]
fn request_order_decides_merge_order() {
    // brown-4 and pubmed_brown-4 emit under the same name prefix; with the
    // same token mapped to the same code in both tables the later set wins,
    // which is only observable through the load order here, so check both
    // tables were consulted and the vector stays deduplicated.
    let wiki = write_table("001100\tquick\n");
    let pubmed = write_table("001100\tquick\n");
    let mut config = ClusterConfig::default();
    config
        .brown_clusters_by_size
        .insert(4, wiki.path().to_path_buf());
    config
        .pubmed_brown_clusters_by_size
        .insert(4, pubmed.path().to_path_buf());

    let mut featuriser = Featuriser::new(
        vec![FeatureSet::Brown(4), FeatureSet::PubmedBrown(4)],
        config,
    )
    .unwrap();
    let record = Record::parse("id1\tLBL\tquick\t_\t").unwrap();
    let vector = featuriser.featurise(&record).unwrap();

    assert_eq!(vector.len(), 1);
    assert_eq!(vector.get("BROWN-4-PRV-001100"), Some(&1.0));
    assert_eq!(featuriser.cache().loads(), 2);
}
