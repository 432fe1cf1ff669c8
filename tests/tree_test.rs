//! Tests for tree navigation, prediction and export

use rstest::{fixture, rstest};

use oaktree::domain::{build_tree, parse_dataset, DecisionTree, DomainError, TreeExport};

#[fixture]
fn lenses() -> DecisionTree {
    let content = std::fs::read_to_string("tests/resources/datasets/contact-lenses.data.txt")
        .expect("read dataset fixture");
    build_tree(&parse_dataset(&content).unwrap()).unwrap()
}

#[rstest]
fn given_any_node_when_walking_up_then_reaches_root(lenses: DecisionTree) {
    let root = lenses.root().unwrap();

    for (idx, _) in lenses.iter() {
        assert_eq!(lenses.root_of(idx), Some(root));
    }
}

#[rstest]
fn given_tree_when_iterating_then_visits_every_node_once_root_first(lenses: DecisionTree) {
    let visited: Vec<_> = lenses.iter().map(|(idx, _)| idx).collect();

    assert_eq!(visited.len(), lenses.count_nodes());
    assert_eq!(visited.first().copied(), lenses.root());
}

#[rstest]
fn given_leaf_when_building_path_then_lists_splits_from_root(lenses: DecisionTree) {
    let (idx, _) = lenses
        .iter()
        .find(|(_, n)| n.is_terminal() && n.subset.examples().len() == 6)
        .unwrap();

    assert_eq!(lenses.path_of(idx), "root > astigmatism=no > tear-rate=reduced");
    assert_eq!(lenses.path_of(lenses.root().unwrap()), "root");
}

#[rstest]
#[case(&["young", "myope", "no", "normal"], "soft")]
#[case(&["presbyopic", "myope", "no", "normal"], "none")]
#[case(&["presbyopic", "hypermetrope", "no", "normal"], "soft")]
#[case(&["young", "hypermetrope", "yes", "normal"], "hard")]
#[case(&["pre-presbyopic", "hypermetrope", "yes", "normal"], "none")]
#[case(&["young", "myope", "yes", "reduced"], "none")]
fn given_example_when_predicting_then_follows_splits(
    lenses: DecisionTree,
    #[case] values: &[&str],
    #[case] expected: &str,
) {
    assert_eq!(lenses.predict(values).unwrap(), expected);
}

#[rstest]
fn given_wrong_arity_when_predicting_then_error(lenses: DecisionTree) {
    let err = lenses.predict(&["young"]).unwrap_err();

    assert!(matches!(err, DomainError::ExampleArity { expected: 4, found: 1 }));
}

#[rstest]
fn given_unknown_value_when_predicting_then_error(lenses: DecisionTree) {
    let err = lenses.predict(&["young", "myope", "maybe", "normal"]).unwrap_err();

    assert!(matches!(err, DomainError::UnknownValue { ref attribute, .. } if attribute == "astigmatism"));
}

#[test]
fn given_empty_tree_when_predicting_then_error() {
    let tree = DecisionTree::new();

    assert!(matches!(tree.predict(&[]), Err(DomainError::EmptyTree)));
    assert_eq!(tree.count_nodes(), 0);
    assert_eq!(tree.depth(), 0);
    assert!(TreeExport::from_tree(&tree).is_none());
}

#[rstest]
fn given_tree_when_exporting_then_nested_copy_has_same_nodes(lenses: DecisionTree) {
    let export = TreeExport::from_tree(&lenses).unwrap();

    assert_eq!(export.count_nodes(), lenses.count_nodes());
    assert_eq!(export.label, "astigmatism");
    assert!(!export.terminal);
    assert_eq!(export.filter_value, "");
    assert_eq!(export.subset.examples, 24);
    assert_eq!(export.subset.target_counts, [4, 5, 15]);
    assert_eq!(export.children[0].filter_value, "no");
}

#[rstest]
fn given_export_when_serializing_then_json_has_node_fields(lenses: DecisionTree) {
    let export = TreeExport::from_tree(&lenses).unwrap();

    let json = serde_json::to_value(&export).unwrap();

    assert_eq!(json["label"], "astigmatism");
    assert_eq!(json["children"][1]["filter_value"], "yes");
    assert_eq!(json["children"][1]["children"][0]["label"], "none");
    assert_eq!(json["children"][1]["children"][0]["terminal"], true);
}

#[test]
fn given_small_tree_when_rendering_then_shows_splits_and_leaves() {
    let dataset = parse_dataset("2\nP,Q\n1\nA,2,x,y\n3\nx,P\ny,Q\ny,Q\n").unwrap();
    let tree = build_tree(&dataset).unwrap();

    let rendered = tree.to_tree_string().to_string();

    assert!(rendered.starts_with("A?"), "{rendered}");
    assert!(rendered.contains("[x] => P (1)"), "{rendered}");
    assert!(rendered.contains("[y] => Q (2)"), "{rendered}");
}
