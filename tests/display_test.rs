//! Rendering trees with termtree.

use ptree::util::testing;
use ptree::{DefaultTraits, DisplayConfig, PropertyTree, TreeDisplay, Value};

type Tree = PropertyTree<DefaultTraits<String, Value>>;

//      .
//      ├── server
//      │   ├── host = "localhost"
//      │   └── port = 8080
//      └── workers = 4
fn sample() -> Tree {
    testing::init_test_setup();
    let mut tree = Tree::new();
    let mut root = tree.root_mut();
    {
        let mut server = root.add_child("server".into());
        server.add_child_with_value("host".into(), Value::from("localhost"));
        server.add_child_with_value("port".into(), Value::UInt(8080));
    }
    root.add_child_with_value("workers".into(), Value::Int(4));
    tree
}

fn lines(tree: &Tree, config: &DisplayConfig) -> Vec<String> {
    tree.to_tree_string(config)
        .to_string()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn given_default_config_when_rendering_then_shows_keys_and_values() {
    let tree = sample();
    let rendered = lines(&tree, &DisplayConfig::default());
    println!("{}", rendered.join("\n"));

    assert_eq!(rendered.len(), 5);
    assert_eq!(rendered[0], ".");
    assert!(rendered[1].ends_with("server"));
    assert!(rendered[2].ends_with("host = \"localhost\""));
    assert!(rendered[3].ends_with("port = 8080"));
    assert!(rendered[4].ends_with("workers = 4"));
}

#[test]
fn given_values_hidden_when_rendering_then_shows_keys_only() {
    let tree = sample();
    let config = DisplayConfig {
        root_label: "config".into(),
        show_values: false,
        ..DisplayConfig::default()
    };
    let rendered = lines(&tree, &config);

    assert_eq!(rendered[0], "config");
    assert!(rendered[3].ends_with("port"));
    assert!(rendered.iter().all(|line| !line.contains('=')));
}

#[test]
fn given_max_depth_when_rendering_then_truncates_deeper_levels() {
    let tree = sample();
    let config = DisplayConfig {
        max_depth: Some(1),
        ..DisplayConfig::default()
    };
    let rendered = lines(&tree, &config);

    assert_eq!(rendered.len(), 3);
    assert!(rendered[1].ends_with("server"));
    assert!(rendered[2].ends_with("workers = 4"));
}

#[test]
fn given_subtree_when_rendering_then_starts_at_that_node() {
    let tree = sample();
    let server = tree.root_ref().child_node(&"server".into()).unwrap();

    let rendered: Vec<String> = server
        .to_tree_string(&DisplayConfig::default())
        .to_string()
        .lines()
        .map(str::to_string)
        .collect();

    assert_eq!(rendered.len(), 3);
    assert_eq!(rendered[0], "server");
}
