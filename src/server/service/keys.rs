//! Key paths extracted from templates.
//!
//! A template key is a space separated path of field names, e.g. `partner_id country_id name`.
//! [`parse_keys`] groups keys sharing a prefix under one [`KeyNode::Branch`].

use crate::server::model::key_tree::{KeyNode, KeyTree};

/// Intermediate node, children keep first-seen order
struct PathNode {
    name: String,
    children: Vec<PathNode>,
}

impl PathNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    fn insert(nodes: &mut Vec<PathNode>, segments: &[&str]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };

        let index = match nodes.iter().position(|node| node.name == *first) {
            Some(index) => index,
            None => {
                nodes.push(PathNode::new(first));
                nodes.len() - 1
            }
        };

        Self::insert(&mut nodes[index].children, rest);
    }

    fn fold(self) -> KeyNode {
        if self.children.is_empty() {
            KeyNode::Leaf(self.name)
        } else {
            KeyNode::Branch {
                name: self.name,
                children: self.children.into_iter().map(PathNode::fold).collect(),
            }
        }
    }
}

/// Builds the key tree of flat keys
///
/// Duplicate & empty keys are ignored. A name used both as a leaf and as a prefix of longer
/// keys becomes a branch.
pub fn parse_keys<S: AsRef<str>>(keys: &[S]) -> KeyTree {
    let mut roots = Vec::new();

    for key in keys {
        let segments: Vec<&str> = key
            .as_ref()
            .split(' ')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        PathNode::insert(&mut roots, &segments);
    }

    KeyTree(roots.into_iter().map(PathNode::fold).collect())
}

/// Reads the keys written by the key extraction job
///
/// The job writes a JSON array of strings; any other content is read as one key per line.
pub fn parse_key_list(content: &str) -> Vec<String> {
    let content = content.trim_start_matches('\u{feff}').trim();

    if let Ok(keys) = serde_json::from_str::<Vec<String>>(content) {
        return keys;
    }

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::server::{
        model::key_tree::KeyNode,
        service::keys::{parse_key_list, parse_keys},
    };

    fn leaf(name: &str) -> KeyNode {
        KeyNode::Leaf(name.to_string())
    }

    /// Expect sibling keys to be grouped under their shared prefix in first-seen order
    #[test]
    fn groups_keys_by_prefix() {
        let tree = parse_keys(&["partner name", "partner city", "date"]);

        assert_eq!(
            tree.nodes(),
            &[
                KeyNode::Branch {
                    name: "partner".to_string(),
                    children: vec![leaf("name"), leaf("city")],
                },
                leaf("date"),
            ]
        );
    }

    #[test]
    fn serializes_as_names_and_branch_objects() {
        let tree = parse_keys(&["partner name", "partner country code", "date"]);

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!([{"partner": ["name", {"country": ["code"]}]}, "date"])
        );
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn ignores_duplicate_and_empty_keys() {
        let tree = parse_keys(&["name", "", "  ", "name", "partner  name"]);

        assert_eq!(
            tree.nodes(),
            &[
                leaf("name"),
                KeyNode::Branch {
                    name: "partner".to_string(),
                    children: vec![leaf("name")],
                },
            ]
        );
    }

    /// Expect a name requested alone & as a prefix to keep its nested keys
    #[test]
    fn prefix_wins_over_leaf() {
        let tree = parse_keys(&["partner", "partner name"]);

        assert_eq!(
            tree.nodes(),
            &[KeyNode::Branch {
                name: "partner".to_string(),
                children: vec![leaf("name")],
            }]
        );
    }

    #[test]
    fn parses_json_key_list() {
        let keys = parse_key_list("\u{feff}[\"partner name\", \"date\"]\n");

        assert_eq!(keys, vec!["partner name", "date"]);
    }

    #[test]
    fn falls_back_to_one_key_per_line() {
        let keys = parse_key_list("partner name\r\n\r\ndate\n");

        assert_eq!(keys, vec!["partner name", "date"]);
    }
}
