use serde::{ser::SerializeMap, Serialize, Serializer};

/// A requested field, either a plain field or a relationship with nested requested fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyNode {
    Leaf(String),
    Branch { name: String, children: Vec<KeyNode> },
}

impl KeyNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) => name,
            Self::Branch { name, .. } => name,
        }
    }

    /// Number of relationship hops below and including this node
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch { children, .. } => {
                1 + children.iter().map(KeyNode::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Serializes as `"name"` for leaves and `{"name": [children]}` for branches
impl Serialize for KeyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(name) => serializer.serialize_str(name),
            Self::Branch { name, children } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, children)?;
                map.end()
            }
        }
    }
}

/// Requested fields of the root model, siblings in first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyTree(pub Vec<KeyNode>);

impl KeyTree {
    pub fn nodes(&self) -> &[KeyNode] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.iter().map(KeyNode::depth).max().unwrap_or(0)
    }
}
