//! Query string -> `StructuredValue`.
//!
//! Key grammar (applied after percent-decoding the key):
//!
//! ```text
//! key     := name ( "." name | "[" inner "]" )*
//! inner   := ""        append to array
//!          | digits    array index (if <= array_limit)
//!          | anything  object key
//! ```
//!
//! Writes are applied in payload order and the last write to a path wins,
//! including when it changes the shape at that path.

use std::collections::BTreeMap;

use crate::error::DecodeError;

use super::percent::percent_decode;
use super::value::StructuredValue;

/// Bounds applied while building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum nesting below the root key (`a[b][c]` nests 2 levels).
    pub max_depth: usize,
    /// Largest bracket index still treated as an array position; bigger
    /// numbers become object keys.
    pub array_limit: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: 8,
            array_limit: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    Append,
}

/// Intermediate tree; arrays stay sparse until `finish`.
#[derive(Debug)]
enum Node {
    Scalar(String),
    Array(BTreeMap<usize, Node>),
    Object(BTreeMap<String, Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Scalar(String::new())
    }
}

impl Node {
    fn assign(self, path: &[Segment], value: String) -> Node {
        let Some((head, tail)) = path.split_first() else {
            return Node::Scalar(value);
        };

        match head {
            Segment::Key(key) => {
                let mut map = match self {
                    Node::Object(map) => map,
                    _ => BTreeMap::new(),
                };
                let child = map.remove(key).unwrap_or_default();
                map.insert(key.clone(), child.assign(tail, value));
                Node::Object(map)
            }
            Segment::Index(idx) => {
                let mut items = match self {
                    Node::Array(items) => items,
                    _ => BTreeMap::new(),
                };
                let child = items.remove(idx).unwrap_or_default();
                items.insert(*idx, child.assign(tail, value));
                Node::Array(items)
            }
            Segment::Append => {
                let mut items = match self {
                    Node::Array(items) => items,
                    _ => BTreeMap::new(),
                };
                let next = items.last_key_value().map_or(0, |(k, _)| k + 1);
                items.insert(next, Node::default().assign(tail, value));
                Node::Array(items)
            }
        }
    }

    fn finish(self) -> StructuredValue {
        match self {
            Node::Scalar(s) => StructuredValue::Scalar(s),
            Node::Array(items) => {
                StructuredValue::Array(items.into_values().map(Node::finish).collect())
            }
            Node::Object(map) => StructuredValue::Object(
                map.into_iter().map(|(k, v)| (k, v.finish())).collect(),
            ),
        }
    }
}

fn is_delim(c: char) -> bool {
    c == '.' || c == '['
}

fn bracket_segment(inner: &str, limits: &DecodeLimits) -> Segment {
    if inner.is_empty() {
        return Segment::Append;
    }
    if inner.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(idx) = inner.parse::<usize>() {
            if idx <= limits.array_limit {
                return Segment::Index(idx);
            }
        }
    }
    Segment::Key(inner.to_owned())
}

fn parse_key(key: &str, limits: &DecodeLimits) -> Result<Vec<Segment>, DecodeError> {
    let root_end = key.find(is_delim).unwrap_or(key.len());
    let (root, mut rest) = key.split_at(root_end);
    if root.is_empty() {
        return Err(DecodeError::EmptyKey { key: key.to_owned() });
    }

    let mut path = vec![Segment::Key(root.to_owned())];
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(is_delim).unwrap_or(after.len());
            let (name, tail) = after.split_at(end);
            if name.is_empty() {
                return Err(DecodeError::EmptyKey { key: key.to_owned() });
            }
            path.push(Segment::Key(name.to_owned()));
            rest = tail;
        } else if let Some(after) = rest.strip_prefix('[') {
            let Some((inner, tail)) = after.split_once(']') else {
                return Err(DecodeError::UnterminatedBracket { key: key.to_owned() });
            };
            path.push(bracket_segment(inner, limits));
            rest = tail;
        } else {
            return Err(DecodeError::MalformedKey { key: key.to_owned() });
        }

        if path.len() - 1 > limits.max_depth {
            return Err(DecodeError::TooDeep {
                key: key.to_owned(),
                max: limits.max_depth,
            });
        }
    }

    Ok(path)
}

/// Decode with default limits.
pub fn decode(payload: &[u8]) -> Result<StructuredValue, DecodeError> {
    decode_with(payload, &DecodeLimits::default())
}

/// Decode a urlencoded payload into a tree rooted at an object.
///
/// Empty input (and input made only of `&`) yields an empty object.
pub fn decode_with(payload: &[u8], limits: &DecodeLimits) -> Result<StructuredValue, DecodeError> {
    let mut root = Node::Object(BTreeMap::new());
    let mut offset = 0;

    for segment in payload.split(|&b| b == b'&') {
        let start = offset;
        offset += segment.len() + 1;
        if segment.is_empty() {
            continue;
        }

        let Some(eq) = segment.iter().position(|&b| b == b'=') else {
            return Err(DecodeError::MissingSeparator {
                segment: String::from_utf8_lossy(segment).into_owned(),
            });
        };
        let (raw_key, raw_value) = segment.split_at(eq);
        let raw_value = raw_value.get(1..).unwrap_or_default();

        let key = percent_decode(raw_key, start)?;
        let value = percent_decode(raw_value, start + eq + 1)?;
        let path = parse_key(&key, limits)?;

        root = root.assign(&path, value);
    }

    Ok(root.finish())
}
