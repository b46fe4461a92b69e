//! Contributor tree flattening
//!
//! Converts the nested contributor hierarchy into an ordered list of flat
//! records. Each child record gets a parent link and a name qualified by
//! its ancestors, e.g. "Adelaide City Libraries" → "City Library" becomes
//! "Adelaide City Libraries City Library".
//!
//! Traversal uses an explicit stack rather than recursion, so the depth of
//! the input tree is bounded only by memory. Output is always pre-order:
//! a record precedes the records of all its descendants, and siblings keep
//! their input order.

use serde::Serialize;

use crate::error::FlattenError;

/// Placeholder used in errors when a node has no usable id
pub(crate) const UNKNOWN_ID: &str = "unknown";

/// One contributor as received from the API, after input normalization.
///
/// Required fields are optional here so that missing values can be reported
/// with the offending node and field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgNode {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Holdings count as received; parsed during flattening
    pub total_holdings: Option<String>,
    /// First NUC code of the contributor, if any
    pub nuc_code: Option<String>,
    pub children: Vec<OrgNode>,
}

/// One row of the flattened contributor table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRecord {
    pub id: String,
    pub name: String,
    pub total_items: u64,
    pub parent_id: Option<String>,
    pub nuc_code: Option<String>,
}

/// Identity of an already-flattened parent, carrying its resolved name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentContext {
    pub id: String,
    pub name: String,
}

/// Borrowed view of a parent used while building records
#[derive(Clone, Copy)]
struct ParentRef<'a> {
    id: &'a str,
    name: &'a str,
}

impl<'a> From<&'a ParentContext> for ParentRef<'a> {
    fn from(parent: &'a ParentContext) -> Self {
        Self {
            id: &parent.id,
            name: &parent.name,
        }
    }
}

impl<'a> From<&'a FlatRecord> for ParentRef<'a> {
    fn from(record: &'a FlatRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
        }
    }
}

/// Flatten a contributor and all of its descendants.
///
/// The first record belongs to `node`; the rest are its descendants in
/// depth-first, left-to-right order. Any structural defect aborts the whole
/// call.
pub fn flatten(
    node: &OrgNode,
    parent: Option<&ParentContext>,
) -> Result<Vec<FlatRecord>, FlattenError> {
    let mut records = vec![build_record(node, parent.map(ParentRef::from))?];

    // (node, index of its parent's record)
    let mut stack: Vec<(&OrgNode, usize)> =
        node.children.iter().rev().map(|c| (c, 0)).collect();

    while let Some((current, parent_index)) = stack.pop() {
        let record = build_record(current, Some(ParentRef::from(&records[parent_index])))?;
        let index = records.len();
        records.push(record);

        stack.extend(current.children.iter().rev().map(|c| (c, index)));
    }

    Ok(records)
}

/// Flatten every root contributor, concatenating results in root order
pub fn flatten_all(roots: &[OrgNode]) -> Result<Vec<FlatRecord>, FlattenError> {
    let mut records = Vec::new();
    for root in roots {
        records.extend(flatten(root, None)?);
    }
    Ok(records)
}

/// Count a tree's nodes, including the root
pub fn count_nodes(node: &OrgNode) -> usize {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        count += 1;
        stack.extend(current.children.iter());
    }
    count
}

/// Combine a child name with its resolved parent name.
///
/// Names that already start with the parent name are kept as-is, since the
/// source often embeds the ancestor chain itself. The comparison is exact.
pub fn resolve_name(name: &str, parent_name: Option<&str>) -> String {
    match parent_name {
        Some(parent_name) if !name.starts_with(parent_name) => format!("{parent_name} {name}"),
        _ => name.to_string(),
    }
}

fn build_record(node: &OrgNode, parent: Option<ParentRef<'_>>) -> Result<FlatRecord, FlattenError> {
    let id = required(node, node.id.as_deref(), "id")?;
    let name = required(node, node.name.as_deref(), "name")?;
    let holdings = required(node, node.total_holdings.as_deref(), "totalHoldings")?;

    let total_items = holdings.parse::<u64>().map_err(|e| FlattenError::Parse {
        node_id: id.to_string(),
        value: holdings.to_string(),
        reason: e.to_string(),
    })?;

    Ok(FlatRecord {
        id: id.to_string(),
        name: resolve_name(name, parent.map(|p| p.name)),
        total_items,
        parent_id: parent.map(|p| p.id.to_string()),
        nuc_code: node.nuc_code.clone().filter(|code| !code.is_empty()),
    })
}

fn required<'a>(
    node: &OrgNode,
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, FlattenError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FlattenError::MissingField {
            node_id: node
                .id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| UNKNOWN_ID.to_string()),
            field,
        }),
    }
}
