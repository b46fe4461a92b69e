//! Wire models for the Trove contributor endpoint
//!
//! The API is loose about shapes: ids and holdings arrive as strings or
//! numbers, `nucCode` as a string or a list, and children either as a list
//! or wrapped in `{"contributor": [...]}`. Everything is normalized here so
//! that [`OrgNode`] has a single shape.
//!
//! Records are decoded one field at a time so that a malformed value is
//! reported with the contributor id and the field name.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::flatten::{OrgNode, UNKNOWN_ID};

/// A string-or-number JSON value
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        }
    }
}

/// NUC code as a bare string or a list of codes
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// First code, or `None` when absent or empty
    fn first(self) -> Option<String> {
        let code = match self {
            OneOrMany::One(code) => code,
            OneOrMany::Many(codes) => codes.into_iter().next()?,
        };
        (!code.is_empty()).then_some(code)
    }
}

fn invalid_field(node_id: &str, field: &str, expected: &str) -> FetchError {
    FetchError::InvalidResponse(format!(
        "Contributor {} has invalid {}: expected {}",
        node_id, field, expected
    ))
}

/// Decode an optional field; `null` counts as absent
fn field<'a, T: Deserialize<'a>>(
    record: &'a Map<String, Value>,
    node_id: &str,
    name: &str,
    expected: &str,
) -> Result<Option<T>, FetchError> {
    match record.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|_| invalid_field(node_id, name, expected)),
    }
}

/// Child records, bare or wrapped in `{"contributor": [...]}`
fn child_records<'a>(
    record: &'a Map<String, Value>,
    node_id: &str,
) -> Result<&'a [Value], FetchError> {
    let list = match record.get("children") {
        None | Some(Value::Null) => return Ok(&[]),
        Some(Value::Object(wrapper)) => wrapper.get("contributor"),
        Some(other) => Some(other),
    };

    match list {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        _ => Err(invalid_field(
            node_id,
            "children",
            "a list or {\"contributor\": [...]}",
        )),
    }
}

// Nesting is already bounded by serde_json's recursion limit
fn to_node(value: &Value, parent_id: Option<&str>) -> Result<OrgNode, FetchError> {
    let record = value.as_object().ok_or_else(|| {
        FetchError::InvalidResponse(match parent_id {
            Some(id) => format!("Child of contributor {} is not an object", id),
            None => "Top-level contributor entry is not an object".to_string(),
        })
    })?;

    let id = field::<Scalar>(record, UNKNOWN_ID, "id", "a string or number")?
        .map(Scalar::into_string);
    let node_id = id.as_deref().unwrap_or(UNKNOWN_ID);

    let name = field::<String>(record, node_id, "name", "a string")?;
    let total_holdings =
        field::<Scalar>(record, node_id, "totalHoldings", "a string or number")?
            .map(Scalar::into_string);
    let nuc_code =
        field::<OneOrMany>(record, node_id, "nucCode", "a string or list of strings")?
            .and_then(OneOrMany::first);
    let children = child_records(record, node_id)?
        .iter()
        .map(|child| to_node(child, Some(node_id)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrgNode {
        id,
        name,
        total_holdings,
        nuc_code,
        children,
    })
}

/// Parse the root contributor list out of a raw API response body.
///
/// Accepts `{"contributor": [...]}`, `{"response": {"contributor": [...]}}`
/// or a bare array.
pub fn parse_contributors(body: &Value) -> Result<Vec<OrgNode>, FetchError> {
    let listing = body
        .get("contributor")
        .or_else(|| body.get("response").and_then(|r| r.get("contributor")))
        .or_else(|| body.is_array().then_some(body))
        .ok_or_else(|| {
            FetchError::InvalidResponse("Response is not a contributor listing".to_string())
        })?;

    let records = listing.as_array().ok_or_else(|| {
        FetchError::InvalidResponse("Contributor listing is not a list".to_string())
    })?;

    records.iter().map(|record| to_node(record, None)).collect()
}
