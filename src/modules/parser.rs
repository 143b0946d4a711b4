use rusoto_dynamodb::{AttributeValue, PutRequest, WriteRequest};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use super::config::{RECORD_FIELDS, STRING_TAG};
use super::error::LoaderError;
use super::utility::read_file;

// top level of a DynamoDB JSON export
#[derive(Deserialize)]
struct ExportDocument {
    #[serde(rename = "Items")]
    items: Vec<Map<String, Value>>,
}

/// A flattened item: the four exported attributes as plain strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
}

impl Record {
    // attributes in RECORD_FIELDS order
    fn values(&self) -> [&str; 4] {
        [&self.id, &self.url, &self.title, &self.summary]
    }
}

// read the export, then flatten every item before anything is uploaded
pub fn load_records(filename: &str) -> Result<Vec<Record>, LoaderError> {
    let content = read_file(filename)?;
    parse_export(filename, &content)
}

pub fn parse_export(filename: &str, content: &[u8]) -> Result<Vec<Record>, LoaderError> {
    let document: ExportDocument =
        serde_json::from_slice(content).map_err(|source| LoaderError::Json {
            path: filename.to_string(),
            source,
        })?;

    document
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| project_item(index, item))
        .collect()
}

// keep id, url, title and summary; other attributes are dropped
fn project_item(index: usize, item: &Map<String, Value>) -> Result<Record, LoaderError> {
    let [id, url, title, summary] = RECORD_FIELDS;

    Ok(Record {
        id: string_attr(index, item, id)?,
        url: string_attr(index, item, url)?,
        title: string_attr(index, item, title)?,
        summary: string_attr(index, item, summary)?,
    })
}

// unwrap {"S": "<value>"}; other type tags are not interpreted
fn string_attr(
    index: usize,
    item: &Map<String, Value>,
    field: &'static str,
) -> Result<String, LoaderError> {
    let attribute = item.get(field).ok_or(LoaderError::Schema {
        index,
        field,
        reason: "missing attribute",
    })?;

    attribute
        .get(STRING_TAG)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(LoaderError::Schema {
            index,
            field,
            reason: "missing \"S\" string value for",
        })
}

// build a single put request for a record
pub fn build_write_request(record: &Record) -> WriteRequest {
    let mut item = HashMap::new();

    for (name, value) in RECORD_FIELDS.iter().zip(record.values().iter()) {
        item.insert(name.to_string(), build_string_attr(value.to_string()));
    }

    WriteRequest {
        put_request: Some(PutRequest { item }),
        ..Default::default()
    }
}

fn build_string_attr(text: String) -> AttributeValue {
    AttributeValue {
        s: Some(text),
        ..Default::default()
    }
}
