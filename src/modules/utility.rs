use itertools::Itertools;
use rusoto_dynamodb::AttributeValue;
use serde_json::{json, Value};
use std::{collections::HashMap, fs};
use super::error::LoaderError;

// read the whole file into memory, no streaming
pub fn read_file(filename: &str) -> Result<Vec<u8>, LoaderError> {
    fs::read(filename).map_err(|source| LoaderError::Input {
        path: filename.to_string(),
        source,
    })
}

// pretty-printed dump of a rejected batch write, shaped like the SDK's
// response metadata so it can be compared with the AWS console
pub fn render_response(status: u16, body: &[u8]) -> String {
    let body = match serde_json::from_slice::<Value>(body) {
        Ok(parsed) => parsed,
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    };

    let response = json!({
        "ResponseMetadata": {
            "HTTPStatusCode": status,
        },
        "Body": body,
    });

    serde_json::to_string_pretty(&response).unwrap_or_else(|_| response.to_string())
}

// serialise an item with its attributes sorted by name
pub fn format_item(item: &HashMap<String, AttributeValue>) -> String {
    let attributes: Vec<_> = item.iter().sorted_by(|x, y| x.0.cmp(y.0)).collect();
    serde_json::to_string(&attributes).unwrap_or_default()
}
