use clap::{clap_app, ArgMatches};
use rusoto_core::Region;
use super::error::LoaderError;

pub struct Config {
    pub filename: String,
    pub table_name: String,
    pub region: Region,
    pub enable_log: bool,
}

pub const LOG_FILE_NAME: &str = "batch_write_logs.txt";
pub const SUCCESS_MESSAGE: &str = "successful batch upload";

// max items in one BatchWriteItem request
pub const BATCH_SIZE: usize = 25;

// attributes kept from every exported item, in output order
pub const RECORD_FIELDS: [&str; 4] = ["id", "url", "title", "summary"];
pub const STRING_TAG: &str = "S";

pub fn get_arguments() -> Result<Config, LoaderError> {
    let matches = clap_app!(x =>
        (name: "JSON_To_DynamoDB")
        (version: "0.1.0")
        (author: "Devin (github.com/devin-git)")
        (about: "Upload a DynamoDB JSON export (Items of id/url/title/summary) into a table, 25 items per batch")
        (@arg FILENAME: +required "Provide the exported JSON filename")
        (@arg TABLE: +required "Specify DynamoDB table name")
        (@arg REGION: -r --region +takes_value "Specify AWS region. E.g. ap-southeast-2, us-west-1. Default: AWS_DEFAULT_REGION / AWS_REGION")
        (@arg ENDPOINT: -e --endpoint +takes_value "Use a custom endpoint, e.g. http://localhost:8000 for DynamoDB Local")
        (@arg NO_LOG: -n --nolog "Do not log requests and error messages")
    )
    .get_matches();

    config_from_matches(&matches)
}

fn config_from_matches(matches: &ArgMatches) -> Result<Config, LoaderError> {
    let region = parse_region(matches.value_of("REGION"), matches.value_of("ENDPOINT"))?;

    Ok(Config {
        filename: matches.value_of("FILENAME").unwrap_or_default().to_string(),
        table_name: matches.value_of("TABLE").unwrap_or_default().to_string(),
        region,
        enable_log: !matches.is_present("NO_LOG"),
    })
}

// an endpoint keeps the region name for request signing
pub fn parse_region(region: Option<&str>, endpoint: Option<&str>) -> Result<Region, LoaderError> {
    let region = match region {
        Some(name) => name
            .parse::<Region>()
            .map_err(|_| LoaderError::Region(name.to_string()))?,
        None => Region::default(),
    };

    Ok(match endpoint {
        Some(endpoint) => Region::Custom {
            name: region.name().to_string(),
            endpoint: endpoint.to_string(),
        },
        None => region,
    })
}
