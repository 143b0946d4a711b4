use chrono::Utc;
use rusoto_core::RusotoError;
use rusoto_dynamodb::{BatchWriteItemError, BatchWriteItemInput, BatchWriteItemOutput, DynamoDb,
    DynamoDbClient, WriteRequest};
use std::{collections::HashMap, fs::File, io::{BufWriter, Write}};
use tracing::{debug, info, warn};
use super::config::{Config, BATCH_SIZE, LOG_FILE_NAME};
use super::error::LoaderError;
use super::parser::{build_write_request, Record};
use super::utility::{format_item, render_response};

// consumed capacity and item collection metrics are not needed
const RETURN_NONE: &str = "NONE";

pub struct Dynamo {
    client: DynamoDbClient,
    table_name: String,
    logger: Option<BufWriter<File>>,
}

impl Dynamo {

    pub fn new(config: &Config) -> Result<Dynamo, LoaderError> {
        let mut dynamo = Dynamo::with_client(
            DynamoDbClient::new(config.region.clone()),
            &config.table_name,
        );

        if config.enable_log {
            dynamo.logger = Some(BufWriter::new(File::create(LOG_FILE_NAME)?));
            info!("requests will be logged to {}", LOG_FILE_NAME);
        }

        Ok(dynamo)
    }

    pub fn with_client(client: DynamoDbClient, table_name: &str) -> Dynamo {
        Dynamo {
            client,
            table_name: table_name.to_owned(),
            logger: None,
        }
    }

    // save all records into dynamoDB, one batch after another
    // the first failure stops the run; earlier batches stay written
    pub async fn save_to_dynamo(&mut self, records: &[Record]) -> Result<usize, LoaderError> {
        info!(
            items = records.len(),
            batches = batch_count(records.len()),
            table = %self.table_name,
            "starting batch upload"
        );

        let result = self.all_batch_write(records).await;
        let flushed = self.flush_log();
        let written = result?;
        flushed?;

        info!(items = written, "batch upload finished");
        Ok(written)
    }

    async fn all_batch_write(&mut self, records: &[Record]) -> Result<usize, LoaderError> {
        let mut written = 0;

        for (i, batch) in records.chunks(BATCH_SIZE).enumerate() {
            self.batch_write(i + 1, batch).await?;
            written += batch.len();
        }

        Ok(written)
    }

    // one batch write, 25 records at most
    async fn batch_write(&mut self, batch: usize, records: &[Record]) -> Result<(), LoaderError> {
        let write_requests: Vec<WriteRequest> = records.iter().map(build_write_request).collect();

        let mut request_items = HashMap::new();
        request_items.insert(self.table_name.to_owned(), write_requests.clone());

        let input = BatchWriteItemInput {
            request_items,
            return_consumed_capacity: Some(RETURN_NONE.to_string()),
            return_item_collection_metrics: Some(RETURN_NONE.to_string()),
        };

        debug!(batch, items = records.len(), "sending batch write");

        match self.client.batch_write_item(input).await {
            Ok(output) => {
                self.log_requests(batch, &write_requests, None)?;
                report_unprocessed(batch, &output);
                Ok(())
            }
            Err(error) => {
                let error = classify_error(batch, error);
                self.log_requests(batch, &write_requests, Some(&error))?;
                Err(error)
            }
        }
    }

    // save a batch of requests to the log file
    fn log_requests(
        &mut self,
        batch: usize,
        requests: &[WriteRequest],
        error: Option<&LoaderError>,
    ) -> Result<(), LoaderError> {
        let logger = match self.logger.as_mut() {
            Some(logger) => logger,
            None => return Ok(()),
        };

        let request_result = match error {
            None => "Success",
            Some(_) => "Failure",
        };

        writeln!(logger, "{} batch {} -> {}", Utc::now().to_rfc3339(), batch, self.table_name)?;

        for request in requests {
            if let Some(put_request) = &request.put_request {
                writeln!(logger, "{}: {}", request_result, format_item(&put_request.item))?;
            }
        }

        if let Some(error) = error {
            writeln!(logger, "Error message: {}", error)?;
            if let LoaderError::Write { response, .. } = error {
                writeln!(logger, "{}", response)?;
            }
        }

        writeln!(logger, "=====")?;
        Ok(())
    }

    fn flush_log(&mut self) -> Result<(), LoaderError> {
        if let Some(logger) = self.logger.as_mut() {
            logger.flush()?;
        }
        Ok(())
    }
}

pub fn batch_count(items: usize) -> usize {
    (items + BATCH_SIZE - 1) / BATCH_SIZE
}

// a response the client could not classify carries the raw status and body;
// everything else (dispatch, credentials, typed service faults) is transport
fn classify_error(batch: usize, error: RusotoError<BatchWriteItemError>) -> LoaderError {
    match error {
        RusotoError::Unknown(response) => {
            let status = response.status.as_u16();
            LoaderError::Write {
                batch,
                status,
                response: render_response(status, &response.body),
            }
        }
        other => LoaderError::Transport {
            batch,
            message: other.to_string(),
        },
    }
}

// unprocessed items are reported but never resubmitted
fn report_unprocessed(batch: usize, output: &BatchWriteItemOutput) {
    let unprocessed: usize = output
        .unprocessed_items
        .as_ref()
        .map(|tables| tables.values().map(Vec::len).sum())
        .unwrap_or(0);

    if unprocessed > 0 {
        warn!(batch, unprocessed, "service left items unprocessed, they are not retried");
    }
}
