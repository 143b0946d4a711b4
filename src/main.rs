use std::process::exit;
use modules::config::{get_arguments, Config, SUCCESS_MESSAGE};
use modules::dynamo::Dynamo;
use modules::error::LoaderError;
use modules::parser::load_records;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod modules;

#[tokio::main(basic_scheduler)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match get_arguments() {
        Ok(config) => upload(config).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(()) => println!("{}", SUCCESS_MESSAGE),
        Err(LoaderError::Write { response, .. }) => {
            println!("response: {}", response);
            exit(1);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            exit(1);
        }
    }
}

async fn upload(config: Config) -> Result<(), LoaderError> {
    info!(file = %config.filename, "reading export");
    let records = load_records(&config.filename)?;

    let mut client = Dynamo::new(&config)?;
    client.save_to_dynamo(&records).await?;
    Ok(())
}
