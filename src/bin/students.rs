use clap::{CommandFactory, FromArgMatches};
use students::{Cli, DynamoStore, RecordClient, Result};

fn main() -> Result<()> {
    env_logger::init();
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let operations = cli.operations(&matches);

    let client = RecordClient::new(DynamoStore::connect(&cli.store_config())?);

    for operation in operations {
        println!("{}", operation.run(&client)?);
    }

    Ok(())
}
