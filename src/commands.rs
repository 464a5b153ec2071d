use clap::{ArgMatches, Parser};

use crate::dynamo::StoreConfig;
use crate::record::RecordClient;
use crate::response::Response;
use crate::store::ItemStore;
use crate::Result;

const GET_ITEM_BY_ID: &str = "get-item-by-id";
const CREATE_OR_UPDATE: &str = "create-or-update";
const DELETE_ITEM_BY_ID: &str = "delete-item-by-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetItemById(String),
    CreateOrUpdate(String),
    DeleteItemById(String),
}

impl Operation {
    pub fn run<S: ItemStore>(&self, client: &RecordClient<S>) -> Result<Response> {
        match self {
            Operation::GetItemById(id) => client.fetch(id).map(Response::Record),
            Operation::CreateOrUpdate(payload) => client.upsert(payload).map(Response::Marker),
            Operation::DeleteItemById(id) => client.remove(id).map(Response::Marker),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Print the student with this id
    #[clap(
        long = "get-item-by-id",
        name = "get-item-by-id",
        value_name = "ID",
        allow_hyphen_values = true
    )]
    pub get_item_by_id: Vec<String>,
    /// Create or overwrite a student from a JSON object
    #[clap(
        long = "create-or-update",
        name = "create-or-update",
        value_name = "JSON",
        allow_hyphen_values = true
    )]
    pub create_or_update: Vec<String>,
    /// Delete the student with this id
    #[clap(
        long = "delete-item-by-id",
        name = "delete-item-by-id",
        value_name = "ID",
        allow_hyphen_values = true
    )]
    pub delete_item_by_id: Vec<String>,
    /// Named AWS profile to open the session with
    #[clap(long, env = "STUDENTS_PROFILE")]
    pub profile: Option<String>,
    /// Region override for the session
    #[clap(long, env = "STUDENTS_REGION")]
    pub region: Option<String>,
    /// Endpoint override, e.g. a DynamoDB Local URL
    #[clap(long, env = "STUDENTS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

impl Cli {
    /// Operations in the order their flags appeared on the command line.
    pub fn operations(&self, matches: &ArgMatches) -> Vec<Operation> {
        let mut ordered = Vec::new();
        let flags: [(&str, &Vec<String>, fn(String) -> Operation); 3] = [
            (GET_ITEM_BY_ID, &self.get_item_by_id, Operation::GetItemById),
            (CREATE_OR_UPDATE, &self.create_or_update, Operation::CreateOrUpdate),
            (DELETE_ITEM_BY_ID, &self.delete_item_by_id, Operation::DeleteItemById),
        ];

        for (flag, values, operation) in flags {
            if let Some(indices) = matches.indices_of(flag) {
                for (index, value) in indices.zip(values) {
                    ordered.push((index, operation(value.clone())));
                }
            }
        }

        ordered.sort_by_key(|(index, _)| *index);
        ordered.into_iter().map(|(_, operation)| operation).collect()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            profile: self.profile.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}
