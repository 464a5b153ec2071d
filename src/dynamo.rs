use std::collections::HashMap;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::AttributeValue as SdkValue;
use aws_sdk_dynamodb::Client;
use log::{debug, info, warn};
use tokio::runtime::{Builder, Runtime};

use crate::item::{AttributeValue, Item, StoreResponse};
use crate::store::ItemStore;
use crate::{Result, StudentsError};

/// Where and as whom the session connects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

/// One authenticated DynamoDB session.
///
/// The SDK is async, so the store owns a current-thread runtime and blocks on
/// every request. The client is built once in [`DynamoStore::connect`].
#[derive(Debug)]
pub struct DynamoStore {
    runtime: Runtime,
    client: Client,
}

impl DynamoStore {
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = runtime.block_on(loader.load());

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        info!(
            "DynamoDB session opened (profile: {}, region: {})",
            config.profile.as_deref().unwrap_or("<default>"),
            sdk_config
                .region()
                .map(|region| region.as_ref())
                .unwrap_or("<unset>")
        );

        Ok(Self {
            runtime,
            client: Client::from_conf(builder.build()),
        })
    }
}

impl ItemStore for DynamoStore {
    fn get_item(&self, table: &str, key: &Item, attributes: &[&str]) -> Result<StoreResponse> {
        debug!("GetItem {} {:?}", table, key);
        let request = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(to_sdk_item(key)))
            .set_attributes_to_get(Some(attributes.iter().map(|a| a.to_string()).collect()))
            .send();

        match self.runtime.block_on(request) {
            Ok(output) => {
                let item = output.item().map(from_sdk_item).transpose()?;
                Ok(StoreResponse::with_item(item))
            }
            Err(err) => answered_with_status("GetItem", err),
        }
    }

    fn put_item(&self, table: &str, item: Item) -> Result<StoreResponse> {
        debug!("PutItem {} {:?}", table, item);
        let request = self
            .client
            .put_item()
            .table_name(table)
            .set_item(Some(to_sdk_item(&item)))
            .send();

        match self.runtime.block_on(request) {
            Ok(_) => Ok(StoreResponse::ok()),
            Err(err) => answered_with_status("PutItem", err),
        }
    }

    fn delete_item(&self, table: &str, key: &Item) -> Result<StoreResponse> {
        debug!("DeleteItem {} {:?}", table, key);
        let request = self
            .client
            .delete_item()
            .table_name(table)
            .set_key(Some(to_sdk_item(key)))
            .send();

        match self.runtime.block_on(request) {
            Ok(_) => Ok(StoreResponse::ok()),
            Err(err) => answered_with_status("DeleteItem", err),
        }
    }
}

/// A service error still carries the HTTP status the store answered with.
/// Anything that never got a response is a transport failure.
fn answered_with_status<E>(call: &str, err: SdkError<E, HttpResponse>) -> Result<StoreResponse>
where
    E: std::error::Error + 'static,
{
    match err.raw_response().map(|raw| raw.status().as_u16()) {
        Some(status) => {
            warn!("{} answered {}: {}", call, status, DisplayErrorContext(&err));
            Ok(StoreResponse::status(status))
        }
        None => Err(StudentsError::Transport(
            DisplayErrorContext(&err).to_string(),
        )),
    }
}

fn to_sdk_item(item: &Item) -> HashMap<String, SdkValue> {
    item.iter()
        .map(|(name, value)| {
            let value = match value {
                AttributeValue::S(s) => SdkValue::S(s.clone()),
                AttributeValue::N(n) => SdkValue::N(n.clone()),
                AttributeValue::Bool(b) => SdkValue::Bool(*b),
                AttributeValue::Null => SdkValue::Null(true),
            };
            (name.clone(), value)
        })
        .collect()
}

fn from_sdk_item(item: &HashMap<String, SdkValue>) -> Result<Item> {
    item.iter()
        .map(|(name, value)| {
            let value = match value {
                SdkValue::S(s) => AttributeValue::S(s.clone()),
                SdkValue::N(n) => AttributeValue::N(n.clone()),
                SdkValue::Bool(b) => AttributeValue::Bool(*b),
                SdkValue::Null(_) => AttributeValue::Null,
                _ => return Err(StudentsError::UnsupportedAttribute(name.clone())),
            };
            Ok((name.clone(), value))
        })
        .collect()
}
