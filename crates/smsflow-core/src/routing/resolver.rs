/// Route resolver
use crate::constants::ROUTE_KEY_PREFIX;
use crate::error::RelayError;
use crate::models::RouteConfig;
use crate::routing::store::KeyValueStore;
use crate::utils::logging::redact_phone;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Store key of the route for a canonical destination number
pub fn route_key(destination: &str) -> String {
    format!("{}{}", ROUTE_KEY_PREFIX, destination)
}

pub struct RouteResolver {
    store: Arc<dyn KeyValueStore>,
}

impl RouteResolver {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Looks up the route of a canonical destination number.
    ///
    /// A missing key, a value that is not JSON and a JSON value that is not
    /// an object all mean "no route". Only a failing store read is an error.
    pub async fn get_route(&self, destination: &str) -> Result<Option<RouteConfig>, RelayError> {
        let key = route_key(destination);

        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(destination = %redact_phone(destination), "No route entry");
                return Ok(None);
            }
            Err(RelayError::RouteConfig(reason)) => {
                error!(destination = %redact_phone(destination), %reason, "Invalid route entry");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let value = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!(
                    destination = %redact_phone(destination),
                    error = %e,
                    "Route entry is not valid JSON"
                );
                return Ok(None);
            }
        };

        if !value.is_object() {
            error!(destination = %redact_phone(destination), "Route entry is not a JSON object");
            return Ok(None);
        }

        // Fields of the wrong type decode as absent and are rejected per mode
        match serde_json::from_value::<RouteConfig>(value) {
            Ok(route) => Ok(Some(route)),
            Err(e) => {
                error!(
                    destination = %redact_phone(destination),
                    error = %e,
                    "Route entry could not be read"
                );
                Ok(None)
            }
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}
