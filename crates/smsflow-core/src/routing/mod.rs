/// Route lookup: key-value store access and route resolution
pub mod resolver;
pub mod store;

pub use resolver::{RouteResolver, route_key};
pub use store::{DynamoDbKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
