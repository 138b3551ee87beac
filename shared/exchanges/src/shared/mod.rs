pub mod deserializers;
pub mod http;
pub mod serializers;
