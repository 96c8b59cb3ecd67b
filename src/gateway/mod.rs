//! Resource gateways.
//!
//! Each gateway is a thin, borrowed view over a [`Client`] exposing list, get,
//! create, update and delete for one entity. Single items travel in a
//! `{"<entity>": {...}}` envelope and collections in `{"<entities>": [...]}`,
//! with keys taken from [`Entity`].
//!
//! ```ignore
//! let page = client.status_pages().get(&org, &"acme".into()).await?;
//! let services = client.services().list(&"acme".into()).await?;
//! ```

mod metrics;
mod services;
mod status_pages;

pub use metrics::Metrics;
pub use services::Services;
pub use status_pages::StatusPages;

use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::client::Client;
use crate::error::Error;
use crate::models::Entity;

/// The body the service returns for a successful delete.
pub const DELETED_BODY: &str = "\"\"";

impl Client {
    /// Status page operations.
    pub fn status_pages(&self) -> StatusPages<'_> {
        StatusPages::new(self)
    }

    /// Service operations.
    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }

    /// Metric operations.
    pub fn metrics(&self) -> Metrics<'_> {
        Metrics::new(self)
    }

    pub(crate) async fn fetch_one<T: Entity>(&self, url: Url) -> Result<T, Error> {
        let request = build(self.request(Method::GET, url))?;
        decode_single(&self.do_request(request).await?)
    }

    pub(crate) async fn fetch_all<T: Entity>(
        &self,
        request: reqwest::Request,
    ) -> Result<Vec<T>, Error> {
        decode_list(&self.do_request(request).await?)
    }

    pub(crate) async fn send_one<T: Entity>(
        &self,
        method: Method,
        url: Url,
        entity: &T,
    ) -> Result<T, Error> {
        let request = build(self.request(method, url).body(encode_single(entity)?))?;
        decode_single(&self.do_request(request).await?)
    }

    pub(crate) async fn remove(&self, url: Url) -> Result<(), Error> {
        let request = build(self.request(Method::DELETE, url))?;
        ensure_deleted(&self.do_request(request).await?)
    }
}

/// Finish a request. Nothing has been sent yet, so a failure here is an
/// [`Error::InvalidRequest`].
pub(crate) fn build(builder: RequestBuilder) -> Result<reqwest::Request, Error> {
    builder
        .build()
        .map_err(|e| Error::InvalidRequest(e.to_string()))
}

/// Wrap `entity` in its singular envelope and encode it.
pub fn encode_single<T: Entity>(entity: &T) -> Result<Vec<u8>, Error> {
    let mut envelope = Map::with_capacity(1);
    envelope.insert(T::SINGULAR.to_string(), serde_json::to_value(entity)?);
    Ok(serde_json::to_vec(&Value::Object(envelope))?)
}

/// Decode a singular envelope.
///
/// A body that is valid JSON but lacks the envelope key (or carries `null`
/// under it) is an [`Error::UnexpectedResponse`] with the body text.
pub fn decode_single<T: Entity>(body: &[u8]) -> Result<T, Error> {
    let mut envelope: Map<String, Value> = serde_json::from_slice(body)?;
    match envelope.remove(T::SINGULAR) {
        Some(Value::Null) | None => Err(unexpected(body)),
        Some(value) => Ok(T::deserialize(value)?),
    }
}

/// Decode a plural envelope, keeping server order.
///
/// A missing or `null` collection decodes as empty.
pub fn decode_list<T: Entity>(body: &[u8]) -> Result<Vec<T>, Error> {
    let mut envelope: Map<String, Value> = serde_json::from_slice(body)?;
    match envelope.remove(T::PLURAL) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(value) => Ok(Vec::<T>::deserialize(value)?),
    }
}

/// Check the body of a successful delete.
///
/// The service answers `""`; a zero-length body is accepted as well. Anything
/// else is an [`Error::UnexpectedResponse`] carrying the body.
pub fn ensure_deleted(body: &Bytes) -> Result<(), Error> {
    if body.is_empty() || body.as_ref() == DELETED_BODY.as_bytes() {
        Ok(())
    } else {
        Err(unexpected(body))
    }
}

fn unexpected(body: &[u8]) -> Error {
    Error::UnexpectedResponse(String::from_utf8_lossy(body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metric, MetricType, Service};
    use serde_json::json;

    #[test]
    fn test_encode_single_wraps_in_envelope() {
        let body = encode_single(&Service::new("API")).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["service"]["name"], json!("API"));
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_decode_single() {
        let metric: Metric =
            decode_single(br#"{"metric":{"id":3,"title":"Uptime","unit":"%","type":"up"}}"#)
                .unwrap();
        assert_eq!(metric.id, Some(3));
        assert_eq!(metric.metric_type, Some(MetricType::Uptime));
    }

    #[test]
    fn test_decode_single_missing_envelope() {
        let body = br#"{"errors":{"name":["can't be blank"]}}"#;
        match decode_single::<Service>(body) {
            Err(Error::UnexpectedResponse(text)) => assert!(text.contains("can't be blank")),
            other => panic!("expected UnexpectedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_single_malformed_json() {
        let result = decode_single::<Service>(b"<html>");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_decode_list_keeps_order_and_tolerates_null() {
        let services: Vec<Service> =
            decode_list(br#"{"services":[{"id":2,"name":"B"},{"id":1,"name":"A"}]}"#).unwrap();
        let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);

        assert!(decode_list::<Service>(br#"{"services":null}"#).unwrap().is_empty());
        assert!(decode_list::<Service>(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_build_failure_is_invalid_request() {
        let builder = reqwest::Client::new()
            .get("http://127.0.0.1:1/ping")
            .header("bad header\n", "value");
        let err = build(builder).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)), "got {:?}", err);
    }

    #[test]
    fn test_ensure_deleted() {
        assert!(ensure_deleted(&Bytes::from_static(b"\"\"")).is_ok());
        assert!(ensure_deleted(&Bytes::new()).is_ok());

        let err = ensure_deleted(&Bytes::from_static(br#"{"error":"in use"}"#)).unwrap_err();
        assert!(err.to_string().contains("in use"));
    }
}
