use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, Entity};
use crate::types::ResourceId;

/// `webhook_monitoring_service` value that enables
/// [`WebhookCustomJsonpathSettings`].
pub const CUSTOM_JSONPATH_SERVICE: &str = "custom-jsonpath";

/// How the service's status is monitored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Monitoring {
    /// No monitoring. Sent as `""`.
    #[serde(rename = "")]
    Disabled,
    /// StatusPal polls the service itself.
    #[serde(rename = "internal")]
    Internal,
    /// Status comes from a third-party status page.
    #[serde(rename = "3rd_party")]
    ThirdParty,
    /// Status is pushed to an incoming webhook.
    #[serde(rename = "webhook")]
    Webhook,
    /// A mode this crate does not know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Monitoring {
    /// Whether [`MonitoringOptions`] apply to this mode.
    pub fn accepts_options(&self) -> bool {
        matches!(self, Self::Internal | Self::ThirdParty)
    }
}

/// Matcher for webhook payloads when `webhook_monitoring_service` is
/// [`CUSTOM_JSONPATH_SERVICE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookCustomJsonpathSettings {
    /// JSONPath expression evaluated against the payload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub jsonpath: String,
    /// Value the expression must produce for the service to be up.
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_result: String,
}

/// A header sent with internal monitoring requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringOptionsHeader {
    /// Header name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    /// Header value.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// Monitoring configuration for internal and third-party monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringOptions {
    /// HTTP method used by internal monitoring, e.g. `HEAD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Headers sent with every monitoring request.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub headers: Vec<MonitoringOptionsHeader>,
    /// Keyword marking the service as down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_down: Option<String>,
    /// Keyword marking the service as up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_up: Option<String>,
    /// Third-party statuses mapped onto this service.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub external_service_statuses: Vec<String>,
}

/// Localized strings of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTranslation {
    /// Localized name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Localized description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

/// A monitored component shown on a status page.
///
/// Services form a tree through `parent_id` / `children_ids`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Server-assigned id. Read-only.
    #[serde(skip_serializing)]
    pub id: Option<i64>,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Public description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Description only visible to team members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_description: Option<String>,
    /// Parent service, `None` for a root service.
    ///
    /// Always sent, so clearing it detaches the service from its parent.
    pub parent_id: Option<i64>,
    /// Type of the incident currently affecting the service. Read-only.
    #[serde(skip_serializing)]
    pub current_incident_type: Option<String>,
    /// Monitoring mode. Governs which nested monitoring records are sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<Monitoring>,
    /// Webhook provider, e.g. `status-cake`, `uptime-robot` or
    /// [`CUSTOM_JSONPATH_SERVICE`]. Only meaningful for webhook monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_monitoring_service: Option<String>,
    /// Payload matcher for custom JSONPath webhooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_custom_jsonpath_settings: Option<WebhookCustomJsonpathSettings>,
    /// Read-only.
    #[serde(skip_serializing)]
    pub inbound_email_address: Option<String>,
    /// Read-only.
    #[serde(skip_serializing)]
    pub incoming_webhook_url: Option<String>,
    /// URL polled every minute by internal monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_url: Option<String>,
    /// Incident type (`minor`/`major`) used when monitoring opens an incident.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_type: Option<String>,
    /// Incident type applied to the parent when monitoring opens an incident.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_incident_type: Option<String>,
    /// Read-only.
    #[serde(skip_serializing)]
    pub is_up: Option<bool>,
    /// Pause monitoring while a maintenance is in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_monitoring_during_maintenances: Option<bool>,
    /// Read-only.
    #[serde(skip_serializing)]
    pub inbound_email_id: Option<String>,
    /// Open incidents automatically when monitoring reports the service down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_incident: Option<bool>,
    /// Notify subscribers about automatically opened incidents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_notify: Option<bool>,
    /// Ids of the child services. Read-only.
    #[serde(skip_serializing, deserialize_with = "null_as_default")]
    pub children_ids: Vec<i64>,
    /// Localized strings keyed by locale code.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub translations: BTreeMap<String, ServiceTranslation>,
    /// Hide the service from the public status page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Show the uptime graph on the status page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_uptime_graph: Option<bool>,
    /// Show the response time chart on the status page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_response_time_chart: Option<bool>,
    /// Position among its siblings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Options for internal and third-party monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_options: Option<MonitoringOptions>,
    /// Read-only.
    #[serde(skip_serializing)]
    pub inserted_at: Option<String>,
    /// Read-only.
    #[serde(skip_serializing)]
    pub updated_at: Option<String>,
}

impl Entity for Service {
    const SINGULAR: &'static str = "service";
    const PLURAL: &'static str = "services";
}

impl Service {
    /// A service with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The id as a path segment, once the service exists.
    pub fn resource_id(&self) -> Option<ResourceId> {
        self.id.map(ResourceId::from)
    }

    /// A copy suitable for a create or update body.
    ///
    /// The service reads the presence of the nested monitoring records as a
    /// mode selection, so each is kept only when `monitoring` selects it:
    /// webhook settings for webhook monitoring (JSONPath settings additionally
    /// need [`CUSTOM_JSONPATH_SERVICE`]), options for internal and third-party
    /// monitoring.
    pub fn to_request(&self) -> Self {
        let mut service = self.clone();
        let monitoring = service.monitoring.as_ref();

        if monitoring != Some(&Monitoring::Webhook) {
            service.webhook_monitoring_service = None;
        }
        if service.webhook_monitoring_service.as_deref() != Some(CUSTOM_JSONPATH_SERVICE) {
            service.webhook_custom_jsonpath_settings = None;
        }
        if !monitoring.is_some_and(Monitoring::accepts_options) {
            service.monitoring_options = None;
        }
        service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_with_nulls() {
        let service: Service = serde_json::from_value(json!({
            "id": 2,
            "parent_id": null,
            "name": "API",
            "description": null,
            "monitoring": null,
            "webhook_custom_jsonpath_settings": null,
            "translations": {"en": {"name": "API", "description": ""}},
            "children_ids": null,
            "is_up": null,
            "inserted_at": "2023-11-15T10:03:20"
        }))
        .unwrap();

        assert_eq!(service.id, Some(2));
        assert_eq!(service.parent_id, None);
        assert_eq!(service.description, None);
        assert_eq!(service.monitoring, None);
        assert!(service.children_ids.is_empty());
        assert_eq!(service.translations["en"].name, "API");
        assert_eq!(service.inserted_at.as_deref(), Some("2023-11-15T10:03:20"));
    }

    #[test]
    fn test_monitoring_wire_values() {
        for (mode, wire) in [
            (Monitoring::Disabled, ""),
            (Monitoring::Internal, "internal"),
            (Monitoring::ThirdParty, "3rd_party"),
            (Monitoring::Webhook, "webhook"),
        ] {
            assert_eq!(serde_json::to_value(&mode).unwrap(), json!(wire));
            assert_eq!(serde_json::from_value::<Monitoring>(json!(wire)).unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_monitoring_mode_round_trips() {
        let service: Service =
            serde_json::from_value(json!({"name": "Mail", "monitoring": "email"})).unwrap();
        assert_eq!(service.monitoring, Some(Monitoring::Other("email".to_string())));

        let body = serde_json::to_value(service.to_request()).unwrap();
        assert_eq!(body["monitoring"], json!("email"));
    }

    #[test]
    fn test_read_only_fields_are_not_serialized() {
        let service = Service {
            id: Some(42),
            current_incident_type: Some("major".to_string()),
            inbound_email_address: Some("x@in.statuspal.io".to_string()),
            incoming_webhook_url: Some("https://hooks".to_string()),
            inbound_email_id: Some("abc".to_string()),
            is_up: Some(true),
            children_ids: vec![1, 2],
            inserted_at: Some("t0".to_string()),
            updated_at: Some("t1".to_string()),
            ..Service::new("API")
        };

        let body = serde_json::to_value(&service).unwrap();
        assert_eq!(body, json!({"name": "API", "parent_id": null}));
    }

    #[test]
    fn test_false_is_sent_explicitly() {
        let service = Service {
            private: Some(false),
            order: Some(0),
            ..Service::new("API")
        };
        let body = serde_json::to_value(&service).unwrap();
        assert_eq!(body["private"], json!(false));
        assert_eq!(body["order"], json!(0));
    }

    #[test]
    fn test_to_request_keeps_options_for_internal_monitoring() {
        let service = Service {
            monitoring: Some(Monitoring::Internal),
            monitoring_options: Some(MonitoringOptions {
                method: Some("HEAD".to_string()),
                ..Default::default()
            }),
            webhook_monitoring_service: Some("status-cake".to_string()),
            webhook_custom_jsonpath_settings: Some(WebhookCustomJsonpathSettings::default()),
            ..Service::new("API")
        }
        .to_request();

        assert!(service.monitoring_options.is_some());
        assert_eq!(service.webhook_monitoring_service, None);
        assert_eq!(service.webhook_custom_jsonpath_settings, None);
    }

    #[test]
    fn test_to_request_keeps_jsonpath_only_for_custom_webhooks() {
        let settings = WebhookCustomJsonpathSettings {
            jsonpath: "$.status".to_string(),
            expected_result: "ok".to_string(),
        };
        let custom = Service {
            monitoring: Some(Monitoring::Webhook),
            webhook_monitoring_service: Some(CUSTOM_JSONPATH_SERVICE.to_string()),
            webhook_custom_jsonpath_settings: Some(settings.clone()),
            monitoring_options: Some(MonitoringOptions::default()),
            ..Service::new("API")
        }
        .to_request();
        assert_eq!(custom.webhook_custom_jsonpath_settings, Some(settings.clone()));
        assert_eq!(custom.monitoring_options, None);

        let uptime_robot = Service {
            monitoring: Some(Monitoring::Webhook),
            webhook_monitoring_service: Some("uptime-robot".to_string()),
            webhook_custom_jsonpath_settings: Some(settings),
            ..Service::new("API")
        }
        .to_request();
        assert_eq!(uptime_robot.webhook_custom_jsonpath_settings, None);
        assert_eq!(
            uptime_robot.webhook_monitoring_service.as_deref(),
            Some("uptime-robot")
        );
    }

    #[test]
    fn test_to_request_drops_everything_without_monitoring() {
        let service = Service {
            monitoring_options: Some(MonitoringOptions::default()),
            webhook_monitoring_service: Some(CUSTOM_JSONPATH_SERVICE.to_string()),
            webhook_custom_jsonpath_settings: Some(WebhookCustomJsonpathSettings::default()),
            ..Service::new("API")
        }
        .to_request();

        assert_eq!(service.monitoring_options, None);
        assert_eq!(service.webhook_monitoring_service, None);
        assert_eq!(service.webhook_custom_jsonpath_settings, None);
    }

    #[test]
    fn test_resource_id() {
        assert_eq!(Service::new("API").resource_id(), None);
        let service = Service {
            id: Some(42),
            ..Service::new("API")
        };
        assert_eq!(service.resource_id(), Some(ResourceId::from(42)));
    }
}
