use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, Entity};
use crate::types::ResourceId;

/// Localized copy of the status page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPageTranslation {
    /// Company name shown to visitors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_company_name: Option<String>,
    /// Text shown next to the header logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_logo_text: Option<String>,
}

/// Colors of the selected theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfigs {
    /// Link color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_color: Option<String>,
    /// Header background, left side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_bg_color1: Option<String>,
    /// Header background, right side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_bg_color2: Option<String>,
    /// Header foreground.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_fg_color: Option<String>,
    /// Incident header color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_header_color: Option<String>,
    /// Color of the "operational" state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_ok_color: Option<String>,
    /// Color of minor incidents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_minor_color: Option<String>,
    /// Color of major incidents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_major_color: Option<String>,
    /// Color of maintenance windows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_maintenance_color: Option<String>,
}

/// A public status page owned by an organization.
///
/// Pages are addressed by their `subdomain`, not by a numeric id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPage {
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Company website the page links back to.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// IANA time zone incidents are displayed in.
    #[serde(deserialize_with = "null_as_default")]
    pub time_zone: String,
    /// Subdomain under the StatusPal domain. Identifies the page.
    #[serde(deserialize_with = "null_as_default")]
    pub subdomain: String,

    /// Support contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    /// Twitter handle shown on the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_public_screen_name: Option<String>,
    /// Text of the about section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Whether the about section is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_about: Option<bool>,
    /// Whether the page is served on `domain`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain_enabled: Option<bool>,
    /// Custom domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Comma-separated IPs allowed to view the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_ips: Option<String>,
    /// Whether only organization members can view the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_restricted: Option<bool>,
    /// How many days ahead scheduled maintenance is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_maintenance_days: Option<i64>,
    /// Custom JavaScript.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_js: Option<String>,
    /// Markup injected into `<head>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_code: Option<String>,
    /// Date format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    /// Time format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    /// Whether `date_format` also applies outside the incident list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format_enforce_everywhere: Option<bool>,
    /// Whether the incident calendar is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_calendar: Option<bool>,
    /// Whether the StatusPal watermark is hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_watermark: Option<bool>,
    /// Hours after which an unresolved minor incident triggers a reminder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_notification_hours: Option<i64>,
    /// Hours after which an unresolved major incident triggers a reminder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_notification_hours: Option<i64>,
    /// Hours after which an unresolved maintenance triggers a reminder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_notification_hours: Option<i64>,
    /// Days of incident history shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit_days: Option<i64>,
    /// Whether custom incident types are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_incident_types_enabled: Option<bool>,
    /// Whether informational notices are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_notices_enabled: Option<bool>,
    /// Whether the page is locked during maintenance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_when_maintenance: Option<bool>,
    /// Whether search engines are asked not to index the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noindex: Option<bool>,
    /// Whether incident updates are translated automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_translations: Option<bool>,
    /// Whether subscribing requires a captcha.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_enabled: Option<bool>,

    /// Localized header copy, keyed by locale.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub translations: BTreeMap<String, StatusPageTranslation>,
    /// Text shown next to the header logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_logo_text: Option<String>,
    /// Company name shown to visitors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_company_name: Option<String>,
    /// Header background image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_image: Option<String>,
    /// Logo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Favicon URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Whether the uptime graph is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_uptime_graph: Option<bool>,
    /// Days covered by the uptime graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_graph_days: Option<i64>,
    /// Where current incidents are placed, e.g. `below_services`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_incidents_position: Option<String>,
    /// Name of the selected theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_selected: Option<String>,
    /// Colors of the selected theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_configs: Option<ThemeConfigs>,

    /// Link color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_color: Option<String>,
    /// Header background, left side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_bg_color1: Option<String>,
    /// Header background, right side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_bg_color2: Option<String>,
    /// Header foreground.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_fg_color: Option<String>,
    /// Incident header color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_header_color: Option<String>,
    /// Incident link color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_link_color: Option<String>,
    /// Color of the "operational" state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_ok_color: Option<String>,
    /// Color of minor incidents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_minor_color: Option<String>,
    /// Color of major incidents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_major_color: Option<String>,
    /// Color of maintenance windows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_maintenance_color: Option<String>,
    /// Custom stylesheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// Custom header markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_header: Option<String>,
    /// Custom footer markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_footer: Option<String>,

    /// Whether new incidents notify subscribers by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_by_default: Option<bool>,
    /// Whether new incidents are tweeted by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_by_default: Option<bool>,
    /// Slack subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_subscriptions_enabled: Option<bool>,
    /// Discord notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_notifications_enabled: Option<bool>,
    /// Microsoft Teams notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams_notifications_enabled: Option<bool>,
    /// Zoom notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_notifications_enabled: Option<bool>,
    /// Google Chat notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_chat_notifications_enabled: Option<bool>,
    /// Mattermost notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mattermost_notifications_enabled: Option<bool>,
    /// SMS notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_notifications_enabled: Option<bool>,
    /// Comma-separated domains subscribers' addresses must belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_email_domains: Option<String>,
    /// RSS/Atom feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_enabled: Option<bool>,
    /// iCal feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_enabled: Option<bool>,
    /// Google Calendar integration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_calendar_enabled: Option<bool>,
    /// Whether visitors can subscribe at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribers_enabled: Option<bool>,
    /// Sender address of notification emails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    /// Reply-to address of notification emails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_email: Option<String>,
    /// Twitter posting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweeting_enabled: Option<bool>,
    /// Layout wrapping every email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_layout_template: Option<String>,
    /// Subscription confirmation email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_confirmation_template: Option<String>,
    /// Incident notification email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notification_template: Option<String>,
    /// Whether the custom email templates are used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_templates_enabled: Option<bool>,

    /// Creation time. Read-only.
    #[serde(skip_serializing)]
    pub inserted_at: Option<String>,
    /// Last modification time. Read-only.
    #[serde(skip_serializing)]
    pub updated_at: Option<String>,
}

impl Entity for StatusPage {
    const SINGULAR: &'static str = "status_page";
    const PLURAL: &'static str = "status_pages";
}

impl StatusPage {
    /// A page with the four attributes the service requires.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        time_zone: impl Into<String>,
        subdomain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            time_zone: time_zone.into(),
            subdomain: subdomain.into(),
            ..Default::default()
        }
    }

    /// The subdomain as a path segment, once it is set.
    pub fn resource_id(&self) -> Option<ResourceId> {
        (!self.subdomain.is_empty()).then(|| ResourceId::from(&self.subdomain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_serializes_required_fields_only() {
        let page = StatusPage::new("Acme", "https://acme.test", "UTC", "acme");
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "name": "Acme",
                "url": "https://acme.test",
                "time_zone": "UTC",
                "subdomain": "acme"
            })
        );
    }

    #[test]
    fn test_decode_with_nulls_and_nested_records() {
        let page: StatusPage = serde_json::from_value(json!({
            "name": "Acme",
            "url": null,
            "time_zone": "Europe/Berlin",
            "subdomain": "acme",
            "display_about": false,
            "scheduled_maintenance_days": 7,
            "translations": {
                "de": {"public_company_name": "Acme GmbH", "header_logo_text": null}
            },
            "theme_configs": {"link_color": "0c91c3", "status_ok_color": "48CBA5"},
            "custom_css": null,
            "inserted_at": "2024-05-16T10:00:00",
            "unknown_field": 1
        }))
        .unwrap();

        assert_eq!(page.url, "");
        assert_eq!(page.display_about, Some(false));
        assert_eq!(page.scheduled_maintenance_days, Some(7));
        assert_eq!(page.custom_css, None);
        assert_eq!(
            page.translations["de"].public_company_name.as_deref(),
            Some("Acme GmbH")
        );
        assert_eq!(page.translations["de"].header_logo_text, None);

        let theme = page.theme_configs.as_ref().unwrap();
        assert_eq!(theme.link_color.as_deref(), Some("0c91c3"));
        assert_eq!(theme.header_fg_color, None);
        assert_eq!(page.inserted_at.as_deref(), Some("2024-05-16T10:00:00"));
    }

    #[test]
    fn test_encode_skips_timestamps() {
        let page = StatusPage {
            inserted_at: Some("2024-05-16T10:00:00".to_string()),
            updated_at: Some("2024-05-17T10:00:00".to_string()),
            noindex: Some(true),
            ..StatusPage::new("Acme", "https://acme.test", "UTC", "acme")
        };

        let value = serde_json::to_value(&page).unwrap();
        assert!(value.get("inserted_at").is_none());
        assert!(value.get("updated_at").is_none());
        assert_eq!(value["noindex"], json!(true));
    }

    #[test]
    fn test_null_translations_decode_empty() {
        let page: StatusPage =
            serde_json::from_value(json!({"name": "Acme", "translations": null})).unwrap();
        assert!(page.translations.is_empty());
    }

    #[test]
    fn test_resource_id_from_subdomain() {
        assert_eq!(StatusPage::default().resource_id(), None);
        let page = StatusPage::new("Acme", "https://acme.test", "UTC", "acme");
        assert_eq!(page.resource_id().unwrap().as_str(), "acme");
    }
}
