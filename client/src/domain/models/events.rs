//! School events and registration payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A school event open for registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Event title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Category (`academic`, `sports`, `cultural`, `hackathon`, `other`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Scheduled start.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    #[serde(default)]
    pub location: Option<String>,
    /// Organising body or person.
    #[serde(default)]
    pub organizer: Option<String>,
    /// Registration fee in INR.
    #[serde(default)]
    pub fee: f64,
    /// Maximum number of attendees.
    pub capacity: u32,
    /// Attendees registered so far.
    pub registered_count: u32,
    /// Last moment registrations are accepted, when the organiser set one.
    #[serde(default)]
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Free-form extra information.
    #[serde(default)]
    pub additional_details: Option<String>,
}

impl Event {
    /// Whether registration is closed because capacity is reached.
    #[must_use]
    pub fn is_fully_booked(&self) -> bool {
        self.registered_count >= self.capacity
    }

    /// Whether the registration deadline, when set, has passed at `now`.
    #[must_use]
    pub fn is_deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.registration_deadline
            .is_some_and(|deadline| deadline < now)
    }

    /// Case-insensitive title/description substring match, plus optional
    /// category equality. An empty query and `None` category match all.
    #[must_use]
    pub fn matches(&self, query: &str, event_type: Option<&str>) -> bool {
        let query = query.to_lowercase();
        let matches_search = query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query);
        let matches_type = event_type.is_none_or(|wanted| self.event_type == wanted);
        matches_search && matches_type
    }
}

/// Body for creating or updating an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Event title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Category.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Scheduled start.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: String,
    /// Organising body or person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// Registration fee in INR.
    pub fee: f64,
    /// Maximum number of attendees.
    pub capacity: u32,
    /// Last moment registrations are accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Free-form extra information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

/// Payload returned when a registration is accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// The event as it stands after registering, for the user's list.
    pub event: Event,
    /// Optional server confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload returned when a registration is cancelled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationAck {
    /// Optional server confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn event(capacity: u32, registered: u32) -> Event {
        Event {
            id: "e1".to_owned(),
            title: "Science Fair".to_owned(),
            description: "Annual exhibition".to_owned(),
            event_type: "academic".to_owned(),
            date: Utc.with_ymd_and_hms(2026, 9, 20, 9, 0, 0).single().expect("valid date"),
            location: Some("Main hall".to_owned()),
            organizer: None,
            fee: 50.0,
            capacity,
            registered_count: registered,
            registration_deadline: None,
            additional_details: None,
        }
    }

    #[rstest]
    #[case(10, 10, true)]
    #[case(10, 11, true)]
    #[case(10, 9, false)]
    fn fully_booked_when_registered_reaches_capacity(
        #[case] capacity: u32,
        #[case] registered: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(event(capacity, registered).is_fully_booked(), expected);
    }

    #[test]
    fn deadline_check_only_applies_when_set() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).single().expect("valid date");
        let mut subject = event(10, 0);
        assert!(!subject.is_deadline_passed(now));

        subject.registration_deadline =
            Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).single();
        assert!(subject.is_deadline_passed(now));
    }

    #[rstest]
    #[case("", None, true)]
    #[case("science", None, true)]
    #[case("EXHIBITION", None, true)]
    #[case("football", None, false)]
    #[case("", Some("academic"), true)]
    #[case("", Some("sports"), false)]
    fn matches_combines_search_and_type(
        #[case] query: &str,
        #[case] event_type: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(event(10, 0).matches(query, event_type), expected);
    }

    #[test]
    fn decodes_mongo_style_ids() {
        let decoded: Event = serde_json::from_value(serde_json::json!({
            "_id": "e1",
            "title": "t",
            "description": "d",
            "type": "other",
            "date": "2026-09-20T09:00:00Z",
            "fee": 0.0,
            "capacity": 10,
            "registeredCount": 10
        }))
        .expect("event decodes");
        assert_eq!(decoded.id, "e1");
        assert!(decoded.is_fully_booked());
    }
}
