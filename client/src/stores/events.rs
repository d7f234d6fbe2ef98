//! Events store: campus events plus the user's own registrations.

use std::sync::Arc;
use std::sync::Mutex;

use request_state::RequestState;

use super::{dispatch, dispatch_with, ensure_id};
use crate::domain::ApiResult;
use crate::domain::models::{CancellationAck, Event, EventDraft, RegistrationResponse};
use crate::domain::ports::HttpTransport;
use crate::http::ApiClient;
use crate::sync::lock;

const FETCH_FALLBACK: &str = "Failed to fetch events";
const FETCH_USER_FALLBACK: &str = "Failed to fetch your registered events";
const CREATE_FALLBACK: &str = "Failed to create event";
const UPDATE_FALLBACK: &str = "Failed to update event";
const REGISTER_FALLBACK: &str = "Failed to register for event";
const CANCEL_FALLBACK: &str = "Failed to cancel registration";

const CREATED_MESSAGE: &str = "Event created successfully";
const UPDATED_MESSAGE: &str = "Event updated successfully";
const REGISTERED_MESSAGE: &str = "Successfully registered for the event";
const CANCELLED_MESSAGE: &str = "Registration cancelled";

#[derive(Debug, Default)]
struct EventsState {
    events: RequestState<Vec<Event>>,
    user_events: RequestState<Vec<Event>>,
    success_message: Option<String>,
}

/// Store for the event catalogue and the user's registrations.
pub struct EventsStore<T> {
    client: Arc<ApiClient<T>>,
    state: Mutex<EventsState>,
}

impl<T: HttpTransport> EventsStore<T> {
    /// Create the store.
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            state: Mutex::new(EventsState::default()),
        }
    }

    /// Replace the event catalogue from the server.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_all(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            events,
            FETCH_FALLBACK,
            self.client.get::<Vec<Event>>("/api/events")
        )
    }

    /// Replace the list of events the user is registered for.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_user_events(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            user_events,
            FETCH_USER_FALLBACK,
            self.client.get::<Vec<Event>>("/api/users/events")
        )
    }

    /// Create an event (admin-side) and append it to the catalogue.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn create(&self, draft: &EventDraft) -> ApiResult<()> {
        dispatch_with!(
            self.state,
            events,
            CREATE_FALLBACK,
            self.client.post::<_, Event>("/api/events", draft),
            |state: &mut EventsState, ticket, payload: Event| {
                let applied = state.events.merge(ticket, |slot| {
                    slot.get_or_insert_with(Vec::new).push(payload);
                });
                if applied {
                    state.success_message = Some(CREATED_MESSAGE.to_owned());
                }
            }
        )
    }

    /// Update an event in place. An event absent from the catalogue leaves
    /// the list unchanged.
    ///
    /// # Errors
    /// Returns the classified failure, or
    /// [`ApiError::InvalidRequest`](crate::domain::ApiError) for a blank id.
    pub async fn update(&self, event_id: &str, draft: &EventDraft) -> ApiResult<()> {
        ensure_id(event_id, "event id")?;
        dispatch_with!(
            self.state,
            events,
            UPDATE_FALLBACK,
            self.client
                .put::<_, Event>(&format!("/api/events/{event_id}"), draft),
            |state: &mut EventsState, ticket, payload: Event| {
                let applied = state.events.merge(ticket, |slot| {
                    if let Some(events) = slot.as_mut() {
                        if let Some(existing) =
                            events.iter_mut().find(|event| event.id == payload.id)
                        {
                            *existing = payload;
                        }
                    }
                });
                if applied {
                    state.success_message = Some(UPDATED_MESSAGE.to_owned());
                }
            }
        )
    }

    /// Register the user for an event; the returned event joins the user's
    /// registration list.
    ///
    /// # Errors
    /// Returns the classified failure (a full or deadline-passed event
    /// surfaces as a rejection with the server's message), or
    /// [`ApiError::InvalidRequest`](crate::domain::ApiError) for a blank id.
    pub async fn register(&self, event_id: &str) -> ApiResult<()> {
        ensure_id(event_id, "event id")?;
        dispatch_with!(
            self.state,
            user_events,
            REGISTER_FALLBACK,
            self.client
                .post_empty::<RegistrationResponse>(&format!("/api/events/{event_id}/register")),
            |state: &mut EventsState, ticket, payload: RegistrationResponse| {
                let message = payload
                    .message
                    .unwrap_or_else(|| REGISTERED_MESSAGE.to_owned());
                let applied = state.user_events.merge(ticket, |slot| {
                    slot.get_or_insert_with(Vec::new).push(payload.event);
                });
                if applied {
                    state.success_message = Some(message);
                }
            }
        )
    }

    /// Cancel the user's registration. Removing an event that is not in the
    /// registration list is a no-op.
    ///
    /// # Errors
    /// Returns the classified failure, or
    /// [`ApiError::InvalidRequest`](crate::domain::ApiError) for a blank id.
    pub async fn cancel_registration(&self, event_id: &str) -> ApiResult<()> {
        ensure_id(event_id, "event id")?;
        let target = event_id.to_owned();
        dispatch_with!(
            self.state,
            user_events,
            CANCEL_FALLBACK,
            self.client
                .post_empty::<CancellationAck>(&format!("/api/events/{event_id}/cancel")),
            |state: &mut EventsState, ticket, payload: CancellationAck| {
                let message = payload
                    .message
                    .unwrap_or_else(|| CANCELLED_MESSAGE.to_owned());
                let applied = state.user_events.merge(ticket, |slot| {
                    if let Some(events) = slot.as_mut() {
                        events.retain(|event| event.id != target);
                    }
                });
                if applied {
                    state.success_message = Some(message);
                }
            }
        )
    }

    /// Snapshot of the event catalogue slot.
    #[must_use]
    pub fn events(&self) -> RequestState<Vec<Event>> {
        lock(&self.state).events.clone()
    }

    /// Snapshot of the user's registrations slot.
    #[must_use]
    pub fn user_events(&self) -> RequestState<Vec<Event>> {
        lock(&self.state).user_events.clone()
    }

    /// Message of the last successful mutation, until cleared.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        lock(&self.state).success_message.clone()
    }

    /// Clear inline errors on both slots.
    pub fn clear_error(&self) {
        let mut state = lock(&self.state);
        state.events.clear_error();
        state.user_events.clear_error();
    }

    /// Clear the last success message.
    pub fn clear_success(&self) {
        lock(&self.state).success_message = None;
    }
}
