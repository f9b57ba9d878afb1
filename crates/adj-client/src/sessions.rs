//! Typed client for the adjudication session API.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation | Store effect |
//! |--------|------|-----------|--------------|
//! | POST   | `/sessions/` | Create session | replace |
//! | GET    | `/sessions/{id}?userId=` | Fetch session | replace |
//! | POST   | `/sessions/{id}/invite/` | Invite participant | none |
//! | POST   | `/sessions/{id}/arguments/` | Submit argument (multipart) | merge |
//! | POST   | `/sessions/{id}/judge/` | Request judgement | merge |
//! | POST   | `/sessions/{id}/appeal/` | Submit appeal | merge |
//! | POST   | `/sessions/{id}/update_username` | Update display name | replace |
//!
//! `{id}` is percent-encoded as a single path segment.
//!
//! Every operation logs failures and returns them unchanged. The store is
//! only touched after a successful, fully decoded response.

use adj_core::{Appeal, Argument, Judgement, ParticipantId, Session, SessionId};
use adj_state::SessionStore;
use serde::Serialize;

use crate::attachment::ImageAttachment;
use crate::config::IdentityMode;
use crate::error::ApiError;
use crate::identity::IdentityProvider;
use crate::transport::Transport;

// -- Request bodies -----------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<ParticipantId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<ParticipantId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JudgeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<ParticipantId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppealRequest<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<ParticipantId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUsernameRequest<'a> {
    user: &'a ParticipantId,
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<ParticipantId>,
}

// -- Client -------------------------------------------------------------------

/// Client for the session API. Feeds every successful response into the
/// shared [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionClient {
    transport: Transport,
    identity: IdentityProvider,
    store: SessionStore,
    mode: IdentityMode,
}

fn logged(operation: &'static str) -> impl FnOnce(ApiError) -> ApiError {
    move |e| {
        tracing::error!(operation, status = ?e.status(), "{e}");
        e
    }
}

impl SessionClient {
    pub(crate) fn new(
        transport: Transport,
        identity: IdentityProvider,
        store: SessionStore,
        mode: IdentityMode,
    ) -> Self {
        Self {
            transport,
            identity,
            store,
            mode,
        }
    }

    /// The participant id to attach, or `None` when identity is omitted.
    fn attached_identity(&self) -> Option<ParticipantId> {
        match self.mode {
            IdentityMode::Attach => Some(self.identity.participant_id()),
            IdentityMode::Omit => None,
        }
    }

    /// Create a session and make it the cached session.
    ///
    /// Calls `POST {base_url}/sessions/`.
    pub async fn create_session(&self, name: &str, description: &str) -> Result<Session, ApiError> {
        let endpoint = "POST /sessions/";
        let body = CreateSessionRequest {
            name,
            description,
            user_id: self.attached_identity(),
        };

        let session: Session = self
            .transport
            .execute(endpoint, self.transport.post(&["sessions", ""]).json(&body))
            .await
            .map_err(logged("create_session"))?;

        tracing::info!(session_id = %session.id, "created session");
        self.store.replace(session.clone());
        Ok(session)
    }

    /// Fetch a session and make it the cached session.
    ///
    /// Calls `GET {base_url}/sessions/{id}?userId={userId}`.
    pub async fn get_session(&self, id: &SessionId) -> Result<Session, ApiError> {
        let endpoint = format!("GET /sessions/{id}");
        let mut request = self.transport.get(&["sessions", id.as_str()]);
        if let Some(user_id) = self.attached_identity() {
            request = request.query(&[("userId", user_id.as_str())]);
        }

        let session: Session = self
            .transport
            .execute(&endpoint, request)
            .await
            .map_err(logged("get_session"))?;

        tracing::debug!(session_id = %session.id, arguments = session.arguments.len(), "fetched session");
        self.store.replace(session.clone());
        Ok(session)
    }

    /// Invite a participant by email. Does not touch the cached session.
    ///
    /// Calls `POST {base_url}/sessions/{id}/invite/`.
    pub async fn invite_participant(
        &self,
        session_id: &SessionId,
        email: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let endpoint = format!("POST /sessions/{session_id}/invite/");
        let body = InviteRequest {
            email,
            user_id: self.attached_identity(),
        };

        let result = self
            .transport
            .execute(
                &endpoint,
                self.transport
                    .post(&["sessions", session_id.as_str(), "invite", ""])
                    .json(&body),
            )
            .await
            .map_err(logged("invite_participant"))?;

        tracing::info!(session_id = %session_id, "invited participant");
        Ok(result)
    }

    /// Submit an argument, optionally with image evidence.
    ///
    /// Calls `POST {base_url}/sessions/{id}/arguments/` with a multipart
    /// form. On success the argument is appended to the cached session if
    /// that session is `session_id`.
    pub async fn submit_argument(
        &self,
        session_id: &SessionId,
        content: &str,
        image: Option<ImageAttachment>,
    ) -> Result<Argument, ApiError> {
        let endpoint = format!("POST /sessions/{session_id}/arguments/");

        let mut form = reqwest::multipart::Form::new().text("content", content.to_string());
        if let Some(user_id) = self.attached_identity() {
            form = form
                .text("userId", user_id.to_string())
                .text("username", self.identity.display_name());
        }
        if let Some(image) = image {
            form = form.part("image", image.into_part().map_err(logged("submit_argument"))?);
        }

        let argument: Argument = self
            .transport
            .execute(
                &endpoint,
                self.transport
                    .post(&["sessions", session_id.as_str(), "arguments", ""])
                    .multipart(form),
            )
            .await
            .map_err(logged("submit_argument"))?;

        tracing::info!(session_id = %session_id, "argument submitted");
        self.store.merge_argument(session_id, argument.clone());
        Ok(argument)
    }

    /// Request the automated judgement.
    ///
    /// Calls `POST {base_url}/sessions/{id}/judge/`.
    pub async fn request_judgement(&self, session_id: &SessionId) -> Result<Judgement, ApiError> {
        let endpoint = format!("POST /sessions/{session_id}/judge/");
        let body = JudgeRequest {
            user_id: self.attached_identity(),
        };

        let judgement: Judgement = self
            .transport
            .execute(
                &endpoint,
                self.transport
                    .post(&["sessions", session_id.as_str(), "judge", ""])
                    .json(&body),
            )
            .await
            .map_err(logged("request_judgement"))?;

        tracing::info!(session_id = %session_id, "judgement received");
        self.store.merge_judgement(session_id, judgement.clone());
        Ok(judgement)
    }

    /// Appeal the current judgement.
    ///
    /// Calls `POST {base_url}/sessions/{id}/appeal/`. When the response
    /// embeds a judgement it becomes the cached session's appeal judgement
    /// in the same update as the appended appeal.
    pub async fn submit_appeal(&self, session_id: &SessionId, content: &str) -> Result<Appeal, ApiError> {
        let endpoint = format!("POST /sessions/{session_id}/appeal/");
        let body = AppealRequest {
            content,
            user_id: self.attached_identity(),
        };

        let appeal: Appeal = self
            .transport
            .execute(
                &endpoint,
                self.transport
                    .post(&["sessions", session_id.as_str(), "appeal", ""])
                    .json(&body),
            )
            .await
            .map_err(logged("submit_appeal"))?;

        tracing::info!(
            session_id = %session_id,
            resolved = appeal.judgement.is_some(),
            "appeal submitted"
        );
        self.store.merge_appeal(session_id, appeal.clone());
        Ok(appeal)
    }

    /// Rename `participant` within a session.
    ///
    /// Calls `POST {base_url}/sessions/{id}/update_username`. On success the
    /// name is persisted locally and the returned session replaces the cache.
    pub async fn update_display_name(
        &self,
        session_id: &SessionId,
        participant: &ParticipantId,
        name: &str,
    ) -> Result<Session, ApiError> {
        let endpoint = format!("POST /sessions/{session_id}/update_username");
        let body = UpdateUsernameRequest {
            user: participant,
            username: name,
            user_id: self.attached_identity(),
        };

        let session: Session = self
            .transport
            .execute(
                &endpoint,
                self.transport
                    .post(&["sessions", session_id.as_str(), "update_username"])
                    .json(&body),
            )
            .await
            .map_err(logged("update_display_name"))?;

        self.identity.set_display_name(name);
        tracing::info!(session_id = %session_id, participant = %participant, "display name updated");
        self.store.replace(session.clone());
        Ok(session)
    }
}
