use store::KeyValueStore;

use super::ignored;
use crate::auth::Session;
use crate::clock;
use crate::error::PortalError;
use crate::models::{Comment, Incident, IncidentDraft, Vote};
use crate::seed::merge_by_id;
use crate::Portal;

impl<S: KeyValueStore> Portal<S> {
    /// Seed and reported incidents, optionally only the verified ones.
    pub async fn incidents(&self, verified_only: bool) -> Result<Vec<Incident>, PortalError> {
        let overlay = self.incident_overlay().load().await?;
        let mut incidents = merge_by_id(self.seed.incidents.clone(), overlay);
        if verified_only {
            incidents.retain(|i| i.verified);
        }
        Ok(incidents)
    }

    pub async fn incident(&self, id: &str) -> Result<Incident, PortalError> {
        if let Some(incident) = self.incident_overlay().find(id).await? {
            return Ok(incident);
        }
        self.seed
            .incident(id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("Incident", id))
    }

    /// Report a new, unverified incident. Admins moderate reports rather than
    /// file them, so their calls are ignored.
    pub async fn create_incident(
        &self,
        session: &Session,
        draft: IncidentDraft,
    ) -> Result<Option<Incident>, PortalError> {
        let caps = session.capabilities();
        let Some(user) = session.user().filter(|_| caps.can_post_incident) else {
            return ignored("create_incident", "no active session");
        };
        if caps.is_admin {
            return ignored("create_incident", "admins do not file reports");
        }

        let incident = Incident {
            id: clock::new_id("incident"),
            title: draft.title,
            description: draft.description,
            location: draft.location,
            timestamp: clock::now(),
            reported_by: user.username.clone(),
            verified: false,
            likes: Vec::new(),
            dislikes: Vec::new(),
            comments: Vec::new(),
        };
        let incident = self.incident_overlay().append(incident).await?;
        tracing::info!("{} reported incident {}", user.username, incident.id);
        Ok(Some(incident))
    }

    /// Mark an incident verified. Applying it twice is harmless.
    pub async fn verify_incident(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<Option<Incident>, PortalError> {
        if !session.capabilities().can_manage_content {
            return ignored("verify_incident", "session cannot manage content");
        }
        let verified = self.update_incident(id, |i| i.verified = true).await?;
        match &verified {
            Some(_) => tracing::info!("Incident {} verified", id),
            None => tracing::debug!("Ignoring verify_incident: unknown incident {}", id),
        }
        Ok(verified)
    }

    /// Place the session user's vote, replacing any opposite vote.
    pub async fn vote_incident(
        &self,
        session: &Session,
        id: &str,
        vote: Vote,
    ) -> Result<Option<Incident>, PortalError> {
        let Some(user) = session.user().filter(|_| session.capabilities().can_like_content) else {
            return ignored("vote_incident", "no active session");
        };
        let updated = self.update_incident(id, |i| i.cast_vote(&user.id, vote)).await?;
        if updated.is_some() {
            tracing::debug!("{} voted {:?} on incident {}", user.username, vote, id);
        }
        Ok(updated)
    }

    /// Append a comment authored by the session user.
    pub async fn comment_incident(
        &self,
        session: &Session,
        id: &str,
        content: &str,
    ) -> Result<Option<Incident>, PortalError> {
        let Some(user) = session.user().filter(|_| session.capabilities().can_comment) else {
            return ignored("comment_incident", "no active session");
        };
        let comment = Comment {
            id: clock::new_id("comment"),
            content: content.to_string(),
            user_id: user.id.clone(),
            username: user.username.clone(),
            created_at: clock::now(),
        };
        self.update_incident(id, |i| i.comments.push(comment)).await
    }

    async fn update_incident<F>(&self, id: &str, transform: F) -> Result<Option<Incident>, PortalError>
    where
        F: FnOnce(&mut Incident),
    {
        let fallback = self.seed.incident(id).cloned();
        Ok(self
            .incident_overlay()
            .update_or_insert(id, fallback, transform)
            .await?)
    }
}
