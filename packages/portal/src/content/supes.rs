use store::KeyValueStore;

use super::ignored;
use crate::auth::Session;
use crate::error::PortalError;
use crate::models::{Supe, SupePatch};
use crate::Portal;

impl<S: KeyValueStore> Portal<S> {
    /// Supes with admin edits applied. A non-empty `query` keeps those whose
    /// name or powers contain it, ignoring case.
    pub async fn supes(&self, query: &str) -> Result<Vec<Supe>, PortalError> {
        let overrides = self.supe_overrides().load().await?;
        let query = query.trim();
        Ok(self
            .seed
            .supes
            .iter()
            .cloned()
            .map(|mut supe| {
                if let Some(patch) = overrides.iter().find(|p| p.id == supe.id) {
                    patch.apply(&mut supe);
                }
                supe
            })
            .filter(|supe| query.is_empty() || supe.matches(query))
            .collect())
    }

    /// One supe profile with admin edits applied.
    pub async fn supe(&self, id: &str) -> Result<Supe, PortalError> {
        let mut supe = self
            .seed
            .supe(id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("Supe", id))?;
        if let Some(patch) = self.supe_overrides().find(id).await? {
            patch.apply(&mut supe);
        }
        Ok(supe)
    }

    /// Fold `patch` into the stored overrides for `patch.id`. Admin only.
    pub async fn update_supe(
        &self,
        session: &Session,
        patch: SupePatch,
    ) -> Result<Option<Supe>, PortalError> {
        if !session.capabilities().can_manage_content {
            return ignored("update_supe", "session cannot manage content");
        }
        if patch.is_empty() {
            return ignored("update_supe", "patch changes nothing");
        }
        if self.seed.supe(&patch.id).is_none() {
            return ignored("update_supe", format_args!("unknown supe {}", patch.id));
        }

        let id = patch.id.clone();
        self.supe_overrides()
            .update_or_insert(&id, Some(SupePatch::new(id.as_str())), |stored| {
                stored.merge(patch)
            })
            .await?;
        tracing::info!("Supe {} updated", id);
        self.supe(&id).await.map(Some)
    }
}
