//! Platform-appropriate portal constructor.
//!
//! Returns a [`Portal`] backed by the matching [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage`, scoped by `storage.namespace`
//! - **Desktop / Mobile** (native): files under `storage.data_dir`, or the
//!   platform data directory
//! - **WASM without `web`**: in-memory only

use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::Portal;

pub fn open_portal(config: &PortalConfig) -> Result<Portal<impl store::KeyValueStore>, PortalError> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let store = store::LocalStorageStore::with_namespace(config.storage.namespace.as_deref());
        Portal::from_config(store, config)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Portal::from_config(store::MemoryStore::new(), config)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = config
            .storage
            .data_dir
            .clone()
            .unwrap_or_else(store::FileStore::default_base);
        let backend = store::FileStore::new(base);
        tracing::debug!("Opening portal storage at {}", backend.base().display());
        Portal::from_config(backend, config)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::error::PortalError;
    use crate::models::{IncidentDraft, Role};
    use store::StoreError;

    #[tokio::test]
    async fn test_open_portal_persists_to_data_dir() {
        let dir = std::env::temp_dir().join(format!("supewatch_portal_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = PortalConfig::default().with_overrides(|name| {
            (name == "SUPEWATCH_DATA_DIR").then(|| dir.display().to_string())
        });

        let portal = open_portal(&config).unwrap();
        let admin = portal.seed().users.iter().find(|u| u.role == Role::Admin).unwrap().clone();
        portal.login(&admin.email, "pw").await.unwrap();

        let reopened = open_portal(&config).unwrap();
        assert_eq!(reopened.restore().await.unwrap().user(), Some(&admin));
        assert!(dir.join("supewatch_user.json").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_unreadable_overlay_is_not_overwritten() {
        let dir =
            std::env::temp_dir().join(format!("supewatch_portal_bad_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let incidents = dir.join("incidents.json");
        let blob: &[u8] = b"[{\"id\":\"incident-old\",\"title\":\"\xff\"}]";
        std::fs::write(&incidents, blob).unwrap();
        let config = PortalConfig::default().with_overrides(|name| {
            (name == "SUPEWATCH_DATA_DIR").then(|| dir.display().to_string())
        });

        let portal = open_portal(&config).unwrap();
        assert!(matches!(
            portal.incidents(false).await,
            Err(PortalError::Store(StoreError::Io { .. }))
        ));

        let citizen = portal
            .seed()
            .users
            .iter()
            .find(|u| u.role == Role::Citizen)
            .unwrap()
            .clone();
        let session = portal.login(&citizen.email, "pw").await.unwrap();
        let draft = IncidentDraft {
            title: "Fire".to_string(),
            description: "Smoke".to_string(),
            location: "5th Ave".to_string(),
        };
        assert!(portal.create_incident(&session, draft).await.is_err());
        assert_eq!(std::fs::read(&incidents).unwrap(), blob);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
