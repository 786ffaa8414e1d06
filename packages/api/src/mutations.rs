//! Member mutations that announce themselves.
//!
//! Each function performs one write through [`ApiClient`] and, only once the server
//! has accepted it, publishes the matching [`MemberEvent`]. UI components call these
//! instead of the raw client so every successful change refreshes the member list.

use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::events::{MemberEvent, MemberEvents};
use crate::models::{MemberRegistrationRequest, MemberUpdateRequest};

/// Create a member. Returns the token issued for the new member, if any.
pub async fn create_member(
    api: &ApiClient,
    events: &MemberEvents,
    request: &MemberRegistrationRequest,
) -> Result<Option<String>, ApiError> {
    let token = api.create_member(request).await?;
    info!("Created member {}", request.email);
    events.publish(MemberEvent::Created);
    Ok(token)
}

pub async fn update_member(
    api: &ApiClient,
    events: &MemberEvents,
    id: i64,
    request: &MemberUpdateRequest,
) -> Result<(), ApiError> {
    api.update_member(id, request).await?;
    info!("Updated member {}", id);
    events.publish(MemberEvent::Updated(id));
    Ok(())
}

pub async fn delete_member(api: &ApiClient, events: &MemberEvents, id: i64) -> Result<(), ApiError> {
    api.delete_member(id).await?;
    info!("Deleted member {}", id);
    events.publish(MemberEvent::Deleted(id));
    Ok(())
}

pub async fn upload_profile_image(
    api: &ApiClient,
    events: &MemberEvents,
    id: i64,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<(), ApiError> {
    api.upload_profile_image(id, file_name, bytes).await?;
    info!("Uploaded profile image for member {}", id);
    events.publish(MemberEvent::ProfileImageUploaded(id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ClientConfig;
    use crate::models::Gender;
    use crate::testing::FakeServer;
    use store::{MemoryStore, TokenStore, ACCESS_TOKEN_KEY};
    use tokio::sync::broadcast::error::TryRecvError;

    fn registration(name: &str, email: &str) -> MemberRegistrationRequest {
        MemberRegistrationRequest {
            name: name.to_string(),
            email: email.to_string(),
            age: 30,
            password: "password".to_string(),
            gender: Gender::Female,
        }
    }

    async fn logged_in() -> (FakeServer, ApiClient) {
        let server = FakeServer::start().await;
        let store = MemoryStore::new();
        let api = ApiClient::new(
            ClientConfig::default().with_base_url(&server.base_url),
            Arc::new(store.clone()),
        );
        let token = api
            .create_member(&registration("Admin", "admin@x.com"))
            .await
            .unwrap()
            .unwrap();
        store.set(ACCESS_TOKEN_KEY, &token).unwrap();
        (server, api)
    }

    #[tokio::test]
    async fn test_create_publishes_created() {
        let (server, api) = logged_in().await;
        let events = MemberEvents::new();
        let mut rx = events.subscribe();

        create_member(&api, &events, &registration("Jane", "jane@x.com"))
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap(), MemberEvent::Created);
        assert_eq!(server.members().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_triggers_refresh_with_new_image() {
        let (_server, api) = logged_in().await;
        let events = MemberEvents::new();
        let mut rx = events.subscribe();
        let id = api.list_members().await.unwrap()[0].id;
        let before = api.get_member(id).await.unwrap();
        assert!(before.profile_image_id.is_none());

        upload_profile_image(&api, &events, id, "me.jpg", vec![1, 2, 3])
            .await
            .unwrap();

        // The list view re-fetches on this event and sees the new image id
        let event = rx.recv().await.unwrap();
        assert_eq!(event, MemberEvent::ProfileImageUploaded(id));
        let refreshed = api.list_members().await.unwrap();
        let member = refreshed.iter().find(|m| m.id == id).unwrap();
        assert!(member.profile_image_id.is_some());
        assert_eq!(
            api.profile_image_url(id),
            format!("{}/api/v1/members/{id}/profile-image", api.config().base_url)
        );
    }

    #[tokio::test]
    async fn test_failed_mutation_publishes_nothing() {
        let (_server, api) = logged_in().await;
        let events = MemberEvents::new();
        let mut rx = events.subscribe();

        let err = delete_member(&api, &events, 404).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));

        let err = update_member(
            &api,
            &events,
            404,
            &MemberUpdateRequest {
                name: "X".to_string(),
                email: "x@x.com".to_string(),
                age: 20,
                gender: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_update_and_delete_publish_ids() {
        let (_server, api) = logged_in().await;
        let events = MemberEvents::new();
        let mut rx = events.subscribe();
        let id = api.list_members().await.unwrap()[0].id;

        update_member(
            &api,
            &events,
            id,
            &MemberUpdateRequest {
                name: "Boss".to_string(),
                email: "admin@x.com".to_string(),
                age: 40,
                gender: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(rx.recv().await.unwrap(), MemberEvent::Updated(id));
        assert_eq!(api.get_member(id).await.unwrap().name, "Boss");

        delete_member(&api, &events, id).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), MemberEvent::Deleted(id));
    }
}
