//! Report-lost and report-found forms.

use lnf_core::validation::validate_item_draft;
use lnf_core::{ItemDraft, ItemRequest, ItemType};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::{ImageUpload, ItemMutator};
use crate::auth::AuthStore;
use crate::error::ClientError;
use crate::views::CANCELLED_MESSAGE;

/// Form lifecycle. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportStatus {
    #[default]
    Editing,
    Submitted,
}

#[derive(Debug, Clone)]
pub struct ReportView {
    pub item_type: ItemType,
    pub draft: ItemDraft,
    pub image: Option<ImageUpload>,
    pub status: ReportStatus,
    pub error: Option<String>,
}

impl ReportView {
    /// Empty form with the type preset by the page.
    pub fn new(item_type: ItemType) -> Self {
        ReportView {
            item_type,
            draft: ItemDraft::for_type(item_type),
            image: None,
            status: ReportStatus::Editing,
            error: None,
        }
    }

    /// Generic failure text for this page.
    pub fn failure_message(&self) -> String {
        format!("Failed to submit {} item", self.item_type.noun())
    }

    /// Line shown once the report went through.
    pub fn confirmation(&self) -> &'static str {
        match self.item_type {
            ItemType::Lost => {
                "Thank you for reporting your lost item. Our team and community will help you find it."
            }
            ItemType::Found => {
                "Thank you for reporting this found item. We'll help connect it with its owner."
            }
        }
    }

    /// Validates and posts the report as the signed-in user.
    pub async fn submit<M: ItemMutator>(
        &mut self,
        api: &M,
        auth: &AuthStore,
        cancel: &CancellationToken,
    ) -> Result<(), String> {
        let result = self.try_submit(api, auth, cancel).await;
        match &result {
            Ok(()) => {
                self.status = ReportStatus::Submitted;
                self.error = None;
            }
            Err(message) => self.error = Some(message.clone()),
        }
        result
    }

    async fn try_submit<M: ItemMutator>(
        &self,
        api: &M,
        auth: &AuthStore,
        cancel: &CancellationToken,
    ) -> Result<(), String> {
        if self.status == ReportStatus::Submitted {
            return Err("This report has already been submitted.".to_string());
        }
        let owner = auth
            .profile()
            .await
            .ok_or_else(|| ClientError::NotSignedIn.to_string())?;
        let fields = validate_item_draft(&self.draft).map_err(|e| e.to_string())?;
        let request = ItemRequest::new(fields, &owner);

        match api.create_item(&request, self.image.clone(), cancel).await {
            Ok(created) => {
                info!(
                    item_type = %self.item_type,
                    id = ?created.map(|i| i.id),
                    "Report submitted"
                );
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(CANCELLED_MESSAGE.to_string()),
            Err(e) => {
                warn!(error = %e, "Report submission failed");
                Err(e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.failure_message()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tests::{anonymous_store, signed_in_store};
    use crate::views::fakes::FakeBackend;
    use lnf_core::ItemCategory;

    fn filled(item_type: ItemType) -> ReportView {
        let mut view = ReportView::new(item_type);
        view.draft.title = "Red Umbrella".into();
        view.draft.description = "Compact, red handle".into();
        view.draft.category = Some(ItemCategory::Others);
        view.draft.location = "Bus Stop".into();
        view.draft.date = "2024-05-20".into();
        view.draft.contact_info = "555-0123".into();
        view
    }

    #[tokio::test]
    async fn test_submit_posts_as_signed_in_user() {
        let api = FakeBackend::default();
        let auth = signed_in_store();
        let mut view = filled(ItemType::Found);
        view.image = Some(ImageUpload::new("umbrella.jpg", vec![1, 2]));

        view.submit(&api, &auth, &CancellationToken::new()).await.unwrap();
        assert_eq!(view.status, ReportStatus::Submitted);

        let created = api.created.lock().unwrap();
        let (request, image) = &created[0];
        assert_eq!(request.item_type, ItemType::Found);
        assert_eq!(request.user.id, 4);
        assert_eq!(request.user.contact_info, "555-0123");
        assert_eq!(image.as_deref(), Some("umbrella.jpg"));
    }

    #[tokio::test]
    async fn test_missing_fields_block_submission() {
        let api = FakeBackend::default();
        let mut view = ReportView::new(ItemType::Lost);
        let err = view
            .submit(&api, &signed_in_store(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, "Please fill in all required fields.");
        assert_eq!(view.status, ReportStatus::Editing);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_uses_server_message_or_generic_text() {
        let auth = signed_in_store();

        let api = FakeBackend {
            create_failure: Some((400, Some("Image too large"))),
            ..Default::default()
        };
        let mut view = filled(ItemType::Lost);
        let err = view.submit(&api, &auth, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, "Image too large");

        let api = FakeBackend {
            create_failure: Some((500, None)),
            ..Default::default()
        };
        let mut view = filled(ItemType::Lost);
        let err = view.submit(&api, &auth, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, "Failed to submit lost item");
        assert_eq!(view.error.as_deref(), Some("Failed to submit lost item"));
        assert_eq!(view.status, ReportStatus::Editing);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_submit() {
        let api = FakeBackend::default();
        let mut view = filled(ItemType::Found);
        let err = view
            .submit(&api, &anonymous_store(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, "Please sign in to continue.");
    }

    #[tokio::test]
    async fn test_submitted_is_terminal() {
        let api = FakeBackend::default();
        let auth = signed_in_store();
        let mut view = filled(ItemType::Found);
        view.submit(&api, &auth, &CancellationToken::new()).await.unwrap();
        assert!(view.submit(&api, &auth, &CancellationToken::new()).await.is_err());
        assert_eq!(view.status, ReportStatus::Submitted);
        assert_eq!(api.created.lock().unwrap().len(), 1);
    }
}
