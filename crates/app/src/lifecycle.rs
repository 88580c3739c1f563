//! Design history controller.
//!
//! Drives the design list screen: fetch, tab/search filtering, creation, and
//! whitelisted status transitions. The backend is the only authority on a
//! design's status, so a transition never touches the cached list; a
//! successful one is followed by exactly one full re-fetch.

use std::sync::Arc;

use threadline_client::StorefrontBackend;
use threadline_core::design::{CreateDesignRequest, CustomDesign};
use threadline_core::error::CoreError;
use threadline_core::presenter::{DesignRow, StatusTab, ALL_DESIGNS_TAB, DESIGN_TABS};
use threadline_core::status::DesignStatus;
use threadline_core::transition::find_design_transition;
use threadline_core::types::DbId;

use crate::error::LifecycleError;
use crate::notify::{Confirmer, Notifier, DESIGN_CREATED_MESSAGE, STATUS_UPDATED_MESSAGE};
use crate::screen::{report_failure, ListScreen};

/// Result of a transition request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The backend accepted the change and the list was re-fetched.
    Applied,
    /// The backend accepted the change but the follow-up re-fetch failed, so
    /// the cached list still shows the old state.
    AppliedStale,
    /// The user declined the confirmation prompt; nothing was sent.
    Declined,
}

pub struct DesignLifecycle<B> {
    backend: Arc<B>,
    screen: ListScreen<CustomDesign>,
}

impl<B: StorefrontBackend> DesignLifecycle<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            screen: ListScreen::new(DESIGN_TABS, &ALL_DESIGNS_TAB),
        }
    }

    /// Fetch the full design collection and replace the cached list.
    pub async fn refresh(&self) -> Result<usize, LifecycleError> {
        let designs = self.backend.fetch_designs(None).await?;
        let count = designs.len();
        self.screen.replace(designs).await;
        tracing::debug!(count, "Design list refreshed");
        Ok(count)
    }

    pub async fn designs(&self) -> Vec<CustomDesign> {
        self.screen.all().await
    }

    /// Designs on the active tab matching the search term.
    pub async fn visible(&self) -> Vec<CustomDesign> {
        self.screen.visible().await
    }

    /// Row view models for [`DesignLifecycle::visible`].
    pub async fn rows(&self) -> Vec<DesignRow> {
        self.visible().await.iter().map(DesignRow::from_design).collect()
    }

    pub async fn select_tab(
        &self,
        key: &str,
    ) -> Result<&'static StatusTab<DesignStatus>, LifecycleError> {
        Ok(self.screen.select_tab(key).await?)
    }

    pub async fn set_search(&self, term: &str) {
        self.screen.set_search(term).await;
    }

    pub async fn active_tab(&self) -> &'static StatusTab<DesignStatus> {
        self.screen.active_tab().await
    }

    pub fn is_busy(&self, design_id: DbId) -> bool {
        self.screen.is_busy(design_id)
    }

    pub async fn newest_design(&self) -> Result<Option<CustomDesign>, LifecycleError> {
        Ok(self.backend.fetch_newest_design().await?)
    }

    /// Validate and submit a new design, then refresh the list.
    pub async fn create_design(
        &self,
        form: &CreateDesignRequest,
        notifier: &dyn Notifier,
    ) -> Result<CustomDesign, LifecycleError> {
        if let Err(e) = form.check() {
            return Err(report_failure(notifier, e.into()));
        }

        let created = match self.backend.create_design(form).await {
            Ok(design) => design,
            Err(e) => return Err(report_failure(notifier, e.into())),
        };
        tracing::info!(design_id = created.id, name = %created.design_name, "Design created");
        notifier.success(DESIGN_CREATED_MESSAGE);

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Re-fetch after design creation failed");
        }
        Ok(created)
    }

    /// Move a design to `target` if the whitelist allows it.
    ///
    /// Unknown designs and unlisted pairs fail before any request is sent.
    /// Confirmation-gated transitions ask `confirmer` first. A second request
    /// for a design whose previous request has not finished fails with
    /// [`LifecycleError::Busy`] without notifying the user. Any other failure
    /// shows the generic failure message exactly once and leaves the cached
    /// list untouched. Once the backend accepts the change the user is told
    /// so, even if the follow-up re-fetch fails.
    pub async fn request_transition(
        &self,
        design_id: DbId,
        target: DesignStatus,
        confirmer: &dyn Confirmer,
        notifier: &dyn Notifier,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let current = match self.screen.find(design_id).await {
            Some(design) => design.status,
            None => {
                let err = CoreError::NotFound {
                    entity: "custom design",
                    id: design_id,
                };
                return Err(report_failure(notifier, err.into()));
            }
        };

        let rule = match find_design_transition(current, target) {
            Ok(rule) => rule,
            Err(e) => return Err(report_failure(notifier, e.into())),
        };

        let _guard = self.screen.claim(design_id)?;

        if let Some(prompt) = rule.confirmation {
            if !confirmer.confirm(prompt).await {
                tracing::info!(design_id, from = %current, to = %target, "Transition declined");
                return Ok(TransitionOutcome::Declined);
            }
        }

        if let Err(e) = self.backend.set_design_status(design_id, target).await {
            return Err(report_failure(notifier, e.into()));
        }
        tracing::info!(design_id, from = %current, to = %target, "Design status changed");
        notifier.success(STATUS_UPDATED_MESSAGE);

        match self.refresh().await {
            Ok(_) => Ok(TransitionOutcome::Applied),
            Err(e) => {
                tracing::warn!(design_id, error = %e, "Re-fetch after status change failed");
                Ok(TransitionOutcome::AppliedStale)
            }
        }
    }
}
