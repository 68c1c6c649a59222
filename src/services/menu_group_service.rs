use std::sync::Arc;
use tracing::instrument;

use crate::models::{CreateMenuGroupRequest, MenuGroup, ServiceResult, Validate};
use crate::repositories::MenuGroupRepository;

/// Service for managing menu groups
pub struct MenuGroupService {
    menu_group_repository: Arc<dyn MenuGroupRepository>,
}

impl MenuGroupService {
    pub fn new(menu_group_repository: Arc<dyn MenuGroupRepository>) -> Self {
        Self {
            menu_group_repository,
        }
    }

    /// Register a new menu group
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateMenuGroupRequest) -> ServiceResult<MenuGroup> {
        crate::info_with_trace!("Registering new menu group");

        request.validate()?;

        let created = self
            .menu_group_repository
            .save(MenuGroup::new(request))
            .await?;

        crate::info_with_trace!("Menu group registered successfully with ID: {}", created.id);
        Ok(created)
    }

    /// List all menu groups
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ServiceResult<Vec<MenuGroup>> {
        let menu_groups = self.menu_group_repository.find_all().await?;

        crate::info_with_trace!("Found {} menu groups", menu_groups.len());
        Ok(menu_groups)
    }
}
