use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection that menus belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub id: Uuid,
    pub name: String,
}

/// Request model for registering a new menu group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuGroupRequest {
    pub name: String,
}

impl MenuGroup {
    pub fn new(request: CreateMenuGroupRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
        }
    }
}
