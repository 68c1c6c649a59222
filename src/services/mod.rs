// Services module - business logic layer

pub mod menu_group_service;
pub mod menu_service;
pub mod product_service;

pub use menu_group_service::MenuGroupService;
pub use menu_service::MenuService;
pub use product_service::ProductService;
