pub mod menu_group_repository;
pub mod menu_repository;
pub mod product_repository;

pub use menu_group_repository::{InMemoryMenuGroupRepository, MenuGroupRepository};
pub use menu_repository::{InMemoryMenuRepository, MenuRepository};
pub use product_repository::{InMemoryProductRepository, ProductRepository};
