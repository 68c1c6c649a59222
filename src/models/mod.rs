// Re-export all model types
pub use self::errors::*;
pub use self::menu::*;
pub use self::menu_group::*;
pub use self::product::*;
pub use self::validation::*;

mod errors;
mod menu;
mod menu_group;
mod product;
mod validation;
