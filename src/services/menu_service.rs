use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{
    validate_menu_product, validate_name, validate_price, ChangeMenuPriceRequest,
    CreateMenuRequest, Menu, MenuProduct, Product, ServiceError, ServiceResult, ValidationError,
};
use crate::moderation::ProfanityClient;
use crate::repositories::{MenuGroupRepository, MenuRepository, ProductRepository};

/// Service for registering menus and managing their price and visibility
pub struct MenuService {
    menu_repository: Arc<dyn MenuRepository>,
    menu_group_repository: Arc<dyn MenuGroupRepository>,
    product_repository: Arc<dyn ProductRepository>,
    profanity_client: Arc<dyn ProfanityClient>,
}

impl MenuService {
    pub fn new(
        menu_repository: Arc<dyn MenuRepository>,
        menu_group_repository: Arc<dyn MenuGroupRepository>,
        product_repository: Arc<dyn ProductRepository>,
        profanity_client: Arc<dyn ProfanityClient>,
    ) -> Self {
        Self {
            menu_repository,
            menu_group_repository,
            product_repository,
            profanity_client,
        }
    }

    /// Register a new menu
    ///
    /// The checks run in a fixed order; the moderation client is only
    /// consulted once every structural and pricing rule has passed.
    #[instrument(skip(self, request), fields(name = %request.name, menu_group_id = %request.menu_group_id))]
    pub async fn create(&self, request: CreateMenuRequest) -> ServiceResult<Menu> {
        crate::info_with_trace!("Registering new menu");

        validate_price("menu_price", &request.price)?;

        self.menu_group_repository
            .find_by_id(request.menu_group_id)
            .await?
            .ok_or(ServiceError::MenuGroupNotFound {
                id: request.menu_group_id,
            })?;

        if request.menu_products.is_empty() {
            return Err(ValidationError::EmptyMenuProducts.into());
        }

        let product_ids: Vec<Uuid> = request
            .menu_products
            .iter()
            .map(|menu_product| menu_product.product_id)
            .collect();

        let products = self.product_repository.find_all_by_id_in(&product_ids).await?;
        if products.len() != request.menu_products.len() {
            return Err(self.unknown_product_error(&request, &products));
        }

        let products_by_id: HashMap<Uuid, Product> = products
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let mut menu_products = Vec::with_capacity(request.menu_products.len());
        for menu_product in &request.menu_products {
            validate_menu_product(menu_product)?;

            let product = products_by_id
                .get(&menu_product.product_id)
                .cloned()
                .ok_or(ValidationError::UnknownProduct {
                    id: menu_product.product_id,
                })?;

            menu_products.push(MenuProduct {
                product,
                quantity: menu_product.quantity,
            });
        }

        let total: Decimal = menu_products
            .iter()
            .map(|menu_product| menu_product.product.price * Decimal::from(menu_product.quantity))
            .sum();
        if request.price > total {
            return Err(ValidationError::PriceAboveProductTotal {
                price: request.price.to_string(),
                total: total.to_string(),
            }
            .into());
        }

        validate_name("menu_name", &request.name)?;
        if self.profanity_client.contains_profanity(&request.name).await? {
            return Err(ValidationError::Profanity {
                field: "menu_name".to_string(),
            }
            .into());
        }

        let menu = Menu::new(request, menu_products);
        let created = self.menu_repository.save(menu).await?;

        crate::info_with_trace!("Menu registered successfully with ID: {}", created.id);
        Ok(created)
    }

    /// Change the price of an existing menu
    ///
    /// The price itself is validated before the menu is looked up.
    #[instrument(skip(self, request), fields(menu_id = %menu_id))]
    pub async fn change_price(
        &self,
        menu_id: Uuid,
        request: ChangeMenuPriceRequest,
    ) -> ServiceResult<Menu> {
        crate::info_with_trace!("Changing menu price");

        validate_price("menu_price", &request.price)?;

        let mut menu = self
            .menu_repository
            .find_by_id(menu_id)
            .await?
            .ok_or(ServiceError::MenuNotFound { id: menu_id })?;

        let total = menu.menu_product_total();
        if request.price > total {
            return Err(ValidationError::PriceAboveProductTotal {
                price: request.price.to_string(),
                total: total.to_string(),
            }
            .into());
        }

        menu.change_price(request.price);
        let updated = self.menu_repository.update(menu).await?;

        crate::info_with_trace!("Menu price changed successfully");
        Ok(updated)
    }

    /// Make a menu visible to customers
    #[instrument(skip(self), fields(menu_id = %menu_id))]
    pub async fn display(&self, menu_id: Uuid) -> ServiceResult<Menu> {
        crate::info_with_trace!("Displaying menu");

        let mut menu = self
            .menu_repository
            .find_by_id(menu_id)
            .await?
            .ok_or(ServiceError::MenuNotFound { id: menu_id })?;

        // An over-priced menu is a state problem, not an input problem
        if menu.price_exceeds_product_total() {
            return Err(ServiceError::MenuNotDisplayable { menu_id });
        }

        menu.set_displayed(true);
        let updated = self.menu_repository.update(menu).await?;

        crate::info_with_trace!("Menu displayed successfully");
        Ok(updated)
    }

    /// Hide a menu from customers
    #[instrument(skip(self), fields(menu_id = %menu_id))]
    pub async fn hide(&self, menu_id: Uuid) -> ServiceResult<Menu> {
        crate::info_with_trace!("Hiding menu");

        let mut menu = self
            .menu_repository
            .find_by_id(menu_id)
            .await?
            .ok_or(ServiceError::MenuNotFound { id: menu_id })?;

        menu.set_displayed(false);
        let updated = self.menu_repository.update(menu).await?;

        crate::info_with_trace!("Menu hidden successfully");
        Ok(updated)
    }

    /// List all menus
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ServiceResult<Vec<Menu>> {
        let menus = self.menu_repository.find_all().await?;

        crate::info_with_trace!("Found {} menus", menus.len());
        Ok(menus)
    }

    fn unknown_product_error(
        &self,
        request: &CreateMenuRequest,
        found: &[Product],
    ) -> ServiceError {
        let found_ids: HashSet<Uuid> = found.iter().map(|product| product.id).collect();

        match request
            .menu_products
            .iter()
            .find(|menu_product| !found_ids.contains(&menu_product.product_id))
        {
            Some(menu_product) => ValidationError::UnknownProduct {
                id: menu_product.product_id,
            }
            .into(),
            // Same product referenced more than once
            None => ServiceError::ValidationError {
                message: "Menu products must reference distinct products".to_string(),
            },
        }
    }
}
