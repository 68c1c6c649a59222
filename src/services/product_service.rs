use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{
    validate_price, ChangeProductPriceRequest, CreateProductRequest, Product, ServiceError,
    ServiceResult, Validate, ValidationError,
};
use crate::moderation::ProfanityClient;
use crate::repositories::{MenuRepository, ProductRepository};

/// Service for managing products and keeping dependent menus consistent
pub struct ProductService {
    product_repository: Arc<dyn ProductRepository>,
    menu_repository: Arc<dyn MenuRepository>,
    profanity_client: Arc<dyn ProfanityClient>,
}

impl ProductService {
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        menu_repository: Arc<dyn MenuRepository>,
        profanity_client: Arc<dyn ProfanityClient>,
    ) -> Self {
        Self {
            product_repository,
            menu_repository,
            profanity_client,
        }
    }

    /// Register a new product
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateProductRequest) -> ServiceResult<Product> {
        crate::info_with_trace!("Registering new product");

        request.validate()?;

        if self.profanity_client.contains_profanity(&request.name).await? {
            return Err(ValidationError::Profanity {
                field: "product_name".to_string(),
            }
            .into());
        }

        let created = self.product_repository.save(Product::new(request)).await?;

        crate::info_with_trace!("Product registered successfully with ID: {}", created.id);
        Ok(created)
    }

    /// Change the price of a product
    ///
    /// Menus containing the product are re-priced against the new product
    /// price; any menu whose price now exceeds its product total is hidden.
    /// A menu that was hidden this way is never re-displayed automatically.
    #[instrument(skip(self, request), fields(product_id = %product_id))]
    pub async fn change_price(
        &self,
        product_id: Uuid,
        request: ChangeProductPriceRequest,
    ) -> ServiceResult<Product> {
        crate::info_with_trace!("Changing product price");

        validate_price("product_price", &request.price)?;

        let mut product = self
            .product_repository
            .find_by_id(product_id)
            .await?
            .ok_or(ServiceError::ProductNotFound { id: product_id })?;

        product.change_price(request.price);
        let updated = self.product_repository.update(product).await?;

        let menus = self.menu_repository.find_all_by_product_id(product_id).await?;
        for mut menu in menus {
            for menu_product in &mut menu.menu_products {
                if menu_product.product.id == product_id {
                    menu_product.product.price = updated.price;
                }
            }

            if menu.price_exceeds_product_total() && menu.displayed {
                crate::warn_with_trace!(
                    menu_id = %menu.id,
                    "Menu price exceeds new product total, hiding menu"
                );
                menu.set_displayed(false);
            }

            self.menu_repository.update(menu).await?;
        }

        crate::info_with_trace!("Product price changed successfully");
        Ok(updated)
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ServiceResult<Vec<Product>> {
        let products = self.product_repository.find_all().await?;

        crate::info_with_trace!("Found {} products", products.len());
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CreateMenuRequest, Menu, MenuProduct, MenuProductRequest, RepositoryError,
    };
    use crate::moderation::ModerationError;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    mock! {
        TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;
            async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
            async fn find_all_by_id_in(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
            async fn save(&self, product: Product) -> Result<Product, RepositoryError>;
            async fn update(&self, product: Product) -> Result<Product, RepositoryError>;
        }
    }

    mock! {
        TestMenuRepository {}

        #[async_trait]
        impl MenuRepository for TestMenuRepository {
            async fn find_all(&self) -> Result<Vec<Menu>, RepositoryError>;
            async fn find_by_id(&self, id: Uuid) -> Result<Option<Menu>, RepositoryError>;
            async fn find_all_by_product_id(&self, product_id: Uuid) -> Result<Vec<Menu>, RepositoryError>;
            async fn save(&self, menu: Menu) -> Result<Menu, RepositoryError>;
            async fn update(&self, menu: Menu) -> Result<Menu, RepositoryError>;
        }
    }

    mock! {
        TestProfanityClient {}

        #[async_trait]
        impl ProfanityClient for TestProfanityClient {
            async fn contains_profanity(&self, text: &str) -> Result<bool, ModerationError>;
        }
    }

    fn fried_chicken() -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Fried Chicken".to_string(),
            price: dec!(6000),
        }
    }

    fn menu_with(product: &Product, price: rust_decimal::Decimal, displayed: bool) -> Menu {
        let request = CreateMenuRequest {
            name: "Chicken Set".to_string(),
            price,
            menu_group_id: Uuid::new_v4(),
            displayed,
            menu_products: vec![MenuProductRequest {
                product_id: product.id,
                quantity: 1,
            }],
        };
        Menu::new(
            request,
            vec![MenuProduct {
                product: product.clone(),
                quantity: 1,
            }],
        )
    }

    fn service(
        products: MockTestProductRepository,
        menus: MockTestMenuRepository,
        profanity: MockTestProfanityClient,
    ) -> ProductService {
        ProductService::new(Arc::new(products), Arc::new(menus), Arc::new(profanity))
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut products = MockTestProductRepository::new();
        let menus = MockTestMenuRepository::new();
        let mut profanity = MockTestProfanityClient::new();

        profanity
            .expect_contains_profanity()
            .with(eq("Fried Chicken"))
            .times(1)
            .returning(|_| Ok(false));
        products.expect_save().times(1).returning(Ok);

        let service = service(products, menus, profanity);

        let product = service
            .create(CreateProductRequest {
                name: "Fried Chicken".to_string(),
                price: dec!(6000),
            })
            .await
            .unwrap();

        assert_eq!(product.name, "Fried Chicken");
        assert_eq!(product.price, dec!(6000));
    }

    #[tokio::test]
    async fn test_create_negative_price() {
        let service = service(
            MockTestProductRepository::new(),
            MockTestMenuRepository::new(),
            MockTestProfanityClient::new(),
        );

        let result = service
            .create(CreateProductRequest {
                name: "Fried Chicken".to_string(),
                price: dec!(-1),
            })
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_create_profane_name() {
        let products = MockTestProductRepository::new();
        let menus = MockTestMenuRepository::new();
        let mut profanity = MockTestProfanityClient::new();

        profanity
            .expect_contains_profanity()
            .times(1)
            .returning(|_| Ok(true));

        let service = service(products, menus, profanity);

        let result = service
            .create(CreateProductRequest {
                name: "rude name".to_string(),
                price: dec!(6000),
            })
            .await;

        match result {
            Err(ServiceError::ValidationError { message }) => {
                assert!(message.contains("profanity"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_change_price_success() {
        let mut products = MockTestProductRepository::new();
        let mut menus = MockTestMenuRepository::new();
        let product = fried_chicken();
        let product_id = product.id;

        products
            .expect_find_by_id()
            .with(eq(product_id))
            .times(1)
            .returning(move |_| Ok(Some(product.clone())));
        products.expect_update().times(1).returning(Ok);
        menus
            .expect_find_all_by_product_id()
            .with(eq(product_id))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(products, menus, MockTestProfanityClient::new());

        let updated = service
            .change_price(product_id, ChangeProductPriceRequest { price: dec!(6500) })
            .await
            .unwrap();

        assert_eq!(updated.price, dec!(6500));
    }

    #[tokio::test]
    async fn test_change_price_hides_overpriced_menus() {
        let mut products = MockTestProductRepository::new();
        let mut menus = MockTestMenuRepository::new();
        let product = fried_chicken();
        let product_id = product.id;

        // Menu priced at 5500 stays valid only while the product costs 6000
        let menu = menu_with(&product, dec!(5500), true);

        products
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(product.clone())));
        products.expect_update().times(1).returning(Ok);
        menus
            .expect_find_all_by_product_id()
            .times(1)
            .returning(move |_| Ok(vec![menu.clone()]));
        menus
            .expect_update()
            .times(1)
            .withf(|menu: &Menu| !menu.displayed && menu.menu_products[0].product.price == dec!(5000))
            .returning(Ok);

        let service = service(products, menus, MockTestProfanityClient::new());

        service
            .change_price(product_id, ChangeProductPriceRequest { price: dec!(5000) })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_price_keeps_cheap_menus_displayed() {
        let mut products = MockTestProductRepository::new();
        let mut menus = MockTestMenuRepository::new();
        let product = fried_chicken();
        let product_id = product.id;

        let menu = menu_with(&product, dec!(4000), true);

        products
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(product.clone())));
        products.expect_update().times(1).returning(Ok);
        menus
            .expect_find_all_by_product_id()
            .times(1)
            .returning(move |_| Ok(vec![menu.clone()]));
        menus
            .expect_update()
            .times(1)
            .withf(|menu: &Menu| menu.displayed)
            .returning(Ok);

        let service = service(products, menus, MockTestProfanityClient::new());

        service
            .change_price(product_id, ChangeProductPriceRequest { price: dec!(5000) })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_price_missing_product() {
        let mut products = MockTestProductRepository::new();
        products
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(
            products,
            MockTestMenuRepository::new(),
            MockTestProfanityClient::new(),
        );
        let product_id = Uuid::new_v4();

        let result = service
            .change_price(product_id, ChangeProductPriceRequest { price: dec!(5000) })
            .await;

        match result {
            Err(ServiceError::ProductNotFound { id }) => assert_eq!(id, product_id),
            other => panic!("Expected ProductNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_change_price_negative() {
        let service = service(
            MockTestProductRepository::new(),
            MockTestMenuRepository::new(),
            MockTestProfanityClient::new(),
        );

        let result = service
            .change_price(Uuid::new_v4(), ChangeProductPriceRequest { price: dec!(-1) })
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_find_all() {
        let mut products = MockTestProductRepository::new();
        products
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![]));

        let service = service(
            products,
            MockTestMenuRepository::new(),
            MockTestProfanityClient::new(),
        );

        let all = service.find_all().await.unwrap();
        assert!(all.is_empty());
    }
}
