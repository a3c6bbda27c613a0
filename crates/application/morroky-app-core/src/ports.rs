use async_trait::async_trait;
use morroky_core::{
    AuthChange, AuthUser, LandingPageConfig, Merchant, MerchantFilter, MerchantId, MerchantStatus,
    NewMerchant, NewProduct, Product, ProductId, UploadFile, UserId,
};
use tokio::sync::broadcast;

#[async_trait]
pub trait AuthPort: Send + Sync + 'static {
    async fn sign_up(&self, email: &str, password: &str) -> anyhow::Result<AuthUser>;
    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<AuthUser>;
    /// Address the browser must open to continue with `provider`.
    fn sign_in_with_oauth(&self, provider: &str) -> anyhow::Result<String>;
    async fn sign_out(&self) -> anyhow::Result<()>;
    async fn current_user(&self) -> anyhow::Result<Option<AuthUser>>;
    fn auth_changes(&self) -> broadcast::Receiver<AuthChange>;
}

/// Merchant and product rows. Rows the caller may not see come back as
/// `None` or an empty list, exactly like rows that do not exist.
#[async_trait]
pub trait MerchantsPort: Send + Sync + 'static {
    async fn register_merchant(&self, merchant: &NewMerchant) -> anyhow::Result<MerchantId>;
    async fn merchant_by_owner(&self, owner_id: &UserId) -> anyhow::Result<Option<Merchant>>;
    async fn merchant_by_id(&self, id: &MerchantId) -> anyhow::Result<Option<Merchant>>;
    async fn list_merchants(&self, filter: &MerchantFilter) -> anyhow::Result<Vec<Merchant>>;
    async fn pending_merchants(&self) -> anyhow::Result<Vec<Merchant>>;
    async fn verify_merchant(&self, id: &MerchantId) -> anyhow::Result<()>;
    async fn update_merchant_logo(&self, id: &MerchantId, url: &str) -> anyhow::Result<()>;
    async fn update_merchant_background(&self, id: &MerchantId, url: &str) -> anyhow::Result<()>;

    async fn add_product(&self, product: &NewProduct) -> anyhow::Result<Product>;
    /// Newest first.
    async fn products_by_merchant(&self, merchant_id: &MerchantId) -> anyhow::Result<Vec<Product>>;
    async fn product_by_id(&self, id: &ProductId) -> anyhow::Result<Option<Product>>;
    async fn delete_product(&self, id: &ProductId) -> anyhow::Result<()>;
    async fn update_product_image(&self, id: &ProductId, url: &str) -> anyhow::Result<()>;
    async fn update_product_images(&self, id: &ProductId, urls: Vec<Option<String>>) -> anyhow::Result<()>;
    async fn add_product_image(&self, id: &ProductId, url: String) -> anyhow::Result<()>;
    async fn update_landing_page(&self, id: &ProductId, config: &LandingPageConfig) -> anyhow::Result<()>;

    async fn verified_merchants(&self, filter: &MerchantFilter) -> anyhow::Result<Vec<Merchant>> {
        let filter = MerchantFilter {
            status: Some(MerchantStatus::Verified),
            ..filter.clone()
        };
        self.list_merchants(&filter).await
    }
}

#[async_trait]
pub trait StoragePort: Send + Sync + 'static {
    /// Stores `file` under `folder` and returns its public URL. Type and size
    /// checks are the caller's job.
    async fn upload_image(&self, file: &UploadFile, folder: &str) -> anyhow::Result<String>;
}

/// The navigable location.
pub trait HistoryPort: Send + Sync + 'static {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
}
