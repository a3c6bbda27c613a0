//! Port implementations backed by the HTTP client.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use morroky_core::{
    AuthChange, AuthUser, LandingPageConfig, Merchant, MerchantFilter, MerchantId, NewMerchant,
    NewProduct, Product, ProductId, UploadFile, UserId,
};
use morroky_infra::BaasClient;
use tokio::sync::broadcast;

use crate::ports::{AuthPort, MerchantsPort, StoragePort};
use crate::screens::Services;

#[async_trait]
impl AuthPort for BaasClient {
    async fn sign_up(&self, email: &str, password: &str) -> anyhow::Result<AuthUser> {
        Ok(BaasClient::sign_up(self, email, password).await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<AuthUser> {
        Ok(BaasClient::sign_in(self, email, password).await?)
    }

    fn sign_in_with_oauth(&self, provider: &str) -> anyhow::Result<String> {
        Ok(self.oauth_authorize_url(provider, None))
    }

    async fn sign_out(&self) -> anyhow::Result<()> {
        BaasClient::sign_out(self).await.context("sign out")
    }

    async fn current_user(&self) -> anyhow::Result<Option<AuthUser>> {
        BaasClient::current_user(self).await.context("load current user")
    }

    fn auth_changes(&self) -> broadcast::Receiver<AuthChange> {
        self.subscribe_auth()
    }
}

#[async_trait]
impl MerchantsPort for BaasClient {
    async fn register_merchant(&self, merchant: &NewMerchant) -> anyhow::Result<MerchantId> {
        BaasClient::register_merchant(self, merchant)
            .await
            .context("register merchant")
    }

    async fn merchant_by_owner(&self, owner_id: &UserId) -> anyhow::Result<Option<Merchant>> {
        BaasClient::merchant_by_owner(self, owner_id)
            .await
            .with_context(|| format!("merchant owned by {owner_id}"))
    }

    async fn merchant_by_id(&self, id: &MerchantId) -> anyhow::Result<Option<Merchant>> {
        BaasClient::merchant_by_id(self, id)
            .await
            .with_context(|| format!("merchant {id}"))
    }

    async fn list_merchants(&self, filter: &MerchantFilter) -> anyhow::Result<Vec<Merchant>> {
        BaasClient::list_merchants(self, filter)
            .await
            .context("list merchants")
    }

    async fn pending_merchants(&self) -> anyhow::Result<Vec<Merchant>> {
        BaasClient::pending_merchants(self)
            .await
            .context("list pending merchants")
    }

    async fn verify_merchant(&self, id: &MerchantId) -> anyhow::Result<()> {
        BaasClient::verify_merchant(self, id)
            .await
            .with_context(|| format!("verify merchant {id}"))
    }

    async fn update_merchant_logo(&self, id: &MerchantId, url: &str) -> anyhow::Result<()> {
        BaasClient::update_merchant_logo(self, id, url)
            .await
            .context("update logo")
    }

    async fn update_merchant_background(&self, id: &MerchantId, url: &str) -> anyhow::Result<()> {
        BaasClient::update_merchant_background(self, id, url)
            .await
            .context("update background")
    }

    async fn add_product(&self, product: &NewProduct) -> anyhow::Result<Product> {
        BaasClient::add_product(self, product)
            .await
            .context("add product")
    }

    async fn products_by_merchant(&self, merchant_id: &MerchantId) -> anyhow::Result<Vec<Product>> {
        BaasClient::products_by_merchant(self, merchant_id)
            .await
            .with_context(|| format!("products of merchant {merchant_id}"))
    }

    async fn product_by_id(&self, id: &ProductId) -> anyhow::Result<Option<Product>> {
        BaasClient::product_by_id(self, id)
            .await
            .with_context(|| format!("product {id}"))
    }

    async fn delete_product(&self, id: &ProductId) -> anyhow::Result<()> {
        BaasClient::delete_product(self, id)
            .await
            .with_context(|| format!("delete product {id}"))
    }

    async fn update_product_image(&self, id: &ProductId, url: &str) -> anyhow::Result<()> {
        BaasClient::update_product_image(self, id, url)
            .await
            .context("update product image")
    }

    async fn update_product_images(&self, id: &ProductId, urls: Vec<Option<String>>) -> anyhow::Result<()> {
        BaasClient::update_product_images(self, id, urls)
            .await
            .context("update product images")
    }

    async fn add_product_image(&self, id: &ProductId, url: String) -> anyhow::Result<()> {
        BaasClient::add_product_image(self, id, url)
            .await
            .context("add product image")
    }

    async fn update_landing_page(&self, id: &ProductId, config: &LandingPageConfig) -> anyhow::Result<()> {
        BaasClient::update_landing_page(self, id, config)
            .await
            .context("update landing page")
    }
}

#[async_trait]
impl StoragePort for BaasClient {
    async fn upload_image(&self, file: &UploadFile, folder: &str) -> anyhow::Result<String> {
        BaasClient::upload_image(self, file, folder)
            .await
            .with_context(|| format!("upload {}", file.file_name))
    }
}

impl Services {
    /// All three ports served by one client.
    pub fn from_baas(client: Arc<BaasClient>) -> Self {
        Self {
            auth: client.clone(),
            merchants: client.clone(),
            storage: client,
        }
    }
}
