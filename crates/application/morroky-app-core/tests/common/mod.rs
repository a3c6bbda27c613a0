#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use morroky_app_core::{App, AuthPort, MemoryHistory, MerchantsPort, Services, StoragePort};
use morroky_core::{
    AuthChange, AuthUser, LandingPageConfig, Location, Merchant, MerchantFilter, MerchantId,
    MerchantStatus, NewMerchant, NewProduct, Product, ProductId, UploadFile, UserId,
};
use tokio::sync::broadcast;

pub const GOOD_PASSWORD: &str = "secret1";

/// In-memory backend standing in for all three ports.
pub struct FakeBackend {
    pub merchants: Mutex<Vec<Merchant>>,
    pub products: Mutex<Vec<Product>>,
    /// When set, every data call fails with this message.
    pub fail: Mutex<Option<String>>,
    pub calls: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<String>>,
    pub auth_tx: broadcast::Sender<AuthChange>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let (auth_tx, _) = broadcast::channel(16);
        Arc::new(Self {
            merchants: Mutex::new(Vec::new()),
            products: Mutex::new(Vec::new()),
            fail: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            auth_tx,
        })
    }

    pub fn seeded() -> Arc<Self> {
        let backend = Self::new();
        backend.merchants.lock().unwrap().extend([
            merchant("m1", "Bazar Amal", MerchantStatus::Verified, "omar-khayam"),
            merchant("m2", "Dar Nour", MerchantStatus::Verified, "sidi-belyout"),
            merchant("m3", "Attente", MerchantStatus::Pending, "omar-khayam"),
        ]);
        backend.products.lock().unwrap().extend([
            product("p1", "m1", "Caftan"),
            product("p2", "m1", "Babouche"),
            product("p9", "m2", "Tapis"),
        ]);
        backend
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn enter(&self, call: &str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail.lock().unwrap().clone() {
            Some(message) => Err(anyhow::anyhow!(message)),
            None => Ok(()),
        }
    }
}

pub fn merchant(id: &str, name: &str, status: MerchantStatus, street: &str) -> Merchant {
    Merchant {
        id: id.to_string(),
        name: name.to_string(),
        phone: Some("0612345678".to_string()),
        status,
        location: Location {
            street_id: Some(street.to_string()),
            shop_number: Some("12".to_string()),
            ..Location::default()
        },
        owner_id: Some(format!("owner-{id}")),
        ..Merchant::default()
    }
}

pub fn product(id: &str, merchant_id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        merchant_id: merchant_id.to_string(),
        name: name.to_string(),
        price: 150.0,
        image_urls: vec![Some(format!("https://cdn.test/{id}.png")), None, None, None],
        ..Product::default()
    }
}

#[async_trait]
impl AuthPort for FakeBackend {
    async fn sign_up(&self, email: &str, _password: &str) -> anyhow::Result<AuthUser> {
        self.enter("sign_up")?;
        Ok(AuthUser {
            id: "new-user".to_string(),
            email: Some(email.to_string()),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<AuthUser> {
        self.calls.lock().unwrap().push("sign_in".to_string());
        if password != GOOD_PASSWORD {
            anyhow::bail!("Invalid login credentials");
        }
        let user = AuthUser {
            id: "owner-m1".to_string(),
            email: Some(email.to_string()),
        };
        let _ = self.auth_tx.send(AuthChange::SignedIn(user.clone()));
        Ok(user)
    }

    fn sign_in_with_oauth(&self, provider: &str) -> anyhow::Result<String> {
        Ok(format!("https://auth.test/authorize?provider={provider}"))
    }

    async fn sign_out(&self) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push("sign_out".to_string());
        let _ = self.auth_tx.send(AuthChange::SignedOut);
        Ok(())
    }

    async fn current_user(&self) -> anyhow::Result<Option<AuthUser>> {
        Ok(None)
    }

    fn auth_changes(&self) -> broadcast::Receiver<AuthChange> {
        self.auth_tx.subscribe()
    }
}

#[async_trait]
impl MerchantsPort for FakeBackend {
    async fn register_merchant(&self, merchant: &NewMerchant) -> anyhow::Result<MerchantId> {
        self.enter("register_merchant")?;
        let id = "m-new".to_string();
        self.merchants.lock().unwrap().push(Merchant {
            id: id.clone(),
            name: merchant.name.clone(),
            phone: Some(merchant.phone.clone()),
            status: merchant.status,
            location: merchant.location.clone(),
            owner_id: merchant.owner_id.clone(),
            ..Merchant::default()
        });
        Ok(id)
    }

    async fn merchant_by_owner(&self, owner_id: &UserId) -> anyhow::Result<Option<Merchant>> {
        self.enter("merchant_by_owner")?;
        let merchants = self.merchants.lock().unwrap();
        Ok(merchants.iter().find(|m| m.owner_id.as_ref() == Some(owner_id)).cloned())
    }

    async fn merchant_by_id(&self, id: &MerchantId) -> anyhow::Result<Option<Merchant>> {
        self.enter("merchant_by_id")?;
        Ok(self.merchants.lock().unwrap().iter().find(|m| &m.id == id).cloned())
    }

    async fn list_merchants(&self, filter: &MerchantFilter) -> anyhow::Result<Vec<Merchant>> {
        self.enter("list_merchants")?;
        let merchants = self.merchants.lock().unwrap();
        Ok(merchants
            .iter()
            .filter(|m| filter.status.map_or(true, |s| m.status == s))
            .filter(|m| {
                filter
                    .street_id
                    .as_ref()
                    .map_or(true, |s| m.location.street_id.as_ref() == Some(s))
            })
            .cloned()
            .collect())
    }

    async fn pending_merchants(&self) -> anyhow::Result<Vec<Merchant>> {
        self.enter("pending_merchants")?;
        let merchants = self.merchants.lock().unwrap();
        Ok(merchants
            .iter()
            .filter(|m| m.status == MerchantStatus::Pending)
            .cloned()
            .collect())
    }

    async fn verify_merchant(&self, id: &MerchantId) -> anyhow::Result<()> {
        self.enter("verify_merchant")?;
        for m in self.merchants.lock().unwrap().iter_mut().filter(|m| &m.id == id) {
            m.status = MerchantStatus::Verified;
        }
        Ok(())
    }

    async fn update_merchant_logo(&self, id: &MerchantId, url: &str) -> anyhow::Result<()> {
        self.enter("update_merchant_logo")?;
        for m in self.merchants.lock().unwrap().iter_mut().filter(|m| &m.id == id) {
            m.logo_url = Some(url.to_string());
        }
        Ok(())
    }

    async fn update_merchant_background(&self, id: &MerchantId, url: &str) -> anyhow::Result<()> {
        self.enter("update_merchant_background")?;
        for m in self.merchants.lock().unwrap().iter_mut().filter(|m| &m.id == id) {
            m.background_url = Some(url.to_string());
        }
        Ok(())
    }

    async fn add_product(&self, product: &NewProduct) -> anyhow::Result<Product> {
        self.enter("add_product")?;
        let created = Product {
            id: format!("p-{}", self.products.lock().unwrap().len() + 1),
            merchant_id: product.merchant_id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_urls: product.image_urls.clone(),
            ..Product::default()
        };
        self.products.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn products_by_merchant(&self, merchant_id: &MerchantId) -> anyhow::Result<Vec<Product>> {
        self.enter("products_by_merchant")?;
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|p| &p.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    async fn product_by_id(&self, id: &ProductId) -> anyhow::Result<Option<Product>> {
        self.enter("product_by_id")?;
        Ok(self.products.lock().unwrap().iter().find(|p| &p.id == id).cloned())
    }

    async fn delete_product(&self, id: &ProductId) -> anyhow::Result<()> {
        self.enter("delete_product")?;
        self.products.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }

    async fn update_product_image(&self, id: &ProductId, url: &str) -> anyhow::Result<()> {
        self.enter("update_product_image")?;
        for p in self.products.lock().unwrap().iter_mut().filter(|p| &p.id == id) {
            p.image_url = Some(url.to_string());
        }
        Ok(())
    }

    async fn update_product_images(&self, id: &ProductId, urls: Vec<Option<String>>) -> anyhow::Result<()> {
        self.enter("update_product_images")?;
        for p in self.products.lock().unwrap().iter_mut().filter(|p| &p.id == id) {
            p.image_urls = urls.clone();
        }
        Ok(())
    }

    async fn add_product_image(&self, id: &ProductId, url: String) -> anyhow::Result<()> {
        self.enter("add_product_image")?;
        for p in self.products.lock().unwrap().iter_mut().filter(|p| &p.id == id) {
            p.image_urls = morroky_core::append_image(&p.image_urls, url.clone());
        }
        Ok(())
    }

    async fn update_landing_page(&self, id: &ProductId, config: &LandingPageConfig) -> anyhow::Result<()> {
        self.enter("update_landing_page")?;
        for p in self.products.lock().unwrap().iter_mut().filter(|p| &p.id == id) {
            p.landing_page_config = Some(config.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl StoragePort for FakeBackend {
    async fn upload_image(&self, file: &UploadFile, folder: &str) -> anyhow::Result<String> {
        self.enter("upload_image")?;
        let url = format!("https://cdn.test/{folder}/{}", file.file_name);
        self.uploads.lock().unwrap().push(url.clone());
        Ok(url)
    }
}

pub fn services(backend: &Arc<FakeBackend>) -> Services {
    Services {
        auth: backend.clone(),
        merchants: backend.clone(),
        storage: backend.clone(),
    }
}

/// Boots an app at `path` and waits for the first screen's fetches.
pub async fn boot_at(path: &str, backend: &Arc<FakeBackend>) -> App {
    let history = Arc::new(MemoryHistory::new(path));
    let mut app = App::new(services(backend), history).expect("inside a runtime");
    app.boot();
    app.settle().await;
    app
}

pub fn png(name: &str) -> UploadFile {
    UploadFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}
