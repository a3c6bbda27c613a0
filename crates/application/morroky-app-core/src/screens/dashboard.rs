//! Merchant back office: branding, product catalogue and landing pages.

use morroky_config::{is_accepted_image, MAX_UPLOAD_BYTES, PRODUCT_IMAGE_SLOTS};
use morroky_core::{Merchant, MerchantId, NewProduct, Product, ProductId, UploadFile};

use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::{AppState, ScreenId};
use crate::markup::{denied_view, escape_html, image_or_placeholder, loading_view, price};
use crate::widgets::ConfirmOptions;

#[derive(Debug)]
pub enum DashboardEvent {
    Loaded {
        seq: u64,
        result: Result<(Option<Merchant>, Vec<Product>), String>,
    },
    ProductAdded(Result<Product, String>),
    ImageUpdated(Result<(), String>),
    DeleteConfirmed(ProductId),
    Deleted(Result<(), String>),
    SignedOut,
}

/// Where an uploaded picture ends up.
#[derive(Debug, Clone)]
enum ImageTarget {
    Logo,
    Background,
    Product(ProductId),
}

impl ImageTarget {
    fn folder(&self, merchant_id: &str) -> String {
        match self {
            ImageTarget::Logo => "logo".to_string(),
            ImageTarget::Background => "background".to_string(),
            ImageTarget::Product(_) => product_folder(merchant_id),
        }
    }
}

fn product_folder(merchant_id: &str) -> String {
    format!("products/{merchant_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Loading,
    Denied,
    Ready,
}

pub struct DashboardScreen {
    merchant_id: Option<MerchantId>,
    view: View,
    merchant: Option<Merchant>,
    products: Vec<Product>,
    staged: Vec<Option<UploadFile>>,
    show_picker: bool,
    is_submitting: bool,
    busy: Option<&'static str>,
    request_seq: u64,
}

impl DashboardScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            merchant_id: state.merchant_id.clone(),
            view: View::Loading,
            merchant: None,
            products: Vec::new(),
            staged: vec![None; PRODUCT_IMAGE_SLOTS],
            show_picker: false,
            is_submitting: false,
            busy: None,
            request_seq: 0,
        }
    }

    fn fetch(&mut self, ctx: &ScreenContext) {
        let Some(id) = self.merchant_id.clone() else {
            return;
        };
        self.request_seq += 1;
        let seq = self.request_seq;
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let result = futures::try_join!(
                merchants.merchant_by_id(&id),
                merchants.products_by_merchant(&id)
            );
            DashboardEvent::Loaded {
                seq,
                result: result.map_err(|e| error_text(&e)),
            }
        });
    }

    /// Type and size checks done before anything reaches storage.
    fn check_image(file: &UploadFile, ctx: &ScreenContext) -> bool {
        if !is_accepted_image(&file.file_name) {
            ctx.toast.error(copy::UNSUPPORTED_IMAGE);
            return false;
        }
        if file.len() > MAX_UPLOAD_BYTES {
            ctx.toast.error(copy::IMAGE_TOO_LARGE);
            return false;
        }
        true
    }

    fn begin(&mut self, ctx: &ScreenContext, message: &'static str) -> bool {
        if self.is_submitting {
            return false;
        }
        self.update(ctx, |s| {
            s.is_submitting = true;
            s.busy = Some(message);
        });
        true
    }

    fn finish(&mut self) {
        self.is_submitting = false;
        self.busy = None;
    }

    fn upload(&mut self, file: UploadFile, target: ImageTarget, ctx: &ScreenContext) {
        let Some(merchant_id) = self.merchant_id.clone() else {
            return;
        };
        if !Self::check_image(&file, ctx) || !self.begin(ctx, copy::DASH_UPLOADING) {
            return;
        }
        let storage = ctx.services.storage.clone();
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let result = async {
                let url = storage
                    .upload_image(&file, &target.folder(&merchant_id))
                    .await?;
                match &target {
                    ImageTarget::Logo => merchants.update_merchant_logo(&merchant_id, &url).await,
                    ImageTarget::Background => {
                        merchants.update_merchant_background(&merchant_id, &url).await
                    }
                    ImageTarget::Product(id) => merchants.update_product_image(id, &url).await,
                }
            }
            .await;
            DashboardEvent::ImageUpdated(result.map_err(|e| error_text(&e)))
        });
    }

    fn add_product(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        let Some(merchant_id) = self.merchant_id.clone() else {
            return;
        };
        let name = ev.field("prod-name").to_string();
        let raw_price = ev.field("prod-price");
        if name.is_empty() || raw_price.is_empty() {
            ctx.toast.error(copy::DASH_MISSING_FIELDS);
            return;
        }
        let price = match raw_price.parse::<f64>() {
            Ok(p) if p.is_finite() && p > 0.0 => p,
            _ => {
                ctx.toast.error(copy::DASH_BAD_PRICE);
                return;
            }
        };
        let files: Vec<UploadFile> = self.staged.iter().flatten().cloned().collect();
        if files.is_empty() {
            ctx.toast.error(copy::DASH_NEED_IMAGE);
            return;
        }
        if !self.begin(ctx, copy::DASH_ADDING) {
            return;
        }

        let storage = ctx.services.storage.clone();
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let folder = product_folder(&merchant_id);
            let mut urls = Vec::with_capacity(files.len());
            for file in &files {
                match storage.upload_image(file, &folder).await {
                    Ok(url) => urls.push(url),
                    Err(e) => {
                        tracing::warn!(file = %file.file_name, error = %e, "product image upload failed, skipping");
                    }
                }
            }
            if urls.is_empty() {
                return DashboardEvent::ProductAdded(Err(copy::DASH_NEED_IMAGE.to_string()));
            }
            let product = NewProduct::new(merchant_id, name, price, urls);
            let result = merchants.add_product(&product).await;
            DashboardEvent::ProductAdded(result.map_err(|e| error_text(&e)))
        });
    }

    fn ask_delete(&self, product_id: ProductId, ctx: &ScreenContext) {
        let spawner = ctx.spawner.clone();
        ctx.confirm.show(
            ConfirmOptions::new(copy::DASH_DELETE_TITLE, copy::DASH_DELETE_MESSAGE)
                .on_confirm(move || spawner.post(DashboardEvent::DeleteConfirmed(product_id))),
        );
    }

    fn sign_out(&self, ctx: &ScreenContext) {
        let auth = ctx.services.auth.clone();
        ctx.spawner.spawn(async move {
            if let Err(e) = auth.sign_out().await {
                tracing::warn!(error = %e, "sign out failed");
            }
            DashboardEvent::SignedOut
        });
    }

    fn image_slot(&self, index: usize) -> String {
        match self.staged.get(index).and_then(Option::as_ref) {
            Some(file) => format!(
                r#"<div id="upload-slot-{index}" class="relative aspect-square rounded-xl border-2 border-morroky-blue flex items-center justify-center text-xs p-2">
  <span class="truncate">{name}</span>
  <button type="button" id="remove-{index}" class="absolute top-1 left-1 bg-red-500 text-white rounded-full w-6 h-6">&times;</button>
</div>"#,
                name = escape_html(&file.file_name)
            ),
            None => format!(
                r#"<label id="upload-slot-{index}" class="aspect-square rounded-xl border-2 border-dashed border-gray-300 flex flex-col items-center justify-center cursor-pointer">
  <span class="text-2xl">📷</span><span class="text-xs text-gray-500">{label}</span>
  <input id="prod-image-{index}" type="file" accept="image/*" class="hidden">
</label>"#,
                label = copy::DASH_ADD_IMAGE
            ),
        }
    }

    fn product_row(p: &Product) -> String {
        let id = escape_html(&p.id);
        format!(
            r#"<div class="bg-white rounded-2xl shadow-sm overflow-hidden">
  <div class="relative">
    <img src="{img}" alt="" class="w-full h-40 object-cover">
    <label class="absolute bottom-2 left-2 bg-white/90 px-3 py-1 rounded-lg text-xs font-bold cursor-pointer">{change}
      <input type="file" data-product-id="{id}" class="product-image-input hidden" accept="image/*">
    </label>
  </div>
  <div class="p-4 flex justify-between items-center">
    <div><h4 class="font-bold">{name}</h4><p class="text-morroky-red font-black">{price}</p></div>
    <button class="delete-product-btn text-red-500" data-product-id="{id}">🗑️</button>
  </div>
</div>"#,
            img = image_or_placeholder(p.cover_image(), "400x300"),
            change = copy::DASH_CHANGE_LOGO,
            name = escape_html(&p.name),
            price = price(p.price),
        )
    }

    fn picker(&self) -> String {
        if !self.show_picker {
            return String::new();
        }
        let items = if self.products.is_empty() {
            format!(r#"<p class="text-gray-500">{}</p>"#, copy::DASH_NEED_PRODUCTS)
        } else {
            self.products
                .iter()
                .map(|p| {
                    format!(
                        r#"<div class="lp-product-item flex items-center justify-between p-4 bg-gray-50 rounded-xl border cursor-pointer" data-product-id="{}"><span class="font-bold">{}</span><span class="text-morroky-blue">{}</span></div>"#,
                        escape_html(&p.id),
                        escape_html(&p.name),
                        copy::DASH_CUSTOMIZE
                    )
                })
                .collect()
        };
        format!(
            r#"<div id="landing-page-modal" class="fixed inset-0 bg-black/50 z-40 flex items-center justify-center p-4">
  <div class="modal-content bg-white rounded-3xl p-6 max-w-md w-full space-y-3">
    <div class="flex justify-between items-center"><h3 class="text-xl font-bold">{title}</h3><button id="close-lp-modal" class="text-2xl">&times;</button></div>
    {items}
  </div>
</div>"#,
            title = copy::DASH_PICK_PRODUCT,
        )
    }
}

impl Screen for DashboardScreen {
    fn id(&self) -> ScreenId {
        ScreenId::MerchantDashboard
    }

    fn template(&self) -> String {
        let m = match (self.view, &self.merchant) {
            (View::Loading, _) => return loading_view(copy::DASH_LOADING),
            (View::Ready, Some(m)) => m,
            _ => {
                return denied_view(
                    copy::DASH_DENIED_TITLE,
                    copy::DASH_DENIED_BODY,
                    "btn-logout",
                    copy::BACK_AND_SIGN_IN,
                )
            }
        };

        let busy = self
            .busy
            .map(|msg| {
                format!(
                    r#"<div id="busy-overlay" class="fixed inset-0 bg-white/70 z-30 flex items-center justify-center"><p class="font-bold text-gray-700">{msg}</p></div>"#
                )
            })
            .unwrap_or_default();
        let slots: String = (0..PRODUCT_IMAGE_SLOTS).map(|i| self.image_slot(i)).collect();
        let products: String = self.products.iter().map(Self::product_row).collect();
        let disabled = if self.is_submitting { " disabled" } else { "" };

        format!(
            r#"<div class="min-h-screen bg-gray-50 rtl">
  {busy}
  <header class="bg-white shadow-sm px-6 py-4 flex justify-between items-center">
    <a href="/" id="back-link" class="text-blue-600 font-bold">{back}</a>
    <h1 class="text-xl font-black text-gray-900">{title}</h1>
    <button id="btn-logout" class="text-sm text-red-500 font-bold">{sign_out}</button>
  </header>
  <main class="max-w-6xl mx-auto p-6 space-y-8">
    <section class="bg-white rounded-3xl p-6 shadow-sm">
      <h2 class="text-lg font-bold mb-4">{branding}</h2>
      <div class="relative h-40 rounded-2xl bg-cover bg-center" style="background-image:url('{background}')">
        <label class="absolute top-2 left-2 bg-white/90 px-3 py-1 rounded-lg text-xs font-bold cursor-pointer">{change_background}<input id="background-input" type="file" accept="image/*" class="hidden"></label>
        <div class="absolute -bottom-8 right-6">
          <img src="{logo}" alt="" class="w-20 h-20 rounded-2xl border-4 border-white object-cover">
          <label class="text-xs font-bold text-morroky-blue cursor-pointer">{change_logo}<input id="logo-input" type="file" accept="image/*" class="hidden"></label>
        </div>
      </div>
    </section>
    <section class="bg-white rounded-3xl p-6 shadow-sm">
      <h2 class="text-lg font-bold mb-4">{add_title}</h2>
      <form id="add-product-form" class="space-y-4">
        <input id="prod-name" name="prod-name" type="text" placeholder="{name_label}" class="w-full px-4 py-3 border rounded-xl">
        <input id="prod-price" name="prod-price" type="number" step="0.01" placeholder="{price_label}" class="w-full px-4 py-3 border rounded-xl">
        <p class="text-sm font-bold text-gray-700">{images_label}</p>
        <div class="grid grid-cols-4 gap-3">{slots}</div>
        <button type="submit"{disabled} class="w-full bg-morroky-dark text-white font-bold py-3 rounded-xl disabled:opacity-50">{submit}</button>
      </form>
    </section>
    <section class="space-y-4">
      <div class="flex justify-between items-center">
        <h2 class="text-lg font-bold">{products_title}</h2>
        <div class="flex gap-2">
          <button id="create-landing-page-btn" class="bg-morroky-blue text-white px-4 py-2 rounded-lg font-bold">{landing}</button>
          <button id="btn-logout-products" class="bg-red-500 text-white px-4 py-2 rounded-lg font-bold">{sign_out}</button>
        </div>
      </div>
      <div class="grid grid-cols-2 md:grid-cols-3 gap-4">{products}</div>
    </section>
  </main>
</div>
{picker}"#,
            back = copy::BACK_HOME,
            title = escape_html(&copy::dash_title(&m.name)),
            sign_out = copy::SIGN_OUT,
            branding = copy::DASH_BRANDING,
            background = image_or_placeholder(m.background_url.as_deref(), "1200x300"),
            change_background = copy::DASH_CHANGE_BACKGROUND,
            logo = image_or_placeholder(m.logo_url.as_deref(), "200x200"),
            change_logo = copy::DASH_CHANGE_LOGO,
            add_title = copy::DASH_ADD_PRODUCT,
            name_label = copy::DASH_PRODUCT_NAME,
            price_label = copy::DASH_PRODUCT_PRICE,
            images_label = copy::DASH_PRODUCT_IMAGES,
            submit = copy::DASH_SUBMIT_PRODUCT,
            products_title = copy::dash_products(self.products.len()),
            landing = copy::DASH_LANDING_BUTTON,
            picker = self.picker(),
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        if self.merchant_id.is_none() {
            tracing::warn!("dashboard mounted without a merchant id");
            self.view = View::Denied;
        } else {
            self.fetch(ctx);
        }
        self.render(ctx);
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if ev.is_submit() && ev.target_is("add-product-form") {
            self.add_product(ev, ctx);
            return;
        }

        if ev.is_change() {
            let Some(file) = ev.files.first().map(|(_, f)| f.clone()) else {
                return;
            };
            if let Some(slot) = ev
                .target_id()
                .and_then(|id| id.strip_prefix("prod-image-"))
                .and_then(|i| i.parse::<usize>().ok())
                .filter(|i| *i < PRODUCT_IMAGE_SLOTS)
            {
                if Self::check_image(&file, ctx) {
                    self.update(ctx, |s| s.staged[slot] = Some(file));
                }
                return;
            }
            match ev.target_id() {
                Some("logo-input") => self.upload(file, ImageTarget::Logo, ctx),
                Some("background-input") => self.upload(file, ImageTarget::Background, ctx),
                _ if ev.has_class("product-image-input") => {
                    if let Some(id) = ev.data("product-id") {
                        self.upload(file, ImageTarget::Product(id.to_string()), ctx);
                    }
                }
                _ => {}
            }
            return;
        }

        if !ev.is_click() {
            return;
        }
        if ev.has_class("delete-product-btn") {
            if let Some(id) = ev.data("product-id") {
                self.ask_delete(id.to_string(), ctx);
            }
            return;
        }
        if ev.has_class("lp-product-item") {
            if let (Some(product_id), Some(merchant_id)) = (ev.data("product-id"), &self.merchant_id) {
                ctx.store.set_state(
                    StatePatch::screen(ScreenId::LandingPageEditor)
                        .with_merchant_id(merchant_id.clone())
                        .with_product_id(product_id),
                );
            }
            return;
        }
        if let Some(slot) = ev
            .target_id()
            .and_then(|id| id.strip_prefix("remove-"))
            .and_then(|i| i.parse::<usize>().ok())
            .filter(|i| *i < PRODUCT_IMAGE_SLOTS)
        {
            self.update(ctx, |s| s.staged[slot] = None);
            return;
        }
        match ev.target_id() {
            Some("back-link") => {
                ctx.store.set_state(StatePatch::screen(ScreenId::Gateway));
            }
            Some("btn-logout") | Some("btn-logout-products") => self.sign_out(ctx),
            Some("create-landing-page-btn") => self.update(ctx, |s| s.show_picker = true),
            Some("close-lp-modal") | Some("landing-page-modal") => {
                self.update(ctx, |s| s.show_picker = false)
            }
            _ => {}
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Dashboard(event) = event else {
            return;
        };
        match event {
            DashboardEvent::Loaded { seq, .. } if seq != self.request_seq => {
                tracing::debug!(seq, latest = self.request_seq, "dropping superseded dashboard load");
            }
            DashboardEvent::Loaded { result, .. } => self.update(ctx, |s| match result {
                Ok((Some(merchant), products)) => {
                    s.merchant = Some(merchant);
                    s.products = products;
                    s.view = View::Ready;
                }
                Ok((None, _)) => {
                    tracing::warn!(merchant = ?s.merchant_id, "merchant not visible to this user");
                    s.view = View::Denied;
                }
                Err(message) => {
                    tracing::warn!(error = %message, "dashboard failed to load");
                    s.merchant = None;
                    s.view = View::Denied;
                }
            }),
            DashboardEvent::ProductAdded(result) => {
                self.finish();
                match result {
                    Ok(product) => {
                        tracing::info!(product = %product.id, "product added");
                        ctx.toast.success(copy::DASH_PRODUCT_ADDED);
                        self.staged = vec![None; PRODUCT_IMAGE_SLOTS];
                        self.fetch(ctx);
                    }
                    Err(message) => {
                        ctx.toast.error(copy::failed(copy::SAVE_FAILED_PREFIX, &message));
                    }
                }
                self.render(ctx);
            }
            DashboardEvent::ImageUpdated(result) => {
                self.finish();
                match result {
                    Ok(()) => {
                        ctx.toast.success(copy::DASH_IMAGE_UPDATED);
                        self.fetch(ctx);
                    }
                    Err(message) => {
                        ctx.toast.error(copy::failed(copy::UPLOAD_FAILED_PREFIX, &message));
                    }
                }
                self.render(ctx);
            }
            DashboardEvent::DeleteConfirmed(product_id) => {
                if !self.begin(ctx, copy::DASH_DELETING) {
                    return;
                }
                let merchants = ctx.services.merchants.clone();
                ctx.spawner.spawn(async move {
                    let result = merchants.delete_product(&product_id).await;
                    DashboardEvent::Deleted(result.map_err(|e| error_text(&e)))
                });
            }
            DashboardEvent::Deleted(result) => {
                self.finish();
                match result {
                    Ok(()) => {
                        ctx.toast.success(copy::DASH_PRODUCT_DELETED);
                        self.fetch(ctx);
                    }
                    Err(message) => {
                        ctx.toast.error(copy::failed(copy::ERROR_PREFIX, &message));
                    }
                }
                self.render(ctx);
            }
            DashboardEvent::SignedOut => {
                ctx.store.set_state(
                    StatePatch::screen(ScreenId::Gateway).with_current_user(None),
                );
            }
        }
    }
}
