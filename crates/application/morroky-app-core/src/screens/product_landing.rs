use morroky_core::{Product, ProductId};

use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::{AppState, ScreenId};
use crate::markup::{denied_view, escape_html, image_or_placeholder, loading_view, price};

/// Outcome shared by the two product pages.
#[derive(Debug)]
pub enum ProductEvent {
    Loaded(Result<Option<Product>, String>),
}

/// Fetches one product for a product page.
pub(crate) fn fetch_product(id: ProductId, ctx: &ScreenContext) {
    let merchants = ctx.services.merchants.clone();
    ctx.spawner.spawn(async move {
        ProductEvent::Loaded(merchants.product_by_id(&id).await.map_err(|e| error_text(&e)))
    });
}

/// Applies a product fetch; failures read as "not found".
pub(crate) fn loaded_product(result: Result<Option<Product>, String>) -> Option<Product> {
    match result {
        Ok(product) => product,
        Err(message) => {
            tracing::warn!(error = %message, "product failed to load");
            None
        }
    }
}

pub struct ProductLandingScreen {
    product_id: Option<ProductId>,
    loading: bool,
    product: Option<Product>,
}

impl ProductLandingScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            product_id: state.product_id.clone(),
            loading: true,
            product: None,
        }
    }
}

impl Screen for ProductLandingScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ProductLanding
    }

    fn template(&self) -> String {
        if self.loading {
            return loading_view(copy::STORE_LOADING);
        }
        let Some(p) = &self.product else {
            return denied_view(
                copy::PRODUCT_PAGE_MISSING,
                copy::PRODUCT_PAGE_MISSING_BODY,
                "btn-back",
                copy::PRODUCT_BACK_TO_EXPLORE,
            );
        };
        let config = p.landing_page_config.clone().unwrap_or_default();
        let headline = if config.headline.is_empty() {
            copy::PRODUCT_DEFAULT_TAGLINE.to_string()
        } else {
            config.headline
        };
        let description = if config.description.is_empty() {
            copy::PRODUCT_DEFAULT_DESCRIPTION.to_string()
        } else {
            config.description
        };
        format!(
            r#"<div class="min-h-screen bg-white rtl">
  <div class="max-w-5xl mx-auto px-6 py-12 grid md:grid-cols-2 gap-10 items-center">
    <img src="{img}" alt="" class="w-full rounded-3xl shadow-2xl object-cover">
    <div class="space-y-6">
      <h1 class="text-4xl font-black text-gray-900">{name}</h1>
      <p class="text-xl text-morroky-red font-bold">{headline}</p>
      <p class="text-3xl font-black">{price}</p>
      <h2 class="font-bold text-gray-800">{about}</h2>
      <p class="text-gray-600 whitespace-pre-line">{description}</p>
      <button id="buy-now-btn" class="w-full bg-morroky-red text-white text-xl font-bold py-4 rounded-2xl">{order}</button>
    </div>
  </div>
</div>"#,
            img = image_or_placeholder(p.cover_image(), "800x800"),
            name = escape_html(&p.name),
            headline = escape_html(&headline),
            price = price(p.price),
            about = copy::PRODUCT_ABOUT,
            description = escape_html(&description),
            order = copy::PRODUCT_ORDER,
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        let Some(id) = self.product_id.clone() else {
            tracing::debug!("product page without a product id, back to gateway");
            ctx.store.set_state(StatePatch::screen(ScreenId::Gateway));
            return;
        };
        self.render(ctx);
        fetch_product(id, ctx);
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if !ev.is_click() {
            return;
        }
        match ev.target_id() {
            Some("buy-now-btn") => ctx.toast.success(copy::PRODUCT_ORDER_RECEIVED),
            Some("btn-back") => {
                ctx.store.set_state(StatePatch::screen(ScreenId::World));
            }
            _ => {}
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Product(ProductEvent::Loaded(result)) = event else {
            return;
        };
        self.update(ctx, |s| {
            s.loading = false;
            s.product = loaded_product(result);
        });
    }
}
