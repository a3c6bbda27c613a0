use morroky_core::{Product, ProductId};

use super::product_landing::{fetch_product, loaded_product, ProductEvent};
use super::{Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::{AppState, ScreenId};
use crate::markup::{denied_view, escape_html, image_or_placeholder, loading_view, price};

/// Product page with a thumbnail gallery.
pub struct ProductDetailScreen {
    product_id: Option<ProductId>,
    loading: bool,
    product: Option<Product>,
    current_image: usize,
}

impl ProductDetailScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            product_id: state.product_id.clone(),
            loading: true,
            product: None,
            current_image: 0,
        }
    }
}

impl Screen for ProductDetailScreen {
    fn id(&self) -> ScreenId {
        ScreenId::ProductDetail
    }

    fn template(&self) -> String {
        if self.loading {
            return loading_view(copy::STORE_LOADING);
        }
        let Some(p) = &self.product else {
            return denied_view(
                copy::PRODUCT_NOT_FOUND,
                copy::PRODUCT_NOT_FOUND_BODY,
                "back-btn",
                copy::BACK,
            );
        };
        let images = p.images();
        let main = images.get(self.current_image).copied();
        let thumbnails: String = images
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let ring = if i == self.current_image { "ring-2 ring-morroky-red" } else { "" };
                format!(
                    r#"<img src="{}" alt="" class="thumbnail w-20 h-20 rounded-xl object-cover cursor-pointer {ring}" data-index="{i}">"#,
                    escape_html(url)
                )
            })
            .collect();
        let added = p
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        format!(
            r#"<div class="min-h-screen bg-gray-50 rtl">
  <div class="max-w-5xl mx-auto p-6 space-y-6">
    <button id="back-btn" class="text-sm text-gray-500">&larr; {back}</button>
    <div class="grid md:grid-cols-2 gap-8">
      <div class="space-y-3">
        <img id="main-image" src="{main}" alt="" class="w-full aspect-square rounded-3xl object-cover">
        <div class="flex gap-2">{thumbnails}</div>
      </div>
      <div class="space-y-4">
        <h1 class="text-3xl font-black text-gray-900">{name}</h1>
        <p class="text-2xl font-black text-morroky-red">{price}</p>
        <div class="bg-white rounded-2xl p-4 text-sm text-gray-600 space-y-1">
          <h2 class="font-bold text-gray-800">{more}</h2>
          <p>{count_label} {count}</p>
          <p>{added_label} {added}</p>
        </div>
      </div>
    </div>
  </div>
</div>"#,
            back = copy::BACK,
            main = image_or_placeholder(main, "800x800"),
            name = escape_html(&p.name),
            price = price(p.price),
            more = copy::PRODUCT_MORE_INFO,
            count_label = copy::PRODUCT_IMAGE_COUNT,
            count = images.len(),
            added_label = copy::PRODUCT_ADDED_ON,
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        let Some(id) = self.product_id.clone() else {
            tracing::debug!("product detail without a product id, back to gateway");
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
        if ev.has_class("thumbnail") {
            let count = self.product.as_ref().map(|p| p.images().len()).unwrap_or(0);
            if let Some(index) = ev
                .data("index")
                .and_then(|i| i.parse::<usize>().ok())
                .filter(|i| *i < count)
            {
                self.update(ctx, |s| s.current_image = index);
            }
            return;
        }
        if ev.target_is("back-btn") {
            ctx.store.set_state(StatePatch::screen(ScreenId::World));
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Product(ProductEvent::Loaded(result)) = event else {
            return;
        };
        self.update(ctx, |s| {
            s.loading = false;
            s.current_image = 0;
            s.product = loaded_product(result);
        });
    }
}
