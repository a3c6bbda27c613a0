//! Public store page of one merchant.

use morroky_core::{Merchant, MerchantId, Product};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::{AppState, ScreenId};
use crate::markup::{denied_view, escape_html, image_or_placeholder, loading_view, price};

#[derive(Debug)]
pub enum MerchantEvent {
    Loaded(Result<(Option<Merchant>, Vec<Product>), String>),
}

pub struct MerchantScreen {
    merchant_id: Option<MerchantId>,
    loading: bool,
    merchant: Option<Merchant>,
    products: Vec<Product>,
}

impl MerchantScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            merchant_id: state.selected_merchant_id.clone(),
            loading: true,
            merchant: None,
            products: Vec::new(),
        }
    }

    fn whatsapp_link(merchant: &Merchant) -> Option<String> {
        let number = merchant.whatsapp_number()?;
        let text = utf8_percent_encode(copy::STORE_WHATSAPP_TEXT, NON_ALPHANUMERIC);
        Some(format!("https://wa.me/{number}?text={text}"))
    }

    fn product_card(p: &Product) -> String {
        format!(
            r#"<div class="product-card bg-white rounded-2xl shadow-sm overflow-hidden cursor-pointer" data-id="{id}">
  <img src="{img}" alt="" class="w-full h-48 object-cover">
  <div class="p-4">
    <h4 class="font-bold text-gray-900">{name}</h4>
    <p class="text-morroky-red font-black">{price}</p>
    <span class="text-sm text-morroky-blue">{details}</span>
  </div>
</div>"#,
            id = escape_html(&p.id),
            img = image_or_placeholder(p.cover_image(), "400x300"),
            name = escape_html(&p.name),
            price = price(p.price),
            details = copy::STORE_DETAILS,
        )
    }
}

impl Screen for MerchantScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Merchant
    }

    fn template(&self) -> String {
        if self.loading {
            return loading_view(copy::STORE_LOADING);
        }
        let Some(m) = &self.merchant else {
            return denied_view(
                copy::STORE_NOT_FOUND,
                copy::STORE_NOT_FOUND_BODY,
                "btn-home",
                copy::STORE_BACK_TO_MAP,
            );
        };

        let whatsapp = Self::whatsapp_link(m)
            .map(|href| {
                format!(
                    r#"<a id="whatsapp-link" href="{}" target="_blank" class="bg-green-500 text-white px-6 py-3 rounded-2xl font-bold">{}</a>"#,
                    escape_html(&href),
                    copy::STORE_WHATSAPP
                )
            })
            .unwrap_or_default();
        let products = if self.products.is_empty() {
            format!(
                r#"<div class="bg-white p-12 rounded-3xl text-center"><h3 class="text-xl font-bold">{}</h3><p class="text-gray-500">{}</p></div>"#,
                copy::STORE_NO_PRODUCTS,
                copy::STORE_NO_PRODUCTS_HINT
            )
        } else {
            let cards: String = self.products.iter().map(Self::product_card).collect();
            format!(r#"<div class="grid grid-cols-2 md:grid-cols-4 gap-4">{cards}</div>"#)
        };

        format!(
            r#"<div class="min-h-screen bg-gray-50 rtl">
  <div class="h-56 bg-cover bg-center relative" style="background-image:url('{background}')">
    <button id="btn-home" class="absolute top-4 right-4 bg-white/90 px-4 py-2 rounded-xl font-bold">{back}</button>
  </div>
  <div class="max-w-6xl mx-auto px-6 -mt-16 relative">
    <div class="bg-white rounded-3xl shadow-xl p-6 flex flex-col md:flex-row items-center gap-6">
      <img src="{logo}" alt="" class="w-28 h-28 rounded-2xl object-cover border-4 border-white shadow">
      <div class="flex-1">
        <h1 class="text-3xl font-black text-gray-900">{name}</h1>
        <p class="text-gray-500 mt-1">📍 {address}</p>
      </div>
      {whatsapp}
    </div>
    <h2 class="text-2xl font-black text-gray-900 my-8">{products_title}</h2>
    {products}
  </div>
</div>"#,
            background = image_or_placeholder(m.background_url.as_deref(), "1200x400"),
            back = copy::STORE_BACK_TO_MAP,
            logo = image_or_placeholder(m.logo_url.as_deref(), "200x200"),
            name = escape_html(&m.name),
            address = escape_html(&m.location.format_address()),
            products_title = copy::STORE_PRODUCTS,
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        let Some(id) = self.merchant_id.clone() else {
            self.loading = false;
            self.render(ctx);
            return;
        };
        self.render(ctx);
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let result = futures::try_join!(
                merchants.merchant_by_id(&id),
                merchants.products_by_merchant(&id)
            );
            MerchantEvent::Loaded(result.map_err(|e| error_text(&e)))
        });
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if !ev.is_click() {
            return;
        }
        if ev.has_class("product-card") {
            if let Some(id) = ev.data("id") {
                ctx.store
                    .set_state(StatePatch::screen(ScreenId::ProductDetail).with_product_id(id));
            }
            return;
        }
        if ev.target_is("btn-home") {
            ctx.store.set_state(StatePatch::screen(ScreenId::World));
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Merchant(MerchantEvent::Loaded(result)) = event else {
            return;
        };
        self.update(ctx, |s| {
            s.loading = false;
            match result {
                Ok((merchant, products)) => {
                    s.merchant = merchant;
                    s.products = products;
                }
                Err(message) => {
                    tracing::warn!(error = %message, "store page failed to load");
                    s.merchant = None;
                }
            }
        });
    }
}
