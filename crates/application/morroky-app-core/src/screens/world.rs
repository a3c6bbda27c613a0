//! Buyer-facing market browser with cascading location filters.

use std::collections::BTreeSet;

use morroky_core::{Merchant, MerchantFilter, SelectOption};

use super::registration::RegistrationModal;
use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::{AppState, ScreenId, UserType};
use crate::markup::{denied_view, escape_html, image_or_placeholder, options};

#[derive(Debug)]
pub enum WorldEvent {
    Loaded {
        seq: u64,
        result: Result<Vec<Merchant>, String>,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Filters {
    street_id: String,
    kissaria_id: String,
    alley: String,
}

impl Filters {
    fn to_query(&self) -> MerchantFilter {
        let some = |v: &str| (!v.is_empty()).then(|| v.to_string());
        MerchantFilter {
            street_id: some(&self.street_id),
            kissaria_id: some(&self.kissaria_id),
            alley: some(&self.alley),
            status: None,
        }
    }
}

pub struct WorldScreen {
    user_type: Option<UserType>,
    merchants: Vec<Merchant>,
    loading: bool,
    error: Option<String>,
    filters: Filters,
    streets: Vec<SelectOption>,
    kissariat: Vec<SelectOption>,
    alleys: Vec<SelectOption>,
    revealed: BTreeSet<String>,
    /// Only the response to the latest request is applied.
    request_seq: u64,
    modal: RegistrationModal,
}

impl WorldScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            user_type: state.user_type,
            merchants: Vec::new(),
            loading: true,
            error: None,
            filters: Filters::default(),
            streets: Vec::new(),
            kissariat: Vec::new(),
            alleys: Vec::new(),
            revealed: BTreeSet::new(),
            request_seq: 0,
            modal: RegistrationModal::new(),
        }
    }

    fn fetch(&mut self, ctx: &ScreenContext) {
        self.request_seq += 1;
        self.loading = true;
        self.error = None;
        let seq = self.request_seq;
        let filter = self.filters.to_query();
        let merchants = ctx.services.merchants.clone();
        tracing::debug!(seq, ?filter, "fetching verified merchants");
        ctx.spawner.spawn(async move {
            let result = merchants
                .verified_merchants(&filter)
                .await
                .map_err(|e| error_text(&e));
            WorldEvent::Loaded { seq, result }
        });
    }

    fn set_street(&mut self, street_id: &str, ctx: &ScreenContext) {
        self.kissariat = if street_id.is_empty() {
            Vec::new()
        } else {
            ctx.catalog.kissariat(street_id)
        };
        self.alleys.clear();
        self.filters = Filters {
            street_id: street_id.to_string(),
            ..Filters::default()
        };
    }

    fn set_kissaria(&mut self, kissaria_id: &str, ctx: &ScreenContext) {
        self.alleys = if kissaria_id.is_empty() {
            Vec::new()
        } else {
            ctx.catalog.alleys(&self.filters.street_id, kissaria_id)
        };
        self.filters.kissaria_id = kissaria_id.to_string();
        self.filters.alley.clear();
    }

    fn show_rejections(&self, merchant_id: &str, ctx: &ScreenContext) {
        let Some(merchant) = self.merchants.iter().find(|m| m.id == merchant_id) else {
            return;
        };
        if merchant.rejection_reasons.is_empty() {
            ctx.toast.info(copy::WORLD_NO_REJECTIONS);
        } else {
            ctx.toast
                .info(copy::rejection_reasons(&merchant.name, &merchant.rejection_reasons));
        }
    }

    fn merchant_card(&self, m: &Merchant) -> String {
        let id = escape_html(&m.id);
        let address = if self.revealed.contains(&m.id) {
            format!(
                r#"<div id="address-container-{id}" class="text-sm text-gray-600 bg-gray-50 rounded-xl p-3">📍 {}</div>"#,
                escape_html(&m.location.format_address())
            )
        } else {
            format!(
                r#"<button class="show-address-btn text-sm text-morroky-blue font-bold" data-merchant-id-address="{id}">{}</button>"#,
                copy::WORLD_SHOW_ADDRESS
            )
        };
        let rejections = if m.rejection_reasons.is_empty() {
            String::new()
        } else {
            format!(
                r#"<span class="text-xs text-red-500 cursor-pointer" data-merchant-id-rejections="{id}">⚠️ {}</span>"#,
                m.rejection_reasons.len()
            )
        };
        let rating = m
            .rating
            .map(|r| format!(r#"<span class="text-yellow-500 text-sm">★ {r:.1}</span>"#))
            .unwrap_or_default();
        format!(
            r#"<div class="merchant-card bg-white rounded-3xl shadow-sm border border-gray-100 overflow-hidden cursor-pointer" data-id="{id}">
  <img src="{logo}" alt="" class="w-full h-32 object-cover">
  <div class="p-5 space-y-2">
    <div class="flex justify-between items-center"><h3 class="font-bold text-lg text-gray-900">{name}</h3>{rating}</div>
    {rejections}
    {address}
  </div>
</div>"#,
            logo = image_or_placeholder(m.logo_url.as_deref(), "400x200"),
            name = escape_html(&m.name),
        )
    }

    fn results(&self) -> String {
        if self.loading {
            return format!(
                r#"<div class="flex flex-col items-center justify-center py-20" data-state="loading">
  <div class="w-12 h-12 border-4 border-morroky-red border-t-transparent rounded-full animate-spin mb-4"></div>
  <p class="text-gray-400 font-bold">{}</p>
</div>"#,
                copy::WORLD_REFRESHING
            );
        }
        if self.merchants.is_empty() {
            return format!(
                r#"<div class="bg-white p-16 rounded-3xl text-center border-2 border-dashed border-gray-100" data-state="empty">
  <h3 class="text-xl font-bold text-gray-800 mb-2">{}</h3>
  <p class="text-gray-500">{}</p>
</div>"#,
                copy::WORLD_EMPTY,
                copy::WORLD_EMPTY_HINT
            );
        }
        let cards: String = self.merchants.iter().map(|m| self.merchant_card(m)).collect();
        format!(r#"<div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">{cards}</div>"#)
    }
}

impl Screen for WorldScreen {
    fn id(&self) -> ScreenId {
        ScreenId::World
    }

    fn template(&self) -> String {
        if self.error.is_some() {
            return denied_view(
                copy::LOAD_FAILED_TITLE,
                copy::LOAD_FAILED_BODY,
                "btn-retry",
                copy::RETRY,
            );
        }
        let is_merchant = self.user_type == Some(UserType::Merchant);
        let mode = if is_merchant {
            copy::WORLD_MERCHANT_PANEL
        } else {
            copy::WORLD_EXPLORE
        };
        let register = if is_merchant {
            format!(
                r#"<button id="btn-register-merchant" class="bg-morroky-red text-white px-6 py-3 rounded-2xl font-bold">{}</button>"#,
                copy::WORLD_REGISTER_SHOP
            )
        } else {
            String::new()
        };
        let disabled = |on: bool| if on { " disabled" } else { "" };

        format!(
            r#"<div class="min-h-screen flex flex-col bg-gray-50 rtl">
  <header class="bg-white shadow-sm px-6 py-4 flex justify-between items-center sticky top-0 z-30">
    <div class="flex items-center gap-4">
      <h2 class="text-2xl font-black text-morroky-red">{brand}</h2>
      <span class="text-gray-600 font-medium">{mode}</span>
    </div>
    <button id="btn-back" class="text-sm text-gray-500">{exit}</button>
  </header>
  <main class="flex-1 p-6">
    <div class="max-w-7xl mx-auto">
      <div class="rounded-3xl p-8 mb-8 text-center border-dashed border-2 border-gray-200">
        <h3 class="text-3xl font-bold text-gray-800 mb-4">{welcome}</h3>
        <p class="text-gray-600 max-w-2xl mx-auto">{intro}</p>
        {register}
      </div>
      <div class="bg-white rounded-3xl p-6 shadow-sm border border-gray-100 mb-8 flex flex-col md:flex-row items-center gap-4">
        <span class="font-bold whitespace-nowrap">🔍 {filter_by}</span>
        <select id="filter-street" class="flex-1 px-4 py-3 bg-gray-50 border border-gray-200 rounded-xl">{streets}</select>
        <select id="filter-kissaria"{kissaria_disabled} class="flex-1 px-4 py-3 bg-gray-50 border border-gray-200 rounded-xl">{kissariat}</select>
        <select id="filter-alley"{alley_disabled} class="flex-1 px-4 py-3 bg-gray-50 border border-gray-200 rounded-xl">{alleys}</select>
      </div>
      <div class="flex items-center justify-between mb-6">
        <h2 class="text-2xl font-black text-gray-900">{verified}</h2>
        <span class="bg-morroky-green/10 text-morroky-green px-3 py-1 rounded-full text-xs font-bold">{count}</span>
      </div>
      {results}
    </div>
  </main>
</div>
{modal}"#,
            brand = copy::BRAND,
            exit = copy::WORLD_EXIT,
            welcome = copy::WORLD_WELCOME,
            intro = copy::WORLD_INTRO,
            filter_by = copy::WORLD_FILTER_BY,
            streets = options(copy::WORLD_ALL_STREETS, &self.streets, &self.filters.street_id),
            kissaria_disabled = disabled(self.filters.street_id.is_empty()),
            kissariat = options(copy::WORLD_ALL_KISSARIAT, &self.kissariat, &self.filters.kissaria_id),
            alley_disabled = disabled(self.filters.kissaria_id.is_empty()),
            alleys = options(copy::WORLD_ALL_ALLEYS, &self.alleys, &self.filters.alley),
            verified = copy::WORLD_VERIFIED_SHOPS,
            count = copy::shops_available(self.merchants.len()),
            results = self.results(),
            modal = self.modal.template(),
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        self.streets = ctx.catalog.streets();
        self.fetch(ctx);
        self.render(ctx);
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if self.modal.handle_dom_event(ev, ctx) {
            self.render(ctx);
            return;
        }

        if ev.is_change() {
            let value = ev.value().to_string();
            match ev.target_id() {
                Some("filter-street") => self.set_street(&value, ctx),
                Some("filter-kissaria") => self.set_kissaria(&value, ctx),
                Some("filter-alley") => self.filters.alley = value,
                _ => return,
            }
            self.fetch(ctx);
            self.render(ctx);
            return;
        }

        if !ev.is_click() {
            return;
        }
        if ev.has_class("show-address-btn") {
            if let Some(id) = ev.data("merchant-id-address") {
                let id = id.to_string();
                self.update(ctx, |s| {
                    s.revealed.insert(id);
                });
            }
            return;
        }
        if let Some(id) = ev.data("merchant-id-rejections") {
            self.show_rejections(id, ctx);
            return;
        }
        if ev.has_class("merchant-card") {
            if let Some(id) = ev.data("id") {
                ctx.store.set_state(
                    StatePatch::screen(ScreenId::Merchant).with_selected_merchant_id(id),
                );
            }
            return;
        }
        match ev.target_id() {
            Some("btn-back") => {
                ctx.store.set_state(StatePatch::screen(ScreenId::Gateway));
            }
            Some("btn-register-merchant") => {
                self.modal.open(&ctx.catalog);
                self.render(ctx);
            }
            Some("btn-retry") => {
                self.fetch(ctx);
                self.render(ctx);
            }
            _ => {}
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        match event {
            ScreenEvent::World(WorldEvent::Loaded { seq, result }) => {
                if seq != self.request_seq {
                    tracing::debug!(seq, latest = self.request_seq, "dropping superseded merchant list");
                    return;
                }
                self.update(ctx, |s| {
                    s.loading = false;
                    match result {
                        Ok(merchants) => s.merchants = merchants,
                        Err(message) => {
                            tracing::warn!(error = %message, "merchant list failed");
                            s.merchants.clear();
                            s.error = Some(message);
                        }
                    }
                });
            }
            ScreenEvent::Registration(ev) => {
                self.modal.handle_outcome(ev, ctx);
                self.render(ctx);
            }
            other => tracing::debug!(?other, "unexpected outcome on world"),
        }
    }

    fn on_app_state(&mut self, state: &AppState, ctx: &ScreenContext) {
        if state.user_type != self.user_type {
            let user_type = state.user_type;
            self.update(ctx, |s| s.user_type = user_type);
        }
    }
}
