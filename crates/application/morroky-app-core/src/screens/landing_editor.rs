use morroky_core::{LandingPageConfig, MerchantId, Product, ProductId};

use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::{AppState, ScreenId};
use crate::markup::{denied_view, escape_html, loading_view};

#[derive(Debug)]
pub enum EditorEvent {
    Loaded(Result<Option<Product>, String>),
    Saved(Result<(), String>),
}

/// Edits the landing page of one product owned by the merchant.
pub struct LandingEditorScreen {
    merchant_id: Option<MerchantId>,
    product_id: Option<ProductId>,
    loading: bool,
    product: Option<Product>,
    is_submitting: bool,
}

impl LandingEditorScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            merchant_id: state.merchant_id.clone(),
            product_id: state.product_id.clone(),
            loading: true,
            product: None,
            is_submitting: false,
        }
    }

    fn fetch(&self, ctx: &ScreenContext) {
        let Some(id) = self.product_id.clone() else {
            return;
        };
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            EditorEvent::Loaded(merchants.product_by_id(&id).await.map_err(|e| error_text(&e)))
        });
    }

    fn save(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        let Some(product_id) = self.product.as_ref().map(|p| p.id.clone()) else {
            return;
        };
        if self.is_submitting {
            return;
        }
        let config = LandingPageConfig {
            headline: ev.field("lp-headline").to_string(),
            description: ev.field("lp-description").to_string(),
        };
        self.update(ctx, |s| s.is_submitting = true);
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let result = merchants.update_landing_page(&product_id, &config).await;
            EditorEvent::Saved(result.map_err(|e| error_text(&e)))
        });
    }

    fn back_to_dashboard(&self, ctx: &ScreenContext) {
        let patch = match &self.merchant_id {
            Some(id) => StatePatch::screen(ScreenId::MerchantDashboard).with_merchant_id(id.clone()),
            None => StatePatch::screen(ScreenId::Gateway),
        };
        ctx.store.set_state(patch);
    }
}

impl Screen for LandingEditorScreen {
    fn id(&self) -> ScreenId {
        ScreenId::LandingPageEditor
    }

    fn template(&self) -> String {
        if self.loading {
            return loading_view(copy::EDITOR_LOADING);
        }
        let Some(p) = &self.product else {
            return denied_view(
                copy::DENIED_TITLE,
                copy::EDITOR_DENIED_BODY,
                "back-to-dashboard",
                copy::EDITOR_BACK,
            );
        };
        let config = p.landing_page_config.clone().unwrap_or_default();
        let disabled = if self.is_submitting { " disabled" } else { "" };
        format!(
            r#"<div class="min-h-screen bg-gray-50 p-6 rtl">
  <div class="max-w-3xl mx-auto bg-white rounded-3xl shadow-xl p-8 space-y-6">
    <button id="back-to-dashboard" class="text-sm text-gray-500">&larr; {back}</button>
    <div>
      <h1 class="text-2xl font-black text-gray-900">{title}</h1>
      <p class="text-gray-500">{subtitle}</p>
    </div>
    <form id="landing-page-form" class="space-y-4">
      <label class="block text-sm font-bold text-gray-700">{headline_label}</label>
      <input id="lp-headline" name="lp-headline" type="text" value="{headline}" class="w-full px-4 py-3 border rounded-xl">
      <label class="block text-sm font-bold text-gray-700">{description_label}</label>
      <textarea id="lp-description" name="lp-description" rows="6" class="w-full px-4 py-3 border rounded-xl">{description}</textarea>
      <button id="save-lp-btn" type="submit"{disabled} class="w-full bg-morroky-red text-white font-bold py-3 rounded-xl disabled:opacity-50">{save}</button>
    </form>
  </div>
</div>"#,
            back = copy::EDITOR_BACK,
            title = escape_html(&copy::editor_title(&p.name)),
            subtitle = copy::EDITOR_SUBTITLE,
            headline_label = copy::EDITOR_HEADLINE,
            headline = escape_html(&config.headline),
            description_label = copy::EDITOR_DESCRIPTION,
            description = escape_html(&config.description),
            save = copy::EDITOR_SAVE,
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        if self.merchant_id.is_none() || self.product_id.is_none() {
            tracing::warn!("landing page editor needs both a merchant and a product");
            self.loading = false;
        } else {
            self.fetch(ctx);
        }
        self.render(ctx);
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        let save = (ev.is_submit() && ev.target_is("landing-page-form"))
            || (ev.is_click() && ev.target_is("save-lp-btn"));
        if save {
            self.save(ev, ctx);
            return;
        }
        if ev.is_click() && ev.target_is("back-to-dashboard") {
            self.back_to_dashboard(ctx);
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Editor(event) = event else {
            return;
        };
        match event {
            EditorEvent::Loaded(result) => {
                let owner = self.merchant_id.clone();
                self.update(ctx, |s| {
                    s.loading = false;
                    s.product = match result {
                        Ok(Some(p)) if Some(&p.merchant_id) == owner.as_ref() => Some(p),
                        Ok(_) => {
                            tracing::warn!(product = ?s.product_id, "product not owned by merchant");
                            None
                        }
                        Err(message) => {
                            tracing::warn!(error = %message, "product failed to load");
                            None
                        }
                    };
                });
            }
            EditorEvent::Saved(result) => {
                self.is_submitting = false;
                match result {
                    Ok(()) => {
                        ctx.toast.success(copy::EDITOR_SAVED);
                        self.fetch(ctx);
                    }
                    Err(message) => {
                        ctx.toast.error(copy::failed(copy::SAVE_FAILED_PREFIX, &message));
                    }
                }
                self.render(ctx);
            }
        }
    }
}
