use morroky_core::MerchantId;

use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::ScreenId;

#[derive(Debug)]
pub enum WelcomeEvent {
    MerchantFound(Result<Option<MerchantId>, String>),
}

/// First stop for a merchant account without a shop.
#[derive(Default)]
pub struct WelcomeScreen;

impl WelcomeScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for WelcomeScreen {
    fn id(&self) -> ScreenId {
        ScreenId::MerchantWelcome
    }

    fn template(&self) -> String {
        let steps: String = copy::WELCOME_STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| {
                format!(
                    r#"<li class="flex gap-3"><span class="w-7 h-7 rounded-full bg-morroky-red text-white flex items-center justify-center text-sm font-bold">{}</span><span>{step}</span></li>"#,
                    i + 1
                )
            })
            .collect();
        format!(
            r#"<div class="min-h-screen flex items-center justify-center bg-gray-50 p-6 rtl">
  <div class="max-w-lg w-full bg-white rounded-3xl shadow-xl p-8 space-y-6 text-center">
    <h1 class="text-3xl font-black text-gray-900">{title}</h1>
    <p class="text-gray-600">{body}</p>
    <div class="text-right">
      <h2 class="font-bold text-gray-800 mb-3">{next}</h2>
      <ol class="space-y-3">{steps}</ol>
    </div>
    <button id="create-store-btn" class="w-full bg-morroky-red text-white font-bold py-4 rounded-2xl">{create}</button>
  </div>
</div>"#,
            title = copy::WELCOME_TITLE,
            body = copy::WELCOME_BODY,
            next = copy::WELCOME_NEXT,
            create = copy::WELCOME_CREATE_STORE,
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        self.render(ctx);
        let Some(user) = ctx.store.state().current_user else {
            return;
        };
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let result = merchants.merchant_by_owner(&user.id).await;
            WelcomeEvent::MerchantFound(result.map(|m| m.map(|m| m.id)).map_err(|e| error_text(&e)))
        });
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if ev.is_click() && ev.target_is("create-store-btn") {
            ctx.store.set_state(
                StatePatch::screen(ScreenId::Gateway).with_show_registration(true),
            );
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Welcome(WelcomeEvent::MerchantFound(result)) = event else {
            return;
        };
        match result {
            Ok(Some(id)) => {
                ctx.store
                    .set_state(StatePatch::screen(ScreenId::MerchantDashboard).with_merchant_id(id));
            }
            Ok(None) => {}
            Err(message) => tracing::warn!(error = %message, "merchant lookup failed"),
        }
    }
}
