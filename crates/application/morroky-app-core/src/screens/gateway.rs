use super::registration::RegistrationModal;
use super::{Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::{AppState, ScreenId, UserType};

/// Landing choice between the buyer and merchant journeys.
pub struct GatewayScreen {
    show_registration: bool,
    modal: RegistrationModal,
}

impl GatewayScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            show_registration: state.show_registration,
            modal: RegistrationModal::new(),
        }
    }

    /// Opens the registration modal once and clears the request flag so it
    /// does not fire again.
    fn open_requested_registration(&mut self, ctx: &ScreenContext) {
        if !self.show_registration {
            return;
        }
        self.show_registration = false;
        self.modal.open(&ctx.catalog);
        self.render(ctx);
        ctx.store
            .set_state(StatePatch::default().with_show_registration(false));
    }
}

impl Screen for GatewayScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Gateway
    }

    fn template(&self) -> String {
        format!(
            r#"<div class="min-h-screen flex flex-col items-center justify-center px-4 py-12 relative overflow-hidden">
  <div class="max-w-md w-full text-center space-y-8 animate-fade-in relative z-10">
    <div>
      <h1 class="text-7xl font-bold bg-clip-text text-transparent bg-gradient-to-r from-morroky-red to-orange-500 mb-2 tracking-tighter">{brand}</h1>
      <p class="text-gray-300 text-lg">{tagline}</p>
    </div>
    <div class="grid grid-cols-1 gap-6 pt-8">
      <button id="btn-buyer" class="group relative glass-card rounded-2xl shadow-2xl h-32 flex flex-col items-center justify-center">
        <span class="text-3xl font-bold mb-1 text-white">{buyer}</span>
        <span class="text-sm text-gray-400">{buyer_hint}</span>
      </button>
      <button id="btn-merchant" class="group relative glass-card rounded-2xl shadow-2xl h-32 flex flex-col items-center justify-center">
        <span class="text-3xl font-bold mb-1 text-white">{merchant}</span>
        <span class="text-sm text-gray-400">{merchant_hint}</span>
      </button>
    </div>
    <p class="text-gray-600 text-sm mt-12">{footer}</p>
  </div>
</div>
{modal}"#,
            brand = copy::BRAND,
            tagline = copy::GATEWAY_TAGLINE,
            buyer = copy::GATEWAY_BUYER,
            buyer_hint = copy::GATEWAY_BUYER_HINT,
            merchant = copy::GATEWAY_MERCHANT,
            merchant_hint = copy::GATEWAY_MERCHANT_HINT,
            footer = copy::GATEWAY_FOOTER,
            modal = self.modal.template(),
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        self.render(ctx);
        self.open_requested_registration(ctx);
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if self.modal.handle_dom_event(ev, ctx) {
            self.render(ctx);
            return;
        }
        if !ev.is_click() {
            return;
        }
        match ev.target_id() {
            Some("btn-buyer") => {
                ctx.store.set_state(
                    StatePatch::screen(ScreenId::World).with_user_type(UserType::Buyer),
                );
            }
            Some("btn-merchant") => {
                ctx.store.set_state(
                    StatePatch::screen(ScreenId::Auth).with_user_type(UserType::Merchant),
                );
            }
            _ => {}
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        if let ScreenEvent::Registration(ev) = event {
            self.modal.handle_outcome(ev, ctx);
            self.render(ctx);
        }
    }

    fn on_app_state(&mut self, state: &AppState, ctx: &ScreenContext) {
        if state.show_registration {
            self.show_registration = true;
            self.open_requested_registration(ctx);
        }
    }
}
