//! Shop registration form, embedded as a modal by the gateway and world
//! screens.

use morroky_config::{DEFAULT_CITY, DEFAULT_MARKET};
use morroky_core::{Location, LocationCatalog, MerchantId, NewMerchant, SelectOption};

use super::{error_text, ScreenContext};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::ScreenId;
use crate::markup::{escape_html, options};

#[derive(Debug)]
pub enum RegistrationEvent {
    Submitted(Result<MerchantId, String>),
}

#[derive(Debug, Default)]
pub struct RegistrationModal {
    open: bool,
    is_submitting: bool,
    streets: Vec<SelectOption>,
    kissariat: Vec<SelectOption>,
    alleys: Vec<SelectOption>,
    name: String,
    phone: String,
    street_id: String,
    kissaria_id: String,
    alley: String,
    shop_number: String,
}

impl RegistrationModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, catalog: &LocationCatalog) {
        *self = Self {
            open: true,
            streets: catalog.streets(),
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        self.open = false;
        self.is_submitting = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns whether the event belonged to the modal. The host re-renders
    /// afterwards.
    pub fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) -> bool {
        if !self.open {
            return false;
        }
        let Some(target) = ev.target_id() else {
            return false;
        };

        if ev.is_click() {
            return match target {
                "close-modal" | "modal-container" => {
                    self.close();
                    true
                }
                _ => false,
            };
        }

        if ev.is_change() {
            let value = ev.value().to_string();
            match target {
                "loc-street" => {
                    self.kissariat = if value.is_empty() {
                        Vec::new()
                    } else {
                        ctx.catalog.kissariat(&value)
                    };
                    self.street_id = value;
                    self.kissaria_id.clear();
                    self.alley.clear();
                    self.alleys.clear();
                }
                "loc-kissaria" => {
                    self.alleys = if value.is_empty() {
                        Vec::new()
                    } else {
                        ctx.catalog.alleys(&self.street_id, &value)
                    };
                    self.kissaria_id = value;
                    self.alley.clear();
                }
                "loc-alley" => self.alley = value,
                "name" => self.name = value,
                "phone" => self.phone = value,
                "loc-shopNumber" => self.shop_number = value,
                _ => return false,
            }
            return true;
        }

        if ev.is_submit() && target == "registration-form" {
            self.submit(ev, ctx);
            return true;
        }
        false
    }

    fn submit(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if self.is_submitting {
            return;
        }
        let name = ev.field("name");
        let phone = ev.field("phone");
        let street_id = ev.field("loc-street");
        let kissaria_id = ev.field("loc-kissaria");
        let alley = ev.field("loc-alley");
        let shop_number = ev.field("loc-shopNumber");
        if [name, phone, street_id, kissaria_id, alley, shop_number]
            .iter()
            .any(|v| v.is_empty())
        {
            ctx.toast.error(copy::REG_MISSING_FIELDS);
            return;
        }

        let location = Location {
            city: Some(DEFAULT_CITY.to_string()),
            market: Some(DEFAULT_MARKET.to_string()),
            street_id: Some(street_id.to_string()),
            street_name: ctx.catalog.street_name(street_id),
            kissaria_id: Some(kissaria_id.to_string()),
            kissaria_name: ctx.catalog.kissaria_name(street_id, kissaria_id),
            alley: Some(alley.to_string()),
            shop_number: Some(shop_number.to_string()),
        };
        let mut merchant = NewMerchant::new(name, phone, location);
        merchant.owner_id = ctx.store.state().current_user.map(|u| u.id);

        self.is_submitting = true;
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let result = merchants
                .register_merchant(&merchant)
                .await
                .map_err(|e| error_text(&e));
            RegistrationEvent::Submitted(result)
        });
    }

    pub fn handle_outcome(&mut self, event: RegistrationEvent, ctx: &ScreenContext) {
        match event {
            RegistrationEvent::Submitted(Ok(id)) => {
                tracing::info!(merchant = %id, "shop registered");
                self.close();
                ctx.toast.success(copy::REG_SENT);
                ctx.store
                    .set_state(StatePatch::screen(ScreenId::MerchantDashboard).with_merchant_id(id));
            }
            RegistrationEvent::Submitted(Err(message)) => {
                tracing::warn!(error = %message, "shop registration failed");
                self.is_submitting = false;
                ctx.toast.error(copy::REG_FAILED);
            }
        }
    }

    pub fn template(&self) -> String {
        if !self.open {
            return String::new();
        }
        let submit_label = if self.is_submitting {
            copy::REG_SENDING
        } else {
            copy::REG_SUBMIT
        };
        let disabled = |on: bool| if on { " disabled" } else { "" };
        format!(
            r#"<div id="modal-container" class="fixed inset-0 bg-black/60 z-40 flex items-center justify-center p-4 rtl">
  <div class="bg-white rounded-3xl shadow-2xl max-w-lg w-full p-8 max-h-[90vh] overflow-y-auto">
    <div class="flex justify-between items-center mb-6">
      <h2 class="text-2xl font-black text-gray-900">{title}</h2>
      <button id="close-modal" class="text-gray-400 hover:text-gray-700 text-2xl">&times;</button>
    </div>
    <form id="registration-form" class="space-y-4">
      <label class="block text-sm font-bold text-gray-700">{name_label}</label>
      <input id="name" name="name" type="text" required value="{name}" class="w-full px-4 py-3 border border-gray-200 rounded-xl">
      <label class="block text-sm font-bold text-gray-700">{phone_label}</label>
      <input id="phone" name="phone" type="tel" required value="{phone}" class="w-full px-4 py-3 border border-gray-200 rounded-xl">
      <fieldset class="bg-gray-50 rounded-2xl p-4 space-y-3">
        <legend class="font-bold text-gray-800">{location_label}</legend>
        <div class="grid grid-cols-2 gap-3">
          <div><label class="text-xs text-gray-500">{city_label}</label><input type="text" disabled value="{city}" class="w-full px-3 py-2 bg-gray-100 rounded-lg text-sm"></div>
          <div><label class="text-xs text-gray-500">{market_label}</label><input type="text" disabled value="{market}" class="w-full px-3 py-2 bg-gray-100 rounded-lg text-sm"></div>
        </div>
        <label class="text-xs text-gray-500">{street_label}</label>
        <select id="loc-street" name="loc-street" required class="w-full px-3 py-2 border rounded-lg">{streets}</select>
        <label class="text-xs text-gray-500">{kissaria_label}</label>
        <select id="loc-kissaria" name="loc-kissaria" required{kissaria_disabled} class="w-full px-3 py-2 border rounded-lg">{kissariat}</select>
        <label class="text-xs text-gray-500">{alley_label}</label>
        <select id="loc-alley" name="loc-alley" required{alley_disabled} class="w-full px-3 py-2 border rounded-lg">{alleys}</select>
        <label class="text-xs text-gray-500">{shop_label}</label>
        <input id="loc-shopNumber" name="loc-shopNumber" type="text" required value="{shop}" class="w-full px-3 py-2 border rounded-lg">
      </fieldset>
      <button id="submit-btn" type="submit"{submit_disabled} class="w-full bg-morroky-red text-white font-bold py-4 rounded-xl disabled:opacity-50">{submit_label}</button>
      <p class="text-xs text-gray-500 text-center">{hint}</p>
    </form>
  </div>
</div>"#,
            title = copy::REG_TITLE,
            name_label = copy::REG_NAME,
            name = escape_html(&self.name),
            phone_label = copy::REG_PHONE,
            phone = escape_html(&self.phone),
            location_label = copy::REG_LOCATION,
            city_label = copy::REG_CITY,
            city = DEFAULT_CITY,
            market_label = copy::REG_MARKET,
            market = DEFAULT_MARKET,
            street_label = copy::REG_STREET,
            streets = options(copy::REG_PICK_STREET, &self.streets, &self.street_id),
            kissaria_label = copy::REG_KISSARIA,
            kissaria_disabled = disabled(self.street_id.is_empty()),
            kissariat = options(copy::REG_PICK_KISSARIA, &self.kissariat, &self.kissaria_id),
            alley_label = copy::REG_ALLEY,
            alley_disabled = disabled(self.kissaria_id.is_empty()),
            alleys = options(copy::REG_PICK_ALLEY, &self.alleys, &self.alley),
            shop_label = copy::REG_SHOP_NUMBER,
            shop = escape_html(&self.shop_number),
            submit_disabled = disabled(self.is_submitting),
            submit_label = submit_label,
            hint = copy::REG_HINT,
        )
    }
}
