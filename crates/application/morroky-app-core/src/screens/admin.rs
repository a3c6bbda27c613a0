//! Moderation of pending shops.

use morroky_core::{Merchant, MerchantId};

use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::ScreenId;
use crate::markup::{denied_view, escape_html, loading_view};

#[derive(Debug)]
pub enum AdminEvent {
    Loaded {
        seq: u64,
        result: Result<(Vec<Merchant>, Vec<Merchant>), String>,
    },
    Verified {
        id: MerchantId,
        result: Result<(), String>,
    },
    SignedOut(Result<(), String>),
}

pub struct AdminScreen {
    loading: bool,
    error: Option<String>,
    pending: Vec<Merchant>,
    verified: Vec<Merchant>,
    is_submitting: bool,
    verifying: Option<MerchantId>,
    request_seq: u64,
}

impl AdminScreen {
    pub fn new() -> Self {
        Self {
            loading: true,
            error: None,
            pending: Vec::new(),
            verified: Vec::new(),
            is_submitting: false,
            verifying: None,
            request_seq: 0,
        }
    }

    fn fetch(&mut self, ctx: &ScreenContext) {
        self.request_seq += 1;
        let seq = self.request_seq;
        let merchants = ctx.services.merchants.clone();
        ctx.spawner.spawn(async move {
            let verified_filter = morroky_core::MerchantFilter::verified();
            let result = futures::try_join!(
                merchants.pending_merchants(),
                merchants.verified_merchants(&verified_filter)
            );
            AdminEvent::Loaded {
                seq,
                result: result.map_err(|e| error_text(&e)),
            }
        });
    }

    fn pending_card(&self, m: &Merchant) -> String {
        let busy = self.verifying.as_deref() == Some(m.id.as_str());
        let label = if busy { copy::ADMIN_VERIFYING } else { copy::ADMIN_VERIFY };
        let disabled = if self.is_submitting { " disabled" } else { "" };
        format!(
            r#"<div class="bg-white rounded-2xl p-5 shadow-sm border border-yellow-100 flex justify-between items-center">
  <div>
    <h3 class="font-bold text-gray-900">{name}</h3>
    <p class="text-sm text-gray-500">{phone}</p>
    <p class="text-xs text-gray-400">📍 {address}</p>
  </div>
  <button class="btn-verify bg-morroky-green text-white px-4 py-2 rounded-xl font-bold disabled:opacity-50" data-id="{id}"{disabled}>{label}</button>
</div>"#,
            name = escape_html(&m.name),
            phone = escape_html(m.phone.as_deref().unwrap_or(copy::ADMIN_NO_PHONE)),
            address = escape_html(&m.location.format_address()),
            id = escape_html(&m.id),
        )
    }

    fn verified_card(m: &Merchant) -> String {
        let id = escape_html(&m.id);
        format!(
            r#"<div class="bg-white rounded-2xl p-5 shadow-sm border border-green-100 flex justify-between items-center">
  <div>
    <h3 class="font-bold text-gray-900">{name} <span class="text-xs text-morroky-green">{badge}</span></h3>
    <p class="text-sm text-gray-500">{phone}</p>
  </div>
  <a href="/manage/{id}" class="manage-link text-morroky-blue font-bold" data-id="{id}">{manage}</a>
</div>"#,
            name = escape_html(&m.name),
            badge = copy::ADMIN_VERIFIED_BADGE,
            phone = escape_html(m.phone.as_deref().unwrap_or(copy::ADMIN_NO_PHONE)),
            manage = copy::ADMIN_MANAGE,
        )
    }
}

impl Default for AdminScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for AdminScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Admin
    }

    fn template(&self) -> String {
        if self.loading {
            return loading_view(copy::ADMIN_LOADING);
        }
        if self.error.is_some() {
            return denied_view(
                copy::DENIED_TITLE,
                copy::DENIED_BODY,
                "btn-logout",
                copy::BACK_AND_SIGN_IN,
            );
        }
        let pending = if self.pending.is_empty() {
            format!(r#"<p class="text-gray-500">{}</p>"#, copy::ADMIN_NO_PENDING)
        } else {
            self.pending.iter().map(|m| self.pending_card(m)).collect()
        };
        let verified = if self.verified.is_empty() {
            format!(r#"<p class="text-gray-500">{}</p>"#, copy::ADMIN_NO_VERIFIED)
        } else {
            self.verified.iter().map(Self::verified_card).collect()
        };
        format!(
            r#"<div class="min-h-screen bg-gray-50 p-6 rtl">
  <div class="max-w-5xl mx-auto space-y-8">
    <header class="flex justify-between items-center">
      <h1 class="text-3xl font-black text-gray-900">{title}</h1>
      <button id="btn-logout" class="text-sm text-red-500 font-bold">{sign_out}</button>
    </header>
    <section class="space-y-4">
      <h2 class="text-xl font-bold">{pending_title}</h2>
      {pending}
    </section>
    <section class="space-y-4">
      <h2 class="text-xl font-bold">{verified_title}</h2>
      {verified}
    </section>
  </div>
</div>"#,
            title = copy::ADMIN_TITLE,
            sign_out = copy::SIGN_OUT,
            pending_title = copy::admin_pending(self.pending.len()),
            verified_title = copy::admin_verified(self.verified.len()),
        )
    }

    fn mount(&mut self, ctx: &ScreenContext) {
        self.render(ctx);
        self.fetch(ctx);
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if !ev.is_click() {
            return;
        }
        if ev.has_class("btn-verify") {
            let Some(id) = ev.data("id").map(str::to_string) else {
                return;
            };
            if self.is_submitting {
                return;
            }
            self.update(ctx, |s| {
                s.is_submitting = true;
                s.verifying = Some(id.clone());
            });
            let merchants = ctx.services.merchants.clone();
            ctx.spawner.spawn(async move {
                let result = merchants.verify_merchant(&id).await.map_err(|e| error_text(&e));
                AdminEvent::Verified { id, result }
            });
            return;
        }
        if ev.has_class("manage-link") {
            if let Some(id) = ev.data("id") {
                ctx.store
                    .set_state(StatePatch::screen(ScreenId::MerchantDashboard).with_merchant_id(id));
            }
            return;
        }
        if ev.target_is("btn-logout") {
            let auth = ctx.services.auth.clone();
            ctx.spawner.spawn(async move {
                AdminEvent::SignedOut(auth.sign_out().await.map_err(|e| error_text(&e)))
            });
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Admin(event) = event else {
            return;
        };
        match event {
            AdminEvent::Loaded { seq, .. } if seq != self.request_seq => {
                tracing::debug!(seq, latest = self.request_seq, "dropping superseded admin lists");
            }
            AdminEvent::Loaded { result, .. } => self.update(ctx, |s| {
                s.loading = false;
                match result {
                    Ok((pending, verified)) => {
                        s.error = None;
                        s.pending = pending;
                        s.verified = verified;
                    }
                    Err(message) => {
                        tracing::warn!(error = %message, "admin lists failed to load");
                        s.error = Some(message);
                    }
                }
            }),
            AdminEvent::Verified { id, result } => {
                self.is_submitting = false;
                self.verifying = None;
                match result {
                    Ok(()) => {
                        tracing::info!(merchant = %id, "merchant verified");
                        ctx.toast.success(copy::ADMIN_VERIFIED_OK);
                        self.fetch(ctx);
                    }
                    Err(message) => {
                        ctx.toast.error(copy::failed(copy::ERROR_PREFIX, &message));
                    }
                }
                self.render(ctx);
            }
            AdminEvent::SignedOut(result) => {
                if let Err(message) = result {
                    tracing::warn!(error = %message, "sign out failed");
                }
                ctx.store.set_state(
                    StatePatch::screen(ScreenId::Gateway).with_current_user(None),
                );
            }
        }
    }
}
