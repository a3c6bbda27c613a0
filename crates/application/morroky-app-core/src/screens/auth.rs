use morroky_config::MIN_PASSWORD_LEN;
use morroky_core::{AuthUser, MerchantId};
use serde_json::Value;

use super::{error_text, Screen, ScreenContext, ScreenEvent};
use crate::app_core::StatePatch;
use crate::copy;
use crate::dom::DomEvent;
use crate::domain::ScreenId;
use crate::markup::escape_html;

/// Extras key holding the provider address the browser should open.
pub const OAUTH_REDIRECT_KEY: &str = "oauth_redirect";

const OAUTH_PROVIDER: &str = "google";

/// Provider text for a wrong email/password pair.
const INVALID_CREDENTIALS: &str = "Invalid login credentials";

#[derive(Debug)]
pub enum AuthEvent {
    SignedUp(Result<AuthUser, String>),
    SignedIn {
        user: AuthUser,
        merchant_id: Option<MerchantId>,
    },
    SignInFailed(String),
    MerchantLookupFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

pub struct AuthScreen {
    mode: Mode,
    email: String,
    error: Option<String>,
    is_submitting: bool,
}

impl AuthScreen {
    pub fn new() -> Self {
        Self {
            mode: Mode::Login,
            email: String::new(),
            error: None,
            is_submitting: false,
        }
    }

    fn fail(&mut self, ctx: &ScreenContext, message: &str) {
        ctx.toast.error(message);
        self.update(ctx, |s| {
            s.error = Some(message.to_string());
            s.is_submitting = false;
        });
    }

    fn submit(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if self.is_submitting {
            return;
        }
        let email = ev.field("email").to_string();
        // Passwords are taken verbatim.
        let password = ev.form.get("password").cloned().unwrap_or_default();
        self.email = email.clone();

        if email.is_empty() {
            self.fail(ctx, copy::AUTH_EMAIL_REQUIRED);
            return;
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            self.fail(ctx, copy::AUTH_PASSWORD_TOO_SHORT);
            return;
        }

        self.update(ctx, |s| {
            s.is_submitting = true;
            s.error = None;
        });

        let auth = ctx.services.auth.clone();
        match self.mode {
            Mode::Register => ctx.spawner.spawn(async move {
                let result = auth.sign_up(&email, &password).await;
                AuthEvent::SignedUp(result.map_err(|e| error_text(&e)))
            }),
            Mode::Login => {
                let merchants = ctx.services.merchants.clone();
                ctx.spawner.spawn(async move {
                    let user = match auth.sign_in(&email, &password).await {
                        Ok(user) => user,
                        Err(e) => return AuthEvent::SignInFailed(error_text(&e)),
                    };
                    match merchants.merchant_by_owner(&user.id).await {
                        Ok(merchant) => AuthEvent::SignedIn {
                            user,
                            merchant_id: merchant.map(|m| m.id),
                        },
                        Err(e) => AuthEvent::MerchantLookupFailed(error_text(&e)),
                    }
                });
            }
        }
    }

    fn start_oauth(&mut self, ctx: &ScreenContext) {
        match ctx.services.auth.sign_in_with_oauth(OAUTH_PROVIDER) {
            Ok(url) => {
                tracing::debug!(%url, "redirecting to oauth provider");
                ctx.store
                    .set_state(StatePatch::default().with_extra(OAUTH_REDIRECT_KEY, Value::String(url)));
            }
            Err(e) => {
                tracing::warn!(error = %e, "oauth sign-in failed");
                ctx.toast.error(copy::AUTH_GOOGLE_FAILED);
            }
        }
    }
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for AuthScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Auth
    }

    fn template(&self) -> String {
        let (title, submit) = match self.mode {
            Mode::Login => (copy::AUTH_LOGIN_TITLE, copy::AUTH_SUBMIT_LOGIN),
            Mode::Register => (copy::AUTH_REGISTER_TITLE, copy::AUTH_SUBMIT_REGISTER),
        };
        let submit = if self.is_submitting { copy::PROCESSING } else { submit };
        let tab = |mode: Mode| {
            if self.mode == mode {
                "bg-white text-morroky-dark shadow"
            } else {
                "text-gray-500"
            }
        };
        let error = self
            .error
            .as_deref()
            .map(|e| {
                format!(
                    r#"<p id="auth-error" class="text-sm text-red-600 font-bold">{}</p>"#,
                    escape_html(e)
                )
            })
            .unwrap_or_default();
        let disabled = if self.is_submitting { " disabled" } else { "" };

        format!(
            r#"<div class="min-h-screen flex items-center justify-center bg-gray-50 px-4 rtl">
  <div class="max-w-md w-full bg-white rounded-3xl shadow-xl p-8 space-y-6">
    <button id="btn-back" class="text-sm text-gray-500">&larr; {back}</button>
    <div class="text-center">
      <h2 class="text-3xl font-black text-gray-900">{title}</h2>
      <p class="text-gray-500 mt-1">{subtitle}</p>
    </div>
    <div class="flex bg-gray-100 rounded-xl p-1">
      <button class="auth-tab flex-1 py-2 rounded-lg font-bold {login_tab}" data-mode="login">{tab_login}</button>
      <button class="auth-tab flex-1 py-2 rounded-lg font-bold {register_tab}" data-mode="register">{tab_register}</button>
    </div>
    <form id="auth-form" class="space-y-4">
      <label class="block text-sm font-bold text-gray-700">{email_label}</label>
      <input id="email" name="email" type="email" value="{email}" class="w-full px-4 py-3 border border-gray-200 rounded-xl">
      <label class="block text-sm font-bold text-gray-700">{password_label}</label>
      <input id="password" name="password" type="password" class="w-full px-4 py-3 border border-gray-200 rounded-xl">
      {error}
      <button type="submit"{disabled} class="w-full bg-morroky-dark text-white font-bold py-4 rounded-xl disabled:opacity-50">{submit}</button>
    </form>
    <button id="btn-google" class="w-full border border-gray-200 py-3 rounded-xl font-bold">{google}</button>
  </div>
</div>"#,
            back = copy::BACK,
            subtitle = copy::AUTH_SUBTITLE,
            login_tab = tab(Mode::Login),
            register_tab = tab(Mode::Register),
            tab_login = copy::AUTH_TAB_LOGIN,
            tab_register = copy::AUTH_TAB_REGISTER,
            email_label = copy::AUTH_EMAIL,
            email = escape_html(&self.email),
            password_label = copy::AUTH_PASSWORD,
            google = copy::AUTH_GOOGLE,
        )
    }

    fn handle_dom_event(&mut self, ev: &DomEvent, ctx: &ScreenContext) {
        if ev.is_submit() && ev.target_is("auth-form") {
            self.submit(ev, ctx);
            return;
        }
        if !ev.is_click() {
            return;
        }
        if ev.has_class("auth-tab") {
            let mode = match ev.data("mode") {
                Some("register") => Mode::Register,
                _ => Mode::Login,
            };
            if mode != self.mode && !self.is_submitting {
                self.update(ctx, |s| {
                    s.mode = mode;
                    s.error = None;
                });
            }
            return;
        }
        match ev.target_id() {
            Some("btn-google") => self.start_oauth(ctx),
            Some("btn-back") => {
                ctx.store.set_state(StatePatch::screen(ScreenId::Gateway));
            }
            _ => {}
        }
    }

    fn handle_outcome(&mut self, event: ScreenEvent, ctx: &ScreenContext) {
        let ScreenEvent::Auth(event) = event else {
            return;
        };
        match event {
            AuthEvent::SignedUp(Ok(user)) => {
                tracing::info!(user = %user.id, "account created");
                self.is_submitting = false;
                ctx.toast.success(copy::AUTH_ACCOUNT_CREATED);
                ctx.store.set_state(
                    StatePatch::screen(ScreenId::Gateway)
                        .with_current_user(Some(user))
                        .with_show_registration(true),
                );
            }
            AuthEvent::SignedUp(Err(message)) | AuthEvent::SignInFailed(message) => {
                tracing::warn!(error = %message, "authentication failed");
                let text = if message.contains(INVALID_CREDENTIALS) {
                    copy::AUTH_BAD_CREDENTIALS
                } else {
                    copy::AUTH_FAILED
                };
                self.fail(ctx, text);
            }
            AuthEvent::SignedIn { user, merchant_id } => {
                self.is_submitting = false;
                let patch = match merchant_id {
                    Some(id) => StatePatch::screen(ScreenId::MerchantDashboard).with_merchant_id(id),
                    None => StatePatch::screen(ScreenId::Gateway).with_show_registration(true),
                };
                ctx.store.set_state(patch.with_current_user(Some(user)));
            }
            AuthEvent::MerchantLookupFailed(message) => {
                tracing::warn!(error = %message, "merchant lookup after sign-in failed");
                self.fail(ctx, copy::AUTH_POST_LOGIN_FAILED);
            }
        }
    }
}
