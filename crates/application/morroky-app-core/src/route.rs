//! Path routing. Paths are the only navigable location; there is no hash
//! routing.

use morroky_core::{MerchantId, ProductId};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::app_core::StatePatch;
use crate::domain::{AppState, ScreenId};

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Gateway,
    Auth,
    World,
    Admin,
    Manage(MerchantId),
    Product(ProductId),
    Merchant(MerchantId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route matches `{0}`")]
    Unknown(String),
    #[error("`{path}` is missing its {param}")]
    MissingParam { path: String, param: &'static str },
    #[error("`{0}` has unexpected trailing segments")]
    ExtraSegments(String),
    #[error("`{0}` is not valid percent-encoded UTF-8")]
    BadEncoding(String),
}

enum Rule {
    Exact(&'static str, Route),
    Param {
        segment: &'static str,
        param: &'static str,
        build: fn(String) -> Route,
    },
}

/// Exact rules are tried before parameterised ones; the first match wins.
const RULES: &[Rule] = &[
    Rule::Exact("", Route::Gateway),
    Rule::Exact("auth", Route::Auth),
    Rule::Exact("world", Route::World),
    Rule::Exact("admin", Route::Admin),
    Rule::Param {
        segment: "manage",
        param: "merchant id",
        build: Route::Manage,
    },
    Rule::Param {
        segment: "product",
        param: "product id",
        build: Route::Product,
    },
    Rule::Param {
        segment: "merchant",
        param: "merchant id",
        build: Route::Merchant,
    },
];

impl Route {
    /// Strict parse. Query string and fragment are ignored and a trailing
    /// slash is tolerated.
    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('/');

        let segments = trimmed
            .split('/')
            .map(|s| {
                percent_decode_str(s)
                    .decode_utf8()
                    .map(|s| s.trim().to_string())
                    .map_err(|_| RouteError::BadEncoding(path.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exact = RULES.iter().find_map(|rule| match rule {
            Rule::Exact(p, route) if segments.len() == 1 && segments[0] == *p => Some(route.clone()),
            _ => None,
        });
        if let Some(route) = exact {
            return Ok(route);
        }

        for rule in RULES {
            let Rule::Param {
                segment,
                param,
                build,
            } = rule
            else {
                continue;
            };
            if segments[0] != *segment {
                continue;
            }
            return match segments.get(1) {
                None => Err(RouteError::MissingParam {
                    path: path.to_string(),
                    param: *param,
                }),
                Some(id) if id.is_empty() => Err(RouteError::MissingParam {
                    path: path.to_string(),
                    param: *param,
                }),
                Some(_) if segments.len() > 2 => Err(RouteError::ExtraSegments(path.to_string())),
                Some(id) => Ok(build(id.clone())),
            };
        }

        Err(RouteError::Unknown(path.to_string()))
    }

    /// Like [`Route::parse`], but anything unusable lands on the gateway.
    pub fn resolve(path: &str) -> Route {
        Self::parse(path).unwrap_or_else(|e| {
            tracing::debug!(path, "falling back to gateway: {e}");
            Route::Gateway
        })
    }

    pub fn screen(&self) -> ScreenId {
        match self {
            Route::Gateway => ScreenId::Gateway,
            Route::Auth => ScreenId::Auth,
            Route::World => ScreenId::World,
            Route::Admin => ScreenId::Admin,
            Route::Manage(_) => ScreenId::MerchantDashboard,
            Route::Product(_) => ScreenId::ProductLanding,
            Route::Merchant(_) => ScreenId::Merchant,
        }
    }

    /// State change that navigates to this route.
    /// Parameterless routes clear every route id so nothing from an earlier
    /// location survives a back/forward move.
    pub fn patch(&self) -> StatePatch {
        let patch = StatePatch::screen(self.screen());
        match self {
            Route::Manage(id) => patch.with_merchant_id(id.clone()),
            Route::Product(id) => patch.with_product_id(id.clone()),
            Route::Merchant(id) => patch.with_selected_merchant_id(id.clone()),
            Route::Gateway | Route::Auth | Route::World | Route::Admin => patch
                .clear_merchant_id()
                .clear_product_id()
                .clear_selected_merchant_id(),
        }
    }

    pub fn to_path(&self) -> String {
        let enc = |id: &str| utf8_percent_encode(id, SEGMENT).to_string();
        match self {
            Route::Gateway => "/".to_string(),
            Route::Auth => "/auth".to_string(),
            Route::World => "/world".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::Manage(id) => format!("/manage/{}", enc(id)),
            Route::Product(id) => format!("/product/{}", enc(id)),
            Route::Merchant(id) => format!("/merchant/{}", enc(id)),
        }
    }

    /// Canonical route for a state. Screens reached only from inside the app
    /// (the landing-page editor, the welcome page, product detail) and
    /// parameterised screens without their id have none.
    pub fn for_state(state: &AppState) -> Option<Route> {
        let id = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        match state.screen {
            ScreenId::Gateway => Some(Route::Gateway),
            ScreenId::Auth => Some(Route::Auth),
            ScreenId::World => Some(Route::World),
            ScreenId::Admin => Some(Route::Admin),
            ScreenId::MerchantDashboard => id(&state.merchant_id).map(Route::Manage),
            ScreenId::ProductLanding => id(&state.product_id).map(Route::Product),
            ScreenId::Merchant => id(&state.selected_merchant_id).map(Route::Merchant),
            ScreenId::LandingPageEditor | ScreenId::ProductDetail | ScreenId::MerchantWelcome => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_paths() {
        assert_eq!(Route::parse("/").unwrap(), Route::Gateway);
        assert_eq!(Route::parse("").unwrap(), Route::Gateway);
        assert_eq!(Route::parse("/auth").unwrap(), Route::Auth);
        assert_eq!(Route::parse("/world/").unwrap(), Route::World);
        assert_eq!(Route::parse("/admin?tab=pending#top").unwrap(), Route::Admin);
    }

    #[test]
    fn parameterised_paths() {
        assert_eq!(Route::parse("/manage/m-42").unwrap(), Route::Manage("m-42".into()));
        assert_eq!(Route::parse("/product/p1/").unwrap(), Route::Product("p1".into()));
        assert_eq!(Route::parse("/merchant/abc").unwrap(), Route::Merchant("abc".into()));
        assert_eq!(
            Route::parse("/product/caftan%20royal").unwrap(),
            Route::Product("caftan royal".into())
        );
    }

    #[test]
    fn malformed_paths_are_errors_and_resolve_to_gateway() {
        assert!(matches!(Route::parse("/manage/"), Err(RouteError::MissingParam { .. })));
        assert!(matches!(Route::parse("/manage"), Err(RouteError::MissingParam { .. })));
        assert!(matches!(Route::parse("/manage/%20"), Err(RouteError::MissingParam { .. })));
        assert!(matches!(Route::parse("/product/a/b"), Err(RouteError::ExtraSegments(_))));
        assert!(matches!(Route::parse("/manage/%FF"), Err(RouteError::BadEncoding(_))));
        assert!(matches!(Route::parse("/nowhere"), Err(RouteError::Unknown(_))));
        assert!(matches!(Route::parse("/world/extra"), Err(RouteError::Unknown(_))));

        for path in ["/manage/", "/nowhere", "/product/a/b", "#/__admin"] {
            assert_eq!(Route::resolve(path), Route::Gateway, "{path}");
        }
    }

    #[test]
    fn fallback_patch_carries_no_ids() {
        let state = AppState {
            screen: ScreenId::MerchantDashboard,
            merchant_id: Some("m1".into()),
            product_id: Some("p1".into()),
            selected_merchant_id: Some("m2".into()),
            ..Default::default()
        };
        let next = crate::app_core::reduce(state, Route::resolve("/nowhere").patch());
        assert_eq!(next.screen, ScreenId::Gateway);
        assert_eq!(next.merchant_id, None);
        assert_eq!(next.product_id, None);
        assert_eq!(next.selected_merchant_id, None);
    }

    #[test]
    fn canonical_paths_round_trip() {
        let routes = [
            Route::Gateway,
            Route::Auth,
            Route::World,
            Route::Admin,
            Route::Manage("m 1".into()),
            Route::Product("p/1".into()),
            Route::Merchant("x".into()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_path()).unwrap(), route);
        }
    }

    #[test]
    fn state_without_required_id_has_no_canonical_route() {
        let state = AppState {
            screen: ScreenId::MerchantDashboard,
            ..Default::default()
        };
        assert_eq!(Route::for_state(&state), None);

        let state = AppState {
            screen: ScreenId::MerchantDashboard,
            merchant_id: Some("m1".into()),
            ..Default::default()
        };
        assert_eq!(Route::for_state(&state), Some(Route::Manage("m1".into())));
    }
}
