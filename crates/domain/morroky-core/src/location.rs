use serde::{Deserialize, Serialize};

/// Where a shop physically sits. Ids drive filtering; names are kept so the
/// address can be shown without a catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kissaria_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kissaria_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alley: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_number: Option<String>,
}

impl Location {
    /// Human-readable address, e.g. `الدار البيضاء - درب عمر - ... - محل 12`.
    pub fn format_address(&self) -> String {
        let mut parts: Vec<String> = [
            &self.city,
            &self.market,
            &self.street_name,
            &self.kissaria_name,
            &self.alley,
        ]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

        if let Some(shop) = self.shop_number.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(format!("محل {shop}"));
        }
        parts.join(" - ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_skips_missing_parts() {
        let loc = Location {
            city: Some("الدار البيضاء".into()),
            market: Some("درب عمر".into()),
            alley: Some("  ".into()),
            shop_number: Some("12".into()),
            ..Default::default()
        };
        assert_eq!(loc.format_address(), "الدار البيضاء - درب عمر - محل 12");
    }

    #[test]
    fn empty_location_formats_empty() {
        assert_eq!(Location::default().format_address(), "");
    }

    #[test]
    fn location_uses_camel_case_on_the_wire() {
        let loc: Location =
            serde_json::from_str(r#"{"streetId":"s1","kissariaName":"K","shopNumber":"3"}"#).unwrap();
        assert_eq!(loc.street_id.as_deref(), Some("s1"));
        assert_eq!(loc.kissaria_name.as_deref(), Some("K"));
        assert_eq!(loc.shop_number.as_deref(), Some("3"));
    }
}
