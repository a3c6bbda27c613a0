use chrono::Utc;
use morroky_config::{MERCHANTS_TABLE, PRODUCTS_TABLE};
use morroky_core::{
    append_image, normalize_image_slots, LandingPageConfig, Merchant, MerchantFilter, MerchantId,
    MerchantStatus, NewMerchant, NewProduct, Product, ProductId, UserId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::{check, BaasClient};
use crate::error::BaasError;

type Filters = Vec<(&'static str, String)>;

fn eq(column: &'static str, value: impl Into<String>) -> (&'static str, String) {
    (column, value.into())
}

/// PostgREST query string: `select=*`, `col=eq.value` filters and an optional order.
fn query(filters: &[(&'static str, String)], order: Option<&str>, limit: Option<usize>) -> Vec<(String, String)> {
    let mut q = vec![("select".to_string(), "*".to_string())];
    q.extend(filters.iter().map(|(col, v)| (col.to_string(), format!("eq.{v}"))));
    if let Some(order) = order {
        q.push(("order".to_string(), order.to_string()));
    }
    if let Some(limit) = limit {
        q.push(("limit".to_string(), limit.to_string()));
    }
    q
}

impl BaasClient {
    fn table_url(&self, table: &str) -> String {
        self.url(&format!("/rest/v1/{table}"))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&'static str, String)],
        order: Option<&str>,
    ) -> Result<Vec<T>, BaasError> {
        tracing::debug!(table, ?filters, "select");
        let resp = self
            .authorize(self.http.get(self.table_url(table)))
            .query(&query(filters, order, None))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// First matching row. Rows hidden by row-level policies look exactly like
    /// missing rows, so both come back as `None`.
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&'static str, String)],
    ) -> Result<Option<T>, BaasError> {
        let resp = self
            .authorize(self.http.get(self.table_url(table)))
            .query(&query(filters, None, Some(1)))
            .send()
            .await?;
        let rows: Vec<T> = check(resp).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn insert<B: Serialize, T: DeserializeOwned>(&self, table: &str, row: &B) -> Result<T, BaasError> {
        let resp = self
            .authorize(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;
        let rows: Vec<T> = check(resp).await?.json().await?;
        rows.into_iter().next().ok_or(BaasError::EmptyResponse)
    }

    async fn update(&self, table: &str, filters: &[(&'static str, String)], patch: Value) -> Result<(), BaasError> {
        tracing::debug!(table, ?filters, "update");
        let q: Vec<(String, String)> = filters
            .iter()
            .map(|(col, v)| (col.to_string(), format!("eq.{v}")))
            .collect();
        let resp = self
            .authorize(self.http.patch(self.table_url(table)))
            .query(&q)
            .json(&patch)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, filters: &[(&'static str, String)]) -> Result<(), BaasError> {
        let q: Vec<(String, String)> = filters
            .iter()
            .map(|(col, v)| (col.to_string(), format!("eq.{v}")))
            .collect();
        let resp = self
            .authorize(self.http.delete(self.table_url(table)))
            .query(&q)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    // --- Merchants ---

    /// Inserts a pending merchant owned by the signed-in user (anonymous
    /// registrations carry no owner) and returns the new id.
    pub async fn register_merchant(&self, merchant: &NewMerchant) -> Result<MerchantId, BaasError> {
        let mut row = merchant.clone();
        row.status = MerchantStatus::Pending;
        row.owner_id = self.session_user().map(|u| u.id);
        let created: Merchant = self.insert(MERCHANTS_TABLE, &row).await?;
        Ok(created.id)
    }

    pub async fn merchant_by_owner(&self, owner_id: &UserId) -> Result<Option<Merchant>, BaasError> {
        self.select_one(MERCHANTS_TABLE, &[eq("owner_id", owner_id.as_str())]).await
    }

    pub async fn merchant_by_id(&self, id: &MerchantId) -> Result<Option<Merchant>, BaasError> {
        self.select_one(MERCHANTS_TABLE, &[eq("id", id.as_str())]).await
    }

    pub async fn list_merchants(&self, filter: &MerchantFilter) -> Result<Vec<Merchant>, BaasError> {
        let filters: Filters = filter.pairs();
        self.select(MERCHANTS_TABLE, &filters, None).await
    }

    pub async fn pending_merchants(&self) -> Result<Vec<Merchant>, BaasError> {
        self.select(MERCHANTS_TABLE, &[eq("status", MerchantStatus::Pending.as_str())], None)
            .await
    }

    pub async fn verify_merchant(&self, id: &MerchantId) -> Result<(), BaasError> {
        self.update(
            MERCHANTS_TABLE,
            &[eq("id", id.as_str())],
            json!({ "status": MerchantStatus::Verified, "updated_at": Utc::now() }),
        )
        .await
    }

    pub async fn update_merchant_logo(&self, id: &MerchantId, url: &str) -> Result<(), BaasError> {
        self.update(MERCHANTS_TABLE, &[eq("id", id.as_str())], json!({ "logo_url": url }))
            .await
    }

    pub async fn update_merchant_background(&self, id: &MerchantId, url: &str) -> Result<(), BaasError> {
        self.update(MERCHANTS_TABLE, &[eq("id", id.as_str())], json!({ "background_url": url }))
            .await
    }

    // --- Products ---

    pub async fn add_product(&self, product: &NewProduct) -> Result<Product, BaasError> {
        let mut row = product.clone();
        row.image_urls = normalize_image_slots(row.image_urls);
        self.insert(PRODUCTS_TABLE, &row).await
    }

    /// Newest first.
    pub async fn products_by_merchant(&self, merchant_id: &MerchantId) -> Result<Vec<Product>, BaasError> {
        self.select(
            PRODUCTS_TABLE,
            &[eq("merchant_id", merchant_id.as_str())],
            Some("created_at.desc"),
        )
        .await
    }

    pub async fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>, BaasError> {
        self.select_one(PRODUCTS_TABLE, &[eq("id", id.as_str())]).await
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), BaasError> {
        self.delete(PRODUCTS_TABLE, &[eq("id", id.as_str())]).await
    }

    pub async fn update_product_image(&self, id: &ProductId, url: &str) -> Result<(), BaasError> {
        self.update(PRODUCTS_TABLE, &[eq("id", id.as_str())], json!({ "image_url": url }))
            .await
    }

    pub async fn update_product_images(&self, id: &ProductId, urls: Vec<Option<String>>) -> Result<(), BaasError> {
        self.update(
            PRODUCTS_TABLE,
            &[eq("id", id.as_str())],
            json!({ "image_urls": normalize_image_slots(urls) }),
        )
        .await
    }

    pub async fn add_product_image(&self, id: &ProductId, url: String) -> Result<(), BaasError> {
        let product = self.product_by_id(id).await?.ok_or(BaasError::EmptyResponse)?;
        let next = append_image(&product.image_urls, url);
        self.update_product_images(id, next).await
    }

    pub async fn update_landing_page(&self, id: &ProductId, config: &LandingPageConfig) -> Result<(), BaasError> {
        self.update(
            PRODUCTS_TABLE,
            &[eq("id", id.as_str())],
            json!({ "landing_page_config": config }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_prefixes_filters_with_eq() {
        let q = query(&[eq("status", "pending")], Some("created_at.desc"), Some(1));
        assert_eq!(
            q,
            vec![
                ("select".to_string(), "*".to_string()),
                ("status".to_string(), "eq.pending".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }
}
