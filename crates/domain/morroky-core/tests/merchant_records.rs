use morroky_core::{Location, Merchant, MerchantFilter, MerchantStatus, NewProduct, Product};

#[test]
fn merchant_row_from_backend_json() {
    let row = r#"{
        "id": "m1",
        "name": "Bazar Atlas",
        "phone": "0612345678",
        "status": "verified",
        "location": {"city": "الدار البيضاء", "streetId": "omar-khayam", "shopNumber": "7"},
        "logo_url": null,
        "owner_id": "u1",
        "created_at": "2024-01-01T00:00:00Z"
    }"#;
    let m: Merchant = serde_json::from_str(row).unwrap();
    assert_eq!(m.status, MerchantStatus::Verified);
    assert_eq!(m.location.street_id.as_deref(), Some("omar-khayam"));
    assert_eq!(m.whatsapp_number().as_deref(), Some("212612345678"));
    assert!(m.rejection_reasons.is_empty());
}

#[test]
fn merchant_without_phone_has_no_whatsapp() {
    let m = Merchant {
        id: "m".into(),
        name: "x".into(),
        phone: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(m.whatsapp_number(), None);
}

#[test]
fn filter_drops_blank_values_and_keeps_order() {
    let f = MerchantFilter {
        street_id: Some("s1".into()),
        kissaria_id: Some("".into()),
        alley: Some("الممر 1".into()),
        status: Some(MerchantStatus::Verified),
    };
    assert_eq!(
        f.pairs(),
        vec![
            ("status", "verified".to_string()),
            ("location->>streetId", "s1".to_string()),
            ("location->>alley", "الممر 1".to_string()),
        ]
    );
    assert!(MerchantFilter::default().is_empty());
}

#[test]
fn new_product_always_has_four_slots() {
    let p = NewProduct::new("m1", "Tajine", 120.0, vec!["a.png".into()]);
    assert_eq!(p.image_urls.len(), 4);
    assert_eq!(p.image_urls[0].as_deref(), Some("a.png"));
}

#[test]
fn product_images_fall_back_to_legacy_column() {
    let p = Product {
        id: "p1".into(),
        merchant_id: "m1".into(),
        name: "x".into(),
        image_url: Some("legacy.png".into()),
        image_urls: vec![None, None, None, None],
        ..Default::default()
    };
    assert_eq!(p.images(), vec!["legacy.png"]);
    assert_eq!(p.cover_image(), Some("legacy.png"));
}

#[test]
fn registration_location_serialises_camel_case() {
    let loc = Location {
        street_id: Some("s".into()),
        kissaria_name: Some("k".into()),
        ..Default::default()
    };
    let json = serde_json::to_value(&loc).unwrap();
    assert_eq!(json["streetId"], "s");
    assert_eq!(json["kissariaName"], "k");
    assert!(json.get("city").is_none());
}
