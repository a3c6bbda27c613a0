use morroky_config::PRODUCT_IMAGE_SLOTS;

/// Pads or truncates to exactly [`PRODUCT_IMAGE_SLOTS`] entries.
pub fn normalize_image_slots(mut urls: Vec<Option<String>>) -> Vec<Option<String>> {
    urls.truncate(PRODUCT_IMAGE_SLOTS);
    urls.resize(PRODUCT_IMAGE_SLOTS, None);
    urls
}

/// Appends `url` after the filled slots; when full, the oldest images are dropped.
pub fn append_image(current: &[Option<String>], url: String) -> Vec<Option<String>> {
    let mut filled: Vec<Option<String>> = current.iter().filter(|u| u.is_some()).cloned().collect();
    filled.push(Some(url));
    if filled.len() > PRODUCT_IMAGE_SLOTS {
        let excess = filled.len() - PRODUCT_IMAGE_SLOTS;
        filled.drain(..excess);
    }
    normalize_image_slots(filled)
}
