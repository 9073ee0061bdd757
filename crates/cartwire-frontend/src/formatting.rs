//! Plain-text rendering of the page for the terminal.

use std::fmt::Write;

use cartwire_bridge::notification::NotificationType;

use crate::page::{
    CART_COUNT_ID, Document, HIDDEN_CLASS, PRODUCT_ID_ATTRIBUTE, Page, VARIANT_ID_ATTRIBUTE,
};

/// Lists the bound controls with the number used to click them.
pub fn format_controls(document: &Document, controls: &[usize]) -> String {
    let mut out = String::new();
    for (number, element) in controls
        .iter()
        .filter_map(|&index| document.element(index))
        .enumerate()
    {
        let product = element.attribute(PRODUCT_ID_ATTRIBUTE).unwrap_or("?");
        let _ = write!(out, "#{number} {:?} product {product}", element.text);
        if let Some(variant) = element.attribute(VARIANT_ID_ATTRIBUTE).filter(|v| !v.is_empty()) {
            let _ = write!(out, " variant {variant}");
        }
        out.push('\n');
    }
    out
}

/// Renders the cart counter and the banners currently on screen.
pub fn format_page(page: &Page) -> String {
    let mut out = String::new();

    match page.document.element_by_id(CART_COUNT_ID) {
        Some(counter) if counter.has_class(HIDDEN_CLASS) => {
            let _ = writeln!(out, "cart: {} (hidden)", counter.text);
        }
        Some(counter) => {
            let _ = writeln!(out, "cart: {}", counter.text);
        }
        None => {}
    }

    for banner in page.notifications.banners() {
        let tag = match banner.severity {
            NotificationType::Success => "ok",
            NotificationType::Error => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", banner.message);
    }

    out
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::time::Instant;

    use super::*;
    use crate::page::{ADD_TO_CART_ATTRIBUTE, PRODUCT_PAGE_TEMPLATE};

    #[test]
    fn renders_controls_counter_and_banners() -> TestResult {
        let mut page = Page::from_toml(PRODUCT_PAGE_TEMPLATE)?;
        let controls = page.document.elements_with_attribute(ADD_TO_CART_ATTRIBUTE);

        assert_eq!(
            format_controls(&page.document, &controls),
            "#0 \"Add to cart\" product 42\n#1 \"Add to cart (Large)\" product 42 variant 7\n"
        );
        assert_eq!(format_page(&page), "cart: 0 (hidden)\n");

        page.notifications
            .show("Out of stock", NotificationType::Error, Instant::now());
        assert_eq!(format_page(&page), "cart: 0 (hidden)\n[error] Out of stock\n");
        Ok(())
    }
}
