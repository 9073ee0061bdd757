//! The cart interaction widget.
//!
//! Binds "add to cart" controls, turns clicks into item creation requests,
//! and applies what the backend reports back onto the page.

use cartwire_bridge::{
    MessageFromBackend,
    cart::{ADD_FAILED_MESSAGE, CartItemRequest, CartSummary},
    notification::NotificationMessage,
};
use tokio::time::Instant;

use crate::{
    BackendBridge,
    cookies::{CSRF_COOKIE_NAME, get_cookie},
    page::{
        ADD_TO_CART_ATTRIBUTE, CART_COUNT_ID, HIDDEN_CLASS, PRODUCT_ID_ATTRIBUTE, Page,
        QUANTITY_ID, VARIANT_ID_ATTRIBUTE,
    },
    quantity::parse_quantity,
};

#[derive(Debug)]
pub struct CartWidget {
    page: Page,
    bridge: BackendBridge,
    /// Document indices of the bound controls.
    controls: Vec<usize>,
}

impl CartWidget {
    pub fn new(page: Page, bridge: BackendBridge) -> Self {
        Self {
            page,
            bridge,
            controls: Vec::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Document indices of the bound controls, in click order.
    pub fn controls(&self) -> &[usize] {
        &self.controls
    }

    /// Page-ready hook: binds every control carrying the marker attribute,
    /// hands the page cookies to the backend and refreshes the count.
    /// Returns how many controls were bound.
    pub async fn initialize(&mut self) -> usize {
        self.controls = self
            .page
            .document
            .elements_with_attribute(ADD_TO_CART_ATTRIBUTE);

        if !self.page.document.cookie.is_empty() {
            self.bridge
                .seed_cookies(self.page.document.cookie.clone())
                .await;
        }
        self.bridge.request_cart_summary().await;

        self.controls.len()
    }

    /// Add Item: reacts to a click on bound control number `control`.
    pub async fn click(&mut self, control: usize) {
        let Some(button) = self
            .controls
            .get(control)
            .and_then(|&index| self.page.document.element(index))
        else {
            log::warn!("There is no add to cart control #{control}");
            return;
        };

        let product = button.attribute(PRODUCT_ID_ATTRIBUTE).map(str::to_string);
        if product.is_none() {
            log::warn!("Add to cart control #{control} has no {PRODUCT_ID_ATTRIBUTE}");
        }
        let variant = button
            .attribute(VARIANT_ID_ATTRIBUTE)
            .filter(|variant| !variant.is_empty())
            .map(str::to_string);
        let quantity = parse_quantity(
            self.page
                .document
                .element_by_id(QUANTITY_ID)
                .and_then(|field| field.value.as_deref()),
        );

        let csrf_token = match get_cookie(&self.page.document.cookie, CSRF_COOKIE_NAME) {
            Ok(token) => token,
            Err(err) => {
                log::error!("Error reading {CSRF_COOKIE_NAME} cookie: {err}");
                self.show_notification(NotificationMessage::error(ADD_FAILED_MESSAGE), Instant::now());
                return;
            }
        };

        let item = CartItemRequest {
            product,
            variant,
            quantity,
        };
        self.bridge.add_item(item, csrf_token).await;
    }

    /// The user typed into the quantity field.
    pub fn set_quantity(&mut self, value: impl Into<String>) {
        match self.page.document.element_by_id_mut(QUANTITY_ID) {
            Some(field) => field.set_value(value),
            None => log::warn!("The page has no #{QUANTITY_ID} field"),
        }
    }

    /// Applies a backend message to the page. Returns whether anything
    /// visible changed.
    pub fn apply(&mut self, message: MessageFromBackend, now: Instant) -> bool {
        match message {
            MessageFromBackend::NotificationMessage(notification) => {
                self.show_notification(notification, now);
                true
            }
            MessageFromBackend::CartSummaryResponse(summary) => self.update_cart_count(summary),
            MessageFromBackend::CookiesChanged(cookies) => {
                self.page.document.cookie = cookies;
                false
            }
        }
    }

    pub fn show_notification(&mut self, notification: NotificationMessage, now: Instant) {
        self.page.notifications.show(
            notification.message,
            notification.notification_type,
            now,
        );
    }

    /// Writes the total into the counter and reveals it when the cart is not
    /// empty. An empty cart never hides an already visible counter.
    fn update_cart_count(&mut self, summary: CartSummary) -> bool {
        let Some(counter) = self.page.document.element_by_id_mut(CART_COUNT_ID) else {
            return false;
        };

        counter.set_text(summary.total_items.to_string());
        if summary.total_items > 0 {
            counter.remove_class(HIDDEN_CLASS);
        }
        true
    }

    pub fn expire_notifications(&mut self, now: Instant) -> usize {
        self.page.notifications.expire(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.page.notifications.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cartwire_bridge::{MessageToBackend, notification::NotificationType};
    use serde_json::json;
    use testresult::TestResult;
    use tokio::sync::mpsc::{self, Receiver};

    use super::*;

    const PAGE: &str = r#"
        cookie = "sessionid=s1; csrftoken=tok%2B1"

        [[elements]]
        tag = "span"
        id = "cart-count"
        classes = ["badge", "hidden"]
        text = "0"

        [[elements]]
        tag = "input"
        id = "quantity"
        value = ""

        [[elements]]
        tag = "button"
        attributes = { data-add-to-cart = "", data-product-id = "42" }

        [[elements]]
        tag = "button"
        attributes = { data-add-to-cart = "", data-product-id = "7", data-variant-id = "v1" }
    "#;

    async fn widget(template: &str) -> TestResult<(CartWidget, Receiver<MessageToBackend>)> {
        let (tx, mut rx) = mpsc::channel(16);
        let mut widget = CartWidget::new(
            Page::from_toml(template)?,
            BackendBridge { to_backend: tx },
        );
        widget.initialize().await;

        // Drain the page-ready traffic.
        while let Ok(message) = rx.try_recv() {
            assert!(matches!(
                message,
                MessageToBackend::SeedCookies(_) | MessageToBackend::CartSummaryRequest
            ));
        }
        Ok((widget, rx))
    }

    fn counter(widget: &CartWidget) -> (String, Vec<String>) {
        let counter = widget
            .page()
            .document
            .element_by_id(CART_COUNT_ID)
            .cloned()
            .unwrap_or_default();
        (counter.text, counter.classes)
    }

    #[tokio::test]
    async fn initialize_binds_controls_and_refreshes_count() -> TestResult {
        let (tx, mut rx) = mpsc::channel(16);
        let mut widget = CartWidget::new(Page::from_toml(PAGE)?, BackendBridge { to_backend: tx });

        assert_eq!(widget.initialize().await, 2);
        assert_eq!(widget.controls(), &[2, 3]);
        assert!(matches!(
            rx.try_recv(),
            Ok(MessageToBackend::SeedCookies(cookies)) if cookies == "sessionid=s1; csrftoken=tok%2B1"
        ));
        assert!(matches!(rx.try_recv(), Ok(MessageToBackend::CartSummaryRequest)));
        Ok(())
    }

    #[tokio::test]
    async fn click_with_empty_quantity_sends_one() -> TestResult {
        let (mut widget, mut rx) = widget(PAGE).await?;

        widget.click(0).await;

        match rx.try_recv()? {
            MessageToBackend::AddItemRequest { item, csrf_token } => {
                assert_eq!(
                    serde_json::to_value(&item)?,
                    json!({ "product": "42", "variant": null, "quantity": 1 })
                );
                assert_eq!(csrf_token.as_deref(), Some("tok+1"));
            }
            other => panic!("unexpected message {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn click_reads_variant_and_typed_quantity() -> TestResult {
        let (mut widget, mut rx) = widget(PAGE).await?;

        widget.set_quantity("2");
        widget.click(1).await;

        match rx.try_recv()? {
            MessageToBackend::AddItemRequest { item, .. } => assert_eq!(
                item,
                CartItemRequest {
                    product: Some("7".into()),
                    variant: Some("v1".into()),
                    quantity: 2,
                }
            ),
            other => panic!("unexpected message {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn missing_quantity_field_and_cookie_are_tolerated() -> TestResult {
        let (mut widget, mut rx) = widget(
            r#"
            [[elements]]
            tag = "button"
            attributes = { data-add-to-cart = "", data-product-id = "9", data-variant-id = "" }
            "#,
        )
        .await?;

        widget.set_quantity("5");
        widget.click(0).await;

        match rx.try_recv()? {
            MessageToBackend::AddItemRequest { item, csrf_token } => {
                assert_eq!(item.quantity, 1);
                assert_eq!(item.variant, None);
                assert_eq!(csrf_token, None);
            }
            other => panic!("unexpected message {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn control_without_product_sends_null_product() -> TestResult {
        let (mut widget, mut rx) = widget(
            r#"
            [[elements]]
            tag = "button"
            attributes = { data-add-to-cart = "" }
            "#,
        )
        .await?;

        widget.click(0).await;

        match rx.try_recv()? {
            MessageToBackend::AddItemRequest { item, .. } => assert_eq!(
                serde_json::to_value(&item)?,
                json!({ "product": null, "variant": null, "quantity": 1 })
            ),
            other => panic!("unexpected message {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn oversized_quantity_reaches_the_request() -> TestResult {
        let (mut widget, mut rx) = widget(PAGE).await?;

        widget.set_quantity("99999999999999999999");
        widget.click(0).await;

        match rx.try_recv()? {
            MessageToBackend::AddItemRequest { item, .. } => assert_eq!(
                serde_json::to_string(&item)?,
                r#"{"product":"42","variant":null,"quantity":99999999999999999999}"#
            ),
            other => panic!("unexpected message {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn unknown_control_is_ignored() -> TestResult {
        let (mut widget, mut rx) = widget(PAGE).await?;

        widget.click(5).await;

        assert!(rx.try_recv().is_err());
        assert!(widget.page().notifications.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_csrf_cookie_shows_generic_error() -> TestResult {
        let (mut widget, mut rx) = widget(PAGE).await?;
        widget.apply(
            MessageFromBackend::CookiesChanged("csrftoken=%zz".into()),
            Instant::now(),
        );

        widget.click(0).await;

        assert!(rx.try_recv().is_err());
        let banners = widget.page().notifications.banners();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].message, "Error adding product to cart");
        assert_eq!(banners[0].severity, NotificationType::Error);
        Ok(())
    }

    #[tokio::test]
    async fn positive_total_reveals_counter() -> TestResult {
        let (mut widget, _rx) = widget(PAGE).await?;

        let changed = widget.apply(
            MessageFromBackend::CartSummaryResponse(CartSummary { total_items: 3 }),
            Instant::now(),
        );

        assert!(changed);
        assert_eq!(counter(&widget), ("3".to_string(), vec!["badge".to_string()]));
        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_updates_text_without_touching_visibility() -> TestResult {
        let (mut widget, _rx) = widget(PAGE).await?;
        let now = Instant::now();

        widget.apply(
            MessageFromBackend::CartSummaryResponse(CartSummary { total_items: 0 }),
            now,
        );
        assert_eq!(
            counter(&widget),
            ("0".to_string(), vec!["badge".to_string(), "hidden".to_string()])
        );

        widget.apply(
            MessageFromBackend::CartSummaryResponse(CartSummary { total_items: 2 }),
            now,
        );
        widget.apply(
            MessageFromBackend::CartSummaryResponse(CartSummary { total_items: 0 }),
            now,
        );
        assert_eq!(counter(&widget), ("0".to_string(), vec!["badge".to_string()]));
        Ok(())
    }

    #[tokio::test]
    async fn notifications_live_for_three_seconds() -> TestResult {
        let (mut widget, _rx) = widget(PAGE).await?;
        let now = Instant::now();

        widget.apply(
            MessageFromBackend::NotificationMessage(NotificationMessage::success(
                "Product added to cart!",
            )),
            now,
        );

        assert_eq!(widget.next_deadline(), Some(now + Duration::from_millis(3000)));
        assert_eq!(widget.expire_notifications(now + Duration::from_millis(2999)), 0);
        assert_eq!(widget.expire_notifications(now + Duration::from_millis(3000)), 1);
        assert_eq!(widget.next_deadline(), None);
        Ok(())
    }

    #[tokio::test]
    async fn cookie_updates_are_invisible_but_used() -> TestResult {
        let (mut widget, mut rx) = widget(PAGE).await?;

        let changed = widget.apply(
            MessageFromBackend::CookiesChanged("csrftoken=rotated; sessionid=s1".into()),
            Instant::now(),
        );
        widget.click(0).await;

        assert!(!changed);
        assert!(matches!(
            rx.try_recv()?,
            MessageToBackend::AddItemRequest { csrf_token: Some(token), .. } if token == "rotated"
        ));
        Ok(())
    }
}
