//! Order notification dispatch.
//!
//! Renders the owner and customer messages for a stored order and sends them
//! through the configured mail transport. The two sends are awaited and
//! result-tracked independently: a failed send is logged with the recipient
//! role and never propagated, so one failing cannot suppress the other and
//! neither can affect the already-committed order.

use std::sync::Arc;

use orderdesk_core::models::Order;
use orderdesk_core::Config;

use super::email::{Mailer, OutboundEmail, SmtpMailer};

/// Composes and dispatches the two per-order notification messages.
#[derive(Clone)]
pub struct OrderNotifier {
    mailer: Arc<dyn Mailer>,
    owner_email: String,
    public_base_url: String,
}

impl OrderNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, owner_email: String, public_base_url: String) -> Self {
        Self {
            mailer,
            owner_email,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from config. Returns `None` when SMTP or the owner address is
    /// missing; order submission then proceeds without notifications.
    pub fn from_config(config: &Config) -> Option<Self> {
        let owner_email = config.order_notify_email.clone()?;
        let mailer = SmtpMailer::from_config(config)?;
        Some(Self::new(
            Arc::new(mailer),
            owner_email,
            config.public_base_url.clone(),
        ))
    }

    /// Send both notifications for a stored order, best effort.
    pub async fn order_submitted(&self, order: &Order) {
        let image_links = self.render_image_links(&order.image_paths);

        let owner = OutboundEmail {
            to: self.owner_email.clone(),
            subject: "New custom order received".to_string(),
            html_body: render_owner_body(order, &image_links),
        };
        if let Err(e) = self.mailer.send(owner).await {
            tracing::error!(
                error = %e,
                order_id = order.id,
                recipient = "owner",
                "Failed to send order notification"
            );
        }

        let customer = OutboundEmail {
            to: order.email.clone(),
            subject: "Thanks for your custom order!".to_string(),
            html_body: render_customer_body(order, &image_links),
        };
        if let Err(e) = self.mailer.send(customer).await {
            tracing::error!(
                error = %e,
                order_id = order.id,
                recipient = "customer",
                "Failed to send order confirmation"
            );
        }
    }

    /// Anchor list with fully-qualified links, one per stored image.
    fn render_image_links(&self, paths: &[String]) -> String {
        paths
            .iter()
            .map(|p| format!(r#"<a href="{}{}">{}</a>"#, self.public_base_url, p, p))
            .collect::<Vec<_>>()
            .join("<br>")
    }
}

fn render_owner_body(order: &Order, image_links: &str) -> String {
    let images_section = if image_links.is_empty() {
        String::new()
    } else {
        format!("<p><strong>Images:</strong><br>{}</p>", image_links)
    };
    format!(
        "<h2>New Order Submitted</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Description:</strong><br>{}</p>{}",
        order.name,
        order.email,
        order.phone.as_deref().unwrap_or("N/A"),
        order.project_description,
        images_section,
    )
}

fn render_customer_body(order: &Order, image_links: &str) -> String {
    let images_section = if image_links.is_empty() {
        String::new()
    } else {
        format!("<p>Uploaded Images:<br>{}</p>", image_links)
    };
    format!(
        "<h2>Thanks, {}!</h2>\
         <p>We've received your order and will follow up soon.</p>\
         <p><strong>Your Description:</strong><br>{}</p>{}",
        order.name, order.project_description, images_section,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use orderdesk_core::AppError;
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: OutboundEmail) -> Result<(), AppError> {
            self.sent.lock().unwrap().push(email);
            if self.fail {
                Err(AppError::Email("simulated transport failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn sample_order(image_paths: Vec<String>) -> Order {
        Order {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            project_description: "A standing desk".to_string(),
            image_paths,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn sends_owner_then_customer_message() {
        let mailer = Arc::new(RecordingMailer::new(false));
        let notifier = OrderNotifier::new(
            mailer.clone(),
            "owner@example.com".to_string(),
            "http://localhost:3001".to_string(),
        );

        notifier.order_submitted(&sample_order(vec![])).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[1].to, "ada@example.com");
    }

    /// A failing transport must not stop the second send from being attempted.
    #[tokio::test]
    async fn both_sends_attempted_when_transport_fails() {
        let mailer = Arc::new(RecordingMailer::new(true));
        let notifier = OrderNotifier::new(
            mailer.clone(),
            "owner@example.com".to_string(),
            "http://localhost:3001".to_string(),
        );

        notifier.order_submitted(&sample_order(vec![])).await;

        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bodies_embed_description_and_fully_qualified_links() {
        let mailer = Arc::new(RecordingMailer::new(false));
        let notifier = OrderNotifier::new(
            mailer.clone(),
            "owner@example.com".to_string(),
            "http://localhost:3001/".to_string(),
        );

        let order = sample_order(vec!["/uploads/123-photo.png".to_string()]);
        notifier.order_submitted(&order).await;

        let sent = mailer.sent.lock().unwrap();
        for email in sent.iter() {
            assert!(email.html_body.contains("A standing desk"));
            assert!(email
                .html_body
                .contains(r#"href="http://localhost:3001/uploads/123-photo.png""#));
        }
        // Missing phone renders as N/A in the owner message.
        assert!(sent[0].html_body.contains("N/A"));
    }

    #[tokio::test]
    async fn bodies_omit_image_section_when_no_uploads() {
        let mailer = Arc::new(RecordingMailer::new(false));
        let notifier = OrderNotifier::new(
            mailer.clone(),
            "owner@example.com".to_string(),
            "http://localhost:3001".to_string(),
        );

        notifier.order_submitted(&sample_order(vec![])).await;

        let sent = mailer.sent.lock().unwrap();
        assert!(!sent[0].html_body.contains("Images:"));
        assert!(!sent[1].html_body.contains("Uploaded Images:"));
    }
}
