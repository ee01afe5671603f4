//! Terminal adapters for the checkout flow.
//!
//! [`TerminalRenderer`] redraws the cart after each change and
//! [`LinkChannel`] prints the order link. Both write either plain text or one
//! JSON document per line.

use std::fmt::Write as _;
use std::io::Write;

use greenleaf_core::{
    CheckoutView, FieldName, FieldStatus, MessageChannel, OrderMessage, Price, Renderer,
};
use tracing::{info, warn};

/// Output style shared by the terminal adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Draws each [`CheckoutView`] to a writer.
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
    format: OutputFormat,
    currency_symbol: String,
}

impl<W: Write> TerminalRenderer<W> {
    #[must_use]
    pub fn new(out: W, format: OutputFormat, currency_symbol: impl Into<String>) -> Self {
        Self {
            out,
            format,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// The underlying writer.
    #[cfg(test)]
    pub const fn output(&self) -> &W {
        &self.out
    }

    fn price(&self, price: Price) -> String {
        price.display(&self.currency_symbol)
    }

    fn write_text(&mut self, view: &CheckoutView) -> std::io::Result<()> {
        let mut buf = String::new();
        let _ = writeln!(buf, "== {} | {} item(s) ==", view.stage, view.item_count);

        if view.items.is_empty() {
            buf.push_str("Your cart is empty.\n");
        } else {
            for item in &view.items {
                let _ = writeln!(
                    buf,
                    "  {} x{}  {}",
                    item.name,
                    item.quantity,
                    self.price(item.line_total())
                );
            }
            let _ = writeln!(
                buf,
                "  Subtotal: {}  Delivery: {}  Total: {}",
                self.price(view.subtotal),
                self.price(view.delivery_fee),
                self.price(view.total)
            );
        }

        if let Some(summary) = &view.summary {
            buf.push_str("Order summary:\n");
            for line in &summary.lines {
                let _ = writeln!(buf, "  {}  {}", line.label(), self.price(line.line_total));
            }
            let _ = writeln!(buf, "  Total: {}", self.price(summary.total));
            match view.payment_method {
                Some(method) => {
                    let _ = writeln!(buf, "Payment: {method}");
                }
                None => buf.push_str("Payment: not selected\n"),
            }
        }

        for field in FieldName::ALL {
            if let FieldStatus::Invalid(error) = view.field_validity.get(field) {
                let _ = writeln!(buf, "  ! {field}: {error}");
            }
        }

        self.out.write_all(buf.as_bytes())?;
        self.out.flush()
    }

    fn write_json(&mut self, view: &CheckoutView) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, view)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &CheckoutView) {
        let result = match self.format {
            OutputFormat::Text => self.write_text(view),
            OutputFormat::Json => self.write_json(view),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to draw checkout view");
        }
    }
}

/// Prints the order link for the user to open.
#[derive(Debug)]
pub struct LinkChannel<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> LinkChannel<W> {
    #[must_use]
    pub const fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// The underlying writer.
    #[cfg(test)]
    pub const fn output(&self) -> &W {
        &self.out
    }

    fn write(&mut self, message: &OrderMessage) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}", message.text)?;
                writeln!(self.out, "Send your order: {}", message.link)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, message)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> MessageChannel for LinkChannel<W> {
    fn dispatch(&mut self, message: &OrderMessage) {
        info!(link = %message.link, "Order message ready");
        if let Err(e) = self.write(message) {
            warn!(error = %e, "Failed to print order link");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use greenleaf_core::{CheckoutConfig, CheckoutFlow, ProductId};

    use super::*;

    fn flow(format: OutputFormat) -> CheckoutFlow<LinkChannel<Vec<u8>>, TerminalRenderer<Vec<u8>>> {
        let config = CheckoutConfig::default();
        let renderer = TerminalRenderer::new(Vec::new(), format, config.currency_symbol.clone());
        CheckoutFlow::new(config, LinkChannel::new(Vec::new(), format), renderer)
    }

    fn rendered(flow: &CheckoutFlow<LinkChannel<Vec<u8>>, TerminalRenderer<Vec<u8>>>) -> String {
        String::from_utf8(flow.renderer().output().clone()).unwrap()
    }

    #[test]
    fn test_text_render_lists_items_and_totals() {
        let mut flow = flow(OutputFormat::Text);
        flow.add(ProductId::new("pea"), "Pea Shoots", Price::from_units(100)).unwrap();
        flow.add(ProductId::new("pea"), "Pea Shoots", Price::from_units(100)).unwrap();

        let out = rendered(&flow);
        assert!(out.contains("== browsing | 2 item(s) =="));
        assert!(out.contains("Pea Shoots x2  ₹200.00"));
        assert!(out.contains("Total: ₹230.00"));
    }

    #[test]
    fn test_text_render_empty_cart() {
        let mut flow = flow(OutputFormat::Text);
        flow.open_cart();
        assert!(rendered(&flow).contains("Your cart is empty."));
    }

    #[test]
    fn test_text_render_flags_invalid_fields() {
        let mut flow = flow(OutputFormat::Text);
        flow.update_field(FieldName::Name, "A");
        assert!(rendered(&flow).contains("! name:"));
    }

    #[test]
    fn test_json_render_one_document_per_line() {
        let mut flow = flow(OutputFormat::Json);
        flow.add(ProductId::new("pea"), "Pea Shoots", Price::from_units(100)).unwrap();
        flow.open_cart();

        let out = rendered(&flow);
        let views: Vec<CheckoutView> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(views.len(), 2);
        assert_eq!(views.last().unwrap().item_count, 1);
    }

    #[test]
    fn test_link_channel_prints_link() {
        let mut channel = LinkChannel::new(Vec::new(), OutputFormat::Text);
        channel.dispatch(&OrderMessage {
            text: "New order".to_string(),
            link: "https://wa.me/919000000000?text=New+order".to_string(),
        });

        let out = String::from_utf8(channel.output().clone()).unwrap();
        assert!(out.contains("Send your order: https://wa.me/919000000000?text=New+order"));
    }
}
