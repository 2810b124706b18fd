//! Printable HTML quote document

use super::Quote;
use crate::format::format_currency;

const TITLE: &str = "Installment simulation on store credit (subject to credit analysis)";

const STYLE: &str = "body { font-family: 'Helvetica Neue', Arial, sans-serif; margin: 20px; color: #333; background-color: #f9f9f9; }
.container { max-width: 800px; margin: 0 auto; background-color: white; padding: 30px; border-radius: 8px; }
h1 { text-align: center; color: #004D40; font-size: 24px; }
.info { margin-bottom: 30px; font-size: 16px; line-height: 1.6; background-color: #f5f5f5; padding: 20px; border-radius: 6px; }
table { border-collapse: collapse; width: 100%; margin-top: 20px; }
th { background-color: #00796B; color: white; font-size: 14px; text-transform: uppercase; padding: 10px; }
td { text-align: center; padding: 10px; border-bottom: 1px solid #eee; font-size: 15px; }
tr:nth-child(even) { background-color: #f9f9f9; }
.footer { text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; }
.share-buttons { display: flex; justify-content: center; margin-top: 30px; flex-wrap: wrap; }
.share-button { border-radius: 50px; padding: 10px 20px; margin: 5px; text-decoration: none; color: white; font-weight: bold; min-width: 180px; text-align: center; }
.whatsapp { background-color: #25D366; }
.email { background-color: #D44638; }
.print { background-color: #546E7A; }
.watermark { text-align: center; margin: 30px 0; font-size: 11px; font-style: italic; }
@media print { .share-buttons { display: none; } }";

impl Quote {
    /// Render the quote as a standalone HTML document
    pub fn to_html(&self) -> String {
        let (first_header, second_header) = if self.has_down_payment {
            ("Plan", "Value")
        } else {
            ("Installments", "Installment value")
        };

        let rows: String = self
            .options
            .iter()
            .map(|option| {
                let value = format_currency(option.installment_value);
                let (first, second) = if self.has_down_payment {
                    (
                        format!("Down payment of {}", option.down_payment_display),
                        format!("{} {}", option.label(), value),
                    )
                } else {
                    (option.label(), value)
                };
                format!(
                    "<tr><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&first),
                    escape_html(&second)
                )
            })
            .collect();

        let metadata = &self.metadata;
        format!(
            r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Quote - {customer}</title>
<style>
{style}
</style>
</head>
<body>
<div class="container">
<h1>{title}</h1>
<div class="info">
<p><strong>Client:</strong> {customer}</p>
<p><strong>Product:</strong> {product}</p>
<p><strong>Date:</strong> {date}</p>
<p><strong>Seller:</strong> {seller}</p>
</div>
<table>
<thead><tr><th>{first_header}</th><th>{second_header}</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<div class="footer">* Values subject to credit analysis and approval.</div>
<div class="share-buttons">
<a href="{whatsapp}" target="_blank" class="share-button whatsapp">Share via WhatsApp</a>
<a href="{mailto}" class="share-button email">Send by e-mail</a>
<a href="#" onclick="window.print(); return false;" class="share-button print">Print / Save PDF</a>
</div>
<div class="watermark">Generated by {brand}. All rights reserved.</div>
</div>
</body>
</html>
"##,
            customer = escape_html(metadata.customer()),
            product = escape_html(metadata.product()),
            date = escape_html(&metadata.date()),
            seller = escape_html(metadata.seller()),
            style = STYLE,
            title = TITLE,
            first_header = first_header,
            second_header = second_header,
            rows = rows,
            whatsapp = escape_html(&self.whatsapp_url()),
            mailto = escape_html(&self.mailto_url()),
            brand = escape_html(&self.brand),
        )
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PricingEngine, PricingRequest};
    use crate::quote::{InstallmentRange, QuoteMetadata};
    use crate::tables::TableSelector;

    fn html_for(request: &PricingRequest, metadata: QuoteMetadata) -> String {
        let options = PricingEngine::default().price(request).unwrap();
        Quote::assemble(metadata, &options, request.has_down_payment, InstallmentRange::new(2, 3).unwrap())
            .unwrap()
            .to_html()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_layout_without_down_payment() {
        let html = html_for(&PricingRequest::new(1000.0, TableSelector::Full), QuoteMetadata::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<th>Installments</th><th>Installment value</th>"));
        assert!(html.contains("<tr><td>2x</td><td>R$ 565,00</td></tr>"));
        assert!(html.contains("<tr><td>3x</td><td>R$ 390,00</td></tr>"));
        assert!(html.contains("<strong>Client:</strong> Not informed"));
        assert!(html.contains("href=\"https://wa.me/?text="));
    }

    #[test]
    fn test_layout_with_down_payment() {
        let html = html_for(
            &PricingRequest::with_down_payment(1000.0, TableSelector::Full, 130.0),
            QuoteMetadata::default(),
        );

        assert!(html.contains("<th>Plan</th><th>Value</th>"));
        assert!(html.contains("<tr><td>Down payment of R$ 130,00</td><td>2x R$ 500,00</td></tr>"));
    }

    #[test]
    fn test_metadata_is_escaped() {
        let metadata = QuoteMetadata {
            customer_name: Some("<script>alert(1)</script>".to_string()),
            ..Default::default()
        };
        let html = html_for(&PricingRequest::new(500.0, TableSelector::Half), metadata);

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}
