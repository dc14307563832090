//! Server-side HTML rendering of the pricing form and results.
//!
//! Every echoed form value and error message goes through [`escape_html`].
//! Prices and strikes are shown to 4 decimals, Greeks and the year fraction
//! to 6.

use pricer_models::analytical::GreeksResult;

use crate::valuation::{FormValues, Valuation};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 72rem; color: #1f2933; }
form { display: grid; grid-template-columns: repeat(3, minmax(12rem, 1fr)); gap: 0.75rem 1.5rem; }
label { display: flex; flex-direction: column; font-size: 0.9rem; }
input { padding: 0.35rem; font-size: 1rem; }
.actions { grid-column: 1 / -1; display: flex; gap: 0.75rem; }
.error { background: #fde8e8; border: 1px solid #f05252; padding: 0.75rem; margin: 1rem 0; }
table { border-collapse: collapse; margin-top: 1rem; }
th, td { border: 1px solid #cbd2d9; padding: 0.3rem 0.6rem; text-align: right; }
th:first-child, td:first-child { text-align: left; }
"#;

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn input(html: &mut String, label: &str, name: &str, kind: &str, value: &str) {
    let step = if kind == "number" { " step=\"any\"" } else { "" };
    html.push_str(&format!(
        "<label>{label}<input type=\"{kind}\" name=\"{name}\" value=\"{}\"{step}></label>\n",
        escape_html(value)
    ));
}

fn render_form(html: &mut String, values: &FormValues) {
    html.push_str("<form method=\"post\" action=\"/\">\n");
    input(html, "Valuation date", "valuation_date", "date", &values.valuation_date);
    input(html, "Expiry date", "expiry_date", "date", &values.expiry_date);
    input(html, "Spot", "spot", "number", &values.spot);
    input(html, "Strike", "strike", "number", &values.strike);
    input(html, "Volatility (%)", "vol_pct", "number", &values.vol_pct);
    input(html, "Risk-free rate (%)", "risk_free_pct", "number", &values.risk_free_pct);
    html.push_str(
        "<div class=\"actions\">\
         <button type=\"submit\">Calculate</button>\
         <button type=\"submit\" formaction=\"/export_csv\" formmethod=\"get\">Export CSV</button>\
         </div>\n</form>\n",
    );
}

fn greek_rows(greeks: &GreeksResult) -> [(&'static str, f64, f64); 4] {
    [
        ("Delta", greeks.call_delta, greeks.put_delta),
        ("Gamma", greeks.gamma, greeks.gamma),
        ("Vega", greeks.vega, greeks.vega),
        ("Theta", greeks.call_theta, greeks.put_theta),
    ]
}

fn render_results(html: &mut String, valuation: &Valuation) {
    html.push_str("<section id=\"results\">\n<h2>Results</h2>\n");
    html.push_str(&format!(
        "<p>Time to expiry (years): <strong>{:.6}</strong></p>\n",
        valuation.time_to_expiry
    ));

    html.push_str("<table id=\"atm\">\n<tr><th></th><th>Call</th><th>Put</th></tr>\n");
    html.push_str(&format!(
        "<tr><td>Price</td><td>{:.4}</td><td>{:.4}</td></tr>\n",
        valuation.prices.call_price, valuation.prices.put_price
    ));
    for (name, call, put) in greek_rows(&valuation.greeks) {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.6}</td><td>{:.6}</td></tr>\n",
            name, call, put
        ));
    }
    html.push_str(&format!(
        "<tr><td>Rho</td><td>{:.6}</td><td>{:.6}</td></tr>\n</table>\n",
        valuation.greeks.call_rho, valuation.greeks.put_rho
    ));

    html.push_str("<h3>Strike scenarios</h3>\n<table id=\"scenarios\">\n");
    html.push_str(
        "<tr><th>Offset</th><th>Strike</th><th>Call</th><th>Put</th>\
         <th>Call delta</th><th>Put delta</th><th>Gamma</th><th>Vega</th>\
         <th>Call theta</th><th>Put theta</th><th>Call rho</th><th>Put rho</th></tr>\n",
    );
    for row in &valuation.rows {
        let g = &row.greeks;
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.4}</td><td>{:.4}</td><td>{:.4}</td>\
             <td>{:.6}</td><td>{:.6}</td><td>{:.6}</td><td>{:.6}</td>\
             <td>{:.6}</td><td>{:.6}</td><td>{:.6}</td><td>{:.6}</td></tr>\n",
            escape_html(&row.offset_label),
            row.strike,
            row.call_price,
            row.put_price,
            g.call_delta,
            g.put_delta,
            g.gamma,
            g.vega,
            g.call_theta,
            g.put_theta,
            g.call_rho,
            g.put_rho,
        ));
    }
    html.push_str("</table>\n</section>\n");
}

/// Render the full page: the form, then either an error or the results.
pub fn render_page(values: &FormValues, valuation: Option<&Valuation>, error: Option<&str>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Black-Scholes Option Pricer</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<h1>Black-Scholes European Option Pricer</h1>\n");

    render_form(&mut html, values);

    if let Some(message) = error {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            escape_html(message)
        ));
    }

    if let Some(valuation) = valuation {
        render_results(&mut html, valuation);
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::evaluate;

    fn values() -> FormValues {
        FormValues {
            valuation_date: "2026-02-16".to_string(),
            expiry_date: "2026-03-16".to_string(),
            spot: "5000".to_string(),
            strike: "5000".to_string(),
            vol_pct: "20".to_string(),
            risk_free_pct: "4".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("5000.25"), "5000.25");
    }

    #[test]
    fn test_form_only_page() {
        let html = render_page(&values(), None, None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("name=\"valuation_date\" value=\"2026-02-16\""));
        assert!(html.contains("name=\"vol_pct\" value=\"20\""));
        assert!(html.contains("formaction=\"/export_csv\""));
        assert!(!html.contains("id=\"results\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_echoed_values_are_escaped() {
        let mut values = values();
        values.spot = "\"><script>alert(1)</script>".to_string();
        let html = render_page(&values, None, Some("Invalid number for spot: <script>"));

        assert!(!html.contains("<script>"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;\""));
        assert!(html.contains("Invalid number for spot: &lt;script&gt;"));
    }

    #[test]
    fn test_results_page() {
        let values = values();
        let valuation = evaluate(&values).unwrap();
        let html = render_page(&values, Some(&valuation), None);

        assert!(html.contains(&format!("{:.6}", 28.0 / 365.0)));
        assert!(html.contains(&format!("{:.4}", valuation.prices.call_price)));
        assert!(html.contains(&format!("{:.6}", valuation.greeks.gamma)));
        for label in ["-10%", "-5%", "+0%", "+5%", "+10%"] {
            assert!(html.contains(&format!("<td>{}</td>", label)), "missing {}", label);
        }
        assert!(html.contains("<td>4500.0000</td>"));
        assert!(html.contains("<td>5500.0000</td>"));
    }

    #[test]
    fn test_scenario_rows_in_order() {
        let values = values();
        let valuation = evaluate(&values).unwrap();
        let html = render_page(&values, Some(&valuation), None);

        let positions: Vec<usize> = ["-10%", "-5%", "+0%", "+5%", "+10%"]
            .iter()
            .map(|label| html.find(&format!("<td>{}</td>", label)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
