use std::fmt::Write;

use crate::catalog::CatalogSnapshot;
use crate::pricing::{selectable_discounts, AnalysisReport, MarginBand};
use crate::render::{format_discount, format_pct, format_won};

const PAGE_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", "Noto Sans KR", sans-serif; margin: 2rem; color: #212121; }
h1 { font-size: 1.5rem; }
fieldset { border: 1px solid #ddd; border-radius: 6px; margin-bottom: 1rem; }
table.results { border-collapse: collapse; margin-top: 1rem; }
table.results th, table.results td { border: 1px solid #ddd; padding: 4px 10px; text-align: right; }
table.results td.text { text-align: left; }
.error { color: #b71c1c; }
.legend span { padding: 2px 8px; margin-right: 4px; border-radius: 4px; }
"#;

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        PAGE_STYLE,
        body
    )
}

/// Password form; nothing else is rendered until login succeeds
pub fn login_page() -> String {
    let body = r#"<h1>Pricing Desk</h1>
<form id="login">
  <label>Password <input type="password" name="password" autofocus></label>
  <button type="submit">Log in</button>
  <p class="error" id="login-error"></p>
</form>
<script>
document.getElementById('login').addEventListener('submit', async (e) => {
  e.preventDefault();
  const password = e.target.password.value;
  const res = await fetch('/login', {method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify({password})});
  if (res.ok) { location.reload(); } else { document.getElementById('login-error').textContent = 'Wrong password'; }
});
</script>"#;
    page("Pricing Desk - Login", body)
}

fn band_style(band: MarginBand) -> String {
    let (fg, bg) = band.css_colors();
    format!("color:{};background:{}", fg, bg)
}

/// Legend of the margin band colors
pub fn band_legend() -> String {
    let mut html = String::from("<div class=\"legend\">Margin: ");
    for band in MarginBand::all() {
        let _ = write!(
            html,
            "<span style=\"{}\">{}</span>",
            band_style(band),
            escape_html(band.label())
        );
    }
    html.push_str("</div>");
    html
}

/// Result table fragment inserted into the calculator page
pub fn analysis_fragment(report: &AnalysisReport) -> String {
    let mut html = String::new();
    html.push_str(&band_legend());
    html.push_str("<table class=\"results\">\n<thead><tr>");
    for header in [
        "Product", "Fee", "Discount", "List price", "Sell price", "Cost", "Profit", "ROI",
        "Margin",
    ] {
        let _ = write!(html, "<th>{}</th>", header);
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &report.rows {
        let _ = writeln!(
            html,
            "<tr><td class=\"text\">{}</td><td class=\"text\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td style=\"{}\">{}</td></tr>",
            escape_html(&row.product),
            escape_html(&row.fee_note),
            format_discount(row.discount_pct),
            format_won(row.list_price),
            format_won(row.sell_price()),
            format_won(row.cost),
            format_won(row.profit()),
            format_pct(row.roi_pct()),
            band_style(row.band),
            format_pct(row.margin_pct()),
        );
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn product_slot(idx: usize) -> String {
    let n = idx + 1;
    format!(
        r#"<fieldset class="product" data-slot="{n}">
  <legend>Product {n}</legend>
  <label><input type="checkbox" name="enabled" {checked}> use</label>
  <label>Source <select name="source"><option value="manual">manual</option><option value="catalog">catalog</option></select></label>
  <label>Name <input name="name" list="catalog-names"></label>
  <label>Cost <input name="cost" type="number" min="0" step="100"></label>
  <label>Prices <input name="price1" type="number" min="0" step="100"> <input name="price2" type="number" min="0" step="100"> <input name="price3" type="number" min="0" step="100"></label>
</fieldset>"#,
        n = n,
        checked = if idx == 0 { "checked" } else { "" },
    )
}

/// The calculator and cost estimator page
pub fn app_page(snapshot: &CatalogSnapshot) -> String {
    let mut body = String::from("<h1>Pricing Desk</h1>\n<button id=\"logout\">Log out</button>\n");

    if let Some(err) = &snapshot.load_error {
        let _ = writeln!(
            body,
            "<p class=\"error\">Catalog could not be loaded: {}. Manual entry is still available.</p>",
            escape_html(err)
        );
    }

    body.push_str("<datalist id=\"catalog-names\">\n");
    for product in snapshot.catalog.products() {
        let _ = writeln!(body, "<option value=\"{}\">", escape_html(&product.name));
    }
    body.push_str("</datalist>\n<h2>Margin analysis</h2>\n<form id=\"analyze\">\n");

    for idx in 0..crate::pricing::request::MAX_PRODUCTS {
        body.push_str(&product_slot(idx));
        body.push('\n');
    }

    body.push_str("<fieldset><legend>Discounts</legend>\n");
    for discount in selectable_discounts() {
        let _ = write!(
            body,
            "<label><input type=\"checkbox\" name=\"discount\" value=\"{d}\">{d}%</label> ",
            d = discount
        );
    }
    body.push_str("\n</fieldset>\n<button type=\"submit\">Analyze</button>\n</form>\n<p class=\"error\" id=\"analyze-error\"></p>\n<div id=\"results\"></div>\n");

    body.push_str(COST_SECTION);
    body.push_str(PAGE_SCRIPT);

    page("Pricing Desk", &body)
}

const COST_SECTION: &str = r#"<h2>Manufacturing cost</h2>
<form id="cost">
  <label>Item <input name="item"></label>
  <label>Fabric price <input name="fabric_price" type="number" min="0" step="100"></label>
  <label>Fabric yield (yd) <input name="fabric_yield" type="number" min="0" step="0.1"></label>
  <label>Lining price <input name="lining_price" type="number" min="0" step="100"></label>
  <label>Lining yield (yd) <input name="lining_yield" type="number" min="0" step="0.1"></label>
  <label>Labor <input name="labor" type="number" min="0" step="1000"></label>
  <label>Trim <input name="trim" type="number" min="0" step="100"></label>
  <button type="submit">Calculate</button>
</form>
<p class="error" id="cost-error"></p>
<p><a href="/api/cost/history.csv">Download history (CSV)</a> <button id="clear-history">Clear history</button></p>
<pre id="history"></pre>
"#;

const PAGE_SCRIPT: &str = r#"<script>
const num = (v) => v === '' || v === undefined ? null : Number(v);
document.getElementById('analyze').addEventListener('submit', async (e) => {
  e.preventDefault();
  const products = [];
  document.querySelectorAll('fieldset.product').forEach((fs) => {
    if (!fs.querySelector('[name=enabled]').checked) return;
    const get = (n) => fs.querySelector(`[name=${n}]`).value;
    const prices = ['price1', 'price2', 'price3'].map(get).filter((v) => v !== '').map(Number);
    if (get('source') === 'catalog') {
      products.push({source: 'catalog', name: get('name'), prices});
    } else {
      products.push({source: 'manual', name: get('name'), cost: num(get('cost')), prices});
    }
  });
  const discounts = [...document.querySelectorAll('[name=discount]:checked')].map((c) => Number(c.value));
  const res = await fetch('/analyze', {method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify({products, discounts})});
  const err = document.getElementById('analyze-error');
  if (res.ok) { err.textContent = ''; document.getElementById('results').innerHTML = await res.text(); }
  else { err.textContent = (await res.json()).error.message; }
});
async function refreshHistory() {
  const res = await fetch('/api/cost/history');
  if (res.ok) { document.getElementById('history').textContent = JSON.stringify(await res.json(), null, 2); }
}
document.getElementById('cost').addEventListener('submit', async (e) => {
  e.preventDefault();
  const f = e.target;
  const body = {item: f.item.value};
  ['fabric_price', 'fabric_yield', 'lining_price', 'lining_yield', 'labor', 'trim'].forEach((k) => body[k] = num(f[k].value));
  const res = await fetch('/api/cost', {method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify(body)});
  document.getElementById('cost-error').textContent = res.ok ? '' : (await res.json()).error.message;
  refreshHistory();
});
document.getElementById('clear-history').addEventListener('click', async () => {
  await fetch('/api/cost/history', {method: 'DELETE'});
  refreshHistory();
});
document.getElementById('logout').addEventListener('click', async () => {
  await fetch('/logout', {method: 'POST'});
  location.reload();
});
refreshHistory();
</script>"#;
