//! Server-rendered HTML pages.
//!
//! Plain `format!` rendering; every user-supplied string passes through
//! [`escape_html`].

use std::fmt::Write;

use tipsplit_core::validation::{CalculationForm, FORM_SCOPE};
use tipsplit_core::{Calculation, SortDirection, SortKey, ValidationErrors, CURRENCY_CODE};

use crate::services::dashboard::DashboardView;

/// Quick-pick tip percentages shown next to the tip input.
const TIP_PRESETS: [u32; 5] = [5, 10, 15, 25, 50];

/// Escapes the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn error_list(errors: &ValidationErrors) -> String {
    let mut html = String::from("<div class=\"errors\" role=\"alert\">\n<ul>\n");
    for message in errors.full_messages() {
        let _ = writeln!(html, "<li>{}</li>", escape_html(&message));
    }
    html.push_str("</ul>\n</div>\n");
    html
}

fn money(amount: impl std::fmt::Display) -> String {
    format!("{CURRENCY_CODE} {amount}")
}

// =============================================================================
// Public pages
// =============================================================================

/// The calculator form, optionally with the previous input and its errors.
pub fn calculator_page(form: &CalculationForm, errors: Option<&ValidationErrors>) -> String {
    let value = |field: &Option<String>| escape_html(field.as_deref().unwrap_or(""));

    let mut body = String::from("<h1>Tip Calculator</h1>\n");
    if let Some(errors) = errors.filter(|e| !e.is_empty()) {
        body.push_str(&error_list(errors));
    }

    let presets: String = TIP_PRESETS
        .iter()
        .map(|pct| format!("<button type=\"button\" class=\"tip-preset\" data-tip=\"{pct}\">{pct}%</button>"))
        .collect();

    let _ = write!(
        body,
        "<form id=\"calculation-form\" action=\"/calculations\" method=\"post\">\n\
         <label>Bill amount ({CURRENCY_CODE}) <input name=\"{FORM_SCOPE}[bill_amount]\" inputmode=\"decimal\" value=\"{bill}\"></label>\n\
         <label>Tip percentage <input id=\"tip_percentage\" name=\"{FORM_SCOPE}[tip_percentage]\" inputmode=\"decimal\" value=\"{tip}\"></label>\n\
         <div class=\"tip-presets\">{presets}</div>\n\
         <label>People <input name=\"{FORM_SCOPE}[people_count]\" inputmode=\"numeric\" value=\"{people}\"></label>\n\
         <button type=\"submit\">Calculate</button>\n\
         </form>\n\
         <script>\n\
         document.querySelectorAll(\".tip-preset\").forEach(function (b) {{\n\
           b.addEventListener(\"click\", function () {{\n\
             document.getElementById(\"tip_percentage\").value = b.dataset.tip;\n\
           }});\n\
         }});\n\
         </script>",
        bill = value(&form.bill_amount),
        tip = value(&form.tip_percentage),
        people = value(&form.people_count),
    );

    layout("Tip Calculator", &body)
}

/// The stored calculation's breakdown.
pub fn result_page(calculation: &Calculation) -> String {
    let body = format!(
        "<h1>Your Split</h1>\n\
         <dl id=\"calculation-result\">\n\
         <dt>Bill</dt><dd>{bill}</dd>\n\
         <dt>Tip ({tip_pct}%)</dt><dd>{tip}</dd>\n\
         <dt>Total</dt><dd>{total}</dd>\n\
         <dt>People</dt><dd>{people}</dd>\n\
         <dt>Each pays</dt><dd>{each}</dd>\n\
         </dl>\n\
         <p><a href=\"/\">New calculation</a></p>",
        bill = money(calculation.bill_amount),
        tip_pct = calculation.tip_percentage,
        tip = money(calculation.tip_amount),
        total = money(calculation.total_amount),
        people = calculation.people_count,
        each = money(calculation.per_person_amount),
    );

    layout("Your Split", &body)
}

// =============================================================================
// Admin pages
// =============================================================================

pub fn login_page(alert: Option<&str>) -> String {
    let mut body = String::from("<h1>Admin Login</h1>\n");
    if let Some(alert) = alert {
        let _ = writeln!(body, "<p class=\"alert\" role=\"alert\">{}</p>", escape_html(alert));
    }
    body.push_str(
        "<form action=\"/admin/login\" method=\"post\">\n\
         <label>Username <input name=\"username\" autocomplete=\"username\"></label>\n\
         <label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>",
    );

    layout("Admin Login", &body)
}

fn sort_link(view: &DashboardView, key: SortKey, label: &str) -> String {
    // Clicking the active column flips it; any other column starts descending
    let direction = if view.sort == key {
        view.direction.toggled()
    } else {
        SortDirection::Desc
    };
    format!(
        "<a href=\"/admin/dashboard?sort={}&amp;direction={}\">{}</a>",
        key, direction, label
    )
}

fn page_link(view: &DashboardView, page: i64, label: &str) -> String {
    format!(
        "<a href=\"/admin/dashboard?page={}&amp;sort={}&amp;direction={}\">{}</a>",
        page, view.sort, view.direction, label
    )
}

pub fn dashboard_page(view: &DashboardView) -> String {
    let stats = &view.statistics;
    let mut body = String::from(
        "<h1>Admin Dashboard</h1>\n\
         <form action=\"/admin/logout\" method=\"post\"><button type=\"submit\">Log out</button></form>\n",
    );

    if stats.is_empty() {
        body.push_str("<p class=\"empty\">No calculations yet.</p>\n");
        return layout("Admin Dashboard", &body);
    }

    let _ = write!(
        body,
        "<section id=\"statistics\">\n\
         <p>Total calculations: {total}</p>\n\
         <p>Average tip: {avg_tip}%</p>\n\
         <p>Average bill: {avg_bill}</p>\n\
         <p>Total tips: {tips}</p>\n\
         <p>Average party size: {party}</p>\n\
         </section>\n",
        total = stats.total_calculations,
        avg_tip = stats.average_tip_percentage,
        avg_bill = money(stats.average_bill_amount),
        tips = money(stats.total_tips_collected),
        party = stats.average_party_size,
    );

    let _ = write!(
        body,
        "<table>\n<thead><tr><th>{date}</th><th>{bill}</th><th>{tip}</th>\
         <th>Tip amount</th><th>Total</th><th>People</th><th>Per person</th></tr></thead>\n<tbody>\n",
        date = sort_link(view, SortKey::Date, "Date"),
        bill = sort_link(view, SortKey::BillAmount, "Bill"),
        tip = sort_link(view, SortKey::TipPercentage, "Tip %"),
    );

    for c in &view.calculations {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}%</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            c.created_at.format("%Y-%m-%d %H:%M"),
            money(c.bill_amount),
            c.tip_percentage,
            money(c.tip_amount),
            money(c.total_amount),
            c.people_count,
            money(c.per_person_amount),
        );
    }
    body.push_str("</tbody>\n</table>\n");

    let _ = write!(
        body,
        "<nav class=\"pagination\">Page {} of {}",
        view.current_page, view.total_pages
    );
    if view.has_previous() {
        let _ = write!(body, " {}", page_link(view, view.current_page - 1, "Previous"));
    }
    if view.has_next() {
        let _ = write!(body, " {}", page_link(view, view.current_page + 1, "Next"));
    }
    body.push_str("</nav>");

    layout("Admin Dashboard", &body)
}
