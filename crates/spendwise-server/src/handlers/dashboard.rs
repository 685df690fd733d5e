//! Dashboard handlers
//!
//! Server-rendered single page: the 14-field form, and after a submission
//! the predicted category, metrics, expense breakdown and advice. Submitted
//! values are echoed back into the form.

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, warn};

use crate::AppState;
use spendwise_core::{collect, format_currency, InputField, RawFinancialInput, Recommendation};

const STYLE: &str = "
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
h1 { font-size: 1.6rem; }
form { display: grid; grid-template-columns: 1fr 1fr; gap: 0.6rem 1.2rem; }
label { display: flex; flex-direction: column; font-size: 0.9rem; }
input { padding: 0.35rem; font-size: 1rem; }
button { grid-column: span 2; background: #1e90ff; color: #fff; font-weight: bold; border: 0; border-radius: 6px; padding: 0.6rem; }
.error { background: #fdecea; border-left: 5px solid #d93025; padding: 0.8rem; margin: 1rem 0; }
.card { background: #f0f8ff; border-left: 5px solid #1e90ff; border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.metrics { display: flex; gap: 1.5rem; flex-wrap: wrap; }
.metric strong { display: block; font-size: 1.3rem; }
.bar { display: grid; grid-template-columns: 9rem 1fr 6rem; align-items: center; gap: 0.5rem; font-size: 0.85rem; }
.bar span.fill { display: block; height: 0.8rem; background: #1e90ff; border-radius: 3px; }
.muted { color: #6b7280; font-size: 0.85rem; }
";

/// Raw form values in field order, kept as submitted for re-display
#[derive(Debug, Clone)]
struct FormValues(Vec<String>);

impl FormValues {
    fn from_input(input: &RawFinancialInput) -> Self {
        Self(
            InputField::all()
                .iter()
                .map(|f| input.get(*f).to_string())
                .collect(),
        )
    }

    fn from_fields(fields: &[(String, String)]) -> Self {
        Self(
            InputField::all()
                .iter()
                .map(|f| {
                    fields
                        .iter()
                        .rev()
                        .find(|(name, _)| name.trim() == f.as_str())
                        .map(|(_, value)| value.trim().to_string())
                        .unwrap_or_else(|| "0".to_string())
                })
                .collect(),
        )
    }
}

/// GET / - Empty dashboard form
pub async fn dashboard() -> Html<String> {
    let values = FormValues::from_input(&RawFinancialInput::default());
    Html(render_page(&values, None, None))
}

/// POST / - Form submission
///
/// Failures re-render the form with the submitted values and a banner:
/// invalid fields name the field (400), anything else gets a generic
/// message (500) with the cause logged.
pub async fn submit_dashboard(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let result = collect(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .and_then(|input| state.pipeline.run(&input));

    match result {
        Ok(recommendation) => {
            let values = FormValues::from_input(&recommendation.input);
            Html(render_page(&values, Some(&recommendation), None)).into_response()
        }
        Err(e) if e.is_client_error() => {
            warn!(error = %e, "Rejected dashboard submission");
            let page = render_page(&FormValues::from_fields(&fields), None, Some(&e.to_string()));
            (StatusCode::BAD_REQUEST, Html(page)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Recommendation failed");
            let page = render_page(
                &FormValues::from_fields(&fields),
                None,
                Some("Unable to produce a recommendation. Please try again later."),
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}

fn render_page(values: &FormValues, result: Option<&Recommendation>, error: Option<&str>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Spendwise</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>💼 Smart Financial Recommender &amp; Spending Analyzer</h1>\n\
         <p class=\"muted\">Enter your monthly figures to see your spending profile and advice.</p>\n",
        STYLE
    );

    // Steps are spinner increments only; the server does the validation
    html.push_str("<form method=\"post\" action=\"/\" novalidate>\n");
    for (field, value) in InputField::all().iter().zip(&values.0) {
        let _ = writeln!(
            html,
            "<label>{label}<input type=\"number\" name=\"{name}\" min=\"0\" step=\"100\" value=\"{value}\"></label>",
            label = field.label(),
            name = field.as_str(),
            value = escape_html(value),
        );
    }
    html.push_str("<button type=\"submit\">Submit</button>\n</form>\n");

    if let Some(message) = error {
        let _ = writeln!(
            html,
            "<div class=\"error\" role=\"alert\">{}</div>",
            escape_html(message)
        );
    }

    if let Some(rec) = result {
        render_result(&mut html, rec);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_result(html: &mut String, rec: &Recommendation) {
    // Prediction
    let _ = write!(
        html,
        "<section class=\"card\">\n<h2>Predicted Category: {}</h2>\n\
         <p class=\"muted\">Neural network: {} ({:.0}% confidence){}</p>\n",
        rec.primary.display_label,
        rec.secondary.display_label,
        rec.secondary.confidence * 100.0,
        if rec.models_agree {
            ", models agree"
        } else {
            ", models disagree"
        }
    );
    let _ = write!(
        html,
        "<div class=\"metrics\">\n\
         <div class=\"metric\">💵 Disposable Income<strong>{}</strong></div>\n\
         <div class=\"metric\">💸 Desired Savings<strong>{}</strong></div>\n\
         <div class=\"metric\">📈 Desired Savings %<strong>{}</strong></div>\n\
         </div>\n</section>\n",
        rec.formatted.disposable_income,
        rec.formatted.desired_savings,
        rec.formatted.desired_savings_percentage
    );

    // Expense breakdown
    let _ = writeln!(
        html,
        "<section>\n<h3>📊 Expense Breakdown</h3>\n<p class=\"muted\">Total expense {}</p>",
        rec.formatted.total_expense
    );
    for share in &rec.breakdown {
        let _ = writeln!(
            html,
            "<div class=\"bar\"><span>{}</span><span><span class=\"fill\" style=\"width: {:.1}%\"></span></span><span>{} ({:.1}%)</span></div>",
            share.label,
            share.share,
            format_currency(share.amount as f64),
            share.share
        );
    }
    html.push_str("</section>\n");

    // Advice
    let _ = writeln!(
        html,
        "<section class=\"card\">\n<h3>💡 Personal Advice for {}</h3>\n<ul>",
        rec.advice.display_label
    );
    for point in &rec.advice.points {
        let _ = writeln!(html, "<li>{}</li>", escape_html(point));
    }
    html.push_str("</ul>\n<h4>📘 Financial Guidelines</h4>\n<ul>\n");
    for guideline in &rec.advice.guidelines {
        let _ = writeln!(html, "<li>{}</li>", escape_html(guideline));
    }
    html.push_str("</ul>\n</section>\n");
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
