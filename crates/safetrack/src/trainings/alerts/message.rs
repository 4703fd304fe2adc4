use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use super::domain::{AlertStatus, TrainingAlert};

/// Render the consolidated digest for one run: expired trainings first, then
/// the ones expiring soon, with a totals footer. Returns `(title, html_body)`.
pub(crate) fn render_digest(alerts: &[TrainingAlert], generated_at: DateTime<Utc>) -> (String, String) {
    let title = format!("Relatório de Treinamentos - {} alertas", alerts.len());

    let expired: Vec<&TrainingAlert> = alerts
        .iter()
        .filter(|alert| alert.status == AlertStatus::Expired)
        .collect();
    let expiring: Vec<&TrainingAlert> = alerts
        .iter()
        .filter(|alert| alert.status == AlertStatus::ExpiringSoon)
        .collect();

    let mut html = String::from("<h2>Relatório de Treinamentos</h2>\n");

    if !expired.is_empty() {
        html.push_str("<h3>Treinamentos Vencidos</h3>\n<ul>\n");
        for alert in &expired {
            writeln!(
                html,
                "<li><strong>{}</strong> - {}<br/>Vencido há {} dias ({})</li>",
                escape_html(&alert.employee_name),
                escape_html(&alert.training_name),
                -alert.days_remaining,
                alert.expiration_date.format("%d/%m/%Y"),
            )
            .expect("write expired item");
        }
        html.push_str("</ul>\n");
    }

    if !expiring.is_empty() {
        html.push_str("<h3>Treinamentos a Vencer</h3>\n<ul>\n");
        for alert in &expiring {
            writeln!(
                html,
                "<li><strong>{}</strong> - {}<br/>Vence em {} dias ({})</li>",
                escape_html(&alert.employee_name),
                escape_html(&alert.training_name),
                alert.days_remaining,
                alert.expiration_date.format("%d/%m/%Y"),
            )
            .expect("write expiring item");
        }
        html.push_str("</ul>\n");
    }

    writeln!(
        html,
        "<hr/>\n<p><small>Total de alertas: {}</small></p>\n<p><small>Gerado em: {}</small></p>",
        alerts.len(),
        generated_at.format("%d/%m/%Y %H:%M"),
    )
    .expect("write footer");

    (title, html)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
