use api::{ClientDue, MonthlyClientCount, PaymentCounts};
use dioxus::prelude::*;

use crate::icons::{FaBox, FaMoneyBillWave, FaUsers};
use crate::{use_client, Icon};

/// Height in percent of the tallest bar for each month.
fn bar_heights(counts: &[MonthlyClientCount]) -> Vec<u32> {
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    counts
        .iter()
        .map(|c| match max {
            m if m <= 0 => 0,
            m => (i128::from(c.count.max(0)) * 100 / i128::from(m)) as u32,
        })
        .collect()
}

#[component]
fn StatCard(title: String, value: i64, icon: Element) -> Element {
    rsx! {
        div { class: "stat-card",
            div { class: "stat-card-icon", {icon} }
            div {
                p { class: "stat-card-title", "{title}" }
                h3 { class: "stat-card-value", "{value}" }
            }
        }
    }
}

/// Dashboard landing page: totals, client dues and monthly registrations.
///
/// Each report loads on its own; a failed report is logged and its widget
/// stays empty.
#[component]
pub fn HomeView() -> Element {
    let client = use_client();

    let counts_client = client.clone();
    let counts = use_resource(move || {
        let client = counts_client.clone();
        async move {
            client.payment_counts().await.unwrap_or_else(|e| {
                tracing::error!("Failed to load payment counts: {}", e);
                PaymentCounts::default()
            })
        }
    });

    let dues_client = client.clone();
    let dues = use_resource(move || {
        let client = dues_client.clone();
        async move {
            client.client_dues().await.unwrap_or_else(|e| {
                tracing::error!("Failed to load client dues: {}", e);
                Vec::<ClientDue>::new()
            })
        }
    });

    let monthly = use_resource(move || {
        let client = client.clone();
        async move {
            client.client_counts_by_month().await.unwrap_or_else(|e| {
                tracing::error!("Failed to load monthly client counts: {}", e);
                Vec::<MonthlyClientCount>::new()
            })
        }
    });

    let totals = counts().unwrap_or_default();
    let dues = dues().unwrap_or_default();
    let monthly = monthly().unwrap_or_default();
    let heights = bar_heights(&monthly);

    rsx! {
        div { class: "page-header",
            h4 { "Bienvenido al Dashboard" }
        }

        div { class: "stat-grid",
            StatCard {
                title: "Clientes",
                value: totals.client_count,
                icon: rsx! { Icon { icon: FaUsers, width: 24, height: 24 } },
            }
            StatCard {
                title: "Productos",
                value: totals.product_count,
                icon: rsx! { Icon { icon: FaBox, width: 24, height: 24 } },
            }
            StatCard {
                title: "Pagos",
                value: totals.payment_count,
                icon: rsx! { Icon { icon: FaMoneyBillWave, width: 24, height: 24 } },
            }
        }

        div { class: "home-grid",
            div { class: "card",
                h6 { class: "card-title", "Clientes registrados por mes" }
                if monthly.is_empty() {
                    p { class: "muted", "Sin datos" }
                } else {
                    div { class: "bar-chart",
                        for (entry, height) in monthly.iter().zip(heights) {
                            div { key: "{entry.month}", class: "bar-chart-column",
                                span { class: "bar-chart-value", "{entry.count}" }
                                div { class: "bar-chart-bar", style: "height: {height}%" }
                                span { class: "bar-chart-label", "{entry.month_label()}" }
                            }
                        }
                    }
                }
            }

            div { class: "card",
                h6 { class: "card-title", "Clientes con deuda" }
                table { class: "table",
                    thead {
                        tr {
                            th { "Nombres" }
                            th { "Apellidos" }
                            th { "Deuda (S/.)" }
                        }
                    }
                    tbody {
                        if dues.is_empty() {
                            tr {
                                td { colspan: "3", class: "muted", "Sin deudas pendientes" }
                            }
                        }
                        for (i, due) in dues.iter().enumerate() {
                            tr { key: "{i}",
                                td { "{due.first_name}" }
                                td { "{due.last_name}" }
                                td { {format!("{:.2}", due.amount_due)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(m: &str, count: i64) -> MonthlyClientCount {
        MonthlyClientCount {
            month: m.to_string(),
            count,
        }
    }

    #[test]
    fn test_bar_heights_scale_to_tallest() {
        let counts = [month("2024-01", 2), month("2024-02", 8), month("2024-03", 0)];
        assert_eq!(bar_heights(&counts), vec![25, 100, 0]);
    }

    #[test]
    fn test_bar_heights_all_zero() {
        assert_eq!(bar_heights(&[month("2024-01", 0)]), vec![0]);
        assert!(bar_heights(&[]).is_empty());
    }

    #[test]
    fn test_bar_heights_huge_counts() {
        let counts = [month("2024-01", i64::MAX), month("2024-02", i64::MAX / 2), month("2024-03", -4)];
        assert_eq!(bar_heights(&counts), vec![100, 49, 0]);
    }
}
