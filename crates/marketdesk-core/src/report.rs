//! Plain-text rendering of report pages.
//!
//! Renders whatever the `AppState` currently publishes: the header with the
//! geography and last-updated time, then either the loading or failure
//! message or the selected page.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::{DemandProfileItem, MarketData, NewsArticle, ProjectLaunch, ReportBundle, SharePrice};
use crate::state::{AppState, LoadStatus, Page};
use crate::utils::{plain_emphasis, truncate_string};

const APP_TITLE: &str = "MarketDesk";
const TAGLINE: &str = "Residential Market Intelligence. Simplified.";

/// Timestamps in the header are shown in India Standard Time.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Width of the demand profile bars at 100%.
const BAR_WIDTH: usize = 30;

/// Categories of sources the provider is instructed to rely on.
const GOVERNANCE_SOURCES: [(&str, &str, &str); 4] = [
    (
        "Reputed National & Business News Publications",
        "Major newspapers and digital media outlets with dedicated real estate and business sections.",
        "The Economic Times, Business Standard, Livemint, The Hindu BusinessLine",
    ),
    (
        "Industry Research Firms",
        "Specialized firms providing in-depth real estate market analysis, reports, and data.",
        "Knight Frank, JLL, CBRE, Anarock",
    ),
    (
        "Regulatory Filings / Official Announcements",
        "Information disclosed through official channels like RERA websites and company press releases.",
        "State RERA Portals, Stock Exchange Filings (BSE/NSE), Official Developer Press Releases",
    ),
    (
        "Institutional Real Estate Reports",
        "Comprehensive reports published by financial institutions and real estate bodies.",
        "Reports by HDFC Capital, CREDAI, NAREDCO",
    ),
];

/// Render the header and the current page of `state`.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    render_header(&mut out, state);

    match &state.status {
        LoadStatus::Idle | LoadStatus::Loading => {
            out.push_str("Loading market intelligence...\n");
        }
        LoadStatus::Failed(message) => {
            let _ = writeln!(out, "{}", message);
        }
        LoadStatus::Ready => match &state.bundle {
            Some(bundle) => {
                render_page(&mut out, state.page, bundle);
                render_page_footer(&mut out, state.page);
            }
            None => out.push_str("No data available.\n"),
        },
    }
    out
}

/// "Friday, 14 March 2025 at 12:00 pm IST"
pub fn format_last_updated(at: &DateTime<Utc>) -> String {
    let ist = match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(offset) => at.with_timezone(&offset),
        None => return at.to_rfc3339(),
    };
    ist.format("%A, %-d %B %Y at %-I:%M %P IST").to_string()
}

fn render_header(out: &mut String, state: &AppState) {
    let _ = writeln!(out, "{} | {}", APP_TITLE, TAGLINE);
    let _ = writeln!(out, "Geography: {}", state.geography);
    if let Some(at) = &state.last_updated {
        let _ = writeln!(out, "Last Updated: {}", format_last_updated(at));
    }
    let nav: Vec<String> = Page::ALL
        .iter()
        .map(|p| {
            if *p == state.page {
                format!("[{}]", p.title())
            } else {
                p.title().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", nav.join(" | "));
    out.push('\n');
}

fn render_page(out: &mut String, page: Page, bundle: &ReportBundle) {
    match page {
        Page::MarketIntelligence => render_market(out, &bundle.market_data),
        Page::CompetitiveIntelligence => render_launches(out, &bundle.project_launches),
        Page::Sources => render_sources(out, bundle),
        Page::SharePriceIndex => render_share_prices(out, &bundle.share_prices),
        Page::IndiaNews => render_news(out, "Top 5 India Real Estate News", &bundle.india_news),
        Page::InternationalNews => {
            render_news(out, "Top 5 International Real Estate News", &bundle.international_news)
        }
    }
}

/// Pointers to the neighbouring pages, with the flag that selects them.
fn render_page_footer(out: &mut String, page: Page) {
    let (prev, next) = (page.prev(), page.next());
    out.push('\n');
    let _ = writeln!(
        out,
        "<< {} (--page {})  |  {} (--page {}) >>",
        prev.title(),
        prev.slug(),
        next.title(),
        next.slug()
    );
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn render_market(out: &mut String, data: &MarketData) {
    if !data.kpis.is_empty() {
        heading(out, "Key Performance Indicators");
        for kpi in &data.kpis {
            let _ = writeln!(
                out,
                "  {:<32} {:>16}  {} {}",
                truncate_string(&kpi.name, 32),
                kpi.value,
                kpi.change_type.marker(),
                kpi.change
            );
        }
        out.push('\n');
    }

    if !data.trends.is_empty() {
        heading(out, "Price & Sales Velocity Trends");
        let _ = writeln!(out, "  {:<12} {:>16} {:>14}", "Quarter", "Avg Price", "Units Sold");
        for point in &data.trends {
            let _ = writeln!(
                out,
                "  {:<12} {:>16.0} {:>14.0}",
                point.quarter, point.average_price, point.units_sold
            );
        }
        out.push('\n');
    }

    let demand = &data.demand_profile;
    if !demand.by_configuration.is_empty() || !demand.by_ticket_size.is_empty() {
        heading(out, "Buyer Demand Profile");
        render_demand(out, "By Configuration", &demand.by_configuration);
        render_demand(out, "By Ticket Size", &demand.by_ticket_size);
        out.push('\n');
    }

    heading(out, "Synopsis");
    let _ = writeln!(out, "{}", plain_emphasis(&data.market_overview));
    out.push('\n');

    heading(out, "SWOT Analysis");
    for (title, items) in data.swot.quadrants() {
        let _ = writeln!(out, "{}:", title);
        if items.is_empty() {
            out.push_str("  (none)\n");
        }
        for item in items {
            let _ = writeln!(out, "  - {}", plain_emphasis(item));
        }
    }
}

fn render_demand(out: &mut String, title: &str, items: &[DemandProfileItem]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for item in items {
        let filled = ((item.percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<20} {:<width$} {:>5.1}%",
            truncate_string(&item.category, 20),
            "#".repeat(filled),
            item.percentage,
            width = BAR_WIDTH
        );
    }
}

fn render_launches(out: &mut String, launches: &[ProjectLaunch]) {
    heading(out, "New Project Launches by Competitors");
    if launches.is_empty() {
        out.push_str("No competitive intelligence data available.\n");
        return;
    }
    for launch in launches {
        let _ = writeln!(out, "{} - {}", launch.developer_name, launch.project_name);
        let _ = writeln!(out, "  Location:      {}", launch.location);
        let _ = writeln!(out, "  Price:         {}", launch.price_bracket);
        let _ = writeln!(out, "  Configuration: {}", launch.configuration);
        let _ = writeln!(out, "  Launched:      {}", launch.launch_date);
        let _ = writeln!(out, "  USP:           {}", launch.usp);
    }
}

fn render_share_prices(out: &mut String, prices: &[SharePrice]) {
    heading(out, "Real Estate Share Price Index");
    if prices.is_empty() {
        out.push_str("No share price data available.\n");
        return;
    }
    let _ = writeln!(out, "  {:<32} {:<14} {:>14} {:>20}", "Company", "Symbol", "Price", "Day Change");
    for stock in prices {
        let change = format!(
            "{} {} {}",
            stock.change_type.marker(),
            stock.day_change,
            stock.day_change_percent
        );
        let _ = writeln!(
            out,
            "  {:<32} {:<14} {:>14} {:>20}",
            truncate_string(&stock.company_name, 32),
            stock.stock_symbol,
            stock.current_price,
            change
        );
    }
    out.push('\n');
    out.push_str(
        "Disclaimer: Stock prices are fetched in near real-time and are for informational purposes only.\n",
    );
}

fn render_news(out: &mut String, title: &str, articles: &[NewsArticle]) {
    heading(out, title);
    if articles.is_empty() {
        out.push_str("No news articles available.\n");
        return;
    }
    for (i, article) in articles.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, article.title);
        let published = article
            .published_on()
            .map(|date| date.format("%-d %B %Y").to_string())
            .unwrap_or_else(|| article.published_date.clone());
        let _ = writeln!(out, "   {} | {}", article.source, published);
        let _ = writeln!(out, "   {}", article.snippet);
        let _ = writeln!(out, "   {}", article.url);
    }
}

fn render_sources(out: &mut String, bundle: &ReportBundle) {
    heading(out, "Live Data Sources");
    let sources = bundle.unique_sources();
    if sources.is_empty() {
        out.push_str("No specific web sources were cited for the current data.\n");
    }
    for source in &sources {
        let _ = writeln!(out, "  {}", source.title);
        let _ = writeln!(out, "    {}", source.uri);
    }
    out.push('\n');

    heading(out, "Data Source Governance");
    for (name, description, examples) in GOVERNANCE_SOURCES {
        let _ = writeln!(out, "{}", name);
        let _ = writeln!(out, "  {}", description);
        let _ = writeln!(out, "  Examples: {}", examples);
    }
}
