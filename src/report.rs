use std::fmt::Write;

use crate::dashboard::Analysis;
use crate::engine::{DetailScope, GroupDetail, Kpis};
use crate::output::{performance_rows, render_table, session_rows, site_training_rows};
use crate::util::{format_int, format_number};

const RULE: &str = "================================================================================";

pub fn kpi_snapshot(kpis: &Kpis) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total revenue:          {}", format_number(kpis.total_revenue, 2));
    let _ = writeln!(output, "Total profit:           {}", format_number(kpis.total_profit, 2));
    let _ = writeln!(output, "Mean net margin:        {:.1}%", kpis.mean_net_margin);
    let _ = writeln!(output, "Total registrations:    {}", format_int(kpis.total_registrations));
    let _ = writeln!(output, "Mean fill rate:         {:.1}%", kpis.mean_fill_rate);
    let _ = writeln!(output, "Mean attendance rate:   {:.1}%", kpis.mean_attendance_rate);
    let _ = writeln!(output, "Mean satisfaction:      {:.1}/10", kpis.mean_satisfaction);
    output
}

/// The console management report. Every empty section prints an explicit
/// "none" line instead of being skipped.
pub fn build_management_report(a: &Analysis) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{RULE}");
    let _ = writeln!(output, "{:^80}", "TRAINING CENTRE MANAGEMENT REPORT");
    let _ = writeln!(output, "{RULE}");
    let _ = writeln!(
        output,
        "Based on {} sessions and {} survey responses",
        format_int(a.sessions),
        format_int(a.responses)
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "FINANCIAL SUMMARY");
    let _ = writeln!(output, "- Total revenue: {}", format_number(a.kpis.total_revenue, 2));
    let _ = writeln!(output, "- Total profit: {}", format_number(a.kpis.total_profit, 2));
    let _ = writeln!(output, "- Mean net margin: {:.1}%", a.kpis.mean_net_margin);

    let _ = writeln!(output);
    let _ = writeln!(output, "PERFORMANCE BY SITE");
    if a.by_site.is_empty() {
        let _ = writeln!(output, "- No sites recorded");
    }
    for site in &a.by_site {
        let _ = writeln!(
            output,
            "- {}: revenue {}, profit {}, margin {:.1}%",
            site.key,
            format_number(site.metrics.revenue, 2),
            format_number(site.metrics.profit, 2),
            site.metrics.net_margin
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "HIGH-POTENTIAL TRAININGS");
    if a.classification.opportunities.is_empty() {
        let _ = writeln!(output, "- No training currently meets the high-potential criteria");
    }
    for row in &a.classification.opportunities {
        let m = &row.metrics;
        let _ = writeln!(
            output,
            "- {}: margin {:.1}%, fill {:.1}%, satisfaction {:.1}/10",
            row.key, m.net_margin, m.fill_rate, m.satisfaction
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "TRAININGS AT RISK");
    if a.classification.risks.is_empty() {
        let _ = writeln!(output, "- No training at risk identified");
    }
    for row in &a.classification.risks {
        let m = &row.metrics;
        let _ = writeln!(
            output,
            "- {}: margin {:.1}%, fill {:.1}%, satisfaction {:.1}/10",
            row.key, m.net_margin, m.fill_rate, m.satisfaction
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "RECENT MONTHLY TREND");
    if a.recent_trend.is_empty() {
        let _ = writeln!(output, "- No monthly data");
    }
    for month in &a.recent_trend {
        let _ = writeln!(
            output,
            "- {}: revenue {}, profit {}",
            month.key,
            format_number(month.metrics.revenue, 2),
            format_number(month.metrics.profit, 2)
        );
    }
    if let Some(change) = a.trend_change {
        let _ = writeln!(output);
        let _ = writeln!(output, "LAST MONTH CHANGE");
        let _ = writeln!(output, "- Revenue: {:.1}%", change.revenue_pct);
        let _ = writeln!(output, "- Profit: {:.1}%", change.profit_pct);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "COMMERCIAL PERFORMANCE");
    for c in &a.commercial {
        let _ = writeln!(
            output,
            "- {}: conversion {:.1}%, presence {:.1}%, revenue per registrant {}",
            c.site,
            c.conversion_rate,
            c.presence_rate,
            format_number(c.revenue_per_registrant, 2)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "OBJECTIVES VS ACTUALS");
    for o in &a.objectives {
        let _ = writeln!(
            output,
            "- {}: revenue at {:.1}% of objective, registrations at {:.1}% of objective",
            o.site, o.revenue_attainment, o.registrations_attainment
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "STRATEGIC RECOMMENDATIONS");
    let rec = &a.recommendations;
    if let Some(category) = &rec.top_profit_category {
        let _ = writeln!(output, "- Grow the '{category}' category, which earns the most profit");
    }
    if let Some(category) = &rec.top_margin_category {
        let _ = writeln!(output, "- Protect margins in '{category}', the best-margin category");
    }
    if let Some(site) = &rec.top_site {
        let _ = writeln!(output, "- Replicate the practices of '{site}', the best performing site");
    }
    if rec.top_profit_category.is_none() && rec.top_site.is_none() {
        let _ = writeln!(output, "- Not enough data for recommendations");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "MOST PROFITABLE TRAININGS BY SITE");
    for site in &a.top_by_site {
        let _ = writeln!(output, "{}:", site.site);
        for t in &site.trainings {
            let _ = writeln!(
                output,
                "  - {}: profit {}, margin {:.1}%, fill {:.1}%",
                t.training,
                format_number(t.metrics.profit, 2),
                t.metrics.net_margin,
                t.metrics.fill_rate
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "ALERTS AND OPPORTUNITIES");
    if a.profit_declining {
        let _ = writeln!(output, "! ALERT: profit has fallen for three consecutive months");
    }
    if a.development.is_empty() {
        let _ = writeln!(output, "- No well-rated training with spare capacity");
    } else {
        let _ = writeln!(output, "Well-rated trainings with spare capacity:");
        for row in &a.development {
            let _ = writeln!(
                output,
                "- {}: satisfaction {:.1}/10, fill {:.1}%",
                row.key, row.metrics.satisfaction, row.metrics.fill_rate
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "{RULE}");
    output
}

/// Metrics and sessions of one training or site; a site also lists its
/// most profitable trainings.
pub fn build_detail(detail: &GroupDetail) -> String {
    let mut output = String::new();
    let label = match detail.scope {
        DetailScope::Training(_) => "TRAINING",
        DetailScope::Site(_) => "SITE",
    };
    let _ = writeln!(output, "{label}: {}", detail.row.key);
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", render_table(&performance_rows(std::slice::from_ref(&detail.row)), 1));

    if let DetailScope::Site(_) = detail.scope {
        let _ = writeln!(output);
        let _ = writeln!(output, "MOST PROFITABLE TRAININGS");
        let rows = site_training_rows(&detail.top_trainings);
        let _ = writeln!(output, "{}", render_table(&rows, rows.len()));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "SESSIONS ({})", format_int(detail.sessions.len()));
    let rows = session_rows(&detail.sessions);
    let _ = writeln!(output, "{}", render_table(&rows, rows.len()));
    output
}
