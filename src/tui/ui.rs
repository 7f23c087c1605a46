use super::app::App;
use super::login;
use super::pages::Fetch;
use super::route::Route;
use crate::api::Location;
use crate::model::{HousingStats, JobMarket, LocationData};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

// Minimal color palette
const ACCENT_COLOR: Color = Color::Rgb(186, 139, 255); // Purple accent
const DONE_COLOR: Color = Color::Rgb(129, 199, 132); // Soft green
const PENDING_COLOR: Color = Color::Rgb(255, 193, 7); // Amber
const ERROR_COLOR: Color = Color::Rgb(240, 113, 120); // Soft red
const HEADING_COLOR: Color = Color::Rgb(138, 180, 248); // Soft blue
const DIM_COLOR: Color = Color::Rgb(110, 110, 110); // Gray

// Spinner frames for animated loading states
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &App) {
    if let Some(auth) = &app.auth {
        login::draw(frame, auth);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Navigation bar
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Page body
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    draw_nav(frame, app, chunks[0]);
    draw_body(frame, app, chunks[2]);
    draw_status(frame, app, chunks[3]);
}

fn draw_nav(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, route) in Route::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, route.title());
        if *route == app.route {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(ACCENT_COLOR)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(DIM_COLOR)));
        }
    }
    if let Some(username) = app.session.username() {
        if !username.is_empty() {
            spans.push(Span::styled(
                format!("  {}", username),
                Style::default().fg(DIM_COLOR),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_body(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Dashboard => draw_dashboard(frame, app, area),
        Route::Progress => draw_progress(frame, app, area),
        Route::Housing => draw_housing(frame, app, area),
        Route::Employment => draw_employment(frame, app, area),
        Route::Visa => draw_visa(frame, app, area),
        Route::Resources => draw_resources(frame, app, area),
        Route::Comparison => draw_comparison(frame, app, area),
        Route::Extensions => draw_extensions(frame, app, area),
    }
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(status) = &app.status {
        status.clone()
    } else {
        match app.route {
            Route::Progress => {
                "↑↓ select · space toggle · c filter · r refresh · l logout · q quit".to_string()
            }
            Route::Extensions => {
                "↑↓ select · enter download · r refresh · l logout · q quit".to_string()
            }
            _ => "tab/1-8 pages · r refresh · l logout · q quit".to_string(),
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(DIM_COLOR))),
        area,
    );
}

// ---- shared helpers ----

fn spinner(tick: usize) -> &'static str {
    if crate::config::config().display.spinner {
        SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
    } else {
        "·"
    }
}

fn draw_loading(frame: &mut Frame, area: Rect, tick: usize, message: &str) {
    let line = Line::from(vec![
        Span::styled(spinner(tick), Style::default().fg(ACCENT_COLOR)),
        Span::raw(" "),
        Span::styled(message, Style::default().fg(DIM_COLOR)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(ERROR_COLOR))),
        Line::from(Span::styled(
            "press r to retry",
            Style::default().fg(DIM_COLOR),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Text progress bar: `████████░░░░` sized to `width` cells.
fn bar(percentage: f64, width: usize) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let mut out = String::with_capacity(width * 3);
    for _ in 0..filled.min(width) {
        out.push('█');
    }
    for _ in filled.min(width)..width {
        out.push('░');
    }
    out
}

/// Thousands-separated integer, e.g. 450000 -> "450,000".
fn fmt_num(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(HEADING_COLOR)
            .add_modifier(Modifier::BOLD),
    ))
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(DIM_COLOR)))
}

fn prettify_key(key: &str) -> String {
    key.replace('_', " ")
}

// ---- dashboard ----

fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let bundle = match &app.pages.dashboard {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(
                frame,
                area,
                app.tick_count,
                "Loading your relocation dashboard…",
            );
            return;
        }
        Fetch::Failed(message) => {
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(bundle) => bundle,
    };

    let overview = &bundle.overview;
    let stats = &overview.quick_stats;
    let progress = &overview.relocation_progress;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(heading("Your Phoenix to Peak District Journey"));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Days until move ", Style::default().fg(DIM_COLOR)),
        Span::styled(
            stats.days_until_move.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Budget allocated ", Style::default().fg(DIM_COLOR)),
        Span::styled(
            format!("${}", fmt_num(stats.budget_allocated)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Properties viewed ", Style::default().fg(DIM_COLOR)),
        Span::styled(
            stats.properties_viewed.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Applications sent ", Style::default().fg(DIM_COLOR)),
        Span::styled(
            stats.applications_sent.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::raw(bar(progress.completion_percentage, 40)),
        Span::styled(
            format!("  {:.0}% complete", progress.completion_percentage),
            Style::default().fg(DIM_COLOR),
        ),
    ]));
    lines.push(Line::from(""));

    for step in &progress.completed_steps {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(DONE_COLOR)),
            Span::raw(step.as_str()),
        ]));
    }
    for step in &progress.pending_steps {
        lines.push(Line::from(vec![
            Span::styled("  ○ ", Style::default().fg(PENDING_COLOR)),
            Span::styled(step.as_str(), Style::default().fg(DIM_COLOR)),
        ]));
    }
    lines.push(Line::from(""));

    let metrics = &bundle.comparison.comparison_metrics;
    lines.push(heading("Phoenix vs Peak District"));
    lines.push(dim(format!(
        "cost of living {:+.1}% · housing {:+.1}% · safety {:+.1} · temperature {:+.0}°F",
        metrics.cost_difference_percent,
        metrics.housing_difference_percent,
        metrics.safety_improvement,
        metrics.climate_change.temperature_change,
    )));
    lines.push(Line::from(""));

    if !overview.recent_activity.is_empty() {
        lines.push(heading("Recent activity"));
        for activity in &overview.recent_activity {
            lines.push(Line::from(vec![
                Span::styled("  · ", Style::default().fg(DIM_COLOR)),
                Span::raw(activity.as_str()),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(dim(format!(
        "{} browser extensions available on the Extensions page",
        bundle.extensions.len()
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

// ---- progress ----

fn draw_progress(frame: &mut Frame, app: &App, area: Rect) {
    match &app.timeline_fetch {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(frame, area, app.tick_count, "Loading timeline…");
            return;
        }
        Fetch::Failed(message) => {
            // The whole load failed; no half-merged view is shown
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(()) => {}
    }
    let Some(view) = app.timeline.view() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(3),    // Step list
            Constraint::Length(4), // Selected step detail
        ])
        .split(area);

    let overview = &view.overview;
    let mut header: Vec<Line> = Vec::new();
    header.push(Line::from(vec![
        Span::styled(
            format!("{} ", overview.current_phase),
            Style::default()
                .fg(HEADING_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "· {}/{} steps · {:.0}%",
                overview.completed_steps,
                overview.total_steps(),
                overview.completion_percentage
            ),
            Style::default().fg(DIM_COLOR),
        ),
        if app.toggle_in_flight {
            Span::styled("  updating…", Style::default().fg(PENDING_COLOR))
        } else {
            Span::raw("")
        },
    ]));
    header.push(Line::from(Span::raw(bar(overview.completion_percentage, 40))));

    let mut summary: Vec<Span> = vec![Span::styled(
        format!("filter: {}  ", app.timeline.filter().label()),
        Style::default().fg(ACCENT_COLOR),
    )];
    for (category, group) in view.by_category.iter() {
        summary.push(Span::styled(
            format!("{} {}/{}  ", category, group.completed_steps, group.total_steps),
            Style::default().fg(DIM_COLOR),
        ));
    }
    header.push(Line::from(summary));
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let steps = app.timeline.visible_steps();
    let mut list: Vec<Line> = Vec::new();
    if steps.is_empty() {
        list.push(dim("no steps in this category"));
    }
    // Keep the selected row on screen for long timelines
    let visible_rows = chunks[1].height as usize;
    let first = app.selected_step.saturating_sub(visible_rows.saturating_sub(1));
    for (i, step) in steps.iter().enumerate().skip(first).take(visible_rows) {
        let marker = if step.is_completed { "[x]" } else { "[ ]" };
        let marker_style = if step.is_completed {
            Style::default().fg(DONE_COLOR)
        } else {
            Style::default().fg(PENDING_COLOR)
        };
        let title_style = if i == app.selected_step {
            Style::default().add_modifier(Modifier::BOLD).fg(ACCENT_COLOR)
        } else if step.is_completed {
            Style::default().fg(DIM_COLOR)
        } else {
            Style::default()
        };
        list.push(Line::from(vec![
            Span::raw(if i == app.selected_step { "▸ " } else { "  " }),
            Span::styled(marker, marker_style),
            Span::styled(format!(" {}", step.title), title_style),
            Span::styled(
                format!("  {} · ~{}d", step.category, step.estimated_duration_days),
                Style::default().fg(DIM_COLOR),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(list), chunks[1]);

    let mut detail: Vec<Line> = Vec::new();
    if let Some(step) = steps.get(app.selected_step) {
        detail.push(dim(step.description.clone()));
        if !step.dependencies.is_empty() {
            detail.push(dim(format!("depends on: {}", step.dependencies.join(", "))));
        }
        if !step.resources.is_empty() {
            detail.push(dim(format!("resources: {}", step.resources.join(" · "))));
        }
    }
    frame.render_widget(Paragraph::new(detail).wrap(Wrap { trim: true }), chunks[2]);
}

// ---- housing ----

fn housing_lines(title: &str, stats: &HousingStats, currency: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(HEADING_COLOR)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "median home price  {}{}",
        currency,
        fmt_num(stats.median_home_price)
    )));
    lines.push(Line::from(format!(
        "median rent        {}{}",
        currency,
        fmt_num(stats.median_rent)
    )));
    lines.push(Line::from(format!(
        "price per sqft     {}{}",
        currency,
        fmt_num(stats.price_per_sqft)
    )));
    lines.push(Line::from(format!("market trend       {}", stats.market_trend)));
    lines.push(Line::from(""));
    lines.push(dim("popular areas"));
    for area in &stats.popular_neighborhoods {
        lines.push(Line::from(format!("  · {}", area)));
    }
    lines.push(Line::from(""));
    lines.push(dim("housing mix"));
    for (kind, share) in stats.housing_types.iter() {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:12} ", prettify_key(kind))),
            Span::styled(bar(*share as f64, 20), Style::default().fg(ACCENT_COLOR)),
            Span::styled(format!(" {}%", share), Style::default().fg(DIM_COLOR)),
        ]));
    }
    lines
}

fn draw_housing(frame: &mut Frame, app: &App, area: Rect) {
    let bundle = match &app.pages.housing {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(frame, area, app.tick_count, "Loading housing data…");
            return;
        }
        Fetch::Failed(message) => {
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(bundle) => bundle,
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    frame.render_widget(
        Paragraph::new(housing_lines(
            Location::Phoenix.display_name(),
            &bundle.phoenix,
            "$",
        )),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(housing_lines(
            Location::PeakDistrict.display_name(),
            &bundle.peak_district,
            "£",
        )),
        columns[1],
    );
}

// ---- employment ----

fn job_market_lines(title: &str, market: &JobMarket) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(HEADING_COLOR)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    for (key, value) in market.iter() {
        if key.starts_with("avg_salary") {
            let currency = if key.ends_with("gbp") { "£" } else { "$" };
            lines.push(Line::from(format!(
                "average salary     {}{}",
                currency,
                fmt_num(*value as u64)
            )));
        } else {
            lines.push(Line::from(vec![
                Span::raw(format!("{:18} ", prettify_key(key))),
                Span::styled(bar(*value, 20), Style::default().fg(ACCENT_COLOR)),
                Span::styled(format!(" {:.0}", value), Style::default().fg(DIM_COLOR)),
            ]));
        }
    }
    lines
}

fn draw_employment(frame: &mut Frame, app: &App, area: Rect) {
    let jobs = match &app.pages.employment {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(frame, area, app.tick_count, "Loading job market data…");
            return;
        }
        Fetch::Failed(message) => {
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(jobs) => jobs,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    frame.render_widget(
        Paragraph::new(job_market_lines("Phoenix job market", &jobs.phoenix_jobs)),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(job_market_lines(
            "Peak District job market",
            &jobs.peak_district_jobs,
        )),
        columns[1],
    );

    let mut remote: Vec<Line> = Vec::new();
    remote.push(heading("Remote work opportunities"));
    for item in &jobs.remote_work_opportunities {
        remote.push(Line::from(format!("  · {}", item)));
    }
    frame.render_widget(Paragraph::new(remote), chunks[1]);
}

// ---- visa ----

fn draw_visa(frame: &mut Frame, app: &App, area: Rect) {
    let bundle = match &app.pages.visa {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(frame, area, app.tick_count, "Loading visa checklist…");
            return;
        }
        Fetch::Failed(message) => {
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(bundle) => bundle,
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut left: Vec<Line> = Vec::new();
    left.push(heading("UK visa checklist"));
    match bundle.visa_group() {
        Some(group) => {
            left.push(dim(format!(
                "{}/{} steps · {:.0}%",
                group.completed_steps, group.total_steps, group.completion_percentage
            )));
            left.push(Line::from(""));
            for step in &group.steps {
                let (marker, style) = if step.is_completed {
                    ("✓", Style::default().fg(DONE_COLOR))
                } else {
                    ("○", Style::default().fg(PENDING_COLOR))
                };
                left.push(Line::from(vec![
                    Span::styled(format!("  {} ", marker), style),
                    Span::raw(step.title.clone()),
                    Span::styled(
                        format!("  ~{}d", step.estimated_duration_days),
                        Style::default().fg(DIM_COLOR),
                    ),
                ]));
            }
        }
        None => left.push(dim("no visa steps on the timeline yet")),
    }
    frame.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), columns[0]);

    let mut right: Vec<Line> = Vec::new();
    right.push(heading("Visa resources"));
    right.push(Line::from(""));
    if bundle.visa_resources().is_empty() {
        right.push(dim("no visa resources published"));
    }
    for link in bundle.visa_resources() {
        right.push(Line::from(Span::styled(
            link.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        right.push(dim(format!("  {}", link.url)));
        if !link.description.is_empty() {
            right.push(dim(format!("  {}", link.description)));
        }
        right.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(right).wrap(Wrap { trim: true }), columns[1]);
}

// ---- resources ----

fn draw_resources(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = match &app.pages.resources {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(frame, area, app.tick_count, "Loading resources…");
            return;
        }
        Fetch::Failed(message) => {
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(catalog) => catalog,
    };

    let mut lines: Vec<Line> = Vec::new();
    if catalog.is_empty() {
        lines.push(dim("no resources published"));
    }
    for (category, links) in catalog.iter() {
        lines.push(heading(prettify_key(category)));
        for link in links {
            lines.push(Line::from(vec![
                Span::styled("  · ", Style::default().fg(DIM_COLOR)),
                Span::styled(
                    link.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", link.url), Style::default().fg(DIM_COLOR)),
            ]));
            if !link.description.is_empty() {
                lines.push(dim(format!("      {}", link.description)));
            }
        }
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

// ---- comparison ----

fn location_lines(data: &LocationData) -> Vec<Line<'static>> {
    let weather = &data.weather_info;
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        data.location_name.clone(),
        Style::default()
            .fg(HEADING_COLOR)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "cost of living     {:.1}",
        data.cost_of_living_index
    )));
    lines.push(Line::from(format!(
        "housing cost       {:.1}",
        data.housing_cost_index
    )));
    lines.push(Line::from(format!("safety             {:.1}/10", data.safety_index)));
    lines.push(Line::from(format!(
        "job market         {:.1}/10",
        data.job_market_score
    )));
    lines.push(Line::from(format!(
        "education          {:.1}/10",
        data.education_score
    )));
    lines.push(Line::from(format!(
        "healthcare         {:.1}/10",
        data.healthcare_score
    )));
    lines.push(Line::from(format!(
        "climate            {} · {:.0}°F avg · {} sunny days · {}% humidity",
        weather.climate, weather.avg_temp_f, weather.sunny_days, weather.humidity
    )));
    if let Some(population) = data.population {
        lines.push(Line::from(format!("population         {}", fmt_num(population))));
    }
    if let Some(income) = data.median_income {
        lines.push(Line::from(format!("median income      {}", fmt_num(income))));
    }
    lines
}

fn draw_comparison(frame: &mut Frame, app: &App, area: Rect) {
    let comparison = match &app.pages.comparison {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(frame, area, app.tick_count, "Loading comparison…");
            return;
        }
        Fetch::Failed(message) => {
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(comparison) => comparison,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(8)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    frame.render_widget(
        Paragraph::new(location_lines(&comparison.from_location)),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(location_lines(&comparison.to_location)),
        columns[1],
    );

    let mut tips: Vec<Line> = Vec::new();
    tips.push(heading("Key relocation insights"));
    for tip in &comparison.relocation_tips {
        tips.push(Line::from(format!("  · {}", tip)));
    }
    frame.render_widget(Paragraph::new(tips).wrap(Wrap { trim: true }), chunks[1]);
}

// ---- extensions ----

fn draw_extensions(frame: &mut Frame, app: &App, area: Rect) {
    let extensions = match &app.pages.extensions {
        Fetch::Idle | Fetch::Loading => {
            draw_loading(frame, area, app.tick_count, "Loading extensions…");
            return;
        }
        Fetch::Failed(message) => {
            draw_error(frame, area, message);
            return;
        }
        Fetch::Ready(extensions) => extensions,
    };

    if extensions.is_empty() {
        frame.render_widget(Paragraph::new(dim("no extensions available")), area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mut list: Vec<Line> = Vec::new();
    list.push(heading("Chrome extensions & tools"));
    list.push(Line::from(""));
    for (i, extension) in extensions.iter().enumerate() {
        let style = if i == app.selected_extension {
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        list.push(Line::from(vec![
            Span::raw(if i == app.selected_extension { "▸ " } else { "  " }),
            Span::styled(extension.extension_name.clone(), style),
            Span::styled(
                format!(" v{}", extension.version),
                Style::default().fg(DIM_COLOR),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(list), columns[0]);

    let mut detail: Vec<Line> = Vec::new();
    if let Some(extension) = extensions.get(app.selected_extension) {
        detail.push(Line::from(Span::styled(
            extension.extension_name.clone(),
            Style::default()
                .fg(HEADING_COLOR)
                .add_modifier(Modifier::BOLD),
        )));
        detail.push(Line::from(""));
        detail.push(Line::from(extension.description.clone()));
        detail.push(Line::from(""));
        for feature in &extension.features {
            detail.push(Line::from(format!("  · {}", feature)));
        }
        detail.push(Line::from(""));
        detail.push(dim("enter to download"));
        detail.push(dim(
            "install: extract and load as an unpacked extension in Chrome developer mode",
        ));
    }
    frame.render_widget(Paragraph::new(detail).wrap(Wrap { trim: true }), columns[1]);
}
