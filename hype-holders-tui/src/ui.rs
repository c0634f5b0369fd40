//! Ratatui rendering for the holder dashboard.

use crate::app::App;
use hype_holders::{
    ClusterTag, HolderRecord, Market, analysis::top_n, format_magnitude, truncate_address,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

const C_ACCENT: Color = Color::Rgb(45, 212, 191);
const C_GAIN: Color = Color::Rgb(100, 220, 100);
const C_LOSS: Color = Color::Rgb(220, 100, 100);
const C_DIM: Color = Color::Rgb(120, 120, 120);
const C_BRIGHT: Color = Color::Rgb(220, 220, 220);

const SIDEBAR_WIDTH: u16 = 26;
const TOP_HOLDERS: usize = 5;

pub fn render_ui(f: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(f.area());

    render_sidebar(f, app, columns[0]);

    let note_height = if app.active() == ClusterTag::All { 4 } else { 0 };
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(note_height),
            Constraint::Min(8),
        ])
        .split(columns[1]);

    render_header(f, app, main[0]);
    render_kpis(f, app, main[1]);
    if app.active() == ClusterTag::All {
        render_analyst_note(f, app, main[2]);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main[3]);
    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[1]);

    let view = app.view();
    render_table(f, app.active(), &view, body[0]);
    render_distribution(f, app, charts[0]);
    render_top_holders(f, &view, charts[1]);
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" HYPE ANALYTICS ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_ACCENT));

    let entry = |tag: ClusterTag| {
        let digit = ClusterTag::ALL_TAGS
            .iter()
            .position(|candidate| *candidate == tag)
            .map_or(0, |index| index + 1);
        let label = match tag.tier() {
            Some(tier) => format!("{digit} {tier}"),
            None => format!("{digit} {tag}"),
        };
        let style = if tag == app.active() {
            Style::default().fg(Color::Black).bg(C_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_BRIGHT)
        };
        let count = app.count(tag);
        Line::from(Span::styled(
            format!(" {label:<width$}{count:>5}", width = SIDEBAR_WIDTH as usize - 9),
            style,
        ))
    };

    let tab = |market: Market| {
        let style = if market == app.market() {
            Style::default().fg(Color::Black).bg(C_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_DIM)
        };
        Span::styled(format!(" {market} "), style)
    };

    let sidebar = app.sidebar();
    let mut lines: Vec<Line> = sidebar[..2].iter().map(|tag| entry(*tag)).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![tab(Market::Spot), Span::raw("  "), tab(Market::Perp)]));
    lines.push(Line::from(""));
    lines.extend(sidebar[2..].iter().map(|tag| entry(*tag)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" ↑↓/jk move  Tab market", Style::default().fg(C_DIM))));
    lines.push(Line::from(Span::styled(" 1-8 jump  e export  q quit", Style::default().fg(C_DIM))));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let active = app.active();
    let mut spans = vec![
        Span::styled(active.title(), Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {} records", app.view().len()), Style::default().fg(C_DIM)),
    ];
    if app.export_requested() {
        spans.push(Span::styled("  [EXPORT CSV]", Style::default().fg(C_ACCENT)));
    }

    let block = Block::default()
        .title(format!(" {active} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_kpis(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();
    let cards = [
        ("TRACKED HYPE", format_magnitude(summary.total_tracked)),
        ("STAKING RATIO", format!("{:.2}%", summary.staking_ratio)),
        ("GENESIS RETENTION", format!("{:.1}%", summary.genesis_retention)),
        ("VIEW RECORDS", app.view().len().to_string()),
    ];

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), card) in cards.into_iter().zip(areas.iter()) {
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_DIM));
        let text = Line::from(Span::styled(
            value,
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(text).block(block), *card);
    }
}

fn render_analyst_note(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" ANALYST NOTE ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DIM));
    let text = format!(
        "Supply is concentrated in official addresses. Non-official whales keep accumulating. \
         Staking ratio stands at {:.1}%. Watch HyperEVM bridge outflows for short-term sell pressure.",
        app.summary().staking_ratio
    );
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(C_BRIGHT)))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_table(f: &mut Frame, active: ClusterTag, view: &[&HolderRecord], area: Rect) {
    let header_titles: [&str; 6] = if active.is_perp() {
        ["RANK", "ADDRESS / ALIAS", "OI", "PNL", "WALLET", "SOURCE"]
    } else {
        ["RANK", "ADDRESS / ALIAS", "TOTAL", "STAKED", "LIQUID", "SOURCE"]
    };
    let header = Row::new(header_titles.iter().map(|title| {
        Cell::from(*title).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let rows = view.iter().map(|record| {
        let address = match record.alias() {
            Some(alias) => format!("{alias} ({})", truncate_address(record.address())),
            None => truncate_address(record.address()),
        };
        let address_style = if record.is_official() {
            Style::default().fg(C_ACCENT)
        } else {
            Style::default().fg(C_BRIGHT)
        };

        let figures = if active.is_perp() {
            let pnl = record.unrealized_pnl().unwrap_or(0.0);
            let sign = if pnl > 0.0 { "+" } else { "" };
            let pnl_color = if pnl >= 0.0 { C_GAIN } else { C_LOSS };
            [
                Cell::from(format!("${}", format_magnitude(record.open_interest_or_zero()))),
                Cell::from(format!("{sign}{}", format_magnitude(pnl))).style(Style::default().fg(pnl_color)),
                Cell::from(format_magnitude(record.total_balance())).style(Style::default().fg(C_DIM)),
            ]
        } else {
            [
                Cell::from(format_magnitude(record.total_balance())),
                Cell::from(format_magnitude(record.staked_balance())).style(Style::default().fg(C_DIM)),
                Cell::from(format_magnitude(record.liquid_balance())).style(Style::default().fg(C_DIM)),
            ]
        };

        let source = if record.is_genesis_recipient() {
            Cell::from("Genesis").style(Style::default().fg(C_ACCENT))
        } else {
            Cell::from("Market").style(Style::default().fg(C_DIM))
        };

        let cells = [
            Cell::from(format!("#{}", record.rank())).style(Style::default().fg(C_DIM)),
            Cell::from(address).style(address_style),
        ]
        .into_iter()
        .chain(figures)
        .chain(std::iter::once(source));
        Row::new(cells).height(1)
    });

    let title = if active == ClusterTag::All { " TOP HOLDERS " } else { " CLUSTER DETAIL " };
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(24),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(table, area);
}

/// `width` cells of `█`, filled proportionally to `fraction` in `[0, 1]`.
fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_distribution(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" HOLDING DISTRIBUTION ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let distribution = &app.summary().distribution;
    let bar_width = (inner.width as usize).saturating_sub(20).max(8);

    let lines: Vec<Line> = distribution
        .slices()
        .into_iter()
        .map(|(label, value)| {
            let share = distribution.share(value);
            Line::from(vec![
                Span::styled(format!("{label:<9}"), Style::default().fg(C_BRIGHT)),
                Span::styled(bar(share / 100.0, bar_width), Style::default().fg(C_ACCENT)),
                Span::styled(format!(" {share:>5.1}%"), Style::default().fg(C_BRIGHT)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_top_holders(f: &mut Frame, view: &[&HolderRecord], area: Rect) {
    let block = Block::default()
        .title(" TOP 5: STAKED vs LIQUID ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let top = top_n(view, TOP_HOLDERS);
    if top.is_empty() {
        let placeholder = Line::from(Span::styled("No holders in this view", Style::default().fg(C_DIM)));
        f.render_widget(Paragraph::new(placeholder), inner);
        return;
    }

    let largest = top
        .iter()
        .map(|record| record.total_balance())
        .fold(0.0_f64, f64::max);
    let bar_width = (inner.width as usize).saturating_sub(18).max(8);

    let mut lines: Vec<Line> = top
        .iter()
        .map(|record| {
            let scale = if largest > 0.0 { bar_width as f64 / largest } else { 0.0 };
            let staked = (record.staked_balance() * scale).round() as usize;
            let liquid = ((record.liquid_balance() * scale).round() as usize).min(bar_width - staked.min(bar_width));
            Line::from(vec![
                Span::styled(format!("#{:<4}", record.rank()), Style::default().fg(C_DIM)),
                Span::styled("█".repeat(staked.min(bar_width)), Style::default().fg(C_ACCENT)),
                Span::styled("▒".repeat(liquid), Style::default().fg(C_DIM)),
                Span::styled(format!(" {}", format_magnitude(record.total_balance())), Style::default().fg(C_BRIGHT)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("█ staked  ", Style::default().fg(C_ACCENT)),
        Span::styled("▒ liquid", Style::default().fg(C_DIM)),
    ]));

    f.render_widget(Paragraph::new(lines), inner);
}
