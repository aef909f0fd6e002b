//! All rendering. Widgets are rebuilt from view state every frame;
//! nothing here mutates the app.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    BarChart, Block, Borders, Clear, List, ListItem, Paragraph, Row, Sparkline, Table,
    TableState, Wrap,
};
use ratatui::Frame;

use crate::table::{SortDirection, TableSnapshot};
use crate::views::{DashboardData, FieldKind, FormState, ModalState, ViewBody};

use super::app::{App, Focus};
use super::login::LoginForm;

pub(super) fn draw(f: &mut Frame, app: &App) {
    if let Some(form) = &app.login {
        draw_login(f, app, form);
        return;
    }

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(20)])
        .split(outer[0]);

    draw_sidebar(f, app, columns[0]);
    draw_content(f, app, columns[1]);
    draw_status(f, app, outer[1]);

    if let Some(modal) = app.router.current_view().and_then(|view| view.modal()) {
        draw_modal(f, app, modal);
    }
    if app.show_help {
        draw_help(f);
    }
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let i18n = app.ctx.i18n.borrow();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let marker = if app.use_glyphs { "▸ " } else { "> " };
    let items: Vec<ListItem> = app
        .router
        .routes()
        .iter()
        .map(|entry| {
            let active = entry.path == app.router.active_path();
            let prefix = if active { marker } else { "  " };
            let style = if active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(format!("{prefix}{}", i18n.t(entry.label_key))))
                .style(style)
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("mymanager"));
    f.render_widget(list, chunks[0]);

    if let Some(session) = app.auth.current_user() {
        let user = Paragraph::new(session.username).style(Style::default().fg(Color::DarkGray));
        f.render_widget(user, chunks[1]);
    }
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    let Some(view) = app.router.current_view() else {
        let empty = Paragraph::new(app.ctx.i18n.borrow().t("common.noData"))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    let title = view.title();
    match view.body() {
        ViewBody::Loading => {
            let loading = Paragraph::new(app.ctx.i18n.borrow().t("common.loading"))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(loading, area);
        }
        ViewBody::Error(message) => {
            let error = Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(error, area);
        }
        ViewBody::Table { snapshot, selected } => {
            draw_table(f, app, area, &title, &snapshot, selected);
        }
        ViewBody::Dashboard(data) => {
            draw_dashboard(f, app, area, &title, data);
        }
    }
}

fn draw_table(
    f: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    snapshot: &TableSnapshot,
    selected: usize,
) {
    let i18n = app.ctx.i18n.borrow();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    // Search box. The cursor only shows while it has focus.
    let searching = app.focus == Focus::Search;
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(app.search.value()).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(i18n.t("common.search")),
    );
    f.render_widget(search, chunks[0]);
    if searching {
        f.set_cursor_position((
            chunks[0].x + app.search.visual_cursor() as u16 + 1,
            chunks[0].y + 1,
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{title} ({})", snapshot.visible_total));
    if snapshot.is_empty() {
        let empty = Paragraph::new(i18n.t("common.noData"))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, chunks[1]);
    } else {
        let header_cells: Vec<ratatui::widgets::Cell> = snapshot
            .headers
            .iter()
            .map(|header| {
                let marker = match (header.sort, app.use_glyphs) {
                    (Some(direction), true) => direction.marker(),
                    (Some(SortDirection::Ascending), false) => "^",
                    (Some(SortDirection::Descending), false) => "v",
                    (None, _) => "",
                };
                let text = if marker.is_empty() {
                    header.label.clone()
                } else {
                    format!("{} {marker}", header.label)
                };
                ratatui::widgets::Cell::from(text).style(Style::default().fg(Color::Yellow))
            })
            .collect();
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows: Vec<Row> = snapshot
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<ratatui::widgets::Cell> = row
                    .cells
                    .iter()
                    .map(|cell| {
                        let style = match cell.tag.as_deref() {
                            Some("completed") => Style::default().fg(Color::Green),
                            Some("pending") => Style::default().fg(Color::Yellow),
                            Some("cancelled") => Style::default().fg(Color::Red),
                            _ => Style::default(),
                        };
                        ratatui::widgets::Cell::from(cell.text.as_str()).style(style)
                    })
                    .collect();
                Row::new(cells).height(1)
            })
            .collect();

        let num_cols = snapshot.headers.len().max(1);
        let col_width = (chunks[1].width.saturating_sub(2)) / num_cols as u16;
        let widths: Vec<Constraint> = (0..num_cols)
            .map(|_| Constraint::Length(col_width))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(">> ");
        let mut state = TableState::default();
        state.select(Some(selected));
        f.render_stateful_widget(table, chunks[1], &mut state);
    }

    let mut footer = format!(
        "{} {}/{} | {}: {}",
        i18n.t("common.page"),
        snapshot.current_page,
        snapshot.page_count,
        i18n.t("common.total"),
        snapshot.visible_total,
    );
    if !snapshot.search_term.is_empty() {
        footer.push_str(&format!(
            " | {}: {}",
            i18n.t("common.search"),
            snapshot.search_term
        ));
    }
    let pager = Paragraph::new(footer).style(Style::default().fg(Color::DarkGray));
    f.render_widget(pager, chunks[2]);
}

fn draw_dashboard(f: &mut Frame, app: &App, area: Rect, title: &str, data: &DashboardData) {
    let i18n = app.ctx.i18n.borrow();
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(inner);

    // KPI strip.
    let kpis = [
        ("dashboard.totalGames", data.total_games.to_string()),
        ("dashboard.totalPlayers", data.total_players.to_string()),
        ("dashboard.totalPlatforms", data.total_platforms.to_string()),
        ("dashboard.totalOrders", data.total_orders.to_string()),
        (
            "dashboard.totalRevenue",
            format!("${:.2}", data.total_revenue),
        ),
    ];
    let kpi_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(rows[0]);
    for (chunk, (key, value)) in kpi_chunks.iter().zip(kpis) {
        let widget = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(i18n.t(key)));
        f.render_widget(widget, *chunk);
    }

    // Two bar charts side by side.
    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let genre_data: Vec<(&str, u64)> = data
        .games_per_genre
        .iter()
        .map(|(genre, count)| (genre.as_str(), *count))
        .collect();
    let genres = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(i18n.t("dashboard.gamesPerGenre")),
        )
        .data(&genre_data)
        .bar_width(8)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(genres, chart_chunks[0]);

    let sales_data: Vec<(&str, u64)> = data
        .top_games
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    let sales = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(i18n.t("dashboard.topGames")),
        )
        .data(&sales_data)
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(sales, chart_chunks[1]);

    let counts: Vec<u64> = data.orders_by_date.iter().map(|(_, count)| *count).collect();
    let orders = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(i18n.t("dashboard.ordersOverTime")),
        )
        .data(&counts)
        .style(Style::default().fg(Color::Magenta));
    f.render_widget(orders, rows[2]);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status {
        let style = if status.error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };
        let line = Paragraph::new(status.text.as_str()).style(style);
        f.render_widget(line, area);
        return;
    }
    if !app.show_hints {
        return;
    }
    let hints = match app.focus {
        Focus::Search => "Enter/Esc: back to table",
        Focus::Content => {
            "q quit | / search | a add | e edit | d delete | v view | r reload | \
             x csv | X json | y yank | 1-9 sort | Tab screen | F1 help"
        }
    };
    let line = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(line, area);
}

fn draw_login(f: &mut Frame, app: &App, form: &LoginForm) {
    let i18n = app.ctx.i18n.borrow();
    let area = centered_rect(40, 40, f.area());
    f.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title("mymanager");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let field_style = |index: usize| {
        if form.focus == index {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    let username = Paragraph::new(form.username.value())
        .style(field_style(0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(i18n.t("login.username")),
        );
    f.render_widget(username, chunks[0]);
    let password = Paragraph::new(form.masked_password())
        .style(field_style(1))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(i18n.t("login.password")),
        );
    f.render_widget(password, chunks[1]);

    let focused = if form.focus == 0 {
        &form.username
    } else {
        &form.password
    };
    let field_area = chunks[form.focus];
    f.set_cursor_position((
        field_area.x + focused.visual_cursor() as u16 + 1,
        field_area.y + 1,
    ));

    let footer = match &form.error {
        Some(error) => Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(format!("[Enter] {}", i18n.t("login.submit")))
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(footer, chunks[2]);
}

fn draw_modal(f: &mut Frame, app: &App, modal: &ModalState) {
    match modal {
        ModalState::Detail { title, lines } => draw_detail(f, app, title, lines),
        ModalState::Confirm { message, .. } => draw_confirm(f, app, message),
        ModalState::Form(form) => draw_form(f, app, form),
    }
}

fn draw_detail(f: &mut Frame, app: &App, title: &str, lines: &[(String, String)]) {
    let i18n = app.ctx.i18n.borrow();
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let mut text: Vec<Line> = lines
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(value.as_str()),
            ])
        })
        .collect();
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        format!("[Esc] {}", i18n.t("common.cancel")),
        Style::default().fg(Color::DarkGray),
    )));

    let detail = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(detail, area);
}

fn draw_confirm(f: &mut Frame, app: &App, message: &str) {
    let i18n = app.ctx.i18n.borrow();
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "[Enter/y] {}   [Esc/n] {}",
                i18n.t("common.delete"),
                i18n.t("common.cancel")
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let confirm = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(i18n.t("common.confirm"))
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(confirm, area);
}

fn draw_form(f: &mut Frame, app: &App, form: &FormState) {
    let i18n = app.ctx.i18n.borrow();
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.title.clone());
    let inner = block.inner(area);

    let mut text: Vec<Line> = Vec::new();
    let mut cursor: Option<(u16, u16)> = None;
    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let label = if field.required {
            format!("{}*:", field.label)
        } else {
            format!("{}:", field.label)
        };
        text.push(Line::from(Span::styled(label, label_style)));

        let value = match (field.kind, focused, app.use_glyphs) {
            (FieldKind::Select, true, true) => format!("  ◀ {} ▶", field.display()),
            (FieldKind::Select, true, false) => format!("  < {} >", field.display()),
            _ => format!("  {}", field.display()),
        };
        if focused && field.kind != FieldKind::Select {
            cursor = Some((
                inner.x + 2 + field.input.visual_cursor() as u16,
                inner.y + text.len() as u16,
            ));
        }
        text.push(Line::from(value));

        if let Some(error) = &field.error {
            text.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    if let Some(error) = &form.error {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        format!(
            "[Enter] {}   [Esc] {}   [Tab] next",
            i18n.t("common.save"),
            i18n.t("common.cancel")
        ),
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(text).block(block);
    f.render_widget(body, area);
    if let Some(position) = cursor {
        f.set_cursor_position(position);
    }
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Tab / Shift-Tab   next / previous screen"),
        Line::from("  /                 focus the search box"),
        Line::from("  Up / Down         move the row selection"),
        Line::from("  Left / Right      previous / next page"),
        Line::from("  1-9               sort by the n-th column"),
        Line::from(""),
        Line::from("  a                 add a record"),
        Line::from("  v / Enter         view the selected record"),
        Line::from("  e                 edit the selected record"),
        Line::from("  d                 delete the selected record"),
        Line::from("  r                 reload from the store"),
        Line::from(""),
        Line::from("  x / X             export CSV / JSON"),
        Line::from("  y                 copy the selected row"),
        Line::from(""),
        Line::from("  F2                switch language"),
        Line::from("  F10               log out"),
        Line::from("  q / Ctrl-C        quit"),
        Line::from(""),
        Line::from(Span::styled(
            "press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let help = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
