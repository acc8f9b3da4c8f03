use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::formation::AlienKind;
use crate::game::{Game, FIELD_HEIGHT, FIELD_WIDTH};
use crate::hud::HudCell;

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Space Invaders ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(100, 255, 100))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(8),    // Playfield
            Constraint::Length(1), // Help / status
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(hud_line(&app.game)), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = render_field(&app.game, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    frame.render_widget(Paragraph::new(status_line(&app.game)), chunks[2]);
}

/// The HUD row mirrors the retained panel state: one glyph per score
/// cell (blanks render as background) and one tank per life slot.
fn hud_line(game: &Game) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " SCORE ",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    for cell in game.hud.score_cells {
        let (ch, style) = match cell {
            HudCell::Digit(d) => (
                char::from(b'0' + d),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            HudCell::Blank => (' ', Style::default()),
        };
        spans.push(Span::styled(String::from(ch), style));
    }

    spans.push(Span::styled(
        "   LIVES ",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
    for active in game.hud.life_slots {
        if active {
            spans.push(Span::styled(
                "▲ ",
                Style::default().fg(Color::Rgb(80, 255, 80)),
            ));
        } else {
            spans.push(Span::raw("  "));
        }
    }

    spans.push(Span::styled(
        format!("  Wave: {}", game.wave),
        Style::default().fg(Color::Cyan),
    ));

    Line::from(spans)
}

fn render_field(game: &Game, w: usize, h: usize) -> Vec<Line<'static>> {
    let bg = Color::Rgb(0, 0, 5);
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(bg)); w]; h];

    let sx = w as f32 / FIELD_WIDTH;
    let sy = h as f32 / FIELD_HEIGHT;
    let put = |grid: &mut Vec<Vec<(char, Style)>>, x: f32, y: f32, ch: char, fg: Color| {
        let cx = (x * sx) as i32;
        let cy = (y * sy) as i32;
        if cx >= 0 && cy >= 0 && (cx as usize) < w && (cy as usize) < h {
            grid[cy as usize][cx as usize] = (ch, Style::default().fg(fg).bg(bg));
        }
    };

    let anim = (game.frame / 15) % 2 == 0;

    for (kind, x, y) in game.formation.alive_aliens() {
        let (ch, color) = match kind {
            AlienKind::Top => (if anim { 'Y' } else { 'T' }, Color::Rgb(255, 80, 80)),
            AlienKind::Mid => (if anim { 'X' } else { 'x' }, Color::Rgb(80, 255, 150)),
            AlienKind::Bot => (if anim { 'M' } else { 'W' }, Color::Rgb(200, 180, 255)),
        };
        put(&mut grid, x, y, ch, color);
    }

    for shot in &game.missiles.player_shots {
        put(&mut grid, shot.x, shot.y, '|', Color::Rgb(255, 255, 200));
    }

    let bolt = if (game.frame / 4) % 2 == 0 { '/' } else { '\\' };
    for missile in &game.missiles.alien_missiles {
        put(&mut grid, missile.x, missile.y, bolt, Color::Rgb(255, 100, 100));
    }

    if !game.game_over {
        put(
            &mut grid,
            game.player_x,
            game.player_y(),
            '▲',
            Color::Rgb(80, 255, 80),
        );
    }

    // Ground line
    let ground_y = h.saturating_sub(1);
    for x in 0..w {
        grid[ground_y][x] = ('─', Style::default().fg(Color::Rgb(40, 80, 40)).bg(bg));
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn status_line(game: &Game) -> Line<'static> {
    if game.game_over {
        Line::from(vec![
            Span::styled(
                " GAME OVER! ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Press ENTER to restart, Q to quit",
                Style::default().fg(Color::Gray),
            ),
        ])
    } else if game.paused {
        Line::from(Span::styled(
            " PAUSED - Press P to resume ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(" ←→ Move ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled(
                "Space Shoot ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
            Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
        ])
    }
}
