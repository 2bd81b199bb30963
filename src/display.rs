//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session.  No game logic is performed; this module only projects world
//! coordinates onto terminal cells and queues crossterm commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Bullet, BulletOwner, EnemyPlane, Explosion};
use crate::math::{Rect, Vec2};
use crate::session::{GameSession, SessionStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_HEAVY: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── World/terminal projection ─────────────────────────────────────────────────

/// Playfield bounds for a terminal of `cols` x `rows` cells: centered origin,
/// one border column/row on each side plus a HUD row on top.
pub fn world_for(cols: u16, rows: u16) -> Rect {
    let w = cols.saturating_sub(2).max(1) as f32;
    let h = rows.saturating_sub(3).max(1) as f32;
    Rect::centered(w / 2.0, h / 2.0)
}

/// World position → terminal cell, or `None` when off the playfield.
fn to_cell(world: &Rect, pos: Vec2) -> Option<(u16, u16)> {
    let col = (pos.x - world.left()).round() as i64 + 1;
    let row = (world.top() - pos.y).round() as i64 + 2;
    let max_col = world.width() as i64;
    let max_row = world.height() as i64 + 1;
    if col < 1 || col > max_col || row < 2 || row > max_row {
        return None;
    }
    Some((col as u16, row as u16))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &GameSession) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let world = session.world();
    draw_border(out, &world)?;
    draw_hud(out, session)?;

    session
        .enemies
        .draw_active(out, |out, e| draw_enemy(out, &world, e))?;
    session
        .bullets
        .draw_active(out, |out, b| draw_bullet(out, &world, b))?;
    session
        .explosions
        .draw_active(out, |out, x| draw_explosion(out, &world, x))?;

    draw_player(out, session, &world)?;

    if session.status() == SessionStatus::GameOver {
        draw_game_over(out, &world)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Pieces ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, world: &Rect) -> io::Result<()> {
    let cols = world.width() as u16 + 2;
    let rows = world.height() as u16 + 3;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    for col in 0..cols {
        out.queue(cursor::MoveTo(col, 1))?.queue(Print("═"))?;
        out.queue(cursor::MoveTo(col, rows - 1))?.queue(Print("═"))?;
    }
    for row in 1..rows {
        out.queue(cursor::MoveTo(0, row))?.queue(Print("║"))?;
        out.queue(cursor::MoveTo(cols - 1, row))?.queue(Print("║"))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, session: &GameSession) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score {:<8} Best {:<8}",
        session.score(),
        session.high_score()
    )))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!(" HP {:<4}", session.player.hp.max(0))))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("  ←↑↓→/WASD move  SPACE fire  Q quit"))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, session: &GameSession, world: &Rect) -> io::Result<()> {
    if session.player.is_destroyed() {
        return Ok(());
    }
    if let Some((col, row)) = to_cell(world, session.player.body.pos) {
        out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(Print("=►"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, world: &Rect, enemy: &EnemyPlane) -> io::Result<()> {
    if let Some((col, row)) = to_cell(world, enemy.body.pos) {
        // Heavier tiers read as wider, angrier planes.
        let (glyph, color) = if enemy.body.bounds().half_height() > 1.3 {
            ("≪◄", C_ENEMY_HEAVY)
        } else {
            ("◄=", C_ENEMY)
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, world: &Rect, bullet: &Bullet) -> io::Result<()> {
    if let Some((col, row)) = to_cell(world, bullet.body.pos) {
        let (glyph, color) = match bullet.owner {
            BulletOwner::Player => ("-", C_BULLET_PLAYER),
            BulletOwner::Enemy => ("•", C_BULLET_ENEMY),
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_explosion<W: Write>(out: &mut W, world: &Rect, explosion: &Explosion) -> io::Result<()> {
    if let Some((col, row)) = to_cell(world, explosion.body.pos) {
        let glyph = if explosion.progress() < 0.5 { "✸" } else { "·" };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_EXPLOSION))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, world: &Rect) -> io::Result<()> {
    let cx = (world.width() as u16 + 2) / 2;
    let cy = (world.height() as u16 + 3) / 2;
    let title = "✈  GAME OVER  ✈";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy,
    ))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(title))?;
    let hint = "R restart   Q quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        cy + 2,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
