//! # Display Management
//!
//! Draws the level, the message log, and the hero stats panel with
//! macroquad.
//!
//! The simulation uses y-up coordinates with the origin at the bottom-left;
//! macroquad's origin is top-left with y growing down, so every rectangle
//! goes through [`Display::flip_y`] on its way to the screen.

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::game::{GameOutcome, GameState, Level};
use crate::geometry::Rect;
use macroquad::prelude::*;

/// Macroquad display for the game.
pub struct Display {
    /// Font size for entity glyphs
    pub glyph_font_size: f32,
    /// Font size for the message log and stats panel
    pub text_font_size: f32,
    /// How many log messages are visible at once
    pub visible_messages: usize,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    pub fn new() -> Self {
        Self {
            glyph_font_size: 16.0,
            text_font_size: 16.0,
            visible_messages: 4,
        }
    }

    /// Renders one frame of a running game.
    pub fn render(&self, state: &GameState) {
        clear_background(BLACK);
        self.draw_level(&state.level);
        self.draw_messages(&state.messages);
        self.draw_stats(state);
    }

    /// Renders the end screen after the game finished.
    pub fn render_outcome(&self, outcome: GameOutcome) {
        clear_background(BLACK);
        let (title, color) = match outcome {
            GameOutcome::Victory => ("YOU WIN!", GOLD),
            GameOutcome::Defeat => ("GAME OVER", RED),
        };
        let size = 48.0;
        let dims = measure_text(title, None, size as u16, 1.0);
        draw_text(
            title,
            (WINDOW_WIDTH as f32 - dims.width) / 2.0,
            WINDOW_HEIGHT as f32 / 2.0,
            size,
            color,
        );
        let hint = "Enter to restart, Esc to quit";
        let hint_dims = measure_text(hint, None, self.text_font_size as u16, 1.0);
        draw_text(
            hint,
            (WINDOW_WIDTH as f32 - hint_dims.width) / 2.0,
            WINDOW_HEIGHT as f32 / 2.0 + 40.0,
            self.text_font_size,
            GRAY,
        );
    }

    fn draw_level(&self, level: &Level) {
        // Walls first, floors on top, so the outer rects read as borders.
        for room in &level.rooms {
            self.fill_rect(room.outer, DARKGRAY);
        }
        for pathway in &level.pathways {
            self.fill_rect(pathway.outer, DARKGRAY);
        }
        for room in &level.rooms {
            self.fill_rect(room.inner, Color::new(0.08, 0.08, 0.12, 1.0));
        }
        for pathway in &level.pathways {
            self.fill_rect(pathway.inner, Color::new(0.08, 0.08, 0.12, 1.0));
        }

        for hitbox in &level.hitboxes {
            self.fill_rect(hitbox.rect, Color::new(1.0, 0.2, 0.2, 0.5));
        }

        for obj in &level.objects {
            self.draw_glyph(obj.symbol, obj.rect());
        }
        for creature in &level.creatures {
            let rect = creature.body.rect();
            self.draw_glyph(creature.body.symbol, rect);
            if creature.health < creature.health_total {
                self.draw_health_bar(rect, creature.health, creature.health_total);
            }
        }
    }

    fn draw_glyph(&self, symbol: char, rect: Rect) {
        let mut buf = [0u8; 4];
        let text = symbol.encode_utf8(&mut buf);
        // draw_text anchors at the baseline, so the glyph sits on the
        // bottom edge of its bounding rect.
        draw_text(
            text,
            rect.left as f32,
            self.flip_y(rect.bottom, 0),
            self.glyph_font_size,
            glyph_color(symbol),
        );
    }

    fn draw_health_bar(&self, rect: Rect, health: i32, total: i32) {
        let ratio = (health.max(0) as f32) / (total.max(1) as f32);
        let y = self.flip_y(rect.top + 4, 2);
        draw_rectangle(rect.left as f32, y, rect.width() as f32, 2.0, DARKGRAY);
        draw_rectangle(
            rect.left as f32,
            y,
            rect.width() as f32 * ratio,
            2.0,
            if ratio > 0.3 { GREEN } else { RED },
        );
    }

    fn draw_messages(&self, messages: &[String]) {
        let tail = messages.len().saturating_sub(self.visible_messages);
        for (row, message) in messages[tail..].iter().enumerate() {
            draw_text(
                message,
                10.0,
                20.0 + row as f32 * (self.text_font_size + 2.0),
                self.text_font_size,
                LIGHTGRAY,
            );
        }
    }

    fn draw_stats(&self, state: &GameState) {
        let Some(hero) = state.level.hero() else {
            return;
        };
        let line = format!(
            "HP {}/{}   depth {}",
            hero.health.max(0),
            hero.health_total,
            state.current_level() + 1
        );
        draw_text(
            &line,
            10.0,
            WINDOW_HEIGHT as f32 - 12.0,
            self.text_font_size,
            WHITE,
        );
    }

    fn fill_rect(&self, rect: Rect, color: Color) {
        draw_rectangle(
            rect.left as f32,
            self.flip_y(rect.bottom, rect.height()),
            rect.width() as f32,
            rect.height() as f32,
            color,
        );
    }

    /// Converts a y-up world coordinate to macroquad's y-down screen space.
    fn flip_y(&self, y: i32, h: i32) -> f32 {
        (WINDOW_HEIGHT - y - h) as f32
    }
}

fn glyph_color(symbol: char) -> Color {
    match symbol {
        '@' => SKYBLUE,
        'W' => GOLD,
        'H' => WHITE,
        'L' => BEIGE,
        'C' => BROWN,
        'O' => DARKBROWN,
        '<' | '>' => LIGHTGRAY,
        _ => GRAY,
    }
}
