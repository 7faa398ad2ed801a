//! Frame rendering engine
//!
//! Turns a piece and a playhead into the draw operations for one frame. Rendering is a
//! pure function of its inputs apart from the background slot, which is only read.

use crate::clock::Playhead;
use crate::config::RenderConfig;
use crate::keyboard::{KeyColor, KeyInfo, KeyboardLayout};
use crate::piece::{Note, Piece};

use super::background::BackgroundSlot;
use super::palette::{
    BACKGROUND_BOTTOM, BACKGROUND_OVERLAY, BACKGROUND_TOP, BLACK_KEY, GLOW, GLOW_PEAK_ALPHA,
    WHITE_KEY, WHITE_KEY_OUTLINE,
};
use super::types::{Color, DrawCommand, DrawOp, Frame, Layer, Paint, Rect, Shadow, Surface};

/// Whether `note` is drawn at `current_time`.
///
/// A note is drawn from the moment its start enters the look-ahead window until its
/// end passes the keyboard. Both boundaries are inclusive: a note starting exactly
/// `window` seconds ahead is drawn, and so is a note ending exactly now.
pub fn is_visible(note: &Note, current_time: f64, window: f64) -> bool {
    let time_until = note.start_time - current_time;
    time_until <= window && note.end_time() >= current_time
}

/// Pixel geometry of one frame
///
/// The surface is split into a fall zone on top and the keyboard below. Horizontal
/// positions come from the keyboard layout in white-key widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    pub width: f64,
    pub height: f64,
    pub piano_height: f64,
    pub fall_height: f64,
    pub white_key_width: f64,
    pub black_key_width: f64,
    pub black_key_height: f64,
    pub pixels_per_second: f64,
}

impl FrameGeometry {
    pub fn new(surface: Surface, config: &RenderConfig, layout: &KeyboardLayout) -> Self {
        let piano_height = surface.height * config.piano_ratio;
        let fall_height = surface.height - piano_height;
        let white_key_width = surface.width / layout.white_count().max(1) as f64;
        FrameGeometry {
            width: surface.width,
            height: surface.height,
            piano_height,
            fall_height,
            white_key_width,
            black_key_width: white_key_width * config.black_key_width,
            black_key_height: piano_height * config.black_key_height,
            pixels_per_second: fall_height / config.seconds_in_view,
        }
    }

    pub fn key_x(&self, key: &KeyInfo) -> f64 {
        key.slot * self.white_key_width
    }

    pub fn key_width(&self, key: &KeyInfo) -> f64 {
        match key.color {
            KeyColor::White => self.white_key_width,
            KeyColor::Black => self.black_key_width,
        }
    }

    /// Rectangle of `key` on the keyboard.
    pub fn key_rect(&self, key: &KeyInfo) -> Rect {
        let height = match key.color {
            KeyColor::White => self.piano_height,
            KeyColor::Black => self.black_key_height,
        };
        Rect::new(self.key_x(key), self.fall_height, self.key_width(key), height)
    }

    /// Rectangle of a falling note above `key`.
    ///
    /// The bottom edge is the note's start: it touches the keyboard exactly when
    /// `current_time == note.start_time`. The height covers the duration, never less
    /// than one pixel.
    pub fn note_rect(&self, key: &KeyInfo, note: &Note, current_time: f64) -> Rect {
        let time_until = note.start_time - current_time;
        let bottom = self.fall_height - time_until * self.pixels_per_second;
        let height = (note.duration * self.pixels_per_second).max(1.0);
        Rect::new(self.key_x(key), bottom - height, self.key_width(key), height)
    }
}

/// Waterfall renderer
///
/// Holds the configuration, the keyboard layout and a handle to the background slot.
/// Cheap to share between frames; `render` takes `&self`.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    layout: &'static KeyboardLayout,
    background: BackgroundSlot,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(RenderConfig::default())
    }
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_background(config, BackgroundSlot::new())
    }

    pub fn with_background(config: RenderConfig, background: BackgroundSlot) -> Self {
        Renderer {
            config,
            layout: KeyboardLayout::piano(),
            background,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn layout(&self) -> &'static KeyboardLayout {
        self.layout
    }

    pub fn background(&self) -> &BackgroundSlot {
        &self.background
    }

    pub fn track_color(&self, track_index: usize) -> Color {
        let colors = &self.config.track_colors;
        if colors.is_empty() {
            return WHITE_KEY;
        }
        colors[track_index % colors.len()]
    }

    /// Render the frame for `playhead` on `surface`.
    ///
    /// `playhead.is_playing` is recorded in the frame but does not change what is
    /// drawn. A surface with no drawable area yields a frame without operations.
    pub fn render(&self, piece: &Piece, playhead: Playhead, surface: Surface) -> Frame {
        let mut frame = Frame {
            surface,
            current_time: playhead.current_time,
            is_playing: playhead.is_playing,
            ops: Vec::new(),
            visible_notes: 0,
            active_pitches: Vec::new(),
        };
        if !surface.is_drawable() {
            log::trace!("skipping frame for empty surface {:?}", surface);
            return frame;
        }

        let geometry = FrameGeometry::new(surface, &self.config, self.layout);
        let current_time = playhead.current_time;

        self.draw_background(&mut frame, &geometry);
        self.draw_notes(&mut frame, &geometry, piece, current_time);
        self.draw_glow(&mut frame, &geometry);
        self.draw_keyboard(&mut frame, &geometry);
        self.draw_highlights(&mut frame, &geometry, piece, current_time);

        frame
    }

    fn draw_background(&self, frame: &mut Frame, geometry: &FrameGeometry) {
        let full = Rect::new(0.0, 0.0, geometry.width, geometry.height);
        push(
            frame,
            Layer::Background,
            DrawCommand::Clear {
                width: geometry.width,
                height: geometry.height,
            },
        );
        match self.background.get() {
            Some(image) => {
                push(
                    frame,
                    Layer::Background,
                    DrawCommand::Image {
                        source: image.source.clone(),
                        rect: full,
                    },
                );
                push(frame, Layer::Background, fill(full, Paint::solid(BACKGROUND_OVERLAY)));
            }
            None => push(
                frame,
                Layer::Background,
                fill(
                    full,
                    Paint::vertical(0.0, geometry.height, BACKGROUND_TOP, BACKGROUND_BOTTOM),
                ),
            ),
        }
    }

    fn draw_notes(&self, frame: &mut Frame, geometry: &FrameGeometry, piece: &Piece, current_time: f64) {
        let window = self.config.seconds_in_view;
        for (track_index, track) in piece.tracks.iter().enumerate() {
            let color = self.track_color(track_index);
            let shadow = (self.config.note_glow_blur > 0.0).then_some(Shadow {
                color,
                blur: self.config.note_glow_blur,
            });
            for note in &track.notes {
                if !is_visible(note, current_time, window) {
                    continue;
                }
                let Some(key) = self.layout.key(note.pitch) else {
                    continue;
                };
                let rect = geometry.note_rect(key, note, current_time);
                push(
                    frame,
                    Layer::Notes,
                    DrawCommand::FillRect {
                        rect,
                        paint: Paint::solid(color),
                        alpha: 1.0,
                        shadow,
                    },
                );
                frame.visible_notes += 1;
            }
        }
    }

    fn draw_glow(&self, frame: &mut Frame, geometry: &FrameGeometry) {
        let height = self.config.glow_height;
        if height <= 0.0 {
            return;
        }
        let top = geometry.fall_height - height;
        push(
            frame,
            Layer::Glow,
            fill(
                Rect::new(0.0, top, geometry.width, height),
                Paint::vertical(
                    top,
                    geometry.fall_height,
                    GLOW.with_alpha(0.0),
                    GLOW.with_alpha(GLOW_PEAK_ALPHA),
                ),
            ),
        );
    }

    fn draw_keyboard(&self, frame: &mut Frame, geometry: &FrameGeometry) {
        for key in self.layout.white_keys() {
            let rect = geometry.key_rect(key);
            push(frame, Layer::Keyboard, fill(rect, Paint::solid(WHITE_KEY)));
            push(
                frame,
                Layer::Keyboard,
                DrawCommand::StrokeRect {
                    rect,
                    color: WHITE_KEY_OUTLINE,
                    line_width: 1.0,
                },
            );
        }
        for key in self.layout.black_keys() {
            push(
                frame,
                Layer::Keyboard,
                fill(geometry.key_rect(key), Paint::solid(BLACK_KEY)),
            );
        }
    }

    fn draw_highlights(&self, frame: &mut Frame, geometry: &FrameGeometry, piece: &Piece, current_time: f64) {
        for (track_index, track) in piece.tracks.iter().enumerate() {
            let color = self.track_color(track_index);
            for note in track.notes.iter().filter(|n| n.is_active_at(current_time)) {
                let Some(key) = self.layout.key(note.pitch) else {
                    continue;
                };
                push(
                    frame,
                    Layer::Highlights,
                    DrawCommand::FillRect {
                        rect: geometry.key_rect(key),
                        paint: Paint::solid(color),
                        alpha: self.config.highlight_alpha,
                        shadow: None,
                    },
                );
                frame.active_pitches.push(note.pitch);
            }
        }
        frame.active_pitches.sort_unstable();
        frame.active_pitches.dedup();
    }
}

fn fill(rect: Rect, paint: Paint) -> DrawCommand {
    DrawCommand::FillRect {
        rect,
        paint,
        alpha: 1.0,
        shadow: None,
    }
}

fn push(frame: &mut Frame, layer: Layer, command: DrawCommand) {
    frame.ops.push(DrawOp { layer, command });
}
