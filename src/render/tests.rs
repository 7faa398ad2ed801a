use super::*;
use crate::clock::Playhead;
use crate::config::RenderConfig;
use crate::keyboard::KeyboardLayout;
use crate::piece::{Note, Piece, Track};

const EPSILON: f64 = 1e-9;

// 52 white keys of 20px, 600px fall zone, 200px keyboard
fn surface() -> Surface {
    Surface::new(1040.0, 800.0)
}

fn track(name: &str, notes: Vec<Note>) -> Track {
    Track {
        name: name.to_string(),
        channel: 0,
        notes,
    }
}

fn piece(tracks: Vec<Track>) -> Piece {
    Piece::new(None, tracks).unwrap()
}

fn single_note_piece() -> Piece {
    piece(vec![track("Lead", vec![Note::new(60, 5.0, 0.5, 0.8)])])
}

fn note_rects(frame: &Frame) -> Vec<Rect> {
    frame
        .layer(Layer::Notes)
        .map(|command| match command {
            DrawCommand::FillRect { rect, .. } => *rect,
            other => panic!("unexpected note command {:?}", other),
        })
        .collect()
}

#[test]
fn test_visibility_rule() {
    let note = Note::new(60, 5.0, 0.5, 0.8);
    assert!(!is_visible(&note, 1.0, 3.5)); // 4.0s ahead
    assert!(is_visible(&note, 1.5, 3.5)); // exactly at the horizon
    assert!(is_visible(&note, 3.0, 3.5));
    assert!(is_visible(&note, 5.4, 3.5)); // sounding
    assert!(is_visible(&note, 5.5, 3.5)); // ends exactly now
    assert!(!is_visible(&note, 5.6, 3.5)); // finished
}

#[test]
fn test_render_culls_by_visibility() {
    let renderer = Renderer::default();
    let piece = single_note_piece();

    for (time, expected) in [(1.0, 0), (1.5, 1), (5.4, 1), (5.6, 0)] {
        let frame = renderer.render(&piece, Playhead::at(time), surface());
        assert_eq!(frame.visible_notes, expected, "at {}s", time);
        assert_eq!(frame.layer(Layer::Notes).count(), expected);
    }
}

#[test]
fn test_active_highlight_rule() {
    let renderer = Renderer::default();
    let piece = single_note_piece();

    for (time, active) in [(4.99, false), (5.0, true), (5.25, true), (5.49, true), (5.5, false)] {
        let frame = renderer.render(&piece, Playhead::at(time), surface());
        let expected: Vec<u8> = if active { vec![60] } else { vec![] };
        assert_eq!(frame.active_pitches, expected, "at {}s", time);
        assert_eq!(frame.layer(Layer::Highlights).count(), expected.len());
    }
}

#[test]
fn test_geometry() {
    let config = RenderConfig::default();
    let geometry = FrameGeometry::new(surface(), &config, KeyboardLayout::piano());
    assert_eq!(geometry.piano_height, 200.0);
    assert_eq!(geometry.fall_height, 600.0);
    assert_eq!(geometry.white_key_width, 20.0);
    assert_eq!(geometry.black_key_width, 12.0);
    assert!((geometry.black_key_height - 120.0).abs() < EPSILON);
    assert!((geometry.pixels_per_second - 600.0 / 3.5).abs() < EPSILON);
}

#[test]
fn test_note_reaches_keyboard_at_start_time() {
    let frame = Renderer::default().render(&single_note_piece(), Playhead::at(5.0), surface());
    let rects = note_rects(&frame);
    assert_eq!(rects.len(), 1);

    let pps = 600.0 / 3.5;
    assert!((rects[0].bottom() - 600.0).abs() < 1e-6);
    assert!((rects[0].height - 0.5 * pps).abs() < 1e-6);
}

#[test]
fn test_note_falls_from_horizon() {
    // At the horizon the bottom edge sits at the top of the surface
    let frame = Renderer::default().render(&single_note_piece(), Playhead::at(1.5), surface());
    let rect = note_rects(&frame)[0];
    assert!(rect.bottom().abs() < 1e-6);
    assert!(rect.y < 0.0);

    // Halfway there it is halfway down the fall zone
    let frame = Renderer::default().render(&single_note_piece(), Playhead::at(3.25), surface());
    let rect = note_rects(&frame)[0];
    assert!((rect.bottom() - 300.0).abs() < 1e-6);
}

#[test]
fn test_sounding_note_extends_below_fall_zone() {
    let frame = Renderer::default().render(&single_note_piece(), Playhead::at(5.25), surface());
    let rect = note_rects(&frame)[0];
    let pps = 600.0 / 3.5;
    assert!((rect.bottom() - (600.0 + 0.25 * pps)).abs() < 1e-6);
}

#[test]
fn test_note_height_has_one_pixel_floor() {
    let piece = piece(vec![track("Lead", vec![Note::new(60, 1.0, 0.001, 0.8)])]);
    let frame = Renderer::default().render(&piece, Playhead::at(0.0), surface());
    let rect = note_rects(&frame)[0];
    assert_eq!(rect.height, 1.0);
}

#[test]
fn test_horizontal_placement() {
    let piece = piece(vec![track(
        "Lead",
        vec![
            Note::new(21, 0.0, 1.0, 0.8), // A0, first white key
            Note::new(22, 0.0, 1.0, 0.8), // A#0, black
            Note::new(60, 0.0, 1.0, 0.8), // C4, white slot 23
        ],
    )]);
    let frame = Renderer::default().render(&piece, Playhead::at(0.0), surface());
    let rects = note_rects(&frame);

    assert_eq!(rects[0].x, 0.0);
    assert_eq!(rects[0].width, 20.0);
    assert!((rects[1].x - 14.0).abs() < EPSILON);
    assert_eq!(rects[1].width, 12.0);
    assert_eq!(rects[2].x, 460.0);
}

#[test]
fn test_out_of_range_pitch_is_skipped() {
    let piece = piece(vec![track(
        "Lead",
        vec![Note::new(10, 0.0, 1.0, 0.8), Note::new(120, 0.0, 1.0, 0.8)],
    )]);
    let frame = Renderer::default().render(&piece, Playhead::at(0.5), surface());
    assert_eq!(frame.visible_notes, 0);
    assert!(frame.active_pitches.is_empty());
    assert_eq!(frame.layer(Layer::Highlights).count(), 0);
}

#[test]
fn test_layers_are_in_painting_order() {
    let piece = single_note_piece();
    let frame = Renderer::default().render(&piece, Playhead::at(5.2), surface());

    let layers: Vec<Layer> = frame.ops.iter().map(|op| op.layer).collect();
    assert!(layers.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(layers.first(), Some(&Layer::Background));
    assert_eq!(layers.last(), Some(&Layer::Highlights));
    assert_eq!(frame.layer(Layer::Glow).count(), 1);
}

#[test]
fn test_keyboard_white_keys_then_black_keys() {
    let frame = Renderer::default().render(&single_note_piece(), Playhead::at(0.0), surface());
    let keyboard: Vec<&DrawCommand> = frame.layer(Layer::Keyboard).collect();
    // Fill and outline per white key, one fill per black key
    assert_eq!(keyboard.len(), 52 * 2 + 36);

    match keyboard[0] {
        DrawCommand::FillRect { rect, paint, .. } => {
            assert_eq!(*rect, Rect::new(0.0, 600.0, 20.0, 200.0));
            assert_eq!(*paint, Paint::solid(Color::WHITE));
        }
        other => panic!("expected white key fill, got {:?}", other),
    }
    assert!(matches!(keyboard[1], DrawCommand::StrokeRect { line_width, .. } if *line_width == 1.0));

    match keyboard[104] {
        DrawCommand::FillRect { rect, .. } => {
            assert!((rect.x - 14.0).abs() < EPSILON);
            assert_eq!(rect.y, 600.0);
            assert_eq!(rect.width, 12.0);
            assert!((rect.height - 120.0).abs() < EPSILON);
        }
        other => panic!("expected black key fill, got {:?}", other),
    }
}

#[test]
fn test_notes_are_filled_solid_in_track_color() {
    let piece = piece(vec![
        track("A", vec![Note::new(60, 0.5, 1.0, 0.8)]),
        track("B", vec![Note::new(64, 0.5, 1.0, 0.8)]),
    ]);
    let frame = Renderer::default().render(&piece, Playhead::at(0.0), surface());
    let paints: Vec<&Paint> = frame
        .layer(Layer::Notes)
        .map(|command| match command {
            DrawCommand::FillRect { paint, alpha, .. } => {
                assert_eq!(*alpha, 1.0);
                paint
            }
            other => panic!("unexpected note command {:?}", other),
        })
        .collect();
    assert_eq!(
        paints,
        vec![
            &Paint::solid(palette::TRACK_COLORS[0]),
            &Paint::solid(palette::TRACK_COLORS[1])
        ]
    );
}

#[test]
fn test_highlight_uses_track_color_at_half_opacity() {
    let piece = piece(vec![
        track("A", vec![Note::new(40, 0.0, 1.0, 0.8)]),
        track("B", vec![Note::new(42, 0.0, 1.0, 0.8)]), // black key
    ]);
    let frame = Renderer::default().render(&piece, Playhead::at(0.5), surface());
    let highlights: Vec<&DrawCommand> = frame.layer(Layer::Highlights).collect();
    assert_eq!(highlights.len(), 2);

    match highlights[1] {
        DrawCommand::FillRect { rect, paint, alpha, .. } => {
            assert_eq!(*alpha, 0.5);
            assert_eq!(*paint, Paint::solid(palette::TRACK_COLORS[1]));
            assert_eq!(rect.width, 12.0);
            assert!((rect.height - 120.0).abs() < EPSILON);
        }
        other => panic!("expected highlight fill, got {:?}", other),
    }
}

#[test]
fn test_overlapping_highlights_follow_track_order() {
    let piece = piece(vec![
        track("A", vec![Note::new(60, 0.0, 2.0, 0.8)]),
        track("B", vec![Note::new(60, 1.0, 2.0, 0.8)]),
    ]);
    let frame = Renderer::default().render(&piece, Playhead::at(1.5), surface());
    let colors: Vec<Paint> = frame
        .layer(Layer::Highlights)
        .filter_map(|command| match command {
            DrawCommand::FillRect { paint, .. } => Some(paint.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        colors,
        vec![
            Paint::solid(palette::TRACK_COLORS[0]),
            Paint::solid(palette::TRACK_COLORS[1])
        ]
    );
    assert_eq!(frame.active_pitches, vec![60]);
}

#[test]
fn test_track_colors_cycle() {
    let renderer = Renderer::default();
    assert_eq!(renderer.track_color(0), palette::TRACK_COLORS[0]);
    assert_eq!(renderer.track_color(8), palette::TRACK_COLORS[0]);
    assert_eq!(renderer.track_color(11), palette::TRACK_COLORS[3]);

    let tracks = (0..10)
        .map(|i| track(&format!("T{}", i), vec![Note::new(60 + i as u8, 0.0, 1.0, 0.8)]))
        .collect();
    let frame = renderer.render(&piece(tracks), Playhead::at(0.0), surface());
    let shadows: Vec<Color> = frame
        .layer(Layer::Notes)
        .filter_map(|command| match command {
            DrawCommand::FillRect { shadow: Some(shadow), .. } => Some(shadow.color),
            _ => None,
        })
        .collect();
    assert_eq!(shadows.len(), 10);
    assert_eq!(shadows[9], palette::TRACK_COLORS[1]);
}

#[test]
fn test_gradient_background_until_image_is_ready() {
    let renderer = Renderer::default();
    let piece = single_note_piece();

    let frame = renderer.render(&piece, Playhead::at(0.0), surface());
    let background: Vec<&DrawCommand> = frame.layer(Layer::Background).collect();
    assert_eq!(background.len(), 2);
    assert!(matches!(background[0], DrawCommand::Clear { .. }));
    assert!(matches!(
        background[1],
        DrawCommand::FillRect { paint: Paint::VerticalGradient { .. }, .. }
    ));

    renderer.background().fill(BackgroundImage {
        source: "bg.jpg".to_string(),
    });
    let frame = renderer.render(&piece, Playhead::at(0.0), surface());
    let background: Vec<&DrawCommand> = frame.layer(Layer::Background).collect();
    assert_eq!(background.len(), 3);
    assert!(matches!(background[1], DrawCommand::Image { source, .. } if source == "bg.jpg"));
    assert!(matches!(
        background[2],
        DrawCommand::FillRect { paint: Paint::Solid { color }, .. } if *color == palette::BACKGROUND_OVERLAY
    ));
}

#[test]
fn test_drawing_ignores_play_state() {
    let renderer = Renderer::default();
    let piece = single_note_piece();
    let paused = renderer.render(&piece, Playhead::at(4.0), surface());
    let playing = renderer.render(
        &piece,
        Playhead {
            current_time: 4.0,
            is_playing: true,
        },
        surface(),
    );
    assert_eq!(paused.ops, playing.ops);
    assert!(playing.is_playing);
    assert!(!paused.is_playing);
}

#[test]
fn test_empty_surface_draws_nothing() {
    let renderer = Renderer::default();
    let piece = single_note_piece();
    for surface in [
        Surface::new(0.0, 800.0),
        Surface::new(1040.0, -1.0),
        Surface::new(f64::NAN, 800.0),
    ] {
        let frame = renderer.render(&piece, Playhead::at(5.0), surface);
        assert!(frame.ops.is_empty());
        assert_eq!(frame.visible_notes, 0);
    }
}

#[test]
fn test_custom_window_changes_scale() {
    let config = RenderConfig {
        seconds_in_view: 6.0,
        ..RenderConfig::default()
    };
    let renderer = Renderer::new(config);
    // 5.0s ahead: outside the default window, inside a 6s one
    let frame = renderer.render(&single_note_piece(), Playhead::at(0.0), surface());
    assert_eq!(frame.visible_notes, 1);
    let rect = note_rects(&frame)[0];
    assert!((rect.bottom() - 100.0).abs() < 1e-6);
}

#[test]
fn test_frame_serializes_for_canvas_hosts() {
    let frame = Renderer::default().render(&single_note_piece(), Playhead::at(5.0), surface());
    let json = serde_json::to_value(&frame).unwrap();

    assert_eq!(json["currentTime"], 5.0);
    assert_eq!(json["visibleNotes"], 1);
    assert_eq!(json["activePitches"][0], 60);
    assert_eq!(json["ops"][0]["op"], "clear");
    assert_eq!(json["ops"][0]["layer"], "background");
    assert_eq!(json["ops"][1]["paint"]["kind"], "verticalGradient");
    assert_eq!(json["ops"][1]["paint"]["stops"][0]["color"], "#1e293b");

    let highlight = json["ops"]
        .as_array()
        .unwrap()
        .iter()
        .find(|op| op["layer"] == "highlights")
        .unwrap();
    assert_eq!(highlight["op"], "fillRect");
    assert_eq!(highlight["paint"]["color"], "#f0abfc");
    assert_eq!(highlight["alpha"], 0.5);
}

#[test]
fn test_color_parsing() {
    assert_eq!(Color::from_hex("#f0abfc"), Some(Color::rgb(0xf0, 0xab, 0xfc)));
    assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
    assert_eq!(Color::from_hex("#00000080").map(|c| c.a), Some(128.0 / 255.0));
    assert_eq!(Color::from_hex("f0abfc"), None);
    assert_eq!(Color::from_hex("#12345"), None);
    assert_eq!(Color::from_hex("#gggggg"), None);
    assert_eq!(Color::from_hex("#+f+f+f"), None);
    assert_eq!(Color::from_hex("#+ff"), None);
    assert_eq!(Color::rgba(18, 18, 27, 0.7).to_string(), "rgba(18, 18, 27, 0.7)");
}
