use keyfall::clock::{FrameOutcome, ManualTime, PlaybackClock, Playhead};
use keyfall::render::BackgroundImage;
use keyfall::{KeyfallError, Piece, RenderConfig, Renderer, Surface};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct LoadError {
    message: String,
    detail: String,
}

fn error_to_js(e: KeyfallError) -> JsValue {
    let error = LoadError {
        message: e.user_message().to_string(),
        detail: e.to_string(),
    };
    match serde_json::to_string(&error) {
        Ok(json) => JsValue::from_str(&json),
        Err(_) => JsValue::from_str(&error.message),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Browser timestamps arrive in milliseconds from `performance.now()`
fn seconds(now_ms: f64) -> f64 {
    now_ms / 1000.0
}

/// Player for a browser host
///
/// The host owns the animation loop: it calls `tick(performance.now())` from
/// `requestAnimationFrame` and keeps requesting frames only while `tick` returns true.
#[wasm_bindgen]
pub struct WasmPlayer {
    clock: PlaybackClock<ManualTime>,
    piece: Piece,
    renderer: Renderer,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player for a YAML piece, with an optional YAML render config
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str, config: Option<String>, now_ms: f64) -> Result<WasmPlayer, JsValue> {
        let piece = keyfall::load_piece(source).map_err(error_to_js)?;
        let config = match config {
            Some(config) => RenderConfig::from_yaml(&config).map_err(error_to_js)?,
            None => RenderConfig::default(),
        };
        Ok(Self::build(piece, config, now_ms))
    }

    /// Create a player for one of the embedded demo pieces
    pub fn demo(name: &str, now_ms: f64) -> Result<WasmPlayer, JsValue> {
        let piece = keyfall::load_demo(name).map_err(error_to_js)?;
        Ok(Self::build(piece, RenderConfig::default(), now_ms))
    }

    /// Replace the piece. Playback stops; on error the current piece is kept.
    pub fn load(&mut self, source: &str) -> Result<(), JsValue> {
        let piece = keyfall::load_piece(source).map_err(error_to_js)?;
        self.clock.load(piece.total_duration());
        self.piece = piece;
        Ok(())
    }

    pub fn play(&mut self, now_ms: f64) {
        self.sync(now_ms);
        self.clock.play();
    }

    pub fn pause(&mut self, now_ms: f64) {
        self.sync(now_ms);
        self.clock.pause();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn seek(&mut self, seconds_target: f64, now_ms: f64) {
        self.sync(now_ms);
        self.clock.seek(seconds_target);
    }

    /// Advance the clock for one animation frame. Returns whether to request another.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.sync(now_ms);
        self.clock.update() == FrameOutcome::Continue
    }

    #[wasm_bindgen(getter, js_name = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f64 {
        self.clock.duration()
    }

    #[wasm_bindgen(getter, js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// Source of the background image the host should fetch, if any
    #[wasm_bindgen(getter, js_name = backgroundSource)]
    pub fn background_source(&self) -> Option<String> {
        self.renderer.config().background.clone()
    }

    /// Called by the host once its background image has loaded
    #[wasm_bindgen(js_name = backgroundReady)]
    pub fn background_ready(&self, source: String) -> bool {
        self.renderer.background().fill(BackgroundImage { source })
    }

    /// Render the current frame as a plain JS object
    pub fn render(&self, width: f64, height: f64) -> Result<JsValue, JsValue> {
        let playhead: Playhead = self.clock.playhead();
        let frame = self.renderer.render(&self.piece, playhead, Surface::new(width, height));
        to_js(&frame)
    }
}

impl WasmPlayer {
    fn build(piece: Piece, config: RenderConfig, now_ms: f64) -> WasmPlayer {
        let clock = PlaybackClock::new(ManualTime::starting_at(seconds(now_ms)), piece.total_duration());
        WasmPlayer {
            clock,
            piece,
            renderer: Renderer::new(config),
        }
    }

    fn sync(&self, now_ms: f64) {
        self.clock.time_source().set(seconds(now_ms));
    }
}

/// Names of the embedded demo pieces as a JSON array
#[wasm_bindgen(js_name = listDemos)]
pub fn list_demos() -> String {
    serde_json::to_string(&keyfall_pieces::list_pieces()).unwrap_or_else(|_| "[]".to_string())
}

/// Load a demo piece and return it as JSON
#[wasm_bindgen(js_name = loadDemo)]
pub fn load_demo(name: &str) -> Result<String, JsValue> {
    let piece = keyfall::load_demo(name).map_err(error_to_js)?;
    serde_json::to_string(&piece).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render one paused frame of a YAML piece without creating a player
#[wasm_bindgen(js_name = renderFrame)]
pub fn render_frame(source: &str, current_time: f64, width: f64, height: f64) -> Result<JsValue, JsValue> {
    let piece = keyfall::load_piece(source).map_err(error_to_js)?;
    let frame = keyfall::render_frame(&piece, current_time, Surface::new(width, height));
    to_js(&frame)
}
