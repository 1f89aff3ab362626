//! Rendering fingerprint scene and pixel subsampling
//!
//! The drawing itself is done by the host (see
//! [`HostEnvironment::render_canvas`](crate::signal::HostEnvironment::render_canvas)).
//! This module owns the fixed scene the host must draw and the reduction of the
//! readback buffer into the short string that enters the fingerprint.

use std::f64::consts::TAU;

use dp_error::{DevprintError, Result};
use serde::Serialize;

use crate::constants::canvas as canvas_const;
use crate::signal::Signal;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour stop on a linear gradient, offset in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgb,
}

/// Linear gradient between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: &'static [ColorStop],
}

/// Fill or stroke paint
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Paint {
    Solid(Rgb),
    Linear(LinearGradient),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextBaseline {
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

/// One step of the fixed drawing, in 2D-context terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawCommand {
    SetFill(Paint),
    SetStroke(Paint),
    SetFont(&'static str),
    SetTextBaseline(TextBaseline),
    /// Rotate the current transform by the given angle in radians
    Rotate(f64),
    FillText { text: &'static str, x: f64, y: f64 },
    BeginPath,
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
    },
    Stroke,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
}

/// A drawing to rasterize onto a fresh `width` x `height` surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub commands: &'static [DrawCommand],
}

impl Scene {
    /// Expected length of an RGBA readback of this scene
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * canvas_const::BYTES_PER_PIXEL
    }
}

const GRADIENT_STOPS: [ColorStop; 3] = [
    ColorStop { offset: 0.0, color: Rgb(0xff, 0x00, 0x00) },
    ColorStop { offset: 0.5, color: Rgb(0x00, 0xff, 0x00) },
    ColorStop { offset: 1.0, color: Rgb(0x00, 0x00, 0xff) },
];

const SCENE_COMMANDS: [DrawCommand; 12] = [
    DrawCommand::SetFill(Paint::Linear(LinearGradient {
        x0: 0.0,
        y0: 0.0,
        x1: canvas_const::WIDTH as f64,
        y1: canvas_const::HEIGHT as f64,
        stops: &GRADIENT_STOPS,
    })),
    DrawCommand::SetTextBaseline(TextBaseline::Alphabetic),
    DrawCommand::SetFont(canvas_const::FONT),
    DrawCommand::Rotate(canvas_const::TEXT_ROTATION),
    DrawCommand::FillText { text: canvas_const::TEXT, x: 10.0, y: 40.0 },
    DrawCommand::Rotate(-canvas_const::TEXT_ROTATION),
    DrawCommand::SetStroke(Paint::Solid(Rgb(0x12, 0x34, 0x56))),
    DrawCommand::BeginPath,
    DrawCommand::Arc {
        x: 120.0,
        y: 30.0,
        radius: 20.0,
        start_angle: 0.0,
        end_angle: TAU,
        counter_clockwise: true,
    },
    DrawCommand::Stroke,
    DrawCommand::SetFill(Paint::Solid(Rgb(0x65, 0x43, 0x21))),
    DrawCommand::FillRect { x: 5.0, y: 5.0, width: 30.0, height: 20.0 },
];

/// The fixed scene every host rasterizes for the canvas signal
pub const FINGERPRINT_SCENE: Scene = Scene {
    width: canvas_const::WIDTH,
    height: canvas_const::HEIGHT,
    commands: &SCENE_COMMANDS,
};

/// Reduce an RGBA readback of `scene` to the canvas signal string.
///
/// Keeps every `SAMPLE_STRIDE`th byte starting at offset 0 and maps each byte
/// to the character with the same code (U+0000..=U+00FF).
pub fn subsample(scene: &Scene, pixels: &[u8]) -> Result<String> {
    if pixels.len() != scene.buffer_len() {
        return Err(DevprintError::unavailable(
            Signal::Canvas.name(),
            format!(
                "readback is {} bytes, expected {}",
                pixels.len(),
                scene.buffer_len()
            ),
        ));
    }

    Ok(pixels
        .iter()
        .step_by(canvas_const::SAMPLE_STRIDE)
        .map(|&b| char::from(b))
        .collect())
}
