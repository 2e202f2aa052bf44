//! Virtual endoscope viewer

// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::error::Error;

use endo_engine::{EndoscopeApp, EndoscopeAppConfig};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(if cfg!(debug_assertions) {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        })
        .init();

    let path = match std::env::args().nth(1) {
        Some(file) => {
            tracing::info!("Reading camera path from {file}");
            read_path(&std::fs::read_to_string(&file)?)?
        }
        None => {
            tracing::info!("No path file given, using the demo path");
            demo_path()
        }
    };

    let config = EndoscopeAppConfig {
        window: endo_engine::render::window::WindowDescriptor {
            width: 1024,
            height: 720,
            title: "Virtual Endoscope".to_string(),
            ..Default::default()
        },
        path,
        ..Default::default()
    };

    let app = EndoscopeApp::new(config);

    app.run()?;

    Ok(())
}

/// Parses whitespace or comma separated `x y z` values.
fn read_path(text: &str) -> Result<Vec<f32>, std::num::ParseFloatError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// A descending spiral that branches off sideways, roughly an airway.
fn demo_path() -> Vec<f32> {
    (0..60u8)
        .flat_map(|i| {
            let t = f32::from(i) * 0.15;
            let drift = if i > 40 { f32::from(i - 40) * 1.5 } else { 0.0 };
            [8.0 * t.cos() + drift, -2.0 * f32::from(i), 8.0 * t.sin()]
        })
        .collect()
}
