use std::net::SocketAddr;

use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use jumpflood::config::Params;
use jumpflood::field::InputField;
use jumpflood::render;

#[derive(Deserialize)]
struct FloodRequest {
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    threshold: Option<f32>,
    refine: Option<bool>,
}

#[derive(Serialize)]
struct FloodResponse {
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> String {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .expect("PNG encode failed");
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    format!("data:image/png;base64,{}", b64)
}

async fn flood_handler(Json(req): Json<FloodRequest>) -> Json<FloodResponse> {
    let seed = req.seed.unwrap_or(42);
    let width = req.width.unwrap_or(1024);
    let height = req.height.unwrap_or(512);

    let defaults = Params::default();
    let threshold = req.threshold.unwrap_or(defaults.threshold);
    let refine = req.refine.unwrap_or(defaults.refine);

    let response = tokio::task::spawn_blocking(move || {
        let params = Params { threshold, refine };
        let values = jumpflood::demo_field(width, height, seed);
        let field = InputField::from_values(values.clone(), &[height, width])
            .expect("demo field shape is always canonical");
        let (offsets, timings) = jumpflood::compute(&field, &params);

        let layers = vec![
            Layer {
                name: "seeds".into(),
                data_url: encode_png(
                    &render::render_seeds(&values, width, height, threshold),
                    width,
                    height,
                ),
            },
            Layer {
                name: "flow".into(),
                data_url: encode_png(
                    &render::render_flow(offsets.element(0), width, height),
                    width,
                    height,
                ),
            },
            Layer {
                name: "distance".into(),
                data_url: encode_png(
                    &render::render_magnitude(offsets.element(0), width, height),
                    width,
                    height,
                ),
            },
        ];

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        FloodResponse {
            layers,
            timings: timing_entries,
            width,
            height,
        }
    })
    .await
    .unwrap();

    Json(response)
}

#[tokio::main]
async fn main() {
    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/flood", post(flood_handler))
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    eprintln!("jumpflood server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
