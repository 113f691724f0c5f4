use std::path::PathBuf;

use jumpflood::config::Params;
use jumpflood::field::InputField;
use jumpflood::render;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // jumpflood [input.png] [out_dir]; with no input, a procedural demo
    // field stands in.
    let input: Option<PathBuf> = args.get(1).map(PathBuf::from);
    let out_dir: PathBuf = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    let params = Params::default();

    let (values, w, h) = match &input {
        Some(path) => {
            let img = image::open(path)
                .expect("failed to open input image")
                .to_luma8();
            let (w, h) = (img.width() as usize, img.height() as usize);
            // Bright pixels land on the non-positive (seed) side of the field.
            let values = img.pixels().map(|p| 0.5 - p.0[0] as f32 / 255.0).collect();
            (values, w, h)
        }
        None => {
            let (w, h) = (1024, 1024);
            (jumpflood::demo_field(w, h, 42), w, h)
        }
    };

    eprintln!(
        "Flooding {}x{} field (threshold={}, refine={})",
        w, h, params.threshold, params.refine
    );

    let field = InputField::from_values(values.clone(), &[h, w]).expect("invalid input field");
    let (offsets, timings) = jumpflood::compute(&field, &params);

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let save = |name: &str, rgba: &[u8], w: usize, h: usize| {
        let path = out_dir.join(name);
        image::save_buffer(&path, rgba, w as u32, h as u32, image::ColorType::Rgba8)
            .expect("failed to save image");
        eprintln!("Saved {}", path.display());
    };

    // 1. Seed mask
    save(
        "seeds.png",
        &render::render_seeds(&values, w, h, params.threshold),
        w,
        h,
    );

    // 2. Offset field as flow colors
    save("flow.png", &render::render_flow(offsets.element(0), w, h), w, h);

    // 3. Nearest-seed distance
    save(
        "distance.png",
        &render::render_magnitude(offsets.element(0), w, h),
        w,
        h,
    );

    eprintln!("\nDone.");
}
