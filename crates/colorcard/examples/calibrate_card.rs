//! Calibrate a photo against the reference card visible in it.
//!
//! Usage: `calibrate_card <config.json>`
//!
//! ```json
//! {
//!   "image": "card.jpg",
//!   "output_image": "card_corrected.png",
//!   "output_report": "card_report.json",
//!   "corners": { "a": [426, 2083], "b": [2479, 2098], "c": [2485, 692], "d": [438, 773] },
//!   "reference": [[115, 82, 68], [194, 150, 130], ...],
//!   "layout": { "rows": 4, "cols": 6 }
//! }
//! ```

use colorcard::calib::apply_matrix;
use colorcard::{calibrate_from_card, CardCorners, CardLayout, Color};
use serde::Deserialize;
use std::path::PathBuf;

#[cfg(feature = "tracing")]
use colorcard::core::init_tracing;

#[derive(Debug, Deserialize)]
struct DemoConfig {
    image: PathBuf,
    output_image: Option<PathBuf>,
    output_report: Option<PathBuf>,
    corners: CardCorners,
    reference: Vec<Color>,
    #[serde(default)]
    layout: CardLayout,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    colorcard::core::init_with_level(log::LevelFilter::Info)?;

    let Some(config_path) = std::env::args().nth(1) else {
        eprintln!("Usage: calibrate_card <config.json>");
        return Ok(());
    };
    let config: DemoConfig = serde_json::from_str(&std::fs::read_to_string(config_path)?)?;

    let photo = image::open(&config.image)?;
    let img = colorcard::image::rgb_image_from_dynamic(&photo)?;
    println!(
        "loaded {} ({}x{})",
        config.image.display(),
        img.width(),
        img.height()
    );

    let calib = calibrate_from_card(
        &img.view(),
        &config.corners,
        &config.reference,
        &config.layout,
    )?;
    let pairs = calib.measurement.colors.iter().zip(&config.reference);
    for (i, (measured, want)) in pairs.enumerate() {
        println!(
            "patch {i:2}: measured [{:3.0} {:3.0} {:3.0}]  reference [{:3.0} {:3.0} {:3.0}]",
            measured.r, measured.g, measured.b, want.r, want.g, want.b
        );
    }
    println!("matrix: {:?}", calib.matrix.to_array());
    let [r, g, b] = calib.residuals.rms;
    println!(
        "rms: [{r:.2}, {g:.2}, {b:.2}], max: {:.2}",
        calib.residuals.max_abs
    );

    if let Some(path) = &config.output_report {
        std::fs::write(path, serde_json::to_string_pretty(&calib)?)?;
        println!("wrote {}", path.display());
    }
    if let Some(path) = &config.output_image {
        let corrected = apply_matrix(&img.view(), &calib.matrix)?;
        colorcard::image::to_rgb8(&corrected)?.save(path)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
