use dcp_dehaze::image::io::{
    load_grayscale_image, load_rgb_image, save_grayscale_f32, save_rgb_u8, write_json_file,
};
use dcp_dehaze::{DehazeParams, DehazeReport, Dehazer};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DehazeToolConfig {
    pub input: PathBuf,
    /// Grayscale guide for the transmission refinement; the input's
    /// luminance when absent.
    #[serde(default)]
    pub guide: Option<PathBuf>,
    #[serde(default)]
    pub params: DehazeParams,
    pub output: DehazeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DehazeOutputConfig {
    pub image: PathBuf,
    #[serde(default)]
    pub dark_channel: Option<PathBuf>,
    #[serde(default)]
    pub transmission: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<DehazeToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let hazy = load_rgb_image(&config.input).map_err(|e| e.to_string())?;
    let dehazer = Dehazer::new(config.params.clone());
    let report = match &config.guide {
        Some(path) => {
            let guide = load_grayscale_image(path).map_err(|e| e.to_string())?;
            dehazer.process_with_diagnostics_and_guide(&hazy, &guide)
        }
        None => dehazer.process_with_diagnostics(&hazy),
    }
    .map_err(|e| e.to_string())?;

    print_text_summary(&report);
    save_artifacts(&config.output, &report).map_err(|e| e.to_string())?;
    Ok(())
}

fn save_artifacts(out: &DehazeOutputConfig, report: &DehazeReport) -> dcp_dehaze::Result<()> {
    save_rgb_u8(&report.image, &out.image)?;
    println!("Saved recovered image to {}", out.image.display());
    if let Some(path) = &out.dark_channel {
        save_grayscale_f32(&report.maps.dark_channel, 1.0, path)?;
        println!("Saved dark channel to {}", path.display());
    }
    if let Some(path) = &out.transmission {
        save_grayscale_f32(&report.maps.refined_transmission, 255.0, path)?;
        println!("Saved transmission map to {}", path.display());
    }
    if let Some(path) = &out.report_json {
        write_json_file(path, &report.trace)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn print_text_summary(report: &DehazeReport) {
    let trace = &report.trace;
    println!(
        "Input {}x{} ({:?})",
        trace.input.width, trace.input.height, trace.input.channel_order
    );
    let [a0, a1, a2] = trace.atmospheric_light.0;
    println!("Atmospheric light: [{a0:.2}, {a1:.2}, {a2:.2}]");
    println!(
        "Transmission coarse [{:.3}, {:.3}] refined [{:.3}, {:.3}], {:.1}% at floor",
        trace.coarse_transmission.min,
        trace.coarse_transmission.max,
        trace.refined_transmission.min,
        trace.refined_transmission.max,
        trace.floored_fraction * 100.0
    );
    for stage in &trace.timings.stages {
        println!("  {:<18} {:>8.2} ms", stage.label, stage.elapsed_ms);
    }
    println!("Total {:.2} ms", trace.timings.total_ms);
}

fn usage() -> String {
    "Usage: dehaze_demo <config.json>".to_string()
}
