use dcp_dehaze::image::{ChannelOrder, RgbImageF32};
use dcp_dehaze::{DehazeParams, Dehazer};

fn main() {
    // Demo stub: builds a synthetic hazy gradient and runs the dehazer
    let w = 320usize;
    let h = 240usize;
    let mut img = RgbImageF32::new(w, h, ChannelOrder::Rgb);
    for y in 0..h {
        for x in 0..w {
            let haze = 200.0 * y as f32 / h as f32;
            let scene = if (x / 16 + y / 16) % 2 == 0 { 80.0 } else { 20.0 };
            img.set_pixel(x, y, [scene + haze * 0.7, scene + haze * 0.75, scene + haze * 0.8]);
        }
    }

    let dehazer = Dehazer::new(DehazeParams::default());
    match dehazer.process(&img) {
        Ok(res) => println!(
            "A={:?} latency_ms={:.3}",
            res.atmospheric_light.0, res.latency_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
