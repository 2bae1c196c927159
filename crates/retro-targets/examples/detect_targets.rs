use image::ImageReader;
use retro_targets::detect;
use retro_targets::detector::NoMatchPolicy;
use retro_targets::TargetDetectorParams;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: detect_targets <image_path>");
        return Ok(());
    };

    let img = ImageReader::open(path)?.decode()?.to_rgb8();

    let mut params = TargetDetectorParams::centered_for_width(img.width() as usize);
    params.identify.no_match_policy = NoMatchPolicy::NextRanked;

    let result = detect::detect_targets(&img, params)?;
    println!(
        "{} contours, {} filtered, {} candidates",
        result.contours.len(),
        result.filtered.len(),
        result.candidates.len()
    );
    match result.pair() {
        Some(pair) => {
            let (left, right) = pair.left_right();
            println!(
                "pair at x={:.1} / x={:.1} ({:?}), offset {:.2} px",
                left.center_x(),
                right.center_x(),
                pair.confidence,
                result.offset.pixels_or_zero()
            );
        }
        None => println!("no target pair: {:?}", result.identification),
    }

    Ok(())
}
