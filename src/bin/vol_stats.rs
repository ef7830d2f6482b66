use drrcast::core::volume::ImageVolume;
use drrcast::volumes::grid_image::GridImage;
use drrcast::volumes::volume_stats;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <volume.vol>", args[0]);
        std::process::exit(1);
    }

    let image = GridImage::from_file(&args[1]).unwrap_or_else(|e| {
        eprintln!("failed to read {}: {}", args[1], e);
        std::process::exit(1);
    });

    let size = image.size();
    let spacing = image.spacing();
    let origin = image.origin();
    println!("Size: {}x{}x{} ({} voxels)", size[0], size[1], size[2], image.voxel_count());
    println!("Spacing: {:.6}, {:.6}, {:.6}", spacing.x, spacing.y, spacing.z);
    println!("Origin: {:.6}, {:.6}, {:.6}", origin.x, origin.y, origin.z);

    match volume_stats(&image) {
        Some(stats) => {
            println!("Min: {:.6}", stats.min);
            println!("Max: {:.6}", stats.max);
            println!("Mean: {:.6}", stats.mean);
        }
        None => println!("Volume is empty."),
    }
}
