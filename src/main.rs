use clap::Parser;
use log::info;
use nalgebra::{Point2, Point3, Vector2, Vector3};
use std::time::Instant;

use softraster::io::args::Args;
use softraster::material_system::materials::{BarycentricMaterial, CheckerMaterial};
use softraster::{
    Blendshape, Ellipse, Mesh, Projector, RGBColor, RasterConfig, Rect, QuadTree, ScreenTriangle,
    Shape, sort_back_to_front,
};

const TILE_SIZE: u32 = 16;

/// A textured quad behind a morphable color-ramp triangle.
fn demo_meshes(morph_weight: f32) -> (Mesh, Mesh) {
    let quad = Mesh::new(
        vec![
            Point3::new(-1.5, -1.5, 6.0),
            Point3::new(1.5, -1.5, 6.0),
            Point3::new(1.5, 1.5, 6.0),
            Point3::new(-1.5, 1.5, 6.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .with_uvs(vec![
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
        ],
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ],
    ]);

    let mut triangle = Mesh::new(
        vec![
            Point3::new(-1.0, -0.8, 4.0),
            Point3::new(1.0, -0.8, 4.0),
            Point3::new(0.0, 1.2, 4.0),
        ],
        vec![[0, 1, 2]],
    );
    if morph_weight != 0.0 {
        let morph = Blendshape::new(
            vec![0, 1, 2],
            vec![
                Vector3::new(-0.5, -0.5, 0.0),
                Vector3::new(0.5, -0.5, 0.0),
                Vector3::new(0.0, 0.8, 0.0),
            ],
        )
        .with_weight(morph_weight);
        morph.apply(&mut triangle.vertices);
        triangle.recompute_normals();
    }

    (quad, triangle)
}

/// Painter's-style rasterization over quadtree-culled tiles.
fn render(
    triangles: &[ScreenTriangle<'_>],
    config: &RasterConfig,
    mask: Option<&Ellipse>,
) -> Vec<u8> {
    let width = config.output.width;
    let height = config.output.height;
    let half_w = config.output.view_size / 2.0;
    let half_h = half_w * height as f32 / width as f32;
    let view = Rect::new(Point2::new(-half_w, -half_h), Point2::new(half_w, half_h));
    let pixel_w = view.width() / width as f32;
    let pixel_h = view.height() / height as f32;

    let mut tree = QuadTree::new(view);
    for (id, triangle) in triangles.iter().enumerate() {
        tree.insert(id, *triangle.bounds());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    for tile_y in (0..height).step_by(TILE_SIZE as usize) {
        for tile_x in (0..width).step_by(TILE_SIZE as usize) {
            let tile_max_x = (tile_x + TILE_SIZE).min(width);
            let tile_max_y = (tile_y + TILE_SIZE).min(height);
            let tile_rect = Rect::new(
                Point2::new(
                    view.min.x + tile_x as f32 * pixel_w,
                    view.max.y - tile_max_y as f32 * pixel_h,
                ),
                Point2::new(
                    view.min.x + tile_max_x as f32 * pixel_w,
                    view.max.y - tile_y as f32 * pixel_h,
                ),
            );

            let mut candidates = tree.query(&tile_rect);
            if candidates.is_empty() {
                continue;
            }
            // The input is sorted back-to-front, so ascending ids keep the
            // painter's order inside the tile.
            candidates.sort_unstable();

            for py in tile_y..tile_max_y {
                for px in tile_x..tile_max_x {
                    let x = view.min.x + (px as f32 + 0.5) * pixel_w;
                    let y = view.max.y - (py as f32 + 0.5) * pixel_h;
                    if let Some(mask) = mask {
                        if !mask.is_in_shape(&Point2::new(x, y)) {
                            continue;
                        }
                    }
                    for &id in &candidates {
                        let triangle = &triangles[id];
                        if let Some(point) = triangle.surface_point(x, y) {
                            let color = triangle.material().shade(&point);
                            let offset = ((py * width + px) * 3) as usize;
                            buffer[offset] = color.r;
                            buffer[offset + 1] = color.g;
                            buffer[offset + 2] = color.b;
                        }
                    }
                }
            }
        }
    }

    buffer
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let mut config = match &args.config {
        Some(path) => RasterConfig::load_from_file(path)?,
        None => RasterConfig::default(),
    };
    if let Some(width) = args.width {
        config.output.width = width;
    }
    if let Some(height) = args.height {
        config.output.height = height;
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }

    let (quad, triangle) = demo_meshes(args.morph);

    let checker = CheckerMaterial::new(
        RGBColor::new(230, 230, 230),
        RGBColor::new(60, 60, 170),
        8.0,
    );
    let ramp = BarycentricMaterial::new(RGBColor::RED, RGBColor::GREEN, RGBColor::BLUE);

    let camera = config.camera();
    let projector = Projector::from_config(&config);

    // Freeze the frame's inputs, then project. The borrows taken here pin
    // the meshes immutable until the projected set is dropped.
    let quad_triangles = quad.triangles();
    let tri_triangles = triangle.triangles();

    let project_start = Instant::now();
    let mut projected = projector.project_batch(&camera, &quad_triangles, &checker);
    projected.extend(projector.project_batch(&camera, &tri_triangles, &ramp));
    sort_back_to_front(&mut projected);
    info!(
        "projected {} triangles in {:?}",
        projected.len(),
        project_start.elapsed()
    );

    let mask = args.mask.then(|| {
        Ellipse::new(
            Point2::new(0.0, 0.0),
            Vector2::new(
                config.output.view_size * 0.9,
                config.output.view_size * 0.7,
            ),
            20.0,
        )
    });

    let raster_start = Instant::now();
    let buffer = render(&projected, &config, mask.as_ref());
    info!("rasterized in {:?}", raster_start.elapsed());

    image::save_buffer(
        &config.output.path,
        &buffer,
        config.output.width,
        config.output.height,
        image::ColorType::Rgb8,
    )
    .map_err(|e| format!("failed to save image: {e}"))?;

    info!(
        "wrote {} ({}x{}) in {:?} total",
        config.output.path,
        config.output.width,
        config.output.height,
        start.elapsed()
    );
    Ok(())
}
