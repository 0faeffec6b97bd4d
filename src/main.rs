use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::Vec3A;
use log::{info, warn};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use whitted::camera::Camera;
use whitted::loader::load_scene;
use whitted::output::save_image;
use whitted::tracer::Tracer;

fn vec3(values: &[f32]) -> Vec3A {
    Vec3A::from_slice(values)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("Whitted - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let mut scene = load_scene(&args.scene).with_context(|| format!("loading {}", args.scene.display()))?;
    if let Some(fov) = args.fov {
        scene = scene.with_fov(fov);
    }
    if let Some(background) = &args.background {
        scene = scene.with_background(vec3(background));
    }

    if args.area_shadows {
        warn!("Area shadows requested; light radii are ignored and shadows stay hard");
    }

    let camera = Camera {
        image_width: args.width,
        image_height: args.height,
        fov: scene.fov,
        eye: vec3(&args.eye),
        rotation: vec3(&args.rotation),
        alias_rays: args.alias_rays,
        ..Camera::new()
    };
    let tracer = Tracer::new(&scene).with_max_depth(args.max_depth);

    if let Some(pixel) = &args.pick {
        let (x, y) = (pixel[0], pixel[1]);
        if x >= args.width || y >= args.height {
            bail!("pick pixel {},{} lies outside the {}x{} image", x, y, args.width, args.height);
        }
        let traced = camera.pick(&tracer, x, y);
        info!("Pixel {},{}: hit = {}, colour = {}", x, y, traced.hit, traced.color);
        return Ok(());
    }

    info!(
        "Image resolution: {}x{}, field of view: {} degrees, max depth: {}",
        args.width,
        args.height,
        scene.fov,
        tracer.max_depth()
    );

    let image = camera.render(&tracer);
    save_image(&image, &args.output).with_context(|| format!("writing {}", args.output.display()))?;

    Ok(())
}
