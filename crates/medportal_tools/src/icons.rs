//! App icon rasterization.
//!
//! # Responsibility
//! - Produce `icon-<size>.png` for each configured size, fit-contained on a
//!   transparent square canvas.
//! - Produce `icon-512-maskable.png`: a scaled copy centered on an opaque
//!   square background.
//!
//! # Invariants
//! - Square resizes run concurrently and are all joined before the maskable
//!   step starts.
//! - Any failed output fails the whole run.

use image::imageops::{overlay, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ICON_SIZES: [u32; 7] = [72, 96, 128, 144, 192, 384, 512];
pub const MASKABLE_FILE_NAME: &str = "icon-512-maskable.png";
const MASKABLE_SIZE: u32 = 512;
const MASKABLE_SCALE: f32 = 0.8;
const MASKABLE_BACKGROUND: [u8; 4] = [0x0b, 0x53, 0x94, 0xff];

#[derive(Debug)]
pub enum IconError {
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// A resize worker panicked before reporting.
    WorkerPanicked(u32),
    InvalidPlan(String),
}

impl Display for IconError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "failed to read source image `{}`: {source}", path.display())
            }
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create output directory `{}`: {source}",
                path.display()
            ),
            Self::Encode { path, source } => {
                write!(f, "failed to write icon `{}`: {source}", path.display())
            }
            Self::WorkerPanicked(size) => write!(f, "resize worker for size {size} panicked"),
            Self::InvalidPlan(message) => write!(f, "invalid icon plan: {message}"),
        }
    }
}

impl Error for IconError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::CreateDir { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Output sizes and maskable styling.
#[derive(Debug, Clone, PartialEq)]
pub struct IconPlan {
    pub sizes: Vec<u32>,
    pub maskable_scale: f32,
    pub maskable_background: [u8; 4],
}

impl Default for IconPlan {
    fn default() -> Self {
        Self {
            sizes: ICON_SIZES.to_vec(),
            maskable_scale: MASKABLE_SCALE,
            maskable_background: MASKABLE_BACKGROUND,
        }
    }
}

impl IconPlan {
    fn validate(&self) -> Result<(), IconError> {
        if self.sizes.iter().any(|size| *size == 0) {
            return Err(IconError::InvalidPlan("size must be positive".to_string()));
        }
        if !(self.maskable_scale > 0.0 && self.maskable_scale <= 1.0) {
            return Err(IconError::InvalidPlan(format!(
                "maskable scale must be in (0, 1], got {}",
                self.maskable_scale
            )));
        }
        Ok(())
    }
}

/// Generates the default icon set. Returns written paths, maskable last.
pub fn generate_icons(source: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, IconError> {
    generate_icons_with(source, out_dir, &IconPlan::default())
}

pub fn generate_icons_with(
    source: &Path,
    out_dir: &Path,
    plan: &IconPlan,
) -> Result<Vec<PathBuf>, IconError> {
    plan.validate()?;
    let image = image::open(source).map_err(|source_err| IconError::Decode {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    std::fs::create_dir_all(out_dir).map_err(|err| IconError::CreateDir {
        path: out_dir.to_path_buf(),
        source: err,
    })?;

    let results: Vec<Result<PathBuf, IconError>> = std::thread::scope(|scope| {
        let workers: Vec<_> = plan
            .sizes
            .iter()
            .map(|&size| {
                let image = &image;
                let target = out_dir.join(format!("icon-{size}.png"));
                (size, scope.spawn(move || write_contained(image, size, target)))
            })
            .collect();
        workers
            .into_iter()
            .map(|(size, handle)| {
                handle
                    .join()
                    .unwrap_or(Err(IconError::WorkerPanicked(size)))
            })
            .collect()
    });

    let mut written = Vec::with_capacity(results.len() + 1);
    for result in results {
        match result {
            Ok(path) => written.push(path),
            Err(err) => {
                error!("event=icon_resize module=tools status=error error={}", err);
                return Err(err);
            }
        }
    }

    written.push(write_maskable(&image, plan, out_dir.join(MASKABLE_FILE_NAME))?);
    info!(
        "event=icons_generated module=tools status=ok count={} out_dir={}",
        written.len(),
        out_dir.display()
    );
    Ok(written)
}

/// Scales `image` to fit `side`, centered on a transparent square.
fn contain(image: &DynamicImage, side: u32, background: Rgba<u8>) -> RgbaImage {
    let resized = image.resize(side, side, FilterType::Lanczos3).to_rgba8();
    let mut canvas = RgbaImage::from_pixel(side, side, background);
    let x = i64::from((side - resized.width()) / 2);
    let y = i64::from((side - resized.height()) / 2);
    overlay(&mut canvas, &resized, x, y);
    canvas
}

fn write_contained(image: &DynamicImage, size: u32, target: PathBuf) -> Result<PathBuf, IconError> {
    let canvas = contain(image, size, Rgba([0, 0, 0, 0]));
    save_png(&canvas, target)
}

fn write_maskable(image: &DynamicImage, plan: &IconPlan, target: PathBuf) -> Result<PathBuf, IconError> {
    let background = Rgba(plan.maskable_background);
    let inner_side = ((MASKABLE_SIZE as f32) * plan.maskable_scale).round().max(1.0) as u32;
    let inner = image.resize(inner_side, inner_side, FilterType::Lanczos3).to_rgba8();

    let mut canvas = RgbaImage::from_pixel(MASKABLE_SIZE, MASKABLE_SIZE, background);
    let x = i64::from((MASKABLE_SIZE - inner.width()) / 2);
    let y = i64::from((MASKABLE_SIZE - inner.height()) / 2);
    overlay(&mut canvas, &inner, x, y);
    save_png(&canvas, target)
}

fn save_png(canvas: &RgbaImage, target: PathBuf) -> Result<PathBuf, IconError> {
    canvas
        .save_with_format(&target, ImageFormat::Png)
        .map_err(|source| IconError::Encode {
            path: target.clone(),
            source,
        })?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::{contain, IconPlan};
    use image::{DynamicImage, Rgba, RgbaImage};

    #[test]
    fn contain_keeps_aspect_ratio_with_transparent_bars() {
        let wide = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 255])));
        let canvas = contain(&wide, 20, Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.dimensions(), (20, 20));
        assert_eq!(canvas.get_pixel(10, 0)[3], 0);
        assert_eq!(canvas.get_pixel(10, 10)[3], 255);
    }

    #[test]
    fn plan_rejects_out_of_range_scale() {
        let plan = IconPlan {
            maskable_scale: 1.5,
            ..IconPlan::default()
        };
        assert!(plan.validate().is_err());
    }
}
