use crate::error::RenderError;
use image::ImageBuffer;
use log::info;
use std::path::Path;

/// Saves a u32 (0RGB) buffer to disk. The format follows the file extension
/// (`.bmp`, `.png`, ...).
pub fn save_buffer_to_image<P: AsRef<Path>>(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<(), RenderError> {
    let path_ref = path.as_ref();
    let save_error = |reason: String| RenderError::ImageSave {
        path: path_ref.display().to_string(),
        reason,
    };

    if buffer.len() != width * height {
        return Err(save_error(format!(
            "buffer holds {} pixels, expected {}x{}",
            buffer.len(),
            width,
            height
        )));
    }

    let mut img_buf = ImageBuffer::new(width as u32, height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let idx = (y as usize) * width + (x as usize);
        let color_u32 = buffer[idx];

        let r = ((color_u32 >> 16) & 0xFF) as u8;
        let g = ((color_u32 >> 8) & 0xFF) as u8;
        let b = (color_u32 & 0xFF) as u8;

        *pixel = image::Rgb([r, g, b]);
    }

    img_buf.save(path_ref).map_err(|e| save_error(e.to_string()))?;
    info!("Saved {}x{} image to {:?}", width, height, path_ref);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_and_reloads_bmp() {
        let path = std::env::temp_dir().join("soft_rasterizer_save_test.bmp");
        let buffer = vec![0x00FF0000, 0x0000FF00, 0x000000FF, 0x00FFFFFF];
        save_buffer_to_image(&buffer, 2, 2, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 255]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let path = std::env::temp_dir().join("soft_rasterizer_bad.png");
        let err = save_buffer_to_image(&[0u32; 3], 2, 2, &path).unwrap_err();
        assert!(matches!(err, RenderError::ImageSave { .. }));
    }
}
