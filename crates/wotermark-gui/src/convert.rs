/// Decode uploaded image bytes into an egui ColorImage for the preview
/// texture.
pub fn decode_preview(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
