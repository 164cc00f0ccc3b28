use image::ImageFormat;
use time::OffsetDateTime;

use super::{SearchTerm, TimeRangeSelection};

/// Chart returned by the charting site.
///
/// The bytes are treated as opaque; decoding only proves they are an image
/// and records the pixel size. The original bytes are what gets displayed
/// and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
    search_term: SearchTerm,
    selection: TimeRangeSelection,
    fetched_at: OffsetDateTime,
}

impl ChartImage {
    /// Decode `bytes` and wrap them with the request they answered.
    pub fn decode(
        bytes: Vec<u8>,
        search_term: SearchTerm,
        selection: TimeRangeSelection,
    ) -> Result<Self, image::ImageError> {
        let format = image::guess_format(&bytes)?;
        let decoded = image::load_from_memory_with_format(&bytes, format)?;

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            format,
            search_term,
            selection,
            fetched_at: OffsetDateTime::now_utc(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Preferred file extension for the detected format.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn search_term(&self) -> &SearchTerm {
        &self.search_term
    }

    pub fn selection(&self) -> &TimeRangeSelection {
        &self.selection
    }

    pub fn fetched_at(&self) -> OffsetDateTime {
        self.fetched_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("png encoding should succeed");
        cursor.into_inner()
    }

    #[test]
    fn decodes_png_and_records_size() {
        let bytes = png(6, 4);
        let chart = ChartImage::decode(
            bytes.clone(),
            SearchTerm::from("AAPL"),
            TimeRangeSelection::default(),
        )
        .expect("png should decode");

        assert_eq!(chart.format(), ImageFormat::Png);
        assert_eq!(chart.extension(), "png");
        assert_eq!(chart.dimensions(), (6, 4));
        assert_eq!(chart.bytes(), bytes.as_slice());
    }

    #[test]
    fn rejects_html_error_page() {
        let result = ChartImage::decode(
            b"<!DOCTYPE html><html><body>Not found</body></html>".to_vec(),
            SearchTerm::from("AAPL"),
            TimeRangeSelection::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_truncated_png() {
        let mut bytes = png(8, 8);
        bytes.truncate(24);
        let result = ChartImage::decode(bytes, SearchTerm::default(), TimeRangeSelection::default());
        assert!(result.is_err());
    }
}
