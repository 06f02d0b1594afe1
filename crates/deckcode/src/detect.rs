use crate::core::{GrayImage, GrayImageView, BLACK, WHITE};
use crate::print::{render_deck, PrintError, PrintSpec};
use crate::scan::{DeckScan, DeckScanner, RowTrace, ScanConfig, ScanIoError};
use crate::{Card, Codebook};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("failed to load image {path}: {source}")]
    Load {
        path: String,
        source: ::image::ImageError,
    },

    #[error(transparent)]
    Save(#[from] ::image::ImageError),

    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("image dimensions {width}x{height} do not fit in u32")]
    InvalidGrayDimensions { width: usize, height: usize },

    #[error("row {row} is outside the image (height {height})")]
    RowOutOfRange { row: usize, height: usize },

    #[error(transparent)]
    ScanIo(#[from] ScanIoError),

    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Borrow an `image::GrayImage` as a `deckcode-core` view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Binarize an `image::GrayImage`: pixels `>= threshold` become paper.
pub fn binarize(img: &::image::GrayImage, threshold: u8) -> GrayImage {
    let view = gray_view(img);
    GrayImage {
        width: view.width,
        height: view.height,
        data: view.data.to_vec(),
    }
    .threshold(threshold)
}

/// Convert a `deckcode-core` image back into an `image::GrayImage`.
pub fn to_image(img: &GrayImage) -> Result<::image::GrayImage, DetectError> {
    let (Ok(width), Ok(height)) = (u32::try_from(img.width), u32::try_from(img.height)) else {
        return Err(DetectError::InvalidGrayDimensions {
            width: img.width,
            height: img.height,
        });
    };
    let got = img.data.len();
    ::image::GrayImage::from_raw(width, height, img.data.clone()).ok_or(
        DetectError::InvalidGrayBuffer {
            expected: img.width * img.height,
            got,
        },
    )
}

/// Open an image file as 8-bit grayscale.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, DetectError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| DetectError::Load {
        path: path.display().to_string(),
        source,
    })?;
    let img = img.to_luma8();
    log::info!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}

/// Binarize and scan a cropped deck image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, scanner), fields(width = img.width(), height = img.height()))
)]
pub fn scan_image(img: &::image::GrayImage, threshold: u8, scanner: &DeckScanner) -> DeckScan {
    let binary = binarize(img, threshold);
    scanner.scan(&binary.view())
}

/// Binarize one image row and keep every intermediate decode measurement.
pub fn trace_image_row(
    img: &::image::GrayImage,
    threshold: u8,
    scanner: &DeckScanner,
    row: usize,
) -> Result<RowTrace, DetectError> {
    let view = gray_view(img);
    if row >= view.height {
        return Err(DetectError::RowOutOfRange {
            row,
            height: view.height,
        });
    }
    let pixels: Vec<u8> = view
        .row(row)
        .iter()
        .map(|&v| if v >= threshold { WHITE } else { BLACK })
        .collect();
    Ok(scanner.trace_row(&pixels))
}

/// Run a [`ScanConfig`] end-to-end: load, binarize, scan.
pub fn scan_path(cfg: &ScanConfig) -> Result<DeckScan, DetectError> {
    let scanner = cfg.build_scanner()?;
    let img = load_gray(&cfg.image_path)?;
    Ok(scan_image(&img, cfg.threshold, &scanner))
}

/// Render `cards` with `codebook` and save the result as an image file.
pub fn save_rendered_deck(
    cards: &[Card],
    codebook: &Codebook,
    spec: &PrintSpec,
    path: impl AsRef<Path>,
) -> Result<(), DetectError> {
    let img = render_deck(cards, codebook, spec)?;
    to_image(&img)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canonical_order;

    #[test]
    fn binarize_maps_to_black_and_white() {
        let img = ::image::GrayImage::from_raw(4, 1, vec![0, 127, 128, 250]).unwrap();
        let bin = binarize(&img, 128);
        assert_eq!(bin.data, vec![0, 0, 255, 255]);
    }

    #[test]
    fn image_round_trip_keeps_pixels() {
        let img = GrayImage::new(3, 2, vec![0, 255, 0, 255, 0, 255]).unwrap();
        let converted = to_image(&img).unwrap();
        assert_eq!(converted.as_raw(), &img.data);
        assert_eq!(gray_view(&converted).row(1), &[255, 0, 255]);
    }

    #[test]
    fn saved_png_scans_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.png");
        let book = Codebook::generate().unwrap();
        let cards: Vec<Card> = canonical_order()
            .into_iter()
            .filter(|card| book.encode(*card).is_printable())
            .collect();
        save_rendered_deck(&cards, &book, &PrintSpec::default(), &path).unwrap();

        let cfg = ScanConfig::new(path.to_string_lossy());
        let scan = scan_path(&cfg).unwrap();
        assert_eq!(scan.deck, cards);
    }

    #[test]
    fn traced_row_is_thresholded_first() {
        let book = Codebook::generate().unwrap();
        let four = Card::new(3, 0).unwrap();
        let rendered = render_deck(&[four], &book, &PrintSpec::default()).unwrap();
        let grey: Vec<u8> = rendered
            .data
            .iter()
            .map(|&v| if v == WHITE { 190 } else { 40 })
            .collect();
        let img = ::image::GrayImage::from_raw(
            rendered.width as u32,
            rendered.height as u32,
            grey,
        )
        .unwrap();

        let scanner = DeckScanner::new(book, Default::default());
        let trace = trace_image_row(&img, 128, &scanner, 2).unwrap();
        assert_eq!(trace.outcome, Ok(four));

        let err = trace_image_row(&img, 128, &scanner, rendered.height).unwrap_err();
        assert!(matches!(
            err,
            DetectError::RowOutOfRange { row: 6, height: 6 }
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_gray("/nonexistent/deck.png").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/deck.png"));
    }
}
