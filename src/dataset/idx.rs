//! Decoding of the big-endian IDX containers the digit dataset ships in.
//!
//! # Image container
//! ```text
//! bytes  0-3:   tag         (0x00000803, big-endian u32)
//! bytes  4-7:   N           (number of images)
//! bytes  8-11:  rows
//! bytes 12-15:  cols
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # Label container
//! ```text
//! bytes  0-3:   tag         (0x00000801)
//! bytes  4-7:   N           (number of labels)
//! bytes  8..:   N bytes, each a class index
//! ```

use crate::error::{NeuroError, Result};

pub const IMAGE_TAG: u32 = 0x0000_0803;
pub const LABEL_TAG: u32 = 0x0000_0801;

const IMAGE_HEADER_LEN: usize = 16;
const LABEL_HEADER_LEN: usize = 8;

/// Decoded image container, pixels already rescaled to `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdxImages {
    pub rows: usize,
    pub cols: usize,
    pub images: Vec<Vec<f64>>,
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3],
    ])
}

/// Parses an image container named `file` (used in error messages).
pub fn parse_images(bytes: &[u8], file: &str) -> Result<IdxImages> {
    if bytes.len() < IMAGE_HEADER_LEN {
        return Err(NeuroError::malformed(file, format!(
            "expected at least {} header bytes, got {}",
            IMAGE_HEADER_LEN,
            bytes.len()
        )));
    }

    let tag = read_u32(bytes, 0);
    if tag != IMAGE_TAG {
        return Err(NeuroError::malformed(file, format!(
            "format tag must be {:#010x}, got {:#010x}",
            IMAGE_TAG, tag
        )));
    }

    let n_items = read_u32(bytes, 4) as usize;
    let rows = read_u32(bytes, 8) as usize;
    let cols = read_u32(bytes, 12) as usize;

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        NeuroError::malformed(file, format!("rows * cols overflows (rows={}, cols={})", rows, cols))
    })?;
    let data_len = n_items.checked_mul(n_pixels).ok_or_else(|| {
        NeuroError::malformed(file, format!(
            "n_items * n_pixels overflows (n_items={}, n_pixels={})",
            n_items, n_pixels
        ))
    })?;

    let available = bytes.len() - IMAGE_HEADER_LEN;
    if available < data_len {
        return Err(NeuroError::malformed(file, format!(
            "header declares {} items of {}×{} pixels ({} bytes) but only {} bytes follow",
            n_items, rows, cols, data_len, available
        )));
    }

    let images = if n_pixels == 0 {
        vec![Vec::new(); n_items]
    } else {
        bytes[IMAGE_HEADER_LEN..IMAGE_HEADER_LEN + data_len]
            .chunks_exact(n_pixels)
            .map(|chunk| chunk.iter().map(|&px| px as f64 / 255.0).collect())
            .collect()
    };

    Ok(IdxImages { rows, cols, images })
}

/// Parses a label container; every label must be below `n_classes`.
pub fn parse_labels(bytes: &[u8], file: &str, n_classes: usize) -> Result<Vec<u8>> {
    if bytes.len() < LABEL_HEADER_LEN {
        return Err(NeuroError::malformed(file, format!(
            "expected at least {} header bytes, got {}",
            LABEL_HEADER_LEN,
            bytes.len()
        )));
    }

    let tag = read_u32(bytes, 0);
    if tag != LABEL_TAG {
        return Err(NeuroError::malformed(file, format!(
            "format tag must be {:#010x}, got {:#010x}",
            LABEL_TAG, tag
        )));
    }

    let n_items = read_u32(bytes, 4) as usize;
    let available = bytes.len() - LABEL_HEADER_LEN;
    if available < n_items {
        return Err(NeuroError::malformed(file, format!(
            "header declares {} labels but only {} bytes follow",
            n_items, available
        )));
    }

    let labels = bytes[LABEL_HEADER_LEN..LABEL_HEADER_LEN + n_items].to_vec();
    if let Some((i, &bad)) = labels.iter().enumerate().find(|&(_, &l)| l as usize >= n_classes) {
        return Err(NeuroError::malformed(file, format!(
            "label at index {} is {}, outside 0..{}",
            i, bad, n_classes
        )));
    }

    Ok(labels)
}
