#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const SIDE: usize = 28;

pub fn image_container(images: &[Vec<u8>], rows: u32, cols: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for word in [0x0000_0803u32, images.len() as u32, rows, cols] {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    for image in images {
        bytes.extend_from_slice(image);
    }
    bytes
}

pub fn label_container(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x0000_0801u32.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

/// A 28×28 image with a short horizontal bar whose row encodes the label.
pub fn digit_image(label: u8, variant: u8) -> Vec<u8> {
    let mut pixels = vec![0u8; SIDE * SIDE];
    let row = 3 + label as usize * 2;
    for col in 4..24 {
        pixels[row * SIDE + col] = 200u8.saturating_add(variant);
        pixels[(row + 1) * SIDE + col] = 255;
    }
    pixels
}

pub fn write_split(dir: &Path, sub: &str, images_name: &str, labels_name: &str, labels: &[u8]) {
    let split = dir.join(sub);
    fs::create_dir_all(&split).unwrap();
    let images: Vec<Vec<u8>> = labels
        .iter()
        .enumerate()
        .map(|(i, &l)| digit_image(l, (i % 7) as u8))
        .collect();
    fs::write(split.join(images_name), image_container(&images, SIDE as u32, SIDE as u32)).unwrap();
    fs::write(split.join(labels_name), label_container(labels)).unwrap();
}

pub fn write_testing(dir: &Path, labels: &[u8]) {
    write_split(dir, "testing", "t10k-images.idx3-ubyte", "t10k-labels.idx1-ubyte", labels);
}

pub fn write_training(dir: &Path, labels: &[u8]) {
    write_split(dir, "training", "train-images.idx3-ubyte", "train-labels.idx1-ubyte", labels);
}

pub fn all_digits(repeats: usize) -> Vec<u8> {
    (0..repeats).flat_map(|_| 0..10u8).collect()
}
