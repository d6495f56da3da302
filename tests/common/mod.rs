#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Writes `images/<name>` for every name, all with the same dimensions.
pub fn write_images(root: &Path, names: &[String], width: u32, height: u32) {
    for name in names {
        write_bmp(&root.join("images").join(name), width, height);
    }
}

/// Writes `annotations.csv` from `(image, class, bbox literal)` rows.
pub fn write_table(root: &Path, rows: &[(&str, &str, &str)]) {
    let mut table = String::new();
    for (image, class, bbox) in rows {
        table.push_str(&format!("{image}\t{class}\t{bbox}\n"));
    }
    fs::write(root.join("annotations.csv"), table).expect("write annotations");
}

/// `n` image names, one box per image, classes cycling through `classes`.
pub fn corpus(n: usize, classes: &[&str]) -> (Vec<String>, String) {
    let names: Vec<String> = (0..n).map(|i| format!("img_{i:04}.bmp")).collect();
    let mut table = String::new();
    for (i, name) in names.iter().enumerate() {
        let class = classes[i % classes.len()];
        table.push_str(&format!("{name}\t{class}\t(1, 2, 3, 4)\n"));
    }
    (names, table)
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read file")
        .lines()
        .map(str::to_string)
        .collect()
}
