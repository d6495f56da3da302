use proptest::prelude::*;

use yoloprep::encode::encode_row;
use yoloprep::ir::{AnnotationRow, BBoxXYXY, ClassIndex, ClassRegistry, ImageDimensions};

mod proptest_helpers;
use proptest_helpers::approx_eq;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn normalization_matches_closed_form(
        (width, height) in proptest_helpers::arb_image_dims(),
        (x1, y1, x2, y2) in proptest_helpers::arb_pixel_corners(),
    ) {
        let row = AnnotationRow::new("img.jpg", "cat", BBoxXYXY::from_xyxy(x1, y1, x2, y2), 1);
        let mut registry = ClassRegistry::new();
        let label = encode_row(&row, ImageDimensions::new(width, height), &mut registry)
            .expect("non-degenerate image");

        let (w_img, h_img) = (width as f64, height as f64);
        prop_assert!(approx_eq(label.cx(), (x1 + x2) / 2.0 / w_img));
        prop_assert!(approx_eq(label.cy(), (y1 + y2) / 2.0 / h_img));
        prop_assert!(approx_eq(label.w(), (x2 - x1) / w_img));
        prop_assert!(approx_eq(label.h(), (y2 - y1) / h_img));
    }

    #[test]
    fn label_line_parses_back_to_same_values(
        (width, height) in proptest_helpers::arb_image_dims(),
        (x1, y1, x2, y2) in proptest_helpers::arb_pixel_corners(),
    ) {
        let row = AnnotationRow::new("img.jpg", "cat", BBoxXYXY::from_xyxy(x1, y1, x2, y2), 1);
        let mut registry = ClassRegistry::new();
        let label = encode_row(&row, ImageDimensions::new(width, height), &mut registry)
            .expect("non-degenerate image");

        let line = label.to_string();
        let fields: Vec<&str> = line.split(' ').collect();
        prop_assert_eq!(fields.len(), 5);
        prop_assert_eq!(fields[0], "0");
        prop_assert_eq!(fields[1].parse::<f64>().expect("cx"), label.cx());
        prop_assert_eq!(fields[4].parse::<f64>().expect("h"), label.h());
    }

    #[test]
    fn class_indices_follow_first_appearance(
        labels in proptest_helpers::arb_class_sequence(40),
    ) {
        let mut registry = ClassRegistry::new();
        let mut first_seen: Vec<String> = Vec::new();

        for label in &labels {
            let index = registry.resolve(label);
            if !first_seen.contains(label) {
                first_seen.push(label.clone());
            }
            let expected = first_seen.iter().position(|l| l == label).expect("recorded");
            prop_assert_eq!(index, ClassIndex::new(expected));
        }

        prop_assert_eq!(registry.names(), first_seen.as_slice());
    }
}
