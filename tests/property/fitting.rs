//! Property-based tests for fit-to-box scaling

use agentcard::card::{fit_to_box, FitMode};
use image::{DynamicImage, Rgb, RgbImage};
use proptest::prelude::*;

fn any_mode() -> impl Strategy<Value = FitMode> {
    prop_oneof![Just(FitMode::Contain), Just(FitMode::Cover)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The fitted picture is always exactly the box size.
    #[test]
    fn test_fitted_output_has_box_dimensions(
        src_w in 1u32..300,
        src_h in 1u32..300,
        box_w in 1u32..200,
        box_h in 1u32..200,
        mode in any_mode(),
    ) {
        let picture = DynamicImage::ImageRgb8(RgbImage::from_pixel(src_w, src_h, Rgb([9, 9, 9])));
        let fitted = fit_to_box(&picture, box_w, box_h, mode, Rgb([0, 0, 0]));
        prop_assert_eq!(fitted.dimensions(), (box_w, box_h));
    }
}
