//! Image format regression test
//!
//! Writes RGBA fixtures in every supported format, reads them back and
//! checks the pixels survive, including partially transparent ones.
//!
//! Run with:
//! ```
//! cargo test -p alphaseg-io --test ioformats_reg
//! ```

use alphaseg_core::{AlphaView, RgbaImage, color};
use alphaseg_io::{
    FileCodec, ImageCodec, ImageFormat, IoError, detect_format, read_image, write_image,
};
use alphaseg_test::{RegParams, image_from_ascii, init_logging, sprite_sheet};

fn gradient(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let a = ((x + y * width) * 255 / (width * height - 1)) as u8;
            img.set_pixel_unchecked(x, y, color::compose_rgba(x as u8 * 10, y as u8 * 20, 77, a));
        }
    }
    img
}

#[test]
fn ioformats_reg() {
    init_logging();
    let mut rp = RegParams::new("ioformats");
    let dir = tempfile::tempdir().unwrap();

    let fixtures = [
        ("sheet", sprite_sheet(12, 9, &[(1, 1, 3, 3), (6, 4, 5, 4)]).unwrap()),
        ("ascii", image_from_ascii(&["#+-.", ".-+#", "##.."]).unwrap()),
        ("gradient", gradient(7, 5)),
    ];

    for (name, img) in &fixtures {
        for format in [ImageFormat::Png, ImageFormat::Bmp] {
            let path = dir.path().join(format!("{}.{}", name, format.extension()));
            write_image(img, &path, format).unwrap();
            rp.compare_values(1.0, (detect_format(&path).unwrap() == format) as u8 as f64, 0.0);

            let back = read_image(&path).unwrap();
            rp.compare_images(img, &back);
        }
    }

    assert!(rp.cleanup(), "ioformats regression test failed");
}

#[test]
fn ioformats_codec_by_extension() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let img = image_from_ascii(&["#.", "+#"]).unwrap();

    // Extension picks the encoder, magic bytes pick the decoder
    for name in ["a.png", "b.PNG", "c.bmp"] {
        let path = dir.path().join(name);
        FileCodec.encode(&img, &path).unwrap();
        let back = FileCodec.decode(&path).unwrap();
        assert_eq!(back.alpha(0, 1), 128, "{name}");
        assert_eq!(back, img, "{name}");
    }

    // A misleading extension on input does not matter
    let disguised = dir.path().join("really_png.bmp");
    write_image(&img, &disguised, ImageFormat::Png).unwrap();
    assert_eq!(FileCodec.decode(&disguised).unwrap(), img);

    // No encoder for these: nothing is created
    for name in ["d.xyz", "e.jpg", "noext"] {
        let path = dir.path().join(name);
        let err = FileCodec.encode(&img, &path).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)), "{name}");
        assert!(!path.exists(), "{name}");
    }
}
