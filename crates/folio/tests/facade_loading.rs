#![cfg(all(feature = "config", feature = "serde"))]

//! Loading configs and testimonial data through the facade, then running a
//! carousel built from them.
//!
//! Run:
//!   cargo test -p folio --test facade_loading

use std::io::Write;

use folio::prelude::*;
use folio::{load_config, testimonials_from_json};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn toml_and_json_by_extension() {
    let toml = write_temp(".toml", "autoplay_interval_ms = 1500\n");
    assert_eq!(load_config(toml.path()).expect("toml").autoplay_interval_ms, 1500);

    let json = write_temp(".JSON", r#"{"pause_on_hover": false}"#);
    assert!(!load_config(json.path()).expect("json").pause_on_hover);
}

#[test]
fn unknown_extension_is_rejected() {
    let yaml = write_temp(".yaml", "autoplay_interval_ms: 1500\n");
    let err = load_config(yaml.path()).expect_err("yaml unsupported");
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn invalid_values_surface_as_validation() {
    let toml = write_temp(".toml", "autoplay_interval_ms = 10\n");
    let err = load_config(toml.path()).expect_err("too fast");
    assert!(err.is_validation());
}

#[test]
fn malformed_testimonials_are_data_errors() {
    let err = testimonials_from_json("[{\"author\": 3}]").expect_err("author must be a string");
    assert!(matches!(err, Error::Data(_)));
}

#[test]
fn loaded_data_drives_a_carousel() {
    let config_file = write_temp(".toml", "autoplay_interval_ms = 2000\n");
    let config = load_config(config_file.path()).expect("config");
    let items = testimonials_from_json(
        r#"[
            {"author": "Ada", "content": "Sharp", "role": "CTO"},
            {"author": "Ada", "content": "Thorough", "role": "CTO"},
            {"author": "Grace", "content": "Reliable"},
            {"author": "Linus", "content": "Fast"}
        ]"#,
    )
    .expect("testimonials");

    let clock = ManualClock::new();
    let mut carousel =
        Carousel::with_parts(items, &config, clock.clone(), SmallRng::seed_from_u64(5));
    assert_eq!(carousel.order().violations(carousel.items(), true), 0);

    carousel.handle_event(&Event::Resize { height_px: 650.0 });
    assert_eq!(carousel.snapshot().visible_slice.len(), 3);

    clock.advance_ms(2000);
    assert_eq!(carousel.tick(), 1);
    assert_eq!(carousel.snapshot().live_text(), "item 2 of 4");
}
