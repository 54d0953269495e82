use pageshot_core::{
    build_args, Dimension, Format, JobDescription, JpgOptions, Network, NetworkThrottle,
    OneOrMany, Orientation, PdfOptions,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const URL: &str = "http://www.test.com";

fn job() -> JobDescription {
    JobDescription::new(URL, Dimension::Pixels(1920))
}

/// Expected flags followed by the two positional arguments of `job()`.
fn with_target(flags: &[&str]) -> Vec<String> {
    flags
        .iter()
        .copied()
        .chain([URL, "1920"])
        .map(str::to_string)
        .collect()
}

fn strings(values: &[&str]) -> OneOrMany<String> {
    OneOrMany::Many(values.iter().map(|v| v.to_string()).collect())
}

#[test]
fn url_and_width_only() {
    assert_eq!(build_args(&job()), vec![URL, "1920"]);
}

#[test]
fn url_width_and_height() {
    let mut job = job();
    job.height = Some(Dimension::Pixels(1080));
    assert_eq!(build_args(&job), vec![URL, "1920x1080"]);
}

#[test]
fn named_width_is_forwarded() {
    let job = JobDescription::new(URL, Dimension::Named("iPhone".into()));
    assert_eq!(build_args(&job), vec![URL, "iPhone"]);
}

#[test]
fn cookie() {
    let mut job = job();
    job.cookie = Some(OneOrMany::One("a".into()));
    assert_eq!(build_args(&job), with_target(&["--cookie", "a"]));
    job.cookie = Some(strings(&["a", "b"]));
    assert_eq!(
        build_args(&job),
        with_target(&["--cookie", "a", "--cookie", "b"])
    );
}

#[test]
fn css_and_js() {
    let mut job = job();
    job.css = Some(OneOrMany::One("a.css".into()));
    job.js = Some(strings(&["a.js", "b.js"]));
    assert_eq!(
        build_args(&job),
        with_target(&["--css", "a.css", "--js", "a.js", "--js", "b.js"])
    );
}

#[test]
fn delay() {
    let mut job = job();
    job.delay = Some(OneOrMany::One(1000));
    assert_eq!(build_args(&job), with_target(&["--delay", "1000"]));
    job.delay = Some(OneOrMany::Many(vec![1000, 2000]));
    assert_eq!(
        build_args(&job),
        with_target(&["--delay", "1000", "--delay", "2000"])
    );
}

#[test]
fn zero_delay_is_kept() {
    let mut job = job();
    job.delay = Some(OneOrMany::One(0));
    assert_eq!(build_args(&job), with_target(&["--delay", "0"]));
}

#[test]
fn device_is_compact_json() {
    let mut job = job();
    job.device = Some(json!({ "name": "device", "width": 320 }));
    assert_eq!(
        build_args(&job),
        with_target(&["--device", r#"{"name":"device","width":320}"#])
    );
}

#[test]
fn filename_and_format() {
    let mut job = job();
    job.filename = Some("test.png".into());
    job.format = Some(Format::Jpg);
    assert_eq!(
        build_args(&job),
        with_target(&["--filename", "test.png", "--format", "jpg"])
    );
}

#[test]
fn network_preset() {
    let mut job = job();
    job.network = Some(Network::Preset("Regular 3G".into()));
    assert_eq!(
        build_args(&job),
        with_target(&["--emulate-network", "Regular 3G"])
    );
}

#[test]
fn network_throttle_emits_only_present_values() {
    let mut job = job();
    job.network = Some(Network::Throttle(NetworkThrottle {
        download: Some(1000),
        ..NetworkThrottle::default()
    }));
    assert_eq!(build_args(&job), with_target(&["--download", "1000"]));

    job.network = Some(Network::Throttle(NetworkThrottle {
        download: None,
        latency: Some(500),
        upload: Some(1000),
    }));
    assert_eq!(
        build_args(&job),
        with_target(&["--latency", "500", "--upload", "1000"])
    );
}

#[test]
fn pdf_options() {
    let mut job = job();
    job.pdf = Some(PdfOptions {
        background: Some(true),
        margin: Some("0.5in".into()),
        orientation: Some(Orientation::Landscape),
        page_size: Some("letter".into()),
    });
    assert_eq!(
        build_args(&job),
        with_target(&[
            "--pdf-background",
            "true",
            "--pdf-margin",
            "0.5in",
            "--pdf-orientation",
            "landscape",
            "--pdf-page-size",
            "letter",
        ])
    );
}

#[test]
fn falsy_values_are_not_dropped() {
    let mut job = job();
    job.pdf = Some(PdfOptions {
        background: Some(false),
        ..PdfOptions::default()
    });
    job.jpg = Some(JpgOptions { quality: Some(0) });
    assert_eq!(
        build_args(&job),
        with_target(&["--pdf-background", "false", "--quality", "0"])
    );
}

#[test]
fn quality() {
    let mut job = job();
    job.jpg = Some(JpgOptions { quality: Some(75) });
    assert_eq!(build_args(&job), with_target(&["--quality", "75"]));
    job.jpg = Some(JpgOptions::default());
    assert_eq!(build_args(&job), with_target(&[]));
}

#[test]
fn selector_user_agent_and_zoom() {
    let mut job = job();
    job.selector = Some("div.any".into());
    job.user_agent = Some("chrome".into());
    job.zoom_factor = Some(2.1);
    assert_eq!(
        build_args(&job),
        with_target(&[
            "--selector",
            "div.any",
            "--user-agent",
            "chrome",
            "--zoom-factor",
            "2.1",
        ])
    );
}

#[test]
fn multiple_options_in_fixed_order() {
    let mut job = job();
    job.height = Some(Dimension::Pixels(1080));
    job.format = Some(Format::Png);
    job.cookie = Some(strings(&["a", "b"]));
    assert_eq!(
        build_args(&job),
        vec![
            "--cookie",
            "a",
            "--cookie",
            "b",
            "--format",
            "png",
            URL,
            "1920x1080",
        ]
    );
}

#[test]
fn order_does_not_depend_on_request_field_order() {
    let a: JobDescription = serde_json::from_value(json!({
        "zoom-factor": 1.5, "selector": "p", "cookie": "c", "url": URL, "width": 1920
    }))
    .unwrap();
    let b: JobDescription = serde_json::from_value(json!({
        "url": URL, "width": 1920, "cookie": "c", "selector": "p", "zoom-factor": 1.5
    }))
    .unwrap();
    assert_eq!(build_args(&a), build_args(&b));
    assert_eq!(
        build_args(&a),
        with_target(&["--cookie", "c", "--selector", "p", "--zoom-factor", "1.5"])
    );
}
