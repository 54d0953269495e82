use std::fmt::Display;

use crate::job::{JobDescription, Network, OneOrMany};

/// Translate a validated job into the capture tool's command line.
///
/// Flags come out in a fixed order; the URL and the `WIDTH` or `WIDTHxHEIGHT`
/// size are always the last two arguments.
pub fn build_args(job: &JobDescription) -> Vec<String> {
    let mut args = Vec::new();

    push_multi(&mut args, "--cookie", job.cookie.as_ref());
    push_multi(&mut args, "--css", job.css.as_ref());
    push_multi(&mut args, "--delay", job.delay.as_ref());

    if let Some(device) = &job.device {
        // Value's Display is the compact JSON encoding.
        push_flag(&mut args, "--device", Some(device));
    }

    push_flag(&mut args, "--filename", job.filename.as_ref());
    push_flag(&mut args, "--format", job.format);
    push_multi(&mut args, "--js", job.js.as_ref());

    match &job.network {
        Some(Network::Preset(name)) => push_flag(&mut args, "--emulate-network", Some(name)),
        Some(Network::Throttle(throttle)) => {
            push_flag(&mut args, "--download", throttle.download);
            push_flag(&mut args, "--latency", throttle.latency);
            push_flag(&mut args, "--upload", throttle.upload);
        }
        None => {}
    }

    if let Some(pdf) = &job.pdf {
        push_flag(&mut args, "--pdf-background", pdf.background);
        push_flag(&mut args, "--pdf-margin", pdf.margin.as_ref());
        push_flag(&mut args, "--pdf-orientation", pdf.orientation);
        push_flag(&mut args, "--pdf-page-size", pdf.page_size.as_ref());
    }

    if let Some(jpg) = &job.jpg {
        push_flag(&mut args, "--quality", jpg.quality);
    }

    push_flag(&mut args, "--selector", job.selector.as_ref());
    push_flag(&mut args, "--user-agent", job.user_agent.as_ref());
    push_flag(&mut args, "--zoom-factor", job.zoom_factor);

    args.push(job.url.clone());
    match &job.height {
        Some(height) => args.push(format!("{}x{}", job.width, height)),
        None => args.push(job.width.to_string()),
    }

    args
}

fn push_flag<T: Display>(args: &mut Vec<String>, flag: &str, value: Option<T>) {
    if let Some(value) = value {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

fn push_multi<T: Display>(args: &mut Vec<String>, flag: &str, values: Option<&OneOrMany<T>>) {
    for value in values.map(OneOrMany::as_slice).unwrap_or_default() {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}
