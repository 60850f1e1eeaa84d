use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use annotation_algebra::request::{Evaluation, Request};
use anyhow::{Context, Result};
use clap::{arg, Command};
use log::info;
use qtty::Second;

fn build_cli() -> Command {
    Command::new("annotation-algebra")
        .version("0.1")
        .about("Combine two labelled annotation tracks with a set operator")
        .arg(
            arg!([REQUEST] "JSON request file")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("requests.json"),
        )
        .arg(arg!(--json "Print every stage as JSON"))
}

fn print_track(name: &str, track: &[annotation_algebra::Annotation<Second>]) {
    let spans: Vec<String> = track.iter().map(ToString::to_string).collect();
    println!("{:<8}: [{}]", name, spans.join(" "));
}

fn print_report(request: &Request, evaluation: &Evaluation<Second>) {
    println!("operator: {}", evaluation.operator);
    print_track(&request.value1, &evaluation.first);
    print_track(&request.value2, &evaluation.second);
    print_track("ORIGIN", &evaluation.raw);
    print_track("RESULT", &evaluation.result);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = build_cli().get_matches();
    let path = matches
        .get_one::<PathBuf>("REQUEST")
        .context("no request file given")?;

    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let request = Request::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse {}", path.display()))?;
    info!(
        "{}: {} annotations, {} {} {} -> {}",
        path.display(),
        request.annotations.len(),
        request.value1,
        request.operator,
        request.value2,
        request.assign_label
    );

    let evaluation = request.evaluate::<Second>()?;
    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_report(&request, &evaluation);
    }
    Ok(())
}
