use std::{error::Error, fs, io, process};

use clap::{App, Arg, ArgMatches};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use glossa::error::GlossaError;
use glossa::frontend::{
    lexer::Lexer,
    parser::Parser,
    visualize::{graph, Policy, Visualizer},
    walker,
};

fn main() {
    init_tracing();
    let matches = App::new("glossa")
        .version("0.1.0")
        .about(
            "A frontend for the GLOSSA programming language that visualizes parse trees \
            with the help of GraphViz/DOT.",
        )
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .about("Path to the GLOSSA source file.")
                .required(true),
        )
        .arg(
            Arg::new("visualize")
                .long("visualize")
                .value_name("PATH")
                .about(
                    "Serializes the parse tree into the DOT language and writes it to \
                    PATH.dot.",
                )
                .takes_value(true),
        )
        .arg(
            Arg::new("render")
                .long("render")
                .value_name("FORMAT")
                .about(
                    "Additionally invokes GraphViz on the DOT artifact to produce \
                    PATH.FORMAT, e.g. png or svg. Requires --visualize.",
                )
                .takes_value(true),
        )
        .arg(
            Arg::new("capture-literals")
                .long("capture-literals")
                .about(
                    "Embeds identifier and literal source text in the graph node ids and \
                    draws control constructs.",
                )
                .takes_value(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .about("Output the parse tree. Useful for debugging.")
                .takes_value(false),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Run the pipeline on one source file: tokenize, parse, optionally write
/// (and render) the parse-tree graph, then print every token in scan order.
fn run(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let path = args.value_of("input").unwrap();
    let src = fs::read_to_string(path).map_err(|e| GlossaError::resource(path, e))?;

    let tokens = Lexer::new(&src).tokenize()?;
    let tree = Parser::new(tokens.clone()).parse()?;
    if args.is_present("verbose") {
        println!("Parse tree:");
        println!("{:#?}", tree);
    }

    if let Some(base) = args.value_of("visualize") {
        let policy = if args.is_present("capture-literals") {
            Policy::literal_capture()
        } else {
            Policy::guarded()
        };
        let dot_path = format!("{}.dot", base);
        let mut session = Visualizer::create(&dot_path, policy)?;
        if let Err(e) = walker::walk(&mut session, &tree) {
            // Leave a closed, well-terminated artifact behind even when the
            // traversal failed.
            let _ = session.abort();
            return Err(e.into());
        }
        debug!("wrote parse tree graph to {}", dot_path);

        if let Some(format) = args.value_of("render") {
            let image_path = format!("{}.{}", base, format);
            match graph::render(&dot_path, &image_path, format) {
                Ok(()) => debug!("rendered {}", image_path),
                // The DOT artifact stays valid even when rendering fails.
                Err(e) => warn!("{}", e),
            }
        }
    }

    for token in &tokens {
        println!("{}", token);
    }
    Ok(())
}
