use chordsheet::{render_song, write_source, EngineConfig, NotationSystem, ProcessInput, SongMeta};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: chordsheet [--config <settings.yaml>] [--transpose <N>] [--solfege] [--hide-chords]
                  [--author <name>] [--key <key>] [--capo <N>] [--source] <input> [output]";

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn next_value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> &'a String {
    match args.next() {
        Some(value) => value,
        None => fail(&format!("Missing value for {}\n{}", flag, USAGE)),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut config_path: Option<&String> = None;
    let mut transpose: Option<i32> = None;
    let mut solfege = false;
    let mut hide_chords = false;
    let mut source_output = false;
    let mut meta = SongMeta::default();
    let mut positional: Vec<&String> = Vec::new();

    // Parse flags
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = Some(next_value(&mut iter, arg)),
            "--transpose" => {
                let value = next_value(&mut iter, arg);
                match value.parse() {
                    Ok(n) => transpose = Some(n),
                    Err(_) => fail(&format!("Invalid transpose amount '{}'", value)),
                }
            }
            "--solfege" => solfege = true,
            "--hide-chords" => hide_chords = true,
            "--source" => source_output = true,
            "--author" => meta.author = Some(next_value(&mut iter, arg).clone()),
            "--key" => meta.original_key = Some(next_value(&mut iter, arg).clone()),
            "--capo" => {
                let value = next_value(&mut iter, arg);
                match value.parse() {
                    Ok(n) => meta.capo = Some(n),
                    Err(_) => fail(&format!("Invalid capo '{}'", value)),
                }
            }
            flag if flag.starts_with("--") => fail(&format!("Unknown option '{}'\n{}", flag, USAGE)),
            _ => positional.push(arg),
        }
    }

    let (input_path, output_path) = match positional.as_slice() {
        [input] => (*input, None),
        [input, output] => (*input, Some(*output)),
        _ => fail(USAGE),
    };

    // Settings file first, command-line flags override it
    let mut config = match config_path {
        Some(path) => {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => fail(&format!("Error reading config '{}': {}", path, e)),
            };
            match EngineConfig::from_yaml(&content) {
                Ok(config) => config,
                Err(e) => fail(&e.to_string()),
            }
        }
        None => EngineConfig::default(),
    };
    if let Some(n) = transpose {
        config.transpose = n;
    }
    if solfege {
        config.notation = NotationSystem::Solfege;
    }
    if hide_chords {
        config.render.chords_visible = false;
    }

    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => fail(&format!("Error reading file '{}': {}", input_path, e)),
    };

    let input = ProcessInput {
        raw_markup: source,
        transpose_semitones: config.transpose,
        notation: config.notation,
        settings: config.render,
        meta,
    };
    let result = if source_output {
        write_source(&input)
    } else {
        render_song(&input)
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => fail(&format!("Processing error: {}", e)),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                fail(&format!("Error writing to '{}': {}", path, e));
            }
            tracing::info!(path = %path, "wrote output");
        }
        None => print!("{}", output),
    }
}
