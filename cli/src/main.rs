use clap::{Parser, Subcommand};
use fabric_channels::render::{raster, text};
use fabric_channels::{Channels, check};
use fabric_common::db::parser::routes;
use fabric_common::util::config::Config;
use fabric_common::util::{generator, logger};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign track indices to every route of a route list.
    Pack {
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Write a random route list.
    Generate {
        #[arg(long)]
        routes: Option<usize>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        max_length: Option<u32>,
        #[arg(long)]
        bent_ratio: Option<f64>,
        #[arg(long, default_value = "inputs/random.txt")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        load_config(&args.config)?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Pack {
        input: None,
        output: None,
    });

    match command {
        Commands::Generate {
            routes,
            width,
            height,
            max_length,
            bent_ratio,
            output,
        } => {
            let gen_config = &mut config.generator;
            if let Some(v) = routes {
                gen_config.routes = v;
            }
            if let Some(v) = width {
                gen_config.width = v;
            }
            if let Some(v) = height {
                gen_config.height = v;
            }
            if let Some(v) = max_length {
                gen_config.max_length = v;
            }
            if let Some(v) = bent_ratio {
                let safe = v.clamp(0.0, 1.0);
                if (safe - v).abs() > f64::EPSILON {
                    log::warn!("Bent ratio {:.2} clamped to {:.2}", v, safe);
                }
                gen_config.bent_ratio = safe;
            }

            prepare_output_dir(&output)?;
            generator::generate_random_routes(&output, gen_config)?;
            log::info!("Generated: {}", output);
        }
        Commands::Pack { input, output } => {
            if let Some(input) = input {
                config.input.routes_file = input;
            }
            if let Some(output) = output {
                config.input.output_file = output;
            }
            if run_packing(&config).is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
    toml::from_str(&config_str).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_packing(config: &Config) -> anyhow::Result<()> {
    let input = &config.input.routes_file;
    if !Path::new(input).exists() {
        log::error!("Input route list missing: {}", input);
        return Err(anyhow::anyhow!("Input route list missing: {}", input));
    }

    log::info!("Parsing route list: {}", input);
    let db = routes::parse(input).map_err(|e| {
        log::error!("Invalid route list '{}': {}", input, e);
        anyhow::anyhow!("Invalid route list '{}': {}", input, e)
    })?;

    log::info!("Packing {} routes...", db.num_routes());
    let channels = fabric_channels::pack(&db).map_err(|e| {
        log::error!("Packing failed: {}", e);
        anyhow::anyhow!(e)
    })?;

    check::run_all(&channels).map_err(|e| anyhow::anyhow!("Verification Failed: {}", e))?;

    if config.render.text {
        for grid in [channels.column(), channels.row()] {
            print_block(&grid.orientation().to_string(), &text::pretty_print(grid));
        }
    }

    if let Some(prefix) = &config.render.image_prefix {
        prepare_output_dir(prefix)?;
        for grid in [channels.column(), channels.row()] {
            let filename = format!(
                "{}_{}.png",
                prefix,
                grid.orientation().as_str().to_lowercase()
            );
            log::info!("Generating channel visualization {}", filename);
            if let Err(e) = raster::save_channels(
                grid,
                &filename,
                config.render.image_width,
                config.render.image_height,
            ) {
                log::warn!("Could not write {}: {}", filename, e);
            }
        }
    }

    let output = &config.input.output_file;
    prepare_output_dir(output)?;
    log::info!("Writing packed channels to {}", output);
    save_channels(&channels, output)?;

    Ok(())
}

fn print_block(name: &str, s: &str) {
    println!();
    println!("{} {}", name, "-".repeat(75 - (name.len() + 1)));
    print!("{}", s);
    if !s.ends_with('\n') {
        println!();
    }
    println!("{}", "-".repeat(75));
}

/// One line per placed segment: `<label|-> <CHANX|CHANY> <x0> <y0> <x1> <y1> <index>`.
fn save_channels(channels: &Channels, filename: &str) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(filename)?);

    let size = channels.size();
    writeln!(file, "GRID {} {}", size.width, size.height)?;
    for grid in [channels.column(), channels.row()] {
        for seg in grid.segments() {
            let index = seg.index().map_or("-".to_string(), |i| i.to_string());
            writeln!(
                file,
                "{} {} {} {} {} {} {}",
                seg.label().unwrap_or("-"),
                grid.orientation(),
                seg.start().x,
                seg.start().y,
                seg.end().x,
                seg.end().y,
                index
            )?;
        }
    }
    file.flush()
}
