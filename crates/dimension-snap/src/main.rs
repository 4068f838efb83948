use clap::{Parser, Subcommand};
use dimension_snap::{
    next_decoration_state, parse_multiple, parse_nominal, step, Decoration, DimensionFormatter,
    DimensionSign, Direction, PairState, RoundMode, SequenceKind, Settings, SnapError,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dimension-snap", about = "Round drawing dimensions to nice values")]
struct Cli {
    /// Settings JSON file (defaults are used when missing)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Round a value and print the dimension text
    Round {
        /// Number, or a DMS angle such as -30°30'15"
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Rounding step; unparseable text falls back to 1
        #[arg(short, long)]
        multiple: Option<String>,

        /// Rounding direction (down, nearest, up)
        #[arg(long, default_value = "nearest")]
        mode: String,

        /// Treat the value as an angle in degrees
        #[arg(long)]
        angle: bool,

        /// Print angles as decimal degrees instead of DMS
        #[arg(long)]
        decimal: bool,

        /// Sign code printed before the value (0 none, 1 diameter, 2 square,
        /// 3 radius, 4 metric thread)
        #[arg(long, default_value_t = 0)]
        sign: u8,
    },
    /// Move a value to the next or previous preferred value
    Step {
        value: f64,

        /// Step down instead of up
        #[arg(long)]
        previous: bool,

        /// Preferred value table (coarse, dense); overrides the config
        #[arg(long)]
        sequence: Option<String>,
    },
    /// Print the next state of a decoration toggle
    Toggle {
        /// extension-lines or arrows
        decoration: String,

        /// Current state as a number 0..=3 (first flag is the high bit)
        state: u8,
    },
}

fn parse_mode(s: &str) -> Result<RoundMode, String> {
    match s.to_lowercase().as_str() {
        "down" => Ok(RoundMode::Down),
        "nearest" => Ok(RoundMode::Nearest),
        "up" => Ok(RoundMode::Up),
        _ => Err(format!("Unknown mode: {s}. Use: down, nearest, up")),
    }
}

fn parse_sequence(s: &str) -> Result<SequenceKind, String> {
    match s.to_lowercase().as_str() {
        "coarse" => Ok(SequenceKind::Coarse),
        "dense" => Ok(SequenceKind::Dense),
        _ => Err(format!("Unknown sequence: {s}. Use: coarse, dense")),
    }
}

fn parse_decoration(s: &str) -> Result<Decoration, String> {
    match s.to_lowercase().as_str() {
        "extension-lines" | "lines" => Ok(Decoration::ExtensionLines),
        "arrows" => Ok(Decoration::Arrows),
        _ => Err(format!("Unknown decoration: {s}. Use: extension-lines, arrows")),
    }
}

fn run(cli: Cli) -> Result<String, String> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path).map_err(|e: SnapError| e.to_string())?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Round {
            value,
            multiple,
            mode,
            angle,
            decimal,
            sign,
        } => {
            let mode = parse_mode(&mode)?;
            let sign = DimensionSign::from_code(sign)
                .ok_or_else(|| format!("Unknown sign code: {sign}. Use 0..=4"))?;
            let (value, is_dms) =
                parse_nominal(&value, settings.decimal_separator).map_err(|e| e.to_string())?;
            if let Some(text) = multiple {
                settings.multiple = parse_multiple(&text, settings.decimal_separator);
            }
            if decimal {
                settings.is_angle_dms = false;
            }
            let text = DimensionFormatter::new(&settings, mode)
                .format(value, angle || is_dms)
                .map_err(|e| e.to_string())?;
            Ok(format!("{}{text}", sign.symbol()))
        }
        Command::Step {
            value,
            previous,
            sequence,
        } => {
            let kind = match sequence {
                Some(s) => parse_sequence(&s)?,
                None => settings.sequence,
            };
            let direction = if previous {
                Direction::Previous
            } else {
                Direction::Next
            };
            step(value, direction, kind)
                .map(|v| v.to_string())
                .map_err(|e| e.to_string())
        }
        Command::Toggle { decoration, state } => {
            let decoration = parse_decoration(&decoration)?;
            let next = next_decoration_state(decoration, PairState::new(state));
            Ok(format!("{:02b}", next.bits()))
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
