use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use eframe::egui::Pos2;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nodewire")]
#[command(author, version, about)]
#[command(long_about = "Connection rendering for node-graph editors.\n\n\
    Inspect the bezier paths, hit regions and type colors used to draw\n\
    connections between node ports, or try them out interactively.\n\n\
    Examples:\n  \
    nodewire preview                          Open the interactive preview\n  \
    nodewire color Integer Double             Show derived type colors\n  \
    nodewire render --sink 200,80 --selected  Dump draw commands\n  \
    nodewire hit --sink 200,80 --point 100,40 Test a pointer position")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the color derived from one or more data type identifiers
    Color {
        /// Type identifiers (any string, including "")
        #[arg(required = true)]
        type_ids: Vec<String>,
    },

    /// Print the ordered draw commands for a single connection
    Render {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Data type identifier carried by the connection
        #[arg(long, default_value = "")]
        type_id: String,

        /// Render as selected
        #[arg(long)]
        selected: bool,

        /// Render as hovered
        #[arg(long)]
        hovered: bool,

        /// Render as under construction (one end not yet attached)
        #[arg(long)]
        requires_port: bool,

        /// Include control points, raw curve and hit region
        #[arg(long)]
        debug_overlay: bool,

        /// Style preset to use instead of the configured one
        #[arg(long, value_enum)]
        theme: Option<ThemeName>,

        /// Style file (YAML, or JSON with a .json extension)
        #[arg(long, conflicts_with = "theme")]
        style: Option<PathBuf>,
    },

    /// Test whether a point falls inside a connection's hit region
    Hit {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Pointer position as x,y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        point: Pos2,

        /// Hit band width (defaults to the configured value)
        #[arg(long)]
        width: Option<f32>,

        /// Curve flattening resolution (defaults to the configured value)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        segments: Option<u32>,
    },

    /// Open a window with one interactive connection
    Preview {
        /// Style preset to start with
        #[arg(long, value_enum)]
        theme: Option<ThemeName>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

/// Endpoints and optional control points of a connection.
#[derive(Args, Clone, Copy)]
pub struct GeometryArgs {
    /// Source port position as x,y
    #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
    pub source: Pos2,

    /// Sink port position as x,y
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub sink: Pos2,

    /// First control point as x,y (derived from the endpoints when omitted)
    #[arg(long, value_parser = parse_point, requires = "control2", allow_hyphen_values = true)]
    pub control1: Option<Pos2>,

    /// Second control point as x,y
    #[arg(long, value_parser = parse_point, requires = "control1", allow_hyphen_values = true)]
    pub control2: Option<Pos2>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, style.line_width, style.hovered_color)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Parse `x,y` into a point.
pub fn parse_point(s: &str) -> Result<Pos2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x: f32 = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate '{}'", x.trim()))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate '{}'", y.trim()))?;
    Ok(Pos2::new(x, y))
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Color { type_ids }) => {
                crate::commands::inspect::color(&type_ids);
                Ok(())
            }
            Some(Commands::Render {
                geometry,
                type_id,
                selected,
                hovered,
                requires_port,
                debug_overlay,
                theme,
                style,
            }) => crate::commands::inspect::render(crate::commands::inspect::RenderRequest {
                geometry,
                type_id,
                selected,
                hovered,
                requires_port,
                debug_overlay,
                theme,
                style,
            }),
            Some(Commands::Hit {
                geometry,
                point,
                width,
                segments,
            }) => crate::commands::inspect::hit(geometry, point, width, segments),
            Some(Commands::Preview { theme }) => crate::commands::preview::run(theme),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("nodewire {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
