//! planetgen - build planetoid meshes from the command line
//!
//! The binary in `main.rs` only parses arguments and sets up logging; the
//! commands live here so they can be driven from tests.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use planetoid::{
    save_json, save_obj, InterpolationMode, NoiseKind, NormalMode, PlanetConfig, PlanetGenerator,
    PlanetMesh,
};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is not given
pub const CONFIG_ENV: &str = "PLANETGEN_CONFIG";

#[derive(Parser, Debug)]
#[command(name = "planetgen")]
#[command(author, version, about = "Generate procedural planetoid meshes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a planet and write it as .obj or .json
    Generate {
        #[command(flatten)]
        planet: PlanetArgs,

        /// Output file path (.obj or .json)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate a planet and print mesh statistics
    Stats {
        #[command(flatten)]
        planet: PlanetArgs,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        planet: PlanetArgs,
    },
}

/// Noise algorithm selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseArg {
    Simplex,
    Perlin,
    OpenSimplex,
    SuperSimplex,
    Value,
    Disabled,
}

impl From<NoiseArg> for NoiseKind {
    fn from(arg: NoiseArg) -> Self {
        match arg {
            NoiseArg::Simplex => NoiseKind::Simplex,
            NoiseArg::Perlin => NoiseKind::Perlin,
            NoiseArg::OpenSimplex => NoiseKind::OpenSimplex,
            NoiseArg::SuperSimplex => NoiseKind::SuperSimplex,
            NoiseArg::Value => NoiseKind::Value,
            NoiseArg::Disabled => NoiseKind::Disabled,
        }
    }
}

/// Vertex placement selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpolationArg {
    Midpoint,
    Weighted,
}

impl From<InterpolationArg> for InterpolationMode {
    fn from(arg: InterpolationArg) -> Self {
        match arg {
            InterpolationArg::Midpoint => InterpolationMode::Midpoint,
            InterpolationArg::Weighted => InterpolationMode::Weighted,
        }
    }
}

/// Normal averaging selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalsArg {
    Faceted,
    Smooth,
}

impl From<NormalsArg> for NormalMode {
    fn from(arg: NormalsArg) -> Self {
        match arg {
            NormalsArg::Faceted => NormalMode::Faceted,
            NormalsArg::Smooth => NormalMode::Smooth,
        }
    }
}

/// Planet parameters shared by every subcommand.
///
/// Flags override values from the config file, which override the defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanetArgs {
    /// TOML config file
    #[arg(short, long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Lattice points per axis
    #[arg(short = 'r', long)]
    pub resolution: Option<usize>,

    /// Planet radius
    #[arg(long)]
    pub radius: Option<f32>,

    /// Seed for the cave noise
    #[arg(long)]
    pub cave_seed: Option<String>,

    /// Seed for the mountain noise
    #[arg(long)]
    pub mountain_seed: Option<String>,

    /// Noise algorithm for both sources
    #[arg(long, value_enum)]
    pub noise: Option<NoiseArg>,

    /// Vertex placement along crossed edges
    #[arg(long, value_enum)]
    pub interpolation: Option<InterpolationArg>,

    /// Whether normals are averaged across vertices that share a position
    #[arg(long, value_enum)]
    pub normals: Option<NormalsArg>,

    /// Use the thread pool (true) or the current thread only (false)
    #[arg(long, value_name = "BOOL")]
    pub parallel: Option<bool>,
}

impl PlanetArgs {
    /// Build the effective configuration.
    pub fn resolve(&self) -> Result<PlanetConfig> {
        let mut config = match &self.config {
            Some(path) => PlanetConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PlanetConfig::default(),
        };

        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(seed) = &self.cave_seed {
            config.cave_seed = seed.clone();
        }
        if let Some(seed) = &self.mountain_seed {
            config.mountain_seed = seed.clone();
        }
        if let Some(noise) = self.noise {
            config.noise = noise.into();
        }
        if let Some(interpolation) = self.interpolation {
            config.interpolation = interpolation.into();
        }
        if let Some(normals) = self.normals {
            config.normals = normals.into();
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }

        config.validate().context("Invalid planet configuration")?;
        Ok(config)
    }
}

/// Output format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Obj,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("obj") => Ok(Self::Obj),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => bail!(
                "Output file must end in .obj or .json (got {})",
                path.display()
            ),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate { planet, output } => {
            let mesh = run_generate(&planet, &output)?;
            println!(
                "Generated {} triangles → {}",
                mesh.triangle_count(),
                output.display()
            );
        }
        Commands::Stats { planet } => {
            let mesh = build_mesh(&planet.resolve()?)?;
            println!("{}", mesh.stats());
        }
        Commands::Config { planet } => {
            print!("{}", render_config(&planet)?);
        }
    }
    Ok(())
}

/// Generate a mesh and write it to `output`.
pub fn run_generate(planet: &PlanetArgs, output: &Path) -> Result<PlanetMesh> {
    // Reject a bad extension before spending time on generation
    let format = OutputFormat::from_path(output)?;
    let mesh = build_mesh(&planet.resolve()?)?;

    match format {
        OutputFormat::Obj => save_obj(&mesh, output),
        OutputFormat::Json => save_json(&mesh, output),
    }
    .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(mesh)
}

/// The effective configuration as TOML.
pub fn render_config(planet: &PlanetArgs) -> Result<String> {
    let config = planet.resolve()?;
    config
        .to_toml_string()
        .context("Failed to serialize configuration")
}

fn build_mesh(config: &PlanetConfig) -> Result<PlanetMesh> {
    let generator = PlanetGenerator::new(config.clone()).context("Failed to set up generator")?;
    let mesh = generator.generate().context("Planet generation failed")?;
    tracing::info!("{}", mesh.stats());
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("planet.obj")).unwrap(),
            OutputFormat::Obj
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/planet.JSON")).unwrap(),
            OutputFormat::Json
        );
        assert!(OutputFormat::from_path(Path::new("planet.stl")).is_err());
        assert!(OutputFormat::from_path(Path::new("planet")).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = PlanetArgs {
            resolution: Some(12),
            radius: Some(3.0),
            cave_seed: Some("c".into()),
            noise: Some(NoiseArg::Perlin),
            interpolation: Some(InterpolationArg::Weighted),
            normals: Some(NormalsArg::Smooth),
            parallel: Some(false),
            ..PlanetArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.resolution, 12);
        assert_eq!(config.radius, 3.0);
        assert_eq!(config.cave_seed, "c");
        assert_eq!(config.mountain_seed, "testseed-mountains");
        assert_eq!(config.noise, NoiseKind::Perlin);
        assert_eq!(config.interpolation, InterpolationMode::Weighted);
        assert_eq!(config.normals, NormalMode::Smooth);
        assert!(!config.parallel);
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        let args = PlanetArgs {
            resolution: Some(1),
            ..PlanetArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "planetgen",
            "generate",
            "-r",
            "8",
            "--radius",
            "2.5",
            "--noise",
            "open-simplex",
            "--interpolation",
            "weighted",
            "--parallel",
            "false",
            "-o",
            "planet.obj",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { planet, output } => {
                assert_eq!(planet.resolution, Some(8));
                assert_eq!(planet.radius, Some(2.5));
                assert_eq!(planet.noise, Some(NoiseArg::OpenSimplex));
                assert_eq!(planet.interpolation, Some(InterpolationArg::Weighted));
                assert_eq!(planet.normals, None);
                assert_eq!(planet.parallel, Some(false));
                assert_eq!(output, PathBuf::from("planet.obj"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_config_path_reads_the_environment() {
        let command = Cli::command();
        let generate = command
            .find_subcommand("generate")
            .expect("generate subcommand");
        let config = generate
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .expect("config argument");
        assert_eq!(config.get_env(), Some(std::ffi::OsStr::new(CONFIG_ENV)));
    }

    #[test]
    fn test_resolve_ignores_the_environment() {
        // Only the parsed arguments are consulted; the env fallback is clap's job
        let args = PlanetArgs::default();
        assert_eq!(args.resolve().unwrap(), PlanetConfig::default());
    }
}
