//! Command tests for planetgen, run against temporary files

use planetgen::{render_config, run_generate, InterpolationArg, NoiseArg, NormalsArg, PlanetArgs};
use planetoid::{InterpolationMode, MeshBuffers, NoiseKind, NormalMode, PlanetConfig};
use tempfile::TempDir;

fn small_planet() -> PlanetArgs {
    PlanetArgs {
        resolution: Some(8),
        radius: Some(2.0),
        noise: Some(NoiseArg::Disabled),
        parallel: Some(false),
        ..PlanetArgs::default()
    }
}

#[test]
fn test_generate_obj() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("planet.obj");

    let mesh = run_generate(&small_planet(), &output).unwrap();
    assert!(mesh.triangle_count() > 0);

    let text = std::fs::read_to_string(&output).unwrap();
    let faces = text.lines().filter(|l| l.starts_with("f ")).count();
    let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
    assert_eq!(faces, mesh.triangle_count());
    assert_eq!(vertices, mesh.vertex_count());
}

#[test]
fn test_generate_json() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("planet.json");

    let mesh = run_generate(&small_planet(), &output).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let buffers: MeshBuffers = serde_json::from_str(&text).unwrap();
    assert_eq!(buffers, mesh.to_buffers());
}

#[test]
fn test_unknown_extension_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("planet.stl");

    let err = run_generate(&small_planet(), &output).unwrap_err();
    assert!(err.to_string().contains(".obj or .json"));
    assert!(!output.exists());
}

#[test]
fn test_config_file_with_flag_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("planet.toml");
    std::fs::write(
        &path,
        "resolution = 16\nradius = 4.0\ncave_seed = \"deep\"\nnoise = \"perlin\"\n",
    )
    .unwrap();

    let args = PlanetArgs {
        config: Some(path),
        radius: Some(6.0),
        ..PlanetArgs::default()
    };
    let config = PlanetConfig::from_toml_str(&render_config(&args).unwrap()).unwrap();

    assert_eq!(config.resolution, 16);
    assert_eq!(config.radius, 6.0);
    assert_eq!(config.cave_seed, "deep");
    assert_eq!(config.noise, NoiseKind::Perlin);
}

#[test]
fn test_flags_switch_config_options_back_off() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("planet.toml");
    std::fs::write(
        &path,
        "interpolation = \"weighted\"\nnormals = \"smooth\"\nparallel = true\n",
    )
    .unwrap();

    let from_file = PlanetArgs {
        config: Some(path.clone()),
        ..PlanetArgs::default()
    };
    let config = PlanetConfig::from_toml_str(&render_config(&from_file).unwrap()).unwrap();
    assert_eq!(config.interpolation, InterpolationMode::Weighted);
    assert_eq!(config.normals, NormalMode::Smooth);
    assert!(config.parallel);

    let overridden = PlanetArgs {
        config: Some(path),
        interpolation: Some(InterpolationArg::Midpoint),
        normals: Some(NormalsArg::Faceted),
        parallel: Some(false),
        ..PlanetArgs::default()
    };
    let config = PlanetConfig::from_toml_str(&render_config(&overridden).unwrap()).unwrap();
    assert_eq!(config.interpolation, InterpolationMode::Midpoint);
    assert_eq!(config.normals, NormalMode::Faceted);
    assert!(!config.parallel);
}

#[test]
fn test_missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let args = PlanetArgs {
        config: Some(dir.path().join("missing.toml")),
        ..PlanetArgs::default()
    };

    let err = render_config(&args).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.toml"));
}

#[test]
fn test_empty_seed_is_rejected() {
    let dir = TempDir::new().unwrap();
    let args = PlanetArgs {
        mountain_seed: Some(String::new()),
        ..small_planet()
    };

    assert!(run_generate(&args, &dir.path().join("planet.obj")).is_err());
}
